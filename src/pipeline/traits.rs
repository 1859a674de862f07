use std::ops::Range;

pub trait SimilarityScorer: Send + Sync {
    /// Similarity of two folded strings in [0, 1]. Must be total.
    fn score(&self, a: &str, b: &str) -> f64;
}

pub trait SentenceSplitter: Send + Sync {
    /// Sentence index ranges over a word sequence, covering every word once.
    fn split_words(&self, words: &[String]) -> Vec<Range<usize>>;
}

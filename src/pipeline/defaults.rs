use std::ops::Range;

use crate::alignment::sentences::split_sentences;
use crate::alignment::similarity::{lcs_ratio, levenshtein_ratio};
use crate::config::SimilarityMetric;
use crate::pipeline::traits::{SentenceSplitter, SimilarityScorer};

pub struct LevenshteinScorer;

impl SimilarityScorer for LevenshteinScorer {
    fn score(&self, a: &str, b: &str) -> f64 {
        levenshtein_ratio(a, b)
    }
}

pub struct LcsScorer;

impl SimilarityScorer for LcsScorer {
    fn score(&self, a: &str, b: &str) -> f64 {
        lcs_ratio(a, b)
    }
}

pub fn scorer_for(metric: SimilarityMetric) -> Box<dyn SimilarityScorer> {
    match metric {
        SimilarityMetric::Levenshtein => Box::new(LevenshteinScorer),
        SimilarityMetric::Lcs => Box::new(LcsScorer),
    }
}

pub struct TerminalPunctuationSplitter {
    terminators: Vec<char>,
}

impl TerminalPunctuationSplitter {
    pub fn new(terminators: Vec<char>) -> Self {
        Self { terminators }
    }
}

impl SentenceSplitter for TerminalPunctuationSplitter {
    fn split_words(&self, words: &[String]) -> Vec<Range<usize>> {
        split_sentences(words, &self.terminators)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scorer_for_picks_metric() {
        let lev = scorer_for(SimilarityMetric::Levenshtein);
        let lcs = scorer_for(SimilarityMetric::Lcs);
        // "abcd" vs "abxd": one substitution, three shared characters
        assert!((lev.score("abcd", "abxd") - 0.75).abs() < 1e-12);
        assert!((lcs.score("abcd", "abxd") - 0.75).abs() < 1e-12);
        // "ab" vs "abcd": lev 0.5, lcs 2*2/6
        assert!((lev.score("ab", "abcd") - 0.5).abs() < 1e-12);
        assert!((lcs.score("ab", "abcd") - 4.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn splitter_uses_configured_terminators() {
        let splitter = TerminalPunctuationSplitter::new(vec![';']);
        let words: Vec<String> = ["a;", "b.", "c"].iter().map(|w| w.to_string()).collect();
        assert_eq!(splitter.split_words(&words), vec![0..1, 1..3]);
    }
}

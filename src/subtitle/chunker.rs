use crate::config::ChunkConfig;
use crate::types::{AlignedWord, SubtitleCue};

const CLOSING: &[char] = &['"', '\'', '”', '’', '»', ')', ']'];

/// Groups aligned words into cues of at most `max_words` words, closing a cue
/// early after a word that ends with one of `break_after`.
pub fn chunk_words(words: &[AlignedWord], config: &ChunkConfig) -> Vec<SubtitleCue> {
    let max_words = config.max_words.max(1);
    let mut cues = Vec::new();
    let mut current: Vec<&AlignedWord> = Vec::with_capacity(max_words);

    for word in words {
        current.push(word);
        if current.len() >= max_words || ends_clause(&word.word, &config.break_after) {
            cues.push(make_cue(cues.len() + 1, &current));
            current.clear();
        }
    }
    if !current.is_empty() {
        cues.push(make_cue(cues.len() + 1, &current));
    }

    tracing::debug!(
        words = words.len(),
        cues = cues.len(),
        max_words,
        "subtitle: chunked words into cues"
    );
    cues
}

fn ends_clause(word: &str, break_after: &[char]) -> bool {
    word.trim_end_matches(CLOSING)
        .chars()
        .last()
        .is_some_and(|c| break_after.contains(&c))
}

fn make_cue(index: usize, words: &[&AlignedWord]) -> SubtitleCue {
    let start = words.first().map(|w| w.start).unwrap_or(0.0);
    let end = words.last().map(|w| w.end).unwrap_or(start);
    SubtitleCue {
        index,
        start,
        end,
        text: words
            .iter()
            .map(|w| w.word.as_str())
            .collect::<Vec<_>>()
            .join(" "),
    }
}

use std::ops::Range;

/// Characters that may trail a terminator without hiding it, e.g. `nay."`.
const CLOSING_CHARS: [char; 7] = ['"', '\'', '”', '’', '»', ')', ']'];

fn ends_sentence(word: &str, terminators: &[char]) -> bool {
    word.trim_end_matches(|c: char| CLOSING_CHARS.contains(&c) || c.is_whitespace())
        .chars()
        .next_back()
        .is_some_and(|c| terminators.contains(&c))
}

/// Splits a word sequence into sentence index ranges. A sentence ends after
/// any word whose last visible character is a terminator; trailing words
/// without one form the final sentence.
pub fn split_sentences<S: AsRef<str>>(words: &[S], terminators: &[char]) -> Vec<Range<usize>> {
    let mut sentences = Vec::new();
    let mut start = 0usize;
    for (idx, word) in words.iter().enumerate() {
        if ends_sentence(word.as_ref(), terminators) {
            sentences.push(start..idx + 1);
            start = idx + 1;
        }
    }
    if start < words.len() {
        sentences.push(start..words.len());
    }
    sentences
}

/// Splits free text on runs of terminator characters, trimming each piece
/// and dropping empty ones.
pub fn split_text_sentences(text: &str, terminators: &[char]) -> Vec<String> {
    text.split(|c: char| terminators.contains(&c))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

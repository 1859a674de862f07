use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Comparison key for a single word: lowercase, punctuation stripped and,
/// when `fold_diacritics` is set, tone and vowel marks removed.
///
/// Vietnamese `đ` has no canonical decomposition, so it is mapped by hand.
pub fn fold_word(word: &str, fold_diacritics: bool) -> String {
    let lowered = word.to_lowercase();
    if fold_diacritics {
        lowered
            .nfd()
            .filter(|c| !is_combining_mark(*c))
            .map(fold_char)
            .filter(|c| c.is_alphanumeric())
            .collect()
    } else {
        lowered.nfc().filter(|c| c.is_alphanumeric()).collect()
    }
}

fn fold_char(c: char) -> char {
    match c {
        'đ' => 'd',
        _ => c,
    }
}

/// Folds every whitespace-separated word of `text` and joins the non-empty
/// results with single spaces.
pub fn fold_text(text: &str, fold_diacritics: bool) -> String {
    join_folded(
        text.split_whitespace()
            .map(|w| fold_word(w, fold_diacritics))
            .collect::<Vec<_>>()
            .iter(),
    )
}

/// Joins already folded words, skipping words that folded to nothing.
pub(crate) fn join_folded<'a, I>(words: I) -> String
where
    I: IntoIterator<Item = &'a String>,
{
    let mut out = String::new();
    for word in words.into_iter().filter(|w| !w.is_empty()) {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// Character weight used when a time span is shared between words.
pub(crate) fn char_weight(word: &str) -> f64 {
    word.chars().filter(|c| !c.is_whitespace()).count().max(1) as f64
}

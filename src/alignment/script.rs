//! Text-level correction of a recognizer transcript against the script.
//!
//! These helpers keep the recognizer's segmentation and timing and only swap
//! the displayed text for the closest script text.

use serde::Serialize;

use crate::alignment::normalize::fold_text;
use crate::alignment::sentences::split_text_sentences;
use crate::types::ScriptParts;

/// Transcript sentences end on runs of these, independent of the terminators
/// used for word alignment.
const TRANSCRIPT_TERMINATORS: [char; 3] = ['.', '!', '?'];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SentenceCorrection {
    Replaced {
        original: String,
        replacement: String,
        score: f64,
    },
    Kept {
        original: String,
        best_score: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrectedTranscript {
    pub text: String,
    pub sentences: Vec<SentenceCorrection>,
    pub intro_added: bool,
    pub outro_added: bool,
}

/// Shared knobs for both correction helpers.
pub(crate) struct CorrectionParams<'a, F: ?Sized> {
    pub threshold: f64,
    pub fold_diacritics: bool,
    pub score: &'a F,
}

/// Replaces every transcript sentence by its best script sentence when the
/// score reaches the threshold, then makes sure intro and outro are present.
pub(crate) fn correct_transcript<F>(
    transcript: &str,
    script: &ScriptParts,
    params: &CorrectionParams<'_, F>,
) -> CorrectedTranscript
where
    F: Fn(&str, &str) -> f64 + ?Sized,
{
    if script.script.trim().is_empty() {
        return CorrectedTranscript {
            text: transcript.to_string(),
            sentences: Vec::new(),
            intro_added: false,
            outro_added: false,
        };
    }

    let script_sentences: Vec<(String, String)> =
        split_text_sentences(&script.script, &TRANSCRIPT_TERMINATORS)
            .into_iter()
            .map(|s| {
                let folded = fold_text(&s, params.fold_diacritics);
                (s, folded)
            })
            .collect();

    let mut corrected = Vec::new();
    let mut outcomes = Vec::new();
    for sentence in split_text_sentences(transcript, &TRANSCRIPT_TERMINATORS) {
        let folded = fold_text(&sentence, params.fold_diacritics);
        let mut best: Option<(&str, f64)> = None;
        for (original, script_folded) in &script_sentences {
            let s = (params.score)(folded.as_str(), script_folded.as_str());
            if best.map_or(true, |(_, b)| s > b) {
                best = Some((original.as_str(), s));
            }
        }

        match best {
            Some((replacement, score)) if score >= params.threshold => {
                tracing::debug!(
                    score = format!("{score:.2}"),
                    original = sentence.as_str(),
                    replacement,
                    "correction: sentence matched"
                );
                corrected.push(replacement.to_string());
                outcomes.push(SentenceCorrection::Replaced {
                    original: sentence,
                    replacement: replacement.to_string(),
                    score,
                });
            }
            other => {
                let best_score = other.map(|(_, s)| s).unwrap_or(0.0);
                tracing::debug!(
                    best_score = format!("{best_score:.2}"),
                    original = sentence.as_str(),
                    "correction: sentence kept"
                );
                corrected.push(sentence.clone());
                outcomes.push(SentenceCorrection::Kept {
                    original: sentence,
                    best_score,
                });
            }
        }
    }

    let mut text = corrected.join(" ");
    let lowered = text.to_lowercase();
    let intro = script.intro.trim();
    let outro = script.outro.trim();
    let intro_added = !intro.is_empty() && !lowered.contains(&intro.to_lowercase());
    let outro_added = !outro.is_empty() && !lowered.contains(&outro.to_lowercase());
    if intro_added {
        text = format!("{intro} {text}");
    }
    if outro_added {
        text = format!("{text} {outro}");
    }

    CorrectedTranscript {
        text: text.trim().to_string(),
        sentences: outcomes,
        intro_added,
        outro_added,
    }
}

/// Swaps the text of every `(text, start, end)` chunk for the best equally
/// long word window of the script. Timing is untouched.
pub(crate) fn correct_chunks<F>(
    chunks: &[(String, f64, f64)],
    script: &ScriptParts,
    params: &CorrectionParams<'_, F>,
) -> Vec<(String, f64, f64)>
where
    F: Fn(&str, &str) -> f64 + ?Sized,
{
    let script_words: Vec<&str> = script.script.split_whitespace().collect();
    chunks
        .iter()
        .map(|(text, start, end)| {
            let replacement = best_script_window(text, &script_words, params);
            (replacement.unwrap_or_else(|| text.clone()), *start, *end)
        })
        .collect()
}

fn best_script_window<F>(
    chunk_text: &str,
    script_words: &[&str],
    params: &CorrectionParams<'_, F>,
) -> Option<String>
where
    F: Fn(&str, &str) -> f64 + ?Sized,
{
    let chunk_len = chunk_text.split_whitespace().count();
    if chunk_len == 0 || chunk_len > script_words.len() {
        return None;
    }
    let chunk_folded = fold_text(chunk_text, params.fold_diacritics);

    let mut best: Option<(String, f64)> = None;
    for window in script_words.windows(chunk_len) {
        let window_text = window.join(" ");
        let s = (params.score)(
            chunk_folded.as_str(),
            fold_text(&window_text, params.fold_diacritics).as_str(),
        );
        if best.as_ref().map_or(true, |(_, b)| s > *b) {
            best = Some((window_text, s));
        }
    }
    best.filter(|(_, s)| *s >= params.threshold)
        .map(|(text, _)| text)
}

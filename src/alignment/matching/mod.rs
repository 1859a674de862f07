use std::ops::Range;

use crate::alignment::timing::ResolvedTiming;
use crate::types::MatchCandidate;

mod sentence_pass;
#[cfg(test)]
mod tests;
mod window_pass;

pub(crate) use sentence_pass::pair_sentences;
pub(crate) use window_pass::{resolve_windows, WindowInput};

/// Scores closer than this are treated as equal for tie-breaking.
pub(crate) const SCORE_EPS: f64 = 1e-9;

/// Sentence pass followed by the window pass over one unresolved gap.
///
/// Sentence ranges are absolute indices into the full sequences. When one
/// side of the gap has a single sentence (typically recognizer output
/// without punctuation) both sides are compared as one block, since a
/// partial sentence never scores well against a whole one.
pub(crate) fn resolve_gap<F>(
    input: &WindowInput<'_>,
    gt_sentences: &[Range<usize>],
    ref_sentences: &[Range<usize>],
    score: &F,
    slots: &mut [Option<ResolvedTiming>],
) -> Vec<MatchCandidate>
where
    F: Fn(&str, &str) -> f64 + ?Sized,
{
    let (gt_blocks, ref_blocks) = if gt_sentences.len() > 1 && ref_sentences.len() > 1 {
        (gt_sentences.to_vec(), ref_sentences.to_vec())
    } else {
        (as_block(gt_sentences), as_block(ref_sentences))
    };

    let pairs = pair_sentences(
        &gt_blocks,
        &ref_blocks,
        input.gt_folded,
        input.ref_folded,
        input.threshold,
        score,
    );
    for pair in &pairs {
        resolve_windows(input, pair, score, slots);
    }
    pairs
}

fn as_block(sentences: &[Range<usize>]) -> Vec<Range<usize>> {
    match (sentences.first(), sentences.last()) {
        (Some(first), Some(last)) => vec![first.start..last.end],
        _ => Vec::new(),
    }
}

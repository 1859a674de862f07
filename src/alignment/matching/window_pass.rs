use std::ops::Range;

use crate::alignment::normalize::join_folded;
use crate::alignment::timing::{distribute_by_length, ResolvedTiming};
use crate::types::{MatchCandidate, MatchSource, TimedWord};

use super::SCORE_EPS;

/// Read-only view of both word sequences shared by every window search.
pub(crate) struct WindowInput<'a> {
    pub gt_words: &'a [String],
    pub gt_folded: &'a [String],
    pub reference: &'a [TimedWord],
    pub ref_folded: &'a [String],
    pub window_size: usize,
    pub threshold: f64,
}

/// Resolves the ground-truth side of a matched sentence pair window by
/// window. Slots that are already resolved are left untouched.
pub(crate) fn resolve_windows<F>(
    input: &WindowInput<'_>,
    pair: &MatchCandidate,
    score: &F,
    slots: &mut [Option<ResolvedTiming>],
) where
    F: Fn(&str, &str) -> f64 + ?Sized,
{
    let ref_range = pair.reference.clone();
    let ref_len = ref_range.len();
    if ref_len == 0 || input.window_size == 0 {
        return;
    }

    let mut prev_ref_end = ref_range.start;
    let mut chunk_start = pair.ground_truth.start;
    while chunk_start < pair.ground_truth.end {
        let chunk_end = (chunk_start + input.window_size).min(pair.ground_truth.end);
        let chunk = chunk_start..chunk_end;
        chunk_start = chunk_end;

        if slots[chunk.clone()].iter().all(Option::is_some) {
            continue;
        }
        let gt_text = join_folded(&input.gt_folded[chunk.clone()]);
        if gt_text.is_empty() {
            continue;
        }

        let window_len = chunk.len().min(ref_len);
        let Some(best) = best_window(
            input,
            &gt_text,
            chunk.clone(),
            ref_range.start..ref_range.end + 1 - window_len,
            window_len,
            prev_ref_end,
            score,
        ) else {
            continue;
        };

        if best.score < input.threshold {
            tracing::debug!(
                gt_start = chunk.start,
                gt_end = chunk.end,
                score = format!("{:.3}", best.score),
                "alignment: window unresolved"
            );
            continue;
        }

        tracing::debug!(
            gt_start = chunk.start,
            gt_end = chunk.end,
            ref_start = best.reference.start,
            ref_end = best.reference.end,
            score = format!("{:.3}", best.score),
            "alignment: matched window"
        );
        prev_ref_end = best.reference.end;
        assign_window(input, chunk, best.reference, slots);
    }
}

/// Best reference window of `window_len` words starting inside `starts`.
/// Equal scores prefer the start closest to `prev_ref_end`.
fn best_window<F>(
    input: &WindowInput<'_>,
    gt_text: &str,
    chunk: Range<usize>,
    starts: Range<usize>,
    window_len: usize,
    prev_ref_end: usize,
    score: &F,
) -> Option<MatchCandidate>
where
    F: Fn(&str, &str) -> f64 + ?Sized,
{
    let mut best: Option<(usize, f64)> = None;
    for j in starts {
        let ref_text = join_folded(&input.ref_folded[j..j + window_len]);
        let s = score(gt_text, ref_text.as_str());
        let replace = match best {
            None => true,
            Some((best_j, best_score)) => {
                s > best_score + SCORE_EPS
                    || ((s - best_score).abs() <= SCORE_EPS
                        && j.abs_diff(prev_ref_end) < best_j.abs_diff(prev_ref_end))
            }
        };
        if replace {
            best = Some((j, s));
        }
    }
    best.map(|(j, s)| MatchCandidate {
        ground_truth: chunk,
        reference: j..j + window_len,
        score: s,
    })
}

/// Copies timing word for word when both windows have the same length,
/// otherwise spreads the reference span over the ground-truth words.
fn assign_window(
    input: &WindowInput<'_>,
    chunk: Range<usize>,
    reference: Range<usize>,
    slots: &mut [Option<ResolvedTiming>],
) {
    if chunk.len() == reference.len() {
        for (gi, ri) in chunk.zip(reference) {
            if slots[gi].is_none() {
                let word = &input.reference[ri];
                slots[gi] = Some(ResolvedTiming::new(word.start, word.end, MatchSource::Fuzzy));
            }
        }
        return;
    }

    let span_start = input.reference[reference.start].start;
    let span_end = input.reference[reference.end - 1].end;
    let spans = distribute_by_length(&input.gt_words[chunk.clone()], span_start, span_end);
    for (gi, (start, end)) in chunk.zip(spans) {
        if slots[gi].is_none() {
            slots[gi] = Some(ResolvedTiming::new(start, end, MatchSource::Fuzzy));
        }
    }
}

use crate::alignment::normalize::char_weight;
use crate::types::{AlignedWord, AlignmentWarning, MatchSource, TimedWord};

/// Timing decided for one ground-truth word before the monotonic pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ResolvedTiming {
    pub start: f64,
    pub end: f64,
    pub source: MatchSource,
}

impl ResolvedTiming {
    pub fn new(start: f64, end: f64, source: MatchSource) -> Self {
        Self { start, end, source }
    }
}

/// Outer bounds used by fallback runs touching either end of the script.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct TimelineBounds {
    pub lower: f64,
    pub upper: f64,
}

impl TimelineBounds {
    /// `[0, duration]` when a duration is supplied, otherwise the span of the
    /// reference timing.
    pub fn resolve(reference: &[TimedWord], total_duration: Option<f64>) -> Self {
        let duration = total_duration.filter(|d| d.is_finite()).map(|d| d.max(0.0));
        let lower = match duration {
            Some(_) => 0.0,
            None => reference.first().map(|w| w.start).unwrap_or(0.0),
        };
        let upper = match duration {
            Some(d) => d,
            None => reference.iter().map(|w| w.end).fold(lower, f64::max),
        };
        Self {
            lower,
            upper: upper.max(lower),
        }
    }
}

/// Repairs negative, inverted or non-finite reference times. Each repaired
/// entry is reported once.
pub(crate) fn sanitize_reference(
    reference: &[TimedWord],
    warnings: &mut Vec<AlignmentWarning>,
) -> Vec<TimedWord> {
    reference
        .iter()
        .enumerate()
        .map(|(index, word)| {
            let start = if word.start.is_finite() {
                word.start.max(0.0)
            } else {
                0.0
            };
            let end = if word.end.is_finite() {
                word.end.max(start)
            } else {
                start
            };
            if start != word.start || end != word.end {
                tracing::warn!(
                    index,
                    word = word.text.as_str(),
                    start = word.start,
                    end = word.end,
                    "alignment: repaired malformed reference timing"
                );
                warnings.push(AlignmentWarning::MalformedReference { index });
            }
            TimedWord {
                text: word.text.clone(),
                start,
                end,
            }
        })
        .collect()
}

/// Splits `[start, end]` between `words` proportionally to their character
/// length. The first span starts exactly at `start` and the last ends exactly
/// at `end`.
pub(crate) fn distribute_by_length<S: AsRef<str>>(
    words: &[S],
    start: f64,
    end: f64,
) -> Vec<(f64, f64)> {
    if words.is_empty() {
        return Vec::new();
    }
    let end = end.max(start);
    let weights: Vec<f64> = words.iter().map(|w| char_weight(w.as_ref())).collect();
    let total: f64 = weights.iter().sum();
    let span = end - start;

    let mut spans = Vec::with_capacity(words.len());
    let mut cursor = start;
    let mut acc = 0.0;
    for (idx, weight) in weights.iter().enumerate() {
        acc += weight;
        let next = if idx + 1 == weights.len() {
            end
        } else {
            start + span * (acc / total)
        };
        spans.push((cursor, next));
        cursor = next;
    }
    spans
}

/// Gives every unresolved run the gap between its resolved neighbours (or
/// the timeline bounds), shared by character length.
pub(crate) fn fill_unresolved(
    words: &[String],
    slots: &mut [Option<ResolvedTiming>],
    bounds: TimelineBounds,
) {
    let n = slots.len();
    let mut idx = 0usize;
    while idx < n {
        if slots[idx].is_some() {
            idx += 1;
            continue;
        }
        let run_start = idx;
        while idx < n && slots[idx].is_none() {
            idx += 1;
        }
        let run_end = idx;

        let left = match run_start.checked_sub(1).and_then(|i| slots[i]) {
            Some(prev) => prev.end,
            None => bounds.lower,
        };
        let right = match slots.get(run_end).copied().flatten() {
            Some(next) => next.start,
            None => bounds.upper,
        };
        let right = right.max(left);

        tracing::debug!(
            run_start,
            run_end,
            left = format!("{left:.3}"),
            right = format!("{right:.3}"),
            "alignment: interpolating unresolved run"
        );

        for (offset, (start, end)) in distribute_by_length(&words[run_start..run_end], left, right)
            .into_iter()
            .enumerate()
        {
            slots[run_start + offset] =
                Some(ResolvedTiming::new(start, end, MatchSource::Interpolated));
        }
    }
}

/// Produces the final word list. Matched and interpolated words may not start
/// before the previous word ends; direct copies may not start before the
/// previous word starts. `end` never precedes `start`.
pub(crate) fn enforce_monotonic(
    words: &[String],
    slots: &[Option<ResolvedTiming>],
    fallback: ResolvedTiming,
) -> Vec<AlignedWord> {
    let mut out: Vec<AlignedWord> = Vec::with_capacity(words.len());
    for (word, slot) in words.iter().zip(slots) {
        let timing = slot.unwrap_or(fallback);
        let mut start = timing.start;
        if let Some(prev) = out.last() {
            let floor = match timing.source {
                MatchSource::Direct => prev.start,
                MatchSource::Fuzzy | MatchSource::Interpolated => prev.end,
            };
            if start < floor {
                tracing::debug!(
                    word = word.as_str(),
                    start,
                    floor,
                    source = timing.source.as_str(),
                    "alignment: clamped start to keep timeline monotonic"
                );
                start = floor;
            }
        }
        let end = timing.end.max(start);
        out.push(AlignedWord {
            word: word.clone(),
            start,
            end,
            source: timing.source,
        });
    }
    out
}

use std::ops::Range;

use crate::alignment::normalize::join_folded;
use crate::types::MatchCandidate;

use super::SCORE_EPS;

/// Pairs every reference sentence with its best ground-truth sentence.
///
/// A ground-truth sentence that precedes the last accepted one is never a
/// candidate, so accepted pairs follow reading order. Several consecutive
/// reference sentences may land on the same ground-truth sentence. Equal
/// scores keep the candidate closest to the last accepted sentence.
pub(crate) fn pair_sentences<F>(
    gt_sentences: &[Range<usize>],
    ref_sentences: &[Range<usize>],
    gt_folded: &[String],
    ref_folded: &[String],
    threshold: f64,
    score: &F,
) -> Vec<MatchCandidate>
where
    F: Fn(&str, &str) -> f64 + ?Sized,
{
    let gt_texts: Vec<String> = gt_sentences
        .iter()
        .map(|range| join_folded(&gt_folded[range.clone()]))
        .collect();

    let mut pairs = Vec::new();
    let mut first_eligible = 0usize;
    for ref_range in ref_sentences {
        let ref_text = join_folded(&ref_folded[ref_range.clone()]);
        if ref_text.is_empty() {
            continue;
        }

        let mut best: Option<(usize, f64)> = None;
        for (gi, gt_text) in gt_texts.iter().enumerate().skip(first_eligible) {
            let s = score(gt_text.as_str(), ref_text.as_str());
            // Iteration runs away from `first_eligible`, so keeping the
            // earlier of two equal scores is the locality tie-break.
            let replace = match best {
                None => true,
                Some((_, best_score)) => s > best_score + SCORE_EPS,
            };
            if replace {
                best = Some((gi, s));
            }
        }

        match best {
            Some((gi, s)) if s >= threshold => {
                tracing::debug!(
                    ref_start = ref_range.start,
                    ref_end = ref_range.end,
                    gt_sentence = gi,
                    score = format!("{s:.3}"),
                    "alignment: matched sentence"
                );
                pairs.push(MatchCandidate {
                    ground_truth: gt_sentences[gi].clone(),
                    reference: ref_range.clone(),
                    score: s,
                });
                first_eligible = gi;
            }
            Some((gi, s)) => {
                tracing::debug!(
                    ref_start = ref_range.start,
                    ref_end = ref_range.end,
                    best_gt_sentence = gi,
                    score = format!("{s:.3}"),
                    "alignment: reference sentence left unmatched"
                );
            }
            None => {}
        }
    }
    pairs
}

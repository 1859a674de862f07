use super::{pair_sentences, resolve_gap, resolve_windows, WindowInput};
use crate::alignment::normalize::fold_word;
use crate::alignment::sentences::split_sentences;
use crate::alignment::similarity::levenshtein_ratio;
use crate::alignment::timing::ResolvedTiming;
use crate::types::{MatchCandidate, MatchSource, TimedWord};

const THRESHOLD: f64 = 0.6;
const TERMINATORS: [char; 3] = ['.', '!', '?'];

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

fn fold_all(list: &[String]) -> Vec<String> {
    list.iter().map(|w| fold_word(w, true)).collect()
}

/// Reference words spaced 0.5 s apart, each 0.4 s long.
fn timed(list: &[&str]) -> Vec<TimedWord> {
    list.iter()
        .enumerate()
        .map(|(i, w)| TimedWord::new(*w, i as f64 * 0.5, i as f64 * 0.5 + 0.4))
        .collect()
}

fn score(a: &str, b: &str) -> f64 {
    levenshtein_ratio(a, b)
}

#[test]
fn pairs_sentences_in_reading_order() {
    let gt = fold_all(&words(&["Tin", "nóng.", "Trời", "mưa", "to."]));
    let reference = fold_all(&words(&["tinh", "nong.", "troi", "mua", "to."]));
    let pairs = pair_sentences(
        &split_sentences(&gt, &[]),
        &split_sentences(&reference, &[]),
        &gt,
        &reference,
        THRESHOLD,
        &score,
    );
    assert_eq!(pairs.len(), 1);

    let gt_raw = words(&["Tin", "nóng.", "Trời", "mưa", "to."]);
    let ref_raw = words(&["tinh", "nong.", "troi", "mua", "to."]);
    let pairs = pair_sentences(
        &split_sentences(&gt_raw, &TERMINATORS),
        &split_sentences(&ref_raw, &TERMINATORS),
        &gt,
        &reference,
        THRESHOLD,
        &score,
    );
    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs[0].ground_truth, 0..2);
    assert_eq!(pairs[0].reference, 0..2);
    assert_eq!(pairs[1].ground_truth, 2..5);
    assert_eq!(pairs[1].reference, 2..5);
}

#[test]
fn unrelated_reference_sentence_is_left_unmatched() {
    let gt = fold_all(&words(&["giá", "vàng", "tăng."]));
    let reference = fold_all(&words(&["xyz", "qwrt", "plk."]));
    let pairs = pair_sentences(&[0..3], &[0..3], &gt, &reference, THRESHOLD, &score);
    assert!(pairs.is_empty());
}

#[test]
fn sentences_before_last_match_are_not_eligible() {
    let gt = fold_all(&words(&["một", "hai.", "ba", "bốn."]));
    let reference = fold_all(&words(&["ba", "bon.", "mot", "hai."]));
    let pairs = pair_sentences(
        &[0..2, 2..4],
        &[0..2, 2..4],
        &gt,
        &reference,
        THRESHOLD,
        &score,
    );
    // "ba bon" matches the second sentence; "mot hai" may not jump back.
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].ground_truth, 2..4);
}

#[test]
fn equal_length_window_copies_timing_word_for_word() {
    let gt_words = words(&["tin", "nóng", "hôm"]);
    let gt_folded = fold_all(&gt_words);
    let reference = timed(&["tinh", "nong", "hom"]);
    let ref_folded = fold_all(&reference.iter().map(|w| w.text.clone()).collect::<Vec<_>>());
    let input = WindowInput {
        gt_words: &gt_words,
        gt_folded: &gt_folded,
        reference: &reference,
        ref_folded: &ref_folded,
        window_size: 9,
        threshold: THRESHOLD,
    };
    let mut slots = vec![None; 3];
    let pair = MatchCandidate {
        ground_truth: 0..3,
        reference: 0..3,
        score: 1.0,
    };
    resolve_windows(&input, &pair, &score, &mut slots);

    for (slot, word) in slots.iter().zip(&reference) {
        let slot = slot.expect("resolved");
        assert_eq!(slot.start, word.start);
        assert_eq!(slot.end, word.end);
        assert_eq!(slot.source, MatchSource::Fuzzy);
    }
}

#[test]
fn shorter_reference_spreads_span_by_length() {
    let gt_words = words(&["thành", "phố", "hồ", "chí", "minh"]);
    let gt_folded = fold_all(&gt_words);
    let reference = vec![
        TimedWord::new("thanhpho", 1.0, 2.0),
        TimedWord::new("hochiminh", 2.0, 3.0),
    ];
    let ref_folded = fold_all(&reference.iter().map(|w| w.text.clone()).collect::<Vec<_>>());
    let input = WindowInput {
        gt_words: &gt_words,
        gt_folded: &gt_folded,
        reference: &reference,
        ref_folded: &ref_folded,
        window_size: 9,
        threshold: THRESHOLD,
    };
    let mut slots = vec![None; 5];
    let pair = MatchCandidate {
        ground_truth: 0..5,
        reference: 0..2,
        score: 1.0,
    };
    resolve_windows(&input, &pair, &score, &mut slots);

    let resolved: Vec<ResolvedTiming> = slots.into_iter().map(|s| s.expect("resolved")).collect();
    assert_eq!(resolved[0].start, 1.0);
    assert_eq!(resolved[4].end, 3.0);
    for pair in resolved.windows(2) {
        assert!((pair[0].end - pair[1].start).abs() < 1e-12);
    }
}

#[test]
fn window_search_finds_shifted_reference_words() {
    let gt_words = words(&["hôm", "nay"]);
    let gt_folded = fold_all(&gt_words);
    let reference = timed(&["ờ", "hom", "nay", "thì"]);
    let ref_folded = fold_all(&reference.iter().map(|w| w.text.clone()).collect::<Vec<_>>());
    let input = WindowInput {
        gt_words: &gt_words,
        gt_folded: &gt_folded,
        reference: &reference,
        ref_folded: &ref_folded,
        window_size: 9,
        threshold: THRESHOLD,
    };
    let mut slots = vec![None; 2];
    let pair = MatchCandidate {
        ground_truth: 0..2,
        reference: 0..4,
        score: 1.0,
    };
    resolve_windows(&input, &pair, &score, &mut slots);
    assert_eq!(slots[0].expect("resolved").start, reference[1].start);
    assert_eq!(slots[1].expect("resolved").end, reference[2].end);
}

#[test]
fn already_resolved_slots_are_kept() {
    let gt_words = words(&["tin", "nóng"]);
    let gt_folded = fold_all(&gt_words);
    let reference = timed(&["tin", "nong"]);
    let ref_folded = fold_all(&reference.iter().map(|w| w.text.clone()).collect::<Vec<_>>());
    let input = WindowInput {
        gt_words: &gt_words,
        gt_folded: &gt_folded,
        reference: &reference,
        ref_folded: &ref_folded,
        window_size: 9,
        threshold: THRESHOLD,
    };
    let kept = ResolvedTiming::new(7.0, 8.0, MatchSource::Direct);
    let mut slots = vec![Some(kept), None];
    let pair = MatchCandidate {
        ground_truth: 0..2,
        reference: 0..2,
        score: 1.0,
    };
    resolve_windows(&input, &pair, &score, &mut slots);
    assert_eq!(slots[0], Some(kept));
    assert_eq!(slots[1].expect("resolved").start, reference[1].start);
}

#[test]
fn unpunctuated_reference_is_compared_as_one_block() {
    let gt_words = words(&["Giá", "vàng", "tăng.", "Chứng", "khoán", "giảm."]);
    let gt_folded = fold_all(&gt_words);
    let reference = timed(&["gia", "vang", "tang", "chung", "khoan", "giam"]);
    let ref_folded = fold_all(&reference.iter().map(|w| w.text.clone()).collect::<Vec<_>>());
    let input = WindowInput {
        gt_words: &gt_words,
        gt_folded: &gt_folded,
        reference: &reference,
        ref_folded: &ref_folded,
        window_size: 9,
        threshold: THRESHOLD,
    };
    let gt_sentences = split_sentences(&gt_words, &TERMINATORS);
    let ref_texts: Vec<&str> = reference.iter().map(|w| w.text.as_str()).collect();
    let ref_sentences = split_sentences(&ref_texts, &TERMINATORS);
    assert_eq!(gt_sentences.len(), 2);
    assert_eq!(ref_sentences.len(), 1);

    let mut slots = vec![None; 6];
    let pairs = resolve_gap(&input, &gt_sentences, &ref_sentences, &score, &mut slots);
    assert_eq!(pairs.len(), 1);
    assert!(slots.iter().all(Option::is_some));
    assert_eq!(slots[5].expect("resolved").end, reference[5].end);
}

#[test]
fn equal_sentence_scores_prefer_nearest_to_last_match() {
    let gt_raw = words(&[
        "Tin", "nóng.", "Giá", "vàng", "tăng.", "Tin", "nóng.", "Trời", "mưa.", "Tin", "nóng.",
    ]);
    let ref_raw = words(&["giá", "vàng", "tăng.", "tin", "nóng."]);
    let gt_sentences = split_sentences(&gt_raw, &TERMINATORS);
    assert_eq!(gt_sentences, vec![0..2, 2..5, 5..7, 7..9, 9..11]);

    let pairs = pair_sentences(
        &gt_sentences,
        &split_sentences(&ref_raw, &TERMINATORS),
        &fold_all(&gt_raw),
        &fold_all(&ref_raw),
        THRESHOLD,
        &score,
    );
    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs[0].ground_truth, 2..5);
    // "Tin nóng." at 5..7 and 9..11 score the same; the closer one wins.
    assert_eq!(pairs[1].ground_truth, 5..7);
    assert_eq!(pairs[1].reference, 3..5);
}

#[test]
fn equal_window_scores_prefer_nearest_to_previous_window() {
    let gt_words = words(&["tin", "nóng", "tin", "nóng"]);
    let gt_folded = fold_all(&gt_words);
    let reference = timed(&["tin", "nong", "tin", "nong"]);
    let ref_folded = fold_all(&reference.iter().map(|w| w.text.clone()).collect::<Vec<_>>());
    let input = WindowInput {
        gt_words: &gt_words,
        gt_folded: &gt_folded,
        reference: &reference,
        ref_folded: &ref_folded,
        window_size: 2,
        threshold: THRESHOLD,
    };
    let pair = MatchCandidate {
        ground_truth: 0..4,
        reference: 0..4,
        score: 1.0,
    };
    let mut slots = vec![None; 4];
    resolve_windows(&input, &pair, &score, &mut slots);

    let slots: Vec<ResolvedTiming> = slots.into_iter().map(|s| s.expect("resolved")).collect();
    for (slot, reference) in slots.iter().zip(&reference) {
        assert_eq!((slot.start, slot.end), (reference.start, reference.end));
        assert_eq!(slot.source, MatchSource::Fuzzy);
    }
}

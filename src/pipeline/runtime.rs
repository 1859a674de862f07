use std::ops::Range;

use crate::alignment::direct::{direct_keys, direct_runs};
use crate::alignment::matching::{resolve_gap, WindowInput};
use crate::alignment::normalize::fold_word;
use crate::alignment::script::{
    correct_chunks, correct_transcript, CorrectedTranscript, CorrectionParams,
};
use crate::alignment::timing::{
    enforce_monotonic, fill_unresolved, sanitize_reference, ResolvedTiming, TimelineBounds,
};
use crate::config::AlignerConfig;
use crate::error::AlignmentError;
use crate::pipeline::traits::{SentenceSplitter, SimilarityScorer};
use crate::types::{
    AlignmentInput, AlignmentOutput, AlignmentWarning, MatchSource, ScriptParts, TimedWord,
};

/// Aligns a ground-truth script against recognizer word timing.
///
/// Holds configuration and stateless seams only; every call is independent.
pub struct WordAligner {
    config: AlignerConfig,
    scorer: Box<dyn SimilarityScorer>,
    sentence_splitter: Box<dyn SentenceSplitter>,
}

pub(crate) struct WordAlignerParts {
    pub config: AlignerConfig,
    pub scorer: Box<dyn SimilarityScorer>,
    pub sentence_splitter: Box<dyn SentenceSplitter>,
}

impl WordAligner {
    pub(crate) fn from_parts(parts: WordAlignerParts) -> Self {
        Self {
            config: parts.config,
            scorer: parts.scorer,
            sentence_splitter: parts.sentence_splitter,
        }
    }

    pub fn config(&self) -> &AlignerConfig {
        &self.config
    }

    pub fn align(&self, input: &AlignmentInput) -> Result<AlignmentOutput, AlignmentError> {
        let ground_truth = &input.ground_truth;
        if ground_truth.is_empty() {
            return Err(AlignmentError::EmptyScript);
        }

        let mut warnings = Vec::new();
        let reference = sanitize_reference(&input.reference, &mut warnings);
        let bounds = TimelineBounds::resolve(&reference, input.total_duration);
        let mut slots: Vec<Option<ResolvedTiming>> = vec![None; ground_truth.len()];

        if reference.is_empty() {
            tracing::warn!(
                word_count = ground_truth.len(),
                total_duration = input.total_duration,
                "alignment: no reference timing, spreading script over the total duration"
            );
            warnings.push(AlignmentWarning::NoReferenceTiming);
            if input.total_duration.is_none() {
                warnings.push(AlignmentWarning::MissingDuration);
            }
        } else {
            self.resolve_from_reference(ground_truth, &reference, &mut slots);
        }

        fill_unresolved(ground_truth, &mut slots, bounds);
        let words = enforce_monotonic(
            ground_truth,
            &slots,
            ResolvedTiming::new(bounds.lower, bounds.lower, MatchSource::Interpolated),
        );

        tracing::debug!(
            word_count = words.len(),
            direct = words.iter().filter(|w| w.source == MatchSource::Direct).count(),
            fuzzy = words.iter().filter(|w| w.source == MatchSource::Fuzzy).count(),
            interpolated = words
                .iter()
                .filter(|w| w.source == MatchSource::Interpolated)
                .count(),
            "alignment: finished"
        );

        Ok(AlignmentOutput { words, warnings })
    }

    fn resolve_from_reference(
        &self,
        ground_truth: &[String],
        reference: &[TimedWord],
        slots: &mut [Option<ResolvedTiming>],
    ) {
        let fold = |w: &str| fold_word(w, self.config.fold_diacritics);
        let gt_folded: Vec<String> = ground_truth.iter().map(|w| fold(w.as_str())).collect();
        let ref_texts: Vec<String> = reference.iter().map(|w| w.text.clone()).collect();
        let ref_folded: Vec<String> = ref_texts.iter().map(|w| fold(w.as_str())).collect();

        let (leading, trailing) = direct_runs(
            &direct_keys(ground_truth, &gt_folded),
            &direct_keys(&ref_texts, &ref_folded),
        );
        let gt_tail = ground_truth.len() - trailing;
        let ref_tail = reference.len() - trailing;
        for (gi, ri) in (0..leading).chain(gt_tail..ground_truth.len()).zip(
            (0..leading).chain(ref_tail..reference.len()),
        ) {
            let word = &reference[ri];
            slots[gi] = Some(ResolvedTiming::new(word.start, word.end, MatchSource::Direct));
        }
        tracing::debug!(leading, trailing, "alignment: direct positional runs");

        let gt_gap = leading..gt_tail;
        let ref_gap = leading..ref_tail;
        if gt_gap.is_empty() || ref_gap.is_empty() {
            return;
        }

        let gt_sentences = offset_ranges(
            self.sentence_splitter.split_words(&ground_truth[gt_gap.clone()]),
            gt_gap.start,
        );
        let ref_sentences = offset_ranges(
            self.sentence_splitter.split_words(&ref_texts[ref_gap.clone()]),
            ref_gap.start,
        );

        let window_input = WindowInput {
            gt_words: ground_truth,
            gt_folded: &gt_folded,
            reference,
            ref_folded: &ref_folded,
            window_size: self.config.window_size,
            threshold: self.config.match_threshold,
        };
        let score = |a: &str, b: &str| self.scorer.score(a, b);
        let pairs = resolve_gap(&window_input, &gt_sentences, &ref_sentences, &score, slots);
        tracing::debug!(
            gt_sentences = gt_sentences.len(),
            ref_sentences = ref_sentences.len(),
            matched_pairs = pairs.len(),
            "alignment: sentence pass"
        );
    }

    /// Sentence-level text correction of a recognizer transcript.
    pub fn correct_transcript(
        &self,
        transcript: &str,
        script: &ScriptParts,
    ) -> CorrectedTranscript {
        let score = |a: &str, b: &str| self.scorer.score(a, b);
        correct_transcript(transcript, script, &self.correction_params(&score))
    }

    /// Replaces the text of timed caption chunks with the closest script words.
    pub fn correct_chunks(
        &self,
        chunks: &[(String, f64, f64)],
        script: &ScriptParts,
    ) -> Vec<(String, f64, f64)> {
        let score = |a: &str, b: &str| self.scorer.score(a, b);
        correct_chunks(chunks, script, &self.correction_params(&score))
    }

    fn correction_params<'a, F>(&self, score: &'a F) -> CorrectionParams<'a, F>
    where
        F: Fn(&str, &str) -> f64,
    {
        CorrectionParams {
            threshold: self.config.match_threshold,
            fold_diacritics: self.config.fold_diacritics,
            score,
        }
    }
}

fn offset_ranges(ranges: Vec<Range<usize>>, offset: usize) -> Vec<Range<usize>> {
    ranges
        .into_iter()
        .map(|r| r.start + offset..r.end + offset)
        .collect()
}

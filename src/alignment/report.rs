use serde::Serialize;

use crate::types::{AlignedWord, AlignmentOutput, AlignmentWarning, MatchSource};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignmentReport {
    pub word_count: usize,
    pub direct_count: usize,
    pub fuzzy_count: usize,
    pub interpolated_count: usize,
    /// Share of words timed from the reference, direct or fuzzy.
    pub coverage: f64,
    pub span_start: f64,
    pub span_end: f64,
    pub warnings: Vec<AlignmentWarning>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_word: Option<Vec<PerWordTrace>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerWordTrace {
    pub index: usize,
    pub word: String,
    pub start: f64,
    pub end: f64,
    pub source: MatchSource,
}

impl AlignmentReport {
    pub fn from_output(output: &AlignmentOutput) -> Self {
        let count = |source: MatchSource| {
            output
                .words
                .iter()
                .filter(|w| w.source == source)
                .count()
        };
        let word_count = output.words.len();
        let direct_count = count(MatchSource::Direct);
        let fuzzy_count = count(MatchSource::Fuzzy);
        let interpolated_count = count(MatchSource::Interpolated);
        let coverage = if word_count == 0 {
            0.0
        } else {
            (direct_count + fuzzy_count) as f64 / word_count as f64
        };

        Self {
            word_count,
            direct_count,
            fuzzy_count,
            interpolated_count,
            coverage,
            span_start: output.words.first().map(|w| w.start).unwrap_or(0.0),
            span_end: output.words.iter().map(|w| w.end).fold(0.0, f64::max),
            warnings: output.warnings.clone(),
            per_word: None,
        }
    }

    pub fn with_per_word(mut self, words: &[AlignedWord]) -> Self {
        self.per_word = Some(
            words
                .iter()
                .enumerate()
                .map(|(index, w)| PerWordTrace {
                    index,
                    word: w.word.clone(),
                    start: w.start,
                    end: w.end,
                    source: w.source,
                })
                .collect(),
        );
        self
    }

    /// True when no word was timed from speech at all.
    pub fn is_degraded(&self) -> bool {
        self.word_count > 0 && self.interpolated_count == self.word_count
    }
}

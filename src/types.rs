use std::ops::Range;

use serde::{Deserialize, Serialize};

/// One word of speech-recognition output. Times are seconds relative to the
/// start of the audio file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedWord {
    pub text: String,
    pub start: f64,
    pub end: f64,
}

impl TimedWord {
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }
}

/// How an aligned word obtained its timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchSource {
    /// Positional equality with the reference word.
    Direct,
    /// Window similarity above the match threshold.
    Fuzzy,
    /// Proportional fallback timing.
    Interpolated,
}

impl MatchSource {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchSource::Direct => "direct",
            MatchSource::Fuzzy => "fuzzy",
            MatchSource::Interpolated => "interpolated",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedWord {
    pub word: String,
    /// Seconds, `start <= end`.
    pub start: f64,
    pub end: f64,
    pub source: MatchSource,
}

/// Scored pairing of a ground-truth span with a reference span.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchCandidate {
    pub ground_truth: Range<usize>,
    pub reference: Range<usize>,
    /// Similarity in [0, 1].
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AlignmentWarning {
    /// Reference timing was empty; every word was interpolated over the
    /// supplied duration and is uncorrelated with actual speech.
    NoReferenceTiming,
    /// Reference timing was empty and no duration was supplied either.
    MissingDuration,
    /// A reference entry had negative or inverted times and was repaired.
    MalformedReference { index: usize },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlignmentInput {
    pub ground_truth: Vec<String>,
    pub reference: Vec<TimedWord>,
    /// Total audio duration in seconds.
    #[serde(default)]
    pub total_duration: Option<f64>,
}

impl AlignmentInput {
    /// Builds an input from raw script text, splitting on whitespace.
    pub fn from_script(
        script: &str,
        reference: Vec<TimedWord>,
        total_duration: Option<f64>,
    ) -> Self {
        Self {
            ground_truth: script.split_whitespace().map(str::to_string).collect(),
            reference,
            total_duration,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentOutput {
    pub words: Vec<AlignedWord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<AlignmentWarning>,
}

/// Structured script as produced by the summarization stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptParts {
    #[serde(default)]
    pub intro: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub outro: String,
    /// Full corrected script, normally intro + body + outro.
    #[serde(default)]
    pub script: String,
}

impl ScriptParts {
    pub fn from_script(script: impl Into<String>) -> Self {
        Self {
            script: script.into(),
            ..Self::default()
        }
    }
}

/// One subtitle entry. `index` is 1-based as in SubRip files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtitleCue {
    pub index: usize,
    pub start: f64,
    pub end: f64,
    pub text: String,
}

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AlignmentError;

/// Similarity metric used for sentence and window scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityMetric {
    /// `1 - levenshtein / max(len_a, len_b)`.
    #[default]
    Levenshtein,
    /// `2 * lcs / (len_a + len_b)`.
    Lcs,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignerConfig {
    #[serde(default = "default_match_threshold")]
    pub match_threshold: f64,
    #[serde(default = "default_window_size")]
    pub window_size: usize,
    #[serde(default = "default_sentence_terminators")]
    pub sentence_terminators: Vec<char>,
    #[serde(default = "default_fold_diacritics")]
    pub fold_diacritics: bool,
    #[serde(default)]
    pub metric: SimilarityMetric,
}

impl AlignerConfig {
    pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.60;
    pub const DEFAULT_WINDOW_SIZE: usize = 9;

    pub fn load(path: &Path) -> Result<Self, AlignmentError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| AlignmentError::io("read aligner config", e))?;
        let config: Self = serde_json::from_str(&data)
            .map_err(|e| AlignmentError::json("parse aligner config", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AlignmentError> {
        if !(0.0..=1.0).contains(&self.match_threshold) {
            return Err(AlignmentError::invalid_config(format!(
                "match_threshold must be within [0, 1], got {}",
                self.match_threshold
            )));
        }
        if self.window_size == 0 {
            return Err(AlignmentError::invalid_config(
                "window_size must be at least 1",
            ));
        }
        Ok(())
    }
}

impl Default for AlignerConfig {
    fn default() -> Self {
        Self {
            match_threshold: Self::DEFAULT_MATCH_THRESHOLD,
            window_size: Self::DEFAULT_WINDOW_SIZE,
            sentence_terminators: default_sentence_terminators(),
            fold_diacritics: true,
            metric: SimilarityMetric::default(),
        }
    }
}

fn default_match_threshold() -> f64 {
    AlignerConfig::DEFAULT_MATCH_THRESHOLD
}
fn default_window_size() -> usize {
    AlignerConfig::DEFAULT_WINDOW_SIZE
}
fn default_sentence_terminators() -> Vec<char> {
    vec!['.', '!', '?', '…', ';', '。', '！', '？']
}
fn default_fold_diacritics() -> bool {
    true
}

/// Caption grouping settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkConfig {
    pub max_words: usize,
    /// A cue is closed after a word ending with one of these characters.
    pub break_after: Vec<char>,
}

impl ChunkConfig {
    pub const CHUNK_WORDS: usize = 9;
    pub const KARAOKE_WORDS: usize = 4;

    /// Rapid phrase captions for word-by-word display.
    pub fn karaoke() -> Self {
        Self {
            max_words: Self::KARAOKE_WORDS,
            ..Self::default()
        }
    }
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            max_words: Self::CHUNK_WORDS,
            break_after: vec!['.', '!', '?', ':'],
        }
    }
}

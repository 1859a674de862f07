use std::path::Path;

use crate::config::AlignerConfig;
use crate::error::AlignmentError;
use crate::pipeline::defaults::{scorer_for, TerminalPunctuationSplitter};
use crate::pipeline::runtime::{WordAligner, WordAlignerParts};
use crate::pipeline::traits::{SentenceSplitter, SimilarityScorer};

pub struct WordAlignerBuilder {
    config: AlignerConfig,
    scorer: Option<Box<dyn SimilarityScorer>>,
    sentence_splitter: Option<Box<dyn SentenceSplitter>>,
}

impl WordAlignerBuilder {
    pub fn new(config: AlignerConfig) -> Self {
        Self {
            config,
            scorer: None,
            sentence_splitter: None,
        }
    }

    /// Starts from a JSON config file; missing fields take their defaults.
    pub fn from_config_file(path: &Path) -> Result<Self, AlignmentError> {
        Ok(Self::new(AlignerConfig::load(path)?))
    }

    pub fn with_scorer(mut self, scorer: Box<dyn SimilarityScorer>) -> Self {
        self.scorer = Some(scorer);
        self
    }

    pub fn with_sentence_splitter(mut self, sentence_splitter: Box<dyn SentenceSplitter>) -> Self {
        self.sentence_splitter = Some(sentence_splitter);
        self
    }

    pub fn build(self) -> Result<WordAligner, AlignmentError> {
        self.config.validate()?;

        let scorer = self
            .scorer
            .unwrap_or_else(|| scorer_for(self.config.metric));
        let sentence_splitter = self.sentence_splitter.unwrap_or_else(|| {
            Box::new(TerminalPunctuationSplitter::new(
                self.config.sentence_terminators.clone(),
            ))
        });

        Ok(WordAligner::from_parts(WordAlignerParts {
            config: self.config,
            scorer,
            sentence_splitter,
        }))
    }
}

impl Default for WordAlignerBuilder {
    fn default() -> Self {
        Self::new(AlignerConfig::default())
    }
}

pub mod alignment;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod subtitle;
pub mod types;

pub use alignment::report::AlignmentReport;
pub use alignment::script::{CorrectedTranscript, SentenceCorrection};
pub use config::{AlignerConfig, ChunkConfig, SimilarityMetric};
pub use error::AlignmentError;
pub use pipeline::builder::WordAlignerBuilder;
pub use pipeline::runtime::WordAligner;
pub use pipeline::traits::{SentenceSplitter, SimilarityScorer};
pub use types::{
    AlignedWord, AlignmentInput, AlignmentOutput, AlignmentWarning, MatchSource, ScriptParts,
    SubtitleCue, TimedWord,
};

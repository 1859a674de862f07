//! Caption cues built from aligned words.

mod chunker;
mod format;

pub use chunker::chunk_words;
pub use format::{to_srt, to_vtt, write_srt};

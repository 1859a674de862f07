use std::path::{Path, PathBuf};

use script_aligner::subtitle::{chunk_words, write_srt};
use script_aligner::{AlignedWord, ChunkConfig};

/// Writes `<dir>/<case_id>.srt` and returns its path.
pub fn write_case_subtitles(
    dir: &Path,
    case_id: &str,
    words: &[AlignedWord],
    config: &ChunkConfig,
) -> Result<PathBuf, String> {
    let path = dir.join(format!("{}.srt", sanitize_file_stem(case_id)));
    let cues = chunk_words(words, config);
    write_srt(&path, &cues)
        .map_err(|err| format!("Failed to write subtitles '{}': {err}", path.display()))?;
    Ok(path)
}

fn sanitize_file_stem(id: &str) -> String {
    id.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

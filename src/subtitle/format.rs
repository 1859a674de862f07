use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::error::AlignmentError;
use crate::types::SubtitleCue;

/// SubRip text for `cues`, numbered by their own `index`.
pub fn to_srt(cues: &[SubtitleCue]) -> String {
    let mut srt = String::new();
    for cue in cues {
        let _ = writeln!(srt, "{}", cue.index);
        let _ = writeln!(
            srt,
            "{} --> {}",
            format_timestamp(cue.start, ','),
            format_timestamp(cue.end, ',')
        );
        srt.push_str(cue.text.trim());
        srt.push_str("\n\n");
    }
    srt
}

pub fn to_vtt(cues: &[SubtitleCue]) -> String {
    let mut vtt = String::from("WEBVTT\n\n");
    for cue in cues {
        let _ = writeln!(
            vtt,
            "{} --> {}",
            format_timestamp(cue.start, '.'),
            format_timestamp(cue.end, '.')
        );
        vtt.push_str(cue.text.trim());
        vtt.push_str("\n\n");
    }
    vtt
}

/// Writes `cues` as UTF-8 SubRip, creating parent directories as needed.
pub fn write_srt(path: &Path, cues: &[SubtitleCue]) -> Result<(), AlignmentError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| AlignmentError::io("creating subtitle directory", e))?;
    }
    fs::write(path, to_srt(cues)).map_err(|e| AlignmentError::io("writing subtitle file", e))?;
    tracing::info!(path = %path.display(), cues = cues.len(), "subtitle: wrote srt");
    Ok(())
}

fn format_timestamp(seconds: f64, millis_sep: char) -> String {
    let total_ms = if seconds.is_finite() {
        (seconds.max(0.0) * 1000.0).round() as u64
    } else {
        0
    };
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let secs = (total_ms % 60_000) / 1000;
    let millis = total_ms % 1000;
    format!("{hours:02}:{minutes:02}:{secs:02}{millis_sep}{millis:03}")
}

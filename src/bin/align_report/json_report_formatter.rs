use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use script_aligner::{AlignerConfig, AlignmentReport};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Report {
    pub schema_version: u32,
    pub meta: Meta,
    pub cases: Vec<CaseReport>,
    pub aggregates: Aggregates,
}

#[derive(Debug, Serialize)]
pub struct Meta {
    pub generated_at: String,
    pub config: AlignerConfig,
    pub case_count: usize,
}

#[derive(Debug, Serialize)]
pub struct CaseReport {
    pub id: String,
    pub report: AlignmentReport,
}

#[derive(Debug, Serialize)]
pub struct Aggregates {
    pub total_words: usize,
    pub direct_words: usize,
    pub fuzzy_words: usize,
    pub interpolated_words: usize,
    /// Matched share over all words of all cases.
    pub coverage: f64,
    pub degraded_cases: Vec<String>,
}

impl Report {
    pub fn new(generated_at: String, config: AlignerConfig, cases: Vec<CaseReport>) -> Self {
        let aggregates = aggregate(&cases);
        Self {
            schema_version: 1,
            meta: Meta {
                generated_at,
                config,
                case_count: cases.len(),
            },
            cases,
            aggregates,
        }
    }
}

fn aggregate(cases: &[CaseReport]) -> Aggregates {
    let total_words: usize = cases.iter().map(|c| c.report.word_count).sum();
    let direct_words: usize = cases.iter().map(|c| c.report.direct_count).sum();
    let fuzzy_words: usize = cases.iter().map(|c| c.report.fuzzy_count).sum();
    let interpolated_words: usize = cases.iter().map(|c| c.report.interpolated_count).sum();
    let coverage = if total_words == 0 {
        0.0
    } else {
        (direct_words + fuzzy_words) as f64 / total_words as f64
    };
    Aggregates {
        total_words,
        direct_words,
        fuzzy_words,
        interpolated_words,
        coverage,
        degraded_cases: cases
            .iter()
            .filter(|c| c.report.is_degraded())
            .map(|c| c.id.clone())
            .collect(),
    }
}

pub fn write_report(path: &Path, report: &Report) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| {
            format!(
                "Failed to create report output directory '{}': {err}",
                parent.display()
            )
        })?;
    }

    let mut file = File::create(path)
        .map_err(|err| format!("Failed to create report file '{}': {err}", path.display()))?;
    serde_json::to_writer_pretty(&mut file, report).map_err(|err| {
        format!(
            "Failed to serialize report JSON '{}': {err}",
            path.display()
        )
    })?;
    file.write_all(b"\n")
        .map_err(|err| format!("Failed to finalize report file '{}': {err}", path.display()))?;
    Ok(())
}

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Utc;
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use script_aligner::{
    AlignerConfig, AlignmentInput, AlignmentReport, ChunkConfig, TimedWord, WordAligner,
    WordAlignerBuilder,
};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

#[path = "align_report/json_report_formatter.rs"]
mod json_report_formatter;
#[path = "align_report/srt_formatter.rs"]
mod srt_formatter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    /// One SubRip file per case, captions built from the aligned words.
    Srt,
}

#[derive(Debug, Parser)]
#[command(name = "align_report")]
#[command(about = "Align script cases against recognizer timing and report match quality")]
struct Args {
    #[arg(
        long,
        env = "SCRIPT_ALIGNER_CASES_DIR",
        default_value = "test-data/alignments"
    )]
    cases_dir: PathBuf,
    #[arg(long, env = "SCRIPT_ALIGNER_CONFIG")]
    config: Option<PathBuf>,
    #[arg(long, env = "SCRIPT_ALIGNER_OUT")]
    out: Option<PathBuf>,
    #[arg(
        long,
        env = "SCRIPT_ALIGNER_FORMAT",
        value_enum,
        default_value_t = OutputFormat::Json
    )]
    output_format: OutputFormat,
    #[arg(long, env = "SCRIPT_ALIGNER_LIMIT")]
    limit: Option<usize>,
    #[arg(long, env = "SCRIPT_ALIGNER_OFFSET", default_value_t = 0)]
    offset: usize,
    /// Four-word captions instead of nine-word chunks (srt output only).
    #[arg(long, env = "SCRIPT_ALIGNER_KARAOKE", default_value_t = false)]
    karaoke: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct Case {
    id: String,
    script: String,
    #[serde(default)]
    reference: Vec<TimedWord>,
    #[serde(default)]
    total_duration: Option<f64>,
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(message) = run() {
        eprintln!("{message}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = Args::parse();
    let repo_root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let cases_dir = resolve_path(&repo_root, &args.cases_dir);
    let run_id = Utc::now().format("%Y%m%dT%H%M%SZ").to_string();

    let aligner = build_aligner(args.config.as_deref(), &repo_root)?;
    let cases: Vec<Case> = load_cases(&cases_dir)?
        .into_iter()
        .skip(args.offset)
        .take(args.limit.unwrap_or(usize::MAX))
        .collect();
    if cases.is_empty() {
        return Err(format!(
            "No alignment cases selected from '{}' (offset {}, limit {:?}).",
            cases_dir.display(),
            args.offset,
            args.limit
        ));
    }

    let chunk_config = if args.karaoke {
        ChunkConfig::karaoke()
    } else {
        ChunkConfig::default()
    };
    let srt_dir = match args.output_format {
        OutputFormat::Srt => Some(match args.out.as_ref() {
            Some(path) => resolve_path(&repo_root, path),
            None => repo_root
                .join("target")
                .join("alignment_reports")
                .join(format!("srt-{run_id}")),
        }),
        OutputFormat::Json => None,
    };

    let progress = ProgressBar::new(cases.len() as u64);
    progress.set_style(
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta}) {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=>-"),
    );
    progress.set_message("starting...");

    let started = Instant::now();
    let mut case_reports = Vec::with_capacity(cases.len());
    let mut written_srt = 0usize;
    for case in &cases {
        progress.set_message(case.id.clone());
        let input = AlignmentInput::from_script(
            &case.script,
            case.reference.clone(),
            case.total_duration,
        );
        let output = aligner
            .align(&input)
            .map_err(|err| format!("{}: align() failed: {err}", case.id))?;

        if let Some(dir) = srt_dir.as_ref() {
            srt_formatter::write_case_subtitles(dir, &case.id, &output.words, &chunk_config)?;
            written_srt += 1;
        }

        let report = AlignmentReport::from_output(&output);
        if report.is_degraded() {
            tracing::warn!(
                case = case.id.as_str(),
                coverage = report.coverage,
                warnings = report.warnings.len(),
                "degraded alignment"
            );
        }
        case_reports.push(json_report_formatter::CaseReport {
            id: case.id.clone(),
            report: report.with_per_word(&output.words),
        });
        progress.inc(1);
    }
    progress.finish_with_message("done");

    let elapsed = started.elapsed();
    println!(
        "aligned {} case(s) in {:.2}ms",
        case_reports.len(),
        elapsed.as_secs_f64() * 1000.0
    );

    match args.output_format {
        OutputFormat::Json => {
            let out_path = match args.out.as_ref() {
                Some(path) => resolve_path(&repo_root, path),
                None => repo_root
                    .join("target")
                    .join("alignment_reports")
                    .join(format!("alignment-report-{run_id}.json")),
            };
            let report = json_report_formatter::Report::new(
                Utc::now().to_rfc3339(),
                aligner.config().clone(),
                case_reports,
            );
            json_report_formatter::write_report(&out_path, &report)?;
            println!("{}", out_path.display());
        }
        OutputFormat::Srt => {
            if let Some(dir) = srt_dir {
                println!("Wrote {written_srt} SubRip file(s) to {}", dir.display());
            }
        }
    }
    Ok(())
}

fn build_aligner(config_path: Option<&Path>, repo_root: &Path) -> Result<WordAligner, String> {
    let builder = match config_path {
        Some(path) => {
            let path = resolve_path(repo_root, path);
            WordAlignerBuilder::from_config_file(&path).map_err(|err| {
                format!("Failed to load aligner config '{}': {err}", path.display())
            })?
        }
        None => WordAlignerBuilder::new(AlignerConfig::default()),
    };
    builder
        .build()
        .map_err(|err| format!("Failed to build WordAligner: {err}"))
}

fn load_cases(cases_dir: &Path) -> Result<Vec<Case>, String> {
    require_path_exists(cases_dir, "Missing alignment cases directory.")?;
    let entries = fs::read_dir(cases_dir)
        .map_err(|err| format!("Failed to read '{}': {err}", cases_dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|err| format!("Failed to read entry in '{}': {err}", cases_dir.display()))?
            .path();
        if path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();

    files
        .iter()
        .map(|path| {
            let raw = fs::read_to_string(path)
                .map_err(|err| format!("Failed to read case '{}': {err}", path.display()))?;
            serde_json::from_str::<Case>(&raw)
                .map_err(|err| format!("Failed to parse case '{}': {err}", path.display()))
        })
        .collect()
}

fn resolve_path(repo_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        repo_root.join(path)
    }
}

fn require_path_exists(path: &Path, message: &str) -> Result<(), String> {
    if path.exists() {
        return Ok(());
    }
    Err(format!("{message} Missing path: {}", path.display()))
}

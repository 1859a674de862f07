use std::env;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use libtest_mimic::{Arguments, Failed, Trial};
use script_aligner::{
    AlignedWord, AlignmentInput, AlignmentReport, AlignmentWarning, TimedWord, WordAligner,
    WordAlignerBuilder,
};
use serde::Deserialize;

const DEFAULT_DELTA_MS: f64 = 1.0;
const SUITE_NAME: &str = "script_alignment_matches_reference_within_delta";

#[derive(Debug, Deserialize)]
struct AlignmentCase {
    id: String,
    script: String,
    reference: Vec<TimedWord>,
    #[serde(default)]
    total_duration: Option<f64>,
    #[serde(default)]
    expected: Option<Vec<ExpectedWord>>,
    #[serde(default)]
    min_coverage: f64,
}

#[derive(Debug, Deserialize)]
struct ExpectedWord {
    word: String,
    start: f64,
    end: f64,
}

fn main() {
    let args = Arguments::from_args();
    let repo_root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let delta_ms = env_f64("SCRIPT_ALIGNER_IT_DELTA_MS", DEFAULT_DELTA_MS);

    let cases = match load_cases(&repo_root.join("test-data").join("alignments")) {
        Ok(cases) => cases,
        Err(err) => {
            run_setup_failure(&args, err);
            return;
        }
    };
    if cases.is_empty() {
        run_setup_failure(
            &args,
            "No alignment cases found under test-data/alignments.".to_string(),
        );
        return;
    }

    let tests = cases
        .into_iter()
        .map(|case| {
            let test_name = format!("{SUITE_NAME}::case::{}", case.id);
            Trial::test(test_name, move || run_case(&case, delta_ms).map_err(Failed::from))
        })
        .collect();

    libtest_mimic::run(&args, tests).exit();
}

fn run_setup_failure(args: &Arguments, message: String) {
    let test = Trial::test(format!("{SUITE_NAME}::setup"), move || {
        Err(Failed::from(message))
    });
    libtest_mimic::run(args, vec![test]).exit();
}

fn run_case(case: &AlignmentCase, delta_ms: f64) -> Result<(), String> {
    let aligner = build_aligner()?;
    let input = AlignmentInput::from_script(
        &case.script,
        case.reference.clone(),
        case.total_duration,
    );
    let output = aligner
        .align(&input)
        .map_err(|err| format!("{}: align() failed: {err}", case.id))?;

    check_invariants(case, &input, &output.words)?;

    let warned = output.warnings.contains(&AlignmentWarning::NoReferenceTiming);
    if case.reference.is_empty() && !warned {
        return Err(format!("{}: missing NoReferenceTiming warning", case.id));
    }

    let report = AlignmentReport::from_output(&output);
    if report.coverage + 1e-9 < case.min_coverage {
        return Err(format!(
            "{}: coverage {:.3} below {:.3} (direct={}, fuzzy={}, interpolated={})",
            case.id,
            report.coverage,
            case.min_coverage,
            report.direct_count,
            report.fuzzy_count,
            report.interpolated_count
        ));
    }

    let rerun = aligner
        .align(&input)
        .map_err(|err| format!("{}: second align() failed: {err}", case.id))?;
    if rerun != output {
        return Err(format!("{}: alignment is not deterministic", case.id));
    }

    match &case.expected {
        Some(expected) => compare_alignment(case, expected, &output.words, delta_ms),
        None => Ok(()),
    }
}

fn check_invariants(
    case: &AlignmentCase,
    input: &AlignmentInput,
    words: &[AlignedWord],
) -> Result<(), String> {
    if words.len() != input.ground_truth.len() {
        return Err(format!(
            "{}: word count mismatch (script {}, got {})",
            case.id,
            input.ground_truth.len(),
            words.len()
        ));
    }
    for (idx, (word, script_word)) in words.iter().zip(&input.ground_truth).enumerate() {
        if &word.word != script_word {
            return Err(format!(
                "{}: word mismatch at index {idx} (script '{script_word}', got '{}')",
                case.id, word.word
            ));
        }
        if !(word.start <= word.end) {
            return Err(format!("{}: inverted span at index {idx}: {word:?}", case.id));
        }
        if let Some(duration) = case.total_duration {
            if word.start < 0.0 || word.end > duration + 1e-9 {
                return Err(format!(
                    "{}: word {idx} outside [0, {duration}]: {word:?}",
                    case.id
                ));
            }
        }
    }
    for (idx, pair) in words.windows(2).enumerate() {
        if pair[1].start < pair[0].start {
            return Err(format!(
                "{}: start went backwards at index {}: {:?} -> {:?}",
                case.id,
                idx + 1,
                pair[0],
                pair[1]
            ));
        }
    }
    Ok(())
}

fn compare_alignment(
    case: &AlignmentCase,
    expected: &[ExpectedWord],
    observed: &[AlignedWord],
    delta_ms: f64,
) -> Result<(), String> {
    if expected.len() != observed.len() {
        return Err(format!(
            "{}: expected {} words, got {}",
            case.id,
            expected.len(),
            observed.len()
        ));
    }
    for (idx, (expected, observed)) in expected.iter().zip(observed).enumerate() {
        if expected.word != observed.word {
            return Err(format!(
                "{}: word mismatch at index {idx} (expected '{}', got '{}')",
                case.id, expected.word, observed.word
            ));
        }
        let start_diff = (observed.start - expected.start).abs() * 1000.0;
        let end_diff = (observed.end - expected.end).abs() * 1000.0;
        if start_diff > delta_ms || end_diff > delta_ms {
            return Err(format!(
                "{}: #{idx} '{}' off by {start_diff:.2}ms/{end_diff:.2}ms (delta {delta_ms:.2}ms)",
                case.id, expected.word
            ));
        }
    }
    Ok(())
}

fn build_aligner() -> Result<WordAligner, String> {
    let builder = match env::var("SCRIPT_ALIGNER_IT_CONFIG") {
        Ok(path) => WordAlignerBuilder::from_config_file(Path::new(&path))
            .map_err(|err| format!("Failed to load aligner config '{path}': {err}"))?,
        Err(_) => WordAlignerBuilder::default(),
    };
    builder
        .build()
        .map_err(|err| format!("Failed to build WordAligner: {err}"))
}

fn load_cases(dir: &Path) -> Result<Vec<AlignmentCase>, String> {
    require_path_exists(dir, "Missing alignment fixture directory.")?;
    let mut paths = Vec::new();
    for entry in
        fs::read_dir(dir).map_err(|err| format!("Failed to read '{}': {err}", dir.display()))?
    {
        let path = entry
            .map_err(|err| format!("Failed to read entry in '{}': {err}", dir.display()))?
            .path();
        if path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort();
    paths.iter().map(|path| load_case(path)).collect()
}

fn load_case(path: &Path) -> Result<AlignmentCase, String> {
    let file = File::open(path)
        .map_err(|err| format!("Failed to open fixture '{}': {err}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|err| format!("Failed to parse fixture '{}': {err}", path.display()))
}

fn env_f64(name: &str, default: f64) -> f64 {
    match env::var(name) {
        Ok(value) => value.trim().parse::<f64>().unwrap_or_else(|err| {
            panic!(
                "Invalid value for {}='{}' (expected f64): {}",
                name, value, err
            )
        }),
        Err(_) => default,
    }
}

fn require_path_exists(path: &Path, message: &str) -> Result<(), String> {
    if path.exists() {
        return Ok(());
    }
    Err(format!("{} Missing path: {}", message, path.display()))
}

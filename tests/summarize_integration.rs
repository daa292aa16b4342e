//! End-to-end coverage for the sumstat binary and library.
//!
//! Tests cover:
//! 1. SUMMARIZE: file input, stdin input, exact report bytes
//! 2. PARALLEL: --parallel equivalence with the streaming path
//! 3. FLAGS: --zero-invalid, --stats, --low-memory, --threads
//! 4. GENERATE: deterministic synthetic files fed back through summarize
//! 5. Error handling for missing files and bad arguments

use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::NamedTempFile;

use sumstat::summarize_str;

// =============================================================================
// Helper functions
// =============================================================================

fn create_measurement_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file.flush().unwrap();
    file
}

fn run_sumstat(args: &[&str]) -> Output {
    Command::new("cargo")
        .args(["run", "--release", "--"])
        .args(args)
        .output()
        .expect("Failed to run sumstat")
}

fn run_sumstat_with_stdin(args: &[&str], stdin_content: &str) -> Output {
    let mut child = Command::new("cargo")
        .args(["run", "--release", "--"])
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn sumstat");

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(stdin_content.as_bytes()).unwrap();
    }

    child.wait_with_output().expect("Failed to wait for sumstat")
}

fn is_success(output: &Output) -> bool {
    output.status.success()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

// =============================================================================
// SUMMARIZE: basic report
// =============================================================================

/// Test the canonical three-line example against exact report bytes
#[test]
fn test_summarize_file_basic() {
    let input = create_measurement_file("Hamburg;12.0\nBerlin;5.5\nHamburg;8.0\n");
    let output = run_sumstat(&["summarize", "-i", input.path().to_str().unwrap()]);

    assert!(is_success(&output));
    assert_eq!(
        stdout(&output),
        "{Berlin=5.5/5.5/5.5, Hamburg=8.0/10.0/12.0}\n"
    );
}

/// Test that - reads from stdin
#[test]
fn test_summarize_stdin_dash() {
    let output = run_sumstat_with_stdin(&["summarize", "-i", "-"], "Oslo;3.2\nOslo;-1.2\n");

    assert!(is_success(&output));
    assert_eq!(stdout(&output), "{Oslo=-1.2/1.0/3.2}\n");
}

/// Test that omitting -i also reads from stdin
#[test]
fn test_summarize_stdin_default() {
    let output = run_sumstat_with_stdin(&["summarize"], "a;1\n\nb;2\n\n");

    assert!(is_success(&output));
    assert_eq!(stdout(&output), "{a=1.0/1.0/1.0, b=2.0/2.0/2.0}\n");
}

/// Test empty input produces an empty report
#[test]
fn test_summarize_empty_input() {
    let output = run_sumstat_with_stdin(&["summarize"], "");

    assert!(is_success(&output));
    assert_eq!(stdout(&output), "{}\n");
}

/// Test rounding and negative rendering end to end
#[test]
fn test_summarize_rounding() {
    let output = run_sumstat_with_stdin(&["summarize"], "x;-0.05\nx;2.35\n");

    assert!(is_success(&output));
    assert_eq!(stdout(&output), "{x=-0.1/1.2/2.4}\n");
}

/// Test that keys sort by raw bytes, not locale collation
#[test]
fn test_summarize_byte_order_keys() {
    let output = run_sumstat_with_stdin(&["summarize"], "Zürich;1.0\nÅlesund;2.0\n");

    assert!(is_success(&output));
    assert_eq!(
        stdout(&output),
        "{Zürich=1.0/1.0/1.0, Ålesund=2.0/2.0/2.0}\n"
    );
}

/// Test a file whose last line has no trailing newline
#[test]
fn test_summarize_no_final_newline() {
    let input = create_measurement_file("a;1.0\nb;2.0");
    let output = run_sumstat(&["summarize", "-i", input.path().to_str().unwrap()]);

    assert!(is_success(&output));
    assert_eq!(stdout(&output), "{a=1.0/1.0/1.0, b=2.0/2.0/2.0}\n");
}

/// Test library and binary agree on the same content
#[test]
fn test_library_matches_binary() {
    let content = "Palermo;18.5\nTromso;-3.4\nPalermo;20.1\n";
    let report = summarize_str(content).unwrap();

    let output = run_sumstat_with_stdin(&["summarize"], content);
    assert!(is_success(&output));
    assert_eq!(stdout(&output), format!("{}\n", report));
}

// =============================================================================
// FLAGS: statistics, malformed-line policy, memory
// =============================================================================

/// Test --stats reports run counters on stderr, keeping stdout pure
#[test]
fn test_summarize_stats_flag() {
    let input = create_measurement_file("a;1.0\nb;2.0\njunk line\n");
    let output = run_sumstat(&["summarize", "--stats", "-i", input.path().to_str().unwrap()]);

    assert!(is_success(&output));
    assert_eq!(stdout(&output), "{a=1.0/1.0/1.0, b=2.0/2.0/2.0}\n");
    let err = stderr(&output);
    assert!(err.contains("Summarize stats:"));
    assert!(err.contains("Lines: 3"));
    assert!(err.contains("No separator: 1"));
}

/// Test the default policy drops unparseable values
#[test]
fn test_summarize_default_drops_invalid() {
    let output = run_sumstat_with_stdin(&["summarize"], "a;1.0\na;junk\n");

    assert!(is_success(&output));
    assert_eq!(stdout(&output), "{a=1.0/1.0/1.0}\n");
}

/// Test --zero-invalid folds unparseable values as 0.0
#[test]
fn test_summarize_zero_invalid_flag() {
    let output = run_sumstat_with_stdin(&["--zero-invalid", "summarize"], "a;1.0\na;junk\n");

    assert!(is_success(&output));
    assert_eq!(stdout(&output), "{a=0.0/0.5/1.0}\n");
}

/// Test --low-memory produces identical output
#[test]
fn test_summarize_low_memory() {
    let content = "Lima;18.0\nLima;17.2\nDakar;24.9\n";
    let baseline = run_sumstat_with_stdin(&["summarize"], content);
    let low_mem = run_sumstat_with_stdin(&["summarize", "--low-memory"], content);

    assert!(is_success(&baseline));
    assert!(is_success(&low_mem));
    assert_eq!(stdout(&baseline), stdout(&low_mem));
}

/// Test a missing input file fails with an error on stderr
#[test]
fn test_summarize_missing_file() {
    let output = run_sumstat(&["summarize", "-i", "/no/such/file.txt"]);

    assert!(!is_success(&output));
    assert!(stderr(&output).contains("Error:"));
}

// =============================================================================
// PARALLEL: equivalence with the streaming path
// =============================================================================

/// Test --parallel produces byte-identical reports
#[test]
fn test_parallel_matches_streaming() {
    let mut content = String::new();
    for i in 0..500 {
        let key = ["Accra", "Bogota", "Cairo", "Denver", "Exeter"][i % 5];
        content.push_str(&format!("{};{}.{}\n", key, (i % 61) as i64 - 30, i % 10));
    }
    let input = create_measurement_file(&content);
    let path = input.path().to_str().unwrap();

    let streaming = run_sumstat(&["summarize", "-i", path]);
    let parallel = run_sumstat(&["summarize", "--parallel", "-i", path]);

    assert!(is_success(&streaming));
    assert!(is_success(&parallel));
    assert_eq!(stdout(&streaming), stdout(&parallel));
}

/// Test --parallel over stdin (buffered sharding path)
#[test]
fn test_parallel_stdin() {
    let output = run_sumstat_with_stdin(
        &["summarize", "--parallel"],
        "Hamburg;12.0\nBerlin;5.5\nHamburg;8.0\n",
    );

    assert!(is_success(&output));
    assert_eq!(
        stdout(&output),
        "{Berlin=5.5/5.5/5.5, Hamburg=8.0/10.0/12.0}\n"
    );
}

/// Test --parallel with an explicit thread count and stats
#[test]
fn test_parallel_with_threads_and_stats() {
    let input = create_measurement_file("k;1.0\nk;3.0\n");
    let output = run_sumstat(&[
        "-t",
        "2",
        "summarize",
        "--parallel",
        "--stats",
        "-i",
        input.path().to_str().unwrap(),
    ]);

    assert!(is_success(&output));
    assert_eq!(stdout(&output), "{k=1.0/2.0/3.0}\n");
    assert!(stderr(&output).contains("Parallel summarize stats:"));
}

// =============================================================================
// GENERATE: synthetic data round trip
// =============================================================================

/// Test generate is deterministic per seed and feeds back through summarize
#[test]
fn test_generate_then_summarize() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.txt");
    let second = dir.path().join("second.txt");

    let gen_first = run_sumstat(&[
        "generate",
        "--count",
        "300",
        "--seed",
        "7",
        "-o",
        first.to_str().unwrap(),
    ]);
    assert!(is_success(&gen_first));

    let gen_second = run_sumstat(&[
        "generate",
        "--count",
        "300",
        "--seed",
        "7",
        "-o",
        second.to_str().unwrap(),
    ]);
    assert!(is_success(&gen_second));

    let first_bytes = std::fs::read(&first).unwrap();
    let second_bytes = std::fs::read(&second).unwrap();
    assert_eq!(first_bytes, second_bytes);
    assert_eq!(first_bytes.iter().filter(|&&b| b == b'\n').count(), 300);

    let streaming = run_sumstat(&["summarize", "-i", first.to_str().unwrap()]);
    let parallel = run_sumstat(&["summarize", "--parallel", "-i", first.to_str().unwrap()]);
    assert!(is_success(&streaming));
    assert!(is_success(&parallel));
    assert_eq!(stdout(&streaming), stdout(&parallel));
    assert!(stdout(&streaming).starts_with('{'));
}

/// Test generate refuses to clobber an existing file without --force
#[test]
fn test_generate_refuses_existing() {
    let existing = create_measurement_file("keep me\n");
    let output = run_sumstat(&[
        "generate",
        "--count",
        "10",
        "-o",
        existing.path().to_str().unwrap(),
    ]);

    assert!(!is_success(&output));
    assert!(stderr(&output).contains("use --force"));

    let content = std::fs::read_to_string(existing.path()).unwrap();
    assert_eq!(content, "keep me\n");
}

/// Test a malformed --count is rejected
#[test]
fn test_generate_invalid_count() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");
    let output = run_sumstat(&["generate", "--count", "tenish", "-o", path.to_str().unwrap()]);

    assert!(!is_success(&output));
    assert!(stderr(&output).contains("Invalid count"));
}

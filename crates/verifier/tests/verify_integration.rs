//! End-to-end verification pipeline tests against scripted fake runners.
//!
//! Each fake runner is a shell script invoked as `sh <script> <image>
//! <mem_out> <trace_out>`; it stands in for the RTL/FPGA path by deriving
//! its outputs from the golden artifacts the pipeline wrote first.

use assembler as _;
use sim_core as _;
use thiserror as _;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use verifier::{verify_case, CaseError, ExternalRunner, Mismatch, RunnerError, VerifyConfig};

const PROGRAM: &str = "\
LI R1, 10
LI R2, 3
ADD R1, R2
LI R3, 15
STOREL R1, R3
HALT
";

/// Copies the golden outputs verbatim: a perfectly agreeing candidate.
const ECHO_RUNNER: &str = r#"
img="$1"
stem="${img%.hex}"
cp "${stem}_golden_run_out.hex" "$2"
cp "${stem}_golden_run_trace.trace" "$3"
"#;

/// Corrupts the first memory word.
const MEMORY_CORRUPTOR: &str = r#"
img="$1"
stem="${img%.hex}"
sed '1s/.*/FFF/' "${stem}_golden_run_out.hex" > "$2"
cp "${stem}_golden_run_trace.trace" "$3"
"#;

/// Drops the last trace line.
const TRACE_TRUNCATOR: &str = r#"
img="$1"
stem="${img%.hex}"
cp "${stem}_golden_run_out.hex" "$2"
sed '$d' "${stem}_golden_run_trace.trace" > "$3"
"#;

/// Appends a trailing trace line.
const TRACE_APPENDER: &str = r#"
img="$1"
stem="${img%.hex}"
cp "${stem}_golden_run_out.hex" "$2"
cp "${stem}_golden_run_trace.trace" "$3"
printf 'PC: 0099 Instr 000: Write to Reg [00] = 000000000000\n' >> "$3"
"#;

fn write_case(dir: &Path, program: &str) -> PathBuf {
    let path = dir.join("case.asm");
    fs::write(&path, program).unwrap();
    path
}

fn script_config(dir: &Path, name: &str, body: &str) -> VerifyConfig {
    let script = dir.join(name);
    fs::write(&script, body).unwrap();
    VerifyConfig {
        runner: ExternalRunner {
            program: "sh".to_string(),
            args: vec![script.to_string_lossy().into_owned()],
            timeout: Duration::from_secs(30),
        },
    }
}

#[test]
fn agreeing_implementation_passes() {
    let temp_dir = tempfile::tempdir().unwrap();
    let case = write_case(temp_dir.path(), PROGRAM);
    let config = script_config(temp_dir.path(), "echo.sh", ECHO_RUNNER);

    let report = verify_case(&case, &config).unwrap();
    assert!(report.passed(), "unexpected mismatches: {:?}", report.mismatches);
    assert!(report.outcome.is_halted());
}

#[test]
fn memory_divergence_reports_the_address_and_both_values() {
    let temp_dir = tempfile::tempdir().unwrap();
    let case = write_case(temp_dir.path(), PROGRAM);
    let config = script_config(temp_dir.path(), "corrupt.sh", MEMORY_CORRUPTOR);

    let report = verify_case(&case, &config).unwrap();
    assert!(!report.passed());
    assert_eq!(
        report.mismatches,
        vec![Mismatch::Memory {
            address: 0,
            golden: 0x41A,
            candidate: 0xFFF,
        }]
    );
}

#[test]
fn truncated_trace_is_distinct_from_a_value_mismatch() {
    let temp_dir = tempfile::tempdir().unwrap();
    let case = write_case(temp_dir.path(), PROGRAM);
    let config = script_config(temp_dir.path(), "truncate.sh", TRACE_TRUNCATOR);

    let report = verify_case(&case, &config).unwrap();
    assert_eq!(
        report.mismatches,
        vec![
            Mismatch::TraceTruncated {
                candidate_len: 4,
                golden_len: 5,
            },
            Mismatch::TraceLength {
                golden_len: 5,
                candidate_len: 4,
            },
        ]
    );
}

#[test]
fn extra_trailing_trace_lines_fail_on_length_alone() {
    let temp_dir = tempfile::tempdir().unwrap();
    let case = write_case(temp_dir.path(), PROGRAM);
    let config = script_config(temp_dir.path(), "append.sh", TRACE_APPENDER);

    let report = verify_case(&case, &config).unwrap();
    assert_eq!(
        report.mismatches,
        vec![Mismatch::TraceLength {
            golden_len: 5,
            candidate_len: 6,
        }]
    );
}

#[test]
fn runner_timeout_fails_the_case_without_crashing() {
    let temp_dir = tempfile::tempdir().unwrap();
    let case = write_case(temp_dir.path(), PROGRAM);
    let config = script_config(temp_dir.path(), "hang.sh", "sleep 30\n");
    let config = VerifyConfig {
        runner: ExternalRunner {
            timeout: Duration::from_millis(200),
            ..config.runner
        },
    };

    let error = verify_case(&case, &config).unwrap_err();
    assert!(matches!(
        error,
        CaseError::Runner(RunnerError::TimedOut { .. })
    ));
}

#[test]
fn assembly_failure_carries_the_offending_line() {
    let temp_dir = tempfile::tempdir().unwrap();
    let case = write_case(temp_dir.path(), "LI R1, 1\nMUL R1, R2\n");
    let config = script_config(temp_dir.path(), "echo.sh", ECHO_RUNNER);

    let error = verify_case(&case, &config).unwrap_err();
    let CaseError::Assemble { source, .. } = error else {
        panic!("expected an assemble error, got {error:?}");
    };
    assert_eq!(source.line, 2);
}

fn verify_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop();
    path.pop();
    path.join("risce-verify")
}

#[test]
fn batch_cli_reports_per_file_verdicts_and_totals() {
    let temp_dir = tempfile::tempdir().unwrap();
    let batch_dir = temp_dir.path().join("cases");
    fs::create_dir(&batch_dir).unwrap();
    fs::write(batch_dir.join("first.asm"), PROGRAM).unwrap();
    fs::write(batch_dir.join("second.asm"), "SUB R1, R1\nHALT\n").unwrap();

    let script = temp_dir.path().join("echo.sh");
    fs::write(&script, ECHO_RUNNER).unwrap();
    let runner_arg = format!("sh {}", script.display());

    let output = Command::new(verify_binary())
        .args(["-b", batch_dir.to_str().unwrap(), "-r", runner_arg.as_str()])
        .output()
        .expect("failed to run risce-verify");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("first.asm: PASS"));
    assert!(stdout.contains("second.asm: PASS"));
    assert!(stdout.contains("Total Pass: 2"));
    assert!(stdout.contains("Total Fail: 0"));
}

#[test]
fn single_file_cli_exits_nonzero_on_divergence() {
    let temp_dir = tempfile::tempdir().unwrap();
    let case = write_case(temp_dir.path(), PROGRAM);

    let script = temp_dir.path().join("corrupt.sh");
    fs::write(&script, MEMORY_CORRUPTOR).unwrap();
    let runner_arg = format!("sh {}", script.display());

    let output = Command::new(verify_binary())
        .args(["-a", case.to_str().unwrap(), "-r", runner_arg.as_str()])
        .output()
        .expect("failed to run risce-verify");

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("FAIL"));
    assert!(stdout.contains("memory mismatch at address 0"));
}

#[test]
fn conflicting_modes_are_rejected_at_the_cli() {
    let output = Command::new(verify_binary())
        .args(["-a", "x.asm", "-b", "cases"])
        .output()
        .expect("failed to run risce-verify");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not both"));
}

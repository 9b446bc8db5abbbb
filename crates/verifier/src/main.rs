//! CLI entry point for the risce-verify binary.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use assembler as _;
use sim_core as _;
use thiserror as _;
#[cfg(test)]
use tempfile as _;
use verifier::{
    run_batch, verify_case, BatchSummary, CaseReport, ExternalRunner, VerifyConfig,
    DEFAULT_FPGA_RUNNER, DEFAULT_RTL_RUNNER, DEFAULT_TIMEOUT,
};

const USAGE_TEXT: &str = "\
Usage: risce-verify [options]

Modes (exactly one):
  -a, --asm <file>      Verify a single .asm file
  -b, --batch <dir>     Verify every .asm file in a directory

Options:
  -b2, --batch2 <dir>   Second directory merged into the batch
  -e, --emulation       Use the FPGA emulation runner (single-file mode)
  -r, --runner <cmd>    External runner command
                        (default ./run_test.sh, ./run_fpga_test.sh with -e)
  -t, --timeout <secs>  Runner timeout in seconds (default 120)
  -h, --help            Show this help message

Examples:
  risce-verify -a tests/loop.asm
  risce-verify -b testcases -b2 more_testcases
  risce-verify -a tests/loop.asm -e
";

#[derive(Debug, PartialEq, Eq)]
enum Mode {
    Single(PathBuf),
    Batch(Vec<PathBuf>),
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    mode: Mode,
    emulation: bool,
    runner: Option<String>,
    timeout: Duration,
}

#[derive(Debug)]
enum ParsedArgs {
    Run(Args),
    Help,
}

#[allow(clippy::too_many_lines, clippy::while_let_on_iterator)]
fn parse_args(mut args: impl Iterator<Item = OsString>) -> Result<ParsedArgs, String> {
    let mut asm: Option<PathBuf> = None;
    let mut batch: Option<PathBuf> = None;
    let mut batch2: Option<PathBuf> = None;
    let mut emulation = false;
    let mut runner: Option<String> = None;
    let mut timeout = DEFAULT_TIMEOUT;

    while let Some(arg) = args.next() {
        if arg == "--help" || arg == "-h" {
            return Ok(ParsedArgs::Help);
        }

        if arg == "--emulation" || arg == "-e" {
            emulation = true;
            continue;
        }

        if arg == "-a" || arg == "--asm" {
            let value = args
                .next()
                .ok_or_else(|| "missing value for -a".to_string())?;
            asm = Some(PathBuf::from(value));
            continue;
        }

        if arg == "-b" || arg == "--batch" {
            let value = args
                .next()
                .ok_or_else(|| "missing value for -b".to_string())?;
            batch = Some(PathBuf::from(value));
            continue;
        }

        if arg == "-b2" || arg == "--batch2" {
            let value = args
                .next()
                .ok_or_else(|| "missing value for -b2".to_string())?;
            batch2 = Some(PathBuf::from(value));
            continue;
        }

        if arg == "-r" || arg == "--runner" {
            let value = args
                .next()
                .ok_or_else(|| "missing value for -r".to_string())?;
            runner = Some(value.to_string_lossy().into_owned());
            continue;
        }

        if arg == "-t" || arg == "--timeout" {
            let value = args
                .next()
                .ok_or_else(|| "missing value for -t".to_string())?;
            let secs: u64 = value
                .to_string_lossy()
                .parse()
                .map_err(|_| format!("invalid timeout: {}", value.to_string_lossy()))?;
            timeout = Duration::from_secs(secs);
            continue;
        }

        return Err(format!("unexpected argument: {}", arg.to_string_lossy()));
    }

    let mode = match (asm, batch) {
        (Some(_), Some(_)) => {
            return Err("provide either an input file or a batch directory, not both".to_string());
        }
        (None, None) => {
            return Err("provide either an input file or a batch directory".to_string());
        }
        (Some(file), None) => {
            if batch2.is_some() {
                return Err("-b2 requires batch mode".to_string());
            }
            Mode::Single(file)
        }
        (None, Some(dir)) => {
            if emulation {
                return Err("emulation mode verifies a single file, not a batch".to_string());
            }
            let mut dirs = vec![dir];
            if let Some(second) = batch2 {
                dirs.push(second);
            }
            Mode::Batch(dirs)
        }
    };

    Ok(ParsedArgs::Run(Args {
        mode,
        emulation,
        runner,
        timeout,
    }))
}

fn build_config(args: &Args) -> VerifyConfig {
    let default_runner = if args.emulation {
        DEFAULT_FPGA_RUNNER
    } else {
        DEFAULT_RTL_RUNNER
    };
    let command_line = args.runner.as_deref().unwrap_or(default_runner);
    VerifyConfig {
        runner: ExternalRunner::new(command_line, args.timeout),
    }
}

fn report_case(name: &str, report: &CaseReport) {
    if !report.outcome.is_halted() {
        eprintln!("warning: golden model hit the instruction ceiling on {name}");
    }
    for mismatch in &report.mismatches {
        println!("  {mismatch}");
    }
    let verdict = if report.passed() { "PASS" } else { "FAIL" };
    println!("{name}: {verdict}");
}

fn run_single(path: &PathBuf, config: &VerifyConfig) -> i32 {
    match verify_case(path, config) {
        Ok(report) => {
            report_case(&path.display().to_string(), &report);
            i32::from(!report.passed())
        }
        Err(error) => {
            eprintln!("error: {error}");
            println!("{}: FAIL", path.display());
            1
        }
    }
}

fn run_batch_mode(dirs: &[PathBuf], config: &VerifyConfig) -> i32 {
    let entries = match run_batch(dirs, config) {
        Ok(entries) => entries,
        Err(error) => {
            eprintln!("error: failed to read batch directory: {error}");
            return 1;
        }
    };

    for entry in &entries {
        match &entry.result {
            Ok(report) => report_case(&entry.path.display().to_string(), report),
            Err(error) => {
                eprintln!("error: {error}");
                println!("{}: FAIL", entry.path.display());
            }
        }
    }

    let summary = BatchSummary::of(&entries);
    println!("Total Pass: {}", summary.passed);
    println!("Total Fail: {}", summary.failed);

    i32::from(summary.failed > 0)
}

fn main() {
    let exit_code = match parse_args(env::args_os().skip(1)) {
        Ok(ParsedArgs::Help) => {
            println!("{USAGE_TEXT}");
            0
        }
        Ok(ParsedArgs::Run(args)) => {
            let config = build_config(&args);
            match &args.mode {
                Mode::Single(path) => run_single(path, &config),
                Mode::Batch(dirs) => run_batch_mode(dirs, &config),
            }
        }
        Err(error) => {
            eprintln!("error: {error}");
            eprintln!("{USAGE_TEXT}");
            1
        }
    };

    std::process::exit(exit_code);
}

//! Standalone golden-model runner: executes a machine-code image and
//! writes the memory dump and trace files the verifier compares against.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;

use assembler as _;
use sim_core::parse_image;
use thiserror as _;
#[cfg(test)]
use tempfile as _;
use verifier::{golden_output_paths, run_golden};

const USAGE_TEXT: &str = "\
Usage: risce-sim <input.hex> [options]

Runs the golden model over a machine-code image and writes
<stem>_golden_run_out.hex and <stem>_golden_run_trace.trace next to it.

Options:
  -d, --debug  Print the trace to stderr
  -h, --help   Show this help message
";

#[derive(Debug, PartialEq, Eq)]
struct Args {
    input: PathBuf,
    debug: bool,
}

#[derive(Debug)]
enum ParsedArgs {
    Run(Args),
    Help,
}

fn parse_args(args: impl Iterator<Item = OsString>) -> Result<ParsedArgs, String> {
    let mut input: Option<PathBuf> = None;
    let mut debug = false;

    for arg in args {
        if arg == "--help" || arg == "-h" {
            return Ok(ParsedArgs::Help);
        }

        if arg == "--debug" || arg == "-d" {
            debug = true;
            continue;
        }

        if arg.to_string_lossy().starts_with('-') {
            return Err(format!("unknown option: {}", arg.to_string_lossy()));
        }

        if input.is_some() {
            return Err("multiple input paths provided".to_string());
        }
        input = Some(PathBuf::from(arg));
    }

    let input = input.ok_or_else(|| "missing input path".to_string())?;
    Ok(ParsedArgs::Run(Args { input, debug }))
}

fn run(args: &Args) -> Result<(), i32> {
    let text = match fs::read_to_string(&args.input) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("error: failed to read {}: {e}", args.input.display());
            return Err(1);
        }
    };

    let image = match parse_image(&text) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("{}: error: {e}", args.input.display());
            return Err(1);
        }
    };

    let golden = match run_golden(&image) {
        Ok(golden) => golden,
        Err(e) => {
            eprintln!("error: {e}");
            return Err(1);
        }
    };

    if !golden.outcome.is_halted() {
        eprintln!("warning: instruction ceiling reached before HALT");
    }

    if args.debug {
        for line in &golden.trace_lines {
            eprintln!("{line}");
        }
    }

    let (mem_path, trace_path) = golden_output_paths(&args.input);
    if let Err(e) = fs::write(&mem_path, golden.memory_file_text()) {
        eprintln!("error: failed to write {}: {e}", mem_path.display());
        return Err(1);
    }
    if let Err(e) = fs::write(&trace_path, golden.trace_file_text()) {
        eprintln!("error: failed to write {}: {e}", trace_path.display());
        return Err(1);
    }

    println!(
        "Golden run complete: {} trace entries -> {}",
        golden.trace_lines.len(),
        mem_path.display()
    );

    Ok(())
}

fn main() {
    let exit_code = match parse_args(env::args_os().skip(1)) {
        Ok(ParsedArgs::Help) => {
            println!("{USAGE_TEXT}");
            0
        }
        Ok(ParsedArgs::Run(args)) => match run(&args) {
            Ok(()) => 0,
            Err(code) => code,
        },
        Err(error) => {
            eprintln!("error: {error}");
            eprintln!("{USAGE_TEXT}");
            1
        }
    };

    std::process::exit(exit_code);
}

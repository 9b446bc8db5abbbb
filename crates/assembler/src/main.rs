//! CLI entry point for the RISC-E assembler binary.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use assembler::assemble_source;
use sim_core::{disassemble, format_image};
#[cfg(test)]
use proptest as _;
#[cfg(test)]
use tempfile as _;

const USAGE_TEXT: &str = "\
Usage: risce-asm <input> [options]

Options:
  -o, --output <file>  Output file path (default: input with .hex extension)
  -d, --debug          Print the encoded listing to stderr
  -h, --help           Show this help message

Examples:
  risce-asm program.asm
  risce-asm program.asm -o build/program.hex
";

#[derive(Debug, PartialEq, Eq)]
struct Args {
    input: PathBuf,
    output: Option<PathBuf>,
    debug: bool,
}

#[derive(Debug)]
enum ParsedArgs {
    Run(Args),
    Help,
}

#[allow(clippy::while_let_on_iterator)]
fn parse_args(mut args: impl Iterator<Item = OsString>) -> Result<ParsedArgs, String> {
    let mut input: Option<PathBuf> = None;
    let mut output: Option<PathBuf> = None;
    let mut debug = false;

    while let Some(arg) = args.next() {
        if arg == "--help" || arg == "-h" {
            return Ok(ParsedArgs::Help);
        }

        if arg == "--debug" || arg == "-d" {
            debug = true;
            continue;
        }

        if arg == "-o" || arg == "--output" {
            let value = args
                .next()
                .ok_or_else(|| "missing value for -o".to_string())?;
            output = Some(PathBuf::from(value));
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
    Ok(ParsedArgs::Run(Args {
        input,
        output,
        debug,
    }))
}

fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("hex")
}

fn print_listing(words: &[u16]) {
    for (address, word) in words.iter().enumerate() {
        eprintln!("{address:04}: {word:03X}  {}", disassemble(*word));
    }
}

fn run(args: Args) -> Result<(), i32> {
    let source = match fs::read_to_string(&args.input) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("error: failed to read {}: {e}", args.input.display());
            return Err(1);
        }
    };

    let words = match assemble_source(&source) {
        Ok(words) => words,
        Err(e) => {
            eprintln!("{}: {}", args.input.display(), e.format_for_stderr());
            return Err(1);
        }
    };

    if args.debug {
        print_listing(&words);
    }

    let output_path = args
        .output
        .unwrap_or_else(|| default_output_path(&args.input));

    if let Err(e) = fs::write(&output_path, format_image(&words)) {
        eprintln!("error: failed to write output: {e}");
        return Err(1);
    }

    println!(
        "Assembled {} ({} words) -> {}",
        args.input.display(),
        words.len(),
        output_path.display()
    );

    Ok(())
}

fn main() {
    let exit_code = match parse_args(env::args_os().skip(1)) {
        Ok(ParsedArgs::Help) => {
            println!("{USAGE_TEXT}");
            0
        }
        Ok(ParsedArgs::Run(args)) => match run(args) {
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use std::path::PathBuf;

    #[test]
    fn parses_input_output_and_debug() {
        let ParsedArgs::Run(args) = parse_args(
            [
                OsString::from("program.asm"),
                OsString::from("-o"),
                OsString::from("out.hex"),
                OsString::from("--debug"),
            ]
            .into_iter(),
        )
        .expect("valid args should parse") else {
            panic!("expected run args");
        };

        assert_eq!(
            args,
            Args {
                input: PathBuf::from("program.asm"),
                output: Some(PathBuf::from("out.hex")),
                debug: true,
            }
        );
    }

    #[test]
    fn parses_help_flag() {
        let result =
            parse_args([OsString::from("--help")].into_iter()).expect("help should parse");
        assert!(matches!(result, ParsedArgs::Help));
    }

    #[test]
    fn rejects_unknown_options() {
        let error = parse_args([OsString::from("--frobnicate")].into_iter())
            .expect_err("unknown option should fail");
        assert!(error.contains("unknown option"));
    }

    #[test]
    fn rejects_missing_input() {
        let error = parse_args(std::iter::empty()).expect_err("missing input should fail");
        assert!(error.contains("missing input"));
    }

    #[test]
    fn rejects_multiple_inputs() {
        let error = parse_args([OsString::from("a.asm"), OsString::from("b.asm")].into_iter())
            .expect_err("two inputs should fail");
        assert!(error.contains("multiple input"));
    }

    #[test]
    fn default_output_swaps_the_extension() {
        assert_eq!(
            default_output_path(&PathBuf::from("tests/program.asm")),
            PathBuf::from("tests/program.hex")
        );
        assert_eq!(
            default_output_path(&PathBuf::from("program")),
            PathBuf::from("program.hex")
        );
    }
}

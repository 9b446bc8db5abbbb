//! Top-level assembly pipeline: source text to machine words.

use sim_core::format_image;

use crate::encoder::encode;
use crate::errors::AssembleError;
use crate::parser::parse_line;

/// Assembles source text into machine words in input order.
///
/// # Errors
///
/// Returns the first [`AssembleError`] encountered; the run stops there
/// and nothing is emitted for the lines already assembled.
pub fn assemble_source(source: &str) -> Result<Vec<u16>, AssembleError> {
    let mut words = Vec::new();
    for (index, raw) in source.lines().enumerate() {
        match parse_line(raw) {
            Ok(None) => {}
            Ok(Some(instruction)) => words.push(encode(&instruction)),
            Err(kind) => {
                return Err(AssembleError {
                    line: index + 1,
                    source_line: raw.trim().to_string(),
                    kind,
                });
            }
        }
    }
    Ok(words)
}

/// Assembles source text into machine-code file text, one 3-hex-digit
/// word per line.
///
/// # Errors
///
/// Propagates the first [`AssembleError`].
pub fn assemble_to_hex(source: &str) -> Result<String, AssembleError> {
    Ok(format_image(&assemble_source(source)?))
}

//! Machine-code file format: one 3-hex-digit word per line.
//!
//! The same format carries assembled programs into the simulator and the
//! hardware path, and final memory dumps back out of both.

use thiserror::Error;

use crate::encoding::WORD_MASK;
use crate::memory::MEMORY_WORDS;

/// Errors raised while parsing a machine-code or memory-dump file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    /// A line did not parse as hexadecimal.
    #[error("line {line}: invalid hex word {text:?}")]
    InvalidWord {
        /// 1-indexed line number.
        line: usize,
        /// The offending line text.
        text: String,
    },
    /// A line parsed but exceeds the 12-bit word range.
    #[error("line {line}: word {value:03X} exceeds 12 bits")]
    Oversized {
        /// 1-indexed line number.
        line: usize,
        /// The out-of-range value.
        value: u32,
    },
    /// A memory dump held more lines than the memory has words.
    #[error("dump holds {words} words, memory holds {MEMORY_WORDS}")]
    TooManyWords {
        /// Number of words in the rejected dump.
        words: usize,
    },
}

/// Parses machine-code text into words, skipping blank lines and `#`
/// comment lines.
///
/// # Errors
///
/// Returns [`ImageError::InvalidWord`] or [`ImageError::Oversized`] with
/// the offending line.
pub fn parse_image(text: &str) -> Result<Vec<u16>, ImageError> {
    let mut words = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let value = u32::from_str_radix(line, 16).map_err(|_| ImageError::InvalidWord {
            line: index + 1,
            text: line.to_string(),
        })?;
        if value > u32::from(WORD_MASK) {
            return Err(ImageError::Oversized {
                line: index + 1,
                value,
            });
        }
        words.push(u16::try_from(value).unwrap_or_default());
    }
    Ok(words)
}

/// Parses a final-memory dump, zero-padding short files to the full 1024
/// words so dumps from implementations that stop at the last nonzero
/// address compare term-by-term.
///
/// # Errors
///
/// Returns the [`parse_image`] errors plus [`ImageError::TooManyWords`]
/// for dumps longer than the memory.
pub fn parse_memory_dump(text: &str) -> Result<Vec<u16>, ImageError> {
    let mut words = parse_image(text)?;
    if words.len() > MEMORY_WORDS {
        return Err(ImageError::TooManyWords { words: words.len() });
    }
    words.resize(MEMORY_WORDS, 0);
    Ok(words)
}

/// Renders words as machine-code text, one upper-case 3-hex-digit word per
/// line with a trailing newline.
#[must_use]
pub fn format_image(words: &[u16]) -> String {
    let mut out = String::with_capacity(words.len() * 4);
    for word in words {
        out.push_str(&format!("{:03X}\n", word & WORD_MASK));
    }
    out
}

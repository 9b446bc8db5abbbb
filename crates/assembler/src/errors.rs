//! Structured assembly error with source-line context.
//!
//! The first error aborts the whole run; no partial output file is ever
//! written. Only the CLI boundary turns an error into an exit code.

use std::fmt;

use crate::parser::ParseError;

/// A fatal assembly error carrying the offending source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembleError {
    /// 1-indexed source line number.
    pub line: usize,
    /// The offending line text, trimmed.
    pub source_line: String,
    /// What went wrong.
    pub kind: ParseError,
}

impl AssembleError {
    /// Formats the error for stderr output, quoting the offending line.
    #[must_use]
    pub fn format_for_stderr(&self) -> String {
        format!("line {}: error: {}\n  {}", self.line, self.kind, self.source_line)
    }
}

impl fmt::Display for AssembleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.kind)
    }
}

impl std::error::Error for AssembleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

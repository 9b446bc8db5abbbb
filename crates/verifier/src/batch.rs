//! Batch verification over directories of assembly programs.

use std::io;
use std::path::{Path, PathBuf};

use crate::verify::{verify_case, CaseError, CaseReport, VerifyConfig};

/// One batch case with its verdict.
#[derive(Debug)]
pub struct BatchEntry {
    /// The source file.
    pub path: PathBuf,
    /// The comparison report, or the error that kept the case from being
    /// compared. Either way the batch continued past it.
    pub result: Result<CaseReport, CaseError>,
}

impl BatchEntry {
    /// True when the case reached comparison and compared clean.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.result.as_ref().is_ok_and(CaseReport::passed)
    }
}

/// Pass/fail totals over a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    /// Number of passing cases.
    pub passed: usize,
    /// Number of failing cases (mismatches and case errors alike).
    pub failed: usize,
}

impl BatchSummary {
    /// Counts verdicts over a finished batch.
    #[must_use]
    pub fn of(entries: &[BatchEntry]) -> Self {
        let passed = entries.iter().filter(|e| e.passed()).count();
        Self {
            passed,
            failed: entries.len() - passed,
        }
    }
}

/// Collects the `.asm` files of a directory in name order.
///
/// # Errors
///
/// Returns the underlying I/O error when the directory cannot be read.
pub fn collect_asm_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "asm"))
        .collect();
    files.sort();
    Ok(files)
}

/// Verifies every `.asm` file of one or more directories, never aborting
/// on a single case's failure.
///
/// # Errors
///
/// Returns an I/O error only when a directory listing itself fails;
/// per-case failures are recorded in the entries.
pub fn run_batch(dirs: &[PathBuf], config: &VerifyConfig) -> io::Result<Vec<BatchEntry>> {
    let mut entries = Vec::new();
    for dir in dirs {
        for path in collect_asm_files(dir)? {
            let result = verify_case(&path, config);
            entries.push(BatchEntry { path, result });
        }
    }
    Ok(entries)
}

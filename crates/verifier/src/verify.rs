//! Per-case differential verification pipeline.
//!
//! assemble -> golden run -> external runner -> compare. The golden
//! artifacts are written before the runner is invoked so both sides of
//! the comparison exist on disk next to the assembled image.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use assembler::{assemble_source, AssembleError};
use sim_core::{format_image, parse_memory_dump, CoreFault, ImageError, RunOutcome};
use thiserror::Error;

use crate::compare::{compare_memory, compare_traces, Mismatch};
use crate::golden::{candidate_output_paths, golden_output_paths, run_golden};
use crate::runner::{ExternalRunner, RunnerError};

/// Directory created next to each input for per-case artifacts.
pub const RUN_RESULTS_DIR: &str = "run_results";

/// Failures that prevent a case from being compared at all. At the batch
/// level every variant marks that case failed and the batch continues.
#[derive(Debug, Error)]
pub enum CaseError {
    /// Reading or writing a case artifact failed.
    #[error("{path}: {source}")]
    Io {
        /// The affected path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The source program failed to assemble.
    #[error("{path}: {source}")]
    Assemble {
        /// The source file.
        path: PathBuf,
        /// The encoding error with its line context.
        source: AssembleError,
    },
    /// The golden model rejected the image.
    #[error("golden model: {0}")]
    Golden(#[from] CoreFault),
    /// A candidate output file did not parse as a machine-code dump.
    #[error("{path}: {source}")]
    CandidateDump {
        /// The unreadable output file.
        path: PathBuf,
        /// The parse failure.
        source: ImageError,
    },
    /// The external runner failed or timed out.
    #[error(transparent)]
    Runner(#[from] RunnerError),
}

/// Per-case verification policy.
#[derive(Debug, Clone)]
pub struct VerifyConfig {
    /// The external collaborator executing the candidate side.
    pub runner: ExternalRunner,
}

/// The comparison verdict for one test case.
#[derive(Debug, Clone)]
pub struct CaseReport {
    /// How the golden run terminated; an instruction-ceiling stop is
    /// surfaced so callers can tell it apart from a normal halt.
    pub outcome: RunOutcome,
    /// Every recorded divergence; empty means the case passed.
    pub mismatches: Vec<Mismatch>,
}

impl CaseReport {
    /// True when memory and trace both compared equal.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Verifies one assembly source file against the external implementation.
///
/// # Errors
///
/// Returns a [`CaseError`] when the case cannot be brought to comparison
/// (assembly failure, I/O failure, runner failure/timeout). Comparison
/// divergences are not errors; they land in the returned report.
pub fn verify_case(asm_path: &Path, config: &VerifyConfig) -> Result<CaseReport, CaseError> {
    let source = read_text(asm_path)?;
    let words = assemble_source(&source).map_err(|source| CaseError::Assemble {
        path: asm_path.to_path_buf(),
        source,
    })?;

    let image_path = prepare_image_path(asm_path)?;
    write_text(&image_path, &format_image(&words))?;

    let golden = run_golden(&words)?;
    let (golden_mem_path, golden_trace_path) = golden_output_paths(&image_path);
    write_text(&golden_mem_path, &golden.memory_file_text())?;
    write_text(&golden_trace_path, &golden.trace_file_text())?;

    let (candidate_mem_path, candidate_trace_path) = candidate_output_paths(&image_path);
    config
        .runner
        .run(&image_path, &candidate_mem_path, &candidate_trace_path)?;

    let candidate_memory = parse_memory_dump(&read_text(&candidate_mem_path)?).map_err(
        |source| CaseError::CandidateDump {
            path: candidate_mem_path.clone(),
            source,
        },
    )?;
    let candidate_trace = read_trace_lines(&candidate_trace_path)?;

    let mut mismatches = Vec::new();
    if let Some(mismatch) = compare_memory(&golden.memory, &candidate_memory) {
        mismatches.push(mismatch);
    }
    mismatches.extend(compare_traces(&golden.trace_lines, &candidate_trace));

    Ok(CaseReport {
        outcome: golden.outcome,
        mismatches,
    })
}

fn prepare_image_path(asm_path: &Path) -> Result<PathBuf, CaseError> {
    let parent = asm_path.parent().unwrap_or_else(|| Path::new("."));
    let results_dir = parent.join(RUN_RESULTS_DIR);
    fs::create_dir_all(&results_dir).map_err(|source| CaseError::Io {
        path: results_dir.clone(),
        source,
    })?;

    let stem = asm_path
        .file_stem()
        .map_or_else(|| "case".to_string(), |s| s.to_string_lossy().into_owned());
    Ok(results_dir.join(format!("{stem}.hex")))
}

fn read_text(path: &Path) -> Result<String, CaseError> {
    fs::read_to_string(path).map_err(|source| CaseError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_text(path: &Path, text: &str) -> Result<(), CaseError> {
    fs::write(path, text).map_err(|source| CaseError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_trace_lines(path: &Path) -> Result<Vec<String>, CaseError> {
    Ok(read_text(path)?
        .lines()
        .map(|line| line.trim_end().to_string())
        .collect())
}

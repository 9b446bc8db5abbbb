//! Differential verifier for RISC-E hardware implementations.
//!
//! One test case flows assemble -> golden run -> external runner ->
//! exact comparison of the final memory and trace. The golden model is
//! the oracle; the external runner (RTL simulation or FPGA board) is an
//! opaque process boundary.

/// Exact (memory, trace) comparison.
pub mod compare;
pub use compare::{compare_memory, compare_traces, Mismatch};

/// Golden-model execution and artifacts.
pub mod golden;
pub use golden::{candidate_output_paths, golden_output_paths, run_golden, GoldenRun};

/// External collaborator invocation.
pub mod runner;
pub use runner::{
    ExternalRunner, RunnerError, DEFAULT_FPGA_RUNNER, DEFAULT_RTL_RUNNER, DEFAULT_TIMEOUT,
};

/// Per-case verification pipeline.
pub mod verify;
pub use verify::{verify_case, CaseError, CaseReport, VerifyConfig, RUN_RESULTS_DIR};

/// Batch verification and aggregation.
pub mod batch;
pub use batch::{collect_asm_files, run_batch, BatchEntry, BatchSummary};

#[cfg(test)]
use tempfile as _;

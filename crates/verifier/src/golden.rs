//! Golden-model execution and its on-disk artifacts.

use std::path::{Path, PathBuf};

use sim_core::{format_image, CoreFault, Cpu, RunOutcome};

/// The (memory, trace) pair produced by one golden-model run.
#[derive(Debug, Clone)]
pub struct GoldenRun {
    /// How the run terminated.
    pub outcome: RunOutcome,
    /// Final memory contents, all 1024 words.
    pub memory: Vec<u16>,
    /// Rendered trace lines in emission order.
    pub trace_lines: Vec<String>,
}

impl GoldenRun {
    /// The memory dump file text (one hex word per line).
    #[must_use]
    pub fn memory_file_text(&self) -> String {
        format_image(&self.memory)
    }

    /// The trace file text (one entry per line).
    #[must_use]
    pub fn trace_file_text(&self) -> String {
        let mut text = String::new();
        for line in &self.trace_lines {
            text.push_str(line);
            text.push('\n');
        }
        text
    }
}

/// Runs the golden model over a machine-code image.
///
/// # Errors
///
/// Returns a [`CoreFault`] for oversized images or (structurally
/// unreachable) undefined opcodes.
pub fn run_golden(image: &[u16]) -> Result<GoldenRun, CoreFault> {
    let mut cpu = Cpu::new(image)?;
    let outcome = cpu.run()?;
    Ok(GoldenRun {
        outcome,
        memory: cpu.memory().to_vec(),
        trace_lines: cpu.trace().iter().map(ToString::to_string).collect(),
    })
}

/// Derives the golden output pair (`_golden_run_out.hex`,
/// `_golden_run_trace.trace`) next to an assembled image.
#[must_use]
pub fn golden_output_paths(image_path: &Path) -> (PathBuf, PathBuf) {
    sibling_outputs(image_path, "_golden_run_out.hex", "_golden_run_trace.trace")
}

/// Derives the candidate output pair the external runner writes
/// (`_testbench_run_out.hex`, `_testbench_run_trace.trace`).
#[must_use]
pub fn candidate_output_paths(image_path: &Path) -> (PathBuf, PathBuf) {
    sibling_outputs(
        image_path,
        "_testbench_run_out.hex",
        "_testbench_run_trace.trace",
    )
}

fn sibling_outputs(image_path: &Path, mem_suffix: &str, trace_suffix: &str) -> (PathBuf, PathBuf) {
    let stem = image_path
        .file_stem()
        .map_or_else(|| "out".to_string(), |s| s.to_string_lossy().into_owned());
    let parent = image_path.parent().unwrap_or_else(|| Path::new(""));
    (
        parent.join(format!("{stem}{mem_suffix}")),
        parent.join(format!("{stem}{trace_suffix}")),
    )
}

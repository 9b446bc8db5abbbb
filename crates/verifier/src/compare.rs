//! Exact comparison of (memory, trace) pairs from two implementations.

use thiserror::Error;

/// A single point of divergence between the golden model and a candidate
/// implementation. Recoverable at the batch level: one mismatch fails its
/// case, never the whole run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Mismatch {
    /// Final memory differs at an address.
    #[error("memory mismatch at address {address}: golden {golden:03X}, candidate {candidate:03X}")]
    Memory {
        /// First differing address.
        address: usize,
        /// Golden-model word.
        golden: u16,
        /// Candidate word.
        candidate: u16,
    },
    /// Traces differ at an aligned line.
    #[error("trace mismatch at line {line}: golden {golden:?}, candidate {candidate:?}")]
    TraceLine {
        /// 0-indexed line of the first difference.
        line: usize,
        /// Golden-model trace line.
        golden: String,
        /// Candidate trace line.
        candidate: String,
    },
    /// The candidate trace ran out before the golden trace.
    #[error("candidate trace ends after {candidate_len} lines, golden has {golden_len}")]
    TraceTruncated {
        /// Candidate trace length.
        candidate_len: usize,
        /// Golden trace length.
        golden_len: usize,
    },
    /// The traces agree where compared but have different lengths.
    #[error("trace length mismatch: golden {golden_len} lines, candidate {candidate_len}")]
    TraceLength {
        /// Golden trace length.
        golden_len: usize,
        /// Candidate trace length.
        candidate_len: usize,
    },
}

/// Term-by-term memory comparison, short-circuiting on the first
/// differing address.
#[must_use]
pub fn compare_memory(golden: &[u16], candidate: &[u16]) -> Option<Mismatch> {
    golden
        .iter()
        .zip(candidate)
        .enumerate()
        .find(|(_, (g, c))| g != c)
        .map(|(address, (g, c))| Mismatch::Memory {
            address,
            golden: *g,
            candidate: *c,
        })
}

/// Line-by-line trace comparison in emission order.
///
/// A candidate that runs out early is reported as truncation, distinct
/// from a value mismatch at an aligned line; a length difference is a
/// failure even when every compared line matches.
#[must_use]
pub fn compare_traces(golden: &[String], candidate: &[String]) -> Vec<Mismatch> {
    let mut mismatches = Vec::new();

    for (line, golden_line) in golden.iter().enumerate() {
        match candidate.get(line) {
            None => {
                mismatches.push(Mismatch::TraceTruncated {
                    candidate_len: candidate.len(),
                    golden_len: golden.len(),
                });
                break;
            }
            Some(candidate_line) if candidate_line != golden_line => {
                mismatches.push(Mismatch::TraceLine {
                    line,
                    golden: golden_line.clone(),
                    candidate: candidate_line.clone(),
                });
                break;
            }
            Some(_) => {}
        }
    }

    if golden.len() != candidate.len() {
        mismatches.push(Mismatch::TraceLength {
            golden_len: golden.len(),
            candidate_len: candidate.len(),
        });
    }

    mismatches
}

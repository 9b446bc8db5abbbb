//! Deterministic run fingerprint generator used for cross-host comparison.
//!
//! Prints a stable hash over the final memory, the trace, and the run
//! outcome of a fixed program. Two hosts (or two toolchain versions)
//! printing different fingerprints have a determinism bug.

use proptest as _;
use rstest as _;
#[cfg(feature = "serde")]
use serde as _;
use sim_core::{Cpu, RunOutcome};
use thiserror as _;

fn hash_bytes(hash: &mut u64, bytes: &[u8]) {
    for byte in bytes {
        *hash ^= u64::from(*byte);
        *hash = hash.wrapping_mul(0x1000_0000_01B3);
    }
}

fn fingerprint() -> String {
    // Exercises every instruction class: immediates, ALU ops, shifts,
    // both store halves, a taken branch, and a jump.
    let image = [
        0x41A, // LI R1, 10
        0x423, // LI R2, 3
        0x812, // ADD R1, R2
        0x512, // NOT R1, R2
        0xD12, // SL R1, R2
        0x43F, // LI R3, 15
        0x613, // STOREL R1, R3
        0x713, // STOREU R1, R3
        0x911, // SUB R1, R1
        0x301, // BRANCHz 1
        0x44F, // LI R4, 15 (skipped)
        0x412, // LI R1, 2
        0x210, // JUMP R1
        0x000, // HALT
    ];

    let mut cpu = Cpu::new(&image).expect("image fits in memory");
    let outcome = cpu.run().expect("fixed program cannot fault");

    let mut hash = 0xcbf2_9ce4_8422_2325_u64;
    match outcome {
        RunOutcome::Halted { instructions } => {
            hash_bytes(&mut hash, &[0x10]);
            hash_bytes(&mut hash, &instructions.to_le_bytes());
        }
        RunOutcome::LimitReached { instructions } => {
            hash_bytes(&mut hash, &[0x11]);
            hash_bytes(&mut hash, &instructions.to_le_bytes());
        }
    }

    for word in cpu.memory() {
        hash_bytes(&mut hash, &word.to_le_bytes());
    }
    for entry in cpu.trace() {
        hash_bytes(&mut hash, entry.to_string().as_bytes());
    }

    format!("{hash:016x}")
}

fn main() {
    println!("{}", fingerprint());
}

//! Ordered execution trace of observable state mutations.
//!
//! One entry is appended per register or memory write; flag updates and PC
//! changes are not traced. The `Display` format is the wire contract
//! compared line-for-line against a hardware implementation's trace, so
//! any change to it is a breaking change of the verification interface.

use std::fmt;

/// The mutated location and the value written to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum TraceWrite {
    /// A general-purpose register write.
    Register {
        /// Register index (0-15).
        index: u8,
        /// The full 12-bit value written.
        value: u16,
    },
    /// A half-word memory write (`STOREL`/`STOREU`).
    Memory {
        /// 10-bit word address.
        address: u16,
        /// The 6 bits actually stored into the target half.
        stored: u8,
    },
}

/// One observable state mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct TraceEntry {
    /// Address the writing instruction was fetched from.
    pub pc: u16,
    /// The raw encoded instruction word.
    pub word: u16,
    /// The write performed.
    pub write: TraceWrite,
}

impl fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.write {
            TraceWrite::Register { index, value } => write!(
                f,
                "PC: {:04} Instr {:03x}: Write to Reg [{:02}] = {:012b}",
                self.pc, self.word, index, value
            ),
            TraceWrite::Memory { address, stored } => write!(
                f,
                "PC: {:04} Instr {:03x}: Write to Mem [{:04}] = {:06b}",
                self.pc, self.word, address, stored
            ),
        }
    }
}

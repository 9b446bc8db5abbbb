//! Golden-model core for the RISC-E 12-bit ISA.
//!
//! The opcode table, decoder, reference simulator, and disassembler live
//! together here so that every tool in the repository shares one
//! bit-identical view of the instruction encoding.

/// Deterministic opcode table and instruction-word field layout.
pub mod encoding;
pub use encoding::{
    branch_offset, branch_on_positive, opcode_bits, rd_bits, rs_bits, Opcode, HALT_WORD, NOP_WORD,
    OPCODE_TABLE, SIGN_BIT, WORD_BITS, WORD_MASK,
};

/// Instruction decode with field extraction.
pub mod decoder;
pub use decoder::{decode, AluOp, DecodedInstruction};

/// Architectural register file and condition flags.
pub mod state;
pub use state::{Flags, RegisterFile, REGISTER_COUNT};

/// Word-addressed memory with half-word store merging.
pub mod memory;
pub use memory::{data_address, Memory, ADDRESS_MASK, MEMORY_WORDS};

/// Ordered execution trace of observable state mutations.
pub mod trace;
pub use trace::{TraceEntry, TraceWrite};

/// Fatal core fault taxonomy.
pub mod fault;
pub use fault::CoreFault;

/// Golden-model fetch-decode-execute loop.
pub mod cpu;
pub use cpu::{Cpu, RunOutcome, MAX_INSTRUCTIONS};

/// Instruction disassembly back into mnemonic lines.
pub mod disasm;
pub use disasm::disassemble;

/// Machine-code file format shared with the hardware path.
pub mod image;
pub use image::{format_image, parse_image, parse_memory_dump, ImageError};

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;

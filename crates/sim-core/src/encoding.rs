//! Deterministic opcode table and instruction-word field layout.
//!
//! The assembler, the disassembler, and the golden-model simulator all
//! consume this table; any private copy of an opcode value or field offset
//! is a correctness bug.

/// Number of value bits in a machine word.
pub const WORD_BITS: u32 = 12;
/// Mask selecting the 12 value bits of a word.
pub const WORD_MASK: u16 = 0x0FFF;
/// Sign bit of a 12-bit word (MSB-as-sign convention).
pub const SIGN_BIT: u16 = 0x0800;

/// Exact full-word `NOP` pattern (`101100010001`).
///
/// The top nibble aliases the `OR` opcode; dispatch must match this literal
/// before generic opcode decode so the aliased `OR R1, R1` never executes.
pub const NOP_WORD: u16 = 0b1011_0001_0001;
/// Canonical `HALT` word emitted by the assembler. Execution halts on any
/// word whose top nibble is zero; the low eight bits are don't-care.
pub const HALT_WORD: u16 = 0x0000;

/// Assigned primary opcode values (top 4 bits of the instruction word).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Opcode {
    Halt = 0x0,
    Load = 0x1,
    Jump = 0x2,
    Branch = 0x3,
    Li = 0x4,
    Not = 0x5,
    StoreL = 0x6,
    StoreU = 0x7,
    Add = 0x8,
    Sub = 0x9,
    And = 0xA,
    Or = 0xB,
    Xor = 0xC,
    Sl = 0xD,
    Srl = 0xE,
    Sra = 0xF,
}

/// Single source-of-truth `(value, opcode, mnemonic)` table.
///
/// All 16 values of the 4-bit opcode field are assigned; there is no
/// reserved encoding space.
pub const OPCODE_TABLE: &[(u8, Opcode, &str)] = &[
    (0x0, Opcode::Halt, "HALT"),
    (0x1, Opcode::Load, "LOAD"),
    (0x2, Opcode::Jump, "JUMP"),
    (0x3, Opcode::Branch, "BRANCH"),
    (0x4, Opcode::Li, "LI"),
    (0x5, Opcode::Not, "NOT"),
    (0x6, Opcode::StoreL, "STOREL"),
    (0x7, Opcode::StoreU, "STOREU"),
    (0x8, Opcode::Add, "ADD"),
    (0x9, Opcode::Sub, "SUB"),
    (0xA, Opcode::And, "AND"),
    (0xB, Opcode::Or, "OR"),
    (0xC, Opcode::Xor, "XOR"),
    (0xD, Opcode::Sl, "SL"),
    (0xE, Opcode::Srl, "SRL"),
    (0xF, Opcode::Sra, "SRA"),
];

impl Opcode {
    /// Converts a 4-bit opcode field value into an assigned opcode.
    #[must_use]
    pub const fn from_u4(op: u8) -> Option<Self> {
        match op {
            0x0 => Some(Self::Halt),
            0x1 => Some(Self::Load),
            0x2 => Some(Self::Jump),
            0x3 => Some(Self::Branch),
            0x4 => Some(Self::Li),
            0x5 => Some(Self::Not),
            0x6 => Some(Self::StoreL),
            0x7 => Some(Self::StoreU),
            0x8 => Some(Self::Add),
            0x9 => Some(Self::Sub),
            0xA => Some(Self::And),
            0xB => Some(Self::Or),
            0xC => Some(Self::Xor),
            0xD => Some(Self::Sl),
            0xE => Some(Self::Srl),
            0xF => Some(Self::Sra),
            _ => None,
        }
    }

    /// Returns the 4-bit opcode field value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Returns the canonical upper-case mnemonic.
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Halt => "HALT",
            Self::Load => "LOAD",
            Self::Jump => "JUMP",
            Self::Branch => "BRANCH",
            Self::Li => "LI",
            Self::Not => "NOT",
            Self::StoreL => "STOREL",
            Self::StoreU => "STOREU",
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Xor => "XOR",
            Self::Sl => "SL",
            Self::Srl => "SRL",
            Self::Sra => "SRA",
        }
    }

    /// Looks up an upper-case mnemonic in the opcode table.
    #[must_use]
    pub fn from_mnemonic(name: &str) -> Option<Self> {
        OPCODE_TABLE
            .iter()
            .find_map(|(_, opcode, mnemonic)| (*mnemonic == name).then_some(*opcode))
    }

    /// Returns true for the arithmetic/logic/shift class, the only class
    /// that recomputes the condition flags after writing its destination.
    #[must_use]
    pub const fn sets_flags(self) -> bool {
        matches!(
            self,
            Self::Not
                | Self::Add
                | Self::Sub
                | Self::And
                | Self::Or
                | Self::Xor
                | Self::Sl
                | Self::Srl
                | Self::Sra
        )
    }
}

/// Extracts the 4-bit opcode field (bits 11..8).
#[must_use]
pub const fn opcode_bits(word: u16) -> u8 {
    ((word >> 8) & 0xF) as u8
}

/// Extracts the 4-bit destination-register field (bits 7..4).
#[must_use]
pub const fn rd_bits(word: u16) -> u8 {
    ((word >> 4) & 0xF) as u8
}

/// Extracts the 4-bit source-register/immediate field (bits 3..0).
#[must_use]
pub const fn rs_bits(word: u16) -> u8 {
    (word & 0xF) as u8
}

/// Extracts the branch polarity selector (bit 7): `false` branches on the
/// Zero flag, `true` on the Positive flag.
#[must_use]
pub const fn branch_on_positive(word: u16) -> bool {
    (word >> 7) & 1 == 1
}

/// Extracts the unsigned 7-bit branch offset (bits 6..0).
#[must_use]
pub const fn branch_offset(word: u16) -> u16 {
    word & 0x7F
}

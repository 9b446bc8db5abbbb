//! Assembly source line parser.
//!
//! Converts one raw source line into a [`ParsedInstruction`], enforcing
//! the operand shape of each instruction class. Range checks happen here:
//! a register index, immediate, or offset that does not fit its field is
//! an error, never a silent truncation.

use sim_core::Opcode;

/// Maximum value of a 4-bit register field.
const MAX_REGISTER: u32 = 15;
/// Inclusive range of the `LI` immediate. Negative values are accepted and
/// encoded biased; see the encoder.
const IMMEDIATE_RANGE: std::ops::RangeInclusive<i64> = -16..=15;
/// Inclusive range of the unsigned 7-bit branch offset.
const OFFSET_RANGE: std::ops::RangeInclusive<i64> = 0..=127;

/// A source instruction with validated operand fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedInstruction {
    /// `HALT` (trailing text ignored, matching the don't-care low bits).
    Halt,
    /// `NOP`.
    Nop,
    /// `JUMP Rd`.
    Jump {
        /// Register holding the jump distance.
        rd: u8,
    },
    /// `BRANCHZ off` / `BRANCHP off`.
    Branch {
        /// `true` for `BRANCHP`, `false` for `BRANCHZ`.
        on_positive: bool,
        /// Unsigned 7-bit offset.
        offset: u8,
    },
    /// `LI Rd, imm`.
    LoadImmediate {
        /// Destination register.
        rd: u8,
        /// Signed source immediate; negative values encode biased.
        imm: i8,
    },
    /// Any `OP Rd, Rs` two-register instruction.
    RegPair {
        /// The opcode.
        op: Opcode,
        /// Destination register field.
        rd: u8,
        /// Source register field.
        rs: u8,
    },
}

/// Classification of line parse failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The mnemonic is not in the opcode table.
    UnknownMnemonic(String),
    /// The instruction requires an operand that is absent.
    MissingOperand,
    /// A two-operand instruction is missing its `,` separator.
    MissingSeparator,
    /// A register operand lacks the mandatory `R` prefix.
    MissingRegisterPrefix(String),
    /// A register operand did not parse as a number.
    InvalidRegister(String),
    /// A register index outside 0-15.
    RegisterOutOfRange(u32),
    /// An immediate or offset operand did not parse as a number.
    InvalidImmediate(String),
    /// An `LI` immediate outside -16..=15.
    ImmediateOutOfRange(i64),
    /// A branch offset outside 0..=127.
    OffsetOutOfRange(i64),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownMnemonic(m) => write!(f, "unknown mnemonic: {m}"),
            Self::MissingOperand => write!(f, "missing operand"),
            Self::MissingSeparator => write!(f, "expected `,` between operands"),
            Self::MissingRegisterPrefix(t) => {
                write!(f, "register operand {t:?} is missing its R prefix")
            }
            Self::InvalidRegister(t) => write!(f, "invalid register: {t}"),
            Self::RegisterOutOfRange(v) => write!(f, "register R{v} out of range (R0-R15)"),
            Self::InvalidImmediate(t) => write!(f, "invalid immediate value: {t}"),
            Self::ImmediateOutOfRange(v) => write!(f, "immediate {v} out of range (-16..=15)"),
            Self::OffsetOutOfRange(v) => write!(f, "branch offset {v} out of range (0..=127)"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Result of parsing a single line; `None` is a blank or comment line.
pub type ParseResult = Result<Option<ParsedInstruction>, ParseError>;

/// Parses one source line.
///
/// Blank lines and `#` comments (full-line or trailing) are skipped.
/// Mnemonics are case-insensitive.
///
/// # Errors
///
/// Returns a [`ParseError`] for unknown mnemonics, malformed operand
/// lists, missing register prefixes, and out-of-range field values.
pub fn parse_line(raw: &str) -> ParseResult {
    let stripped = strip_comment(raw);
    let trimmed = stripped.trim();

    if trimmed.is_empty() {
        return Ok(None);
    }

    let (mnemonic, rest) = trimmed
        .split_once(char::is_whitespace)
        .unwrap_or((trimmed, ""));
    let mnemonic = mnemonic.to_ascii_uppercase();
    let rest = rest.trim();

    let instruction = match mnemonic.as_str() {
        "HALT" => ParsedInstruction::Halt,
        "NOP" => ParsedInstruction::Nop,
        "JUMP" => ParsedInstruction::Jump {
            rd: parse_register(require_operand(rest)?)?,
        },
        "BRANCHZ" => ParsedInstruction::Branch {
            on_positive: false,
            offset: parse_offset(require_operand(rest)?)?,
        },
        "BRANCHP" => ParsedInstruction::Branch {
            on_positive: true,
            offset: parse_offset(require_operand(rest)?)?,
        },
        "LI" => {
            let (rd, imm) = split_operands(rest)?;
            ParsedInstruction::LoadImmediate {
                rd: parse_register(rd)?,
                imm: parse_immediate(imm)?,
            }
        }
        _ => match Opcode::from_mnemonic(&mnemonic) {
            None | Some(Opcode::Halt | Opcode::Jump | Opcode::Branch | Opcode::Li) => {
                return Err(ParseError::UnknownMnemonic(mnemonic));
            }
            Some(op) => {
                let (rd, rs) = split_operands(rest)?;
                ParsedInstruction::RegPair {
                    op,
                    rd: parse_register(rd)?,
                    rs: parse_register(rs)?,
                }
            }
        },
    };

    Ok(Some(instruction))
}

fn strip_comment(line: &str) -> &str {
    line.find('#').map_or(line, |pos| &line[..pos])
}

fn require_operand(rest: &str) -> Result<&str, ParseError> {
    if rest.is_empty() {
        Err(ParseError::MissingOperand)
    } else {
        Ok(rest)
    }
}

fn split_operands(rest: &str) -> Result<(&str, &str), ParseError> {
    let rest = require_operand(rest)?;
    let Some((first, second)) = rest.split_once(',') else {
        return Err(ParseError::MissingSeparator);
    };
    let first = first.trim();
    let second = second.trim();
    if first.is_empty() || second.is_empty() {
        return Err(ParseError::MissingOperand);
    }
    Ok((first, second))
}

fn parse_register(token: &str) -> Result<u8, ParseError> {
    let token = token.trim();
    let Some(index) = token.strip_prefix(['R', 'r']) else {
        return Err(ParseError::MissingRegisterPrefix(token.to_string()));
    };
    let value: u32 = index
        .parse()
        .map_err(|_| ParseError::InvalidRegister(token.to_string()))?;
    if value > MAX_REGISTER {
        return Err(ParseError::RegisterOutOfRange(value));
    }
    Ok(u8::try_from(value).unwrap_or_default())
}

fn parse_immediate(token: &str) -> Result<i8, ParseError> {
    let value: i64 = token
        .parse()
        .map_err(|_| ParseError::InvalidImmediate(token.to_string()))?;
    if !IMMEDIATE_RANGE.contains(&value) {
        return Err(ParseError::ImmediateOutOfRange(value));
    }
    Ok(i8::try_from(value).unwrap_or_default())
}

fn parse_offset(token: &str) -> Result<u8, ParseError> {
    let value: i64 = token
        .parse()
        .map_err(|_| ParseError::InvalidImmediate(token.to_string()))?;
    if !OFFSET_RANGE.contains(&value) {
        return Err(ParseError::OffsetOutOfRange(value));
    }
    Ok(u8::try_from(value).unwrap_or_default())
}

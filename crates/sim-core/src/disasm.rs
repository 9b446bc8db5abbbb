//! Instruction disassembly back into assembler-accepted mnemonic lines.

use crate::decoder::{decode, DecodedInstruction};
use crate::encoding::{HALT_WORD, NOP_WORD, WORD_MASK};

/// Renders one instruction word as a mnemonic line.
///
/// The exact `NOP` and `HALT` patterns are matched before generic opcode
/// lookup, mirroring the simulator's dispatch order. Every produced line
/// reassembles to a semantically equivalent word.
#[must_use]
pub fn disassemble(word: u16) -> String {
    let word = word & WORD_MASK;
    if word == NOP_WORD {
        return "NOP".to_string();
    }
    if word == HALT_WORD {
        return "HALT".to_string();
    }

    let Some(instr) = decode(word) else {
        // Unreachable for a masked word; rendered as raw data rather than
        // panicking so callers can display arbitrary input.
        return format!(".word {word:03X}");
    };

    match instr {
        DecodedInstruction::Halt => "HALT".to_string(),
        DecodedInstruction::Load { rd, rs } => format!("LOAD R{rd}, R{rs}"),
        DecodedInstruction::Jump { rd } => format!("JUMP R{rd}"),
        DecodedInstruction::Branch { on_positive, offset } => {
            let polarity = if on_positive { 'p' } else { 'z' };
            format!("BRANCH{polarity} {offset}")
        }
        DecodedInstruction::LoadImmediate { rd, imm } => format!("LI R{rd}, {imm}"),
        DecodedInstruction::StoreLow { rd, rs } => format!("STOREL R{rd}, R{rs}"),
        DecodedInstruction::StoreHigh { rd, rs } => format!("STOREU R{rd}, R{rs}"),
        DecodedInstruction::Alu { op, rd, rs } => {
            format!("{} R{rd}, R{rs}", op.opcode().mnemonic())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::disassemble;
    use crate::encoding::NOP_WORD;

    #[test]
    fn literal_patterns_win_over_opcode_lookup() {
        assert_eq!(disassemble(NOP_WORD), "NOP");
        assert_eq!(disassemble(0x000), "HALT");
    }

    #[test]
    fn any_zero_top_nibble_renders_as_halt() {
        assert_eq!(disassemble(0x0FF), "HALT");
    }

    #[test]
    fn branch_polarity_renders_as_a_suffix() {
        assert_eq!(disassemble(0x30C), "BRANCHz 12");
        assert_eq!(disassemble(0x3FF), "BRANCHp 127");
    }

    #[test]
    fn register_classes_render_prefixed_operands() {
        assert_eq!(disassemble(0x1A5), "LOAD R10, R5");
        assert_eq!(disassemble(0x230), "JUMP R3");
        assert_eq!(disassemble(0x437), "LI R3, 7");
        assert_eq!(disassemble(0x512), "NOT R1, R2");
        assert_eq!(disassemble(0x612), "STOREL R1, R2");
        assert_eq!(disassemble(0x712), "STOREU R1, R2");
        assert_eq!(disassemble(0x835), "ADD R3, R5");
        assert_eq!(disassemble(0x935), "SUB R3, R5");
        assert_eq!(disassemble(0xA35), "AND R3, R5");
        assert_eq!(disassemble(0xB35), "OR R3, R5");
        assert_eq!(disassemble(0xC35), "XOR R3, R5");
        assert_eq!(disassemble(0xD35), "SL R3, R5");
        assert_eq!(disassemble(0xE35), "SRL R3, R5");
        assert_eq!(disassemble(0xF35), "SRA R3, R5");
    }

    #[test]
    fn or_words_other_than_the_nop_literal_stay_or() {
        assert_eq!(disassemble(0xB12), "OR R1, R2");
    }
}

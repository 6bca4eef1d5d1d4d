//! The disassembler (C4): the reverse of C3 — reads bytes starting at an
//! opcode, looks it up in the shared instruction table (C1), and formats
//! the operand text using the same grammar the assembler parses.

use crate::error::EmulatorError;
use crate::isa::{AddressingMode, INSTRUCTION_TABLE};

/// One decoded instruction: its mnemonic/operand text and the number of
/// bytes it occupied (1, 2, or 3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedInstruction {
    pub text: String,
    pub len: u8,
}

/// Disassembles the single instruction starting at `bytes[0]`. `bytes`
/// must contain at least `1 + operand_len` bytes for the opcode found, or
/// this fails with `InvalidINes`-adjacent truncation reported as
/// `NoMatchingAddressingMode`-free: truncation is reported distinctly.
pub fn disassemble_one(bytes: &[u8]) -> Result<DecodedInstruction, EmulatorError> {
    let opcode = *bytes.first().ok_or(EmulatorError::IllegalOpcode(0))?;
    let entry = INSTRUCTION_TABLE
        .lookup_opcode(opcode)
        .ok_or(EmulatorError::IllegalOpcode(opcode))?;

    let operand_len = entry.mode.operand_len() as usize;
    if bytes.len() < 1 + operand_len {
        return Err(EmulatorError::IllegalOpcode(opcode));
    }

    let text = format_operand(entry.mode, &bytes[1..1 + operand_len]);
    let full_text = if text.is_empty() {
        format!("{}", entry.mnemonic)
    } else {
        format!("{} {}", entry.mnemonic, text)
    };

    Ok(DecodedInstruction {
        text: full_text,
        len: 1 + operand_len as u8,
    })
}

/// Disassembles every instruction in `bytes` in sequence, starting at
/// offset 0, until the buffer is exhausted.
pub fn disassemble_all(bytes: &[u8]) -> Result<Vec<DecodedInstruction>, EmulatorError> {
    let mut out = Vec::new();
    let mut offset = 0usize;
    while offset < bytes.len() {
        let instruction = disassemble_one(&bytes[offset..])?;
        offset += instruction.len as usize;
        out.push(instruction);
    }
    Ok(out)
}

/// Renders `operand_bytes` using `mode`'s grammar, substituting the
/// little-endian operand bytes into the pattern's `@byte` slots — the
/// mirror image of [`crate::pattern::extract_number`].
fn format_operand(mode: AddressingMode, operand_bytes: &[u8]) -> String {
    use AddressingMode::*;
    match mode {
        Implicit => String::new(),
        Accumulator => "A".to_string(),
        Immediate => format!("#{:02X}", operand_bytes[0]),
        ZeroPage => format!("${:02X}", operand_bytes[0]),
        ZeroPageX => format!("${:02X},X", operand_bytes[0]),
        ZeroPageY => format!("${:02X},Y", operand_bytes[0]),
        Relative => format!("{:02X}", operand_bytes[0]),
        Absolute => format!("${:02X}{:02X}", operand_bytes[1], operand_bytes[0]),
        AbsoluteX => format!("${:02X}{:02X},X", operand_bytes[1], operand_bytes[0]),
        AbsoluteY => format!("${:02X}{:02X},Y", operand_bytes[1], operand_bytes[0]),
        Indirect => format!("(${:02X}{:02X})", operand_bytes[1], operand_bytes[0]),
        IndexedIndirectX => format!("(${:02X},X)", operand_bytes[0]),
        IndirectIndexedY => format!("(${:02X}),Y", operand_bytes[0]),
    }
}

//! The assembler (C3): turns lines of `MNEMONIC[ OPERAND]` source text into
//! their machine-code bytes, using the pattern matcher (C2) against the
//! canonical instruction table (C1) to resolve addressing mode.
//!
//! Grounded on the original `asm_utils.cpp` callers (match + stringToInt
//! driving opcode emission) and the teacher's decoder/table split, rather
//! than the teacher's own never-wired `assembler/` sub-crate (which reads a
//! hardcoded file path and never calls into the CPU's own table).

use crate::error::EmulatorError;
use crate::isa::{Mnemonic, INSTRUCTION_TABLE};
use crate::pattern::{extract_number, matches};

/// Assembles every line in `lines`, concatenating each instruction's bytes
/// in order. Fails fast on the first unresolvable line.
pub fn assemble(lines: &[&str]) -> Result<Vec<u8>, EmulatorError> {
    let mut out = Vec::new();
    for line in lines {
        assemble_line(line, &mut out)?;
    }
    Ok(out)
}

/// Assembles a single line, appending its bytes to `out`.
pub fn assemble_line(line: &str, out: &mut Vec<u8>) -> Result<(), EmulatorError> {
    let (mnemonic_text, operand_text) = split_mnemonic_operand(line);

    let mnemonic = Mnemonic::from_str(mnemonic_text)
        .ok_or_else(|| EmulatorError::UnknownMnemonic(mnemonic_text.to_string()))?;

    let candidates = INSTRUCTION_TABLE.modes_for(mnemonic);
    let (mode, opcode) = candidates
        .iter()
        .find(|(mode, _)| matches(mode.pattern(), operand_text))
        .ok_or_else(|| EmulatorError::NoMatchingAddressingMode {
            mnemonic: mnemonic_text.to_string(),
            operand: operand_text.to_string(),
        })?;

    out.push(*opcode);
    let value = extract_number(operand_text);
    match mode.operand_len() {
        0 => {}
        1 => out.push(value as u8),
        2 => {
            out.push(value as u8); // low byte first
            out.push((value >> 8) as u8);
        }
        n => unreachable!("addressing mode with operand length {n}"),
    }
    Ok(())
}

/// Splits on the first whitespace run; a line with no operand (`BRK`) gets
/// an empty operand string, matching the empty-pattern modes.
fn split_mnemonic_operand(line: &str) -> (&str, &str) {
    let line = line.trim();
    match line.split_once(char::is_whitespace) {
        Some((mnemonic, rest)) => (mnemonic, rest.trim_start()),
        None => (line, ""),
    }
}

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::addressing_mode::{AddressingMode, MemoryAction};
use super::mnemonic::Mnemonic;

/// One row of the declarative opcode list: the single source of truth the
/// CPU dispatch table, the assembler, and the disassembler are all built
/// from. Mirrors the `(opcode, mnemonic, addressing-mode, memory-action)`
/// tuple list described in the design notes, rather than the
/// template/member-function-pointer composition of the original.
#[derive(Debug, Clone, Copy)]
pub struct OpEntry {
    pub opcode: u8,
    pub mnemonic: Mnemonic,
    pub mode: AddressingMode,
    pub action: MemoryAction,
}

/// Canonical 6502 opcode table: every documented (opcode, mnemonic,
/// addressing-mode) triple. Deliberately *not* derived from the teacher's
/// source table, which carries several transcription errors (duplicated
/// `IZX`/`IZY` opcodes on a handful of entries) — this is the textbook
/// table, checked opcode-by-opcode.
#[rustfmt::skip]
const ENTRIES: &[OpEntry] = {
    use AddressingMode::*;
    use MemoryAction::{Load, Store};
    use Mnemonic::*;
    macro_rules! e {
        ($op:expr, $mn:ident, $mode:ident, $act:ident) => {
            OpEntry { opcode: $op, mnemonic: $mn, mode: $mode, action: $act }
        };
    }
    &[
        // ADC
        e!(0x69, ADC, Immediate, Load), e!(0x65, ADC, ZeroPage, Load), e!(0x75, ADC, ZeroPageX, Load),
        e!(0x6D, ADC, Absolute, Load), e!(0x7D, ADC, AbsoluteX, Load), e!(0x79, ADC, AbsoluteY, Load),
        e!(0x61, ADC, IndexedIndirectX, Load), e!(0x71, ADC, IndirectIndexedY, Load),
        // AND
        e!(0x29, AND, Immediate, Load), e!(0x25, AND, ZeroPage, Load), e!(0x35, AND, ZeroPageX, Load),
        e!(0x2D, AND, Absolute, Load), e!(0x3D, AND, AbsoluteX, Load), e!(0x39, AND, AbsoluteY, Load),
        e!(0x21, AND, IndexedIndirectX, Load), e!(0x31, AND, IndirectIndexedY, Load),
        // ASL
        e!(0x0A, ASL, Accumulator, Store), e!(0x06, ASL, ZeroPage, Store), e!(0x16, ASL, ZeroPageX, Store),
        e!(0x0E, ASL, Absolute, Store), e!(0x1E, ASL, AbsoluteX, Store),
        // Branches
        e!(0x90, BCC, Relative, Load), e!(0xB0, BCS, Relative, Load), e!(0xF0, BEQ, Relative, Load),
        e!(0x30, BMI, Relative, Load), e!(0xD0, BNE, Relative, Load), e!(0x10, BPL, Relative, Load),
        e!(0x50, BVC, Relative, Load), e!(0x70, BVS, Relative, Load),
        // BIT
        e!(0x24, BIT, ZeroPage, Load), e!(0x2C, BIT, Absolute, Load),
        // BRK
        e!(0x00, BRK, Implicit, Load),
        // flag ops
        e!(0x18, CLC, Implicit, Load), e!(0xD8, CLD, Implicit, Load), e!(0x58, CLI, Implicit, Load),
        e!(0xB8, CLV, Implicit, Load), e!(0x38, SEC, Implicit, Load), e!(0xF8, SED, Implicit, Load),
        e!(0x78, SEI, Implicit, Load),
        // CMP
        e!(0xC9, CMP, Immediate, Load), e!(0xC5, CMP, ZeroPage, Load), e!(0xD5, CMP, ZeroPageX, Load),
        e!(0xCD, CMP, Absolute, Load), e!(0xDD, CMP, AbsoluteX, Load), e!(0xD9, CMP, AbsoluteY, Load),
        e!(0xC1, CMP, IndexedIndirectX, Load), e!(0xD1, CMP, IndirectIndexedY, Load),
        // CPX / CPY
        e!(0xE0, CPX, Immediate, Load), e!(0xE4, CPX, ZeroPage, Load), e!(0xEC, CPX, Absolute, Load),
        e!(0xC0, CPY, Immediate, Load), e!(0xC4, CPY, ZeroPage, Load), e!(0xCC, CPY, Absolute, Load),
        // DEC / DEX / DEY
        e!(0xC6, DEC, ZeroPage, Store), e!(0xD6, DEC, ZeroPageX, Store), e!(0xCE, DEC, Absolute, Store),
        e!(0xDE, DEC, AbsoluteX, Store), e!(0xCA, DEX, Implicit, Load), e!(0x88, DEY, Implicit, Load),
        // EOR
        e!(0x49, EOR, Immediate, Load), e!(0x45, EOR, ZeroPage, Load), e!(0x55, EOR, ZeroPageX, Load),
        e!(0x4D, EOR, Absolute, Load), e!(0x5D, EOR, AbsoluteX, Load), e!(0x59, EOR, AbsoluteY, Load),
        e!(0x41, EOR, IndexedIndirectX, Load), e!(0x51, EOR, IndirectIndexedY, Load),
        // INC / INX / INY
        e!(0xE6, INC, ZeroPage, Store), e!(0xF6, INC, ZeroPageX, Store), e!(0xEE, INC, Absolute, Store),
        e!(0xFE, INC, AbsoluteX, Store), e!(0xE8, INX, Implicit, Load), e!(0xC8, INY, Implicit, Load),
        // JMP / JSR
        e!(0x4C, JMP, Absolute, Store), e!(0x6C, JMP, Indirect, Store), e!(0x20, JSR, Absolute, Store),
        // LDA
        e!(0xA9, LDA, Immediate, Load), e!(0xA5, LDA, ZeroPage, Load), e!(0xB5, LDA, ZeroPageX, Load),
        e!(0xAD, LDA, Absolute, Load), e!(0xBD, LDA, AbsoluteX, Load), e!(0xB9, LDA, AbsoluteY, Load),
        e!(0xA1, LDA, IndexedIndirectX, Load), e!(0xB1, LDA, IndirectIndexedY, Load),
        // LDX
        e!(0xA2, LDX, Immediate, Load), e!(0xA6, LDX, ZeroPage, Load), e!(0xB6, LDX, ZeroPageY, Load),
        e!(0xAE, LDX, Absolute, Load), e!(0xBE, LDX, AbsoluteY, Load),
        // LDY
        e!(0xA0, LDY, Immediate, Load), e!(0xA4, LDY, ZeroPage, Load), e!(0xB4, LDY, ZeroPageX, Load),
        e!(0xAC, LDY, Absolute, Load), e!(0xBC, LDY, AbsoluteX, Load),
        // LSR
        e!(0x4A, LSR, Accumulator, Store), e!(0x46, LSR, ZeroPage, Store), e!(0x56, LSR, ZeroPageX, Store),
        e!(0x4E, LSR, Absolute, Store), e!(0x5E, LSR, AbsoluteX, Store),
        // NOP
        e!(0xEA, NOP, Implicit, Load),
        // ORA
        e!(0x09, ORA, Immediate, Load), e!(0x05, ORA, ZeroPage, Load), e!(0x15, ORA, ZeroPageX, Load),
        e!(0x0D, ORA, Absolute, Load), e!(0x1D, ORA, AbsoluteX, Load), e!(0x19, ORA, AbsoluteY, Load),
        e!(0x01, ORA, IndexedIndirectX, Load), e!(0x11, ORA, IndirectIndexedY, Load),
        // stack
        e!(0x48, PHA, Implicit, Load), e!(0x08, PHP, Implicit, Load), e!(0x68, PLA, Implicit, Load),
        e!(0x28, PLP, Implicit, Load),
        // ROL
        e!(0x2A, ROL, Accumulator, Store), e!(0x26, ROL, ZeroPage, Store), e!(0x36, ROL, ZeroPageX, Store),
        e!(0x2E, ROL, Absolute, Store), e!(0x3E, ROL, AbsoluteX, Store),
        // ROR
        e!(0x6A, ROR, Accumulator, Store), e!(0x66, ROR, ZeroPage, Store), e!(0x76, ROR, ZeroPageX, Store),
        e!(0x6E, ROR, Absolute, Store), e!(0x7E, ROR, AbsoluteX, Store),
        // RTI / RTS
        e!(0x40, RTI, Implicit, Load), e!(0x60, RTS, Implicit, Load),
        // SBC
        e!(0xE9, SBC, Immediate, Load), e!(0xE5, SBC, ZeroPage, Load), e!(0xF5, SBC, ZeroPageX, Load),
        e!(0xED, SBC, Absolute, Load), e!(0xFD, SBC, AbsoluteX, Load), e!(0xF9, SBC, AbsoluteY, Load),
        e!(0xE1, SBC, IndexedIndirectX, Load), e!(0xF1, SBC, IndirectIndexedY, Load),
        // STA
        e!(0x85, STA, ZeroPage, Store), e!(0x95, STA, ZeroPageX, Store), e!(0x8D, STA, Absolute, Store),
        e!(0x9D, STA, AbsoluteX, Store), e!(0x99, STA, AbsoluteY, Store), e!(0x81, STA, IndexedIndirectX, Store),
        e!(0x91, STA, IndirectIndexedY, Store),
        // STX / STY
        e!(0x86, STX, ZeroPage, Store), e!(0x96, STX, ZeroPageY, Store), e!(0x8E, STX, Absolute, Store),
        e!(0x84, STY, ZeroPage, Store), e!(0x94, STY, ZeroPageX, Store), e!(0x8C, STY, Absolute, Store),
        // transfers
        e!(0xAA, TAX, Implicit, Load), e!(0xA8, TAY, Implicit, Load), e!(0xBA, TSX, Implicit, Load),
        e!(0x8A, TXA, Implicit, Load), e!(0x9A, TXS, Implicit, Load), e!(0x98, TYA, Implicit, Load),
    ]
};

/// Base cycle count for an addressing mode, independent of instruction.
/// `JMP`/`JSR` absolute override this (handled by the caller).
const fn base_cycles(mode: AddressingMode, action: MemoryAction) -> u8 {
    use AddressingMode::*;
    use MemoryAction::*;
    match (mode, action) {
        (Implicit, _) | (Accumulator, _) => 2,
        (Immediate, _) => 2,
        (ZeroPage, _) => 3,
        (ZeroPageX, _) | (ZeroPageY, _) => 4,
        (Absolute, _) => 4,
        (AbsoluteX, Load) | (AbsoluteY, Load) => 4,
        (AbsoluteX, Store) | (AbsoluteY, Store) => 5,
        (Indirect, _) => 5,
        (IndexedIndirectX, _) => 6,
        (IndirectIndexedY, Load) => 5,
        (IndirectIndexedY, Store) => 6,
        (Relative, _) => 2,
    }
}

/// Total-cycle overrides for the handful of opcodes whose real cost isn't
/// the per-addressing-mode model: `JMP`/`JSR` absolute (3/6, per the
/// spec's addressing-mode table) and `BRK`/`RTI`/`RTS` (7/6/6, whose real
/// cost is their push/pop and vector-fetch work rather than their nominal
/// `Implicit` mode's base 2 — see `cycle_table.hpp` in the grounding
/// source). Shared by [`cycle_range`] (the static informational table) and
/// [`crate::cpu::dispatch::Cpu::run_cycle`] (the actual execution total),
/// so the two can never drift apart.
pub const fn fixed_cycle_override(mnemonic: Mnemonic, mode: AddressingMode) -> Option<u8> {
    use AddressingMode::*;
    use Mnemonic::*;
    match (mnemonic, mode) {
        (JMP, Absolute) => Some(3),
        (JSR, _) => Some(6),
        (BRK, _) => Some(7),
        (RTI, _) => Some(6),
        (RTS, _) => Some(6),
        _ => None,
    }
}

/// `(min_cycles, max_cycles)` for an opcode, the latter reflecting the
/// worst-case page-cross or branch-taken penalty. Derived from the same
/// per-addressing-mode model the dispatch loop uses (see
/// [`crate::cpu::addressing`]), so it can never drift from what execution
/// actually counts.
const fn cycle_range(entry: &OpEntry) -> (u8, u8) {
    use AddressingMode::*;
    if let Some(fixed) = fixed_cycle_override(entry.mnemonic, entry.mode) {
        return (fixed, fixed);
    }
    let base = base_cycles(entry.mode, entry.action);
    match entry.mode {
        AbsoluteX | AbsoluteY | IndirectIndexedY => (base, base + 1),
        Relative => (base, base + 2),
        _ => (base, base),
    }
}

/// The canonical, immutable instruction table: `by_name` maps a mnemonic to
/// every `(addressing-mode, opcode)` pair it supports, in the canonical
/// order used for assembler pattern matching; `by_opcode` is the inverse,
/// one entry per assigned opcode byte.
pub struct InstructionTable {
    by_name: HashMap<Mnemonic, Vec<(AddressingMode, u8)>>,
    by_opcode: [Option<OpEntry>; 256],
    cycle_table: [(u8, u8); 256],
}

impl InstructionTable {
    fn build() -> Self {
        let mut by_name: HashMap<Mnemonic, Vec<(AddressingMode, u8)>> = HashMap::new();
        let mut by_opcode: [Option<OpEntry>; 256] = [None; 256];
        let mut cycle_table = [(0u8, 0u8); 256];

        for entry in ENTRIES {
            by_name
                .entry(entry.mnemonic)
                .or_default()
                .push((entry.mode, entry.opcode));
            by_opcode[entry.opcode as usize] = Some(*entry);
            cycle_table[entry.opcode as usize] = cycle_range(entry);
        }

        InstructionTable {
            by_name,
            by_opcode,
            cycle_table,
        }
    }

    /// Addressing-mode/opcode pairs for a mnemonic, in canonical lookup
    /// order (the order `ENTRIES` lists them in, which also matches the
    /// operand-pattern table in the external interface section).
    pub fn modes_for(&self, mnemonic: Mnemonic) -> &[(AddressingMode, u8)] {
        self.by_name
            .get(&mnemonic)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn lookup_opcode(&self, opcode: u8) -> Option<OpEntry> {
        self.by_opcode[opcode as usize]
    }

    pub fn cycle_bounds(&self, opcode: u8) -> (u8, u8) {
        self.cycle_table[opcode as usize]
    }
}

/// Process-wide immutable instruction table, built once and shared by the
/// CPU dispatch loop, the assembler, and the disassembler.
pub static INSTRUCTION_TABLE: Lazy<InstructionTable> = Lazy::new(InstructionTable::build);

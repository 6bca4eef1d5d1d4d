//! The dispatch loop (C9): a single opcode fetch, a lookup in the 256-entry
//! table built from the declarative opcode list (C1), and a call into the
//! addressing-mode evaluator (C7) and operation (C8) it names.
//!
//! Grounded on the teacher's `Cpu::execute_instruction`, generalized from
//! its direct opcode-to-match-arm dispatch into table-driven lookup plus
//! the shared C7/C8 machinery, so the assembler and disassembler can reuse
//! the exact same table instead of a second hand-written one.

use log::{debug, error};

use crate::cpu::addressing::evaluate;
use crate::cpu::ops::execute;
use crate::error::EmulatorError;
use crate::isa::{fixed_cycle_override, INSTRUCTION_TABLE};
use crate::memory::Memory;
use crate::registers::Registers;

/// The 6502 execution core: a register file plus the fetch/decode/dispatch
/// loop. Does not own its backing memory — each [`Cpu::run_cycle`] call
/// takes the [`Memory`] implementation to drive, matching §5's "the memory
/// interface is not expected to block" and keeping the core agnostic to
/// whether it's driven by a [`crate::memory::SimpleRam`] test double or a
/// full [`crate::nes_bus::NesBus`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Cpu {
    pub regs: Registers,
}

impl Cpu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.regs.reset();
    }

    /// Runs exactly one instruction to completion and returns the cycle
    /// count it consumed. An opcode byte with no table entry is a fatal
    /// [`EmulatorError::IllegalOpcode`] — emulation halts, per §7.
    pub fn run_cycle(&mut self, mem: &mut dyn Memory) -> Result<u8, EmulatorError> {
        let opcode = mem.load(self.regs.PC);
        let entry = INSTRUCTION_TABLE
            .lookup_opcode(opcode)
            .ok_or_else(|| {
                error!("illegal opcode {:#04X} at PC={:#06X}", opcode, self.regs.PC);
                EmulatorError::IllegalOpcode(opcode)
            })?;

        debug!(
            "{:#06X}: {:#04X} {:?} ({:?})",
            self.regs.PC, opcode, entry.mnemonic, entry.mode
        );

        let (operand, addressing_cycles) = evaluate(entry.mode, entry.action, &mut self.regs, mem);
        let operation_cycles = execute(entry.mnemonic, &mut self.regs, mem, operand);
        self.regs.PC = self.regs.PC.wrapping_add(1);

        // JMP/JSR absolute and BRK/RTI/RTS don't follow the per-addressing-
        // mode cycle model (see `fixed_cycle_override`); everything else is
        // the evaluator's base cycles plus whatever delta the operation adds
        // (branch-taken/page-cross penalties).
        let total = fixed_cycle_override(entry.mnemonic, entry.mode)
            .unwrap_or(addressing_cycles + operation_cycles);

        Ok(total)
    }
}

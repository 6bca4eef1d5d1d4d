//! Addressing-mode evaluators (C7): for each mode, fetch the operand bytes
//! following the opcode via [`Memory`], compute either a loaded data byte or
//! an effective address, and return the base cycle count (including any
//! page-crossing penalty known at fetch time).
//!
//! Grounded on the original `addressing_modes.hpp` template family —
//! generalized to one `evaluate` match instead of one struct per mode,
//! since [`AddressingMode`] is already a closed enum.
//!
//! PC bookkeeping: on entry, `regs.PC` points at the opcode byte just
//! fetched by the dispatch loop. Each evaluator reads its operand bytes at
//! `PC+1`, `PC+2`, ... and advances `PC` by exactly `mode.operand_len()`
//! (not past the opcode itself — the dispatch loop's final post-increment
//! does that), per §4.3/§4.5.

use crate::isa::{AddressingMode, MemoryAction};
use crate::memory::Memory;
use crate::registers::Registers;

/// What an evaluator hands the operation: a pre-loaded byte, an effective
/// address, a raw signed branch displacement, or nothing at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Implied,
    Accumulator,
    Value(u8),
    Address(u16),
    Relative(i8),
}

fn fetch_u8(regs: &mut Registers, mem: &mut dyn Memory) -> u8 {
    let addr = regs.PC.wrapping_add(1);
    let byte = mem.load(addr);
    regs.PC = addr;
    byte
}

fn fetch_u16(regs: &mut Registers, mem: &mut dyn Memory) -> u16 {
    let lo = fetch_u8(regs, mem) as u16;
    let hi = fetch_u8(regs, mem) as u16;
    (hi << 8) | lo
}

fn page_crossed(base: u16, eff: u16) -> bool {
    (base & 0xFF00) != (eff & 0xFF00)
}

/// Evaluates `mode`, reading/advancing through `regs`/`mem`, and returns the
/// resulting [`Operand`] plus the cycle count contributed by addressing
/// (base cycles plus any penalty already knowable at fetch time — a
/// branch's taken/page-cross penalty is not known here and is added by the
/// operation itself).
pub fn evaluate(
    mode: AddressingMode,
    action: MemoryAction,
    regs: &mut Registers,
    mem: &mut dyn Memory,
) -> (Operand, u8) {
    use AddressingMode::*;
    use MemoryAction::*;

    match mode {
        Implicit => (Operand::Implied, 2),
        Accumulator => (Operand::Accumulator, 2),
        Immediate => {
            let v = fetch_u8(regs, mem);
            (Operand::Value(v), 2)
        }
        ZeroPage => {
            let addr = fetch_u8(regs, mem) as u16;
            (finish(addr, action, mem), 3)
        }
        ZeroPageX => {
            let base = fetch_u8(regs, mem);
            let addr = base.wrapping_add(regs.X) as u16;
            (finish(addr, action, mem), 4)
        }
        ZeroPageY => {
            let base = fetch_u8(regs, mem);
            let addr = base.wrapping_add(regs.Y) as u16;
            (finish(addr, action, mem), 4)
        }
        Relative => {
            let offset = fetch_u8(regs, mem) as i8;
            (Operand::Relative(offset), 2)
        }
        Absolute => {
            let addr = fetch_u16(regs, mem);
            (finish(addr, action, mem), 4)
        }
        AbsoluteX => {
            let base = fetch_u16(regs, mem);
            let addr = base.wrapping_add(regs.X as u16);
            index_finish(base, addr, action, mem)
        }
        AbsoluteY => {
            let base = fetch_u16(regs, mem);
            let addr = base.wrapping_add(regs.Y as u16);
            index_finish(base, addr, action, mem)
        }
        Indirect => {
            let ptr = fetch_u16(regs, mem);
            let lo = mem.load(ptr) as u16;
            let hi = mem.load(ptr.wrapping_add(1)) as u16;
            let addr = (hi << 8) | lo;
            (Operand::Address(addr), 5)
        }
        IndexedIndirectX => {
            let zp = fetch_u8(regs, mem);
            let ptr = zp.wrapping_add(regs.X);
            let lo = mem.load(ptr as u16) as u16;
            let hi = mem.load(ptr.wrapping_add(1) as u16) as u16;
            let addr = (hi << 8) | lo;
            (finish(addr, action, mem), 6)
        }
        IndirectIndexedY => {
            let zp = fetch_u8(regs, mem);
            let lo = mem.load(zp as u16) as u16;
            let hi = mem.load(zp.wrapping_add(1) as u16) as u16;
            let base = (hi << 8) | lo;
            let addr = base.wrapping_add(regs.Y as u16);
            match action {
                Load => {
                    let cycles = 5 + if page_crossed(base, addr) { 1 } else { 0 };
                    (Operand::Value(mem.load(addr)), cycles)
                }
                Store => (Operand::Address(addr), 6),
            }
        }
    }
}

fn finish(addr: u16, action: MemoryAction, mem: &mut dyn Memory) -> Operand {
    match action {
        MemoryAction::Load => Operand::Value(mem.load(addr)),
        MemoryAction::Store => Operand::Address(addr),
    }
}

fn index_finish(base: u16, addr: u16, action: MemoryAction, mem: &mut dyn Memory) -> (Operand, u8) {
    match action {
        MemoryAction::Load => {
            let cycles = 4 + if page_crossed(base, addr) { 1 } else { 0 };
            (Operand::Value(mem.load(addr)), cycles)
        }
        MemoryAction::Store => (Operand::Address(addr), 5),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::SimpleRam;

    fn setup() -> (Registers, SimpleRam) {
        (Registers::default(), SimpleRam::new())
    }

    #[test]
    fn immediate_reads_next_byte_and_advances_pc_by_one() {
        let (mut regs, mut ram) = setup();
        ram.store(1, 0x42);
        let (op, cycles) = evaluate(AddressingMode::Immediate, MemoryAction::Load, &mut regs, &mut ram);
        assert_eq!(op, Operand::Value(0x42));
        assert_eq!(regs.PC, 1);
        assert_eq!(cycles, 2);
    }

    #[test]
    fn zero_page_x_wraps_within_page() {
        let (mut regs, mut ram) = setup();
        regs.X = 0xFF;
        ram.store(1, 0x80);
        ram.store(0x7F, 0x99);
        let (op, cycles) = evaluate(AddressingMode::ZeroPageX, MemoryAction::Load, &mut regs, &mut ram);
        assert_eq!(op, Operand::Value(0x99));
        assert_eq!(cycles, 4);
    }

    #[test]
    fn absolute_x_load_adds_penalty_on_page_cross() {
        let (mut regs, mut ram) = setup();
        regs.X = 0xFF;
        ram.store(1, 0x01);
        ram.store(2, 0x02); // base = 0x0201
        let (_, cycles) = evaluate(AddressingMode::AbsoluteX, MemoryAction::Load, &mut regs, &mut ram);
        assert_eq!(cycles, 5); // 4 + 1 page-cross
    }

    #[test]
    fn absolute_x_store_never_pays_page_cross_penalty() {
        let (mut regs, mut ram) = setup();
        regs.X = 0xFF;
        ram.store(1, 0x01);
        ram.store(2, 0x02);
        let (op, cycles) = evaluate(AddressingMode::AbsoluteX, MemoryAction::Store, &mut regs, &mut ram);
        assert_eq!(op, Operand::Address(0x0300));
        assert_eq!(cycles, 5);
    }

    #[test]
    fn indexed_indirect_x_reads_pointer_from_zero_page() {
        let (mut regs, mut ram) = setup();
        regs.X = 4;
        ram.store(1, 0x20);
        ram.store(0x24, 0x74);
        ram.store(0x25, 0x20);
        ram.store(0x2074, 0xAB);
        let (op, cycles) = evaluate(AddressingMode::IndexedIndirectX, MemoryAction::Load, &mut regs, &mut ram);
        assert_eq!(op, Operand::Value(0xAB));
        assert_eq!(cycles, 6);
    }

    #[test]
    fn indirect_indexed_y_penalizes_only_on_crossing() {
        let (mut regs, mut ram) = setup();
        regs.Y = 0x10;
        ram.store(1, 0x86);
        ram.store(0x86, 0xF0);
        ram.store(0x87, 0x02); // base = 0x02F0, +0x10 = 0x0300: crosses
        ram.store(0x0300, 0x55);
        let (op, cycles) = evaluate(AddressingMode::IndirectIndexedY, MemoryAction::Load, &mut regs, &mut ram);
        assert_eq!(op, Operand::Value(0x55));
        assert_eq!(cycles, 6);
    }

    #[test]
    fn relative_fetches_raw_signed_displacement() {
        let (mut regs, mut ram) = setup();
        ram.store(1, 0xFE); // -2
        let (op, _) = evaluate(AddressingMode::Relative, MemoryAction::Load, &mut regs, &mut ram);
        assert_eq!(op, Operand::Relative(-2));
    }
}

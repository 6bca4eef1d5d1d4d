//! Operation implementations (C8): the ~56 documented 6502 operations.
//! Each takes the [`Operand`] its addressing-mode evaluator produced and
//! mutates [`Registers`]/[`Memory`], returning the additive cycle delta
//! described in §4.4 (zero for nearly everything; branches and nothing
//! else add to it here, since JMP/JSR/BRK/RTI/RTS already carry their
//! total in the static cycle table rather than a runtime delta).
//!
//! Grounded on the teacher's `cpu.rs::execute_instruction` match arms,
//! generalized from its ad-hoc per-opcode flag twiddling to the uniform
//! `Operand`-driven model C7 hands it.

use crate::cpu::addressing::Operand;
use crate::isa::Mnemonic;
use crate::memory::Memory;
use crate::registers::{Registers, StatusFlag};

/// Address of the BRK/IRQ vector.
pub const IRQ_BRK_VECTOR: u16 = 0xFFFE;

fn push(regs: &mut Registers, mem: &mut dyn Memory, value: u8) {
    mem.store(regs.stack_addr(), value);
    regs.push_sp();
}

fn pop(regs: &mut Registers, mem: &mut dyn Memory) -> u8 {
    regs.pop_sp();
    mem.load(regs.stack_addr())
}

/// `ADC`'s arithmetic, reused by `SBC` as `adc(regs, !m)` per §4.4.
fn adc(regs: &mut Registers, m: u8) {
    let a = regs.A;
    let c = regs.P.get(StatusFlag::CARRY) as u16;
    let sum = a as u16 + m as u16 + c;
    let result = sum as u8;
    regs.P.set(StatusFlag::CARRY, sum > 0xFF);
    let overflow = (a ^ result) & (m ^ result) & 0x80 != 0;
    regs.P.set(StatusFlag::OVERFLOW, overflow);
    regs.A = result;
    regs.P.set_zn(result);
}

fn compare(regs: &mut Registers, reg: u8, m: u8) {
    let result = reg.wrapping_sub(m);
    regs.P.set(StatusFlag::CARRY, reg >= m);
    regs.P.set(StatusFlag::ZERO, reg == m);
    regs.P.set(StatusFlag::NEGATIVE, result & 0x80 != 0);
}

fn value_of(operand: Operand) -> u8 {
    match operand {
        Operand::Value(v) => v,
        _ => panic!("operation expected a loaded value, got {:?}", operand),
    }
}

fn address_of(operand: Operand) -> u16 {
    match operand {
        Operand::Address(a) => a,
        _ => panic!("operation expected an effective address, got {:?}", operand),
    }
}

/// Loads, modifies, and writes back `addr` via `f`, for `ASL`/`LSR`/`ROL`/
/// `ROR`/`INC`/`DEC` acting on memory (all classified `MemoryAction::Store`
/// per [`crate::isa::MemoryAction`]'s doc comment).
fn read_modify_write(regs: &mut Registers, mem: &mut dyn Memory, addr: u16, f: impl FnOnce(&mut Registers, u8) -> u8) {
    let before = mem.load(addr);
    let after = f(regs, before);
    mem.store(addr, after);
}

fn asl(regs: &mut Registers, value: u8) -> u8 {
    regs.P.set(StatusFlag::CARRY, value & 0x80 != 0);
    let result = value << 1;
    regs.P.set_zn(result);
    result
}

fn lsr(regs: &mut Registers, value: u8) -> u8 {
    regs.P.set(StatusFlag::CARRY, value & 0x01 != 0);
    let result = value >> 1;
    regs.P.set_zn(result);
    result
}

fn rol(regs: &mut Registers, value: u8) -> u8 {
    let old_c = regs.P.get(StatusFlag::CARRY) as u8;
    regs.P.set(StatusFlag::CARRY, value & 0x80 != 0);
    let result = (value << 1) | old_c;
    regs.P.set_zn(result);
    result
}

fn ror(regs: &mut Registers, value: u8) -> u8 {
    let old_c = regs.P.get(StatusFlag::CARRY) as u8;
    regs.P.set(StatusFlag::CARRY, value & 0x01 != 0);
    let result = (value >> 1) | (old_c << 7);
    regs.P.set_zn(result);
    result
}

/// Executes `mnemonic` against `operand`, mutating `regs`/`mem` in place,
/// and returns the additive cycle delta beyond what the addressing-mode
/// evaluator already counted.
pub fn execute(mnemonic: Mnemonic, regs: &mut Registers, mem: &mut dyn Memory, operand: Operand) -> u8 {
    use Mnemonic::*;

    match mnemonic {
        LDA => {
            regs.A = value_of(operand);
            regs.P.set_zn(regs.A);
            0
        }
        LDX => {
            regs.X = value_of(operand);
            regs.P.set_zn(regs.X);
            0
        }
        LDY => {
            regs.Y = value_of(operand);
            regs.P.set_zn(regs.Y);
            0
        }
        STA => {
            mem.store(address_of(operand), regs.A);
            0
        }
        STX => {
            mem.store(address_of(operand), regs.X);
            0
        }
        STY => {
            mem.store(address_of(operand), regs.Y);
            0
        }
        ADC => {
            adc(regs, value_of(operand));
            0
        }
        SBC => {
            adc(regs, !value_of(operand));
            0
        }
        AND => {
            regs.A &= value_of(operand);
            regs.P.set_zn(regs.A);
            0
        }
        ORA => {
            regs.A |= value_of(operand);
            regs.P.set_zn(regs.A);
            0
        }
        EOR => {
            regs.A ^= value_of(operand);
            regs.P.set_zn(regs.A);
            0
        }
        BIT => {
            let m = value_of(operand);
            regs.P.set(StatusFlag::ZERO, regs.A & m == 0);
            regs.P.set(StatusFlag::NEGATIVE, m & 0x80 != 0);
            regs.P.set(StatusFlag::OVERFLOW, m & 0x40 != 0);
            0
        }
        CMP => {
            let a = regs.A;
            compare(regs, a, value_of(operand));
            0
        }
        CPX => {
            let x = regs.X;
            compare(regs, x, value_of(operand));
            0
        }
        CPY => {
            let y = regs.Y;
            compare(regs, y, value_of(operand));
            0
        }
        INC => {
            let addr = address_of(operand);
            read_modify_write(regs, mem, addr, |regs, v| {
                let r = v.wrapping_add(1);
                regs.P.set_zn(r);
                r
            });
            0
        }
        DEC => {
            let addr = address_of(operand);
            read_modify_write(regs, mem, addr, |regs, v| {
                let r = v.wrapping_sub(1);
                regs.P.set_zn(r);
                r
            });
            0
        }
        INX => {
            regs.X = regs.X.wrapping_add(1);
            regs.P.set_zn(regs.X);
            0
        }
        INY => {
            regs.Y = regs.Y.wrapping_add(1);
            regs.P.set_zn(regs.Y);
            0
        }
        DEX => {
            regs.X = regs.X.wrapping_sub(1);
            regs.P.set_zn(regs.X);
            0
        }
        DEY => {
            regs.Y = regs.Y.wrapping_sub(1);
            regs.P.set_zn(regs.Y);
            0
        }
        ASL => match operand {
            Operand::Accumulator => {
                let a = regs.A;
                regs.A = asl(regs, a);
                0
            }
            _ => {
                let addr = address_of(operand);
                read_modify_write(regs, mem, addr, asl);
                0
            }
        },
        LSR => match operand {
            Operand::Accumulator => {
                let a = regs.A;
                regs.A = lsr(regs, a);
                0
            }
            _ => {
                let addr = address_of(operand);
                read_modify_write(regs, mem, addr, lsr);
                0
            }
        },
        ROL => match operand {
            Operand::Accumulator => {
                let a = regs.A;
                regs.A = rol(regs, a);
                0
            }
            _ => {
                let addr = address_of(operand);
                read_modify_write(regs, mem, addr, rol);
                0
            }
        },
        ROR => match operand {
            Operand::Accumulator => {
                let a = regs.A;
                regs.A = ror(regs, a);
                0
            }
            _ => {
                let addr = address_of(operand);
                read_modify_write(regs, mem, addr, ror);
                0
            }
        },
        BCC | BCS | BEQ | BMI | BNE | BPL | BVC | BVS => {
            let taken = match mnemonic {
                BCC => !regs.P.get(StatusFlag::CARRY),
                BCS => regs.P.get(StatusFlag::CARRY),
                BEQ => regs.P.get(StatusFlag::ZERO),
                BMI => regs.P.get(StatusFlag::NEGATIVE),
                BNE => !regs.P.get(StatusFlag::ZERO),
                BPL => !regs.P.get(StatusFlag::NEGATIVE),
                BVC => !regs.P.get(StatusFlag::OVERFLOW),
                BVS => regs.P.get(StatusFlag::OVERFLOW),
                _ => unreachable!(),
            };
            if !taken {
                return 0;
            }
            let offset = match operand {
                Operand::Relative(o) => o,
                _ => panic!("branch expected Operand::Relative"),
            };
            // `regs.PC` already sits past the 1-byte operand; the pending
            // dispatch-loop post-increment will land it on the next
            // instruction, so that address (not the current one) is the
            // base a branch displaces from.
            let next_instruction = regs.PC.wrapping_add(1);
            let target = next_instruction.wrapping_add(offset as i16 as u16);
            regs.PC = target.wrapping_sub(1);
            let page_crossed = (next_instruction & 0xFF00) != (target & 0xFF00);
            1 + if page_crossed { 1 } else { 0 }
        }
        TAX => {
            regs.X = regs.A;
            regs.P.set_zn(regs.X);
            0
        }
        TAY => {
            regs.Y = regs.A;
            regs.P.set_zn(regs.Y);
            0
        }
        TSX => {
            regs.X = regs.SP;
            regs.P.set_zn(regs.X);
            0
        }
        TXA => {
            regs.A = regs.X;
            regs.P.set_zn(regs.A);
            0
        }
        TXS => {
            regs.SP = regs.X;
            0
        }
        TYA => {
            regs.A = regs.Y;
            regs.P.set_zn(regs.A);
            0
        }
        PHA => {
            let a = regs.A;
            push(regs, mem, a);
            0
        }
        PHP => {
            let byte = regs.P.to_byte_for_push();
            push(regs, mem, byte);
            0
        }
        PLA => {
            regs.A = pop(regs, mem);
            regs.P.set_zn(regs.A);
            0
        }
        PLP => {
            let byte = pop(regs, mem);
            regs.P.restore_from_byte(byte);
            0
        }
        JMP => {
            regs.PC = address_of(operand).wrapping_sub(1);
            0
        }
        JSR => {
            let target = address_of(operand);
            // `regs.PC` is already the address of JSR's last operand byte
            // (the evaluator advanced it by the 2-byte operand length),
            // which is exactly the return address the real hardware pushes.
            let return_addr = regs.PC;
            push(regs, mem, (return_addr >> 8) as u8);
            push(regs, mem, return_addr as u8);
            regs.PC = target.wrapping_sub(1);
            0
        }
        RTS => {
            let lo = pop(regs, mem) as u16;
            let hi = pop(regs, mem) as u16;
            regs.PC = (hi << 8) | lo;
            0
        }
        RTI => {
            let status = pop(regs, mem);
            regs.P.restore_from_byte(status);
            let lo = pop(regs, mem) as u16;
            let hi = pop(regs, mem) as u16;
            regs.PC = ((hi << 8) | lo).wrapping_sub(1);
            0
        }
        BRK => {
            regs.PC = regs.PC.wrapping_add(1);
            push(regs, mem, (regs.PC >> 8) as u8);
            push(regs, mem, regs.PC as u8);
            let status = regs.P.to_byte_for_push() | (1 << StatusFlag::BREAK as u8);
            push(regs, mem, status);
            regs.P.set(StatusFlag::INTERRUPT_DISABLE, true);
            let target = mem.load_u16(IRQ_BRK_VECTOR);
            regs.PC = target.wrapping_sub(1);
            0
        }
        NOP => 0,
        CLC => {
            regs.P.set(StatusFlag::CARRY, false);
            0
        }
        SEC => {
            regs.P.set(StatusFlag::CARRY, true);
            0
        }
        CLD => {
            regs.P.set(StatusFlag::DECIMAL, false);
            0
        }
        SED => {
            regs.P.set(StatusFlag::DECIMAL, true);
            0
        }
        CLI => {
            regs.P.set(StatusFlag::INTERRUPT_DISABLE, false);
            0
        }
        SEI => {
            regs.P.set(StatusFlag::INTERRUPT_DISABLE, true);
            0
        }
        CLV => {
            regs.P.set(StatusFlag::OVERFLOW, false);
            0
        }
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
    fn adc_sets_carry_and_overflow_on_signed_overflow() {
        let (mut regs, mut mem) = setup();
        regs.A = 0x7F;
        execute(Mnemonic::ADC, &mut regs, &mut mem, Operand::Value(0x01));
        assert_eq!(regs.A, 0x80);
        assert!(regs.P.get(StatusFlag::OVERFLOW));
        assert!(!regs.P.get(StatusFlag::CARRY));
    }

    #[test]
    fn sbc_chain_matches_the_documented_borrow_scenario() {
        let (mut regs, mut mem) = setup();
        regs.P.set(StatusFlag::CARRY, true);
        execute(Mnemonic::ADC, &mut regs, &mut mem, Operand::Value(0x10));
        execute(Mnemonic::SBC, &mut regs, &mut mem, Operand::Value(0x01));
        execute(Mnemonic::SBC, &mut regs, &mut mem, Operand::Value(0x0E));
        assert_eq!(regs.A, 0x01);
        assert!(regs.P.get(StatusFlag::CARRY));
    }

    #[test]
    fn pha_then_pla_round_trips_a_and_sp() {
        let (mut regs, mut mem) = setup();
        regs.A = 0x42;
        regs.SP = 0xFD;
        let sp_before = regs.SP;
        execute(Mnemonic::PHA, &mut regs, &mut mem, Operand::Implied);
        regs.A = 0;
        execute(Mnemonic::PLA, &mut regs, &mut mem, Operand::Implied);
        assert_eq!(regs.A, 0x42);
        assert_eq!(regs.SP, sp_before);
    }

    #[test]
    fn php_then_plp_preserves_every_flag_but_break() {
        let (mut regs, mut mem) = setup();
        regs.P.set(StatusFlag::CARRY, true);
        regs.P.set(StatusFlag::NEGATIVE, true);
        regs.P.set(StatusFlag::DECIMAL, true);
        let before = regs.P;
        execute(Mnemonic::PHP, &mut regs, &mut mem, Operand::Implied);
        regs.P = Default::default();
        execute(Mnemonic::PLP, &mut regs, &mut mem, Operand::Implied);
        assert_eq!(regs.P.get(StatusFlag::CARRY), before.get(StatusFlag::CARRY));
        assert_eq!(regs.P.get(StatusFlag::NEGATIVE), before.get(StatusFlag::NEGATIVE));
        assert_eq!(regs.P.get(StatusFlag::DECIMAL), before.get(StatusFlag::DECIMAL));
    }

    #[test]
    fn branch_not_taken_returns_zero_delta() {
        let (mut regs, mut mem) = setup();
        let cycles = execute(Mnemonic::BEQ, &mut regs, &mut mem, Operand::Relative(-1));
        assert_eq!(cycles, 0);
    }

    #[test]
    fn branch_taken_crossing_a_page_costs_two_extra_cycles() {
        let (mut regs, mut mem) = setup();
        regs.PC = 0x00FD;
        regs.P.set(StatusFlag::ZERO, true);
        let cycles = execute(Mnemonic::BEQ, &mut regs, &mut mem, Operand::Relative(5));
        assert_eq!(cycles, 2);
    }

    #[test]
    fn asl_accumulator_sets_carry_from_old_bit_seven() {
        let (mut regs, mut mem) = setup();
        regs.A = 0x80;
        execute(Mnemonic::ASL, &mut regs, &mut mem, Operand::Accumulator);
        assert_eq!(regs.A, 0);
        assert!(regs.P.get(StatusFlag::CARRY));
        assert!(regs.P.get(StatusFlag::ZERO));
    }

    #[test]
    fn inc_memory_wraps_modulo_256() {
        let (mut regs, mut mem) = setup();
        mem.store(0x10, 0xFF);
        execute(Mnemonic::INC, &mut regs, &mut mem, Operand::Address(0x10));
        assert_eq!(mem.load(0x10), 0);
        assert!(regs.P.get(StatusFlag::ZERO));
    }
}

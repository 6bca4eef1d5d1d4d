//! End-to-end scenarios from the component design's testable-properties
//! list: literal inputs paired with their expected outputs, covering
//! assembly, disassembly, a short execution chain, arithmetic borrow, flag
//! operations, and iNES header parsing.
//!
//! Kept separate from the inline `#[cfg(test)]` unit tests per module,
//! mirroring `quigleyj97-deFeNEStrate`'s `tests/nestest.rs` convention of
//! one integration-test file per behavioral suite.

use mos6502_toolchain::assemble::assemble;
use mos6502_toolchain::disassemble::disassemble_one;
use mos6502_toolchain::ines::{INesRom, Mirroring};
use mos6502_toolchain::memory::{Memory, SimpleRam};
use mos6502_toolchain::registers::StatusFlag;
use mos6502_toolchain::Cpu;

#[test]
fn scenario_1_assemble_adc_immediate() {
    assert_eq!(assemble(&["ADC #12"]).unwrap(), vec![0x69, 0x12]);
}

#[test]
fn scenario_2_assemble_adc_absolute_and_indexed_indirect() {
    assert_eq!(assemble(&["ADC $1234"]).unwrap(), vec![0x6D, 0x34, 0x12]);
    assert_eq!(assemble(&["ADC ($FA,X)"]).unwrap(), vec![0x61, 0xFA]);
}

#[test]
fn scenario_3_disassemble_adc_immediate_and_absolute() {
    assert_eq!(disassemble_one(&[0x69, 0x02]).unwrap().text, "ADC #02");
    assert_eq!(disassemble_one(&[0x6D, 0xAB, 0xCD]).unwrap().text, "ADC $CDAB");
}

#[test]
fn scenario_4_lda_chain_produces_the_documented_x_values() {
    let mut cpu = Cpu::new();
    let mut mem = SimpleRam::new();
    mem.load_bytes(0, &[0x15, 0x11, 0x12, 0x13]);
    let program = assemble(&[
        "LDX $00",
        "LDX $02",
        "LDX $00,Y",
        "LDX $0003",
        "LDX $0001,Y",
    ])
    .unwrap();
    mem.load_bytes(4, &program);
    cpu.regs.PC = 4;
    cpu.regs.Y = 0;

    let mut observed = Vec::new();
    cpu.run_cycle(&mut mem).unwrap();
    observed.push(cpu.regs.X);
    cpu.run_cycle(&mut mem).unwrap();
    observed.push(cpu.regs.X);
    cpu.regs.Y = 1;
    cpu.run_cycle(&mut mem).unwrap();
    observed.push(cpu.regs.X);
    cpu.run_cycle(&mut mem).unwrap();
    observed.push(cpu.regs.X);
    cpu.regs.Y = 2;
    cpu.run_cycle(&mut mem).unwrap();
    observed.push(cpu.regs.X);

    assert_eq!(observed, vec![0x15, 0x12, 0x11, 0x13, 0x13]);
}

#[test]
fn scenario_5_sbc_borrow_chain_from_reset() {
    let mut cpu = Cpu::new();
    cpu.reset();
    let mut mem = SimpleRam::new();
    let program = assemble(&["ADC #10", "SBC #01", "SBC #0E"]).unwrap();
    mem.load_bytes(0, &program);

    for _ in 0..3 {
        cpu.run_cycle(&mut mem).unwrap();
    }

    assert_eq!(cpu.regs.A, 0x00);
    assert!(cpu.regs.P.get(StatusFlag::CARRY));
}

#[test]
fn scenario_6_flag_ops_touch_only_the_named_flag() {
    let mut cpu = Cpu::new();
    cpu.reset();
    let mut mem = SimpleRam::new();
    let program = assemble(&["SEC", "SED", "SEI", "CLC", "CLI", "CLD"]).unwrap();
    mem.load_bytes(0, &program);

    cpu.run_cycle(&mut mem).unwrap();
    assert!(cpu.regs.P.get(StatusFlag::CARRY));

    cpu.run_cycle(&mut mem).unwrap();
    assert!(cpu.regs.P.get(StatusFlag::DECIMAL));

    cpu.run_cycle(&mut mem).unwrap();
    assert!(cpu.regs.P.get(StatusFlag::INTERRUPT_DISABLE));

    cpu.run_cycle(&mut mem).unwrap();
    assert!(!cpu.regs.P.get(StatusFlag::CARRY));

    cpu.run_cycle(&mut mem).unwrap();
    assert!(!cpu.regs.P.get(StatusFlag::INTERRUPT_DISABLE));

    cpu.run_cycle(&mut mem).unwrap();
    assert!(!cpu.regs.P.get(StatusFlag::DECIMAL));

    assert!(!cpu.regs.P.get(StatusFlag::ZERO));
    assert!(!cpu.regs.P.get(StatusFlag::OVERFLOW));
    assert!(!cpu.regs.P.get(StatusFlag::NEGATIVE));
}

#[test]
fn scenario_7_ines_header_parses_mapper_zero_vertical_mirroring() {
    let mut bytes = vec![0u8; 16];
    bytes[0..4].copy_from_slice(b"NES\x1A");
    bytes[4] = 2; // PRG ROM: 2 * 16 KiB = 32 KiB
    bytes[5] = 1; // CHR ROM: 1 * 8 KiB = 8 KiB
    bytes[6] = 0x01; // vertical mirroring, no trainer, mapper low nibble 0
    bytes.extend(vec![0u8; 2 * 16384 + 8192]);

    let rom = INesRom::parse(&bytes).unwrap();

    assert_eq!(rom.mapper_number(), 0);
    assert_eq!(rom.prg_rom().len(), 32 * 1024);
    assert_eq!(rom.chr_rom().len(), 8 * 1024);
    assert_eq!(rom.mirroring(), Mirroring::Vertical);
    assert!(rom.trainer().is_empty());
}

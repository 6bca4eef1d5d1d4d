//! A cycle-counting emulator and toolchain for the MOS 6502 microprocessor:
//! a fetch/decode/dispatch execution core, a pattern-driven assembler and
//! disassembler sharing one instruction table, and an iNES cartridge
//! loader plus minimal NES memory map wiring a ROM into the processor's
//! address space.
//!
//! No binary target and no PPU/APU/render/controller modules: those are a
//! consumer's concern, not this crate's (§1, "out of scope: external
//! collaborators").

pub mod assemble;
pub mod cpu;
pub mod disassemble;
pub mod error;
pub mod ines;
pub mod isa;
pub mod mapper;
pub mod memory;
pub mod nes_bus;
pub mod pattern;
pub mod registers;

pub use assemble::assemble;
pub use cpu::Cpu;
pub use disassemble::{disassemble_all, disassemble_one};
pub use error::EmulatorError;
pub use ines::INesRom;
pub use memory::Memory;
pub use nes_bus::NesBus;
pub use registers::Registers;

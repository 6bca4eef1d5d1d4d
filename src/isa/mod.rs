//! The instruction table (C1): the canonical mapping between mnemonics,
//! addressing modes, and opcode bytes. This is the single source of truth
//! the CPU dispatch table, the assembler, and the disassembler are all
//! built from.

mod addressing_mode;
mod mnemonic;
mod table;

pub use addressing_mode::{AddressingMode, MemoryAction};
pub use mnemonic::Mnemonic;
pub use table::{fixed_cycle_override, InstructionTable, OpEntry, INSTRUCTION_TABLE};

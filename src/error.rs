use thiserror::Error;

/// Every fallible operation this crate exposes funnels through this type.
///
/// Matches the error kinds enumerated in the design: the assembler,
/// disassembler, and iNES loader surface these to the caller rather than
/// attempting recovery; the CPU core does not recover from `IllegalOpcode`
/// either, it just returns the error and leaves emulation halted.
#[derive(Debug, Error)]
pub enum EmulatorError {
    #[error("unknown mnemonic: {0}")]
    UnknownMnemonic(String),

    #[error("no addressing mode of `{mnemonic}` matches operand `{operand}`")]
    NoMatchingAddressingMode { mnemonic: String, operand: String },

    #[error("illegal opcode: {0:#04X}")]
    IllegalOpcode(u8),

    #[error("invalid iNES image: {0}")]
    InvalidINes(String),

    #[error("ROM I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

use std::fmt;

/// All documented 6502 operations. Illegal/undocumented opcodes are not
/// modelled (see Non-goals).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum Mnemonic {
    ADC,
    AND,
    ASL,
    BCC,
    BCS,
    BEQ,
    BIT,
    BMI,
    BNE,
    BPL,
    BRK,
    BVC,
    BVS,
    CLC,
    CLD,
    CLI,
    CLV,
    CMP,
    CPX,
    CPY,
    DEC,
    DEX,
    DEY,
    EOR,
    INC,
    INX,
    INY,
    JMP,
    JSR,
    LDA,
    LDX,
    LDY,
    LSR,
    NOP,
    ORA,
    PHA,
    PHP,
    PLA,
    PLP,
    ROL,
    ROR,
    RTI,
    RTS,
    SBC,
    SEC,
    SED,
    SEI,
    STA,
    STX,
    STY,
    TAX,
    TAY,
    TSX,
    TXA,
    TXS,
    TYA,
}

impl Mnemonic {
    pub const ALL: [Mnemonic; 56] = {
        use Mnemonic::*;
        [
            ADC, AND, ASL, BCC, BCS, BEQ, BIT, BMI, BNE, BPL, BRK, BVC, BVS, CLC, CLD, CLI, CLV,
            CMP, CPX, CPY, DEC, DEX, DEY, EOR, INC, INX, INY, JMP, JSR, LDA, LDX, LDY, LSR, NOP,
            ORA, PHA, PHP, PLA, PLP, ROL, ROR, RTI, RTS, SBC, SEC, SED, SEI, STA, STX, STY, TAX,
            TAY, TSX, TXA, TXS, TYA,
        ]
    };

    /// Parses a three-letter mnemonic from assembler source text.
    pub fn from_str(s: &str) -> Option<Mnemonic> {
        use Mnemonic::*;
        Some(match s {
            "ADC" => ADC,
            "AND" => AND,
            "ASL" => ASL,
            "BCC" => BCC,
            "BCS" => BCS,
            "BEQ" => BEQ,
            "BIT" => BIT,
            "BMI" => BMI,
            "BNE" => BNE,
            "BPL" => BPL,
            "BRK" => BRK,
            "BVC" => BVC,
            "BVS" => BVS,
            "CLC" => CLC,
            "CLD" => CLD,
            "CLI" => CLI,
            "CLV" => CLV,
            "CMP" => CMP,
            "CPX" => CPX,
            "CPY" => CPY,
            "DEC" => DEC,
            "DEX" => DEX,
            "DEY" => DEY,
            "EOR" => EOR,
            "INC" => INC,
            "INX" => INX,
            "INY" => INY,
            "JMP" => JMP,
            "JSR" => JSR,
            "LDA" => LDA,
            "LDX" => LDX,
            "LDY" => LDY,
            "LSR" => LSR,
            "NOP" => NOP,
            "ORA" => ORA,
            "PHA" => PHA,
            "PHP" => PHP,
            "PLA" => PLA,
            "PLP" => PLP,
            "ROL" => ROL,
            "ROR" => ROR,
            "RTI" => RTI,
            "RTS" => RTS,
            "SBC" => SBC,
            "SEC" => SEC,
            "SED" => SED,
            "SEI" => SEI,
            "STA" => STA,
            "STX" => STX,
            "STY" => STY,
            "TAX" => TAX,
            "TAY" => TAY,
            "TSX" => TSX,
            "TXA" => TXA,
            "TXS" => TXS,
            "TYA" => TYA,
            _ => return None,
        })
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

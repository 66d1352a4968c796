//! Supported mnemonics and their fixed ISA encodings.

use std::fmt::{self, Display};

use crate::Extension;
use crate::parse::{
    OPCODE_BRANCH, OPCODE_JAL, OPCODE_LOAD, OPCODE_LUI, OPCODE_OP, OPCODE_OP_IMM, OPCODE_STORE,
    OPCODE_SYSTEM,
};

/// Rendering class; selects the text template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InstrClass {
    /// `name rd, rs1, rs2`
    RegReg,
    /// `name rd, rs1, imm`
    RegImm,
    /// `name rd, rs1, shamt`
    ShiftImm,
    /// `name rd, imm(rs1)`
    Load,
    /// `name rs2, imm(rs1)`
    Store,
    /// `name rs1, rs2, imm`
    Branch,
    /// `lui rd, imm`
    Upper,
    /// `jal rd, imm`
    Jump,
    /// `ecall`
    Trap,
}

/// Selector values that identify a mnemonic. For shift-immediates `funct7`
/// is the top seven bits of the immediate field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Encoding {
    pub opcode: u8,
    pub funct3: Option<u8>,
    pub funct7: Option<u8>,
}

impl Encoding {
    const fn new(opcode: u8, funct3: Option<u8>, funct7: Option<u8>) -> Self {
        Self {
            opcode,
            funct3,
            funct7,
        }
    }

    /// Smallest word carrying these selectors, all other bits clear.
    #[must_use]
    pub const fn base_word(&self) -> u32 {
        let mut word = self.opcode as u32;
        if let Some(funct3) = self.funct3 {
            word |= (funct3 as u32) << 12;
        }
        if let Some(funct7) = self.funct7 {
            word |= (funct7 as u32) << 25;
        }
        word
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    // OP
    Add,
    Sub,
    Sll,
    Slt,
    Xor,
    Srl,
    Sra,
    Or,
    And,
    Mul,
    Mulh,
    Div,
    Rem,
    // OP-IMM
    Addi,
    Slli,
    Slti,
    Xori,
    Srli,
    Srai,
    Ori,
    Andi,
    // LOAD
    Lb,
    Lh,
    Lw,
    // STORE
    Sb,
    Sh,
    Sw,
    // BRANCH
    Beq,
    Bne,
    Lui,
    Jal,
    Ecall,
}

impl Mnemonic {
    pub const ALL: [Self; 32] = [
        Self::Add,
        Self::Sub,
        Self::Sll,
        Self::Slt,
        Self::Xor,
        Self::Srl,
        Self::Sra,
        Self::Or,
        Self::And,
        Self::Mul,
        Self::Mulh,
        Self::Div,
        Self::Rem,
        Self::Addi,
        Self::Slli,
        Self::Slti,
        Self::Xori,
        Self::Srli,
        Self::Srai,
        Self::Ori,
        Self::Andi,
        Self::Lb,
        Self::Lh,
        Self::Lw,
        Self::Sb,
        Self::Sh,
        Self::Sw,
        Self::Beq,
        Self::Bne,
        Self::Lui,
        Self::Jal,
        Self::Ecall,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Sll => "sll",
            Self::Slt => "slt",
            Self::Xor => "xor",
            Self::Srl => "srl",
            Self::Sra => "sra",
            Self::Or => "or",
            Self::And => "and",
            Self::Mul => "mul",
            Self::Mulh => "mulh",
            Self::Div => "div",
            Self::Rem => "rem",
            Self::Addi => "addi",
            Self::Slli => "slli",
            Self::Slti => "slti",
            Self::Xori => "xori",
            Self::Srli => "srli",
            Self::Srai => "srai",
            Self::Ori => "ori",
            Self::Andi => "andi",
            Self::Lb => "lb",
            Self::Lh => "lh",
            Self::Lw => "lw",
            Self::Sb => "sb",
            Self::Sh => "sh",
            Self::Sw => "sw",
            Self::Beq => "beq",
            Self::Bne => "bne",
            Self::Lui => "lui",
            Self::Jal => "jal",
            Self::Ecall => "ecall",
        }
    }

    #[must_use]
    pub const fn class(self) -> InstrClass {
        match self {
            Self::Add
            | Self::Sub
            | Self::Sll
            | Self::Slt
            | Self::Xor
            | Self::Srl
            | Self::Sra
            | Self::Or
            | Self::And
            | Self::Mul
            | Self::Mulh
            | Self::Div
            | Self::Rem => InstrClass::RegReg,
            Self::Addi | Self::Slti | Self::Xori | Self::Ori | Self::Andi => InstrClass::RegImm,
            Self::Slli | Self::Srli | Self::Srai => InstrClass::ShiftImm,
            Self::Lb | Self::Lh | Self::Lw => InstrClass::Load,
            Self::Sb | Self::Sh | Self::Sw => InstrClass::Store,
            Self::Beq | Self::Bne => InstrClass::Branch,
            Self::Lui => InstrClass::Upper,
            Self::Jal => InstrClass::Jump,
            Self::Ecall => InstrClass::Trap,
        }
    }

    #[must_use]
    pub const fn extension(self) -> Extension {
        match self {
            Self::Mul | Self::Mulh | Self::Div | Self::Rem => Extension::M,
            _ => Extension::I,
        }
    }

    #[must_use]
    pub const fn encoding(self) -> Encoding {
        match self {
            Self::Add => Encoding::new(OPCODE_OP, Some(0x0), Some(0x00)),
            Self::Mul => Encoding::new(OPCODE_OP, Some(0x0), Some(0x01)),
            Self::Sub => Encoding::new(OPCODE_OP, Some(0x0), Some(0x20)),
            Self::Sll => Encoding::new(OPCODE_OP, Some(0x1), Some(0x00)),
            Self::Mulh => Encoding::new(OPCODE_OP, Some(0x1), Some(0x01)),
            Self::Slt => Encoding::new(OPCODE_OP, Some(0x2), Some(0x00)),
            Self::Xor => Encoding::new(OPCODE_OP, Some(0x4), Some(0x00)),
            Self::Div => Encoding::new(OPCODE_OP, Some(0x4), Some(0x01)),
            Self::Srl => Encoding::new(OPCODE_OP, Some(0x5), Some(0x00)),
            Self::Sra => Encoding::new(OPCODE_OP, Some(0x5), Some(0x20)),
            Self::Or => Encoding::new(OPCODE_OP, Some(0x6), Some(0x00)),
            Self::Rem => Encoding::new(OPCODE_OP, Some(0x6), Some(0x01)),
            Self::And => Encoding::new(OPCODE_OP, Some(0x7), Some(0x00)),
            Self::Addi => Encoding::new(OPCODE_OP_IMM, Some(0x0), None),
            Self::Slli => Encoding::new(OPCODE_OP_IMM, Some(0x1), Some(0x00)),
            Self::Slti => Encoding::new(OPCODE_OP_IMM, Some(0x2), None),
            Self::Xori => Encoding::new(OPCODE_OP_IMM, Some(0x4), None),
            Self::Srli => Encoding::new(OPCODE_OP_IMM, Some(0x5), Some(0x00)),
            Self::Srai => Encoding::new(OPCODE_OP_IMM, Some(0x5), Some(0x20)),
            Self::Ori => Encoding::new(OPCODE_OP_IMM, Some(0x6), None),
            Self::Andi => Encoding::new(OPCODE_OP_IMM, Some(0x7), None),
            Self::Lb => Encoding::new(OPCODE_LOAD, Some(0x0), None),
            Self::Lh => Encoding::new(OPCODE_LOAD, Some(0x1), None),
            Self::Lw => Encoding::new(OPCODE_LOAD, Some(0x2), None),
            Self::Sb => Encoding::new(OPCODE_STORE, Some(0x0), None),
            Self::Sh => Encoding::new(OPCODE_STORE, Some(0x1), None),
            Self::Sw => Encoding::new(OPCODE_STORE, Some(0x2), None),
            Self::Beq => Encoding::new(OPCODE_BRANCH, Some(0x0), None),
            Self::Bne => Encoding::new(OPCODE_BRANCH, Some(0x1), None),
            Self::Lui => Encoding::new(OPCODE_LUI, None, None),
            Self::Jal => Encoding::new(OPCODE_JAL, None, None),
            Self::Ecall => Encoding::new(OPCODE_SYSTEM, None, None),
        }
    }
}

impl Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_names_unique() {
        let names: HashSet<_> = Mnemonic::ALL.iter().map(|m| m.name()).collect();
        assert_eq!(names.len(), Mnemonic::ALL.len());
    }

    #[test]
    fn test_encodings_unique() {
        let encodings: HashSet<_> = Mnemonic::ALL.iter().map(|m| m.encoding()).collect();
        assert_eq!(encodings.len(), Mnemonic::ALL.len());
    }

    #[test]
    fn test_extension() {
        let m: Vec<_> = Mnemonic::ALL
            .iter()
            .filter(|m| m.extension() == Extension::M)
            .map(|m| m.name())
            .collect();
        assert_eq!(m, ["mul", "mulh", "div", "rem"]);
    }

    #[test]
    fn test_base_word() {
        assert_eq!(Mnemonic::Sub.encoding().base_word(), 0x4000_0033);
        assert_eq!(Mnemonic::Srai.encoding().base_word(), 0x4000_5013);
        assert_eq!(Mnemonic::Ecall.encoding().base_word(), 0x0000_0073);
    }
}

//! Mnemonic resolver: opcode -> funct3 -> funct7 / shift-type dispatch.

use std::fmt::{self, Display};

use tracing::trace;

use crate::encode::{branch_offset, jump_offset, sign_extend_number, store_offset};
use crate::error::{DecodeError, Result, Selector};
use crate::mnemonic::{InstrClass, Mnemonic};
use crate::parse::{
    Fields, OPCODE_BRANCH, OPCODE_JAL, OPCODE_LOAD, OPCODE_LUI, OPCODE_OP, OPCODE_OP_IMM,
    OPCODE_STORE, OPCODE_SYSTEM, ParsedInstr,
};
use crate::types::RegisterNames;

/// Decoded operand values. Immediates are sign-extended and reassembled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operands {
    Reg { rd: u8, rs1: u8, rs2: u8 },
    Imm { rd: u8, rs1: u8, imm: i32 },
    /// Shift amount is the unsigned low five immediate bits.
    Shift { rd: u8, rs1: u8, shamt: u8 },
    Load { rd: u8, rs1: u8, offset: i32 },
    Store { rs1: u8, rs2: u8, offset: i32 },
    Branch { rs1: u8, rs2: u8, offset: i32 },
    /// Raw 20-bit upper field.
    Upper { rd: u8, imm: u32 },
    Jump { rd: u8, offset: i32 },
    None,
}

impl Operands {
    /// Rendering class these operands belong to.
    #[must_use]
    pub const fn class(self) -> InstrClass {
        match self {
            Self::Reg { .. } => InstrClass::RegReg,
            Self::Imm { .. } => InstrClass::RegImm,
            Self::Shift { .. } => InstrClass::ShiftImm,
            Self::Load { .. } => InstrClass::Load,
            Self::Store { .. } => InstrClass::Store,
            Self::Branch { .. } => InstrClass::Branch,
            Self::Upper { .. } => InstrClass::Upper,
            Self::Jump { .. } => InstrClass::Jump,
            Self::None => InstrClass::Trap,
        }
    }
}

/// Fully resolved instruction, ready to render.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DecodedInstr {
    pub raw: u32,
    pub mnemonic: Mnemonic,
    pub operands: Operands,
}

impl DecodedInstr {
    #[must_use]
    pub const fn new(raw: u32, mnemonic: Mnemonic, operands: Operands) -> Self {
        Self {
            raw,
            mnemonic,
            operands,
        }
    }
}

impl Display for DecodedInstr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::disasm::write_body(f, self, RegisterNames::Numeric)
    }
}

type Resolved = std::result::Result<(Mnemonic, Operands), Selector>;

/// Resolve a parsed instruction to its mnemonic and decoded operands.
///
/// # Errors
///
/// Returns [`DecodeError::UnsupportedEncoding`] naming the first dispatch
/// level with no matching case.
pub fn resolve(instr: &ParsedInstr) -> Result<DecodedInstr> {
    let resolved = match (instr.opcode, instr.fields) {
        (
            OPCODE_OP,
            Fields::R {
                funct3,
                funct7,
                rd,
                rs1,
                rs2,
            },
        ) => op_mnemonic(funct3, funct7).map(|m| (m, Operands::Reg { rd, rs1, rs2 })),
        (
            OPCODE_OP_IMM,
            Fields::I {
                funct3,
                rd,
                rs1,
                imm,
            },
        ) => op_imm(funct3, rd, rs1, imm),
        (
            OPCODE_LOAD,
            Fields::I {
                funct3,
                rd,
                rs1,
                imm,
            },
        ) => load_mnemonic(funct3).map(|m| {
            let offset = sign_extend_number(u32::from(imm), 12);
            (m, Operands::Load { rd, rs1, offset })
        }),
        (
            OPCODE_STORE,
            Fields::S {
                funct3,
                rs1,
                rs2,
                imm5,
                imm7,
            },
        ) => store_mnemonic(funct3).map(|m| {
            let offset = store_offset(imm5, imm7);
            (m, Operands::Store { rs1, rs2, offset })
        }),
        (
            OPCODE_BRANCH,
            Fields::Sb {
                funct3,
                rs1,
                rs2,
                imm5,
                imm7,
            },
        ) => branch_mnemonic(funct3).map(|m| {
            let offset = branch_offset(imm5, imm7);
            (m, Operands::Branch { rs1, rs2, offset })
        }),
        (OPCODE_LUI, Fields::U { rd, imm }) => Ok((Mnemonic::Lui, Operands::Upper { rd, imm })),
        (OPCODE_JAL, Fields::Uj { rd, imm }) => Ok((
            Mnemonic::Jal,
            Operands::Jump {
                rd,
                offset: jump_offset(imm),
            },
        )),
        // Every SYSTEM encoding renders as ecall.
        (OPCODE_SYSTEM, _) => Ok((Mnemonic::Ecall, Operands::None)),
        _ => Err(Selector::Opcode),
    };

    match resolved {
        Ok((mnemonic, operands)) => Ok(DecodedInstr::new(instr.raw, mnemonic, operands)),
        Err(selector) => {
            trace!(raw = format!("{:#010x}", instr.raw), %selector, "unsupported encoding");
            Err(DecodeError::unsupported(instr, selector))
        }
    }
}

const fn op_mnemonic(funct3: u8, funct7: u8) -> std::result::Result<Mnemonic, Selector> {
    let m = match funct3 {
        0x0 => match funct7 {
            0x00 => Mnemonic::Add,
            0x01 => Mnemonic::Mul,
            0x20 => Mnemonic::Sub,
            _ => return Err(Selector::Funct7(funct7)),
        },
        0x1 => match funct7 {
            0x00 => Mnemonic::Sll,
            0x01 => Mnemonic::Mulh,
            _ => return Err(Selector::Funct7(funct7)),
        },
        0x2 => match funct7 {
            0x00 => Mnemonic::Slt,
            _ => return Err(Selector::Funct7(funct7)),
        },
        0x4 => match funct7 {
            0x00 => Mnemonic::Xor,
            0x01 => Mnemonic::Div,
            _ => return Err(Selector::Funct7(funct7)),
        },
        0x5 => match funct7 {
            0x00 => Mnemonic::Srl,
            0x20 => Mnemonic::Sra,
            _ => return Err(Selector::Funct7(funct7)),
        },
        0x6 => match funct7 {
            0x00 => Mnemonic::Or,
            0x01 => Mnemonic::Rem,
            _ => return Err(Selector::Funct7(funct7)),
        },
        0x7 => match funct7 {
            0x00 => Mnemonic::And,
            _ => return Err(Selector::Funct7(funct7)),
        },
        _ => return Err(Selector::Funct3(funct3)),
    };
    Ok(m)
}

fn op_imm(funct3: u8, rd: u8, rs1: u8, imm: u16) -> Resolved {
    // imm[11:5] selects the shift type; imm[4:0] is the shift amount.
    let shift_type = ((imm >> 5) & 0x7F) as u8;
    let shamt = (imm & 0x1F) as u8;
    let shift = |m: Mnemonic| -> Resolved { Ok((m, Operands::Shift { rd, rs1, shamt })) };
    let arith = |m: Mnemonic| -> Resolved {
        let imm = sign_extend_number(u32::from(imm), 12);
        Ok((m, Operands::Imm { rd, rs1, imm }))
    };

    match funct3 {
        0x0 => arith(Mnemonic::Addi),
        0x1 => match shift_type {
            0x00 => shift(Mnemonic::Slli),
            _ => Err(Selector::ShiftType(shift_type)),
        },
        0x2 => arith(Mnemonic::Slti),
        0x4 => arith(Mnemonic::Xori),
        0x5 => match shift_type {
            0x00 => shift(Mnemonic::Srli),
            0x20 => shift(Mnemonic::Srai),
            _ => Err(Selector::ShiftType(shift_type)),
        },
        0x6 => arith(Mnemonic::Ori),
        0x7 => arith(Mnemonic::Andi),
        _ => Err(Selector::Funct3(funct3)),
    }
}

const fn load_mnemonic(funct3: u8) -> std::result::Result<Mnemonic, Selector> {
    match funct3 {
        0x0 => Ok(Mnemonic::Lb),
        0x1 => Ok(Mnemonic::Lh),
        0x2 => Ok(Mnemonic::Lw),
        _ => Err(Selector::Funct3(funct3)),
    }
}

const fn store_mnemonic(funct3: u8) -> std::result::Result<Mnemonic, Selector> {
    match funct3 {
        0x0 => Ok(Mnemonic::Sb),
        0x1 => Ok(Mnemonic::Sh),
        0x2 => Ok(Mnemonic::Sw),
        _ => Err(Selector::Funct3(funct3)),
    }
}

const fn branch_mnemonic(funct3: u8) -> std::result::Result<Mnemonic, Selector> {
    match funct3 {
        0x0 => Ok(Mnemonic::Beq),
        0x1 => Ok(Mnemonic::Bne),
        _ => Err(Selector::Funct3(funct3)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;

    fn resolve_word(word: u32) -> Result<DecodedInstr> {
        resolve(&parse(word))
    }

    fn selector_of(word: u32) -> Selector {
        resolve_word(word).unwrap_err().selector()
    }

    #[test]
    fn test_resolve_op() {
        let instr = resolve_word(0x00A5_8533).unwrap();
        assert_eq!(instr.mnemonic, Mnemonic::Add);
        assert_eq!(
            instr.operands,
            Operands::Reg {
                rd: 10,
                rs1: 11,
                rs2: 10
            }
        );
        assert_eq!(resolve_word(0x02A5_8533).unwrap().mnemonic, Mnemonic::Mul);
        assert_eq!(resolve_word(0x4020_81B3).unwrap().mnemonic, Mnemonic::Sub);
        assert_eq!(resolve_word(0x4020_D1B3).unwrap().mnemonic, Mnemonic::Sra);
    }

    #[test]
    fn test_resolve_op_rejects() {
        // sltu: funct3 3 is not supported
        assert_eq!(selector_of(0x0020_B1B3), Selector::Funct3(3));
        // mulhsu: funct3 2 accepts only funct7 0
        assert_eq!(selector_of(0x0220_A1B3), Selector::Funct7(0x01));
        // funct7 0x20 is sub under funct3 0 but invalid under funct3 1
        assert_eq!(selector_of(0x4020_91B3), Selector::Funct7(0x20));
    }

    #[test]
    fn test_resolve_addi_sign_extends() {
        let instr = resolve_word(0xFFF0_0093).unwrap();
        assert_eq!(instr.mnemonic, Mnemonic::Addi);
        assert_eq!(
            instr.operands,
            Operands::Imm {
                rd: 1,
                rs1: 0,
                imm: -1
            }
        );
    }

    #[test]
    fn test_resolve_shifts() {
        let instr = resolve_word(0x4033_5293).unwrap();
        assert_eq!(instr.mnemonic, Mnemonic::Srai);
        assert_eq!(
            instr.operands,
            Operands::Shift {
                rd: 5,
                rs1: 6,
                shamt: 3
            }
        );
        assert_eq!(resolve_word(0x0033_5293).unwrap().mnemonic, Mnemonic::Srli);
        assert_eq!(resolve_word(0x01F1_1093).unwrap().mnemonic, Mnemonic::Slli);
    }

    #[test]
    fn test_resolve_shift_type_depends_on_funct3() {
        // 0x20 selects srai under funct3 5 but is invalid under funct3 1
        assert_eq!(selector_of(0x4000_1013), Selector::ShiftType(0x20));
        assert_eq!(selector_of(0x0203_5293), Selector::ShiftType(0x01));
        // sltiu
        assert_eq!(selector_of(0x0000_3013), Selector::Funct3(3));
    }

    #[test]
    fn test_resolve_memory() {
        let instr = resolve_word(0xFF81_2503).unwrap();
        assert_eq!(instr.mnemonic, Mnemonic::Lw);
        assert_eq!(
            instr.operands,
            Operands::Load {
                rd: 10,
                rs1: 2,
                offset: -8
            }
        );
        let instr = resolve_word(0xFE51_2E23).unwrap();
        assert_eq!(instr.mnemonic, Mnemonic::Sw);
        assert_eq!(
            instr.operands,
            Operands::Store {
                rs1: 2,
                rs2: 5,
                offset: -4
            }
        );
        // lbu / sd
        assert_eq!(selector_of(0x0000_4083), Selector::Funct3(4));
        assert_eq!(selector_of(0x0000_3023), Selector::Funct3(3));
    }

    #[test]
    fn test_resolve_control_flow() {
        let instr = resolve_word(0xFE20_9EE3).unwrap();
        assert_eq!(instr.mnemonic, Mnemonic::Bne);
        assert_eq!(
            instr.operands,
            Operands::Branch {
                rs1: 1,
                rs2: 2,
                offset: -4
            }
        );
        // blt
        assert_eq!(selector_of(0x0020_C063), Selector::Funct3(4));

        let instr = resolve_word(0xFF9F_F06F).unwrap();
        assert_eq!(instr.operands, Operands::Jump { rd: 0, offset: -8 });
    }

    #[test]
    fn test_resolve_upper_not_sign_extended() {
        let instr = resolve_word(0xFFFF_F2B7).unwrap();
        assert_eq!(instr.mnemonic, Mnemonic::Lui);
        assert_eq!(
            instr.operands,
            Operands::Upper {
                rd: 5,
                imm: 0xF_FFFF
            }
        );
    }

    #[test]
    fn test_resolve_system() {
        assert_eq!(resolve_word(0x0000_0073).unwrap().mnemonic, Mnemonic::Ecall);
        // ebreak shares the opcode and renders the same way
        assert_eq!(resolve_word(0x0010_0073).unwrap().mnemonic, Mnemonic::Ecall);
    }

    #[test]
    fn test_resolve_unknown_opcodes() {
        const SUPPORTED: [u8; 8] = [0x33, 0x13, 0x03, 0x23, 0x63, 0x37, 0x6F, 0x73];
        for opcode in 0..=0x7Fu8 {
            if SUPPORTED.contains(&opcode) {
                continue;
            }
            for high in [0u32, 0xFFFF_FF80, 0x1234_5600] {
                let word = high | u32::from(opcode);
                let err = resolve_word(word).unwrap_err();
                assert_eq!(err.selector(), Selector::Opcode, "{word:#010x}");
                assert_eq!(err.raw(), word);
                assert_eq!(err.opcode(), opcode);
            }
        }
    }

    #[test]
    fn test_every_mnemonic_reachable() {
        for m in Mnemonic::ALL {
            let word = m.encoding().base_word();
            assert_eq!(resolve_word(word).unwrap().mnemonic, m, "{word:#010x}");
        }
    }

    #[test]
    fn test_operands_match_mnemonic_class() {
        for m in Mnemonic::ALL {
            let instr = resolve_word(m.encoding().base_word()).unwrap();
            assert_eq!(instr.operands.class(), m.class(), "{m}");
        }
        assert_eq!(
            resolve_word(0x4033_5293).unwrap().operands.class(),
            InstrClass::ShiftImm
        );
        assert_eq!(
            resolve_word(0x0010_0073).unwrap().operands.class(),
            InstrClass::Trap
        );
    }
}

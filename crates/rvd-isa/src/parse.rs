//! Instruction parser: overlays a raw word onto one of the six RV32 field layouts.

use crate::encode::{
    decode_funct3, decode_funct7, decode_i_field, decode_opcode, decode_rd, decode_rs1,
    decode_rs2, decode_upper_field,
};

// Major opcodes the resolver understands.
pub const OPCODE_OP: u8 = 0x33;
pub const OPCODE_OP_IMM: u8 = 0x13;
pub const OPCODE_LOAD: u8 = 0x03;
pub const OPCODE_STORE: u8 = 0x23;
pub const OPCODE_BRANCH: u8 = 0x63;
pub const OPCODE_LUI: u8 = 0x37;
pub const OPCODE_JAL: u8 = 0x6F;
pub const OPCODE_SYSTEM: u8 = 0x73;

// Standard opcodes that parse with their ISA layout but are not resolved.
pub const OPCODE_AUIPC: u8 = 0x17;
pub const OPCODE_JALR: u8 = 0x67;
pub const OPCODE_MISC_MEM: u8 = 0x0F;

/// Field layout a word is parsed under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Format {
    R,
    I,
    S,
    Sb,
    U,
    Uj,
}

impl Format {
    /// Layout implied by an opcode. Opcodes outside the standard RV32 map use
    /// the R layout, which names every bit of the word.
    #[must_use]
    pub const fn of_opcode(opcode: u8) -> Self {
        match opcode {
            OPCODE_OP_IMM | OPCODE_LOAD | OPCODE_SYSTEM | OPCODE_JALR | OPCODE_MISC_MEM => Self::I,
            OPCODE_STORE => Self::S,
            OPCODE_BRANCH => Self::Sb,
            OPCODE_LUI | OPCODE_AUIPC => Self::U,
            OPCODE_JAL => Self::Uj,
            _ => Self::R,
        }
    }
}

/// Format-specific fields. Immediates hold the raw encoded bit groups;
/// sign extension and reassembly happen in the resolver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Fields {
    /// R-type: register-register ALU ops.
    R {
        funct3: u8,
        funct7: u8,
        rd: u8,
        rs1: u8,
        rs2: u8,
    },
    /// I-type: register-immediate ALU ops, loads, system.
    I {
        funct3: u8,
        rd: u8,
        rs1: u8,
        /// imm[11:0]
        imm: u16,
    },
    /// S-type: stores.
    S {
        funct3: u8,
        rs1: u8,
        rs2: u8,
        /// imm[4:0], word bits [11:7]
        imm5: u8,
        /// imm[11:5], word bits [31:25]
        imm7: u8,
    },
    /// SB-type: conditional branches.
    Sb {
        funct3: u8,
        rs1: u8,
        rs2: u8,
        /// imm[4:1|11], word bits [11:7]
        imm5: u8,
        /// imm[12|10:5], word bits [31:25]
        imm7: u8,
    },
    /// U-type: upper immediate.
    U {
        rd: u8,
        /// imm[31:12]
        imm: u32,
    },
    /// UJ-type: jumps.
    Uj {
        rd: u8,
        /// imm[20|10:1|11|19:12]
        imm: u32,
    },
}

impl Fields {
    #[must_use]
    pub const fn format(&self) -> Format {
        match self {
            Self::R { .. } => Format::R,
            Self::I { .. } => Format::I,
            Self::S { .. } => Format::S,
            Self::Sb { .. } => Format::Sb,
            Self::U { .. } => Format::U,
            Self::Uj { .. } => Format::Uj,
        }
    }

    /// `funct3`, for the layouts that define it.
    #[must_use]
    pub const fn funct3(&self) -> Option<u8> {
        match *self {
            Self::R { funct3, .. }
            | Self::I { funct3, .. }
            | Self::S { funct3, .. }
            | Self::Sb { funct3, .. } => Some(funct3),
            Self::U { .. } | Self::Uj { .. } => None,
        }
    }
}

/// A word parsed under the layout its opcode implies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ParsedInstr {
    /// Raw instruction word.
    pub raw: u32,
    /// Bits [6:0], kept untagged for dispatch.
    pub opcode: u8,
    pub fields: Fields,
}

impl ParsedInstr {
    #[must_use]
    pub const fn format(&self) -> Format {
        self.fields.format()
    }
}

/// Parse a 32-bit instruction word. Total over all inputs.
#[must_use]
pub const fn parse(word: u32) -> ParsedInstr {
    let opcode = decode_opcode(word);
    let rd = decode_rd(word);
    let rs1 = decode_rs1(word);
    let rs2 = decode_rs2(word);
    let funct3 = decode_funct3(word);
    let funct7 = decode_funct7(word);

    let fields = match Format::of_opcode(opcode) {
        Format::R => Fields::R {
            funct3,
            funct7,
            rd,
            rs1,
            rs2,
        },
        Format::I => Fields::I {
            funct3,
            rd,
            rs1,
            imm: decode_i_field(word),
        },
        Format::S => Fields::S {
            funct3,
            rs1,
            rs2,
            imm5: rd,
            imm7: funct7,
        },
        Format::Sb => Fields::Sb {
            funct3,
            rs1,
            rs2,
            imm5: rd,
            imm7: funct7,
        },
        Format::U => Fields::U {
            rd,
            imm: decode_upper_field(word),
        },
        Format::Uj => Fields::Uj {
            rd,
            imm: decode_upper_field(word),
        },
    };

    ParsedInstr {
        raw: word,
        opcode,
        fields,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rtype() {
        let p = parse(0x00A5_8533);
        assert_eq!(p.opcode, OPCODE_OP);
        assert_eq!(
            p.fields,
            Fields::R {
                funct3: 0,
                funct7: 0,
                rd: 10,
                rs1: 11,
                rs2: 10
            }
        );
    }

    #[test]
    fn test_parse_itype_keeps_raw_immediate() {
        // addi x1, x0, -1
        let p = parse(0xFFF0_0093);
        assert_eq!(
            p.fields,
            Fields::I {
                funct3: 0,
                rd: 1,
                rs1: 0,
                imm: 0xFFF
            }
        );
    }

    #[test]
    fn test_parse_store_groups() {
        // sw x5, -4(x2)
        let p = parse(0xFE51_2E23);
        assert_eq!(
            p.fields,
            Fields::S {
                funct3: 2,
                rs1: 2,
                rs2: 5,
                imm5: 0x1C,
                imm7: 0x7F
            }
        );
    }

    #[test]
    fn test_parse_upper_layouts() {
        let p = parse(0x0000_2137);
        assert_eq!(p.fields, Fields::U { rd: 2, imm: 2 });
        let p = parse(0xFF9F_F06F);
        assert_eq!(p.fields, Fields::Uj { rd: 0, imm: 0xFF9FF });
    }

    #[test]
    fn test_format_of_opcode() {
        assert_eq!(Format::of_opcode(OPCODE_OP), Format::R);
        assert_eq!(Format::of_opcode(OPCODE_OP_IMM), Format::I);
        assert_eq!(Format::of_opcode(OPCODE_LOAD), Format::I);
        assert_eq!(Format::of_opcode(OPCODE_STORE), Format::S);
        assert_eq!(Format::of_opcode(OPCODE_BRANCH), Format::Sb);
        assert_eq!(Format::of_opcode(OPCODE_LUI), Format::U);
        assert_eq!(Format::of_opcode(OPCODE_JAL), Format::Uj);
        assert_eq!(Format::of_opcode(OPCODE_SYSTEM), Format::I);
        assert_eq!(Format::of_opcode(OPCODE_AUIPC), Format::U);
        assert_eq!(Format::of_opcode(0x7F), Format::R);
    }

    #[test]
    fn test_parse_is_total() {
        // Seeded xorshift sweep plus the corner words.
        let mut state = 0x2545_F491_u32;
        let mut words = vec![0, u32::MAX, 0x8000_0000, 0x7F];
        for _ in 0..200_000 {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            words.push(state);
        }
        for word in words {
            let p = parse(word);
            assert_eq!(p.raw, word);
            assert_eq!(u32::from(p.opcode), word & 0x7F);
            assert_eq!(p.format(), Format::of_opcode(p.opcode));
        }
    }

    #[test]
    fn test_parse_every_opcode() {
        for opcode in 0..=0x7Fu32 {
            let p = parse(0xFFFF_FF80 | opcode);
            assert_eq!(u32::from(p.opcode), opcode);
            assert_eq!(p.format(), Format::of_opcode(p.opcode));
        }
    }
}

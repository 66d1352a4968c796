//! Text rendering of resolved instructions.

use std::fmt::{self, Write};

use crate::resolve::{DecodedInstr, Operands};
use crate::types::{Reg, RegisterNames};

/// Write one listing record, including the trailing newline.
///
/// # Errors
///
/// Propagates any error from the sink.
pub fn write_instr<W: Write>(
    out: &mut W,
    instr: &DecodedInstr,
    names: RegisterNames,
) -> fmt::Result {
    write_body(out, instr, names)?;
    out.write_char('\n')
}

/// Render one listing record, including the trailing newline.
#[must_use]
pub fn format_instr(instr: &DecodedInstr, names: RegisterNames) -> String {
    format!("{}\n", Record { instr, names })
}

/// Instruction body paired with a register spelling.
struct Record<'a> {
    instr: &'a DecodedInstr,
    names: RegisterNames,
}

impl fmt::Display for Record<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_body(f, self.instr, self.names)
    }
}

pub(crate) fn write_body<W: Write>(
    out: &mut W,
    instr: &DecodedInstr,
    names: RegisterNames,
) -> fmt::Result {
    let name = instr.mnemonic.name();
    let r = |index| Reg::new(index, names);
    match instr.operands {
        Operands::Reg { rd, rs1, rs2 } => {
            write!(out, "{name}\t{}, {}, {}", r(rd), r(rs1), r(rs2))
        }
        Operands::Imm { rd, rs1, imm } => write!(out, "{name}\t{}, {}, {imm}", r(rd), r(rs1)),
        Operands::Shift { rd, rs1, shamt } => {
            write!(out, "{name}\t{}, {}, {shamt}", r(rd), r(rs1))
        }
        Operands::Load { rd, rs1, offset } => {
            write!(out, "{name}\t{}, {offset}({})", r(rd), r(rs1))
        }
        Operands::Store { rs1, rs2, offset } => {
            write!(out, "{name}\t{}, {offset}({})", r(rs2), r(rs1))
        }
        Operands::Branch { rs1, rs2, offset } => {
            write!(out, "{name}\t{}, {}, {offset}", r(rs1), r(rs2))
        }
        Operands::Upper { rd, imm } => write!(out, "{name}\t{}, {imm}", r(rd)),
        Operands::Jump { rd, offset } => write!(out, "{name}\t{}, {offset}", r(rd)),
        Operands::None => out.write_str(name),
    }
}

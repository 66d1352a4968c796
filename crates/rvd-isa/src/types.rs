//! Core types shared by the parser, resolver, and formatter.

use std::fmt::{self, Display};

/// Number of integer registers.
pub const NUM_REGS: usize = 32;

/// Instruction set extension a mnemonic belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Extension {
    /// Base integer set (RV32I).
    I,
    /// Integer multiply/divide.
    M,
}

/// How register operands are spelled in rendered text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RegisterNames {
    /// `x0`..`x31`.
    #[default]
    Numeric,
    /// ABI names (`zero`, `ra`, `sp`, ...).
    Abi,
}

/// Get register ABI name.
#[must_use]
pub const fn reg_name(reg: u8) -> &'static str {
    match reg {
        0 => "zero",
        1 => "ra",
        2 => "sp",
        3 => "gp",
        4 => "tp",
        5 => "t0",
        6 => "t1",
        7 => "t2",
        8 => "s0",
        9 => "s1",
        10 => "a0",
        11 => "a1",
        12 => "a2",
        13 => "a3",
        14 => "a4",
        15 => "a5",
        16 => "a6",
        17 => "a7",
        18 => "s2",
        19 => "s3",
        20 => "s4",
        21 => "s5",
        22 => "s6",
        23 => "s7",
        24 => "s8",
        25 => "s9",
        26 => "s10",
        27 => "s11",
        28 => "t3",
        29 => "t4",
        30 => "t5",
        31 => "t6",
        _ => "??",
    }
}

/// Register operand paired with its spelling, for use in `format!`.
#[derive(Clone, Copy, Debug)]
pub struct Reg {
    pub index: u8,
    pub names: RegisterNames,
}

impl Reg {
    #[must_use]
    pub const fn new(index: u8, names: RegisterNames) -> Self {
        Self { index, names }
    }
}

impl Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.names {
            RegisterNames::Numeric => write!(f, "x{}", self.index),
            RegisterNames::Abi => f.write_str(reg_name(self.index)),
        }
    }
}

//! Decoder error types.

use std::fmt::{self, Display};

use thiserror::Error;

use crate::parse::{ParsedInstr, parse};

/// Dispatch level that found no matching case.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Selector {
    Opcode,
    Funct3(u8),
    Funct7(u8),
    /// Top seven immediate bits of a shift-immediate.
    ShiftType(u8),
}

impl Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Opcode => f.write_str("opcode"),
            Self::Funct3(v) => write!(f, "funct3 {v:#x}"),
            Self::Funct7(v) => write!(f, "funct7 {v:#04x}"),
            Self::ShiftType(v) => write!(f, "shift type {v:#04x}"),
        }
    }
}

/// Decoder errors.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Invalid Instruction: 0x{raw:08x} (opcode {opcode:#04x}, unmatched {selector})")]
    UnsupportedEncoding {
        raw: u32,
        opcode: u8,
        selector: Selector,
    },
}

impl DecodeError {
    pub(crate) const fn unsupported(instr: &ParsedInstr, selector: Selector) -> Self {
        Self::UnsupportedEncoding {
            raw: instr.raw,
            opcode: instr.opcode,
            selector,
        }
    }

    /// The rejected instruction word.
    #[must_use]
    pub const fn raw(&self) -> u32 {
        match *self {
            Self::UnsupportedEncoding { raw, .. } => raw,
        }
    }

    #[must_use]
    pub const fn opcode(&self) -> u8 {
        match *self {
            Self::UnsupportedEncoding { opcode, .. } => opcode,
        }
    }

    #[must_use]
    pub const fn selector(&self) -> Selector {
        match *self {
            Self::UnsupportedEncoding { selector, .. } => selector,
        }
    }

    /// The rejected word re-parsed under its layout.
    #[must_use]
    pub const fn instruction(&self) -> ParsedInstr {
        parse(self.raw())
    }
}

pub type Result<T> = std::result::Result<T, DecodeError>;

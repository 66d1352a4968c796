//! RVD - RISC-V Disassembler
//!
//! Reads RV32IM instruction words from a buffer or file and renders an
//! assembly listing through the `rvd-isa` decoder.
//!
//! # Example
//!
//! ```no_run
//! use rvd::{DisasmConfig, Disassembler, InputFormat};
//!
//! let disassembler = Disassembler::new(DisasmConfig::new().with_input_format(InputFormat::Hex));
//! let stats = disassembler.disassemble_path("program.hex", &mut std::io::stdout())?;
//! eprintln!("{} words", stats.words);
//! # Ok::<(), rvd::Error>(())
//! ```

// Re-export from the decoder crate
pub use rvd_isa::{
    DecodeError, DecodedInstr, InstrClass, Mnemonic, Operands, ParsedInstr, RegisterNames,
    Selector, decode, disassemble, format_instr, parse, resolve, write_instr,
};

mod config;
mod input;
mod listing;

pub use config::*;
pub use input::*;
pub use listing::*;

use thiserror::Error;

/// Disassembler errors.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Decode(#[from] DecodeError),
    #[error("Input length {len} is not a multiple of 4 bytes")]
    TruncatedInput { len: usize },
    #[error("Line {line}: invalid hex word {text:?}")]
    InvalidHexWord { line: usize, text: String },
    #[error("Listing of {words} words from 0x{base:08x} exceeds the 32-bit address space")]
    InvalidAddressRange { base: u32, words: usize },
    #[error("Failed to build decode thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("Formatting error")]
    Fmt(#[from] std::fmt::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

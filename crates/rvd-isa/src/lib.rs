//! RV32IM instruction parser, mnemonic resolver, and formatter.
//!
//! Decoding runs in two stateless stages: [`parse`] overlays a raw word onto
//! the field layout its opcode implies, and [`resolve`] dispatches on the
//! selector fields to pick a mnemonic and decode operand values. The result
//! renders to a single text record via [`write_instr`] or [`format_instr`].

mod disasm;
mod encode;
mod error;
mod mnemonic;
mod parse;
mod resolve;
mod types;

use rayon::prelude::*;

pub use disasm::{format_instr, write_instr};
pub use encode::*;
pub use error::{DecodeError, Result, Selector};
pub use mnemonic::{Encoding, InstrClass, Mnemonic};
pub use parse::*;
pub use resolve::{DecodedInstr, Operands, resolve};
pub use types::*;

/// Decode a single instruction word.
///
/// This is a convenience wrapper around `resolve(&parse(word))`.
///
/// # Errors
///
/// Returns [`DecodeError::UnsupportedEncoding`] if any selector has no match.
pub fn decode(word: u32) -> Result<DecodedInstr> {
    resolve(&parse(word))
}

/// Decode a word and render it with numeric register names.
///
/// # Errors
///
/// Returns [`DecodeError::UnsupportedEncoding`] if any selector has no match.
pub fn disassemble(word: u32) -> Result<String> {
    decode(word).map(|instr| format_instr(&instr, RegisterNames::Numeric))
}

/// Decode many words on the current rayon pool. Output order matches input.
#[must_use]
pub fn decode_all(words: &[u32]) -> Vec<Result<DecodedInstr>> {
    words.par_iter().map(|&word| decode(word)).collect()
}

//! Decode command.

use std::io;

use rvd::{DisasmConfig, Disassembler, InvalidPolicy, RegisterNames};
use tracing::{error, warn};

use crate::cli::{EXIT_FAILURE, EXIT_SUCCESS};

/// Handle the `decode` command. Fails if any word is invalid.
pub fn cmd_decode(words: &[u32], registers: RegisterNames) -> i32 {
    let config = DisasmConfig::new()
        .with_on_invalid(InvalidPolicy::Mark)
        .with_registers(registers)
        .with_jobs(1);

    match Disassembler::new(config).disassemble_words(words, &mut io::stdout().lock()) {
        Ok(stats) if stats.invalid == 0 => EXIT_SUCCESS,
        Ok(stats) => {
            warn!(invalid = stats.invalid, "some words did not decode");
            EXIT_FAILURE
        }
        Err(e) => {
            error!(error = %e, "decode failed");
            EXIT_FAILURE
        }
    }
}

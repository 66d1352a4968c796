//! Disasm command.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use rvd::{DisasmConfig, Disassembler, ListingStats};
use tracing::{error, info};

use crate::cli::{EXIT_FAILURE, EXIT_SUCCESS};
use crate::terminal;

/// Handle the `disasm` command.
pub fn cmd_disasm(input: &Path, output: Option<&Path>, config: DisasmConfig, silent: bool) -> i32 {
    info!(input = %input.display(), format = ?config.input_format, "disassembling");

    let disassembler = Disassembler::new(config);
    let result = match output {
        Some(path) => File::create(path)
            .map_err(rvd::Error::from)
            .and_then(|file| disassembler.disassemble_path(input, &mut BufWriter::new(file))),
        None => disassembler.disassemble_path(input, &mut BufWriter::new(io::stdout().lock())),
    };

    match result {
        Ok(stats) => {
            info!(
                words = stats.words,
                decoded = stats.decoded,
                invalid = stats.invalid,
                "done"
            );
            if !silent {
                report(&stats);
            }
            EXIT_SUCCESS
        }
        Err(e) => {
            error!(error = %e, "disassembly failed");
            if !silent {
                terminal::failure(&e.to_string());
            }
            EXIT_FAILURE
        }
    }
}

fn report(stats: &ListingStats) {
    let message = format!(
        "{} words, {} decoded, {} invalid",
        stats.words, stats.decoded, stats.invalid
    );
    if stats.invalid == 0 {
        terminal::success(&message);
    } else {
        terminal::warning(&message);
    }
}

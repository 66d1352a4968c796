//! Command implementations.

mod decode;
mod disasm;

use rvd::DisasmConfig;

use crate::cli::{Cli, Commands, register_names};

/// Dispatch CLI command to the appropriate handler.
pub fn run_command(cli: &Cli) -> i32 {
    match &cli.command {
        Commands::Disasm {
            input,
            output,
            format,
            on_invalid,
            abi,
            addresses,
            base,
            jobs,
        } => {
            let config = DisasmConfig::new()
                .with_input_format((*format).into())
                .with_on_invalid((*on_invalid).into())
                .with_registers(register_names(*abi))
                .with_addresses(*addresses)
                .with_base_address(*base)
                .with_jobs(*jobs);
            disasm::cmd_disasm(input, output.as_deref(), config, cli.silent)
        }
        Commands::Decode { words, abi } => decode::cmd_decode(words, register_names(*abi)),
    }
}

//! CLI definitions and argument types.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use rvd::{InputFormat, InvalidPolicy, RegisterNames, parse_hex_word};

/// Exit code for success.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code for failure.
pub const EXIT_FAILURE: i32 = 1;

#[derive(Parser)]
#[command(name = "rvd")]
#[command(about = "RISC-V disassembler - renders RV32IM instruction words as assembly text")]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (rvd=debug unless RUST_LOG is set)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output (only show errors)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub silent: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Disassemble a file of instruction words
    Disasm {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Write the listing here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Input encoding
        #[arg(long, value_enum, default_value = "binary")]
        format: InputFormatArg,

        /// What to do with words that do not decode
        #[arg(long, value_enum, default_value = "mark")]
        on_invalid: InvalidPolicyArg,

        /// Use ABI register names (a0, sp, ...) instead of x0..x31
        #[arg(long)]
        abi: bool,

        /// Prefix each line with its address and raw word
        #[arg(long)]
        addresses: bool,

        /// Address of the first word (hex)
        #[arg(long, value_name = "ADDR", default_value = "0", value_parser = parse_hex_arg)]
        base: u32,

        /// Number of decode threads (0 = auto)
        #[arg(short = 'j', long, default_value = "0")]
        jobs: usize,
    },
    /// Decode instruction words given as hex arguments
    Decode {
        /// Instruction words (hex, optional 0x prefix)
        #[arg(value_name = "WORD", required = true, value_parser = parse_hex_arg)]
        words: Vec<u32>,

        /// Use ABI register names (a0, sp, ...) instead of x0..x31
        #[arg(long)]
        abi: bool,
    },
}

fn parse_hex_arg(text: &str) -> Result<u32, String> {
    parse_hex_word(text).ok_or_else(|| format!("invalid hex word '{text}'"))
}

/// Map the `--abi` flag to a register spelling.
pub const fn register_names(abi: bool) -> RegisterNames {
    if abi {
        RegisterNames::Abi
    } else {
        RegisterNames::Numeric
    }
}

// ============================================================================
// Argument types with conversions
// ============================================================================

/// Input encoding.
#[derive(Clone, Copy, Debug, ValueEnum, Default)]
pub enum InputFormatArg {
    /// Raw little-endian 32-bit words
    #[default]
    Binary,
    /// One hex word per line
    Hex,
}

impl From<InputFormatArg> for InputFormat {
    fn from(arg: InputFormatArg) -> Self {
        match arg {
            InputFormatArg::Binary => Self::Binary,
            InputFormatArg::Hex => Self::Hex,
        }
    }
}

/// Invalid-word handling.
#[derive(Clone, Copy, Debug, ValueEnum, Default)]
pub enum InvalidPolicyArg {
    /// Stop at the first invalid word
    Abort,
    /// Leave invalid words out of the listing
    Skip,
    /// Print an error line for invalid words
    #[default]
    Mark,
}

impl From<InvalidPolicyArg> for InvalidPolicy {
    fn from(arg: InvalidPolicyArg) -> Self {
        match arg {
            InvalidPolicyArg::Abort => Self::Abort,
            InvalidPolicyArg::Skip => Self::Skip,
            InvalidPolicyArg::Mark => Self::Mark,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_disasm() {
        let cli = Cli::try_parse_from([
            "rvd",
            "disasm",
            "prog.hex",
            "--format",
            "hex",
            "--on-invalid",
            "abort",
            "--base",
            "0x8000_0000",
            "--addresses",
        ])
        .unwrap();
        let Commands::Disasm {
            format,
            on_invalid,
            base,
            addresses,
            jobs,
            ..
        } = cli.command
        else {
            panic!("expected disasm command");
        };
        assert_eq!(InputFormat::from(format), InputFormat::Hex);
        assert_eq!(InvalidPolicy::from(on_invalid), InvalidPolicy::Abort);
        assert_eq!(base, 0x8000_0000);
        assert!(addresses);
        assert_eq!(jobs, 0);
    }

    #[test]
    fn test_parse_decode_words() {
        let cli = Cli::try_parse_from(["rvd", "decode", "00a58533", "0x73"]).unwrap();
        let Commands::Decode { words, abi } = cli.command else {
            panic!("expected decode command");
        };
        assert_eq!(words, [0x00A5_8533, 0x73]);
        assert!(!abi);
        assert!(Cli::try_parse_from(["rvd", "decode", "zz"]).is_err());
    }
}

//! Disassembly configuration.

use rvd_isa::RegisterNames;

/// Encoding of the input stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputFormat {
    /// Raw little-endian 32-bit words.
    #[default]
    Binary,
    /// One hex word per line; `#` starts a comment.
    Hex,
}

/// What to do with a word that does not decode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InvalidPolicy {
    /// Stop the listing and return the decode error.
    Abort,
    /// Log the word and leave it out of the listing.
    Skip,
    /// Emit the error line in place of the instruction.
    #[default]
    Mark,
}

/// Configuration for a [`Disassembler`](crate::Disassembler).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisasmConfig {
    /// Input stream encoding.
    pub input_format: InputFormat,
    /// Invalid-word handling.
    pub on_invalid: InvalidPolicy,
    /// Register spelling.
    pub registers: RegisterNames,
    /// Prefix each record with its address and raw word.
    pub addresses: bool,
    /// Address of the first word.
    pub base_address: u32,
    /// Number of decode threads (0 = auto-detect based on CPU count).
    pub jobs: usize,
}

impl Default for DisasmConfig {
    fn default() -> Self {
        Self {
            input_format: InputFormat::default(),
            on_invalid: InvalidPolicy::default(),
            registers: RegisterNames::default(),
            addresses: false,
            base_address: 0,
            jobs: 0,
        }
    }
}

impl DisasmConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set input stream encoding.
    #[must_use]
    pub const fn with_input_format(mut self, format: InputFormat) -> Self {
        self.input_format = format;
        self
    }

    /// Set invalid-word handling.
    #[must_use]
    pub const fn with_on_invalid(mut self, policy: InvalidPolicy) -> Self {
        self.on_invalid = policy;
        self
    }

    /// Set register spelling.
    #[must_use]
    pub const fn with_registers(mut self, registers: RegisterNames) -> Self {
        self.registers = registers;
        self
    }

    /// Enable address/raw-word prefixes.
    #[must_use]
    pub const fn with_addresses(mut self, enabled: bool) -> Self {
        self.addresses = enabled;
        self
    }

    /// Set the address of the first word.
    #[must_use]
    pub const fn with_base_address(mut self, base: u32) -> Self {
        self.base_address = base;
        self
    }

    /// Set number of decode threads (0 = auto-detect).
    #[must_use]
    pub const fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }

    /// Thread count after resolving auto-detect.
    #[must_use]
    pub fn effective_jobs(&self) -> usize {
        if self.jobs == 0 {
            num_cpus::get().max(1)
        } else {
            self.jobs
        }
    }
}

//! Listing driver: decodes a word stream and writes one record per word.

use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;

use rvd_isa::{DecodeError, DecodedInstr, decode, decode_all, write_instr};
use tracing::{debug, warn};

use crate::{DisasmConfig, Error, InvalidPolicy, Result, read_words, read_words_from_path};

/// Inputs shorter than this decode on the calling thread.
const PARALLEL_THRESHOLD: usize = 4096;

/// Counters for one listing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListingStats {
    /// Words read from the input.
    pub words: usize,
    /// Words that decoded to an instruction.
    pub decoded: usize,
    /// Words rejected by the decoder (marked or skipped).
    pub invalid: usize,
}

/// Disassembler over a configured input format and invalid-word policy.
#[derive(Clone, Copy, Debug, Default)]
pub struct Disassembler {
    config: DisasmConfig,
}

impl Disassembler {
    /// Create a new disassembler with the given configuration.
    #[must_use]
    pub const fn new(config: DisasmConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &DisasmConfig {
        &self.config
    }

    /// Disassemble a file.
    ///
    /// # Errors
    ///
    /// Fails on unreadable or malformed input, sink errors, or an invalid
    /// word under [`InvalidPolicy::Abort`].
    pub fn disassemble_path<W: Write>(
        &self,
        path: impl AsRef<Path>,
        out: &mut W,
    ) -> Result<ListingStats> {
        let words = read_words_from_path(path, self.config.input_format)?;
        self.disassemble_words(&words, out)
    }

    /// Disassemble an in-memory buffer in the configured input format.
    ///
    /// # Errors
    ///
    /// As [`Self::disassemble_path`].
    pub fn disassemble_bytes<W: Write>(&self, bytes: &[u8], out: &mut W) -> Result<ListingStats> {
        let words = read_words(bytes, self.config.input_format)?;
        self.disassemble_words(&words, out)
    }

    /// Disassemble decoded words. Records are written in input order.
    ///
    /// # Errors
    ///
    /// Fails on sink errors, an address range that wraps, or an invalid word
    /// under [`InvalidPolicy::Abort`]. Records before the invalid word have
    /// already been written when the abort error is returned.
    pub fn disassemble_words<W: Write>(&self, words: &[u32], out: &mut W) -> Result<ListingStats> {
        if self.config.addresses {
            self.check_address_range(words.len())?;
        }

        let results = self.decode_words(words)?;
        let mut stats = ListingStats {
            words: words.len(),
            ..ListingStats::default()
        };
        let mut line = String::with_capacity(64);

        for (index, (&word, result)) in words.iter().zip(results).enumerate() {
            line.clear();
            match result {
                Ok(instr) => {
                    stats.decoded += 1;
                    self.write_record(&mut line, index, word, &instr)?;
                }
                Err(err) => {
                    stats.invalid += 1;
                    match self.config.on_invalid {
                        InvalidPolicy::Abort => {
                            out.flush()?;
                            return Err(err.into());
                        }
                        InvalidPolicy::Skip => {
                            warn!(
                                addr = format!("{:#x}", self.address(index)),
                                error = %err,
                                "skipping invalid instruction"
                            );
                            continue;
                        }
                        InvalidPolicy::Mark => {
                            warn!(
                                addr = format!("{:#x}", self.address(index)),
                                error = %err,
                                "invalid instruction"
                            );
                            self.write_invalid(&mut line, index, word, &err)?;
                        }
                    }
                }
            }
            out.write_all(line.as_bytes())?;
        }

        out.flush()?;
        debug!(
            words = stats.words,
            decoded = stats.decoded,
            invalid = stats.invalid,
            "listing complete"
        );
        Ok(stats)
    }

    fn decode_words(&self, words: &[u32]) -> Result<Vec<rvd_isa::Result<DecodedInstr>>> {
        let jobs = self.config.effective_jobs();
        if jobs <= 1 || words.len() < PARALLEL_THRESHOLD {
            return Ok(words.iter().map(|&word| decode(word)).collect());
        }
        debug!(jobs, words = words.len(), "decoding in parallel");
        let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;
        Ok(pool.install(|| decode_all(words)))
    }

    fn check_address_range(&self, len: usize) -> Result<()> {
        let span = (len.saturating_sub(1) as u64).saturating_mul(4);
        if u64::from(self.config.base_address) + span > u64::from(u32::MAX) {
            return Err(Error::InvalidAddressRange {
                base: self.config.base_address,
                words: len,
            });
        }
        Ok(())
    }

    /// Address of the word at `index`. Checked against overflow before the
    /// listing starts when addresses are rendered.
    #[allow(clippy::cast_possible_truncation)]
    const fn address(&self, index: usize) -> u32 {
        self.config
            .base_address
            .wrapping_add((index as u32).wrapping_mul(4))
    }

    fn write_prefix(&self, line: &mut String, index: usize, word: u32) -> Result<()> {
        if self.config.addresses {
            write!(line, "{:08x}:\t{word:08x}\t", self.address(index))?;
        }
        Ok(())
    }

    fn write_record(
        &self,
        line: &mut String,
        index: usize,
        word: u32,
        instr: &DecodedInstr,
    ) -> Result<()> {
        self.write_prefix(line, index, word)?;
        write_instr(line, instr, self.config.registers)?;
        Ok(())
    }

    fn write_invalid(
        &self,
        line: &mut String,
        index: usize,
        word: u32,
        err: &DecodeError,
    ) -> Result<()> {
        self.write_prefix(line, index, word)?;
        writeln!(line, "{err}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InputFormat;
    use rvd_isa::RegisterNames;

    fn listing(config: DisasmConfig, words: &[u32]) -> (Result<ListingStats>, String) {
        let mut out = Vec::new();
        let result = Disassembler::new(config).disassemble_words(words, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_disassembler_keeps_config() {
        let config = DisasmConfig::new()
            .with_on_invalid(InvalidPolicy::Skip)
            .with_base_address(0x8000_0000);
        let disassembler = Disassembler::new(config);
        assert_eq!(disassembler.config().on_invalid, InvalidPolicy::Skip);
        assert_eq!(disassembler.config().base_address, 0x8000_0000);
    }

    #[test]
    fn test_listing_mark() {
        let words = [0x00A5_8533, 0x0000_007F, 0x0000_0073];
        let (stats, text) = listing(DisasmConfig::new(), &words);
        assert_eq!(
            stats.unwrap(),
            ListingStats {
                words: 3,
                decoded: 2,
                invalid: 1
            }
        );
        assert_eq!(
            text,
            "add\tx10, x11, x10\n\
             Invalid Instruction: 0x0000007f (opcode 0x7f, unmatched opcode)\n\
             ecall\n"
        );
    }

    #[test]
    fn test_listing_skip() {
        let config = DisasmConfig::new().with_on_invalid(InvalidPolicy::Skip);
        let (stats, text) = listing(config, &[0x0000_007F, 0x0000_0073]);
        assert_eq!(stats.unwrap().invalid, 1);
        assert_eq!(text, "ecall\n");
    }

    #[test]
    fn test_listing_abort_keeps_prefix() {
        let config = DisasmConfig::new().with_on_invalid(InvalidPolicy::Abort);
        let (result, text) = listing(config, &[0x0000_0073, 0x4000_1013, 0x0000_0073]);
        match result {
            Err(Error::Decode(err)) => assert_eq!(err.raw(), 0x4000_1013),
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(text, "ecall\n");
    }

    #[test]
    fn test_listing_addresses() {
        let config = DisasmConfig::new()
            .with_addresses(true)
            .with_base_address(0x1000)
            .with_registers(RegisterNames::Abi);
        let (_, text) = listing(config, &[0x00A5_8533, 0x0000_007F]);
        assert_eq!(
            text,
            "00001000:\t00a58533\tadd\ta0, a1, a0\n\
             00001004:\t0000007f\tInvalid Instruction: 0x0000007f (opcode 0x7f, unmatched opcode)\n"
        );
    }

    #[test]
    fn test_listing_address_overflow() {
        let config = DisasmConfig::new()
            .with_addresses(true)
            .with_base_address(0xFFFF_FFFC);
        let (result, _) = listing(config, &[0x73]);
        assert!(result.is_ok());
        let (result, _) = listing(config, &[0x73, 0x73]);
        assert!(matches!(result, Err(Error::InvalidAddressRange { words: 2, .. })));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let words: Vec<u32> = (0..20_000u32).map(|i| i.wrapping_mul(0x9E37_79B9)).collect();
        let (seq, seq_text) = listing(DisasmConfig::new().with_jobs(1), &words);
        let (par, par_text) = listing(DisasmConfig::new().with_jobs(4), &words);
        assert_eq!(seq.unwrap(), par.unwrap());
        assert_eq!(seq_text, par_text);
    }

    #[test]
    fn test_disassemble_bytes_hex() {
        let config = DisasmConfig::new().with_input_format(InputFormat::Hex);
        let mut out = Vec::new();
        let stats = Disassembler::new(config)
            .disassemble_bytes(b"0x02a58533\n", &mut out)
            .unwrap();
        assert_eq!(stats.decoded, 1);
        assert_eq!(out, b"mul\tx10, x11, x10\n");
    }
}

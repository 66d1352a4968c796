//! Instruction word readers.

use std::path::Path;

use tracing::debug;

use crate::{Error, InputFormat, Result};

/// Parse a hex word with optional `0x` prefix and `_` separators.
#[must_use]
pub fn parse_hex_word(text: &str) -> Option<u32> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    let digits: String = digits.chars().filter(|&c| c != '_').collect();
    if digits.is_empty() || digits.len() > 8 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(&digits, 16).ok()
}

/// Split an input buffer into instruction words.
///
/// # Errors
///
/// Returns [`Error::TruncatedInput`] for binary input whose length is not a
/// multiple of 4, or [`Error::InvalidHexWord`] for an unparseable hex line.
pub fn read_words(bytes: &[u8], format: InputFormat) -> Result<Vec<u32>> {
    match format {
        InputFormat::Binary => read_binary(bytes),
        InputFormat::Hex => read_hex(bytes),
    }
}

/// Read a file and split it into instruction words.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read, otherwise as [`read_words`].
pub fn read_words_from_path(path: impl AsRef<Path>, format: InputFormat) -> Result<Vec<u32>> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    debug!(path = %path.display(), bytes = data.len(), ?format, "read input");
    read_words(&data, format)
}

fn read_binary(bytes: &[u8]) -> Result<Vec<u32>> {
    if bytes.len() % 4 != 0 {
        return Err(Error::TruncatedInput { len: bytes.len() });
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

fn read_hex(bytes: &[u8]) -> Result<Vec<u32>> {
    let text = String::from_utf8_lossy(bytes);
    let mut words = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let code = line.split_once('#').map_or(line, |(code, _)| code).trim();
        if code.is_empty() {
            continue;
        }
        let word = parse_hex_word(code).ok_or_else(|| Error::InvalidHexWord {
            line: idx + 1,
            text: code.to_string(),
        })?;
        words.push(word);
    }
    Ok(words)
}

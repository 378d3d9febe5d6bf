use crate::error::{DecodeError, Result};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default byte offset of the first block in a device log
pub const DEFAULT_OFFSET: u64 = 0xC0;

/// Column labels written when no header override is configured
pub const DEFAULT_HEADER_NAMES: [&str; 15] = [
    "Date",
    "Time",
    "Pressure Setpoint/mbar",
    "Actual Pressure/mbar",
    "Temperature Setpoint/°C",
    "Actual Temperature/°C",
    "Power Setpoint/kW",
    "Actual Power/kW",
    "Heater Resistance/mOhm",
    "Heater Voltage/V",
    "Heater Current/A",
    "Millitorr Gauge/Pa",
    "Argon Flow/SLM",
    "Temperature Rise/°C/min",
    "Freon Flow/SLM",
];

/// Text encoding of the exported table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TextEncoding {
    /// Single-byte Windows "ANSI" code page (Windows-1252)
    #[cfg_attr(
        feature = "serde",
        serde(
            rename = "ANSI",
            alias = "ansi",
            alias = "windows-1252",
            alias = "Windows-1252",
            alias = "WINDOWS-1252",
            alias = "cp1252",
            alias = "CP1252"
        )
    )]
    Ansi,
    #[default]
    #[cfg_attr(
        feature = "serde",
        serde(rename = "UTF-8", alias = "utf-8", alias = "utf8", alias = "UTF8")
    )]
    Utf8,
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextEncoding::Ansi => write!(f, "ANSI"),
            TextEncoding::Utf8 => write!(f, "UTF-8"),
        }
    }
}

impl FromStr for TextEncoding {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ansi" | "windows-1252" | "cp1252" => Ok(TextEncoding::Ansi),
            "utf-8" | "utf8" => Ok(TextEncoding::Utf8),
            other => Err(DecodeError::InvalidConfig(format!(
                "unknown text encoding '{other}' (expected ANSI or UTF-8)"
            ))),
        }
    }
}

/// Layout of one device log and the shape of its exported table.
///
/// Supplied whole by the caller for each run; the decoder never mutates it.
/// Block sizes are word counts, one word being four bytes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DecodeConfig {
    /// Byte offset where the first block starts
    pub offset: u64,
    /// Words in the first block, including its leading sentinel word
    pub initial_block_words: usize,
    /// Words in every block after the first
    pub subsequent_block_words: usize,
    /// Positions within a group of the two timestamp words
    pub time_word_indices: (usize, usize),
    /// First position within a group holding a measurement
    pub float_start_index: usize,
    /// Words per group
    pub group_size: usize,
    /// Drop the first word of every group before anything else
    pub skip_first_group_item: bool,
    /// Output column labels, date and time first
    pub header_names: Vec<String>,
    /// Encoding of the written table, `"ANSI"` or `"UTF-8"` in JSON
    pub text_encoding: TextEncoding,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            offset: DEFAULT_OFFSET,
            initial_block_words: 33,
            subsequent_block_words: 32,
            time_word_indices: (0, 1),
            float_start_index: 2,
            group_size: 16,
            skip_first_group_item: true,
            header_names: DEFAULT_HEADER_NAMES.iter().map(|s| s.to_string()).collect(),
            text_encoding: TextEncoding::default(),
        }
    }
}

impl DecodeConfig {
    /// Reject configurations the decoder cannot run with.
    ///
    /// Time indices that fall outside a group are accepted here; the group
    /// extractor substitutes a zero word for them.
    pub fn validate(&self) -> Result<()> {
        if self.group_size < 2 {
            return Err(DecodeError::InvalidConfig(format!(
                "group size must be at least 2, got {}",
                self.group_size
            )));
        }
        // A zero-word subsequent block is accepted: the block reader stops
        // after the first block.
        let (a, b) = self.time_word_indices;
        if a == b {
            return Err(DecodeError::InvalidConfig(format!(
                "time word indices must be two distinct positions, got {a},{b}"
            )));
        }
        if self.header_names.len() < 2 {
            return Err(DecodeError::InvalidConfig(
                "at least two header names (date, time) are required".into(),
            ));
        }
        Ok(())
    }

    /// Parse a JSON config object; absent fields keep their defaults
    #[cfg(feature = "json")]
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: DecodeConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }
}

/// Load a JSON config file
#[cfg(feature = "json")]
pub fn load_config(path: &std::path::Path) -> Result<DecodeConfig> {
    let text = std::fs::read_to_string(path).map_err(|e| DecodeError::from(e).in_file(path))?;
    DecodeConfig::from_json_str(&text).map_err(|e| e.in_file(path))
}

/// Parse comma-separated time word indices such as `"0,1"`.
///
/// Blank entries are ignored; exactly two indices must remain.
pub fn parse_time_indices(text: &str) -> Result<(usize, usize)> {
    let indices = text
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<usize>().map_err(|_| {
                DecodeError::InvalidConfig(format!("time index '{s}' is not a number"))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    match indices.as_slice() {
        [a, b] => Ok((*a, *b)),
        _ => Err(DecodeError::InvalidConfig(format!(
            "time indices need exactly two comma-separated numbers, got {}",
            indices.len()
        ))),
    }
}

/// Parse a hexadecimal byte offset, with or without a `0x` prefix. Empty text is 0.
pub fn parse_offset(text: &str) -> Result<u64> {
    let trimmed = text.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    if digits.is_empty() {
        return Ok(0);
    }
    u64::from_str_radix(digits, 16).map_err(|_| {
        DecodeError::InvalidConfig(format!("offset '{trimmed}' is not a hexadecimal number"))
    })
}

//! Output text conversion utilities
//!
//! Contains measurement formatting and the conversion of generated UTF-8
//! text into the configured output encoding.

use crate::error::{DecodeError, Result};
use crate::types::TextEncoding;
use encoding_rs::{EncoderResult, WINDOWS_1252};

/// Format a measurement for the table.
///
/// Shortest text that reads back to the same value, always with a decimal
/// point for finite values: `20.0`, `1.23`, `-0.5`. Non-finite values are
/// written as `nan`, `inf` and `-inf`.
pub fn format_measurement(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let text = value.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{text}.0")
    }
}

/// Convert UTF-8 text into bytes of the requested encoding.
///
/// Fails with `Encoding` naming the first character the encoding cannot
/// represent; nothing is substituted.
pub fn encode_text(text: &str, encoding: TextEncoding) -> Result<Vec<u8>> {
    match encoding {
        TextEncoding::Utf8 => Ok(text.as_bytes().to_vec()),
        TextEncoding::Ansi => {
            let mut encoder = WINDOWS_1252.new_encoder();
            let mut out = Vec::with_capacity(text.len());
            let mut remaining = text;
            loop {
                let needed = encoder
                    .max_buffer_length_from_utf8_without_replacement(remaining.len())
                    .unwrap_or(remaining.len() * 4);
                out.reserve(needed);
                let (result, read) = encoder.encode_from_utf8_to_vec_without_replacement(
                    remaining,
                    &mut out,
                    true,
                );
                match result {
                    EncoderResult::InputEmpty => return Ok(out),
                    EncoderResult::OutputFull => remaining = &remaining[read..],
                    EncoderResult::Unmappable(c) => {
                        return Err(DecodeError::Encoding(format!(
                            "character '{}' (U+{:04X}) cannot be represented in {}",
                            c,
                            c as u32,
                            WINDOWS_1252.name()
                        )));
                    }
                }
            }
        }
    }
}

//! BCD-style timestamp decoding
//!
//! The device stores each timestamp field as two decimal digits inside a
//! register, so the *hex text* of a word reads as the decimal value:
//! word `0x24050110` renders as `"24050110"`, meaning year 2024, May 1st,
//! 10 o'clock. The digits are read as decimal, never as a hex number.

use crate::error::{DecodeError, Result};
use crate::types::Timestamp;

/// Width of a rendered word
pub const HEX_WORD_LEN: usize = 8;

/// Text substituted for a time word whose index lies outside the group
pub const ZERO_WORD_HEX: &str = "00000000";

/// Render a word as 8 uppercase hex digits
pub fn hex_text(word: u32) -> String {
    format!("{word:08X}")
}

fn digit_pair(hex: &str, start: usize) -> Result<u8> {
    let pair = hex
        .get(start..start + 2)
        .ok_or_else(|| DecodeError::MalformedTimestamp(format!("'{hex}' is too short")))?;
    let bytes = pair.as_bytes();
    if !bytes.iter().all(u8::is_ascii_digit) {
        return Err(DecodeError::MalformedTimestamp(format!(
            "'{pair}' in '{hex}' is not a decimal digit pair"
        )));
    }
    Ok((bytes[0] - b'0') * 10 + (bytes[1] - b'0'))
}

fn check_range(name: &str, value: u8, min: u8, max: u8) -> Result<u8> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(DecodeError::MalformedTimestamp(format!(
            "{name} {value} outside {min}..={max}"
        )))
    }
}

/// Decode `YYMMDDhh` from `date_hex` and `mmss` from the first four digits of `time_hex`
pub fn decode_timestamp(date_hex: &str, time_hex: &str) -> Result<Timestamp> {
    let year = 2000 + u16::from(digit_pair(date_hex, 0)?);
    let month = digit_pair(date_hex, 2)?;
    let day = digit_pair(date_hex, 4)?;
    let hour = digit_pair(date_hex, 6)?;
    let minute = digit_pair(time_hex, 0)?;
    let second = digit_pair(time_hex, 2)?;

    Ok(Timestamp {
        year,
        month: check_range("month", month, 1, 12)?,
        day: check_range("day", day, 1, 31)?,
        hour: check_range("hour", hour, 0, 23)?,
        minute: check_range("minute", minute, 0, 59)?,
        second: check_range("second", second, 0, 59)?,
    })
}

/// Decode a timestamp straight from the two raw words
pub fn decode_timestamp_words(date_word: u32, time_word: u32) -> Result<Timestamp> {
    decode_timestamp(&hex_text(date_word), &hex_text(time_word))
}

/// Build the two words a device would store for `ts`; the inverse of [`decode_timestamp_words`].
///
/// The low half of the time word is left zero.
pub fn encode_timestamp_words(ts: &Timestamp) -> (u32, u32) {
    fn bcd(value: u32) -> u32 {
        ((value / 10) << 4) | (value % 10)
    }
    let yy = u32::from(ts.year.saturating_sub(2000) % 100);
    let date_word = bcd(yy) << 24
        | bcd(u32::from(ts.month)) << 16
        | bcd(u32::from(ts.day)) << 8
        | bcd(u32::from(ts.hour));
    let time_word = bcd(u32::from(ts.minute)) << 24 | bcd(u32::from(ts.second)) << 16;
    (date_word, time_word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_read_as_decimal() {
        let ts = decode_timestamp("24050110", "20300000").unwrap();
        assert_eq!(
            ts,
            Timestamp {
                year: 2024,
                month: 5,
                day: 1,
                hour: 10,
                minute: 20,
                second: 30
            }
        );
    }

    #[test]
    fn test_fifteen_is_not_hex() {
        // "15" must mean 15, not 0x15 = 21
        let ts = decode_timestamp("15121523", "15150000").unwrap();
        assert_eq!(ts.year, 2015);
        assert_eq!(ts.day, 15);
        assert_eq!(ts.minute, 15);
    }

    #[test]
    fn test_hex_letters_are_malformed() {
        assert!(matches!(
            decode_timestamp("240A0110", "20300000"),
            Err(DecodeError::MalformedTimestamp(_))
        ));
        assert!(decode_timestamp("24050110", "2F300000").is_err());
    }

    #[test]
    fn test_range_checks() {
        assert!(decode_timestamp("24130110", "00000000").is_err()); // month 13
        assert!(decode_timestamp("24003110", "00000000").is_err()); // month 0
        assert!(decode_timestamp("24053210", "00000000").is_err()); // day 32
        assert!(decode_timestamp("24050024", "00000000").is_err()); // day 0
        assert!(decode_timestamp("24050124", "00000000").is_err()); // hour 24
        assert!(decode_timestamp("24050123", "60000000").is_err()); // minute 60
        assert!(decode_timestamp("24050123", "00600000").is_err()); // second 60
        assert!(decode_timestamp("99123123", "59590000").is_ok());
    }

    #[test]
    fn test_zero_placeholder_is_rejected() {
        assert!(matches!(
            decode_timestamp(ZERO_WORD_HEX, ZERO_WORD_HEX),
            Err(DecodeError::MalformedTimestamp(_))
        ));
    }

    #[test]
    fn test_short_text_is_malformed() {
        assert!(decode_timestamp("2405", "2030").is_err());
    }

    #[test]
    fn test_hex_text_is_padded_uppercase() {
        assert_eq!(hex_text(0xab), "000000AB");
        assert_eq!(hex_text(0x0000A041), "0000A041");
    }

    #[test]
    fn test_encode_decode_round_trip() {
        for &(year, month, day, hour, minute, second) in &[
            (2000u16, 1u8, 1u8, 0u8, 0u8, 0u8),
            (2024, 5, 1, 10, 20, 30),
            (2099, 12, 31, 23, 59, 59),
        ] {
            let ts = Timestamp {
                year,
                month,
                day,
                hour,
                minute,
                second,
            };
            let (a, b) = encode_timestamp_words(&ts);
            assert_eq!(decode_timestamp_words(a, b).unwrap(), ts);
        }
    }
}

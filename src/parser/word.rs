/// Decode a measurement word.
///
/// Words are read big-endian, but measurements are stored as little-endian
/// IEEE-754 binary32, so the bytes are reversed before reinterpreting.
/// The value is rounded to two decimals, ties away from zero.
pub fn decode_word(word: u32) -> f64 {
    let value = f32::from_bits(word.swap_bytes());
    round_to_hundredths(f64::from(value))
}

/// Round to two decimal places, halves away from zero
pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// src/color/hex.rs - "#RRGGBB" parsing and formatting

use super::{ColorInputError, Rgb};

/// Format as uppercase `#RRGGBB`
pub fn format_hex(rgb: Rgb) -> String {
    format!("#{:02X}{:02X}{:02X}", rgb.r, rgb.g, rgb.b)
}

/// Parse a hex color.
///
/// Surrounding whitespace is trimmed and a missing leading `#` is added.
/// Anything other than exactly six hex digits after that is rejected.
pub fn parse_hex(input: &str) -> Result<Rgb, ColorInputError> {
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ColorInputError::MalformedHex(input.to_string()));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .map_err(|_| ColorInputError::MalformedHex(input.to_string()))
    };

    Ok(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

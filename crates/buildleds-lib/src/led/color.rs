//! Color parsing and formatting for the printing color setting.

use rgb::RGB8;

use crate::BuildLedsError;

/// Parse a hex color string into an RGB triple.
///
/// Accepts:
/// - Hex: `"#808080"`, `"808080"`, `"#ff8000"`; any run of leading `#` is dropped
/// - Short hex: `"#FFF"`, one digit per channel. The digit is the channel
///   value itself (0-15), it is not doubled the way CSS does.
pub fn html_to_rgb(s: &str) -> crate::error::Result<RGB8> {
    let s = s.trim();

    // Hex color: three equal-width groups
    let hex = s.trim_start_matches('#');
    if !matches!(hex.len(), 3 | 6) {
        return Err(BuildLedsError::Color(format!(
            "Invalid color: {s} (use #RRGGBB)"
        )));
    }
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(BuildLedsError::Color(format!("Invalid hex color: {s}")));
    }
    let width = hex.len() / 3;
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i * width..(i + 1) * width], 16)
            .map_err(|_| BuildLedsError::Color(format!("Invalid hex color: {s}")))
    };
    Ok(RGB8::new(channel(0)?, channel(1)?, channel(2)?))
}

/// Format an RGB triple as `#RRGGBB`.
pub fn format_color(c: RGB8) -> String {
    format!("#{:02X}{:02X}{:02X}", c.r, c.g, c.b)
}

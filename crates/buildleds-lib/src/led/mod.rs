//! LED control — color parsing, RGB → RGBW conversion, register writes.

mod color;
mod convert;
mod ops;

pub use color::{format_color, html_to_rgb};
pub use convert::{Rgbw, rgb_to_rgbw};
pub use ops::{DeviceWriter, REG_RED, set_levels};
pub use rgb::RGB8;

/// Parse a color setting and convert it to RGBW levels in one step.
pub fn levels_for(color: &str) -> crate::error::Result<Rgbw> {
    Ok(rgb_to_rgbw(html_to_rgb(color)?))
}

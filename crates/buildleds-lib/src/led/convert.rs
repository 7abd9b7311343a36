//! RGB → RGBW conversion.
//!
//! Heuristic decomposition: the triple is scaled so its brightest channel is
//! at full intensity, a whiteness estimate is taken from the midpoint of the
//! scaled max and min, and that whiteness is moved out of the color channels
//! into the white channel.
//!
//! The arithmetic is done in `f64` in a fixed order and truncated toward zero,
//! so levels are reproducible bit for bit across platforms. Do not reorder the
//! expressions or switch to rounding.

use rgb::RGB8;
use serde::Serialize;

/// Four channel levels for an RGBW emitter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Rgbw {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub w: u8,
}

impl Rgbw {
    pub const OFF: Rgbw = Rgbw::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, w: u8) -> Self {
        Self { r, g, b, w }
    }

    /// Levels in register order: R, G, B, W.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.w]
    }
}

impl std::fmt::Display for Rgbw {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} {}", self.r, self.g, self.b, self.w)
    }
}

/// Truncate toward zero, then clamp into a channel level.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_level(v: f64) -> u8 {
    // `as i64` truncates toward zero and saturates on overflow
    (v as i64).clamp(0, 255) as u8
}

/// Convert an RGB triple to RGBW levels.
///
/// Pure black short-circuits to [`Rgbw::OFF`].
pub fn rgb_to_rgbw(rgb: RGB8) -> Rgbw {
    let (r_i, g_i, b_i) = (f64::from(rgb.r), f64::from(rgb.g), f64::from(rgb.b));

    let t_m = r_i.max(g_i).max(b_i);
    if t_m == 0.0 {
        return Rgbw::OFF;
    }

    // Color at 100% hue. Green and blue trade places here; max/min below are
    // order-independent, so the output is unaffected.
    let multiplier = 255.0 / t_m;
    let r_h = r_i * multiplier;
    let b_h = g_i * multiplier;
    let g_h = b_i * multiplier;

    // Whiteness (not strictly luminance), scaled back to the input magnitude
    let max_h = r_h.max(g_h).max(b_h);
    let min_h = r_h.min(g_h).min(b_h);
    let luminance = ((max_h + min_h) / 2.0 - 127.5) * (255.0 / 127.5) / multiplier;

    Rgbw {
        r: clamp_level(r_i - luminance),
        g: clamp_level(g_i - luminance),
        b: clamp_level(b_i - luminance),
        w: clamp_level(luminance),
    }
}

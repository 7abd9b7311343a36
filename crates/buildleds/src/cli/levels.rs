//! `levels` subcommand — show RGBW levels for a colour (no hardware required).

use std::path::Path;

use super::{LevelsOutput, Result, kv, kv_width, led};

pub(super) fn cmd_levels(colour: Option<&str>, json: bool, custom_path: Option<&Path>) -> Result<()> {
    let colour = match colour {
        Some(c) => c.to_string(),
        None => {
            let path = super::config_path(custom_path)?;
            super::load_config(&path).colours.printing
        }
    };

    let rgb = led::html_to_rgb(&colour)?;
    let levels = led::rgb_to_rgbw(rgb);

    if json {
        return super::print_json(&LevelsOutput {
            colour,
            rgb: led::format_color(rgb),
            levels,
        });
    }

    let w = kv_width(&["Colour:", "RGB:", "Levels (RGBW):"], &[]);
    kv("Colour:", &colour, w);
    kv("RGB:", format_args!("{} {} {}", rgb.r, rgb.g, rgb.b), w);
    kv("Levels (RGBW):", levels, w);
    Ok(())
}

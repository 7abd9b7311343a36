//! `apply` subcommand — fire the startup hook once.

use std::path::Path;

use super::{AppliedJson, PlatformBusProvider, Result, StatusLeds, kv, kv_width, led};

pub(super) fn cmd_apply(json: bool, custom_path: Option<&Path>) -> Result<()> {
    let path = super::config_path(custom_path)?;
    let config = super::load_config_strict(&path)?;

    let mut leds = StatusLeds::new(config, PlatformBusProvider::default());
    let applied = leds.on_start()?;

    if json {
        return super::print_json(&AppliedJson::from(&applied));
    }

    let w = kv_width(&["Device:", "Colour:", "Levels (RGBW):"], &[]);
    kv("Device:", format_args!("0x{:02x}", applied.address), w);
    let rgb = led::html_to_rgb(&applied.colour).map(led::format_color)?;
    kv("Colour:", format_args!("{} -> {rgb}", applied.colour), w);
    kv("Levels (RGBW):", applied.levels, w);
    Ok(())
}

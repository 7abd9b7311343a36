//! `config` / `get` / `set` subcommands — read and change settings.

use std::path::Path;

use buildleds_lib::config::KEYS;

use super::{
    AppliedJson, BuildLedsError, ConfigOutput, PlatformBusProvider, Result, SettingOutput,
    StatusLeds, kv, kv_indent, kv_width, led,
};

pub(super) fn cmd_config(json: bool, custom_path: Option<&Path>) -> Result<()> {
    let path = super::config_path(custom_path)?;
    let config = super::load_config(&path);
    let exists = path.exists();
    let levels = config.printing_levels().ok();
    let problems: Vec<String> = match config.validate() {
        Ok(()) => vec![],
        Err(errors) => errors.iter().map(ToString::to_string).collect(),
    };

    if json {
        return super::print_json(&ConfigOutput {
            config_file: path.display().to_string(),
            config_file_exists: exists,
            settings: config,
            levels,
            problems,
        });
    }

    // Human-readable output
    let w = kv_width(&["Config file:"], &["device_address:", "colours.printing:", "levels (RGBW):"]);

    if exists {
        kv("Config file:", format_args!("{} (loaded)", path.display()), w);
    } else {
        kv(
            "Config file:",
            format_args!("{} (not found, using defaults)", path.display()),
            w,
        );
    }
    println!();

    println!("Settings:");
    kv_indent(
        "device_address:",
        format_args!("0x{:02x}", config.device_address),
        w,
    );
    let colour_display = match led::html_to_rgb(&config.colours.printing) {
        Ok(rgb) => format!("{} -> {}", config.colours.printing, led::format_color(rgb)),
        Err(_) => format!("{} (invalid)", config.colours.printing),
    };
    kv_indent("colours.printing:", &colour_display, w);
    match levels {
        Some(l) => kv_indent("levels (RGBW):", l, w),
        None => kv_indent("levels (RGBW):", "-", w),
    }

    if !problems.is_empty() {
        println!();
        println!("Problems:");
        for p in &problems {
            println!("  {p}");
        }
    }
    Ok(())
}

fn unknown_key(key: &str) -> BuildLedsError {
    BuildLedsError::Config(format!(
        "unknown key \"{key}\" (expected one of: {})",
        KEYS.join(", ")
    ))
}

pub(super) fn cmd_get(key: &str, json: bool, custom_path: Option<&Path>) -> Result<()> {
    let path = super::config_path(custom_path)?;
    let config = super::load_config(&path);
    let value = config.get(key).ok_or_else(|| unknown_key(key))?;

    if json {
        return super::print_json(&SettingOutput {
            key: key.to_string(),
            value,
        });
    }
    println!("{value}");
    Ok(())
}

/// Change one setting, save it, then fire the settings-saved hook.
///
/// Nothing is saved unless the whole resulting config validates.
pub(super) fn cmd_set(
    key: &str,
    value: &str,
    no_apply: bool,
    json: bool,
    custom_path: Option<&Path>,
) -> Result<()> {
    let path = super::config_path(custom_path)?;
    let previous = super::load_config_strict(&path)?;

    let mut config = previous.clone();
    config.set(key, value)?;
    super::ensure_valid(&config)?;
    config.save_to(&path)?;
    log::info!("saved {key} to {}", path.display());

    let applied = if no_apply {
        None
    } else {
        let mut leds = StatusLeds::new(previous, PlatformBusProvider::default());
        Some(leds.on_config_changed(config.clone())?)
    };

    let shown = config.get(key).ok_or_else(|| unknown_key(key))?;
    if json {
        #[derive(serde::Serialize)]
        struct SetOutput {
            key: String,
            value: String,
            applied: Option<AppliedJson>,
        }
        return super::print_json(&SetOutput {
            key: key.to_string(),
            value: shown,
            applied: applied.as_ref().map(AppliedJson::from),
        });
    }

    let label = format!("{key}:");
    let w = kv_width(&[label.as_str(), "Levels (RGBW):"], &[]);
    kv(&label, &shown, w);
    match applied {
        Some(a) => kv("Levels (RGBW):", a.levels, w),
        None => kv("Levels (RGBW):", "(not applied)", w),
    }
    Ok(())
}

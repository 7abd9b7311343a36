//! CLI subcommands — the host side of the LED lifecycle.
//!
//! `apply` and `watch` fire the startup hook, `set` and `watch` fire the
//! settings-saved hook; the rest only read.

mod apply;
mod config_cmd;
mod info;
mod levels;
mod watch;

use std::path::{Path, PathBuf};

use clap::Subcommand;
use serde::Serialize;

pub(super) use crate::RUNNING;
pub(super) use buildleds_lib::BuildLedsError;
pub(super) use buildleds_lib::bus::PlatformBusProvider;
pub(super) use buildleds_lib::config::Config;
pub(super) use buildleds_lib::error::Result;
pub(super) use buildleds_lib::led::{self, Rgbw};
pub(super) use buildleds_lib::lifecycle::{Applied, StatusLeds};
pub(super) use buildleds_lib::update_info::UpdateInfo;

const PADDING: usize = 2;

/// Compute alignment width for a command's key-value output.
/// Ensures at least PADDING spaces after the longest key in either level,
/// with top-level and indent values aligned to the same column.
pub(super) fn kv_width(top: &[&str], indent: &[&str]) -> usize {
    let top_max = top.iter().map(|k| k.len()).max().unwrap_or(0);
    let indent_max = indent.iter().map(|k| k.len()).max().unwrap_or(0);
    let top_need = if top.is_empty() { 0 } else { top_max + PADDING };
    // Indent keys lose 2 chars of inner width to the "  " prefix
    let indent_need = if indent.is_empty() {
        0
    } else {
        indent_max + PADDING + 2
    };
    top_need.max(indent_need)
}

pub(super) fn format_kv(key: &str, value: impl std::fmt::Display, w: usize) -> String {
    format!("{key:<width$}{value}", width = w)
}

pub(super) fn kv(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("{}", format_kv(key, value, w));
}

pub(super) fn kv_indent(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("  {key:<width$}{value}", width = w - 2);
}

/// Print any serializable value as pretty JSON.
pub(super) fn print_json(value: &impl Serialize) -> Result<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| BuildLedsError::Io(std::io::Error::other(e)))?;
    println!("{text}");
    Ok(())
}

/// Resolve the config file: `--config` if given, else the platform default.
pub(super) fn config_path(custom_path: Option<&Path>) -> Result<PathBuf> {
    custom_path
        .map(Path::to_path_buf)
        .or_else(Config::path)
        .ok_or_else(|| BuildLedsError::Config("no config directory on this platform".into()))
}

/// Load config from `path` for a read-only command. A file that fails to
/// parse is logged and replaced by the defaults.
pub(super) fn load_config(path: &Path) -> Config {
    let (config, warnings) = Config::load_from(path);
    for w in &warnings {
        log::warn!("{w}, using defaults");
    }
    config
}

/// Load config from `path` for a command that writes the LEDs or the file.
/// A file that fails to parse is an error, never silently the defaults.
pub(super) fn load_config_strict(path: &Path) -> Result<Config> {
    let (config, warnings) = Config::load_from(path);
    if warnings.is_empty() {
        Ok(config)
    } else {
        Err(BuildLedsError::Config(warnings.join("; ")))
    }
}

/// Reject a config that failed validation, listing every problem.
pub(super) fn ensure_valid(config: &Config) -> Result<()> {
    config.validate().map_err(|errors| {
        let list: Vec<String> = errors.iter().map(ToString::to_string).collect();
        BuildLedsError::Config(list.join("; "))
    })
}

// ── JSON output structs ──

#[derive(Serialize)]
pub(super) struct AppliedJson {
    pub device_address: String,
    pub colour: String,
    pub levels: Rgbw,
}

impl From<&Applied> for AppliedJson {
    fn from(a: &Applied) -> Self {
        AppliedJson {
            device_address: format!("0x{:02x}", a.address),
            colour: a.colour.clone(),
            levels: a.levels,
        }
    }
}

#[derive(Serialize)]
pub(super) struct LevelsOutput {
    pub colour: String,
    pub rgb: String,
    pub levels: Rgbw,
}

#[derive(Serialize)]
pub(super) struct ConfigOutput {
    pub config_file: String,
    pub config_file_exists: bool,
    pub settings: Config,
    pub levels: Option<Rgbw>,
    pub problems: Vec<String>,
}

#[derive(Serialize)]
pub(super) struct SettingOutput {
    pub key: String,
    pub value: String,
}

#[derive(Subcommand)]
pub enum Command {
    /// Write the configured printing colour to the LEDs (startup)
    Apply,

    /// Show the RGBW levels for a colour without touching the bus
    Levels {
        /// Colour as #RRGGBB (default: the configured printing colour)
        colour: Option<String>,
    },

    /// Show current configuration and file path
    Config,

    /// Print one setting
    Get {
        /// Setting key: device_address or colours.printing
        key: String,
    },

    /// Change one setting, save, and update the LEDs
    Set {
        /// Setting key: device_address or colours.printing
        key: String,
        /// New value (address as decimal or 0x-hex; colour as #RRGGBB)
        value: String,
        /// Save only; do not write to the LEDs
        #[arg(long)]
        no_apply: bool,
    },

    /// Apply, then re-apply whenever the config file changes
    Watch {
        /// Poll interval for config file changes, in milliseconds
        #[arg(long, default_value_t = 1000)]
        interval_ms: u64,
    },

    /// Show update-check metadata
    Info,
}

/// Warn if `--json` was passed to a command that doesn't support it.
fn warn_json_unsupported(cmd_name: &str) {
    log::warn!("--json is not supported for `{cmd_name}` (ignored)");
}

pub fn run(cmd: Command, json: bool, custom_path: Option<&Path>) -> Result<()> {
    match cmd {
        Command::Apply => apply::cmd_apply(json, custom_path),
        Command::Levels { colour } => levels::cmd_levels(colour.as_deref(), json, custom_path),
        Command::Config => config_cmd::cmd_config(json, custom_path),
        Command::Get { key } => config_cmd::cmd_get(&key, json, custom_path),
        Command::Set {
            key,
            value,
            no_apply,
        } => config_cmd::cmd_set(&key, &value, no_apply, json, custom_path),
        Command::Watch { interval_ms } => {
            if json {
                warn_json_unsupported("watch");
            }
            watch::cmd_watch(interval_ms, custom_path)
        }
        Command::Info => info::cmd_info(json),
    }
}


#[cfg(test)]
mod helper_tests {
    use super::*;

    #[test]
    fn config_path_prefers_custom() {
        let p = config_path(Some(Path::new("/tmp/x.toml"))).unwrap();
        assert_eq!(p, PathBuf::from("/tmp/x.toml"));
    }

    #[test]
    fn strict_load_rejects_unparseable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "device_address = 300\n").unwrap();
        let err = load_config_strict(&path).unwrap_err();
        assert!(matches!(err, BuildLedsError::Config(_)));
        assert!(err.to_string().contains("config parse error"), "got: {err}");
        assert_eq!(load_config(&path), Config::default());
    }

    #[test]
    fn strict_load_accepts_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_strict(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn ensure_valid_joins_problems() {
        let mut config = Config::default();
        config.device_address = 0xa0;
        config.colours.printing = "nope".into();
        let msg = ensure_valid(&config).unwrap_err().to_string();
        assert!(msg.starts_with("Config error: Invalid device_address"), "got: {msg}");
        assert!(msg.contains("; Invalid printing colour"), "got: {msg}");
    }

    #[test]
    fn applied_json_formats_address_as_hex() {
        let applied = Applied {
            address: 0x3f,
            colour: "#808080".into(),
            levels: Rgbw::new(0, 0, 0, 128),
        };
        let v = serde_json::to_value(AppliedJson::from(&applied)).unwrap();
        assert_eq!(v["device_address"], "0x3f");
        assert_eq!(v["levels"]["w"], 128);
    }
}

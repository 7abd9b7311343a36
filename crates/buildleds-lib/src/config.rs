//! Application configuration — TOML-based, platform-aware paths.
//!
//! Stands in for the print-server's settings store: two keys, read with
//! [`Config::get`], changed with [`Config::set`], persisted with
//! [`Config::save_to`].

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::BuildLedsError;
use crate::bus;
use crate::led::{self, Rgbw};

/// Header comment prepended to saved config files.
const CONFIG_HEADER: &str =
    "# buildleds configuration — changes made outside the app may be overwritten.\n\n";

/// Setting key for the controller's bus address.
pub const KEY_DEVICE_ADDRESS: &str = "device_address";
/// Setting key for the printing color.
pub const KEY_PRINTING_COLOUR: &str = "colours.printing";
/// Every settable key, in display order.
pub const KEYS: &[&str] = &[KEY_DEVICE_ADDRESS, KEY_PRINTING_COLOUR];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// 7-bit I2C address of the LED controller. Default: 0x3f.
    #[serde(default = "default_device_address")]
    pub device_address: u8,

    /// Indicator colors.
    #[serde(default)]
    pub colours: Colours,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Colours {
    /// Color shown while printing, as hex. Default: "#808080".
    #[serde(default = "default_printing_colour")]
    pub printing: String,
}

fn default_device_address() -> u8 {
    0x3f
}
fn default_printing_colour() -> String {
    "#808080".into()
}

impl Default for Colours {
    fn default() -> Self {
        Colours {
            printing: default_printing_colour(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            device_address: default_device_address(),
            colours: Colours::default(),
        }
    }
}

/// Validation errors that [`Config::validate`] can return.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// `device_address` does not fit in 7 bits.
    InvalidAddress(u8),
    /// `colours.printing` could not be parsed as a color.
    InvalidColor(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidAddress(a) => write!(
                f,
                "Invalid device_address: 0x{a:02x} is not a 7-bit address (max 0x{:02x})",
                bus::MAX_ADDRESS
            ),
            ValidationError::InvalidColor(e) => write!(f, "Invalid printing colour: {e}"),
        }
    }
}

/// Parse an address as decimal (`63`) or hex (`0x3f`).
pub fn parse_address(s: &str) -> crate::error::Result<u8> {
    let s = s.trim();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => s.parse::<u8>(),
    };
    parsed.map_err(|_| {
        BuildLedsError::Config(format!(
            "{KEY_DEVICE_ADDRESS} must be 0-255 (decimal or 0x-prefixed hex), got \"{s}\""
        ))
    })
}

impl Config {
    /// Platform-specific config directory.
    pub fn dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("buildleds"))
    }

    /// Full path to config file.
    pub fn path() -> Option<PathBuf> {
        Self::dir().map(|d| d.join("config.toml"))
    }

    /// Save config to an arbitrary path atomically (write to temp file, then rename).
    ///
    /// A header comment is prepended to warn that manual edits may be overwritten.
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let serialized = toml::to_string_pretty(self).map_err(std::io::Error::other)?;
        let contents = format!("{CONFIG_HEADER}{serialized}");
        let tmp = path.with_extension("toml.tmp");
        std::fs::write(&tmp, &contents)?;
        match std::fs::rename(&tmp, path) {
            Ok(()) => Ok(()),
            Err(_) => {
                // Rename can fail across filesystems; fall back to direct write + cleanup
                let result = std::fs::write(path, &contents);
                let _ = std::fs::remove_file(&tmp);
                result
            }
        }
    }

    /// Load config from an arbitrary path, returning the config and any parse warnings.
    ///
    /// Returns `(defaults, [])` if the file doesn't exist.
    /// Returns `(defaults, [warning])` if the file exists but can't be parsed.
    pub fn load_from(path: &Path) -> (Self, Vec<String>) {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => (config, vec![]),
                Err(e) => {
                    let warning = format!("config parse error ({}): {e}", path.display());
                    (Self::default(), vec![warning])
                }
            },
            Err(_) => (Self::default(), vec![]),
        }
    }

    /// Read one setting as text. Returns `None` for unknown keys.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            KEY_DEVICE_ADDRESS => Some(format!("0x{:02x}", self.device_address)),
            KEY_PRINTING_COLOUR => Some(self.colours.printing.clone()),
            _ => None,
        }
    }

    /// Change one setting from text.
    ///
    /// Only checks that the value has the right shape for the key; run
    /// [`validate`](Self::validate) before acting on the result.
    pub fn set(&mut self, key: &str, value: &str) -> crate::error::Result<()> {
        match key {
            KEY_DEVICE_ADDRESS => {
                self.device_address = parse_address(value)?;
            }
            KEY_PRINTING_COLOUR => {
                self.colours.printing = value.trim().to_string();
            }
            _ => {
                return Err(BuildLedsError::Config(format!(
                    "unknown key \"{key}\" (expected one of: {})",
                    KEYS.join(", ")
                )));
            }
        }
        Ok(())
    }

    /// RGBW levels for the printing color.
    pub fn printing_levels(&self) -> crate::error::Result<Rgbw> {
        led::levels_for(&self.colours.printing)
    }

    /// Validate the entire config, collecting all errors.
    pub fn validate(&self) -> std::result::Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.device_address > bus::MAX_ADDRESS {
            errors.push(ValidationError::InvalidAddress(self.device_address));
        }

        if let Err(e) = led::html_to_rgb(&self.colours.printing) {
            errors.push(ValidationError::InvalidColor(e.to_string()));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Config defaults ──

    #[test]
    fn defaults() {
        let c = Config::default();
        assert_eq!(c.device_address, 0x3f);
        assert_eq!(c.colours.printing, "#808080");
        assert!(c.validate().is_ok());
    }

    #[test]
    fn serialize_roundtrip() {
        let c = Config {
            device_address: 0x20,
            colours: Colours {
                printing: "#FF8000".into(),
            },
        };
        let toml_str = toml::to_string_pretty(&c).unwrap();
        let c2: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(c2, c);
    }

    #[test]
    fn toml_layout_nests_printing_under_colours() {
        let toml_str = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(toml_str.contains("device_address = 63"), "got: {toml_str}");
        assert!(toml_str.contains("[colours]"), "got: {toml_str}");
        assert!(toml_str.contains("printing = \"#808080\""), "got: {toml_str}");
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let c: Config = toml::from_str("device_address = 32").unwrap();
        assert_eq!(c.device_address, 32);
        assert_eq!(c.colours.printing, "#808080");

        let c: Config = toml::from_str("[colours]\nprinting = \"#FF0000\"").unwrap();
        assert_eq!(c.device_address, 0x3f);
        assert_eq!(c.colours.printing, "#FF0000");
    }

    #[test]
    fn empty_colours_table_fills_defaults() {
        let c: Config = toml::from_str("[colours]").unwrap();
        assert_eq!(c.colours.printing, "#808080");
    }

    #[test]
    fn empty_toml_gives_defaults() {
        let c: Config = toml::from_str("").unwrap();
        assert_eq!(c, Config::default());
    }

    #[test]
    fn address_out_of_byte_range_fails_to_parse() {
        let result: std::result::Result<Config, _> = toml::from_str("device_address = 300");
        assert!(result.is_err());
    }

    #[test]
    fn wrong_type_toml_fails_to_parse() {
        let result: std::result::Result<Config, _> =
            toml::from_str("device_address = \"not a number\"");
        assert!(result.is_err());
    }

    #[test]
    fn config_path_ends_with_toml() {
        if let Some(path) = Config::path() {
            assert_eq!(path.file_name().unwrap(), "config.toml");
            assert_eq!(path.parent().unwrap().file_name().unwrap(), "buildleds");
        }
    }

    // ── load_from / save_to ──

    #[test]
    fn load_from_missing_file_gives_defaults_without_warning() {
        let dir = tempfile::tempdir().unwrap();
        let (c, warnings) = Config::load_from(&dir.path().join("nope.toml"));
        assert_eq!(c, Config::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn load_from_malformed_file_warns_and_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "this is { not valid toml").unwrap();
        let (c, warnings) = Config::load_from(&path);
        assert_eq!(c, Config::default());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("config parse error"), "got: {}", warnings[0]);
    }

    #[test]
    fn save_to_then_load_from() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut c = Config::default();
        c.set(KEY_PRINTING_COLOUR, "#102030").unwrap();
        c.save_to(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("# buildleds configuration"));
        assert!(!path.with_extension("toml.tmp").exists());

        let (loaded, warnings) = Config::load_from(&path);
        assert!(warnings.is_empty());
        assert_eq!(loaded, c);
    }

    // ── get / set ──

    #[test]
    fn get_known_keys() {
        let c = Config::default();
        assert_eq!(c.get(KEY_DEVICE_ADDRESS).as_deref(), Some("0x3f"));
        assert_eq!(c.get(KEY_PRINTING_COLOUR).as_deref(), Some("#808080"));
        assert_eq!(c.get("colours"), None);
    }

    #[test]
    fn set_address_decimal_and_hex() {
        let mut c = Config::default();
        c.set(KEY_DEVICE_ADDRESS, "32").unwrap();
        assert_eq!(c.device_address, 32);
        c.set(KEY_DEVICE_ADDRESS, "0x4A").unwrap();
        assert_eq!(c.device_address, 0x4a);
        c.set(KEY_DEVICE_ADDRESS, " 0X10 ").unwrap();
        assert_eq!(c.device_address, 0x10);
    }

    #[test]
    fn set_address_rejects_garbage() {
        let mut c = Config::default();
        assert!(c.set(KEY_DEVICE_ADDRESS, "256").is_err());
        assert!(c.set(KEY_DEVICE_ADDRESS, "0xZZ").is_err());
        assert!(c.set(KEY_DEVICE_ADDRESS, "").is_err());
        assert_eq!(c.device_address, 0x3f, "failed set must not change the value");
    }

    #[test]
    fn set_colour_trims() {
        let mut c = Config::default();
        c.set(KEY_PRINTING_COLOUR, "  #00ff00 ").unwrap();
        assert_eq!(c.colours.printing, "#00ff00");
    }

    #[test]
    fn set_unknown_key_lists_valid_keys() {
        let mut c = Config::default();
        let err = c.set("colour", "red").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("unknown key"), "got: {msg}");
        assert!(msg.contains("colours.printing"), "got: {msg}");
    }

    // ── validate ──

    #[test]
    fn validate_collects_all_errors() {
        let c = Config {
            device_address: 0x80,
            colours: Colours {
                printing: "#12".into(),
            },
        };
        let errors = c.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0], ValidationError::InvalidAddress(0x80));
        assert!(matches!(errors[1], ValidationError::InvalidColor(_)));
    }

    #[test]
    fn validation_error_display() {
        assert_eq!(
            ValidationError::InvalidAddress(0x90).to_string(),
            "Invalid device_address: 0x90 is not a 7-bit address (max 0x7f)"
        );
        assert_eq!(
            ValidationError::InvalidColor("bad".into()).to_string(),
            "Invalid printing colour: bad"
        );
    }

    #[test]
    fn printing_levels_for_default() {
        assert_eq!(
            Config::default().printing_levels().unwrap(),
            Rgbw::new(0, 0, 0, 128)
        );
    }
}

//! Unified error type for the buildleds-lib crate.
//!
//! [`BuildLedsError`] wraps bus errors and domain-specific error kinds
//! (`Config`, `Color`). `From` impls allow `?` to propagate across module
//! boundaries.

use std::fmt;

use crate::bus::BusError;

/// Unified error type for buildleds-lib operations.
#[derive(Debug)]
pub enum BuildLedsError {
    /// I2C bus error (open, register write, address range).
    Bus(BusError),
    /// Standard I/O error (config persistence).
    Io(std::io::Error),
    /// Configuration validation error.
    Config(String),
    /// Color parsing error.
    Color(String),
}

impl fmt::Display for BuildLedsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildLedsError::Bus(e) => write!(f, "{e}"),
            BuildLedsError::Io(e) => write!(f, "I/O error: {e}"),
            BuildLedsError::Config(e) => write!(f, "Config error: {e}"),
            BuildLedsError::Color(e) => write!(f, "Color error: {e}"),
        }
    }
}

impl std::error::Error for BuildLedsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BuildLedsError::Bus(e) => Some(e),
            BuildLedsError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<BusError> for BuildLedsError {
    fn from(e: BusError) -> Self {
        BuildLedsError::Bus(e)
    }
}

impl From<std::io::Error> for BuildLedsError {
    fn from(e: std::io::Error) -> Self {
        BuildLedsError::Io(e)
    }
}

/// Crate-level Result alias using [`BuildLedsError`].
pub type Result<T> = std::result::Result<T, BuildLedsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_bus_error() {
        let e: BuildLedsError = BusError::InvalidAddress(0x80).into();
        assert!(matches!(
            e,
            BuildLedsError::Bus(BusError::InvalidAddress(0x80))
        ));
    }

    #[test]
    fn from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let e: BuildLedsError = io_err.into();
        assert!(matches!(e, BuildLedsError::Io(_)));
    }

    #[test]
    fn display_bus_error_is_transparent() {
        let e = BuildLedsError::Bus(BusError::OpenFailed("/dev/i2c-1: no such file".into()));
        assert_eq!(
            e.to_string(),
            "Failed to open I2C bus: /dev/i2c-1: no such file"
        );
    }

    #[test]
    fn display_config_error() {
        let e = BuildLedsError::Config("unknown key".into());
        assert_eq!(e.to_string(), "Config error: unknown key");
    }

    #[test]
    fn display_color_error() {
        let e = BuildLedsError::Color("bad hex".into());
        assert_eq!(e.to_string(), "Color error: bad hex");
    }

    #[test]
    fn source_chains_bus_error() {
        let e = BuildLedsError::Bus(BusError::WriteFailed {
            register: 2,
            reason: "nack".into(),
        });
        let source = std::error::Error::source(&e).unwrap();
        assert!(source.to_string().contains("nack"));
    }

    #[test]
    fn source_none_for_string_variants() {
        let e = BuildLedsError::Color("test".into());
        assert!(std::error::Error::source(&e).is_none());
    }

    #[test]
    fn question_mark_propagation_bus_to_buildleds() {
        fn inner() -> crate::bus::Result<()> {
            Err(BusError::Unsupported("test".into()))
        }
        fn outer() -> Result<()> {
            inner()?;
            Ok(())
        }
        let err = outer().unwrap_err();
        assert!(matches!(err, BuildLedsError::Bus(BusError::Unsupported(_))));
    }
}

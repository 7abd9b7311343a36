//! buildleds — RGBW status LED control for 3D-printer controller boards.

pub mod bus;
pub mod config;
pub mod error;
pub mod led;
pub mod lifecycle;
pub mod update_info;

pub use error::BuildLedsError;

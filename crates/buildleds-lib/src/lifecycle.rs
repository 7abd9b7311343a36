//! Host lifecycle — recompute and write the LED levels on startup and on
//! every settings save.
//!
//! [`StatusLeds`] owns the current [`Config`] and a [`DeviceWriter`]. The
//! host (the CLI, or a print-server integration) calls [`StatusLeds::on_start`]
//! once and [`StatusLeds::on_config_changed`] after each save; both run a
//! full [`update`](StatusLeds::update) synchronously.

use crate::bus::BusProvider;
use crate::config::Config;
use crate::error::Result;
use crate::led::{self, DeviceWriter, Rgbw};

/// What an update did: the color it resolved and the levels it wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub address: u8,
    pub colour: String,
    pub levels: Rgbw,
}

pub struct StatusLeds<P> {
    config: Config,
    writer: DeviceWriter<P>,
}

impl<P: BusProvider> StatusLeds<P> {
    pub fn new(config: Config, provider: P) -> Self {
        Self {
            config,
            writer: DeviceWriter::new(provider),
        }
    }

    /// Startup hook.
    pub fn on_start(&mut self) -> Result<Applied> {
        log::info!("Build LEDs started");
        self.update()
    }

    /// Settings-saved hook. Replaces the held config, then updates.
    pub fn on_config_changed(&mut self, config: Config) -> Result<Applied> {
        self.config = config;
        self.update()
    }

    /// Resolve the printing color and write its levels to the controller.
    ///
    /// Errors are returned unchanged; nothing is retried.
    pub fn update(&mut self) -> Result<Applied> {
        let colour = &self.config.colours.printing;
        log::info!("printing colour {colour}");
        let levels = led::levels_for(colour)?;
        log::info!("Levels {levels}");
        let address = self.config.device_address;
        self.writer.write(address, levels)?;
        Ok(Applied {
            address,
            colour: colour.clone(),
            levels,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

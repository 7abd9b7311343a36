//! `watch` subcommand — apply on start, then re-apply on every config save.
//!
//! Acts as the host: the startup hook fires once, and a change in the config
//! file's modification time counts as a settings-saved event.

use std::path::{Path, PathBuf};
use std::sync::atomic::Ordering;
use std::time::{Duration, SystemTime};

use super::{Applied, Config, PlatformBusProvider, RUNNING, Result, StatusLeds};

/// Tracks a file's modification time between polls.
struct FileWatch {
    path: PathBuf,
    last: Option<SystemTime>,
}

impl FileWatch {
    fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            last: Self::mtime(path),
        }
    }

    fn mtime(path: &Path) -> Option<SystemTime> {
        std::fs::metadata(path).and_then(|m| m.modified()).ok()
    }

    /// True if the file appeared, disappeared or was rewritten since the last call.
    fn changed(&mut self) -> bool {
        let now = Self::mtime(&self.path);
        if now == self.last {
            return false;
        }
        self.last = now;
        true
    }
}

/// Re-read a saved config. `None` if the file can't be parsed or fails
/// validation, so a half-written save never reaches the LEDs.
fn reload(path: &Path) -> Option<Config> {
    let (config, warnings) = Config::load_from(path);
    if !warnings.is_empty() {
        for w in &warnings {
            log::warn!("[config] {w}");
        }
        return None;
    }
    if let Err(errors) = config.validate() {
        for e in &errors {
            log::warn!("[config] {e}");
        }
        return None;
    }
    Some(config)
}

fn report(result: Result<Applied>) {
    match result {
        Ok(a) => println!("  0x{:02x} {} -> {}", a.address, a.colour, a.levels),
        Err(e) => log::warn!("[leds] update failed: {e}"),
    }
}

pub(super) fn cmd_watch(interval_ms: u64, custom_path: Option<&Path>) -> Result<()> {
    let path = super::config_path(custom_path)?;
    let config = super::load_config_strict(&path)?;
    let interval = Duration::from_millis(interval_ms.max(50));

    println!("buildleds — watching {}", path.display());
    println!("Press Ctrl+C to exit.");
    println!();

    let mut leds = StatusLeds::new(config, PlatformBusProvider::default());
    let mut watch = FileWatch::new(&path);
    report(leds.on_start());

    while RUNNING.load(Ordering::SeqCst) {
        std::thread::sleep(interval);
        if !watch.changed() {
            continue;
        }
        log::info!("[config] {} changed", path.display());
        if let Some(config) = reload(&path) {
            report(leds.on_config_changed(config));
        }
    }

    println!();
    println!("Done.");
    Ok(())
}

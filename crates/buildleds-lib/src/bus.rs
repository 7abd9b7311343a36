//! I2C bus access — register-write trait + Linux backend.
//!
//! The LED peripheral is driven with SMBus "write byte data" transfers: one
//! `[register, value]` pair per write, addressed to a 7-bit device address.
//! A [`BusProvider`] opens a session on a numbered bus; the returned
//! [`RegisterBus`] is the session and releases the bus when dropped.

use std::fmt;

use embedded_hal::i2c::I2c;

// ── Error type ──

/// Bus communication errors.
///
/// String payloads follow the convention **"context: details"** where *context*
/// identifies the device node or step (e.g. `"/dev/i2c-1"`) and *details*
/// describes what went wrong.
#[derive(Debug)]
pub enum BusError {
    OpenFailed(String),
    WriteFailed { register: u8, reason: String },
    /// Address does not fit in 7 bits.
    InvalidAddress(u8),
    Unsupported(String),
}

impl fmt::Display for BusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BusError::OpenFailed(e) => write!(f, "Failed to open I2C bus: {e}"),
            BusError::WriteFailed { register, reason } => {
                write!(f, "Write to register {register} failed: {reason}")
            }
            BusError::InvalidAddress(addr) => {
                write!(f, "Invalid device address 0x{addr:02x} (must be 0x00-0x7f)")
            }
            BusError::Unsupported(e) => write!(f, "I2C not supported: {e}"),
        }
    }
}

impl std::error::Error for BusError {}

pub type Result<T> = std::result::Result<T, BusError>;

/// Bus index the LED controller hangs off.
pub const DEFAULT_BUS: u8 = 1;

/// Highest valid 7-bit device address.
pub const MAX_ADDRESS: u8 = 0x7F;

// ── Traits ──

/// An open bus session that accepts single-byte register writes.
pub trait RegisterBus {
    /// Write `value` into `register` of the device at `address`.
    fn write_byte_data(&mut self, address: u8, register: u8, value: u8) -> Result<()>;
}

/// Opens bus sessions. Each session lives until the returned bus is dropped.
pub trait BusProvider {
    type Bus: RegisterBus;

    fn open(&self, bus: u8) -> Result<Self::Bus>;
}

// ── embedded-hal adapter ──

/// Adapts any `embedded-hal` I2C implementation to [`RegisterBus`].
pub struct HalBus<T> {
    i2c: T,
}

impl<T> HalBus<T> {
    pub fn new(i2c: T) -> Self {
        Self { i2c }
    }

    pub fn into_inner(self) -> T {
        self.i2c
    }
}

impl<T: I2c> RegisterBus for HalBus<T> {
    fn write_byte_data(&mut self, address: u8, register: u8, value: u8) -> Result<()> {
        self.i2c
            .write(address, &[register, value])
            .map_err(|e| BusError::WriteFailed {
                register,
                reason: format!("{:?}", embedded_hal::i2c::Error::kind(&e)),
            })
    }
}

// ── Linux backend ──

#[cfg(target_os = "linux")]
mod linux {
    use super::*;
    use linux_embedded_hal::I2cdev;

    /// Opens `/dev/i2c-<n>` through the kernel i2c-dev interface.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct LinuxBusProvider;

    pub fn device_path(bus: u8) -> String {
        format!("/dev/i2c-{bus}")
    }

    impl BusProvider for LinuxBusProvider {
        type Bus = HalBus<I2cdev>;

        fn open(&self, bus: u8) -> Result<Self::Bus> {
            let path = device_path(bus);
            let dev = I2cdev::new(&path).map_err(|e| BusError::OpenFailed(format!("{path}: {e}")))?;
            log::debug!("opened {path}");
            Ok(HalBus::new(dev))
        }
    }
}

#[cfg(target_os = "linux")]
pub use linux::{LinuxBusProvider, device_path};

// ── Fallback for platforms without i2c-dev ──

/// Session type that can never be constructed.
pub enum NoBus {}

impl RegisterBus for NoBus {
    fn write_byte_data(&mut self, _address: u8, _register: u8, _value: u8) -> Result<()> {
        match *self {}
    }
}

/// Provider for platforms without an I2C backend; every open fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedBusProvider;

impl BusProvider for UnsupportedBusProvider {
    type Bus = NoBus;

    fn open(&self, bus: u8) -> Result<Self::Bus> {
        Err(BusError::Unsupported(format!(
            "bus {bus}: I2C access is only available on Linux"
        )))
    }
}

/// The bus provider for the current platform.
#[cfg(target_os = "linux")]
pub type PlatformBusProvider = LinuxBusProvider;

#[cfg(not(target_os = "linux"))]
pub type PlatformBusProvider = UnsupportedBusProvider;

// ── Mock ──

pub mod mock {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    /// Something that happened on the mock bus, in order.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum BusEvent {
        Open(u8),
        Write { address: u8, register: u8, value: u8 },
        Release(u8),
    }

    /// In-memory bus provider for tests. Clones share the same event log, so a
    /// test can keep one handle and give the other to the code under test.
    #[derive(Debug, Default, Clone)]
    pub struct MockBusProvider {
        pub events: Rc<RefCell<Vec<BusEvent>>>,
        /// If true, `open` returns an error.
        pub fail_open: Rc<Cell<bool>>,
        /// If set, writes to this register return an error.
        pub fail_register: Rc<Cell<Option<u8>>>,
    }

    impl MockBusProvider {
        pub fn new() -> Self {
            Self::default()
        }

        /// Snapshot of every recorded event.
        pub fn events(&self) -> Vec<BusEvent> {
            self.events.borrow().clone()
        }

        /// Recorded writes as `(address, register, value)`.
        pub fn writes(&self) -> Vec<(u8, u8, u8)> {
            self.events
                .borrow()
                .iter()
                .filter_map(|e| match *e {
                    BusEvent::Write {
                        address,
                        register,
                        value,
                    } => Some((address, register, value)),
                    _ => None,
                })
                .collect()
        }

        pub fn clear(&self) {
            self.events.borrow_mut().clear();
        }
    }

    pub struct MockBus {
        bus: u8,
        events: Rc<RefCell<Vec<BusEvent>>>,
        fail_register: Option<u8>,
    }

    impl BusProvider for MockBusProvider {
        type Bus = MockBus;

        fn open(&self, bus: u8) -> Result<MockBus> {
            if self.fail_open.get() {
                return Err(BusError::OpenFailed(format!("mock://i2c-{bus}: open refused")));
            }
            self.events.borrow_mut().push(BusEvent::Open(bus));
            Ok(MockBus {
                bus,
                events: Rc::clone(&self.events),
                fail_register: self.fail_register.get(),
            })
        }
    }

    impl RegisterBus for MockBus {
        fn write_byte_data(&mut self, address: u8, register: u8, value: u8) -> Result<()> {
            if self.fail_register == Some(register) {
                return Err(BusError::WriteFailed {
                    register,
                    reason: "mock: no acknowledge".into(),
                });
            }
            self.events.borrow_mut().push(BusEvent::Write {
                address,
                register,
                value,
            });
            Ok(())
        }
    }

    impl Drop for MockBus {
        fn drop(&mut self) {
            self.events.borrow_mut().push(BusEvent::Release(self.bus));
        }
    }
}

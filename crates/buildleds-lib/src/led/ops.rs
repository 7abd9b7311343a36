//! LED device operations — write RGBW levels to the controller's registers.

use crate::bus::{self, BusError, BusProvider, RegisterBus};

use super::convert::Rgbw;

/// Register holding the red level; green, blue and white follow at +1, +2, +3.
pub const REG_RED: u8 = 0;

/// Write the four levels to registers 0..=3 of `address`, in R, G, B, W order.
///
/// No readback and no retry: the first failed write aborts the sequence.
pub fn set_levels(bus: &mut impl RegisterBus, address: u8, levels: Rgbw) -> bus::Result<()> {
    for (register, value) in (REG_RED..).zip(levels.to_array()) {
        bus.write_byte_data(address, register, value)?;
    }
    Ok(())
}

/// Writes levels to the LED controller, opening the bus once per update.
///
/// Holds only the bus provider; the color and address come in with each call.
pub struct DeviceWriter<P> {
    provider: P,
    bus: u8,
}

impl<P: BusProvider> DeviceWriter<P> {
    /// Writer on the controller's fixed bus ([`bus::DEFAULT_BUS`]).
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            bus: bus::DEFAULT_BUS,
        }
    }

    /// Open the bus, write all four levels, release the bus.
    ///
    /// The session is released on every exit path, including a failed write.
    pub fn write(&self, address: u8, levels: Rgbw) -> bus::Result<()> {
        if address > bus::MAX_ADDRESS {
            return Err(BusError::InvalidAddress(address));
        }
        let mut session = self.provider.open(self.bus)?;
        set_levels(&mut session, address, levels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::mock::{BusEvent, MockBusProvider};

    #[test]
    fn set_levels_writes_rgbw_in_register_order() {
        let provider = MockBusProvider::new();
        let mut session = provider.open(1).unwrap();
        set_levels(&mut session, 0x3f, Rgbw::new(10, 20, 30, 40)).unwrap();
        drop(session);
        assert_eq!(
            provider.writes(),
            vec![(0x3f, 0, 10), (0x3f, 1, 20), (0x3f, 2, 30), (0x3f, 3, 40)]
        );
    }

    #[test]
    fn write_opens_bus_one_and_releases() {
        let provider = MockBusProvider::new();
        let writer = DeviceWriter::new(provider.clone());
        writer.write(0x3f, Rgbw::new(0, 0, 0, 128)).unwrap();

        let events = provider.events();
        assert_eq!(events.first(), Some(&BusEvent::Open(1)));
        assert_eq!(events.last(), Some(&BusEvent::Release(1)));
        assert_eq!(events.len(), 6);
    }

    #[test]
    fn write_stops_at_first_failed_register_and_still_releases() {
        let provider = MockBusProvider::new();
        provider.fail_register.set(Some(1));
        let writer = DeviceWriter::new(provider.clone());

        let err = writer.write(0x3f, Rgbw::new(1, 2, 3, 4)).unwrap_err();
        assert!(matches!(err, BusError::WriteFailed { register: 1, .. }));

        assert_eq!(provider.writes(), vec![(0x3f, 0, 1)]);
        assert_eq!(provider.events().last(), Some(&BusEvent::Release(1)));
    }

    #[test]
    fn write_propagates_open_failure() {
        let provider = MockBusProvider::new();
        provider.fail_open.set(true);
        let writer = DeviceWriter::new(provider.clone());
        let err = writer.write(0x3f, Rgbw::OFF).unwrap_err();
        assert!(matches!(err, BusError::OpenFailed(_)));
        assert!(provider.events().is_empty());
    }

    #[test]
    fn write_rejects_eight_bit_address_before_opening() {
        let provider = MockBusProvider::new();
        let writer = DeviceWriter::new(provider.clone());
        let err = writer.write(0x80, Rgbw::OFF).unwrap_err();
        assert!(matches!(err, BusError::InvalidAddress(0x80)));
        assert!(provider.events().is_empty());
    }

    #[test]
    fn write_accepts_highest_seven_bit_address() {
        let provider = MockBusProvider::new();
        let writer = DeviceWriter::new(provider.clone());
        writer.write(0x7f, Rgbw::OFF).unwrap();
        assert_eq!(provider.writes().len(), 4);
    }
}

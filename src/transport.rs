//! The SPI transaction capability the driver requires from its environment.

use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::SpiBus;

/// Address slot passed through [`Transport::exchange`]. Reserved for
/// multi-device port expanders; this single-device driver always passes zero.
pub const PORT_ADDRESS: u8 = 0;

/// A claimed-bus SPI transaction, split into the four capabilities the
/// ADS1018 access pattern needs.
///
/// Busy-polling samples the DOUT line as a plain digital input while chip
/// select is held, which is why this is not simply
/// [`SpiDevice`](embedded_hal::spi::SpiDevice): the status line must be
/// readable between [`begin`](Transport::begin) and [`end`](Transport::end)
/// without clocking the bus.
pub trait Transport {
    type Error;

    /// Claim the bus and select the device.
    fn begin(&mut self) -> Result<(), Self::Error>;

    /// Full-duplex exchange of `buffer` in place: transmitted bytes are
    /// replaced by the bytes clocked back.
    fn exchange(&mut self, address: u8, buffer: &mut [u8]) -> Result<(), Self::Error>;

    /// Sample the DOUT/status line; `true` when high.
    fn status_line(&mut self) -> Result<bool, Self::Error>;

    /// Deselect the device and release the bus.
    fn end(&mut self) -> Result<(), Self::Error>;
}

/// Error type for [`SpiPins`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError<SPI, PIN> {
    /// The SPI bus reported a failure.
    Spi(SPI),
    /// The chip-select or DOUT pin reported a failure.
    Pin(PIN),
}

/// [`Transport`] over an exclusive [`SpiBus`] plus a chip-select output and
/// the DOUT line wired up as a digital input.
///
/// The DOUT input shares the physical MISO line; it needs the device-side
/// pull-up (enabled by the default configuration) or a host pull-up to read
/// meaningfully while the device tri-states it.
pub struct SpiPins<SPI, CS, DOUT> {
    spi: SPI,
    cs: CS,
    dout: DOUT,
}

impl<SPI, CS, DOUT> SpiPins<SPI, CS, DOUT> {
    /// Bundles a bus and pins into a transport.
    /// Please ensure the SPI bus is in SPI mode 1, aka (0, 1).
    pub fn new(spi: SPI, cs: CS, dout: DOUT) -> Self {
        Self { spi, cs, dout }
    }

    /// Consume the transport and hand back the bus and pins.
    pub fn release(self) -> (SPI, CS, DOUT) {
        (self.spi, self.cs, self.dout)
    }
}

impl<SPI, CS, DOUT> Transport for SpiPins<SPI, CS, DOUT>
where
    SPI: SpiBus,
    CS: OutputPin,
    DOUT: InputPin<Error = CS::Error>,
{
    type Error = BusError<SPI::Error, CS::Error>;

    fn begin(&mut self) -> Result<(), Self::Error> {
        self.cs.set_low().map_err(BusError::Pin)
    }

    fn exchange(&mut self, _address: u8, buffer: &mut [u8]) -> Result<(), Self::Error> {
        self.spi.transfer_in_place(buffer).map_err(BusError::Spi)?;
        self.spi.flush().map_err(BusError::Spi)
    }

    fn status_line(&mut self) -> Result<bool, Self::Error> {
        self.dout.is_high().map_err(BusError::Pin)
    }

    fn end(&mut self) -> Result<(), Self::Error> {
        self.cs.set_high().map_err(BusError::Pin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::digital;
    use embedded_hal::spi;

    #[derive(Debug, PartialEq)]
    struct MockError;

    impl spi::Error for MockError {
        fn kind(&self) -> spi::ErrorKind {
            spi::ErrorKind::Other
        }
    }

    impl digital::Error for MockError {
        fn kind(&self) -> digital::ErrorKind {
            digital::ErrorKind::Other
        }
    }

    struct MockBus {
        reply: [u8; 4],
    }

    impl spi::ErrorType for MockBus {
        type Error = MockError;
    }

    impl SpiBus for MockBus {
        fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
            words.copy_from_slice(&self.reply[..words.len()]);
            Ok(())
        }

        fn write(&mut self, _words: &[u8]) -> Result<(), Self::Error> {
            Ok(())
        }

        fn transfer(&mut self, read: &mut [u8], _write: &[u8]) -> Result<(), Self::Error> {
            read.copy_from_slice(&self.reply[..read.len()]);
            Ok(())
        }

        fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
            words.copy_from_slice(&self.reply[..words.len()]);
            Ok(())
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    struct MockPin {
        high: bool,
    }

    impl digital::ErrorType for MockPin {
        type Error = MockError;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.high = true;
            Ok(())
        }
    }

    impl InputPin for MockPin {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(self.high)
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.high)
        }
    }

    fn transport(reply: [u8; 4], dout_high: bool) -> SpiPins<MockBus, MockPin, MockPin> {
        SpiPins::new(
            MockBus { reply },
            MockPin { high: true },
            MockPin { high: dout_high },
        )
    }

    #[test]
    fn chip_select_tracks_the_transaction() {
        let mut begun = transport([0; 4], false);
        begun.begin().unwrap();
        let (_, cs, _) = begun.release();
        assert!(!cs.high);

        let mut ended = transport([0; 4], false);
        ended.begin().unwrap();
        ended.end().unwrap();
        let (_, cs, _) = ended.release();
        assert!(cs.high);
    }

    #[test]
    fn exchange_clocks_the_reply_into_the_buffer() {
        let mut transport = transport([0x12, 0x34, 0, 0], false);
        let mut buffer = [0xAB, 0xCD];
        transport.exchange(PORT_ADDRESS, &mut buffer).unwrap();
        assert_eq!(buffer, [0x12, 0x34]);
    }

    #[test]
    fn status_line_follows_dout() {
        assert_eq!(transport([0; 4], true).status_line(), Ok(true));
        assert_eq!(transport([0; 4], false).status_line(), Ok(false));
    }
}

//! Provides a driver for a Texas Instruments ADS1018 SPI ADC via the
//! `embedded-hal` ecosystem.
//!
//! The ADS1018 multiplexes four analog inputs (or its internal temperature
//! sensor) into a 12-bit one-shot converter with a programmable full-scale
//! range and data rate, and reports busy status on the DOUT line while chip
//! select is held. Reads lag writes by one transaction: the bytes clocked
//! back while a configuration frame goes out belong to the *previous*
//! conversion. The steady-state pattern is therefore to trigger once with
//! [`Ads1018::start_conversion`], wait for [`Ads1018::is_busy`] to clear,
//! then alternate [`Ads1018::restart_and_read`] calls, each of which reads
//! the previous result while triggering the next conversion.

#![no_std]
#![forbid(unsafe_code)]

mod config;
mod transport;

pub use config::{Config, DataRate, FullScale, Input};
pub use transport::{BusError, SpiPins, Transport, PORT_ADDRESS};

/// Driver error. `Coms` and `Config` are only produced by [`Ads1018::init`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The transport reported a failure.
    Transport(E),
    /// Configuration read-back stuck at `0x0000` or `0xFFFF`: device not
    /// responding or the bus is stuck at a rail.
    Coms,
    /// Configuration read-back plausible but not what was written: a device
    /// is present but in an unexpected state.
    Config,
}

impl<E> From<E> for Error<E> {
    fn from(e: E) -> Self {
        Error::Transport(e)
    }
}

/// ADS1018 driver
///
/// Owns the in-memory configuration register and a [`Transport`]. Every
/// device-touching method performs exactly one begin/exchange/end (or
/// begin/sample/end) transaction and blocks until the transport returns.
/// The driver takes no locks; callers sharing a handle must serialize
/// access themselves.
pub struct Ads1018<T> {
    transport: T,
    config: Config,
}

impl<T: Transport> Ads1018<T> {
    /// Creates a new driver from a transport, holding the default
    /// configuration (±2048 mV, single-shot, 1600 SPS, pull-up enabled).
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            config: Config::DEFAULT,
        }
    }

    /// Consume the driver and return the owned transport.
    pub fn release(self) -> T {
        self.transport
    }

    /// One-shot presence check: rewrite the default configuration and
    /// verify the device echoes it back exactly.
    ///
    /// Optional; skipping it only reduces fault detection.
    pub fn init(&mut self) -> Result<(), Error<T::Error>> {
        self.config = Config::DEFAULT;
        let echoed = self.read_config()?;
        if echoed == 0x0000 || echoed == 0xFFFF {
            return Err(Error::Coms);
        }
        if echoed != self.config.bits() {
            return Err(Error::Config);
        }
        Ok(())
    }

    /// Select the analog pair (or temperature sensor) to digitize. Takes
    /// effect on the device with the next conversion trigger.
    pub fn set_input(&mut self, input: Input) {
        self.config.set_input(input);
    }

    /// Set the full-scale range. Takes effect with the next trigger.
    pub fn set_full_scale(&mut self, range: FullScale) {
        self.config.set_full_scale(range);
    }

    /// Set the data rate. Takes effect with the next trigger.
    pub fn set_sample_rate(&mut self, rate: DataRate) {
        self.config.set_sample_rate(rate);
    }

    /// The currently held input selection. Reads in-memory state only.
    pub fn input(&self) -> Input {
        self.config.input()
    }

    /// The currently held configuration.
    pub fn config(&self) -> Config {
        self.config
    }

    /// Trigger a one-shot conversion. The bytes clocked back during this
    /// transaction are stale by device design and are discarded.
    pub fn start_conversion(&mut self) -> Result<(), Error<T::Error>> {
        self.transact(true).map(|_| ())
    }

    /// Whether a conversion is still in progress, sampled from the DOUT
    /// status line with chip select held. Meaningful only with the pull-up
    /// enabled, which the default configuration guarantees.
    ///
    /// Polling is caller-driven; impose your own timeout around the loop if
    /// the device may never lower the line.
    pub fn is_busy(&mut self) -> Result<bool, Error<T::Error>> {
        self.transport.begin()?;
        let sampled = self.transport.status_line();
        let ended = self.transport.end();
        let high = sampled?;
        ended?;
        Ok(high)
    }

    /// Read the previous conversion's raw left-justified result without
    /// triggering a new one.
    pub fn read_result(&mut self) -> Result<i16, Error<T::Error>> {
        self.transact(false)
    }

    /// Read the previous conversion's raw result while triggering the next:
    /// the steady-state polling call once a first conversion has been kicked
    /// off via [`start_conversion`](Self::start_conversion).
    pub fn restart_and_read(&mut self) -> Result<i16, Error<T::Error>> {
        self.transact(true)
    }

    /// Read back the configuration register from the device: the current
    /// configuration is rewritten, followed by two `0xFF` padding bytes
    /// during which the device echoes the configuration it accepted.
    pub fn read_config(&mut self) -> Result<u16, Error<T::Error>> {
        let mut buffer = [0u8; 4];
        buffer[..2].copy_from_slice(&self.config.frame(false));
        buffer[2] = 0xFF;
        buffer[3] = 0xFF;

        self.transport.begin()?;
        let exchanged = self.transport.exchange(PORT_ADDRESS, &mut buffer);
        let ended = self.transport.end();
        exchanged?;
        ended?;

        Ok(u16::from_be_bytes([buffer[2], buffer[3]]))
    }

    /// One 2-byte frame: write the held configuration, with or without the
    /// start bit, and return whatever the device clocked back. Chip select
    /// is released even when the exchange fails.
    fn transact(&mut self, start: bool) -> Result<i16, Error<T::Error>> {
        let mut buffer = self.config.frame(start);

        self.transport.begin()?;
        let exchanged = self.transport.exchange(PORT_ADDRESS, &mut buffer);
        let ended = self.transport.end();
        exchanged?;
        ended?;

        Ok(i16::from_be_bytes(buffer))
    }
}

/// Right-justify a raw left-justified reading: arithmetic shift past the
/// four padding bits, preserving the sign.
pub fn right_justified(raw: i16) -> i16 {
    raw >> 4
}

/// Degrees Celsius per LSB of a right-justified temperature reading.
const DEGREES_PER_LSB: f32 = 0.125;

/// Convert a raw temperature-mode reading to degrees Celsius. Only
/// meaningful when the conversion ran with [`Input::Temperature`] selected.
pub fn temperature(raw: i16) -> f32 {
    f32::from(right_justified(raw)) * DEGREES_PER_LSB
}

//! The 16-bit configuration register model for the ADS1018.

/// Start-conversion bit. Writing it high triggers a one-shot conversion;
/// it reads back low while a conversion is in progress.
pub(crate) const START: u16 = 0x8000;

const MUX_MASK: u16 = 0x7000;
const PGA_MASK: u16 = 0x0E00;
const SINGLE_SHOT: u16 = 0x0100;
const DATA_RATE_MASK: u16 = 0x00E0;
const TEMP_SENSE: u16 = 0x0010;
const PULL_UP: u16 = 0x0008;
const NOP_VALID: u16 = 0x0002;
const RESERVED: u16 = 0x0001;

/// The temperature sensor flag selects the input together with the
/// multiplexer bits, so the two groups are always masked as one.
const MUX_TEMP_MASK: u16 = MUX_MASK | TEMP_SENSE;

/// Input selection for the next conversion.
///
/// Differential pairs are named positive input first. [`Input::Temperature`]
/// routes the internal temperature sensor instead of an analog pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum Input {
    /// AIN0 (+) / AIN1 (−)
    Ain0Ain1 = 0x0000,
    /// AIN0 (+) / AIN3 (−)
    Ain0Ain3 = 0x1000,
    /// AIN1 (+) / AIN3 (−)
    Ain1Ain3 = 0x2000,
    /// AIN2 (+) / AIN3 (−)
    Ain2Ain3 = 0x3000,
    /// AIN0 single-ended against ground
    Ain0Gnd = 0x4000,
    /// AIN1 single-ended against ground
    Ain1Gnd = 0x5000,
    /// AIN2 single-ended against ground
    Ain2Gnd = 0x6000,
    /// AIN3 single-ended against ground
    Ain3Gnd = 0x7000,
    /// Internal temperature sensor, 0.125 °C per right-justified LSB
    Temperature = 0x0010,
}

impl Input {
    /// Iterate over all input selections.
    pub fn all() -> impl Iterator<Item = Self> {
        [
            Self::Ain0Ain1,
            Self::Ain0Ain3,
            Self::Ain1Ain3,
            Self::Ain2Ain3,
            Self::Ain0Gnd,
            Self::Ain1Gnd,
            Self::Ain2Gnd,
            Self::Ain3Gnd,
            Self::Temperature,
        ]
        .into_iter()
    }
}

/// Full-scale range of the programmable-gain amplifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum FullScale {
    /// ±6144 mV
    Fsr6144mV = 0x0000,
    /// ±4096 mV
    Fsr4096mV = 0x0200,
    /// ±2048 mV
    Fsr2048mV = 0x0400,
    /// ±1024 mV
    Fsr1024mV = 0x0600,
    /// ±512 mV
    Fsr512mV = 0x0800,
    /// ±256 mV
    Fsr256mV = 0x0A00,
}

/// Conversion speed, trading noise for latency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum DataRate {
    /// 128 samples per second
    Sps128 = 0x0000,
    /// 250 samples per second
    Sps250 = 0x0020,
    /// 490 samples per second
    Sps490 = 0x0040,
    /// 920 samples per second
    Sps920 = 0x0060,
    /// 1600 samples per second
    Sps1600 = 0x0080,
    /// 2400 samples per second
    Sps2400 = 0x00A0,
    /// 3300 samples per second
    Sps3300 = 0x00C0,
}

/// In-memory mirror of the device configuration register.
///
/// Setters mask their own field and leave every other bit untouched. The
/// valid-data no-op marker and the reserved bit are fixed by [`Config::DEFAULT`]
/// and no setter can clear them, so the register never holds a bit pattern
/// the device would reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config(u16);

impl Config {
    /// ±2048 mV, single-shot, 1600 SPS, DOUT pull-up enabled, valid-data
    /// no-op marker and reserved bit set.
    pub const DEFAULT: Self = Config(
        FullScale::Fsr2048mV as u16
            | SINGLE_SHOT
            | DataRate::Sps1600 as u16
            | PULL_UP
            | NOP_VALID
            | RESERVED,
    );

    /// Select the input for the next conversion.
    pub fn set_input(&mut self, input: Input) {
        self.0 = (self.0 & !MUX_TEMP_MASK) | input as u16;
    }

    /// Select the full-scale range for the next conversion.
    pub fn set_full_scale(&mut self, range: FullScale) {
        self.0 = (self.0 & !PGA_MASK) | range as u16;
    }

    /// Select the data rate for the next conversion.
    pub fn set_sample_rate(&mut self, rate: DataRate) {
        self.0 = (self.0 & !DATA_RATE_MASK) | rate as u16;
    }

    /// The currently selected input.
    pub fn input(&self) -> Input {
        if self.0 & TEMP_SENSE != 0 {
            return Input::Temperature;
        }
        match self.0 & MUX_MASK {
            0x0000 => Input::Ain0Ain1,
            0x1000 => Input::Ain0Ain3,
            0x2000 => Input::Ain1Ain3,
            0x3000 => Input::Ain2Ain3,
            0x4000 => Input::Ain0Gnd,
            0x5000 => Input::Ain1Gnd,
            0x6000 => Input::Ain2Gnd,
            _ => Input::Ain3Gnd,
        }
    }

    /// The packed register value as it goes over the wire.
    pub fn bits(self) -> u16 {
        self.0
    }

    /// Big-endian wire frame, optionally with the start-conversion bit set.
    pub(crate) fn frame(self, start: bool) -> [u8; 2] {
        let bits = if start { self.0 | START } else { self.0 };
        bits.to_be_bytes()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_register_value() {
        assert_eq!(Config::DEFAULT.bits(), 0x058B);
    }

    #[test]
    fn setters_touch_only_their_field() {
        let mut config = Config::DEFAULT;

        config.set_input(Input::Ain2Gnd);
        assert_eq!(config.bits(), 0x658B);

        config.set_full_scale(FullScale::Fsr256mV);
        assert_eq!(config.bits(), 0x6B8B);

        config.set_sample_rate(DataRate::Sps128);
        assert_eq!(config.bits(), 0x6B0B);

        config.set_input(Input::Temperature);
        assert_eq!(config.bits(), 0x0B1B);
    }

    #[test]
    fn input_round_trips_through_the_register() {
        let mut config = Config::DEFAULT;
        assert_eq!(config.input(), Input::Ain0Ain1);

        for input in Input::all() {
            config.set_input(input);
            assert_eq!(config.input(), input);
        }
    }

    #[test]
    fn temperature_selection_clears_the_mux_bits() {
        let mut config = Config::DEFAULT;
        config.set_input(Input::Ain3Gnd);
        config.set_input(Input::Temperature);
        assert_eq!(config.bits() & 0x7000, 0);
    }

    #[test]
    fn frame_is_big_endian_with_optional_start_bit() {
        assert_eq!(Config::DEFAULT.frame(false), [0x05, 0x8B]);
        assert_eq!(Config::DEFAULT.frame(true), [0x85, 0x8B]);
    }
}

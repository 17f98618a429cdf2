//! Raspberry Pi demo: poll the ADS1018 die temperature over SPI0.

use std::thread;
use std::time::Duration;

use ads1018::{temperature, Ads1018, Input, SpiPins};
use anyhow::anyhow;
use rppal::gpio::Gpio;
use rppal::spi::{Bus, Mode, SlaveSelect, Spi};

fn main() -> Result<(), anyhow::Error> {
    let gpio = Gpio::new()?;

    let spi = Spi::new(Bus::Spi0, SlaveSelect::Ss0, 1_000_000, Mode::Mode1)?;

    // Chip select driven manually so DOUT stays observable for busy-polling.
    let cs = gpio.get(24)?.into_output_high();
    let dout = gpio.get(9)?.into_input_pullup();

    let mut adc = Ads1018::new(SpiPins::new(spi, cs, dout));

    adc.init()
        .map_err(|e| anyhow!("no ADS1018 on the bus: {e:?}"))?;

    adc.set_input(Input::Temperature);
    adc.start_conversion()
        .map_err(|e| anyhow!("trigger failed: {e:?}"))?;

    loop {
        while adc
            .is_busy()
            .map_err(|e| anyhow!("busy poll failed: {e:?}"))?
        {
            thread::sleep(Duration::from_micros(100));
        }

        let raw = adc
            .restart_and_read()
            .map_err(|e| anyhow!("readback failed: {e:?}"))?;

        println!("Die temperature: {} °C", temperature(raw));

        thread::sleep(Duration::from_millis(500));
    }
}

//! # WS2812 Strip over Hardware SPI
//!
//! Drives the NeoPixel ring from the Pi's SPI0 MOSI pin. WS2812 timing
//! is faked on the SPI bus: at 2.4 MHz every data bit becomes three SPI
//! bits (`110` for one, `100` for zero), which lands inside the strip's
//! pulse-width tolerances without bit-banged GPIO or kernel patches.
//!
//! The configured brightness scalar (0.0–1.0) is applied here, at the
//! edge, so the palette and compositor stay in intensity units.
//!
//! Requires the `hardware` feature and a Linux host with /dev/spidev0.0
//! (enable SPI via raspi-config).

use ring_clock_lib::device::{DeviceError, LedStrip};
use ring_clock_lib::{Frame, Rgb};
use rppal::spi::{Bus, Mode, SlaveSelect, Spi};

/// 2.4 MHz → 3 SPI bits per WS2812 bit, 1.25 µs per LED bit.
const SPI_CLOCK_HZ: u32 = 2_400_000;

/// Trailing zero bytes for the reset latch. 30 bytes at 2.4 MHz is
/// 100 µs of low, comfortably past the ≥80 µs the datasheet asks for.
const RESET_BYTES: usize = 30;

/// Expand one color byte into its 3-bits-per-bit SPI encoding.
fn encode_byte(byte: u8, out: &mut Vec<u8>) {
    let mut acc: u32 = 0;
    for bit in (0..8).rev() {
        acc <<= 3;
        acc |= if byte >> bit & 1 == 1 { 0b110 } else { 0b100 };
    }
    out.extend_from_slice(&acc.to_be_bytes()[1..4]);
}

pub struct Ws2812Spi {
    spi: Spi,
    staged: Frame,
    brightness: f32,
}

impl Ws2812Spi {
    /// Open SPI0/CE0 and prepare a dark strip.
    pub fn new(pixel_count: usize, brightness: f32) -> Result<Self, DeviceError> {
        let spi = Spi::new(Bus::Spi0, SlaveSelect::Ss0, SPI_CLOCK_HZ, Mode::Mode0)
            .map_err(|e| DeviceError::Spi(e.to_string()))?;
        Ok(Ws2812Spi {
            spi,
            staged: vec![Rgb::OFF; pixel_count],
            brightness: brightness.clamp(0.0, 1.0),
        })
    }

    fn scale(&self, channel: u8) -> u8 {
        (f32::from(channel) * self.brightness).round() as u8
    }
}

impl LedStrip for Ws2812Spi {
    fn len(&self) -> usize {
        self.staged.len()
    }

    fn set(&mut self, index: usize, color: Rgb) {
        if let Some(pixel) = self.staged.get_mut(index) {
            *pixel = color;
        }
    }

    fn flush(&mut self) -> Result<(), DeviceError> {
        // GRB wire order, 3 encoded bytes per channel, then the latch
        let mut buf = Vec::with_capacity(self.staged.len() * 9 + RESET_BYTES);
        for pixel in &self.staged {
            encode_byte(self.scale(pixel.g), &mut buf);
            encode_byte(self.scale(pixel.r), &mut buf);
            encode_byte(self.scale(pixel.b), &mut buf);
        }
        buf.resize(buf.len() + RESET_BYTES, 0);

        self.spi
            .write(&buf)
            .map_err(|e| DeviceError::Spi(e.to_string()))?;
        Ok(())
    }
}

//! # Output Devices
//!
//! The rendering core talks to LEDs through the [`LedStrip`] trait:
//! stage colors with `set`, push the whole frame with `flush`. A flush
//! is atomic from the caller's side; partial frames are never shown.
//!
//! Three implementations cover the deployment spectrum:
//! - the real WS2812 strip lives in the binary behind the `hardware`
//!   feature (SPI needs root-adjacent permissions and a Linux host)
//! - [`TerminalStrip`] renders the ring as one ANSI truecolor line for
//!   `--stdout` development mode
//! - [`MemoryStrip`] records frames for tests and headless runs

use crate::{Frame, Rgb};
use std::io::{self, Write};
use thiserror::Error;

/// Failures pushing a frame to the physical device.
///
/// Flush errors are recoverable by contract: the driver logs them and
/// tries again next tick, since one dropped frame is cosmetic.
#[derive(Error, Debug)]
pub enum DeviceError {
    /// Writing to the output stream or device node failed
    #[error("device IO: {0}")]
    Io(#[from] io::Error),

    /// SPI transfer to the LED strip failed
    #[error("SPI transfer failed: {0}")]
    Spi(String),
}

/// An addressable LED strip (or something pretending to be one).
pub trait LedStrip {
    /// Number of addressable positions.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stage a color; nothing is visible until [`LedStrip::flush`].
    /// Out-of-range indices are ignored.
    fn set(&mut self, index: usize, color: Rgb);

    /// Push the staged frame to the device in one piece.
    fn flush(&mut self) -> Result<(), DeviceError>;

    /// Stage a whole frame. Extra entries beyond the strip are dropped.
    fn write_frame(&mut self, frame: &Frame) {
        for (index, color) in frame.iter().enumerate().take(self.len()) {
            self.set(index, *color);
        }
    }

    /// Stage all-off and flush. This is the guaranteed shutdown path.
    fn blackout(&mut self) -> Result<(), DeviceError> {
        for index in 0..self.len() {
            self.set(index, Rgb::OFF);
        }
        self.flush()
    }
}

/// In-memory strip: keeps the staged frame and a snapshot of the last
/// flush, so tests can assert on exactly what the hardware would have
/// shown.
#[derive(Debug, Clone)]
pub struct MemoryStrip {
    staged: Frame,
    last_flush: Frame,
    flush_count: usize,
}

impl MemoryStrip {
    pub fn new(pixel_count: usize) -> Self {
        MemoryStrip {
            staged: vec![Rgb::OFF; pixel_count],
            last_flush: vec![Rgb::OFF; pixel_count],
            flush_count: 0,
        }
    }

    /// The frame as of the most recent flush.
    pub fn displayed(&self) -> &Frame {
        &self.last_flush
    }

    pub fn flush_count(&self) -> usize {
        self.flush_count
    }
}

impl LedStrip for MemoryStrip {
    fn len(&self) -> usize {
        self.staged.len()
    }

    fn set(&mut self, index: usize, color: Rgb) {
        if let Some(pixel) = self.staged.get_mut(index) {
            *pixel = color;
        }
    }

    fn flush(&mut self) -> Result<(), DeviceError> {
        self.last_flush.clone_from(&self.staged);
        self.flush_count += 1;
        Ok(())
    }
}

/// Development-mode strip: one line of colored dots, redrawn in place
/// with a carriage return, for working on the clock without hardware.
pub struct TerminalStrip {
    staged: Frame,
}

impl TerminalStrip {
    pub fn new(pixel_count: usize) -> Self {
        TerminalStrip {
            staged: vec![Rgb::OFF; pixel_count],
        }
    }
}

impl LedStrip for TerminalStrip {
    fn len(&self) -> usize {
        self.staged.len()
    }

    fn set(&mut self, index: usize, color: Rgb) {
        if let Some(pixel) = self.staged.get_mut(index) {
            *pixel = color;
        }
    }

    fn flush(&mut self) -> Result<(), DeviceError> {
        let mut out = io::stdout().lock();
        write!(out, "\r")?;
        for pixel in &self.staged {
            if *pixel == Rgb::OFF {
                write!(out, "\x1b[2m·\x1b[0m")?;
            } else {
                write!(out, "\x1b[38;2;{};{};{}m●\x1b[0m", pixel.r, pixel.g, pixel.b)?;
            }
        }
        out.flush()?;
        Ok(())
    }
}

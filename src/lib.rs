//! # Ring Clock Core Library
//!
//! This library contains the rendering engine for a NeoPixel ring analog
//! clock: the time-to-position mapping, the frame compositor with its
//! hand-overlap color rules, and the Morse pulse scheduler used for the
//! station ident. It targets small boards like the Raspberry Pi Zero W,
//! so everything here is allocation-light and hardware-free: the actual
//! LED bus lives behind the [`device::LedStrip`] trait and is provided by
//! the binary.
//!
//! ## Design Philosophy
//!
//! ### Pure core, thin edges
//! - **Deterministic rendering**: [`face::compose`] is a pure function
//!   from hand positions to a frame; the same inputs always produce a
//!   bit-identical buffer, which keeps it trivially testable.
//! - **No hidden hardware state**: the strip handle is constructed once
//!   by the driver and passed explicitly; the library never touches GPIO.
//! - **Injectable time**: the run loop consumes a [`clock::ClockSource`]
//!   so tests drive it with a fake clock instead of the wall clock.
//!
//! ### Memory Efficiency
//! - A frame is `pixel_count` × 3 bytes (180 bytes for the standard
//!   60-pixel ring), rebuilt in place each second.
//! - The Morse scheduler precomputes its step list once per ident
//!   (a few hundred bytes) and is dropped when the transmission ends.
//!
//! ## Core Types
//!
//! - [`Rgb`]: one LED's color, channel triple already scaled to the
//!   configured intensity
//! - [`Frame`]: a full ring's worth of colors, flushed atomically

// Module declarations
pub mod clock;
pub mod config;
pub mod console;
pub mod device;
pub mod driver;
pub mod face;
pub mod geometry;
pub mod morse;
pub mod palette;

/// A single LED color as a red/green/blue channel triple.
///
/// Channel values are pre-scaled by the configured intensity (0–255);
/// the global output brightness scalar is applied later, at the device.
///
/// # Example
/// ```
/// use ring_clock_lib::Rgb;
///
/// let red = Rgb { r: 25, g: 0, b: 0 };
/// assert_ne!(red, Rgb::OFF);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// All channels dark, the frame background.
    pub const OFF: Rgb = Rgb { r: 0, g: 0, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }
}

/// One full ring of colors, index 0 at twelve o'clock, clockwise.
///
/// Frames are rebuilt from scratch every tick (no diffing against the
/// previous frame) and handed to the device in one piece.
pub type Frame = Vec<Rgb>;

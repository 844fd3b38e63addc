//! # Clock Face Palette
//!
//! The eight colors the face renderer is allowed to use, pre-scaled by
//! the configured base intensity. The green channel is halved relative
//! to the others on purpose: at equal drive levels WS2812 green reads
//! noticeably brighter than red or blue, and the original hardware was
//! calibrated with that compensation baked in. Do not "fix" it.

use crate::Rgb;

/// Intensity-scaled colors for the face and ident renderers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    /// Second hand
    pub red: Rgb,
    /// Minute hand (half-intensity channel, perceptual calibration)
    pub green: Rgb,
    /// Hour hand
    pub blue: Rgb,
    /// Full three-hand overlap, and Morse pulses
    pub white: Rgb,
    /// Second + minute overlap
    pub yellow: Rgb,
    /// Second + hour overlap
    pub cyan: Rgb,
    /// Minute + hour overlap
    pub magenta: Rgb,
    /// Background
    pub off: Rgb,
}

impl Palette {
    /// Build the palette for a base intensity (0–255).
    ///
    /// # Example
    /// ```
    /// use ring_clock_lib::palette::Palette;
    ///
    /// let p = Palette::new(25);
    /// assert_eq!(p.red.r, 25);
    /// assert_eq!(p.green.g, 12); // halved
    /// ```
    pub fn new(intensity: u8) -> Self {
        let i = intensity;
        Palette {
            red: Rgb::new(i, 0, 0),
            green: Rgb::new(0, i / 2, 0),
            blue: Rgb::new(0, 0, i),
            white: Rgb::new(i, i, i),
            yellow: Rgb::new(i, i, 0),
            cyan: Rgb::new(0, i, i),
            magenta: Rgb::new(i, 0, i),
            off: Rgb::OFF,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels_scale_with_intensity() {
        let p = Palette::new(200);
        assert_eq!(p.red, Rgb::new(200, 0, 0));
        assert_eq!(p.blue, Rgb::new(0, 0, 200));
        assert_eq!(p.white, Rgb::new(200, 200, 200));
        assert_eq!(p.yellow, Rgb::new(200, 200, 0));
        assert_eq!(p.cyan, Rgb::new(0, 200, 200));
        assert_eq!(p.magenta, Rgb::new(200, 0, 200));
        assert_eq!(p.off, Rgb::OFF);
    }

    #[test]
    fn green_is_halved_for_perception() {
        let p = Palette::new(25);
        assert_eq!(p.green, Rgb::new(0, 12, 0));
    }

    #[test]
    fn zero_intensity_is_all_dark() {
        let p = Palette::new(0);
        assert_eq!(p.white, Rgb::OFF);
        assert_eq!(p.green, Rgb::OFF);
    }
}

//! # Ring Geometry and Hand Mapping
//!
//! Maps wall-clock time onto LED indices. The ring is divided into
//! twelve hour sectors; the hour hand sweeps smoothly through its sector
//! as the minutes pass instead of jumping once per hour.
//!
//! Geometry validation happens once, at construction. A pixel count that
//! does not divide into twelve equal hour sectors (or whose sector size
//! does not divide the 60-minute hour) is a configuration error that
//! must stop startup. It is never rounded or silently truncated.

use crate::clock::WallTime;
use thiserror::Error;

/// Ring geometries this clock refuses to drive.
///
/// All variants are construction-time failures; once a [`RingGeometry`]
/// exists, every mapping function on it is total.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GeometryError {
    /// The ring has no pixels at all.
    #[error("pixel count must be greater than zero")]
    Empty,

    /// Pixel count does not split into twelve equal hour sectors.
    #[error("pixel count {0} does not divide into twelve hour sectors")]
    NotTwelveSectors(usize),

    /// Sector size does not divide the 60-minute hour evenly, so the
    /// hour hand could not advance at a uniform minute interval.
    #[error("{0} LEDs per hour sector does not divide a 60-minute hour")]
    UnevenMinuteStep(usize),
}

/// Immutable description of the LED ring.
///
/// Derived fields are computed once so the per-tick mapping is just two
/// integer divisions and a multiply.
///
/// # Example
/// ```
/// use ring_clock_lib::geometry::RingGeometry;
///
/// let ring = RingGeometry::new(60).unwrap();
/// assert_eq!(ring.leds_per_hour_sector, 5);
/// assert_eq!(ring.minutes_per_led, 12);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct RingGeometry {
    /// Number of addressable LEDs on the ring
    pub pixel_count: usize,
    /// LEDs in each of the twelve hour sectors (`pixel_count / 12`)
    pub leds_per_hour_sector: usize,
    /// Minutes that pass before the hour hand advances one LED
    pub minutes_per_led: usize,
}

/// LED indices for the three hands on one tick. Recomputed every second,
/// never persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HandPositions {
    pub second_pos: usize,
    pub minute_pos: usize,
    pub hour_pos: usize,
}

impl RingGeometry {
    /// Validate and build the geometry for a ring of `pixel_count` LEDs.
    ///
    /// # Errors
    /// Returns [`GeometryError`] when the count is zero, not divisible
    /// by twelve, or yields an hour sector that does not divide 60
    /// minutes evenly (e.g. 84 pixels → 7 LEDs per sector).
    pub fn new(pixel_count: usize) -> Result<Self, GeometryError> {
        if pixel_count == 0 {
            return Err(GeometryError::Empty);
        }
        if pixel_count % 12 != 0 {
            return Err(GeometryError::NotTwelveSectors(pixel_count));
        }
        let leds_per_hour_sector = pixel_count / 12;
        if 60 % leds_per_hour_sector != 0 {
            return Err(GeometryError::UnevenMinuteStep(leds_per_hour_sector));
        }
        Ok(RingGeometry {
            pixel_count,
            leds_per_hour_sector,
            minutes_per_led: 60 / leds_per_hour_sector,
        })
    }

    /// LED index of the hour hand.
    ///
    /// The hand sits at the start of its hour sector and creeps forward
    /// one LED every `minutes_per_led` minutes, reaching the next sector
    /// exactly at the top of the next hour.
    pub fn hour_led(&self, hour: u8, minute: u8) -> usize {
        (hour as usize % 12) * self.leds_per_hour_sector + minute as usize / self.minutes_per_led
    }

    /// LED index of the minute hand.
    ///
    /// Identity on the standard 60-pixel ring; on smaller rings the
    /// minute value is scaled into the available pixels with the same
    /// floor rule the hour hand uses.
    pub fn minute_led(&self, minute: u8) -> usize {
        minute as usize * self.pixel_count / 60
    }

    /// LED index of the second hand (same scaling as the minute hand).
    pub fn second_led(&self, second: u8) -> usize {
        second as usize * self.pixel_count / 60
    }

    /// All three hand positions for one wall-clock reading.
    pub fn hands(&self, time: WallTime) -> HandPositions {
        HandPositions {
            second_pos: self.second_led(time.second),
            minute_pos: self.minute_led(time.minute),
            hour_pos: self.hour_led(time.hour, time.minute),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_ring_geometry() {
        let ring = RingGeometry::new(60).unwrap();
        assert_eq!(ring.pixel_count, 60);
        assert_eq!(ring.leds_per_hour_sector, 5);
        assert_eq!(ring.minutes_per_led, 12);
    }

    #[test]
    fn rejects_invalid_pixel_counts() {
        assert_eq!(RingGeometry::new(0).unwrap_err(), GeometryError::Empty);
        assert_eq!(
            RingGeometry::new(50).unwrap_err(),
            GeometryError::NotTwelveSectors(50)
        );
        // 84 pixels gives 7 LEDs per sector; 7 does not divide 60
        assert_eq!(
            RingGeometry::new(84).unwrap_err(),
            GeometryError::UnevenMinuteStep(7)
        );
    }

    #[test]
    fn three_oclock_exact() {
        // hour=3, minute=0 on a 60-pixel ring lands at LED 15
        let ring = RingGeometry::new(60).unwrap();
        assert_eq!(ring.hour_led(3, 0), 15);
    }

    #[test]
    fn three_thirty_advances_within_sector() {
        // minute 30 with 12 minutes per LED pushes the hand 2 LEDs in
        let ring = RingGeometry::new(60).unwrap();
        assert_eq!(ring.hour_led(3, 30), 17);
    }

    #[test]
    fn hour_hand_advances_once_per_minute_step() {
        let ring = RingGeometry::new(60).unwrap();
        for hour in 0..24u8 {
            let mut prev = ring.hour_led(hour, 0);
            for minute in 1..60u8 {
                let led = ring.hour_led(hour, minute);
                assert!(led < 60, "hour LED out of range");
                // non-decreasing within the hour, stepping exactly at
                // each minutes_per_led boundary
                if minute as usize % ring.minutes_per_led == 0 {
                    assert_eq!(led, prev + 1, "h={hour} m={minute}");
                } else {
                    assert_eq!(led, prev, "h={hour} m={minute}");
                }
                prev = led;
            }
            // wraparound: the next hour starts one LED past this hour's
            // final position (mod ring size)
            let next = ring.hour_led((hour + 1) % 24, 0);
            assert_eq!(next, (prev + 1) % 60);
        }
    }

    #[test]
    fn second_and_minute_are_identity_on_60() {
        let ring = RingGeometry::new(60).unwrap();
        for v in 0..60u8 {
            assert_eq!(ring.second_led(v), v as usize);
            assert_eq!(ring.minute_led(v), v as usize);
        }
    }

    #[test]
    fn small_ring_scales_all_hands() {
        // 24-pixel ring: 2 LEDs per hour sector, hand advances every
        // 30 minutes; second/minute scale by 24/60
        let ring = RingGeometry::new(24).unwrap();
        assert_eq!(ring.minutes_per_led, 30);
        assert_eq!(ring.hour_led(3, 0), 6);
        assert_eq!(ring.hour_led(3, 30), 7);
        assert_eq!(ring.minute_led(30), 12);
        assert_eq!(ring.second_led(59), 23);
    }

    #[test]
    fn hands_stay_in_range() {
        for count in [12usize, 24, 36, 48, 60, 72] {
            let ring = RingGeometry::new(count).unwrap();
            for hour in 0..24u8 {
                for minute in (0..60u8).step_by(7) {
                    let hands = ring.hands(WallTime {
                        hour,
                        minute,
                        second: 59,
                    });
                    assert!(hands.second_pos < count);
                    assert!(hands.minute_pos < count);
                    assert!(hands.hour_pos < count);
                }
            }
        }
    }
}

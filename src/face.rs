//! # Clock Face Compositor
//!
//! Turns the three hand positions into a full frame. The interesting
//! part is overlap resolution: when hands share an LED the shared pixel
//! gets a blend color so the viewer can still tell which hands are
//! stacked there. The cases are priority-ordered and mutually exclusive;
//! the first match wins.
//!
//! The buffer is rebuilt from OFF every call. There is no incremental
//! diffing and no carry-over from the previous frame, which is what
//! makes the function pure and the display self-healing after a bad
//! flush.

use crate::geometry::HandPositions;
use crate::palette::Palette;
use crate::{Frame, Rgb};

/// Compose one frame from the hand positions.
///
/// Overlap rules, first match wins:
/// 1. all three together → WHITE
/// 2. second == minute   → YELLOW there, BLUE at the hour
/// 3. second == hour     → CYAN there, GREEN at the minute
/// 4. minute == hour     → MAGENTA there, RED at the second
/// 5. all distinct       → RED second, GREEN minute, BLUE hour
///
/// Every other pixel is OFF. Pure and total for positions inside the
/// ring; callers get positions from [`crate::geometry::RingGeometry`],
/// which guarantees that.
pub fn compose(hands: HandPositions, palette: &Palette, pixel_count: usize) -> Frame {
    let mut frame = vec![Rgb::OFF; pixel_count];
    let HandPositions {
        second_pos,
        minute_pos,
        hour_pos,
    } = hands;

    if second_pos == minute_pos && minute_pos == hour_pos {
        frame[second_pos] = palette.white;
    } else if second_pos == minute_pos {
        frame[second_pos] = palette.yellow;
        frame[hour_pos] = palette.blue;
    } else if second_pos == hour_pos {
        frame[second_pos] = palette.cyan;
        frame[minute_pos] = palette.green;
    } else if minute_pos == hour_pos {
        frame[minute_pos] = palette.magenta;
        frame[second_pos] = palette.red;
    } else {
        frame[second_pos] = palette.red;
        frame[minute_pos] = palette.green;
        frame[hour_pos] = palette.blue;
    }

    frame
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hands(second_pos: usize, minute_pos: usize, hour_pos: usize) -> HandPositions {
        HandPositions {
            second_pos,
            minute_pos,
            hour_pos,
        }
    }

    fn lit(frame: &Frame) -> Vec<(usize, Rgb)> {
        frame
            .iter()
            .enumerate()
            .filter(|(_, c)| **c != Rgb::OFF)
            .map(|(i, c)| (i, *c))
            .collect()
    }

    #[test]
    fn full_overlap_is_single_white() {
        let p = Palette::new(25);
        let frame = compose(hands(10, 10, 10), &p, 60);
        assert_eq!(lit(&frame), vec![(10, p.white)]);
    }

    #[test]
    fn second_minute_overlap() {
        let p = Palette::new(25);
        let frame = compose(hands(7, 7, 30), &p, 60);
        assert_eq!(lit(&frame), vec![(7, p.yellow), (30, p.blue)]);
    }

    #[test]
    fn second_hour_overlap() {
        let p = Palette::new(25);
        let frame = compose(hands(5, 20, 5), &p, 60);
        assert_eq!(lit(&frame), vec![(5, p.cyan), (20, p.green)]);
    }

    #[test]
    fn minute_hour_overlap() {
        let p = Palette::new(25);
        let frame = compose(hands(40, 15, 15), &p, 60);
        assert_eq!(lit(&frame), vec![(15, p.magenta), (40, p.red)]);
    }

    #[test]
    fn distinct_hands() {
        let p = Palette::new(25);
        let frame = compose(hands(1, 2, 3), &p, 60);
        assert_eq!(lit(&frame), vec![(1, p.red), (2, p.green), (3, p.blue)]);
    }

    #[test]
    fn lit_pixel_count_matches_overlap_class() {
        // 1 lit for full overlap, 2 for any pairwise, 3 for distinct
        let p = Palette::new(25);
        let cases = [
            (hands(4, 4, 4), 1),
            (hands(4, 4, 9), 2),
            (hands(4, 9, 4), 2),
            (hands(9, 4, 4), 2),
            (hands(1, 2, 3), 3),
        ];
        for (h, expected) in cases {
            let frame = compose(h, &p, 60);
            assert_eq!(lit(&frame).len(), expected, "{h:?}");
        }
    }

    #[test]
    fn compose_is_deterministic() {
        let p = Palette::new(25);
        let a = compose(hands(12, 34, 56), &p, 60);
        let b = compose(hands(12, 34, 56), &p, 60);
        assert_eq!(a, b);
    }

    #[test]
    fn background_is_fully_cleared() {
        let p = Palette::new(25);
        let frame = compose(hands(0, 1, 2), &p, 60);
        assert_eq!(frame.len(), 60);
        assert!(frame[3..].iter().all(|c| *c == Rgb::OFF));
    }
}

//! # Render Loop Driver
//!
//! Owns the strip handle, the clock source, and the optional Morse
//! transmitter, and sequences them on a single task: one frame per
//! second, ident pulse edges serviced in between. Nothing here is a
//! global: the original held the pixel handle as implicit shared state;
//! here the device is constructed once by `main` and handed in.
//!
//! Scheduling: instead of polling the clock in a tight loop, each pass
//! sleeps until the sooner of the next second boundary and the next
//! ident pulse edge. During an ident the clock face keeps rendering;
//! the transmitter owns exactly one pixel and the compositor's output
//! for that pixel is overridden while the transmission is active.
//!
//! Cancellation: Ctrl-C ends the loop and always runs the blackout path
//! so the ring is left dark, matching the original's KeyboardInterrupt
//! handler.

use crate::clock::{ClockSource, WallTime};
use crate::config::MorseConfig;
use crate::console::ConsoleMirror;
use crate::device::LedStrip;
use crate::face;
use crate::geometry::RingGeometry;
use crate::morse::{Transmitter, TxState};
use crate::palette::Palette;
use std::time::{Duration, Instant};

/// The assembled clock: strip, clock source, geometry, palette, mirror,
/// and ident settings.
pub struct RingClock<D: LedStrip, C: ClockSource> {
    device: D,
    clock: C,
    geometry: RingGeometry,
    palette: Palette,
    mirror: ConsoleMirror,
    morse: MorseConfig,
    tx: Option<Transmitter>,
    tx_level: Option<bool>,
    last_drawn: Option<WallTime>,
}

impl<D: LedStrip, C: ClockSource> RingClock<D, C> {
    pub fn new(
        device: D,
        clock: C,
        geometry: RingGeometry,
        palette: Palette,
        mirror: ConsoleMirror,
        morse: MorseConfig,
    ) -> Self {
        RingClock {
            device,
            clock,
            geometry,
            palette,
            mirror,
            morse,
            tx: None,
            tx_level: None,
            last_drawn: None,
        }
    }

    /// The strip, for inspection (tests use this with a memory strip).
    pub fn device(&self) -> &D {
        &self.device
    }

    /// Whether an ident transmission is currently on the air.
    pub fn ident_active(&self) -> bool {
        self.tx.is_some()
    }

    /// Run until interrupted. The startup ident (if enabled) begins
    /// immediately; the hourly ident is triggered at minute 0, second 0.
    /// Always blacks out the ring before returning.
    pub async fn run(&mut self) {
        if self.morse.enabled {
            self.start_ident();
        }
        self.mirror.align(self.clock.now().second);

        loop {
            tokio::select! {
                result = tokio::signal::ctrl_c() => {
                    if let Err(error) = result {
                        eprintln!("ctrl-c handler failed: {error}");
                    }
                    break;
                }
                _ = self.step() => {}
            }
        }

        // Guaranteed cleanup: leave the ring dark no matter what.
        if let Err(error) = self.device.blackout() {
            eprintln!("blackout on shutdown failed: {error}");
        }
    }

    /// One scheduling pass: render if the second changed, service ident
    /// edges, then sleep until the next interesting deadline.
    async fn step(&mut self) {
        let wall = self.clock.now();
        if self.last_drawn != Some(wall) {
            self.render_tick(wall);
            self.last_drawn = Some(wall);
        }
        self.service_ident();

        let mut wait = self.clock.until_next_second();
        if let Some(tx) = &self.tx {
            if let Some(edge) = tx.next_edge_in(Instant::now()) {
                wait = wait.min(edge);
            }
        }
        tokio::time::sleep(wait.max(Duration::from_millis(1))).await;
    }

    /// Compose and flush the frame for one wall-clock second.
    ///
    /// Public so embedders and tests can drive the clock tick by tick
    /// without the scheduler. Flush failures are logged and dropped;
    /// the next tick rebuilds the frame from scratch anyway.
    pub fn render_tick(&mut self, wall: WallTime) {
        if wall.minute == 0 && wall.second == 0 && self.morse.enabled && self.tx.is_none() {
            self.mirror.top_of_hour();
            self.start_ident();
        }

        let hands = self.geometry.hands(wall);
        let mut frame = face::compose(hands, &self.palette, self.geometry.pixel_count);

        // The transmitter owns its pixel for the duration of the ident.
        if let Some(mut tx) = self.tx.take() {
            match tx.poll(Instant::now()) {
                TxState::Active { level } => {
                    // same ignore-out-of-range contract as LedStrip::set
                    if let Some(pixel) = frame.get_mut(tx.led()) {
                        *pixel = self.ident_color(level);
                    }
                    self.tx_level = Some(level);
                    self.tx = Some(tx);
                }
                TxState::Done => {
                    self.tx_level = None;
                }
            }
        }

        self.device.write_frame(&frame);
        if let Err(error) = self.device.flush() {
            eprintln!("frame flush failed, retrying next tick: {error}");
        }
        self.mirror.tick(wall);
    }

    /// Begin transmitting the configured ident message now.
    pub fn start_ident(&mut self) {
        self.tx = Some(Transmitter::start(
            &self.morse.message,
            Duration::from_millis(self.morse.unit_ms),
            self.morse.led,
            Instant::now(),
        ));
        self.tx_level = None;
    }

    /// Apply any pulse edges that fired since the last pass, touching
    /// only the transmitter's pixel.
    fn service_ident(&mut self) {
        let Some(mut tx) = self.tx.take() else {
            return;
        };
        match tx.poll(Instant::now()) {
            TxState::Active { level } => {
                if self.tx_level != Some(level) {
                    self.device.set(tx.led(), self.ident_color(level));
                    if let Err(error) = self.device.flush() {
                        eprintln!("ident flush failed, retrying next edge: {error}");
                    }
                    self.tx_level = Some(level);
                }
                self.tx = Some(tx);
            }
            TxState::Done => {
                // restore the pixel to the face's jurisdiction
                self.device.set(tx.led(), self.palette.off);
                if let Err(error) = self.device.flush() {
                    eprintln!("ident flush failed: {error}");
                }
                self.tx_level = None;
            }
        }
    }

    fn ident_color(&self, level: bool) -> crate::Rgb {
        if level {
            self.palette.white
        } else {
            self.palette.off
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::MemoryStrip;
    use crate::Rgb;

    /// Clock pinned to a fixed reading.
    struct FakeClock(WallTime);

    impl ClockSource for FakeClock {
        fn now(&self) -> WallTime {
            self.0
        }

        fn until_next_second(&self) -> Duration {
            Duration::from_millis(5)
        }
    }

    fn wall(hour: u8, minute: u8, second: u8) -> WallTime {
        WallTime {
            hour,
            minute,
            second,
        }
    }

    fn quiet_morse() -> MorseConfig {
        MorseConfig {
            enabled: false,
            message: String::new(),
            unit_ms: 100,
            led: 0,
        }
    }

    fn clock_at(time: WallTime, morse: MorseConfig) -> RingClock<MemoryStrip, FakeClock> {
        RingClock::new(
            MemoryStrip::new(60),
            FakeClock(time),
            RingGeometry::new(60).unwrap(),
            Palette::new(25),
            ConsoleMirror::new(false),
            morse,
        )
    }

    #[test]
    fn tick_renders_the_expected_hands() {
        let time = wall(3, 30, 45);
        let mut clock = clock_at(time, quiet_morse());
        clock.render_tick(time);

        let p = Palette::new(25);
        let shown = clock.device().displayed();
        assert_eq!(shown[45], p.red); // second hand
        assert_eq!(shown[30], p.green); // minute hand
        assert_eq!(shown[17], p.blue); // hour hand: sector 3, +2 LEDs
        let lit = shown.iter().filter(|c| **c != Rgb::OFF).count();
        assert_eq!(lit, 3);
    }

    #[test]
    fn ident_owns_its_pixel_while_face_keeps_rendering() {
        // A very long unit keeps the first dit active through the test.
        let time = wall(9, 15, 40);
        let mut clock = clock_at(
            time,
            MorseConfig {
                enabled: true,
                message: "V".to_string(),
                unit_ms: 60_000,
                led: 0,
            },
        );
        clock.start_ident();
        clock.render_tick(time);

        let p = Palette::new(25);
        let shown = clock.device().displayed();
        assert_eq!(shown[0], p.white, "ident pulse on its reserved pixel");
        assert_eq!(shown[40], p.red, "face still renders during ident");
        assert!(clock.ident_active());
    }

    #[test]
    fn ident_finishes_and_releases_the_pixel() {
        let time = wall(9, 15, 40);
        let mut clock = clock_at(
            time,
            MorseConfig {
                enabled: true,
                // empty message: schedule is one word gap, long over
                // by the time we poll with a zero-length unit
                message: String::new(),
                unit_ms: 0,
                led: 0,
            },
        );
        clock.start_ident();
        clock.render_tick(time);

        assert!(!clock.ident_active());
        assert_eq!(clock.device().displayed()[0], Rgb::OFF);
    }

    #[test]
    fn ident_led_beyond_the_ring_is_ignored() {
        // A misconfigured ident pixel must not take down the clock;
        // the face still renders and the stray index is dropped, the
        // same way LedStrip::set drops it.
        let time = wall(3, 30, 45);
        let mut clock = clock_at(
            time,
            MorseConfig {
                enabled: true,
                message: "V".to_string(),
                unit_ms: 60_000,
                led: 99,
            },
        );
        clock.start_ident();
        clock.render_tick(time);

        let p = Palette::new(25);
        let shown = clock.device().displayed();
        assert_eq!(shown[45], p.red);
        assert_eq!(shown[30], p.green);
        assert_eq!(shown[17], p.blue);
        assert!(clock.ident_active());
    }

    #[test]
    fn hourly_rollover_starts_an_ident() {
        let time = wall(5, 0, 0);
        let mut clock = clock_at(
            time,
            MorseConfig {
                enabled: true,
                message: "V".to_string(),
                unit_ms: 60_000,
                led: 0,
            },
        );
        assert!(!clock.ident_active());
        clock.render_tick(time);
        assert!(clock.ident_active());
    }

    #[test]
    fn rerendering_the_same_second_is_identical() {
        let time = wall(11, 59, 59);
        let mut clock = clock_at(time, quiet_morse());
        clock.render_tick(time);
        let first = clock.device().displayed().clone();
        clock.render_tick(time);
        assert_eq!(clock.device().displayed(), &first);
    }
}

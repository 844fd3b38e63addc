//! # Morse Ident Encoder
//!
//! Encodes short text (the station ident) into a timed on/off pulse
//! schedule for a single LED, then plays that schedule back as a
//! polled state machine.
//!
//! ## Timing
//! Everything derives from one base unit `u` (International Morse
//! ratios):
//! - dit: `u` on, dah: `3u` on
//! - gap inside a character: `u` off
//! - gap after a character: `3u` off
//! - word gap / end of message: `7u` off
//!
//! ## Playback model
//! The schedule is precomputed by [`encode`] and stepped by
//! [`Transmitter`] against caller-supplied [`Instant`]s. The transmitter
//! owns exactly one LED index; the render loop polls it between frames
//! and writes only that pixel, so the clock face keeps moving while an
//! ident is on the air. (The original hardware blocked the whole display
//! for the duration of the message; deliberately not reproduced here.)

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// End-of-transmission sentinel. Append to a message to key the SK
/// prosign (`...-.-`).
pub const EOT: char = '\u{4}';

/// Dit/dah pattern for one character, if the character is in the table.
///
/// The table covers the subset of International Morse the original
/// station ident needed (callsign letters plus the attention signal
/// "V"); extend as required. Lookup is case-insensitive. Characters
/// outside the table are skipped by the encoder: no pulse, no gap.
pub fn pattern(ch: char) -> Option<&'static str> {
    match ch.to_ascii_uppercase() {
        'A' => Some(".-"),
        'B' => Some("-..."),
        'D' => Some("-.."),
        'E' => Some("."),
        'J' => Some(".---"),
        'N' => Some("-."),
        'O' => Some("---"),
        'U' => Some("..-"),
        'V' => Some("...-"),
        'W' => Some(".--"),
        'Y' => Some("-.--"),
        '8' => Some("---.."),
        EOT => Some("...-.-"),
        _ => None,
    }
}

/// One timed segment of the pulse schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    /// LED on (pulse) or off (gap)
    pub on: bool,
    pub len: Duration,
}

impl Step {
    fn on(len: Duration) -> Self {
        Step { on: true, len }
    }

    fn off(len: Duration) -> Self {
        Step { on: false, len }
    }
}

/// Encode a message into its pulse schedule.
///
/// Per encodable character: each symbol contributes an ON step (dit `u`,
/// dah `3u`) followed by an intra-symbol OFF of `u`, and the character
/// closes with an inter-character OFF of `3u`. A space is a real silent
/// gap: one OFF of `7u`, with no inter-character gap on top. Unknown
/// characters contribute nothing at all. The message always ends with a
/// word gap of `7u`, matching the cadence of back-to-back idents.
pub fn encode(message: &str, unit: Duration) -> Vec<Step> {
    let mut steps = Vec::new();

    for ch in message.chars() {
        if ch == ' ' {
            steps.push(Step::off(unit * 7));
            continue;
        }
        let Some(symbols) = pattern(ch) else {
            continue; // not in the table: skipped, by design
        };
        for symbol in symbols.chars() {
            let len = if symbol == '-' { unit * 3 } else { unit };
            steps.push(Step::on(len));
            steps.push(Step::off(unit));
        }
        steps.push(Step::off(unit * 3));
    }

    steps.push(Step::off(unit * 7));
    steps
}

/// Total wall time a schedule occupies.
pub fn total_duration(steps: &[Step]) -> Duration {
    steps.iter().map(|s| s.len).sum()
}

/// Playback state reported by [`Transmitter::poll`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TxState {
    /// Transmission in progress; the reserved LED should show `level`.
    Active { level: bool },
    /// Schedule exhausted; the machine is back in its idle state and the
    /// reserved LED is dark.
    Done,
}

/// Steps a pulse schedule against the clock.
///
/// State machine: each poll consumes every step whose deadline has
/// passed and reports the level of the step now in progress. Terminal
/// state is [`TxState::Done`]; a new transmission means a new
/// transmitter. Time is passed in explicitly so tests can drive the
/// machine without sleeping.
#[derive(Debug)]
pub struct Transmitter {
    steps: VecDeque<Step>,
    deadline: Instant,
    level: bool,
    led: usize,
}

impl Transmitter {
    /// Start transmitting `message` at `now`, keyed on LED `led`.
    pub fn start(message: &str, unit: Duration, led: usize, now: Instant) -> Self {
        let mut steps: VecDeque<Step> = encode(message, unit).into();
        // encode() always emits at least the trailing word gap
        let first = steps.pop_front().unwrap_or(Step::off(Duration::ZERO));
        Transmitter {
            steps,
            deadline: now + first.len,
            level: first.on,
            led,
        }
    }

    /// The one LED index this transmission owns.
    pub fn led(&self) -> usize {
        self.led
    }

    /// Advance past any expired steps and report the current state.
    pub fn poll(&mut self, now: Instant) -> TxState {
        while now >= self.deadline {
            match self.steps.pop_front() {
                Some(step) => {
                    self.level = step.on;
                    self.deadline += step.len;
                }
                None => return TxState::Done,
            }
        }
        TxState::Active { level: self.level }
    }

    /// Time until the next pulse edge, or `None` once the schedule is
    /// spent. The driver sleeps no longer than this while an ident is
    /// active.
    pub fn next_edge_in(&self, now: Instant) -> Option<Duration> {
        if self.steps.is_empty() && now >= self.deadline {
            return None;
        }
        Some(self.deadline.saturating_duration_since(now))
    }
}

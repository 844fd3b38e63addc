//! # Console Mirror
//!
//! Optional per-second echo of the clock on the controlling terminal,
//! carried over from the original deployment: a column of `*` marks
//! that lines up with the seconds, a banner at each minute, and a note
//! at the top of the hour. Handy when the ring is mounted somewhere the
//! terminal is not.
//!
//! The mirror is purely diagnostic. Every write ignores its result, so
//! a closed or broken stdout must never disturb LED rendering.

use crate::clock::WallTime;
use std::io::{self, Write};

/// Per-second terminal echo. Construct disabled to silence it entirely.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleMirror {
    enabled: bool,
}

/// Leading spaces that line the first `*` up with the current second's
/// column.
fn alignment(second: u8) -> String {
    " ".repeat(second as usize)
}

/// The banner printed when a new minute starts.
fn minute_banner(time: WallTime) -> String {
    format!("hour: {}  minute: {}", time.hour, time.minute)
}

impl ConsoleMirror {
    pub fn new(enabled: bool) -> Self {
        ConsoleMirror { enabled }
    }

    /// Startup alignment so mid-minute starts don't skew the column.
    pub fn align(&self, second: u8) {
        if !self.enabled {
            return;
        }
        let mut out = io::stdout().lock();
        let _ = write!(out, "\n{}", alignment(second));
        let _ = out.flush();
    }

    /// One tick marker per second; banner lines when the minute (and
    /// hour) roll over.
    pub fn tick(&self, time: WallTime) {
        if !self.enabled {
            return;
        }
        let mut out = io::stdout().lock();
        if time.second == 0 {
            let _ = writeln!(out);
            if time.minute == 0 {
                let _ = writeln!(out, "hour {}", time.hour);
            }
            let _ = writeln!(out, "{}", minute_banner(time));
        }
        let _ = write!(out, "*");
        let _ = out.flush();
    }

    /// Printed when the hourly ident starts.
    pub fn top_of_hour(&self) {
        if !self.enabled {
            return;
        }
        let mut out = io::stdout().lock();
        let _ = writeln!(out, "\ntop of hour");
        let _ = out.flush();
    }
}

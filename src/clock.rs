//! # Wall-Clock Source
//!
//! The rendering core consumes already-localized civil time; it never
//! does timezone math itself. This module supplies that reading: a
//! [`ClockSource`] trait the driver polls, and [`SystemClock`], the real
//! implementation over `chrono`.
//!
//! The original deployment polled the clock every 5 ms waiting for the
//! second to roll over. Here the driver instead asks the source how long
//! until the next boundary and sleeps exactly that, with a small floor
//! so a late wakeup can never degenerate into a busy spin.

use chrono::{FixedOffset, Local, Timelike, Utc};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Sleep floor: never schedule a shorter sleep than this.
pub const MIN_SLEEP: Duration = Duration::from_millis(5);

/// A timezone-resolved clock reading. Fields are plain civil time;
/// whoever built the [`ClockSource`] already dealt with zones and DST.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WallTime {
    /// 0–23
    pub hour: u8,
    /// 0–59
    pub minute: u8,
    /// 0–59
    pub second: u8,
}

impl WallTime {
    /// Capture the civil fields of any chrono time.
    pub fn of(t: &impl Timelike) -> Self {
        WallTime {
            hour: t.hour() as u8,
            minute: t.minute() as u8,
            second: t.second() as u8,
        }
    }
}

/// Supplies the current wall time and the wait until the next second.
///
/// Implementations must be monotonically consistent second-to-second; a
/// backward jump mid-run is outside the contract.
pub trait ClockSource {
    fn now(&self) -> WallTime;

    /// How long to sleep before the next second boundary. Must be at
    /// least [`MIN_SLEEP`] so the render loop cannot spin.
    fn until_next_second(&self) -> Duration;
}

/// Which civil timezone the clock displays.
///
/// Parsed from the config's timezone string: `"local"`, `"utc"`, or a
/// fixed offset like `"-05:00"`. Named-zone lookup is intentionally left
/// to the host: set the system timezone and use `local`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Timezone {
    Local,
    Utc,
    Fixed(FixedOffset),
}

/// Rejected timezone strings.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("unrecognized timezone {0:?} (expected \"local\", \"utc\", or \"+HH:MM\")")]
pub struct TimezoneParseError(pub String);

impl FromStr for Timezone {
    type Err = TimezoneParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || TimezoneParseError(s.to_string());
        match s.trim() {
            "local" | "Local" => Ok(Timezone::Local),
            "utc" | "UTC" | "Utc" => Ok(Timezone::Utc),
            spec => {
                // fixed offset: ±HH:MM
                let (sign, rest) = if let Some(rest) = spec.strip_prefix('+') {
                    (1i32, rest)
                } else if let Some(rest) = spec.strip_prefix('-') {
                    (-1i32, rest)
                } else {
                    return Err(bad());
                };
                let (hh, mm) = rest.split_once(':').ok_or_else(bad)?;
                // unsigned parse: the sign was already consumed above,
                // so "+-5:00" and friends are rejected here
                let hours: u32 = hh.parse().map_err(|_| bad())?;
                let minutes: u32 = mm.parse().map_err(|_| bad())?;
                if hours > 23 || minutes > 59 {
                    return Err(bad());
                }
                let secs = sign * (hours * 3600 + minutes * 60) as i32;
                FixedOffset::east_opt(secs).map(Timezone::Fixed).ok_or_else(bad)
            }
        }
    }
}

/// The real clock, backed by the operating system via `chrono`.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    tz: Timezone,
}

impl SystemClock {
    pub fn new(tz: Timezone) -> Self {
        SystemClock { tz }
    }
}

impl ClockSource for SystemClock {
    fn now(&self) -> WallTime {
        match self.tz {
            Timezone::Local => WallTime::of(&Local::now()),
            Timezone::Utc => WallTime::of(&Utc::now()),
            Timezone::Fixed(offset) => WallTime::of(&Utc::now().with_timezone(&offset)),
        }
    }

    fn until_next_second(&self) -> Duration {
        // subsecond phase is zone-independent
        let elapsed = u64::from(Utc::now().timestamp_subsec_millis()).min(999);
        Duration::from_millis(1000 - elapsed).max(MIN_SLEEP)
    }
}

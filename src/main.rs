//! # Ring Clock Application Entry Point
//!
//! This binary wires the rendering core to a concrete LED device and
//! runs the per-second loop. It supports both production mode (WS2812
//! ring over SPI, `--features hardware`) and development mode
//! (`--stdout`, ANSI ring in the terminal).

// Test modules
#[cfg(test)]
mod tests;

#[cfg(all(target_os = "linux", feature = "hardware"))]
mod ws2812_spi;

// Re-export library types for internal use
pub use ring_clock_lib::config::Config;

use anyhow::bail;
use ring_clock_lib::clock::{SystemClock, Timezone};
use ring_clock_lib::console::ConsoleMirror;
use ring_clock_lib::device::TerminalStrip;
use ring_clock_lib::driver::RingClock;
use ring_clock_lib::geometry::RingGeometry;
use ring_clock_lib::palette::Palette;
use std::env;

/// Run the clock against the terminal strip (no hardware required).
fn run_terminal(config: &Config, geometry: RingGeometry) -> anyhow::Result<()> {
    let clock = SystemClock::new(parse_timezone(config)?);
    let device = TerminalStrip::new(geometry.pixel_count);
    // the strip redraws one line in place; the tick mirror would fight
    // it for the cursor, so it stays off in terminal mode
    let mirror = ConsoleMirror::new(false);
    let mut ring = RingClock::new(
        device,
        clock,
        geometry,
        Palette::new(config.ring.intensity),
        mirror,
        config.morse.clone(),
    );

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(ring.run());
    println!();
    Ok(())
}

fn parse_timezone(config: &Config) -> anyhow::Result<Timezone> {
    Ok(config.clock.timezone.parse::<Timezone>()?)
}

/// Initialize the WS2812 ring over SPI and run the clock against it.
#[cfg(all(target_os = "linux", feature = "hardware"))]
fn run_hardware(config: &Config, geometry: RingGeometry) -> anyhow::Result<()> {
    eprintln!("🔧 Initializing WS2812 ring over SPI0...");
    eprintln!(
        "   {} pixels, intensity {}, brightness {:.2}",
        geometry.pixel_count, config.ring.intensity, config.ring.brightness
    );

    let device = ws2812_spi::Ws2812Spi::new(geometry.pixel_count, config.ring.brightness)?;
    eprintln!("✅ SPI bus open, strip ready");

    let clock = SystemClock::new(parse_timezone(config)?);
    let mirror = ConsoleMirror::new(config.clock.console_echo);
    let mut ring = RingClock::new(
        device,
        clock,
        geometry,
        Palette::new(config.ring.intensity),
        mirror,
        config.morse.clone(),
    );

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(ring.run());
    eprintln!("Ring blacked out, exiting");
    Ok(())
}

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    // Development mode: render the ring to stdout for testing without hardware
    let development_mode = env::args().any(|arg| arg == "--stdout");

    let config = Config::load();

    // Geometry problems are fatal by design: a ring that does not split
    // into twelve hour sectors is rejected here, never rounded.
    let geometry = RingGeometry::new(config.ring.pixel_count)?;

    if config.morse.enabled && config.morse.led >= geometry.pixel_count {
        bail!(
            "morse LED index {} is outside the {}-pixel ring",
            config.morse.led,
            geometry.pixel_count
        );
    }
    if !(0.0..=1.0).contains(&config.ring.brightness) {
        bail!(
            "brightness {} is outside 0.0–1.0",
            config.ring.brightness
        );
    }

    if development_mode {
        return run_terminal(&config, geometry);
    }

    #[cfg(all(target_os = "linux", feature = "hardware"))]
    {
        return run_hardware(&config, geometry);
    }

    #[cfg(all(target_os = "linux", not(feature = "hardware")))]
    {
        eprintln!("Hardware support not enabled. Rebuild with --features hardware to drive the ring.");
        eprintln!("Running in terminal mode instead:");
        return run_terminal(&config, geometry);
    }

    #[cfg(not(target_os = "linux"))]
    {
        eprintln!("Hardware mode is only available on Linux. Running in terminal mode.");
        return run_terminal(&config, geometry);
    }

    #[allow(unreachable_code)]
    Ok(())
}

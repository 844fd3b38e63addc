//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the
//! ring-config.toml file: ring geometry, brightness, timezone, and the
//! Morse ident settings. Configuration is read once at startup; there
//! is no runtime configuration surface.
//!
//! Missing or malformed files fall back to the defaults of the original
//! deployment (60-pixel ring, intensity 25, brightness 0.2, the
//! "VVV W8EDU VVV" ident at 100 ms per unit). An *invalid ring
//! geometry* is deliberately not a fallback case: geometry is
//! validated separately at startup and kills the process.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Application configuration loaded from ring-config.toml
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// LED ring hardware parameters
    pub ring: RingConfig,
    /// Timezone and console echo
    pub clock: ClockConfig,
    /// Morse ident settings
    pub morse: MorseConfig,
}

/// LED ring parameters
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RingConfig {
    /// Number of addressable LEDs; must divide into twelve hour sectors
    pub pixel_count: usize,
    /// Base channel intensity, 0–255 (palette colors scale from this)
    pub intensity: u8,
    /// Output brightness scalar, 0.0–1.0, applied at the device
    pub brightness: f32,
}

/// Time display configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClockConfig {
    /// "local", "utc", or a fixed offset like "-05:00"
    pub timezone: String,
    /// Mirror each second to the terminal (tick marks and banners)
    pub console_echo: bool,
}

/// Morse ident configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MorseConfig {
    /// Flash the ident at startup and at the top of each hour
    pub enabled: bool,
    /// Message text; spaces become word gaps, unknown characters are
    /// skipped
    pub message: String,
    /// Base pulse unit in milliseconds (dit length)
    pub unit_ms: u64,
    /// The one LED index the transmitter owns
    pub led: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            ring: RingConfig {
                pixel_count: 60,
                intensity: 25,
                brightness: 0.2,
            },
            clock: ClockConfig {
                timezone: "local".to_string(),
                console_echo: true,
            },
            morse: MorseConfig {
                enabled: true,
                message: "VVV W8EDU VVV".to_string(),
                unit_ms: 100,
                led: 0,
            },
        }
    }
}

impl Config {
    /// Load configuration from ring-config.toml
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path("ring-config.toml")
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => {
                    println!("Loaded configuration ({} pixels)", config.ring.pixel_count);
                    config
                }
                Err(e) => {
                    eprintln!("Warning: Invalid config file format: {}", e);
                    eprintln!("Using default configuration (60-pixel ring)");
                    Self::default()
                }
            },
            Err(_) => {
                eprintln!("Info: No config file found, using default configuration (60-pixel ring)");
                Self::default()
            }
        }
    }

    /// Save current configuration to ring-config.toml
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let contents = toml::to_string_pretty(self)?;
        fs::write("ring-config.toml", contents)?;
        println!("Configuration saved to ring-config.toml");
        Ok(())
    }
}

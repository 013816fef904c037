//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.

use serde::de::Error;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::feather::protocol::FramingMode;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub serial: SerialConfig,
    pub protocol: ProtocolConfig,
}

/// Serial port configuration
#[derive(Debug, Deserialize, Clone)]
pub struct SerialConfig {
    /// Device path; empty means auto-detect over the default paths
    #[serde(default)]
    pub port: String,

    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,

    /// Port timeout for blocking operations, in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

/// Protocol configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ProtocolConfig {
    #[serde(default)]
    pub framing: FramingMode,

    /// Pause after each value in simple framing, in milliseconds
    #[serde(default = "default_inter_value_delay_ms")]
    pub inter_value_delay_ms: u64,

    /// Channel used by the demo binary's heartbeat pulses
    #[serde(default)]
    pub heartbeat_channel: i32,
}

// Default value functions
fn default_baud_rate() -> u32 {
    115_200
}
fn default_timeout_ms() -> u64 {
    100
}
fn default_inter_value_delay_ms() -> u64 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            serial: SerialConfig {
                port: String::new(),
                baud_rate: default_baud_rate(),
                timeout_ms: default_timeout_ms(),
            },
            protocol: ProtocolConfig {
                framing: FramingMode::default(),
                inter_value_delay_ms: default_inter_value_delay_ms(),
                heartbeat_channel: 0,
            },
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, TOML parsing fails, or
    /// validation fails.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use feather_bridge::config::Config;
    ///
    /// let config = Config::load("config/default.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Framing strategy selected by the configuration
    pub fn framing_mode(&self) -> FramingMode {
        self.protocol.framing
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        // The Feather expects 115200; the other rates cover bench setups
        // with level shifters or MIDI-standard receivers
        if ![9_600, 31_250, 38_400, 57_600, 115_200].contains(&self.serial.baud_rate) {
            return Err(crate::error::FeatherBridgeError::Config(toml::de::Error::custom(
                "baud_rate must be one of: 9600, 31250, 38400, 57600, 115200",
            )));
        }

        if self.serial.timeout_ms == 0 || self.serial.timeout_ms > 10_000 {
            return Err(crate::error::FeatherBridgeError::Config(toml::de::Error::custom(
                "timeout_ms must be between 1 and 10000",
            )));
        }

        if self.protocol.inter_value_delay_ms > 100 {
            return Err(crate::error::FeatherBridgeError::Config(toml::de::Error::custom(
                "inter_value_delay_ms must be between 0 and 100",
            )));
        }

        if self.protocol.heartbeat_channel < 0 {
            return Err(crate::error::FeatherBridgeError::Config(toml::de::Error::custom(
                "heartbeat_channel must not be negative",
            )));
        }

        Ok(())
    }
}

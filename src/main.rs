//! # Feather Bridge
//!
//! Send MIDI-like control messages to a Feather sound module over serial.
//!
//! This binary opens the Feather serial link and pulses a heartbeat channel
//! once per second, which is enough to verify the link, the framing, and the
//! receiver end-to-end. Library consumers drive [`FeatherLink`] from their
//! own input sources instead.

use anyhow::Result;
use tokio::time::{interval, Duration};
use tracing::{info, warn};

use feather_bridge::config::Config;
use feather_bridge::link::FeatherLink;
use feather_bridge::serial::FeatherSerial;

/// Heartbeat pulse rate in Hz
const HEARTBEAT_RATE_HZ: u32 = 1;

/// Number of pulses between status log messages
const LOG_INTERVAL_PULSES: u64 = 60;

/// Default configuration file path
const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Feather Bridge v{} starting...", env!("CARGO_PKG_VERSION"));

    // Load configuration, falling back to defaults when no file exists
    let config = match Config::load(DEFAULT_CONFIG_PATH) {
        Ok(config) => config,
        Err(e) => {
            warn!("Could not load {}: {} (using defaults)", DEFAULT_CONFIG_PATH, e);
            Config::default()
        }
    };

    // Open the serial link to the Feather
    let serial = if config.serial.port.is_empty() {
        FeatherSerial::open()?
    } else {
        FeatherSerial::open_path(
            &config.serial.port,
            config.serial.baud_rate,
            config.serial.timeout_ms,
        )?
    };
    info!("Feather serial port opened at: {}", serial.device_path());

    let mut link = FeatherLink::with_framing(serial, config.framing_mode());
    link.set_inter_value_delay(Duration::from_millis(config.protocol.inter_value_delay_ms));

    let channel = config.protocol.heartbeat_channel;
    let mut pulse_interval = interval(Duration::from_millis(1000 / HEARTBEAT_RATE_HZ as u64));

    info!(
        "Pulsing channel {} at {}Hz ({:?} framing)",
        channel,
        HEARTBEAT_RATE_HZ,
        link.framing()
    );
    info!("Press Ctrl+C to exit");

    let mut pulse_count: u64 = 0;
    let mut last_log_count: u64 = 0;

    // Main loop
    loop {
        tokio::select! {
            _ = pulse_interval.tick() => {
                if let Err(e) = link.toggle(channel).await {
                    warn!("Failed to send pulse: {}", e);
                    continue;
                }

                pulse_count += 1;

                if pulse_count - last_log_count >= LOG_INTERVAL_PULSES {
                    info!("Sent {} pulses on channel {}", pulse_count, channel);
                    last_log_count = pulse_count;
                }
            }

            // Handle Ctrl+C for graceful shutdown
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down...");
                info!("Total pulses sent: {}", pulse_count);
                break;
            }
        }
    }

    Ok(())
}

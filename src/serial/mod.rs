//! # Serial Communication Module
//!
//! Handles the serial link to the Feather sound module.
//!
//! This module handles:
//! - Opening the serial port at 115,200 baud (8N1, no flow control)
//! - Device auto-detection over common USB serial paths
//! - Writing encoded command frames
//!
//! The transport is write-only and fire-and-forget: the Feather never
//! acknowledges, and no receive path exists.

pub mod port_trait;

use async_trait::async_trait;
use std::io;
use tokio_serial::SerialPortBuilderExt;
use tracing::{debug, info, warn};

use crate::error::{FeatherBridgeError, Result};
use port_trait::FeatherPort;

/// Fixed baud rate of the Feather serial link
pub const FEATHER_BAUD_RATE: u32 = 115_200;

/// Default port timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 100;

/// Default device paths to try (in order of preference)
const DEFAULT_DEVICE_PATHS: &[&str] = &[
    "/dev/ttyACM0", // USB CDC devices
    "/dev/ttyUSB0", // USB-to-serial adapters
];

/// Serial port handle for the Feather sound module
pub struct FeatherSerial {
    /// Serial port handle
    port: tokio_serial::SerialStream,
    /// Device path (e.g., /dev/ttyACM0)
    device_path: String,
}

impl std::fmt::Debug for FeatherSerial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatherSerial")
            .field("device_path", &self.device_path)
            .finish_non_exhaustive()
    }
}

impl FeatherSerial {
    /// Open the Feather link, auto-detecting the device over common paths
    ///
    /// # Errors
    ///
    /// Returns [`FeatherBridgeError::SerialPortNotFound`] if no candidate
    /// path can be opened.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use feather_bridge::serial::FeatherSerial;
    ///
    /// fn main() -> anyhow::Result<()> {
    ///     let serial = FeatherSerial::open()?;
    ///     Ok(())
    /// }
    /// ```
    pub fn open() -> Result<Self> {
        Self::open_with_paths(DEFAULT_DEVICE_PATHS)
    }

    /// Open the Feather link, trying the given device paths in order
    pub fn open_with_paths(paths: &[&str]) -> Result<Self> {
        for path in paths {
            debug!("Trying to open serial port: {}", path);

            match Self::open_port(path, FEATHER_BAUD_RATE, DEFAULT_TIMEOUT_MS) {
                Ok(port) => {
                    info!("Successfully opened Feather device at {}", path);
                    return Ok(Self {
                        port,
                        device_path: path.to_string(),
                    });
                }
                Err(e) => {
                    warn!("Failed to open {}: {}", path, e);
                    continue;
                }
            }
        }

        Err(FeatherBridgeError::SerialPortNotFound(paths.join(", ")))
    }

    /// Open a specific device path at the given baud rate
    ///
    /// # Arguments
    ///
    /// * `path` - Device path (e.g., "/dev/ttyACM0")
    /// * `baud_rate` - Link speed; the Feather expects [`FEATHER_BAUD_RATE`]
    /// * `timeout_ms` - Port timeout for blocking operations, in milliseconds
    pub fn open_path(path: &str, baud_rate: u32, timeout_ms: u64) -> Result<Self> {
        let port = Self::open_port(path, baud_rate, timeout_ms)?;
        info!("Successfully opened Feather device at {}", path);
        Ok(Self {
            port,
            device_path: path.to_string(),
        })
    }

    /// Open a serial port with Feather link settings (8N1, no flow control)
    fn open_port(
        path: &str,
        baud_rate: u32,
        timeout_ms: u64,
    ) -> Result<tokio_serial::SerialStream> {
        let port = tokio_serial::new(path, baud_rate)
            .data_bits(tokio_serial::DataBits::Eight)
            .parity(tokio_serial::Parity::None)
            .stop_bits(tokio_serial::StopBits::One)
            .flow_control(tokio_serial::FlowControl::None)
            .timeout(std::time::Duration::from_millis(timeout_ms))
            .open_native_async()
            .map_err(|e| FeatherBridgeError::Serial(format!("Failed to open {}: {}", path, e)))?;

        Ok(port)
    }

    /// Send one encoded frame to the Feather
    ///
    /// Writes the whole frame as a single burst and flushes. Fire-and-forget:
    /// there is no acknowledgment to wait for.
    pub async fn send_frame(&mut self, frame: &[u8]) -> Result<()> {
        use tokio::io::AsyncWriteExt;

        self.port
            .write_all(frame)
            .await
            .map_err(|e| FeatherBridgeError::Serial(format!("Failed to write frame: {}", e)))?;

        self.port
            .flush()
            .await
            .map_err(|e| FeatherBridgeError::Serial(format!("Failed to flush serial port: {}", e)))?;

        debug!("Sent frame ({} bytes)", frame.len());
        Ok(())
    }

    /// Device path of the opened serial port
    pub fn device_path(&self) -> &str {
        &self.device_path
    }
}

#[async_trait]
impl FeatherPort for FeatherSerial {
    async fn write_all(&mut self, data: &[u8]) -> io::Result<()> {
        use tokio::io::AsyncWriteExt;
        self.port.write_all(data).await
    }

    async fn flush(&mut self) -> io::Result<()> {
        use tokio::io::AsyncWriteExt;
        self.port.flush().await
    }
}

//! Write seam of the Feather link.
//!
//! The link layer only ever writes and flushes, so the port surface is those
//! two operations. Tests substitute [`mocks::MockFeatherPort`], which records
//! every write and understands the frame layout well enough to hand back
//! whole frames for byte-exact assertions.

use async_trait::async_trait;
use std::io;

/// Outbound-only port carrying encoded Feather traffic
#[async_trait]
pub trait FeatherPort: Send {
    /// Write one encoded buffer (a whole frame, or one `S..E` value)
    async fn write_all(&mut self, data: &[u8]) -> io::Result<()>;

    /// Flush buffered output toward the device
    async fn flush(&mut self) -> io::Result<()>;
}

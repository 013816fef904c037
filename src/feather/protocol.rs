//! # Feather Protocol Constants and Types
//!
//! Core protocol definitions for the framed serial command stream consumed by
//! the Feather sound module.

use serde::Deserialize;

use super::checksum::command_checksum;

/// Frame header, written as one raw binary buffer (never ASCII)
pub const FRAME_HEADER: [u8; 2] = [0x2A, 0x2B];

/// Opening delimiter of every ASCII numeric field
pub const FIELD_OPEN: u8 = b'<';

/// Closing delimiter of every ASCII numeric field
pub const FIELD_CLOSE: u8 = b'>';

/// Frame terminator byte
pub const FRAME_TERMINATOR: u8 = b'^';

/// Checksum modulus; the checksum field is always in [0, 127]
pub const CHECKSUM_MODULUS: i64 = 128;

/// Payload value range (7-bit, MIDI-like)
pub const VALUE_MIN: i32 = 0;
pub const VALUE_MAX: i32 = 127;

/// Payload value transmitted for a switch in the ON state
pub const SWITCH_ON: i32 = 1;

/// Payload value transmitted for a switch in the OFF state
pub const SWITCH_OFF: i32 = 0;

/// Value prefix in the legacy unchecksummed encoding
pub const SIMPLE_VALUE_PREFIX: u8 = b'S';

/// Value suffix in the legacy unchecksummed encoding
pub const SIMPLE_VALUE_SUFFIX: u8 = b'E';

/// Framing strategy for outbound commands.
///
/// The Feather firmware went through two wire formats. The legacy format
/// writes each value as `S<decimal>E` with a short pause after every value;
/// the current format wraps the whole command in a header, a length field,
/// per-value fields, a mod-128 checksum, and a terminator. Both are kept
/// behind one encoder so the strategy is a configuration choice rather than
/// a separate library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FramingMode {
    /// Legacy `S..E` per-value encoding, no header or checksum
    Simple,
    /// Header + length + values + checksum + terminator (current format)
    Checksummed,
}

impl Default for FramingMode {
    fn default() -> Self {
        Self::Checksummed
    }
}

/// One logical message: an ordered sequence of integer payload values.
///
/// A command is typically `[channel, value]`. It carries no connection or
/// session state; each command is framed fresh, transmitted, and discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    values: Vec<i32>,
}

impl Command {
    /// Create a command from raw values. No clamping is applied; callers that
    /// need the [0, 127] payload guarantee clamp before constructing.
    pub fn new(values: Vec<i32>) -> Self {
        Self { values }
    }

    /// Ordered payload values
    pub fn values(&self) -> &[i32] {
        &self.values
    }

    /// Number of payload values (the frame length field)
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if the command carries no values
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Mod-128 checksum over the payload values
    ///
    /// # Examples
    ///
    /// ```
    /// use feather_bridge::feather::protocol::Command;
    ///
    /// let cmd = Command::new(vec![1, 64]);
    /// assert_eq!(cmd.checksum(), 65);
    /// ```
    pub fn checksum(&self) -> i32 {
        command_checksum(&self.values)
    }
}

impl From<&[i32]> for Command {
    fn from(values: &[i32]) -> Self {
        Self::new(values.to_vec())
    }
}

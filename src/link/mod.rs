//! # Feather Link Module
//!
//! Message operations sent to the Feather sound module.
//!
//! ## Operations
//!
//! | Operation | Command on the wire |
//! |----------------|---------------------------------------|
//! | `midi_message` | `[channel, clamp(value)]` |
//! | `midi_scaled` | `[channel, clamp(scale(value, ..))]` |
//! | `switch_on` | `[channel, 1]` |
//! | `switch_off` | `[channel, 0]` |
//! | `toggle` | `[channel, 1]` then `[channel, 0]` |
//! | `bang` | legacy `S..E` pulse, `[ch,1,ch,0]` |
//! | `midi_command` | caller-supplied values, unclamped |
//!
//! Every operation builds a [`Command`] and funnels it through one private
//! send path, so every transmitted message is uniformly framed and
//! checksummed. Sends are fire-and-forget; there is no retry,
//! acknowledgment, or receive path, and no state survives between calls.

use tokio::time::{sleep, Duration};
use tracing::debug;

use crate::error::Result;
use crate::feather::encoder::{encode_command, encode_simple_value};
use crate::feather::protocol::{Command, FramingMode, SWITCH_OFF, SWITCH_ON};
use crate::scaler::{clamp_value, linear_scale};
use crate::serial::port_trait::FeatherPort;

/// Default pause after each value in simple framing, so the receiver can
/// drain its input buffer between values
pub const DEFAULT_INTER_VALUE_DELAY_MS: u64 = 1;

/// Message sender for one Feather serial link.
///
/// Owns the transport handle and the framing strategy; there is no ambient
/// global port. Generic over [`FeatherPort`] so tests can substitute a mock
/// and assert byte-exact frames.
///
/// # Examples
///
/// ```no_run
/// use feather_bridge::link::FeatherLink;
/// use feather_bridge::serial::FeatherSerial;
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let serial = FeatherSerial::open()?;
///     let mut link = FeatherLink::new(serial);
///
///     link.switch_on(3).await?;
///     link.midi_message(5, 64).await?;
///     Ok(())
/// }
/// ```
pub struct FeatherLink<P: FeatherPort> {
    port: P,
    framing: FramingMode,
    inter_value_delay: Duration,
}

impl<P: FeatherPort> FeatherLink<P> {
    /// Create a link with the current checksummed framing
    pub fn new(port: P) -> Self {
        Self::with_framing(port, FramingMode::default())
    }

    /// Create a link with an explicit framing strategy
    pub fn with_framing(port: P, framing: FramingMode) -> Self {
        Self {
            port,
            framing,
            inter_value_delay: Duration::from_millis(DEFAULT_INTER_VALUE_DELAY_MS),
        }
    }

    /// Override the pause inserted after each value in simple framing
    pub fn set_inter_value_delay(&mut self, delay: Duration) {
        self.inter_value_delay = delay;
    }

    /// Configured framing strategy
    pub fn framing(&self) -> FramingMode {
        self.framing
    }

    /// Send a raw value on a channel
    ///
    /// The value is clamped to [0, 127] before transmission; the channel is
    /// passed through opaquely (validity is the Feather's concern).
    pub async fn midi_message(&mut self, channel: i32, value: i32) -> Result<()> {
        self.send_command(Command::new(vec![channel, clamp_value(value)]))
            .await
    }

    /// Scale a value from a source range to a destination range, then send it
    ///
    /// The scaled result is clamped to [0, 127] before transmission.
    ///
    /// # Errors
    ///
    /// Fails with `InvalidRange` when `from_low == from_high`; nothing is
    /// transmitted in that case.
    pub async fn midi_scaled(
        &mut self,
        channel: i32,
        value: i32,
        from_low: i32,
        from_high: i32,
        to_low: i32,
        to_high: i32,
    ) -> Result<()> {
        let scaled = linear_scale(value, from_low, from_high, to_low, to_high)?;
        self.send_command(Command::new(vec![channel, clamp_value(scaled)]))
            .await
    }

    /// Switch a channel on (value 1)
    pub async fn switch_on(&mut self, channel: i32) -> Result<()> {
        self.send_command(Command::new(vec![channel, SWITCH_ON])).await
    }

    /// Switch a channel off (value 0)
    pub async fn switch_off(&mut self, channel: i32) -> Result<()> {
        self.send_command(Command::new(vec![channel, SWITCH_OFF])).await
    }

    /// Pulse a channel: on, then immediately off
    ///
    /// Two commands back-to-back with no configurable duration; the pulse
    /// width is the time taken to frame and emit two commands.
    pub async fn toggle(&mut self, channel: i32) -> Result<()> {
        self.send_command(Command::new(vec![channel, SWITCH_ON])).await?;
        self.send_command(Command::new(vec![channel, SWITCH_OFF])).await
    }

    /// Legacy pulse from the unchecksummed firmware generations
    ///
    /// Same intent as [`toggle`](Self::toggle), but always emitted with the
    /// simple `S..E` framing regardless of the configured strategy, matching
    /// what the original receivers expect.
    pub async fn bang(&mut self, channel: i32) -> Result<()> {
        self.send_simple(&[channel, SWITCH_ON, channel, SWITCH_OFF])
            .await
    }

    /// Send a pre-built command directly, bypassing per-value clamping
    ///
    /// The checksum still lands in [0, 127] whatever the values are.
    pub async fn midi_command(&mut self, values: &[i32]) -> Result<()> {
        self.send_command(Command::from(values)).await
    }

    /// Single choke point for all outbound commands
    async fn send_command(&mut self, command: Command) -> Result<()> {
        match self.framing {
            FramingMode::Checksummed => {
                let frame = encode_command(&command);
                self.port.write_all(&frame).await?;
                self.port.flush().await?;
                debug!("Sent command {:?} ({} bytes)", command.values(), frame.len());
            }
            FramingMode::Simple => {
                self.send_simple(command.values()).await?;
            }
        }
        Ok(())
    }

    /// Emit values in the legacy format, pausing after each one
    async fn send_simple(&mut self, values: &[i32]) -> Result<()> {
        for &value in values {
            let encoded = encode_simple_value(value);
            self.port.write_all(&encoded).await?;
            self.port.flush().await?;
            sleep(self.inter_value_delay).await;
        }
        debug!("Sent {} values (simple framing)", values.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FeatherBridgeError;
    use crate::feather::encoder::encode_command_frame;
    use crate::serial::port_trait::mocks::MockFeatherPort;
    use std::io;

    fn checksummed_link(mock: &MockFeatherPort) -> FeatherLink<MockFeatherPort> {
        FeatherLink::new(mock.clone())
    }

    fn simple_link(mock: &MockFeatherPort) -> FeatherLink<MockFeatherPort> {
        let mut link = FeatherLink::with_framing(mock.clone(), FramingMode::Simple);
        // Keep tests fast
        link.set_inter_value_delay(Duration::from_millis(0));
        link
    }

    fn frame_for(values: &[i32]) -> Vec<u8> {
        encode_command_frame(values)
    }

    // ==================== Checksummed Framing Tests ====================

    #[tokio::test]
    async fn test_midi_message_frame_bytes() {
        let mock = MockFeatherPort::new();
        let mut link = checksummed_link(&mock);

        link.midi_message(1, 64).await.unwrap();

        let frames = mock.frames();
        assert_eq!(frames.len(), 1);

        // 0x2A 0x2B <2><1><64><65>^
        let mut expected = vec![0x2A, 0x2B];
        expected.extend_from_slice(b"<2><1><64><65>^");
        assert_eq!(frames[0], expected);
    }

    #[tokio::test]
    async fn test_midi_message_clamps_value() {
        let mock = MockFeatherPort::new();
        let mut link = checksummed_link(&mock);

        link.midi_message(2, 500).await.unwrap();
        link.midi_message(2, -10).await.unwrap();

        let frames = mock.frames();
        assert_eq!(frames[0], frame_for(&[2, 127]));
        assert_eq!(frames[1], frame_for(&[2, 0]));
    }

    #[tokio::test]
    async fn test_midi_scaled_end_to_end() {
        let mock = MockFeatherPort::new();
        let mut link = checksummed_link(&mock);

        // 50 from [0,100] to [0,127] = 63; checksum (5+63) mod 128 = 68
        link.midi_scaled(5, 50, 0, 100, 0, 127).await.unwrap();

        let frames = mock.frames();
        let mut expected = vec![0x2A, 0x2B];
        expected.extend_from_slice(b"<2><5><63><68>^");
        assert_eq!(frames[0], expected);
    }

    #[tokio::test]
    async fn test_midi_scaled_clamps_after_scaling() {
        let mock = MockFeatherPort::new();
        let mut link = checksummed_link(&mock);

        // 200 from [0,100] to [0,127] = 254, clamped to 127
        link.midi_scaled(1, 200, 0, 100, 0, 127).await.unwrap();

        assert_eq!(mock.frames()[0], frame_for(&[1, 127]));
    }

    #[tokio::test]
    async fn test_midi_scaled_invalid_range_sends_nothing() {
        let mock = MockFeatherPort::new();
        let mut link = checksummed_link(&mock);

        let result = link.midi_scaled(1, 10, 7, 7, 0, 127).await;

        match result {
            Err(FeatherBridgeError::InvalidRange(7)) => {}
            other => panic!("expected InvalidRange, got {:?}", other),
        }
        assert!(mock.writes().is_empty());
    }

    #[tokio::test]
    async fn test_switch_on_command_shape() {
        let mock = MockFeatherPort::new();
        let mut link = checksummed_link(&mock);

        link.switch_on(3).await.unwrap();

        assert_eq!(mock.frames()[0], frame_for(&[3, 1]));
    }

    #[tokio::test]
    async fn test_switch_off_command_shape() {
        let mock = MockFeatherPort::new();
        let mut link = checksummed_link(&mock);

        link.switch_off(3).await.unwrap();

        assert_eq!(mock.frames()[0], frame_for(&[3, 0]));
    }

    #[tokio::test]
    async fn test_toggle_sends_on_then_off() {
        let mock = MockFeatherPort::new();
        let mut link = checksummed_link(&mock);

        link.toggle(3).await.unwrap();

        let frames = mock.frames();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0], frame_for(&[3, 1]));
        assert_eq!(frames[1], frame_for(&[3, 0]));
    }

    #[tokio::test]
    async fn test_midi_command_bypasses_clamping() {
        let mock = MockFeatherPort::new();
        let mut link = checksummed_link(&mock);

        link.midi_command(&[3, 500]).await.unwrap();

        // 500 goes out unclamped; checksum (3+500) mod 128 = 119
        let mut expected = vec![0x2A, 0x2B];
        expected.extend_from_slice(b"<2><3><500><119>^");
        assert_eq!(mock.frames()[0], expected);
    }

    #[tokio::test]
    async fn test_every_operation_emits_complete_frames() {
        let mock = MockFeatherPort::new();
        let mut link = checksummed_link(&mock);

        link.midi_message(1, 2).await.unwrap();
        link.switch_on(9).await.unwrap();
        link.toggle(4).await.unwrap();
        link.midi_command(&[1, 2, 3]).await.unwrap();

        // frames() verifies header and terminator on every write
        assert_eq!(mock.frames().len(), 5);
        assert_eq!(mock.frames().len(), mock.writes().len());
    }

    // ==================== Simple Framing Tests ====================

    #[tokio::test]
    async fn test_simple_framing_value_encoding() {
        let mock = MockFeatherPort::new();
        let mut link = simple_link(&mock);

        link.midi_message(3, 64).await.unwrap();

        let writes = mock.writes();
        assert_eq!(writes.len(), 2);
        assert_eq!(writes[0], b"S3E");
        assert_eq!(writes[1], b"S64E");
        // No frame-headed writes in simple mode
        assert!(mock.frames().is_empty());
    }

    #[tokio::test]
    async fn test_simple_framing_clamps_like_checksummed() {
        let mock = MockFeatherPort::new();
        let mut link = simple_link(&mock);

        link.midi_message(1, 300).await.unwrap();

        assert_eq!(mock.writes()[1], b"S127E");
    }

    #[tokio::test]
    async fn test_bang_emits_legacy_pulse() {
        let mock = MockFeatherPort::new();
        let mut link = simple_link(&mock);

        link.bang(7).await.unwrap();

        let writes = mock.writes();
        assert_eq!(writes.len(), 4);
        assert_eq!(writes[0], b"S7E");
        assert_eq!(writes[1], b"S1E");
        assert_eq!(writes[2], b"S7E");
        assert_eq!(writes[3], b"S0E");
    }

    #[tokio::test]
    async fn test_bang_uses_simple_framing_even_when_checksummed() {
        let mock = MockFeatherPort::new();
        let mut link = checksummed_link(&mock);
        link.set_inter_value_delay(Duration::from_millis(0));

        link.bang(2).await.unwrap();

        let writes = mock.writes();
        assert_eq!(writes.len(), 4);
        assert_eq!(writes[0], b"S2E");
        assert_eq!(writes[3], b"S0E");
    }

    // ==================== Error Propagation Tests ====================

    #[tokio::test]
    async fn test_write_error_propagates() {
        let mock = MockFeatherPort::new();
        mock.fail_writes(io::ErrorKind::BrokenPipe);
        let mut link = checksummed_link(&mock);

        let result = link.switch_on(1).await;
        assert!(matches!(result, Err(FeatherBridgeError::Io(_))));
    }

    #[tokio::test]
    async fn test_flush_error_propagates() {
        let mock = MockFeatherPort::new();
        mock.fail_flushes(io::ErrorKind::TimedOut);
        let mut link = checksummed_link(&mock);

        let result = link.midi_message(1, 1).await;
        assert!(matches!(result, Err(FeatherBridgeError::Io(_))));
    }

    // ==================== Construction Tests ====================

    #[test]
    fn test_default_framing_is_checksummed() {
        let link = FeatherLink::new(MockFeatherPort::new());
        assert_eq!(link.framing(), FramingMode::Checksummed);
    }

    #[test]
    fn test_with_framing_simple() {
        let link = FeatherLink::with_framing(MockFeatherPort::new(), FramingMode::Simple);
        assert_eq!(link.framing(), FramingMode::Simple);
    }
}

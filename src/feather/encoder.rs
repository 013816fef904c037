//! # Command Frame Encoder
//!
//! Encodes commands into Feather protocol frames.

use super::checksum::command_checksum;
use super::protocol::*;

/// Encode a command into a complete checksummed frame
///
/// Frame layout, byte-exact:
///
/// ```text
/// 0x2A 0x2B '<'count'>' ('<'value'>')* '<'checksum'>' '^'
/// ```
///
/// The two header bytes are raw binary; every other numeric field is decimal
/// ASCII between `<` and `>` delimiters. The checksum is the sum of the
/// payload values mod 128.
///
/// # Arguments
///
/// * `values` - Payload values in transmit order (typically `[channel, value]`)
///
/// # Examples
///
/// ```
/// use feather_bridge::feather::encoder::encode_command_frame;
///
/// let frame = encode_command_frame(&[1, 64]);
/// assert_eq!(frame[0], 0x2A);
/// assert_eq!(frame[1], 0x2B);
/// assert_eq!(&frame[2..], b"<2><1><64><65>^");
/// ```
pub fn encode_command_frame(values: &[i32]) -> Vec<u8> {
    let checksum = command_checksum(values);

    // Header + one field per value + count + checksum + terminator.
    // 6 bytes covers the delimiters and up to 4 decimal digits per field.
    let mut frame = Vec::with_capacity(2 + (values.len() + 2) * 6 + 1);
    frame.extend_from_slice(&FRAME_HEADER);

    push_field(&mut frame, values.len() as i64);
    for &value in values {
        push_field(&mut frame, i64::from(value));
    }
    push_field(&mut frame, i64::from(checksum));

    frame.push(FRAME_TERMINATOR);
    frame
}

/// Encode a frame for a [`Command`]
///
/// Convenience wrapper over [`encode_command_frame`].
pub fn encode_command(command: &Command) -> Vec<u8> {
    encode_command_frame(command.values())
}

/// Encode one value in the legacy unchecksummed format
///
/// Each value is written as the ASCII literal `S`, the decimal representation
/// of the value, then the ASCII literal `E`. No header, length, or checksum;
/// the sender pauses briefly after each value so the receiver can keep up.
///
/// # Examples
///
/// ```
/// use feather_bridge::feather::encoder::encode_simple_value;
///
/// assert_eq!(encode_simple_value(5), b"S5E");
/// assert_eq!(encode_simple_value(127), b"S127E");
/// ```
pub fn encode_simple_value(value: i32) -> Vec<u8> {
    let mut buf = Vec::with_capacity(2 + 4);
    buf.push(SIMPLE_VALUE_PREFIX);
    buf.extend_from_slice(value.to_string().as_bytes());
    buf.push(SIMPLE_VALUE_SUFFIX);
    buf
}

/// Append one `<decimal>` field to the frame buffer
fn push_field(frame: &mut Vec<u8>, value: i64) {
    frame.push(FIELD_OPEN);
    frame.extend_from_slice(value.to_string().as_bytes());
    frame.push(FIELD_CLOSE);
}

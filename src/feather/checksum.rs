//! # Mod-128 Checksum
//!
//! Checksum calculation for the Feather command protocol.
//!
//! The checksum is the sum of all payload values reduced modulo 128, computed
//! over the unframed values and transmitted as the final field before the
//! frame terminator.

use super::protocol::CHECKSUM_MODULUS;

/// Calculate the mod-128 checksum of a command's payload values
///
/// The result is always in [0, 127], even when the command carries values
/// outside the normal payload range (the raw `midi_command` path bypasses
/// clamping), so the reduction uses `rem_euclid` rather than `%`.
///
/// # Arguments
///
/// * `values` - Payload values, in transmit order
///
/// # Examples
///
/// ```
/// use feather_bridge::feather::checksum::command_checksum;
///
/// assert_eq!(command_checksum(&[1, 64]), 65);
/// assert_eq!(command_checksum(&[100, 100]), 72); // 200 mod 128
/// ```
pub fn command_checksum(values: &[i32]) -> i32 {
    let sum: i64 = values.iter().map(|&v| i64::from(v)).sum();
    sum.rem_euclid(CHECKSUM_MODULUS) as i32
}

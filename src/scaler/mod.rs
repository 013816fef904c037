//! # Value Scaler Module
//!
//! Maps arbitrary numeric readings into the protocol's valid payload range.
//!
//! ## Value Ranges
//!
//! - Protocol payload: 0-127 (7-bit, MIDI-like)
//! - Accelerometer raw axis reading: -1024 to 1024
//!
//! Out-of-range payload values are corrected by saturating, never rejected.
//! The only fallible operation is [`linear_scale`] with a degenerate source
//! range, which fails instead of dividing by zero.

use crate::error::{FeatherBridgeError, Result};
use crate::feather::protocol::{VALUE_MAX, VALUE_MIN};

/// Raw accelerometer axis range reported by the host sensor
pub const ACCEL_RAW_MIN: i32 = -1024;
pub const ACCEL_RAW_MAX: i32 = 1024;

/// Saturate a value to the valid payload range [0, 127]
///
/// Clamping is total and silent: no error is raised for out-of-range input.
///
/// # Examples
///
/// ```
/// use feather_bridge::scaler::clamp_value;
///
/// assert_eq!(clamp_value(-5), 0);
/// assert_eq!(clamp_value(64), 64);
/// assert_eq!(clamp_value(300), 127);
/// ```
pub fn clamp_value(value: i32) -> i32 {
    value.clamp(VALUE_MIN, VALUE_MAX)
}

/// Linearly remap a value from a source range to a destination range
///
/// Uses the conventional affine map
/// `to_low + (value - from_low) * (to_high - to_low) / (from_high - from_low)`
/// with wide intermediates and truncating integer division (Rust `/`
/// truncates toward zero, which matches the host runtime's map primitive: 0
/// scaled from [-1024, 1024] to [0, 127] yields 63, not 64). Results beyond
/// the `i32` range saturate at the `i32` bounds; sensor-sized ranges never
/// get near them.
///
/// The result is not clamped; call sites that transmit the result pass it
/// through [`clamp_value`] first.
///
/// # Errors
///
/// Returns [`FeatherBridgeError::InvalidRange`] when `from_low == from_high`.
///
/// # Examples
///
/// ```
/// use feather_bridge::scaler::linear_scale;
///
/// assert_eq!(linear_scale(50, 0, 100, 0, 127).unwrap(), 63);
/// assert_eq!(linear_scale(100, 0, 100, 0, 127).unwrap(), 127);
/// assert!(linear_scale(10, 7, 7, 0, 127).is_err());
/// ```
pub fn linear_scale(
    value: i32,
    from_low: i32,
    from_high: i32,
    to_low: i32,
    to_high: i32,
) -> Result<i32> {
    if from_low == from_high {
        return Err(FeatherBridgeError::InvalidRange(from_low));
    }
    Ok(scale_unchecked(value, from_low, from_high, to_low, to_high))
}

/// Scale a raw accelerometer reading to the payload range
///
/// Fixed instance of the linear map from [-1024, 1024] to [0, 127], followed
/// by a clamp so readings outside the nominal sensor range still produce a
/// valid payload. Infallible: the source range is a non-degenerate constant.
///
/// # Examples
///
/// ```
/// use feather_bridge::scaler::scale_acceleration;
///
/// assert_eq!(scale_acceleration(-1024), 0);
/// assert_eq!(scale_acceleration(0), 63);
/// assert_eq!(scale_acceleration(1024), 127);
/// ```
pub fn scale_acceleration(raw: i32) -> i32 {
    clamp_value(scale_unchecked(
        raw,
        ACCEL_RAW_MIN,
        ACCEL_RAW_MAX,
        VALUE_MIN,
        VALUE_MAX,
    ))
}

/// Affine map with the range precondition already checked
///
/// i128 intermediates: the offset and span each fit 33 bits, so their
/// product can exceed i64. The final result saturates at the i32 bounds
/// instead of wrapping.
fn scale_unchecked(value: i32, from_low: i32, from_high: i32, to_low: i32, to_high: i32) -> i32 {
    let offset = i128::from(value) - i128::from(from_low);
    let span_out = i128::from(to_high) - i128::from(to_low);
    let span_in = i128::from(from_high) - i128::from(from_low);

    let result = i128::from(to_low) + offset * span_out / span_in;
    result.clamp(i128::from(i32::MIN), i128::from(i32::MAX)) as i32
}

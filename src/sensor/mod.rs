//! # Sensor Module
//!
//! Accelerometer boundary for the host board.
//!
//! The actual sensor hardware is an external collaborator; this module only
//! defines the read seam and the scaled read used by callers that feed axis
//! readings into outbound messages.

use crate::scaler::scale_acceleration;

/// Accelerometer axis selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Host accelerometer read primitive.
///
/// Implementations return a signed raw reading nominally in [-1024, 1024].
/// The trait exists so tests (and boards without the sensor) can substitute
/// their own source.
pub trait Accelerometer {
    /// Read the raw value of one axis
    fn raw_acceleration(&mut self, axis: Axis) -> i32;
}

/// Read one accelerometer axis, scaled to the payload range [0, 127]
///
/// A pure read: nothing is transmitted. Raw readings outside the nominal
/// sensor range are clamped by the scaler.
///
/// # Examples
///
/// ```
/// use feather_bridge::sensor::{acceleration, Accelerometer, Axis};
///
/// struct Tilted;
///
/// impl Accelerometer for Tilted {
///     fn raw_acceleration(&mut self, _axis: Axis) -> i32 {
///         1024
///     }
/// }
///
/// assert_eq!(acceleration(&mut Tilted, Axis::X), 127);
/// ```
pub fn acceleration<A: Accelerometer>(sensor: &mut A, axis: Axis) -> i32 {
    scale_acceleration(sensor.raw_acceleration(axis))
}

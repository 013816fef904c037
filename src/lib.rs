//! # Feather Bridge Library
//!
//! Send MIDI-like control messages to a Feather sound module over a serial link.
//!
//! This library translates simple numeric inputs (channel triggers, scaled
//! sensor readings, accelerometer axes) into framed, checksummed command
//! messages transmitted over a UART to the Feather.

pub mod config;
pub mod error;
pub mod feather;
pub mod link;
pub mod scaler;
pub mod sensor;
pub mod serial;

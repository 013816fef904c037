//! # Feather Command Protocol Module
//!
//! Implementation of the framed serial command protocol spoken by the Feather
//! sound module.
//!
//! This module handles:
//! - Command frame encoding (header, length, values, checksum, terminator)
//! - The legacy unchecksummed `S..E` value encoding
//! - Mod-128 checksum calculation

pub mod checksum;
pub mod encoder;
pub mod protocol;

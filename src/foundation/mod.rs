//! Shared primitives: the error taxonomy and pixel-space value types.

pub mod error;
pub mod geometry;

//! glyphmath
//!
//! Glyph math for font sources: add, subtract and scale compatible glyphs,
//! and interpolate UFO masters with it.
pub mod core;
pub mod data;
pub mod geometry;
pub mod logging;
pub mod math;

pub use math::{GlyphMathError, MathGlyph};

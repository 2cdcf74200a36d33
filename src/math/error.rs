use thiserror::Error;

use super::structure::StructureMismatch;

/// Errors raised by glyph math operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GlyphMathError {
    #[error("Incompatible contour structure: {0}")]
    IncompatibleStructure(StructureMismatch),

    #[error("Division by zero: factor ({x}, {y})")]
    DivisionByZero { x: f64, y: f64 },
}

pub type Result<T> = std::result::Result<T, GlyphMathError>;

//! Glyph math
//!
//! Linear combinations of compatible glyph outlines: the building block of
//! interpolation between masters.
//!
//! Data flows from an external glyph through the normalizing
//! [`MathGlyphPen`] into a [`MathGlyph`], through the arithmetic in
//! [`ops`], and back out through the [`FilterRedundantPointPen`].

pub mod anchors;
pub mod components;
pub mod error;
pub mod filter;
pub mod glyph;
pub mod normalize;
pub mod ops;
pub mod pen;
pub mod point;
pub mod source;
pub mod structure;

pub use anchors::{pair_anchors, MathAnchor};
pub use components::{pair_components, MathComponent};
pub use error::{GlyphMathError, Result};
pub use filter::{filter_redundant_points, FilterRedundantPointPen};
pub use glyph::MathGlyph;
pub use normalize::{normalize_contour, MathGlyphPen};
pub use pen::{PenEvent, PointPen};
pub use point::{Factor, MathContour, MathPoint, PointType};
pub use source::{GlyphSource, GlyphTarget, Lib, SourceRef};
pub use structure::{CompatibilityOptions, GlyphStructure, StructureMismatch};

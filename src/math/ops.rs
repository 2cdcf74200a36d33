//! Glyph math: addition, subtraction and scaling of whole glyphs.
//!
//! Every operation returns a new glyph and leaves its operands untouched.
//! Binary operations check contour compatibility before computing anything.

use tracing::debug;

use super::anchors::{combine_anchor_pairs, pair_anchors, scale_anchors};
use super::components::{combine_component_pairs, pair_components, scale_components};
use super::error::{GlyphMathError, Result};
use super::glyph::MathGlyph;
use super::point::{add_pt, div_pt, mul_pt, sub_pt, Factor, FactorFn, PairFn};

impl MathGlyph {
    /// Point-wise sum of two compatible glyphs.
    pub fn add(&self, other: &MathGlyph) -> Result<MathGlyph> {
        let mut result = self.process_pair(other, add_pt)?;
        result.width = combine_widths(self.width, other.width, |a, b| a + b);
        Ok(result)
    }

    /// Point-wise difference of two compatible glyphs.
    pub fn subtract(&self, other: &MathGlyph) -> Result<MathGlyph> {
        let mut result = self.process_pair(other, sub_pt)?;
        result.width = combine_widths(self.width, other.width, |a, b| a - b);
        Ok(result)
    }

    /// Scale all coordinates by `factor`; the width scales by the x factor.
    pub fn multiply(&self, factor: impl Into<Factor>) -> MathGlyph {
        let factor = factor.into();
        let mut result = self.process_factor(factor, mul_pt);
        result.width = self.width.map(|width| width * factor.x());
        result
    }

    /// Divide all coordinates by `factor`; the width divides by the x factor.
    pub fn divide(&self, factor: impl Into<Factor>) -> Result<MathGlyph> {
        let factor = factor.into();
        if factor.x() == 0.0 || factor.y() == 0.0 {
            return Err(GlyphMathError::DivisionByZero {
                x: factor.x(),
                y: factor.y(),
            });
        }
        let mut result = self.process_factor(factor, div_pt);
        result.width = self.width.map(|width| width / factor.x());
        Ok(result)
    }

    /// `self + (other - self) * factor`
    ///
    /// A factor of 0 reproduces `self`, 1 reproduces `other`; values outside
    /// that range extrapolate.
    pub fn interpolate(&self, other: &MathGlyph, factor: impl Into<Factor>) -> Result<MathGlyph> {
        let delta = other.subtract(self)?;
        self.add(&delta.multiply(factor))
    }

    fn ensure_compatible(&self, other: &MathGlyph) -> Result<()> {
        match self.structure().contour_mismatch(&other.structure()) {
            Some(mismatch) => Err(GlyphMathError::IncompatibleStructure(mismatch)),
            None => Ok(()),
        }
    }

    fn process_pair(&self, other: &MathGlyph, funct: PairFn) -> Result<MathGlyph> {
        self.ensure_compatible(other)?;

        let mut result = self.copy_without_iterables();
        result.contours = self
            .contours
            .iter()
            .zip(&other.contours)
            .map(|(contour1, contour2)| {
                contour1
                    .iter()
                    .zip(contour2)
                    .map(|(point1, point2)| point1.moved_to(funct(point1.pt, point2.pt)))
                    .collect()
            })
            .collect();
        result.anchors = combine_anchor_pairs(&pair_anchors(&self.anchors, &other.anchors), funct);
        result.components =
            combine_component_pairs(&pair_components(&self.components, &other.components), funct);

        debug!(
            "{} with {}: {} anchors, {} components",
            self,
            other,
            result.anchors.len(),
            result.components.len()
        );
        Ok(result)
    }

    fn process_factor(&self, factor: Factor, funct: FactorFn) -> MathGlyph {
        let mut result = self.copy_without_iterables();
        result.contours = self
            .contours
            .iter()
            .map(|contour| {
                contour
                    .iter()
                    .map(|point| point.moved_to(funct(point.pt, factor)))
                    .collect()
            })
            .collect();
        result.anchors = scale_anchors(&self.anchors, factor, funct);
        result.components = scale_components(&self.components, factor, funct);
        result
    }
}

/// A missing width counts as zero unless both are missing.
fn combine_widths(width1: Option<f64>, width2: Option<f64>, funct: fn(f64, f64) -> f64) -> Option<f64> {
    match (width1, width2) {
        (None, None) => None,
        (width1, width2) => Some(funct(width1.unwrap_or(0.0), width2.unwrap_or(0.0))),
    }
}

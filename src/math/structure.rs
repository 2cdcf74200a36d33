//! Structure signatures and compatibility testing
//!
//! Point-wise math indexes contours and points by position, so two glyphs
//! can only be combined when their contours have the same segment types in
//! the same order. Components and anchors are paired by name instead and
//! only need to match when a caller asks for it.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::glyph::MathGlyph;
use super::point::PointType;

/// Coordinate-free shape of a glyph
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GlyphStructure {
    /// Segment type sequence per contour
    pub contours: Vec<Vec<PointType>>,
    /// Base glyph names of the components, in order
    pub components: Vec<String>,
    /// Anchor names, in order
    pub anchors: Vec<Option<String>>,
}

impl GlyphStructure {
    pub fn of(glyph: &MathGlyph) -> Self {
        Self {
            contours: glyph
                .contours
                .iter()
                .map(|contour| contour.iter().map(|point| point.point_type).collect())
                .collect(),
            components: glyph
                .components
                .iter()
                .map(|component| component.base_glyph.clone())
                .collect(),
            anchors: glyph.anchors.iter().map(|anchor| anchor.name.clone()).collect(),
        }
    }

    /// First difference between the contour signatures, if any
    pub fn contour_mismatch(&self, other: &GlyphStructure) -> Option<StructureMismatch> {
        if self.contours.len() != other.contours.len() {
            return Some(StructureMismatch::ContourCount {
                expected: self.contours.len(),
                found: other.contours.len(),
            });
        }
        for (contour, (types1, types2)) in self.contours.iter().zip(&other.contours).enumerate() {
            if types1.len() != types2.len() {
                return Some(StructureMismatch::PointCount {
                    contour,
                    expected: types1.len(),
                    found: types2.len(),
                });
            }
            if let Some(point) = types1.iter().zip(types2).position(|(a, b)| a != b) {
                return Some(StructureMismatch::SegmentType {
                    contour,
                    point,
                    expected: types1[point],
                    found: types2[point],
                });
            }
        }
        None
    }

    pub fn is_compatible(&self, other: &GlyphStructure, options: CompatibilityOptions) -> bool {
        if options.contours && self.contours != other.contours {
            return false;
        }
        if options.components && self.components != other.components {
            return false;
        }
        if options.anchors && self.anchors != other.anchors {
            return false;
        }
        true
    }
}

/// Which parts of the structure must match
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityOptions {
    pub contours: bool,
    pub components: bool,
    pub anchors: bool,
}

impl Default for CompatibilityOptions {
    fn default() -> Self {
        Self {
            contours: true,
            components: false,
            anchors: false,
        }
    }
}

impl CompatibilityOptions {
    pub fn all() -> Self {
        Self {
            contours: true,
            components: true,
            anchors: true,
        }
    }
}

/// Where two contour structures first differ
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StructureMismatch {
    ContourCount {
        expected: usize,
        found: usize,
    },
    PointCount {
        contour: usize,
        expected: usize,
        found: usize,
    },
    SegmentType {
        contour: usize,
        point: usize,
        expected: PointType,
        found: PointType,
    },
}

impl fmt::Display for StructureMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContourCount { expected, found } => {
                write!(f, "expected {expected} contours, found {found}")
            }
            Self::PointCount {
                contour,
                expected,
                found,
            } => write!(f, "contour {contour}: expected {expected} points, found {found}"),
            Self::SegmentType {
                contour,
                point,
                expected,
                found,
            } => write!(
                f,
                "contour {contour} point {point}: expected {expected:?}, found {found:?}"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::anchors::MathAnchor;
    use crate::math::components::MathComponent;
    use crate::math::point::MathPoint;
    use kurbo::Affine;

    fn square_glyph() -> MathGlyph {
        let mut glyph = MathGlyph::new();
        glyph.contours.push(vec![
            MathPoint::curve_to(0.0, 0.0),
            MathPoint::off_curve(0.0, 0.0),
            MathPoint::off_curve(0.0, 10.0),
            MathPoint::curve_to(0.0, 10.0),
        ]);
        glyph.components.push(MathComponent::new("acute", Affine::IDENTITY));
        glyph.anchors.push(MathAnchor::new("top", 5.0, 10.0));
        glyph
    }

    #[test]
    fn test_structure_signature() {
        let structure = GlyphStructure::of(&square_glyph());
        assert_eq!(
            structure.contours,
            vec![vec![PointType::Curve, PointType::OffCurve, PointType::OffCurve, PointType::Curve]]
        );
        assert_eq!(structure.components, vec!["acute".to_string()]);
        assert_eq!(structure.anchors, vec![Some("top".to_string())]);
    }

    #[test]
    fn test_components_and_anchors_checked_on_request() {
        let glyph1 = square_glyph();
        let mut glyph2 = square_glyph();
        glyph2.components.clear();
        glyph2.anchors[0].name = Some("bottom".to_string());

        let structure1 = GlyphStructure::of(&glyph1);
        let structure2 = GlyphStructure::of(&glyph2);
        assert!(structure1.is_compatible(&structure2, CompatibilityOptions::default()));
        assert!(!structure1.is_compatible(&structure2, CompatibilityOptions::all()));
        assert!(!structure1.is_compatible(
            &structure2,
            CompatibilityOptions {
                anchors: true,
                ..Default::default()
            }
        ));
    }

    #[test]
    fn test_contour_mismatch_reports_first_difference() {
        let structure1 = GlyphStructure::of(&square_glyph());

        let mut glyph2 = square_glyph();
        glyph2.contours[0].push(MathPoint::off_curve(1.0, 1.0));
        assert_eq!(
            structure1.contour_mismatch(&GlyphStructure::of(&glyph2)),
            Some(StructureMismatch::PointCount {
                contour: 0,
                expected: 4,
                found: 5
            })
        );

        let mut glyph3 = square_glyph();
        glyph3.contours[0][3].point_type = PointType::QCurve;
        let mismatch = structure1.contour_mismatch(&GlyphStructure::of(&glyph3));
        assert_eq!(
            mismatch.map(|m| m.to_string()).as_deref(),
            Some("contour 0 point 3: expected Curve, found QCurve")
        );

        assert_eq!(structure1.contour_mismatch(&structure1), None);
    }
}

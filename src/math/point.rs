//! Point records for glyph math
//!
//! Points mirror the UFO point model: a coordinate, a segment type, the
//! smooth flag and the optional name and identifier. Inside a normalized
//! [`MathGlyph`](super::MathGlyph) the `Line` type never appears.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// UFO point type enumeration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointType {
    /// First point in an open contour
    #[serde(rename = "move")]
    Move,
    /// Draws straight line from previous point
    #[serde(rename = "line")]
    Line,
    /// Part of curve segment (control point)
    #[serde(rename = "offcurve")]
    OffCurve,
    /// Draws cubic Bézier curve
    #[serde(rename = "curve")]
    Curve,
    /// Draws quadratic curve
    #[serde(rename = "qcurve")]
    QCurve,
}

impl PointType {
    /// Check if this point type is on-curve (not a control point)
    pub fn is_on_curve(&self) -> bool {
        !matches!(self, PointType::OffCurve)
    }
}

/// A single point of a contour
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MathPoint {
    pub pt: Point,
    #[serde(rename = "type")]
    pub point_type: PointType,
    pub smooth: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
}

/// Contours are implicitly closed rings of points.
pub type MathContour = Vec<MathPoint>;

impl MathPoint {
    pub fn new(x: f64, y: f64, point_type: PointType) -> Self {
        Self {
            pt: Point::new(x, y),
            point_type,
            smooth: false,
            name: None,
            identifier: None,
        }
    }

    pub fn line_to(x: f64, y: f64) -> Self {
        Self::new(x, y, PointType::Line)
    }

    pub fn curve_to(x: f64, y: f64) -> Self {
        Self::new(x, y, PointType::Curve)
    }

    pub fn qcurve_to(x: f64, y: f64) -> Self {
        Self::new(x, y, PointType::QCurve)
    }

    pub fn off_curve(x: f64, y: f64) -> Self {
        Self::new(x, y, PointType::OffCurve)
    }

    /// A bare off-curve control at `pt`, as synthesized for line segments
    pub(crate) fn synthetic_control(pt: Point) -> Self {
        Self::off_curve(pt.x, pt.y)
    }

    pub fn with_smooth(mut self, smooth: bool) -> Self {
        self.smooth = smooth;
        self
    }

    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_identifier<S: Into<String>>(mut self, identifier: S) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    pub fn is_on_curve(&self) -> bool {
        self.point_type.is_on_curve()
    }

    /// Same point attributes at a new location
    pub(crate) fn moved_to(&self, pt: Point) -> Self {
        Self { pt, ..self.clone() }
    }
}

/// Multiplication or division factor for scalar glyph math.
///
/// A uniform factor scales both axes, a per-axis factor scales x and y
/// independently. Only the x factor applies to the advance width.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Factor {
    Uniform(f64),
    PerAxis(f64, f64),
}

impl Factor {
    pub fn x(&self) -> f64 {
        match *self {
            Factor::Uniform(f) => f,
            Factor::PerAxis(fx, _) => fx,
        }
    }

    pub fn y(&self) -> f64 {
        match *self {
            Factor::Uniform(f) => f,
            Factor::PerAxis(_, fy) => fy,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x().is_finite() && self.y().is_finite()
    }
}

impl From<f64> for Factor {
    fn from(factor: f64) -> Self {
        Factor::Uniform(factor)
    }
}

impl From<(f64, f64)> for Factor {
    fn from((fx, fy): (f64, f64)) -> Self {
        Factor::PerAxis(fx, fy)
    }
}

/// Coordinate-pair arithmetic between two operands
pub(crate) type PairFn = fn(Point, Point) -> Point;

/// Coordinate-pair arithmetic with a factor
pub(crate) type FactorFn = fn(Point, Factor) -> Point;

pub(crate) fn add_pt(a: Point, b: Point) -> Point {
    Point::new(a.x + b.x, a.y + b.y)
}

pub(crate) fn sub_pt(a: Point, b: Point) -> Point {
    Point::new(a.x - b.x, a.y - b.y)
}

pub(crate) fn mul_pt(pt: Point, factor: Factor) -> Point {
    Point::new(pt.x * factor.x(), pt.y * factor.y())
}

/// Callers must reject zero factors first.
pub(crate) fn div_pt(pt: Point, factor: Factor) -> Point {
    Point::new(pt.x / factor.x(), pt.y / factor.y())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_type_on_curve() {
        assert!(PointType::Line.is_on_curve());
        assert!(PointType::QCurve.is_on_curve());
        assert!(!PointType::OffCurve.is_on_curve());
    }

    #[test]
    fn test_builder_pattern() {
        let point = MathPoint::curve_to(50.0, 75.0)
            .with_name("top")
            .with_identifier("point_001")
            .with_smooth(true);

        assert_eq!(point.pt, Point::new(50.0, 75.0));
        assert_eq!(point.name.as_deref(), Some("top"));
        assert_eq!(point.identifier.as_deref(), Some("point_001"));
        assert!(point.smooth);
    }

    #[test]
    fn test_factor_axes() {
        let uniform = Factor::from(2.0);
        assert_eq!((uniform.x(), uniform.y()), (2.0, 2.0));

        let per_axis = Factor::from((2.0, 1.5));
        assert_eq!((per_axis.x(), per_axis.y()), (2.0, 1.5));
        assert!(!Factor::Uniform(f64::NAN).is_finite());
    }

    #[test]
    fn test_point_arithmetic() {
        let a = Point::new(100.0, -100.0);
        let b = Point::new(200.0, -200.0);
        assert_eq!(add_pt(a, b), Point::new(300.0, -300.0));
        assert_eq!(sub_pt(b, a), Point::new(100.0, -100.0));
        assert_eq!(mul_pt(a, Factor::PerAxis(2.0, 1.5)), Point::new(200.0, -150.0));
        assert_eq!(div_pt(a, Factor::Uniform(4.0)), Point::new(25.0, -25.0));
    }
}

//! Outline normalization
//!
//! Straight segments are rewritten as cubic curves whose off-curve controls
//! sit exactly on the segment's end points. A line and a curve that happen
//! to have the same shape then carry the same point structure, so two
//! outlines that differ only in nominal segment types stay compatible.

use kurbo::{Affine, Point};

use super::components::MathComponent;
use super::pen::PointPen;
use super::point::{MathContour, MathPoint, PointType};

/// Point pen that builds normalized contours and collects components.
#[derive(Debug, Default)]
pub struct MathGlyphPen {
    pub contours: Vec<MathContour>,
    pub components: Vec<MathComponent>,
    points: Vec<MathPoint>,
}

impl MathGlyphPen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_parts(self) -> (Vec<MathContour>, Vec<MathComponent>) {
        (self.contours, self.components)
    }
}

impl PointPen for MathGlyphPen {
    fn begin_path(&mut self) {
        self.points.clear();
    }

    fn add_point(
        &mut self,
        pt: Point,
        point_type: PointType,
        smooth: bool,
        name: Option<&str>,
        identifier: Option<&str>,
    ) {
        self.points.push(MathPoint {
            pt,
            point_type,
            smooth,
            name: name.map(str::to_string),
            identifier: identifier.map(str::to_string),
        });
    }

    fn end_path(&mut self) {
        let points = std::mem::take(&mut self.points);
        self.contours.push(normalize_contour(&points));
    }

    fn add_component(&mut self, base_glyph: &str, transform: Affine, identifier: Option<&str>) {
        self.components.push(MathComponent {
            base_glyph: base_glyph.to_string(),
            transform,
            identifier: identifier.map(str::to_string),
        });
    }
}

/// Rewrite every `Line` point of a closed contour as a `Curve` point preceded
/// by two synthetic controls at (previous on-curve, this point).
///
/// Point order is kept. When the first point is a line, its controls belong
/// to the wrap-around segment and are appended after the last point.
pub fn normalize_contour(points: &[MathPoint]) -> MathContour {
    let Some((first, rest)) = points.split_first() else {
        return Vec::new();
    };

    let mut contour = Vec::with_capacity(points.len() + 2);
    let mut off_curves: Vec<MathPoint> = Vec::new();
    let mut closing_controls: Vec<MathPoint> = Vec::new();
    let mut prev_on_curve: Point;

    match first.point_type {
        PointType::OffCurve => {
            off_curves.push(first.clone());
            // ring predecessor for a malformed line directly after the
            // leading controls
            prev_on_curve = points
                .iter()
                .rev()
                .find(|point| point.is_on_curve())
                .map_or(first.pt, |point| point.pt);
        }
        PointType::Line => {
            let last = points[points.len() - 1].pt;
            closing_controls.push(MathPoint::synthetic_control(last));
            closing_controls.push(MathPoint::synthetic_control(first.pt));
            contour.push(MathPoint {
                point_type: PointType::Curve,
                ..first.clone()
            });
            prev_on_curve = first.pt;
        }
        _ => {
            contour.push(first.clone());
            prev_on_curve = first.pt;
        }
    }

    for point in rest.iter().chain(closing_controls.iter()) {
        if point.point_type == PointType::OffCurve {
            off_curves.push(point.clone());
            continue;
        }
        let mut on_curve = point.clone();
        if on_curve.point_type == PointType::Line {
            on_curve.point_type = PointType::Curve;
            off_curves.push(MathPoint::synthetic_control(prev_on_curve));
            off_curves.push(MathPoint::synthetic_control(on_curve.pt));
        }
        contour.append(&mut off_curves);
        prev_on_curve = on_curve.pt;
        contour.push(on_curve);
    }

    // controls of the segment that closes into the first point
    contour.append(&mut off_curves);
    contour
}

#[cfg(test)]
mod tests {
    use super::*;

    fn types(contour: &[MathPoint]) -> Vec<PointType> {
        contour.iter().map(|point| point.point_type).collect()
    }

    fn coords(contour: &[MathPoint]) -> Vec<(f64, f64)> {
        contour.iter().map(|point| (point.pt.x, point.pt.y)).collect()
    }

    #[test]
    fn test_two_line_contour() {
        let contour = normalize_contour(&[MathPoint::line_to(0.0, 0.0), MathPoint::line_to(10.0, 0.0)]);

        assert_eq!(
            types(&contour),
            vec![
                PointType::Curve,
                PointType::OffCurve,
                PointType::OffCurve,
                PointType::Curve,
                PointType::OffCurve,
                PointType::OffCurve,
            ]
        );
        assert_eq!(
            coords(&contour),
            vec![(0.0, 0.0), (0.0, 0.0), (10.0, 0.0), (10.0, 0.0), (10.0, 0.0), (0.0, 0.0)]
        );
    }

    #[test]
    fn test_curves_pass_through() {
        let points = vec![
            MathPoint::curve_to(0.0, 0.0).with_smooth(true),
            MathPoint::off_curve(10.0, 20.0),
            MathPoint::off_curve(30.0, 20.0),
            MathPoint::curve_to(40.0, 0.0).with_name("corner"),
            MathPoint::off_curve(30.0, -20.0),
            MathPoint::off_curve(10.0, -20.0),
        ];
        assert_eq!(normalize_contour(&points), points);
    }

    #[test]
    fn test_leading_off_curve_is_kept_in_front() {
        let points = vec![
            MathPoint::off_curve(10.0, -20.0),
            MathPoint::curve_to(0.0, 0.0),
            MathPoint::off_curve(10.0, 20.0),
            MathPoint::off_curve(30.0, 20.0),
            MathPoint::curve_to(40.0, 0.0),
            MathPoint::off_curve(30.0, -20.0),
        ];
        assert_eq!(normalize_contour(&points), points);
    }

    #[test]
    fn test_line_after_curve_uses_previous_on_curve() {
        let points = vec![
            MathPoint::curve_to(0.0, 0.0),
            MathPoint::off_curve(0.0, 50.0),
            MathPoint::off_curve(50.0, 100.0),
            MathPoint::curve_to(100.0, 100.0),
            MathPoint::line_to(100.0, 0.0).with_name("corner"),
        ];
        let contour = normalize_contour(&points);

        assert_eq!(contour.len(), 7);
        assert_eq!(contour[4], MathPoint::off_curve(100.0, 100.0));
        assert_eq!(contour[5], MathPoint::off_curve(100.0, 0.0));
        assert_eq!(contour[6].point_type, PointType::Curve);
        assert_eq!(contour[6].name.as_deref(), Some("corner"));
        assert!(!contour.iter().any(|point| point.point_type == PointType::Line));
    }

    #[test]
    fn test_empty_contour() {
        assert!(normalize_contour(&[]).is_empty());
    }

    #[test]
    fn test_pen_collects_contours_and_components() {
        let mut pen = MathGlyphPen::new();
        pen.begin_path();
        pen.add_point(Point::new(0.0, 0.0), PointType::Line, false, None, Some("p0"));
        pen.add_point(Point::new(0.0, 10.0), PointType::Line, false, None, None);
        pen.add_point(Point::new(10.0, 10.0), PointType::Line, false, None, None);
        pen.end_path();
        pen.add_component("acute", Affine::IDENTITY, None);
        pen.begin_path();
        pen.end_path();

        let (contours, components) = pen.into_parts();
        assert_eq!(contours.len(), 2);
        assert_eq!(contours[0].len(), 9);
        assert_eq!(contours[0][0].identifier.as_deref(), Some("p0"));
        assert!(contours[1].is_empty());
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].base_glyph, "acute");
    }
}

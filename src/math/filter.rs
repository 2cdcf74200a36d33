//! Redundant point filtering
//!
//! The inverse of normalization: a curve whose two controls coincide exactly
//! with its start and end points is drawn as a line again. Equality is exact,
//! so a line only survives math that leaves its controls on the end points.

use kurbo::{Affine, Point};

use super::pen::PointPen;
use super::point::{MathPoint, PointType};

/// Point pen that collapses degenerate curves before forwarding to `pen`.
pub struct FilterRedundantPointPen<'a> {
    pen: &'a mut dyn PointPen,
    points: Vec<MathPoint>,
}

impl<'a> FilterRedundantPointPen<'a> {
    pub fn new(pen: &'a mut dyn PointPen) -> Self {
        Self {
            pen,
            points: Vec::new(),
        }
    }
}

impl PointPen for FilterRedundantPointPen<'_> {
    fn begin_path(&mut self) {
        self.points.clear();
        self.pen.begin_path();
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
        for point in filter_redundant_points(&points) {
            self.pen.add_point(
                point.pt,
                point.point_type,
                point.smooth,
                point.name.as_deref(),
                point.identifier.as_deref(),
            );
        }
        self.pen.end_path();
    }

    fn add_component(&mut self, base_glyph: &str, transform: Affine, identifier: Option<&str>) {
        self.pen.add_component(base_glyph, transform, identifier);
    }
}

/// Return `points` with every curve segment whose controls equal
/// (previous on-curve, this on-curve) replaced by a line segment.
pub fn filter_redundant_points(points: &[MathPoint]) -> Vec<MathPoint> {
    let Some((first, _)) = points.split_first() else {
        return Vec::new();
    };

    let mut points = points;
    let mut to_draw: Vec<MathPoint> = Vec::with_capacity(points.len());
    let mut off_curves: Vec<&MathPoint> = Vec::new();
    let mut prev_on_curve: Option<Point> = None;

    if first.point_type == PointType::OffCurve {
        off_curves.push(first);
    } else {
        let mut point_type = first.point_type;
        // storage starts mid-ring: the controls of the segment ending in the
        // first point are the trailing off-curves
        if point_type == PointType::Curve {
            let trailing = points
                .iter()
                .rev()
                .take_while(|point| point.point_type == PointType::OffCurve)
                .count();
            let len = points.len();
            if trailing == 2 && len > 2 {
                let last_on_curve = points[len - 3].pt;
                if points[len - 2].pt == last_on_curve && points[len - 1].pt == first.pt {
                    point_type = PointType::Line;
                    points = &points[..len - 2];
                }
            }
        }
        to_draw.push(MathPoint {
            point_type,
            ..first.clone()
        });
        prev_on_curve = Some(first.pt);
    }

    for point in &points[1..] {
        if point.point_type == PointType::OffCurve {
            off_curves.push(point);
            continue;
        }
        let mut point_type = point.point_type;
        if point_type == PointType::Curve
            && off_curves.len() == 2
            && prev_on_curve == Some(off_curves[0].pt)
            && off_curves[1].pt == point.pt
        {
            off_curves.clear();
            point_type = PointType::Line;
        }
        to_draw.extend(off_curves.drain(..).cloned());
        to_draw.push(MathPoint {
            point_type,
            ..point.clone()
        });
        prev_on_curve = Some(point.pt);
    }

    to_draw.extend(off_curves.into_iter().cloned());
    to_draw
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::normalize::normalize_contour;
    use crate::math::pen::PenEvent;

    #[test]
    fn test_normalized_lines_collapse() {
        let lines = vec![
            MathPoint::line_to(0.0, 0.0),
            MathPoint::line_to(0.0, 100.0).with_name("top-left"),
            MathPoint::line_to(100.0, 100.0).with_smooth(true),
            MathPoint::line_to(100.0, 0.0),
        ];
        assert_eq!(filter_redundant_points(&normalize_contour(&lines)), lines);
    }

    #[test]
    fn test_mixed_contour_round_trip() {
        let points = vec![
            MathPoint::line_to(0.0, 0.0),
            MathPoint::curve_to(0.0, 50.0),
            MathPoint::off_curve(0.0, 80.0),
            MathPoint::off_curve(20.0, 100.0),
            MathPoint::curve_to(50.0, 100.0).with_smooth(true),
            MathPoint::off_curve(100.0, 100.0),
            MathPoint::qcurve_to(100.0, 50.0),
            MathPoint::line_to(100.0, 0.0),
        ];
        // the curve into (0, 50) has no controls and must stay a curve
        assert_eq!(filter_redundant_points(&normalize_contour(&points)), points);
    }

    #[test]
    fn test_real_curve_is_kept() {
        let points = vec![
            MathPoint::curve_to(0.0, 0.0),
            MathPoint::off_curve(0.0, 1.0),
            MathPoint::off_curve(10.0, 0.0),
            MathPoint::curve_to(10.0, 0.0),
            MathPoint::off_curve(10.0, -1.0),
            MathPoint::off_curve(0.0, 0.0),
        ];
        assert_eq!(filter_redundant_points(&points), points);
    }

    #[test]
    fn test_wrap_around_only_curve() {
        let points = vec![
            MathPoint::curve_to(0.0, 0.0),
            MathPoint::off_curve(0.0, 0.0),
            MathPoint::off_curve(0.0, 0.0),
        ];
        assert_eq!(filter_redundant_points(&points), vec![MathPoint::line_to(0.0, 0.0)]);
    }

    #[test]
    fn test_leading_off_curve_contour() {
        let points = vec![
            MathPoint::off_curve(5.0, 5.0),
            MathPoint::curve_to(0.0, 0.0),
            MathPoint::off_curve(0.0, 0.0),
            MathPoint::off_curve(10.0, 0.0),
            MathPoint::curve_to(10.0, 0.0),
            MathPoint::off_curve(10.0, 5.0),
        ];
        let filtered = filter_redundant_points(&points);
        assert_eq!(
            filtered,
            vec![
                MathPoint::off_curve(5.0, 5.0),
                MathPoint::curve_to(0.0, 0.0),
                MathPoint::line_to(10.0, 0.0),
                MathPoint::off_curve(10.0, 5.0),
            ]
        );
    }

    #[test]
    fn test_pen_forwards_filtered_points() {
        let mut events: Vec<PenEvent> = Vec::new();
        {
            let mut pen = FilterRedundantPointPen::new(&mut events);
            pen.begin_path();
            for point in normalize_contour(&[MathPoint::line_to(0.0, 0.0), MathPoint::line_to(20.0, 0.0)]) {
                pen.add_point(point.pt, point.point_type, point.smooth, None, None);
            }
            pen.end_path();
            pen.add_component("A", Affine::IDENTITY, None);
        }

        assert_eq!(events.len(), 5);
        assert_eq!(events[0], PenEvent::BeginPath);
        assert!(matches!(
            events[1],
            PenEvent::AddPoint { point_type: PointType::Line, pt, .. } if pt == Point::new(0.0, 0.0)
        ));
        assert!(matches!(
            events[2],
            PenEvent::AddPoint { point_type: PointType::Line, pt, .. } if pt == Point::new(20.0, 0.0)
        ));
        assert_eq!(events[3], PenEvent::EndPath);
        assert!(matches!(events[4], PenEvent::AddComponent { .. }));
    }
}

//! Drawing point streams into kurbo paths
//!
//! Bounding boxes are not computed here: outlines are converted into a
//! [`BezPath`] and measured by kurbo.

use kurbo::{Affine, BezPath, Point, Rect, Shape};

use crate::math::{MathGlyph, PointPen, PointType};

/// Point pen building a [`BezPath`] from contours. Components are ignored.
#[derive(Debug, Default)]
pub struct BezPathPen {
    path: BezPath,
    points: Vec<(Point, PointType)>,
}

impl BezPathPen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_path(self) -> BezPath {
        self.path
    }
}

impl PointPen for BezPathPen {
    fn begin_path(&mut self) {
        self.points.clear();
    }

    fn add_point(
        &mut self,
        pt: Point,
        point_type: PointType,
        _smooth: bool,
        _name: Option<&str>,
        _identifier: Option<&str>,
    ) {
        self.points.push((pt, point_type));
    }

    fn end_path(&mut self) {
        let points = std::mem::take(&mut self.points);
        append_contour(&mut self.path, &points);
    }

    fn add_component(&mut self, _base_glyph: &str, _transform: Affine, _identifier: Option<&str>) {}
}

/// Bounding box of a glyph's contours, `None` for an empty outline
pub fn outline_bounds(glyph: &MathGlyph) -> Option<Rect> {
    let mut pen = BezPathPen::new();
    glyph.draw_points(&mut pen);
    let path = pen.into_path();
    if path.elements().is_empty() {
        return None;
    }
    Some(path.bounding_box())
}

fn append_contour(path: &mut BezPath, points: &[(Point, PointType)]) {
    let Some(&(first, first_type)) = points.first() else {
        return;
    };

    let closed = first_type != PointType::Move;
    let start: Point;
    let mut segments: Vec<(Point, PointType)> = Vec::with_capacity(points.len() + 1);

    if !closed {
        start = first;
        segments.extend_from_slice(&points[1..]);
    } else if let Some(first_on_curve) = points.iter().position(|(_, typ)| typ.is_on_curve()) {
        // rotate so the ring ends on its first on-curve point; every control
        // is then reachable without wrapping
        start = points[first_on_curve].0;
        segments.extend_from_slice(&points[first_on_curve + 1..]);
        segments.extend_from_slice(&points[..=first_on_curve]);
    } else {
        // all off-curve quadratic ring: start on the implied point between
        // the last and first controls
        let last = points[points.len() - 1].0;
        start = last.midpoint(first);
        segments.extend_from_slice(points);
        segments.push((start, PointType::QCurve));
    }

    path.move_to(start);
    let mut pending: Vec<Point> = Vec::new();
    for (pt, typ) in segments {
        match typ {
            PointType::OffCurve => {
                pending.push(pt);
                continue;
            }
            PointType::Move | PointType::Line => path.line_to(pt),
            PointType::Curve => match pending.as_slice() {
                [] => path.line_to(pt),
                [control] => path.quad_to(*control, pt),
                [control1, control2] => path.curve_to(*control1, *control2, pt),
                controls => {
                    for (control1, control2, end) in decompose_super_bezier(controls, pt) {
                        path.curve_to(control1, control2, end);
                    }
                }
            },
            PointType::QCurve => {
                for (index, control) in pending.iter().enumerate() {
                    let end = match pending.get(index + 1) {
                        Some(next) => control.midpoint(*next),
                        None => pt,
                    };
                    path.quad_to(*control, end);
                }
                if pending.is_empty() {
                    path.line_to(pt);
                }
            }
        }
        pending.clear();
    }

    if closed {
        path.close_path();
    }
}

/// Split a cubic segment with more than two controls into plain cubics.
///
/// Each pair of neighbouring controls is divided, and the implied on-curve
/// points sit midway between adjacent divisions.
fn decompose_super_bezier(controls: &[Point], end: Point) -> Vec<(Point, Point, Point)> {
    let points: Vec<Point> = controls.iter().copied().chain(std::iter::once(end)).collect();
    let n = points.len() - 1;
    let mut segments = Vec::with_capacity(n - 1);
    let mut start = points[0];
    let mut control: Option<Point> = None;

    for i in 2..=n {
        let divisions = i.min(3).min(n + 2 - i);
        for j in 1..divisions {
            let t = j as f64 / divisions as f64;
            let division = points[i - 2].lerp(points[i - 1], t);
            match control {
                None => control = Some(division),
                Some(previous) => {
                    segments.push((start, previous, previous.midpoint(division)));
                    start = division;
                    control = None;
                }
            }
        }
    }
    segments.push((start, points[n - 1], points[n]));
    segments
}

//! The point pen protocol.
//!
//! Glyph outlines flow between objects as a stream of point events. A
//! source draws itself into a [`PointPen`]; sinks and filters implement it.

use kurbo::{Affine, Point};

use super::point::PointType;

/// Interface for accepting a stream of contour points and components.
pub trait PointPen {
    /// Start a new contour.
    fn begin_path(&mut self);

    /// Add a point to the current contour.
    fn add_point(
        &mut self,
        pt: Point,
        point_type: PointType,
        smooth: bool,
        name: Option<&str>,
        identifier: Option<&str>,
    );

    /// Finish the current contour.
    fn end_path(&mut self);

    /// Add a component referencing `base_glyph`.
    fn add_component(&mut self, base_glyph: &str, transform: Affine, identifier: Option<&str>);
}

/// Single event of a point stream.
#[derive(Clone, Debug, PartialEq)]
pub enum PenEvent {
    BeginPath,
    AddPoint {
        pt: Point,
        point_type: PointType,
        smooth: bool,
        name: Option<String>,
        identifier: Option<String>,
    },
    EndPath,
    AddComponent {
        base_glyph: String,
        transform: Affine,
        identifier: Option<String>,
    },
}

impl PointPen for Vec<PenEvent> {
    fn begin_path(&mut self) {
        self.push(PenEvent::BeginPath)
    }

    fn add_point(
        &mut self,
        pt: Point,
        point_type: PointType,
        smooth: bool,
        name: Option<&str>,
        identifier: Option<&str>,
    ) {
        self.push(PenEvent::AddPoint {
            pt,
            point_type,
            smooth,
            name: name.map(str::to_string),
            identifier: identifier.map(str::to_string),
        })
    }

    fn end_path(&mut self) {
        self.push(PenEvent::EndPath)
    }

    fn add_component(&mut self, base_glyph: &str, transform: Affine, identifier: Option<&str>) {
        self.push(PenEvent::AddComponent {
            base_glyph: base_glyph.to_string(),
            transform,
            identifier: identifier.map(str::to_string),
        })
    }
}

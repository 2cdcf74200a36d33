//! The glyph math representation
//!
//! A very shallow glyph for rapid math. It differs from a regular glyph
//! most notably in that line segments do not exist: they are stored as
//! curves with coincident controls so that outlines stay compatible.
//!
//! Notes about glyph math:
//! - contour compatibility is required
//! - component and anchor compatibility is not: only data that can be
//!   paired is processed, so anchors and components may come back in a
//!   different order or count than in either operand

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use kurbo::Rect;
use tracing::debug;

use super::anchors::MathAnchor;
use super::components::MathComponent;
use super::filter::FilterRedundantPointPen;
use super::normalize::MathGlyphPen;
use super::pen::PointPen;
use super::point::MathContour;
use super::source::{GlyphSource, GlyphTarget, Lib, SourceRef};
use super::structure::{CompatibilityOptions, GlyphStructure};

#[derive(Clone, Debug, Default)]
pub struct MathGlyph {
    pub name: Option<String>,
    pub unicodes: Option<Vec<u32>>,
    pub width: Option<f64>,
    pub note: Option<String>,
    pub lib: Lib,
    pub contours: Vec<MathContour>,
    pub components: Vec<MathComponent>,
    pub anchors: Vec<MathAnchor>,
    /// Number of derivations from an extracted glyph; diagnostic only
    pub generation_count: u32,
    source: SourceRef,
}

impl MathGlyph {
    /// An empty glyph
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract a representation from `glyph`.
    ///
    /// Extracting from another representation is a derivation and bumps the
    /// generation count.
    pub fn from_glyph<G: GlyphSource + ?Sized>(glyph: &G) -> Self {
        let mut pen = MathGlyphPen::new();
        glyph.draw_points(&mut pen);
        let (contours, components) = pen.into_parts();

        let generation_count = glyph.generation_count().map_or(0, |count| count + 1);
        Self {
            name: glyph.name().map(str::to_string),
            unicodes: glyph.unicodes(),
            width: glyph.width(),
            note: glyph.note().map(str::to_string),
            lib: glyph.lib(),
            contours,
            components,
            anchors: glyph.anchors(),
            generation_count,
            source: SourceRef::empty(),
        }
    }

    /// Extract a representation from a shared glyph and remember where it
    /// came from without keeping the glyph alive.
    pub fn from_shared<G: GlyphSource + Any + Send + Sync>(glyph: &Arc<G>) -> Self {
        let mut math_glyph = Self::from_glyph(glyph.as_ref());
        if glyph.generation_count().is_none() {
            math_glyph.source = SourceRef::new(glyph);
        }
        math_glyph
    }

    /// The external glyph this was extracted from, while it is alive
    pub fn source_glyph<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.source.get::<T>()
    }

    /// Full structural duplicate; not a derivation.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Metadata-only duplicate without contours, components and anchors.
    ///
    /// This is the starting point of every math result.
    pub fn copy_without_iterables(&self) -> Self {
        Self {
            name: self.name.clone(),
            unicodes: self.unicodes.clone(),
            width: self.width,
            note: self.note.clone(),
            lib: self.lib.clone(),
            contours: Vec::new(),
            components: Vec::new(),
            anchors: Vec::new(),
            generation_count: self.generation_count + 1,
            source: SourceRef::empty(),
        }
    }

    pub fn structure(&self) -> GlyphStructure {
        GlyphStructure::of(self)
    }

    pub fn is_compatible(&self, other: &MathGlyph, options: CompatibilityOptions) -> bool {
        self.structure().is_compatible(&other.structure(), options)
    }

    /// Draw contours and then components into `pen`.
    pub fn draw_points(&self, pen: &mut dyn PointPen) {
        for contour in &self.contours {
            pen.begin_path();
            for point in contour {
                pen.add_point(
                    point.pt,
                    point.point_type,
                    point.smooth,
                    point.name.as_deref(),
                    point.identifier.as_deref(),
                );
            }
            pen.end_path();
        }
        for component in &self.components {
            pen.add_component(
                &component.base_glyph,
                component.transform,
                component.identifier.as_deref(),
            );
        }
    }

    /// Bounding box of the contours. Components are not measured.
    pub fn bounds(&self) -> Option<Rect> {
        crate::geometry::outline_bounds(self)
    }

    /// Write this representation back into `glyph`, replacing its outline,
    /// anchors, lib and metadata. Redundant curve points collapse to lines.
    pub fn materialize<'g, G: GlyphTarget + PointPen>(&self, glyph: &'g mut G) -> &'g mut G {
        glyph.clear_contours();
        glyph.clear_components();
        glyph.clear_anchors();
        glyph.clear_lib();
        self.draw_points(&mut FilterRedundantPointPen::new(&mut *glyph));
        self.write_metadata(glyph);
        glyph
    }

    /// Like [`materialize`](Self::materialize), drawing the outline into a
    /// separate `pen` instead of the glyph itself.
    pub fn materialize_with_pen<'g, G: GlyphTarget>(
        &self,
        glyph: &'g mut G,
        pen: &mut dyn PointPen,
    ) -> &'g mut G {
        glyph.clear_contours();
        glyph.clear_components();
        glyph.clear_anchors();
        glyph.clear_lib();
        self.draw_points(&mut FilterRedundantPointPen::new(pen));
        self.write_metadata(glyph);
        glyph
    }

    fn write_metadata<G: GlyphTarget>(&self, glyph: &mut G) {
        glyph.set_name(self.name.as_deref());
        glyph.set_unicodes(self.unicodes.as_deref());
        glyph.set_width(self.width);
        glyph.set_note(self.note.as_deref());
        glyph.set_anchors(&self.anchors);
        for (key, value) in &self.lib {
            glyph.set_lib_value(key, value);
        }
        debug!("Materialized {}", self);
    }
}

/// Equality is structural; generation count and source are ignored.
impl PartialEq for MathGlyph {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.unicodes == other.unicodes
            && self.width == other.width
            && self.note == other.note
            && self.lib == other.lib
            && self.contours == other.contours
            && self.components == other.components
            && self.anchors == other.anchors
    }
}

impl fmt::Display for MathGlyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<MathGlyph {}>", self.name.as_deref().unwrap_or("None"))
    }
}

impl GlyphSource for MathGlyph {
    fn draw_points(&self, pen: &mut dyn PointPen) {
        MathGlyph::draw_points(self, pen)
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn unicodes(&self) -> Option<Vec<u32>> {
        self.unicodes.clone()
    }

    fn width(&self) -> Option<f64> {
        self.width
    }

    fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    fn anchors(&self) -> Vec<MathAnchor> {
        self.anchors.clone()
    }

    fn lib(&self) -> Lib {
        self.lib.clone()
    }

    fn generation_count(&self) -> Option<u32> {
        Some(self.generation_count)
    }
}

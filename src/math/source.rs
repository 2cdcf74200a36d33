//! The boundary to external glyph objects.
//!
//! Glyph math never owns the glyph model it reads from. An external glyph
//! exposes its outline through [`GlyphSource::draw_points`] and its metadata
//! through plain accessors; materialization writes back through
//! [`GlyphTarget`] and a [`PointPen`].

use std::any::Any;
use std::fmt;
use std::sync::{Arc, Weak};

use super::anchors::MathAnchor;
use super::pen::PointPen;

/// Open glyph lib: arbitrary keys mapped to JSON-like values
pub type Lib = serde_json::Map<String, serde_json::Value>;

/// Read side of an external glyph.
pub trait GlyphSource {
    /// Draw contours and components into `pen`.
    fn draw_points(&self, pen: &mut dyn PointPen);

    fn name(&self) -> Option<&str>;

    fn unicodes(&self) -> Option<Vec<u32>>;

    fn width(&self) -> Option<f64>;

    fn note(&self) -> Option<&str>;

    fn anchors(&self) -> Vec<MathAnchor>;

    fn lib(&self) -> Lib;

    /// Generation of a glyph math representation.
    ///
    /// `None` for external glyphs; math representations return their own
    /// count so that extracting from them counts as a derivation.
    fn generation_count(&self) -> Option<u32> {
        None
    }
}

/// Mutators of an external glyph, used only by materialization.
pub trait GlyphTarget {
    fn clear_contours(&mut self);

    fn clear_components(&mut self);

    fn clear_anchors(&mut self);

    fn clear_lib(&mut self);

    fn set_name(&mut self, name: Option<&str>);

    fn set_unicodes(&mut self, unicodes: Option<&[u32]>);

    fn set_width(&mut self, width: Option<f64>);

    fn set_note(&mut self, note: Option<&str>);

    fn set_anchors(&mut self, anchors: &[MathAnchor]);

    fn set_lib_value(&mut self, key: &str, value: &serde_json::Value);
}

/// Non-owning handle to the external glyph a representation was built from.
///
/// The referent may be dropped at any time; lookups then return `None`.
#[derive(Clone, Default)]
pub struct SourceRef(Option<Weak<dyn Any + Send + Sync>>);

impl SourceRef {
    pub fn new<T: Any + Send + Sync>(glyph: &Arc<T>) -> Self {
        let weak: Weak<T> = Arc::downgrade(glyph);
        Self(Some(weak as Weak<dyn Any + Send + Sync>))
    }

    pub fn empty() -> Self {
        Self(None)
    }

    /// The source glyph, if it is still alive and of type `T`
    pub fn get<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.0.as_ref()?.upgrade()?.downcast::<T>().ok()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}

impl fmt::Debug for SourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(weak) if weak.strong_count() > 0 => f.write_str("SourceRef(alive)"),
            Some(_) => f.write_str("SourceRef(dropped)"),
            None => f.write_str("SourceRef(none)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_ref_tolerates_drop() {
        let glyph = Arc::new(String::from("A"));
        let source = SourceRef::new(&glyph);

        assert_eq!(source.get::<String>().as_deref().map(String::as_str), Some("A"));
        assert!(source.get::<u32>().is_none());

        drop(glyph);
        assert!(source.get::<String>().is_none());
        assert!(!source.is_empty());
        assert!(SourceRef::empty().get::<String>().is_none());
    }
}

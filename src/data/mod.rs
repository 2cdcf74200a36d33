//! Font data: norad glyphs as glyph math sources and UFO I/O

pub mod conversions;
pub mod ufo;

pub use conversions::{json_to_plist, plist_to_json};
pub use ufo::{check_fonts, interpolate_fonts, load_ufo_from_path, save_ufo_to_path};

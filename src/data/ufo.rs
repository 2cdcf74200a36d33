//! UFO file I/O operations and font-level glyph math

use std::path::Path;

use norad::Font;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::core::errors::{validate_ufo_path, AppResult, FileContext};
use crate::math::{CompatibilityOptions, Factor, MathGlyph};

/// Load a UFO font file from disk
pub fn load_ufo_from_path(path: impl AsRef<Path>) -> AppResult<Font> {
    let path = path.as_ref();
    validate_ufo_path(path)?;
    let font = Font::load(path).with_file_context("load", path)?;
    debug!(
        "Loaded {:?} with {} glyphs",
        path,
        font.default_layer().len()
    );
    Ok(font)
}

pub fn save_ufo_to_path(font: &Font, path: impl AsRef<Path>) -> AppResult<()> {
    let path = path.as_ref();
    font.save(path).with_file_context("save", path)?;
    debug!("Saved font to {:?}", path);
    Ok(())
}

/// Compatibility of one glyph across two fonts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlyphReport {
    pub name: String,
    pub compatible: bool,
    /// First contour difference, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mismatch: Option<String>,
    /// The glyph is absent from one of the fonts
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub missing: bool,
}

/// Glyph names to work on: the requested subset, or every glyph in `font1`
/// in layer order.
fn glyph_names(font1: &Font, names: &[String]) -> Vec<String> {
    if names.is_empty() {
        font1
            .default_layer()
            .iter()
            .map(|glyph| glyph.name().to_string())
            .collect()
    } else {
        names.to_vec()
    }
}

fn extract(font: &Font, name: &str) -> Option<MathGlyph> {
    font.default_layer()
        .get_glyph(name)
        .map(MathGlyph::from_glyph)
}

/// Compare the glyphs of two fonts.
pub fn check_fonts(
    font1: &Font,
    font2: &Font,
    names: &[String],
    options: CompatibilityOptions,
) -> Vec<GlyphReport> {
    glyph_names(font1, names)
        .into_iter()
        .map(|name| match (extract(font1, &name), extract(font2, &name)) {
            (Some(glyph1), Some(glyph2)) => {
                let structure1 = glyph1.structure();
                let structure2 = glyph2.structure();
                GlyphReport {
                    compatible: structure1.is_compatible(&structure2, options),
                    mismatch: structure1.contour_mismatch(&structure2).map(|m| m.to_string()),
                    missing: false,
                    name,
                }
            }
            _ => GlyphReport {
                name,
                compatible: false,
                mismatch: None,
                missing: true,
            },
        })
        .collect()
}

/// Outcome of [`interpolate_fonts`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InterpolationSummary {
    pub interpolated: Vec<String>,
    pub skipped: Vec<String>,
}

/// Interpolate every shared glyph from `font1` towards `font2`.
///
/// The result is a copy of `font1` whose glyphs are replaced by
/// `a + (b - a) * factor`. Glyphs that are missing from `font2` or
/// incompatible keep their `font1` outline and are reported as skipped.
pub fn interpolate_fonts(
    font1: &Font,
    font2: &Font,
    factor: Factor,
    names: &[String],
) -> (Font, InterpolationSummary) {
    let mut result = font1.clone();
    let mut summary = InterpolationSummary::default();

    for name in glyph_names(font1, names) {
        let Some(source) = font1.default_layer().get_glyph(&name) else {
            warn!("Glyph {} is not in the first font, skipping", name);
            summary.skipped.push(name);
            continue;
        };
        let Some(target) = font2.default_layer().get_glyph(&name) else {
            warn!("Glyph {} is not in the second font, skipping", name);
            summary.skipped.push(name);
            continue;
        };

        let glyph1 = MathGlyph::from_glyph(source);
        let glyph2 = MathGlyph::from_glyph(target);
        let instance = match glyph1.interpolate(&glyph2, factor) {
            Ok(instance) => instance,
            Err(error) => {
                warn!("Skipping {}: {}", name, error);
                summary.skipped.push(name);
                continue;
            }
        };

        if let Some(glyph) = result.default_layer_mut().get_glyph_mut(&name) {
            instance.materialize(glyph);
            summary.interpolated.push(name);
        }
    }

    info!(
        "Interpolated {} glyphs, skipped {}",
        summary.interpolated.len(),
        summary.skipped.len()
    );
    (result, summary)
}

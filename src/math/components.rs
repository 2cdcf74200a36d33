//! Component records, pairing and transform arithmetic

use kurbo::{Affine, Point};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::point::{Factor, FactorFn, PairFn};

/// A reference to another glyph placed through a 2D affine transform.
///
/// The transform coefficients are in UFO order: `(xScale, xyScale, yxScale,
/// yScale, xOffset, yOffset)`, which is also kurbo's coefficient order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MathComponent {
    pub base_glyph: String,
    pub transform: Affine,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
}

impl MathComponent {
    pub fn new<S: Into<String>>(base_glyph: S, transform: Affine) -> Self {
        Self {
            base_glyph: base_glyph.into(),
            transform,
            identifier: None,
        }
    }

    pub fn with_identifier<S: Into<String>>(mut self, identifier: S) -> Self {
        self.identifier = Some(identifier.into());
        self
    }
}

/// Pair components of two glyphs.
///
/// The first pass pairs components with the same base glyph and the same
/// identifier (both absent counts as the same). The second pass pairs what
/// is left by base glyph alone. Each pass walks `components1` in order and
/// takes the first unconsumed match from `components2`. Components without a
/// partner are dropped.
pub fn pair_components<'a>(
    components1: &'a [MathComponent],
    components2: &'a [MathComponent],
) -> Vec<(&'a MathComponent, &'a MathComponent)> {
    let mut pairs = Vec::new();
    let mut paired1 = vec![false; components1.len()];
    let mut consumed2 = vec![false; components2.len()];

    for (index1, component1) in components1.iter().enumerate() {
        let found = components2.iter().enumerate().position(|(index2, component2)| {
            !consumed2[index2]
                && component2.base_glyph == component1.base_glyph
                && component2.identifier == component1.identifier
        });
        if let Some(index2) = found {
            paired1[index1] = true;
            consumed2[index2] = true;
            pairs.push((component1, &components2[index2]));
        }
    }

    for (index1, component1) in components1.iter().enumerate() {
        if paired1[index1] {
            continue;
        }
        let found = components2.iter().enumerate().position(|(index2, component2)| {
            !consumed2[index2] && component2.base_glyph == component1.base_glyph
        });
        if let Some(index2) = found {
            paired1[index1] = true;
            consumed2[index2] = true;
            pairs.push((component1, &components2[index2]));
        }
    }

    let dropped = paired1.iter().filter(|paired| !**paired).count()
        + consumed2.iter().filter(|consumed| !**consumed).count();
    if dropped > 0 {
        debug!("Dropped {} unpaired components", dropped);
    }
    pairs
}

/// Split a transform into its (scale, skew, offset) coordinate pairs.
fn transform_pairs(transform: Affine) -> [Point; 3] {
    let [xx, xy, yx, yy, dx, dy] = transform.as_coeffs();
    [Point::new(xx, yy), Point::new(xy, yx), Point::new(dx, dy)]
}

fn transform_from_pairs([scale, skew, offset]: [Point; 3]) -> Affine {
    Affine::new([scale.x, skew.x, skew.y, scale.y, offset.x, offset.y])
}

/// Combine each pair's transforms; the result keeps the first component's
/// base glyph and identifier.
pub(crate) fn combine_component_pairs(
    pairs: &[(&MathComponent, &MathComponent)],
    funct: PairFn,
) -> Vec<MathComponent> {
    pairs
        .iter()
        .map(|(component1, component2)| {
            let pairs1 = transform_pairs(component1.transform);
            let pairs2 = transform_pairs(component2.transform);
            let combined = [
                funct(pairs1[0], pairs2[0]),
                funct(pairs1[1], pairs2[1]),
                funct(pairs1[2], pairs2[2]),
            ];
            MathComponent {
                transform: transform_from_pairs(combined),
                ..(*component1).clone()
            }
        })
        .collect()
}

pub(crate) fn scale_components(
    components: &[MathComponent],
    factor: Factor,
    funct: FactorFn,
) -> Vec<MathComponent> {
    components
        .iter()
        .map(|component| MathComponent {
            transform: transform_from_pairs(
                transform_pairs(component.transform).map(|pair| funct(pair, factor)),
            ),
            ..component.clone()
        })
        .collect()
}

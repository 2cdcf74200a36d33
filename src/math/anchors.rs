//! Anchor records, pairing and arithmetic

use kurbo::Point;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::point::{Factor, FactorFn, PairFn};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MathAnchor {
    pub name: Option<String>,
    pub x: f64,
    pub y: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    /// UFO color string, `"r,g,b,a"`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl MathAnchor {
    pub fn new<S: Into<String>>(name: S, x: f64, y: f64) -> Self {
        Self {
            name: Some(name.into()),
            x,
            y,
            identifier: None,
            color: None,
        }
    }

    pub fn with_identifier<S: Into<String>>(mut self, identifier: S) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    pub fn with_color<S: Into<String>>(mut self, color: S) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn pt(&self) -> Point {
        Point::new(self.x, self.y)
    }

    fn moved_to(&self, pt: Point) -> Self {
        Self {
            x: pt.x,
            y: pt.y,
            ..self.clone()
        }
    }
}

/// Anchors grouped by name, in order of first appearance.
type AnchorTree<'a> = Vec<(Option<&'a str>, Vec<&'a MathAnchor>)>;

fn anchor_tree(anchors: &[MathAnchor]) -> AnchorTree<'_> {
    let mut tree: AnchorTree<'_> = Vec::new();
    for anchor in anchors {
        let name = anchor.name.as_deref();
        match tree.iter_mut().find(|(bucket_name, _)| *bucket_name == name) {
            Some((_, bucket)) => bucket.push(anchor),
            None => tree.push((name, vec![anchor])),
        }
    }
    tree
}

/// Pair anchors of two glyphs.
///
/// Only anchors with the same name are paired. Within a name, anchors with
/// equal identifiers pair first (two absent identifiers are equal); the rest
/// pair in order of appearance until either side runs out. Names missing
/// from either glyph and surplus anchors are dropped.
pub fn pair_anchors<'a>(
    anchors1: &'a [MathAnchor],
    anchors2: &'a [MathAnchor],
) -> Vec<(&'a MathAnchor, &'a MathAnchor)> {
    let tree2 = anchor_tree(anchors2);
    let mut pairs = Vec::new();

    for (name, bucket1) in anchor_tree(anchors1) {
        let Some((_, bucket2)) = tree2.iter().find(|(bucket_name, _)| *bucket_name == name) else {
            debug!("Anchor {:?} has no counterpart, dropping {}", name, bucket1.len());
            continue;
        };

        let mut paired1 = vec![false; bucket1.len()];
        let mut consumed2 = vec![false; bucket2.len()];

        for (index1, anchor1) in bucket1.iter().enumerate() {
            let found = bucket2.iter().enumerate().position(|(index2, anchor2)| {
                !consumed2[index2] && anchor2.identifier == anchor1.identifier
            });
            if let Some(index2) = found {
                paired1[index1] = true;
                consumed2[index2] = true;
                pairs.push((*anchor1, bucket2[index2]));
            }
        }

        let leftovers1 = bucket1
            .iter()
            .zip(&paired1)
            .filter(|(_, paired)| !**paired)
            .map(|(anchor, _)| *anchor);
        let leftovers2 = bucket2
            .iter()
            .zip(&consumed2)
            .filter(|(_, consumed)| !**consumed)
            .map(|(anchor, _)| *anchor);
        pairs.extend(leftovers1.zip(leftovers2));
    }
    pairs
}

/// Combine each pair's coordinates; the result keeps the first anchor's
/// name, identifier and color.
pub(crate) fn combine_anchor_pairs(
    pairs: &[(&MathAnchor, &MathAnchor)],
    funct: PairFn,
) -> Vec<MathAnchor> {
    pairs
        .iter()
        .map(|(anchor1, anchor2)| anchor1.moved_to(funct(anchor1.pt(), anchor2.pt())))
        .collect()
}

pub(crate) fn scale_anchors(anchors: &[MathAnchor], factor: Factor, funct: FactorFn) -> Vec<MathAnchor> {
    anchors
        .iter()
        .map(|anchor| anchor.moved_to(funct(anchor.pt(), factor)))
        .collect()
}

//! norad glyphs as glyph math sources and targets
//!
//! This module contains the conversion logic between norad's UFO glyph
//! model and the glyph math representation: the point stream, anchors,
//! codepoints and the plist lib.

use std::time::SystemTime;

use kurbo::{Affine, Point};
use serde_json::Value;
use tracing::warn;

use crate::math::{GlyphSource, GlyphTarget, Lib, MathAnchor, PointPen, PointType};

impl PointType {
    pub fn from_norad_point_type(norad_type: &norad::PointType) -> Self {
        match norad_type {
            norad::PointType::Move => PointType::Move,
            norad::PointType::Line => PointType::Line,
            norad::PointType::OffCurve => PointType::OffCurve,
            norad::PointType::Curve => PointType::Curve,
            norad::PointType::QCurve => PointType::QCurve,
        }
    }

    pub fn to_norad_point_type(&self) -> norad::PointType {
        match self {
            PointType::Move => norad::PointType::Move,
            PointType::Line => norad::PointType::Line,
            PointType::OffCurve => norad::PointType::OffCurve,
            PointType::Curve => norad::PointType::Curve,
            PointType::QCurve => norad::PointType::QCurve,
        }
    }
}

pub fn affine_from_norad(transform: &norad::AffineTransform) -> Affine {
    Affine::new([
        transform.x_scale,
        transform.xy_scale,
        transform.yx_scale,
        transform.y_scale,
        transform.x_offset,
        transform.y_offset,
    ])
}

pub fn affine_to_norad(transform: Affine) -> norad::AffineTransform {
    let [x_scale, xy_scale, yx_scale, y_scale, x_offset, y_offset] = transform.as_coeffs();
    norad::AffineTransform {
        x_scale,
        xy_scale,
        yx_scale,
        y_scale,
        x_offset,
        y_offset,
    }
}

impl MathAnchor {
    pub fn from_norad_anchor(anchor: &norad::Anchor) -> Self {
        Self {
            name: anchor.name.as_ref().map(|name| name.to_string()),
            x: anchor.x,
            y: anchor.y,
            identifier: anchor.identifier().map(|id| id.as_str().to_string()),
            color: anchor.color.as_ref().map(|color| {
                let (red, green, blue, alpha) = color.channels();
                format!("{red},{green},{blue},{alpha}")
            }),
        }
    }

    pub fn to_norad_anchor(&self) -> norad::Anchor {
        let name = self.name.as_deref().and_then(|name| parse_name(name, "anchor"));
        let color = self.color.as_deref().and_then(|color| match color.parse::<norad::Color>() {
            Ok(color) => Some(color),
            Err(_) => {
                warn!("Dropping invalid anchor color {:?}", color);
                None
            }
        });
        let identifier = self
            .identifier
            .as_deref()
            .and_then(|identifier| norad::Identifier::new(identifier).ok());
        norad::Anchor::new(self.x, self.y, name, color, identifier)
    }
}

fn parse_name(name: &str, what: &str) -> Option<norad::Name> {
    match name.parse::<norad::Name>() {
        Ok(name) => Some(name),
        Err(_) => {
            warn!("Dropping invalid {} name {:?}", what, name);
            None
        }
    }
}

/// Convert a plist value into the open lib value type.
pub fn plist_to_json(value: &plist::Value) -> Value {
    match value {
        plist::Value::Array(items) => Value::Array(items.iter().map(plist_to_json).collect()),
        plist::Value::Dictionary(dict) => Value::Object(
            dict.iter()
                .map(|(key, value)| (key.clone(), plist_to_json(value)))
                .collect(),
        ),
        plist::Value::Boolean(flag) => Value::Bool(*flag),
        plist::Value::Data(bytes) => Value::Array(bytes.iter().map(|byte| Value::from(*byte)).collect()),
        plist::Value::Date(date) => {
            let time = SystemTime::from(date.clone());
            Value::String(chrono::DateTime::<chrono::Utc>::from(time).to_rfc3339())
        }
        plist::Value::Real(real) => serde_json::Number::from_f64(*real)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        plist::Value::Integer(integer) => integer
            .as_signed()
            .map(Value::from)
            .or_else(|| integer.as_unsigned().map(Value::from))
            .unwrap_or(Value::Null),
        plist::Value::String(string) => Value::String(string.clone()),
        _ => Value::Null,
    }
}

/// Convert a lib value into plist; `null` has no plist equivalent.
pub fn json_to_plist(value: &Value) -> Option<plist::Value> {
    let converted = match value {
        Value::Null => return None,
        Value::Bool(flag) => plist::Value::Boolean(*flag),
        Value::Number(number) => match number.as_i64() {
            Some(integer) => plist::Value::Integer(integer.into()),
            None => plist::Value::Real(number.as_f64()?),
        },
        Value::String(string) => plist::Value::String(string.clone()),
        Value::Array(items) => plist::Value::Array(items.iter().filter_map(json_to_plist).collect()),
        Value::Object(map) => {
            let mut dict = plist::Dictionary::new();
            for (key, value) in map {
                if let Some(value) = json_to_plist(value) {
                    dict.insert(key.clone(), value);
                }
            }
            plist::Value::Dictionary(dict)
        }
    };
    Some(converted)
}

impl GlyphSource for norad::Glyph {
    fn draw_points(&self, pen: &mut dyn PointPen) {
        for contour in &self.contours {
            pen.begin_path();
            for point in &contour.points {
                pen.add_point(
                    Point::new(point.x, point.y),
                    PointType::from_norad_point_type(&point.typ),
                    point.smooth,
                    point.name.as_ref().map(|name| name.as_str()),
                    point.identifier().map(|id| id.as_str()),
                );
            }
            pen.end_path();
        }
        for component in &self.components {
            pen.add_component(
                component.base.as_str(),
                affine_from_norad(&component.transform),
                component.identifier().map(|id| id.as_str()),
            );
        }
    }

    fn name(&self) -> Option<&str> {
        Some(norad::Glyph::name(self).as_str())
    }

    fn unicodes(&self) -> Option<Vec<u32>> {
        Some(self.codepoints.iter().map(u32::from).collect())
    }

    fn width(&self) -> Option<f64> {
        Some(self.width)
    }

    fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    fn anchors(&self) -> Vec<MathAnchor> {
        self.anchors.iter().map(MathAnchor::from_norad_anchor).collect()
    }

    fn lib(&self) -> Lib {
        self.lib
            .iter()
            .map(|(key, value)| (key.clone(), plist_to_json(value)))
            .collect()
    }
}

/// Receiving points writes straight into the glyph's contours.
impl PointPen for norad::Glyph {
    fn begin_path(&mut self) {
        self.contours.push(norad::Contour::new(Vec::new(), None));
    }

    fn add_point(
        &mut self,
        pt: Point,
        point_type: PointType,
        smooth: bool,
        name: Option<&str>,
        identifier: Option<&str>,
    ) {
        let Some(contour) = self.contours.last_mut() else {
            warn!("Point added outside of a contour, ignoring");
            return;
        };
        contour.points.push(norad::ContourPoint::new(
            pt.x,
            pt.y,
            point_type.to_norad_point_type(),
            smooth,
            name.and_then(|name| parse_name(name, "point")),
            identifier.and_then(|identifier| norad::Identifier::new(identifier).ok()),
        ));
    }

    fn end_path(&mut self) {}

    fn add_component(&mut self, base_glyph: &str, transform: Affine, identifier: Option<&str>) {
        let Some(base) = parse_name(base_glyph, "component base") else {
            return;
        };
        let identifier = identifier.and_then(|identifier| norad::Identifier::new(identifier).ok());
        self.components
            .push(norad::Component::new(base, affine_to_norad(transform), identifier));
    }
}

impl GlyphTarget for norad::Glyph {
    fn clear_contours(&mut self) {
        self.contours.clear();
    }

    fn clear_components(&mut self) {
        self.components.clear();
    }

    fn clear_anchors(&mut self) {
        self.anchors.clear();
    }

    fn clear_lib(&mut self) {
        self.lib.clear();
    }

    /// norad glyph names are fixed at construction, so a rename rebuilds
    /// the glyph around its existing data.
    fn set_name(&mut self, name: Option<&str>) {
        let Some(name) = name else {
            return;
        };
        if norad::Glyph::name(self).as_str() == name || parse_name(name, "glyph").is_none() {
            return;
        }
        let mut renamed = norad::Glyph::new(name);
        renamed.width = self.width;
        renamed.height = self.height;
        renamed.codepoints = self.codepoints.clone();
        renamed.note = self.note.take();
        renamed.guidelines = std::mem::take(&mut self.guidelines);
        renamed.anchors = std::mem::take(&mut self.anchors);
        renamed.components = std::mem::take(&mut self.components);
        renamed.contours = std::mem::take(&mut self.contours);
        renamed.image = self.image.take();
        renamed.lib = std::mem::take(&mut self.lib);
        *self = renamed;
    }

    fn set_unicodes(&mut self, unicodes: Option<&[u32]>) {
        let chars = unicodes
            .unwrap_or_default()
            .iter()
            .filter_map(|&value| char::from_u32(value));
        self.codepoints = norad::Codepoints::new(chars);
    }

    fn set_width(&mut self, width: Option<f64>) {
        self.width = width.unwrap_or(0.0);
    }

    fn set_note(&mut self, note: Option<&str>) {
        self.note = note.map(str::to_string);
    }

    fn set_anchors(&mut self, anchors: &[MathAnchor]) {
        self.anchors = anchors.iter().map(MathAnchor::to_norad_anchor).collect();
    }

    fn set_lib_value(&mut self, key: &str, value: &Value) {
        if let Some(value) = json_to_plist(value) {
            self.lib.insert(key.to_string(), value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{MathGlyph, PenEvent};

    fn norad_square() -> norad::Glyph {
        let mut glyph = norad::Glyph::new("square");
        glyph.width = 300.0;
        glyph.codepoints = norad::Codepoints::new(['S']);
        let points = [(0.0, 0.0), (0.0, 200.0), (200.0, 200.0), (200.0, 0.0)]
            .into_iter()
            .map(|(x, y)| norad::ContourPoint::new(x, y, norad::PointType::Line, false, None, None))
            .collect();
        glyph.contours.push(norad::Contour::new(points, None));
        glyph
    }

    #[test]
    fn test_affine_round_trip() {
        let transform = norad::AffineTransform {
            x_scale: 1.0,
            xy_scale: 0.5,
            yx_scale: 0.25,
            y_scale: 2.0,
            x_offset: 50.0,
            y_offset: 25.0,
        };
        let affine = affine_from_norad(&transform);
        assert_eq!(affine.as_coeffs(), [1.0, 0.5, 0.25, 2.0, 50.0, 25.0]);
        assert_eq!(affine_to_norad(affine).y_offset, 25.0);
    }

    #[test]
    fn test_extract_norad_glyph() {
        let mut glyph = norad_square();
        glyph.anchors.push(MathAnchor::new("top", 100.0, 200.0).to_norad_anchor());
        glyph
            .lib
            .insert("com.example.count".to_string(), plist::Value::Integer(3.into()));

        let math_glyph = MathGlyph::from_glyph(&glyph);
        assert_eq!(math_glyph.name.as_deref(), Some("square"));
        assert_eq!(math_glyph.unicodes, Some(vec![0x53]));
        assert_eq!(math_glyph.width, Some(300.0));
        assert_eq!(math_glyph.contours.len(), 1);
        assert_eq!(math_glyph.contours[0].len(), 12);
        assert_eq!(math_glyph.anchors, vec![MathAnchor::new("top", 100.0, 200.0)]);
        assert_eq!(math_glyph.lib.get("com.example.count"), Some(&serde_json::json!(3)));
        assert_eq!(math_glyph.generation_count, 0);
    }

    #[test]
    fn test_materialize_restores_lines() {
        let source = norad_square();
        let math_glyph = MathGlyph::from_glyph(&source);

        let mut target = norad::Glyph::new("placeholder");
        target.anchors.push(MathAnchor::new("stale", 0.0, 0.0).to_norad_anchor());
        math_glyph.materialize(&mut target);

        assert_eq!(target.name().as_str(), "square");
        assert_eq!(target.width, 300.0);
        assert!(target.anchors.is_empty());
        assert_eq!(target.codepoints.iter().collect::<Vec<_>>(), vec!['S']);

        let mut expected: Vec<PenEvent> = Vec::new();
        GlyphSource::draw_points(&source, &mut expected);
        let mut actual: Vec<PenEvent> = Vec::new();
        GlyphSource::draw_points(&target, &mut actual);
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_components_survive_materialize() {
        let mut source = norad::Glyph::new("Aacute");
        source.components.push(norad::Component::new(
            "A".parse().unwrap(),
            affine_to_norad(Affine::IDENTITY),
            None,
        ));
        source.components.push(norad::Component::new(
            "acute".parse().unwrap(),
            affine_to_norad(Affine::translate((120.0, 40.0))),
            None,
        ));

        let doubled = MathGlyph::from_glyph(&source).multiply(2.0);
        let mut target = norad::Glyph::new("Aacute");
        doubled.materialize(&mut target);

        assert_eq!(target.components.len(), 2);
        assert_eq!(target.components[1].base.as_str(), "acute");
        assert_eq!(target.components[1].transform.x_offset, 240.0);
        assert_eq!(target.components[1].transform.x_scale, 2.0);
    }

    #[test]
    fn test_lib_value_conversion() {
        let value = serde_json::json!({
            "flag": true,
            "count": 3,
            "ratio": 0.5,
            "names": ["a", "b"],
            "missing": null,
        });
        let plist_value = json_to_plist(&value).unwrap();
        let dict = plist_value.as_dictionary().unwrap();
        assert!(dict.get("missing").is_none());
        assert_eq!(dict.get("ratio"), Some(&plist::Value::Real(0.5)));

        let back = plist_to_json(&plist_value);
        assert_eq!(back["count"], serde_json::json!(3));
        assert_eq!(back["names"], serde_json::json!(["a", "b"]));
        assert_eq!(json_to_plist(&Value::Null), None);
    }

    #[test]
    fn test_anchor_color_round_trip() {
        let anchor = MathAnchor::new("top", 10.0, 20.0).with_color("1,0,0,1");
        let norad_anchor = anchor.to_norad_anchor();
        assert!(norad_anchor.color.is_some());
        assert_eq!(MathAnchor::from_norad_anchor(&norad_anchor), anchor);
    }
}

//! Host element view: tag plus ordered attribute bag.
//!
//! Shapes are materialized from an [`Element`] at drag start and turned back
//! into a [`Commit`] when the drag ends. Only geometry attributes are read or
//! written; everything else (ids, classes, styles, transforms) passes through
//! in its original order.

use serde::{Deserialize, Serialize};

use crate::model::{
    CircleShape, EllipseShape, LineShape, OpaqueShape, PathShape, Point, PolyShape, Primitive,
    RectShape, Shape, ShapeKind,
};
use crate::path_codec::{format_number, tokenize_numbers};

/// Ordered attribute list. Order is preserved so an untouched element
/// serializes byte for byte as it came in.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeBag(Vec<(String, String)>);

impl AttributeBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Replaces the value in place, or appends when the attribute is new.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value,
            None => self.0.push((name.to_string(), value)),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.0.iter().position(|(k, _)| k == name)?;
        Some(self.0.remove(index).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AttributeBag {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub tag: String,
    pub attributes: AttributeBag,
}

impl Element {
    pub fn new(tag: impl Into<String>, attributes: AttributeBag) -> Self {
        Self {
            tag: tag.into(),
            attributes,
        }
    }
}

/// What the host applies to the selected node when a session ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Commit {
    /// Same tag; replace the node's attributes.
    Attributes { attributes: AttributeBag },
    /// Tag changed; swap the node in place, keeping its document position.
    Replace { element: Element },
}

impl Commit {
    /// Element that results from applying this commit to `original`.
    pub fn apply_to(&self, original: &Element) -> Element {
        match self {
            Commit::Attributes { attributes } => Element::new(original.tag.clone(), attributes.clone()),
            Commit::Replace { element } => element.clone(),
        }
    }
}

pub(crate) fn write_number(attrs: &mut AttributeBag, name: &str, value: f64, decimals: u32) {
    attrs.set(name, format_number(value, decimals));
}

/// Parse a length attribute: a plain number with an optional `px` suffix.
pub fn parse_length(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let number = trimmed.strip_suffix("px").unwrap_or(trimmed).trim_end();
    number.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a `points` list; malformed numbers are skipped and an odd trailing
/// coordinate is dropped.
pub fn parse_points(raw: &str) -> Vec<Point> {
    let numbers: Vec<f64> = tokenize_numbers(raw)
        .iter()
        .filter_map(|t| t.parse::<f64>().ok().filter(|v| v.is_finite()))
        .collect();
    numbers
        .chunks_exact(2)
        .map(|pair| Point::new(pair[0], pair[1]))
        .collect()
}

pub fn format_points(points: &[Point], decimals: u32) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", format_number(p.x, decimals), format_number(p.y, decimals)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Reads a required-or-default length; `Err` when present but unreadable.
fn length_or_zero(attrs: &AttributeBag, name: &str) -> Result<f64, String> {
    match attrs.get(name) {
        None => Ok(0.0),
        Some(raw) => parse_length(raw).ok_or_else(|| format!("{}=\"{}\"", name, raw)),
    }
}

fn optional_length(attrs: &AttributeBag, name: &str) -> Result<Option<f64>, String> {
    match attrs.get(name) {
        None | Some("auto") => Ok(None),
        Some(raw) => parse_length(raw)
            .map(|v| Some(v.abs()))
            .ok_or_else(|| format!("{}=\"{}\"", name, raw)),
    }
}

fn materialize(element: &Element) -> Result<Shape, String> {
    let a = &element.attributes;
    let shape = match ShapeKind::from_tag(&element.tag) {
        ShapeKind::Rect => Shape::Rect(
            RectShape::new(
                length_or_zero(a, "x")?,
                length_or_zero(a, "y")?,
                length_or_zero(a, "width")?,
                length_or_zero(a, "height")?,
            )
            .with_radii(optional_length(a, "rx")?, optional_length(a, "ry")?),
        ),
        ShapeKind::Circle => Shape::Circle(CircleShape::new(
            Point::new(length_or_zero(a, "cx")?, length_or_zero(a, "cy")?),
            length_or_zero(a, "r")?.abs(),
        )),
        ShapeKind::Ellipse => Shape::Ellipse(EllipseShape::new(
            Point::new(length_or_zero(a, "cx")?, length_or_zero(a, "cy")?),
            length_or_zero(a, "rx")?.abs(),
            length_or_zero(a, "ry")?.abs(),
        )),
        ShapeKind::Line => Shape::Line(LineShape::new(
            Point::new(length_or_zero(a, "x1")?, length_or_zero(a, "y1")?),
            Point::new(length_or_zero(a, "x2")?, length_or_zero(a, "y2")?),
        )),
        ShapeKind::Polyline => Shape::Polyline(PolyShape::new(parse_points(
            a.get("points").unwrap_or_default(),
        ))),
        ShapeKind::Polygon => Shape::Polygon(PolyShape::new(parse_points(
            a.get("points").unwrap_or_default(),
        ))),
        ShapeKind::Path => Shape::Path(PathShape::from_data(a.get("d").unwrap_or_default())),
        ShapeKind::Other => Shape::Other(OpaqueShape {
            tag: element.tag.clone(),
        }),
    };
    Ok(shape)
}

impl Shape {
    /// Materialize geometry from a host element.
    ///
    /// Unknown tags, and known tags whose geometry uses units other than
    /// pixels, become inert [`Shape::Other`].
    pub fn from_element(element: &Element) -> Shape {
        materialize(element).unwrap_or_else(|attr| {
            tracing::debug!(tag = %element.tag, %attr, "geometry not transformable, treating as inert");
            Shape::Other(OpaqueShape {
                tag: element.tag.clone(),
            })
        })
    }

    /// Express this shape as a change to `original`.
    ///
    /// When the tag is unchanged only geometry attributes are rewritten. A
    /// morphed shape replaces the element: the old kind's geometry attributes
    /// are dropped and the new ones appended after the surviving attributes.
    pub fn commit_against(&self, original: &Element, decimals: u32) -> Commit {
        if self.is_inert() {
            return Commit::Attributes {
                attributes: original.attributes.clone(),
            };
        }

        let mut attributes = original.attributes.clone();
        if self.tag() == original.tag {
            self.write_attributes(&mut attributes, decimals);
            return Commit::Attributes { attributes };
        }

        let old_kind = ShapeKind::from_tag(&original.tag);
        for name in old_kind
            .geometry_attributes()
            .iter()
            .chain(self.kind().geometry_attributes())
        {
            attributes.remove(name);
        }
        self.write_attributes(&mut attributes, decimals);
        tracing::debug!(from = %original.tag, to = %self.tag(), "shape morphed");

        Commit::Replace {
            element: Element::new(self.tag(), attributes),
        }
    }
}

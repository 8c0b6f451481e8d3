//! Primitive geometry model.
//!
//! Every supported element kind implements [`Primitive`], a small capability
//! contract that exposes its positional control points, the lengths and angles
//! that are not positions (radii, arc rotation), its canonical rotation form
//! and how it writes itself back into an attribute bag. The transform
//! operations only talk to this trait, so adding a primitive kind touches one
//! module.

use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

use crate::element::AttributeBag;

mod circle;
mod ellipse;
mod line;
mod path;
mod polygon;
mod rectangle;

pub use circle::CircleShape;
pub use ellipse::EllipseShape;
pub use line::LineShape;
pub use path::PathShape;
pub use polygon::PolyShape;
pub use rectangle::RectShape;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Rotates this point about `center` by `radians`, clockwise on a y-down canvas.
    pub fn rotated_about(&self, center: Point, radians: f64) -> Point {
        let (sin, cos) = radians.sin_cos();
        let dx = self.x - center.x;
        let dy = self.y - center.y;
        Point::new(
            center.x + dx * cos - dy * sin,
            center.y + dx * sin + dy * cos,
        )
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn approx_eq(&self, other: &Point, eps: f64) -> bool {
        (self.x - other.x).abs() <= eps && (self.y - other.y).abs() <= eps
    }
}

/// Marker for element-local geometry coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Local {}

/// Marker for screen pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Screen {}

/// Axis-aligned bounding box tagged with the coordinate space it lives in.
#[derive(Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct BoundingBox<S = Local> {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(skip)]
    space: PhantomData<S>,
}

// Manual impls so the marker type needs no bounds.
impl<S> Clone for BoundingBox<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for BoundingBox<S> {}

impl<S> PartialEq for BoundingBox<S> {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x
            && self.y == other.y
            && self.width == other.width
            && self.height == other.height
    }
}

impl<S> BoundingBox<S> {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            space: PhantomData,
        }
    }

    pub fn from_extents(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// Smallest box containing every point, `None` for an empty iterator.
    pub fn from_points<I: IntoIterator<Item = Point>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (min_x, min_y, max_x, max_y) = iter.fold(
            (first.x, first.y, first.x, first.y),
            |(min_x, min_y, max_x, max_y), p| {
                (min_x.min(p.x), min_y.min(p.y), max_x.max(p.x), max_y.max(p.y))
            },
        );
        Some(Self::from_extents(min_x, min_y, max_x, max_y))
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Corners in nw, ne, se, sw order.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.x, self.y),
            Point::new(self.right(), self.y),
            Point::new(self.right(), self.bottom()),
            Point::new(self.x, self.bottom()),
        ]
    }

    pub fn union(&self, other: &Self) -> Self {
        Self::from_extents(
            self.x.min(other.x),
            self.y.min(other.y),
            self.right().max(other.right()),
            self.bottom().max(other.bottom()),
        )
    }

    pub fn contains(&self, p: Point, tolerance: f64) -> bool {
        p.x >= self.x - tolerance
            && p.x <= self.right() + tolerance
            && p.y >= self.y - tolerance
            && p.y <= self.bottom() + tolerance
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }

    pub fn approx_eq(&self, other: &Self, eps: f64) -> bool {
        (self.x - other.x).abs() <= eps
            && (self.y - other.y).abs() <= eps
            && (self.width - other.width).abs() <= eps
            && (self.height - other.height).abs() <= eps
    }
}

/// Capability contract implemented once per primitive kind.
pub trait Primitive {
    /// Element tag this primitive serializes as.
    fn tag(&self) -> &str;

    /// Every positional coordinate, in a stable order.
    fn control_points(&self) -> Vec<Point>;

    /// Replaces the positional coordinates. `points` has the same length and
    /// order as [`control_points`](Primitive::control_points) returned.
    fn set_control_points(&mut self, points: &[Point]);

    /// Scales lengths that are not positions (radii, sizes already covered by
    /// control points are left alone).
    fn scale_extents(&mut self, _sx: f64, _sy: f64) {}

    /// Adds `degrees` to angular fields carried alongside the coordinates.
    fn rotate_extents(&mut self, _degrees: f64) {}

    /// The representation in which rotating every control point is exact,
    /// or `None` when this primitive already is that representation.
    fn canonical_form(&self) -> Option<Shape> {
        None
    }

    /// Tight bounding box in local coordinates.
    fn bounds(&self) -> Option<BoundingBox<Local>>;

    /// Writes geometry attributes into `attrs`, leaving other attributes alone.
    fn write_attributes(&self, attrs: &mut AttributeBag, decimals: u32);
}

/// Element kind without a transformable representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpaqueShape {
    pub tag: String,
}

impl Primitive for OpaqueShape {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn control_points(&self) -> Vec<Point> {
        Vec::new()
    }

    fn set_control_points(&mut self, _points: &[Point]) {}

    fn bounds(&self) -> Option<BoundingBox<Local>> {
        None
    }

    fn write_attributes(&self, _attrs: &mut AttributeBag, _decimals: u32) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rect,
    Circle,
    Ellipse,
    Line,
    Polyline,
    Polygon,
    Path,
    Other,
}

impl ShapeKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "rect" => Self::Rect,
            "circle" => Self::Circle,
            "ellipse" => Self::Ellipse,
            "line" => Self::Line,
            "polyline" => Self::Polyline,
            "polygon" => Self::Polygon,
            "path" => Self::Path,
            _ => Self::Other,
        }
    }

    /// Attributes that hold this kind's geometry.
    pub fn geometry_attributes(&self) -> &'static [&'static str] {
        match self {
            Self::Rect => &["x", "y", "width", "height", "rx", "ry"],
            Self::Circle => &["cx", "cy", "r"],
            Self::Ellipse => &["cx", "cy", "rx", "ry"],
            Self::Line => &["x1", "y1", "x2", "y2"],
            Self::Polyline | Self::Polygon => &["points"],
            Self::Path => &["d"],
            Self::Other => &[],
        }
    }
}

/// A materialized element geometry: one variant per primitive kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Shape {
    Rect(RectShape),
    Circle(CircleShape),
    Ellipse(EllipseShape),
    Line(LineShape),
    Polyline(PolyShape),
    Polygon(PolyShape),
    Path(PathShape),
    Other(OpaqueShape),
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Rect(_) => ShapeKind::Rect,
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::Ellipse(_) => ShapeKind::Ellipse,
            Shape::Line(_) => ShapeKind::Line,
            Shape::Polyline(_) => ShapeKind::Polyline,
            Shape::Polygon(_) => ShapeKind::Polygon,
            Shape::Path(_) => ShapeKind::Path,
            Shape::Other(_) => ShapeKind::Other,
        }
    }

    /// Whether transforms leave this shape untouched.
    pub fn is_inert(&self) -> bool {
        matches!(self, Shape::Other(_))
    }

    fn primitive(&self) -> &dyn Primitive {
        match self {
            Shape::Rect(s) => s,
            Shape::Circle(s) => s,
            Shape::Ellipse(s) => s,
            Shape::Line(s) => s,
            Shape::Polyline(s) | Shape::Polygon(s) => s,
            Shape::Path(s) => s,
            Shape::Other(s) => s,
        }
    }

    fn primitive_mut(&mut self) -> &mut dyn Primitive {
        match self {
            Shape::Rect(s) => s,
            Shape::Circle(s) => s,
            Shape::Ellipse(s) => s,
            Shape::Line(s) => s,
            Shape::Polyline(s) | Shape::Polygon(s) => s,
            Shape::Path(s) => s,
            Shape::Other(s) => s,
        }
    }

    /// Applies `f` to every control point.
    pub fn map_points(&mut self, f: impl Fn(Point) -> Point) {
        let points: Vec<Point> = self.control_points().into_iter().map(f).collect();
        self.set_control_points(&points);
    }

    /// True when every coordinate and extent is finite.
    pub fn is_finite(&self) -> bool {
        let extents_finite = match self {
            Shape::Rect(r) => {
                r.width.is_finite()
                    && r.height.is_finite()
                    && r.rx.map_or(true, f64::is_finite)
                    && r.ry.map_or(true, f64::is_finite)
            }
            Shape::Circle(c) => c.r.is_finite(),
            Shape::Ellipse(e) => e.rx.is_finite() && e.ry.is_finite(),
            Shape::Path(p) => p.arcs_finite(),
            _ => true,
        };
        extents_finite && self.control_points().iter().all(Point::is_finite)
    }
}

impl Primitive for Shape {
    fn tag(&self) -> &str {
        match self {
            Shape::Polyline(_) => "polyline",
            Shape::Polygon(_) => "polygon",
            other => other.primitive().tag(),
        }
    }

    fn control_points(&self) -> Vec<Point> {
        self.primitive().control_points()
    }

    fn set_control_points(&mut self, points: &[Point]) {
        self.primitive_mut().set_control_points(points)
    }

    fn scale_extents(&mut self, sx: f64, sy: f64) {
        self.primitive_mut().scale_extents(sx, sy)
    }

    fn rotate_extents(&mut self, degrees: f64) {
        self.primitive_mut().rotate_extents(degrees)
    }

    fn canonical_form(&self) -> Option<Shape> {
        self.primitive().canonical_form()
    }

    fn bounds(&self) -> Option<BoundingBox<Local>> {
        self.primitive().bounds()
    }

    fn write_attributes(&self, attrs: &mut AttributeBag, decimals: u32) {
        self.primitive().write_attributes(attrs, decimals)
    }
}

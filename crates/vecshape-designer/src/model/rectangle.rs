use serde::{Deserialize, Serialize};

use super::{BoundingBox, Local, Point, PolyShape, Primitive, Shape};
use crate::element::{write_number, AttributeBag};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectShape {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Corner radii as authored; `None` when the attribute is absent.
    pub rx: Option<f64>,
    pub ry: Option<f64>,
}

impl RectShape {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            rx: None,
            ry: None,
        }
    }

    pub fn with_radii(mut self, rx: Option<f64>, ry: Option<f64>) -> Self {
        self.rx = rx;
        self.ry = ry;
        self
    }

    /// Corner radii after applying the rule that a missing radius mirrors the other.
    pub fn effective_radii(&self) -> (f64, f64) {
        match (self.rx, self.ry) {
            (Some(rx), Some(ry)) => (rx, ry),
            (Some(r), None) | (None, Some(r)) => (r, r),
            (None, None) => (0.0, 0.0),
        }
    }

    /// Corners as a closed polygon, nw, ne, se, sw.
    pub fn to_polygon(&self) -> PolyShape {
        let bb: BoundingBox<Local> = BoundingBox::new(self.x, self.y, self.width, self.height);
        PolyShape::new(bb.corners().to_vec())
    }
}

impl Primitive for RectShape {
    fn tag(&self) -> &str {
        "rect"
    }

    fn control_points(&self) -> Vec<Point> {
        vec![
            Point::new(self.x, self.y),
            Point::new(self.x + self.width, self.y + self.height),
        ]
    }

    fn set_control_points(&mut self, points: &[Point]) {
        if let [origin, corner] = points {
            self.x = origin.x;
            self.y = origin.y;
            self.width = corner.x - origin.x;
            self.height = corner.y - origin.y;
        }
    }

    fn scale_extents(&mut self, sx: f64, sy: f64) {
        if self.rx.is_none() && self.ry.is_none() {
            return;
        }
        let (rx, ry) = self.effective_radii();
        if (self.rx.is_some() && self.ry.is_some()) || sx == sy {
            self.rx = self.rx.map(|r| r * sx);
            self.ry = self.ry.map(|r| r * sy);
        } else {
            // A lone radius stops mirroring once the axes scale differently.
            self.rx = Some(rx * sx);
            self.ry = Some(ry * sy);
        }
    }

    fn canonical_form(&self) -> Option<Shape> {
        Some(Shape::Polygon(self.to_polygon()))
    }

    fn bounds(&self) -> Option<BoundingBox<Local>> {
        Some(BoundingBox::new(self.x, self.y, self.width, self.height))
    }

    fn write_attributes(&self, attrs: &mut AttributeBag, decimals: u32) {
        write_number(attrs, "x", self.x, decimals);
        write_number(attrs, "y", self.y, decimals);
        write_number(attrs, "width", self.width, decimals);
        write_number(attrs, "height", self.height, decimals);
        if let Some(rx) = self.rx {
            write_number(attrs, "rx", rx, decimals);
        }
        if let Some(ry) = self.ry {
            write_number(attrs, "ry", ry, decimals);
        }
    }
}

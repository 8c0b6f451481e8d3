use serde::{Deserialize, Serialize};

use super::{BoundingBox, Local, PathShape, Point, Primitive, Shape};
use crate::element::{write_number, AttributeBag};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EllipseShape {
    pub center: Point,
    pub rx: f64,
    pub ry: f64,
}

impl EllipseShape {
    pub fn new(center: Point, rx: f64, ry: f64) -> Self {
        Self { center, rx, ry }
    }
}

impl Primitive for EllipseShape {
    fn tag(&self) -> &str {
        "ellipse"
    }

    fn control_points(&self) -> Vec<Point> {
        vec![self.center]
    }

    fn set_control_points(&mut self, points: &[Point]) {
        if let [center] = points {
            self.center = *center;
        }
    }

    fn scale_extents(&mut self, sx: f64, sy: f64) {
        self.rx *= sx;
        self.ry *= sy;
    }

    fn canonical_form(&self) -> Option<Shape> {
        Some(Shape::Path(PathShape::ellipse_outline(
            self.center,
            self.rx,
            self.ry,
        )))
    }

    fn bounds(&self) -> Option<BoundingBox<Local>> {
        Some(BoundingBox::new(
            self.center.x - self.rx,
            self.center.y - self.ry,
            self.rx * 2.0,
            self.ry * 2.0,
        ))
    }

    fn write_attributes(&self, attrs: &mut AttributeBag, decimals: u32) {
        write_number(attrs, "cx", self.center.x, decimals);
        write_number(attrs, "cy", self.center.y, decimals);
        write_number(attrs, "rx", self.rx, decimals);
        write_number(attrs, "ry", self.ry, decimals);
    }
}

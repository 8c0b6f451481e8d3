use serde::{Deserialize, Serialize};

use super::{BoundingBox, EllipseShape, Local, PathShape, Point, Primitive, Shape};
use crate::element::{write_number, AttributeBag};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleShape {
    pub center: Point,
    pub r: f64,
}

impl CircleShape {
    pub fn new(center: Point, r: f64) -> Self {
        Self { center, r }
    }

    /// Same circle expressed as an ellipse with equal radii.
    pub fn to_ellipse(&self) -> EllipseShape {
        EllipseShape::new(self.center, self.r, self.r)
    }
}

impl Primitive for CircleShape {
    fn tag(&self) -> &str {
        "circle"
    }

    fn control_points(&self) -> Vec<Point> {
        vec![self.center]
    }

    fn set_control_points(&mut self, points: &[Point]) {
        if let [center] = points {
            self.center = *center;
        }
    }

    fn scale_extents(&mut self, sx: f64, _sy: f64) {
        self.r *= sx;
    }

    fn canonical_form(&self) -> Option<Shape> {
        Some(Shape::Path(PathShape::ellipse_outline(
            self.center,
            self.r,
            self.r,
        )))
    }

    fn bounds(&self) -> Option<BoundingBox<Local>> {
        Some(BoundingBox::new(
            self.center.x - self.r,
            self.center.y - self.r,
            self.r * 2.0,
            self.r * 2.0,
        ))
    }

    fn write_attributes(&self, attrs: &mut AttributeBag, decimals: u32) {
        write_number(attrs, "cx", self.center.x, decimals);
        write_number(attrs, "cy", self.center.y, decimals);
        write_number(attrs, "r", self.r, decimals);
    }
}

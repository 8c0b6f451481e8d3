use serde::{Deserialize, Serialize};

use super::{BoundingBox, Local, Point, Primitive};
use crate::element::{write_number, AttributeBag};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineShape {
    pub start: Point,
    pub end: Point,
}

impl LineShape {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }
}

impl Primitive for LineShape {
    fn tag(&self) -> &str {
        "line"
    }

    fn control_points(&self) -> Vec<Point> {
        vec![self.start, self.end]
    }

    fn set_control_points(&mut self, points: &[Point]) {
        if let [start, end] = points {
            self.start = *start;
            self.end = *end;
        }
    }

    fn bounds(&self) -> Option<BoundingBox<Local>> {
        BoundingBox::from_points([self.start, self.end])
    }

    fn write_attributes(&self, attrs: &mut AttributeBag, decimals: u32) {
        write_number(attrs, "x1", self.start.x, decimals);
        write_number(attrs, "y1", self.start.y, decimals);
        write_number(attrs, "x2", self.end.x, decimals);
        write_number(attrs, "y2", self.end.y, decimals);
    }
}

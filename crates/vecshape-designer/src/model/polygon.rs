use serde::{Deserialize, Serialize};

use super::{BoundingBox, Local, Point, Primitive};
use crate::element::{format_points, AttributeBag};

/// Vertex list shared by polylines and polygons; the owning
/// [`Shape`](super::Shape) variant decides whether it is closed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolyShape {
    pub points: Vec<Point>,
}

impl PolyShape {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }
}

impl Primitive for PolyShape {
    fn tag(&self) -> &str {
        "polyline"
    }

    fn control_points(&self) -> Vec<Point> {
        self.points.clone()
    }

    fn set_control_points(&mut self, points: &[Point]) {
        if points.len() == self.points.len() {
            self.points.copy_from_slice(points);
        }
    }

    fn bounds(&self) -> Option<BoundingBox<Local>> {
        BoundingBox::from_points(self.points.iter().copied())
    }

    fn write_attributes(&self, attrs: &mut AttributeBag, decimals: u32) {
        attrs.set("points", format_points(&self.points, decimals));
    }
}

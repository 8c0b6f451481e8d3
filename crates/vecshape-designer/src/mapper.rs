//! Coordinate mapping between element-local geometry and screen pixels.
//!
//! The host supplies the forward transform (the element's local-to-screen
//! matrix, including every ancestor transform and the viewport zoom/pan).
//! The mapper caches its inverse; a transform without one is rejected up
//! front so no operation ever divides through a collapsed matrix.
//!
//! Bounding boxes are mapped by transforming all four corners and taking the
//! axis-aligned hull, so a rotated or skewed transform yields the box that
//! encloses the mapped rectangle.

use nalgebra::{Matrix3, Point2, Vector2};
use vecshape_core::constants::SINGULAR_THRESHOLD;
use vecshape_core::TransformError;

use crate::model::{BoundingBox, Local, Point, Primitive, Screen, Shape};

#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateMapper {
    forward: Matrix3<f64>,
    inverse: Matrix3<f64>,
}

impl CoordinateMapper {
    /// Builds a mapper from a local-to-screen matrix.
    pub fn new(forward: Matrix3<f64>) -> Result<Self, TransformError> {
        Self::with_threshold(forward, SINGULAR_THRESHOLD)
    }

    /// Like [`new`](Self::new) with an explicit singularity threshold.
    pub fn with_threshold(forward: Matrix3<f64>, threshold: f64) -> Result<Self, TransformError> {
        let determinant = forward.fixed_view::<2, 2>(0, 0).determinant();
        if !determinant.is_finite() || determinant.abs() < threshold {
            return Err(TransformError::SingularTransform { determinant });
        }
        let inverse = forward
            .try_inverse()
            .filter(|m| m.iter().all(|v| v.is_finite()))
            .ok_or(TransformError::SingularTransform { determinant })?;
        Ok(Self { forward, inverse })
    }

    /// From SVG `matrix(a b c d e f)` components.
    pub fn from_svg_matrix(m: [f64; 6]) -> Result<Self, TransformError> {
        let [a, b, c, d, e, f] = m;
        Self::new(Matrix3::new(a, c, e, b, d, f, 0.0, 0.0, 1.0))
    }

    pub fn identity() -> Self {
        Self {
            forward: Matrix3::identity(),
            inverse: Matrix3::identity(),
        }
    }

    /// Uniform zoom followed by a pan, the common viewport case.
    pub fn zoom_pan(zoom: f64, pan_x: f64, pan_y: f64) -> Result<Self, TransformError> {
        Self::new(Matrix3::new(zoom, 0.0, pan_x, 0.0, zoom, pan_y, 0.0, 0.0, 1.0))
    }

    pub fn forward(&self) -> &Matrix3<f64> {
        &self.forward
    }

    pub fn inverse(&self) -> &Matrix3<f64> {
        &self.inverse
    }

    pub fn to_screen(&self, p: Point) -> Point {
        apply(&self.forward, p)
    }

    pub fn to_local(&self, p: Point) -> Point {
        apply(&self.inverse, p)
    }

    /// Maps a screen-space displacement into local space (ignores translation).
    pub fn delta_to_local(&self, dx: f64, dy: f64) -> (f64, f64) {
        let v = self.inverse.fixed_view::<2, 2>(0, 0) * Vector2::new(dx, dy);
        (v.x, v.y)
    }

    pub fn bbox_to_screen(&self, bb: &BoundingBox<Local>) -> BoundingBox<Screen> {
        BoundingBox::from_points(bb.corners().map(|c| self.to_screen(c)))
            .unwrap_or_else(|| BoundingBox::new(0.0, 0.0, 0.0, 0.0))
    }

    pub fn bbox_to_local(&self, bb: &BoundingBox<Screen>) -> BoundingBox<Local> {
        BoundingBox::from_points(bb.corners().map(|c| self.to_local(c)))
            .unwrap_or_else(|| BoundingBox::new(0.0, 0.0, 0.0, 0.0))
    }

    /// Screen-space bounding box of a shape, `None` for inert or empty shapes.
    pub fn screen_bbox(&self, shape: &Shape) -> Option<BoundingBox<Screen>> {
        shape.bounds().map(|bb| self.bbox_to_screen(&bb))
    }
}

fn apply(m: &Matrix3<f64>, p: Point) -> Point {
    let mapped = m.transform_point(&Point2::new(p.x, p.y));
    Point::new(mapped.x, mapped.y)
}

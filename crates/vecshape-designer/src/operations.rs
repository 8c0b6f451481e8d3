//! Move, scale, rotate and vertex edits on a [`Shape`].
//!
//! Every operation is pure: it takes the shape captured at drag start and
//! returns a new one, so a preview can be recomputed from scratch on every
//! pointer move and a failed commit simply discards the result.

use vecshape_core::constants::DEGENERATE_EXTENT;
use vecshape_core::{Axis, TransformError};

use crate::handles::{HandleId, HandleKind};
use crate::mapper::CoordinateMapper;
use crate::model::{BoundingBox, Local, Point, Primitive, Screen, Shape};

/// Screen-space bounding box of `shape`, `None` for inert or empty shapes.
pub fn compute_bbox(shape: &Shape, mapper: &CoordinateMapper) -> Option<BoundingBox<Screen>> {
    mapper.screen_bbox(shape)
}

/// Per-axis affine map `x' = (x - origin.x) * sx + target.x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisMap {
    pub origin: Point,
    pub target: Point,
    pub sx: f64,
    pub sy: f64,
}

impl AxisMap {
    pub fn translation(dx: f64, dy: f64) -> Self {
        Self {
            origin: Point::default(),
            target: Point::new(dx, dy),
            sx: 1.0,
            sy: 1.0,
        }
    }

    /// Scale about a fixed pivot.
    pub fn about(pivot: Point, sx: f64, sy: f64) -> Self {
        Self {
            origin: pivot,
            target: pivot,
            sx,
            sy,
        }
    }

    /// The map taking `from` onto `to`.
    ///
    /// An axis with a degenerate source extent keeps scale 1 when the target
    /// extent is unchanged and fails otherwise.
    pub fn between(
        from: &BoundingBox<Local>,
        to: &BoundingBox<Local>,
        epsilon: f64,
    ) -> Result<Self, TransformError> {
        Ok(Self {
            origin: Point::new(from.x, from.y),
            target: Point::new(to.x, to.y),
            sx: axis_scale(from.width, to.width, epsilon, Axis::X)?,
            sy: axis_scale(from.height, to.height, epsilon, Axis::Y)?,
        })
    }

    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            (p.x - self.origin.x) * self.sx + self.target.x,
            (p.y - self.origin.y) * self.sy + self.target.y,
        )
    }

    pub fn is_uniform(&self, epsilon: f64) -> bool {
        (self.sx - self.sy).abs() <= epsilon
    }
}

fn axis_scale(from: f64, to: f64, epsilon: f64, axis: Axis) -> Result<f64, TransformError> {
    if from.abs() > DEGENERATE_EXTENT {
        return Ok(to / from);
    }
    if (to - from).abs() <= epsilon {
        Ok(1.0)
    } else {
        Err(TransformError::DegenerateExtent { axis })
    }
}

fn ensure_finite(shape: Shape) -> Result<Shape, TransformError> {
    if shape.is_finite() {
        Ok(shape)
    } else {
        Err(TransformError::NonFiniteGeometry)
    }
}

pub fn translate(shape: &Shape, dx: f64, dy: f64) -> Result<Shape, TransformError> {
    scale(shape, &AxisMap::translation(dx, dy), 0.0)
}

/// Applies `map` to every control point and scales radii to match.
///
/// A circle scaled by unequal factors becomes an ellipse.
pub fn scale(shape: &Shape, map: &AxisMap, epsilon: f64) -> Result<Shape, TransformError> {
    if shape.is_inert() {
        return Ok(shape.clone());
    }
    let mut out = match shape {
        Shape::Circle(circle) if !map.is_uniform(epsilon) => Shape::Ellipse(circle.to_ellipse()),
        other => other.clone(),
    };
    out.map_points(|p| map.apply(p));
    out.scale_extents(map.sx, map.sy);
    ensure_finite(out)
}

/// Scales `shape` so its local bounding box becomes `target`.
pub fn scale_to(
    shape: &Shape,
    target: &BoundingBox<Local>,
    epsilon: f64,
) -> Result<Shape, TransformError> {
    match shape.bounds() {
        Some(from) => scale(shape, &AxisMap::between(&from, target, epsilon)?, epsilon),
        None => Ok(shape.clone()),
    }
}

/// Rotates `shape` by `degrees` about `center` (clockwise on a y-down canvas).
///
/// Kinds that cannot carry a rotation in their own attributes are first
/// converted to their canonical form: rectangles to polygons, circles and
/// ellipses to arc paths.
pub fn rotate(shape: &Shape, center: Point, degrees: f64) -> Result<Shape, TransformError> {
    if shape.is_inert() {
        return Ok(shape.clone());
    }
    let mut out = shape.canonical_form().unwrap_or_else(|| shape.clone());
    let radians = degrees.to_radians();
    out.map_points(|p| p.rotated_about(center, radians));
    out.rotate_extents(degrees);
    ensure_finite(out)
}

/// Moves a single control point to `to`.
pub fn move_control_point(shape: &Shape, index: usize, to: Point) -> Result<Shape, TransformError> {
    let mut points = shape.control_points();
    let slot = points
        .get_mut(index)
        .ok_or_else(|| TransformError::UnknownHandle {
            name: HandleId::ControlPoint(index).name(),
        })?;
    *slot = to;
    let mut out = shape.clone();
    out.set_control_points(&points);
    ensure_finite(out)
}

/// Bounding box the drag of `handle` by `(dx, dy)` screen pixels produces.
///
/// Edges opposite the handle stay fixed. Moved edges never come closer than
/// `min_size` to their anchor, or than the starting extent when the shape is
/// already smaller. With `lock_aspect` a corner drag applies the larger of
/// the two factors to both axes.
pub fn target_bbox(
    start: &BoundingBox<Screen>,
    handle: HandleId,
    dx: f64,
    dy: f64,
    min_size: f64,
    lock_aspect: bool,
) -> BoundingBox<Screen> {
    match handle.kind() {
        HandleKind::Move => {
            return BoundingBox::new(start.x + dx, start.y + dy, start.width, start.height)
        }
        HandleKind::ControlPoint => return *start,
        HandleKind::Corner | HandleKind::Edge => {}
    }

    let edges = handle.moving_edges();
    let min_w = min_size.min(start.width);
    let min_h = min_size.min(start.height);
    let (mut left, mut top, mut right, mut bottom) = (start.x, start.y, start.right(), start.bottom());

    if edges.left {
        left = (left + dx).min(right - min_w);
    }
    if edges.right {
        right = (right + dx).max(left + min_w);
    }
    if edges.top {
        top = (top + dy).min(bottom - min_h);
    }
    if edges.bottom {
        bottom = (bottom + dy).max(top + min_h);
    }

    let lockable = start.width > DEGENERATE_EXTENT && start.height > DEGENERATE_EXTENT;
    if lock_aspect && handle.kind() == HandleKind::Corner && lockable {
        let factor = ((right - left) / start.width).max((bottom - top) / start.height);
        let (w, h) = (start.width * factor, start.height * factor);
        if edges.left {
            left = right - w;
        } else {
            right = left + w;
        }
        if edges.top {
            top = bottom - h;
        } else {
            bottom = top + h;
        }
    }

    BoundingBox::from_extents(left, top, right, bottom)
}

/// Angle in radians of `p` around `center`.
pub fn pointer_angle(center: Point, p: Point) -> f64 {
    (p.y - center.y).atan2(p.x - center.x)
}

/// Wraps an angle in degrees into `(-180, 180]`.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

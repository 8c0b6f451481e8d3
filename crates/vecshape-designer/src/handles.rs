//! Drag handles around a selected shape.
//!
//! Handles are a pure view of a shape and its screen bounding box; they are
//! recomputed whenever needed and never stored with the element.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use vecshape_core::TransformError;

use crate::mapper::CoordinateMapper;
use crate::model::{BoundingBox, Point, Primitive, Screen, Shape};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleId {
    Move,
    N,
    S,
    E,
    W,
    NW,
    NE,
    SW,
    SE,
    /// Index into the shape's control points.
    #[serde(rename = "point")]
    ControlPoint(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleKind {
    Move,
    Corner,
    Edge,
    ControlPoint,
}

/// Which bbox edges a handle drags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MovingEdges {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl HandleId {
    pub const ANCHORS: [HandleId; 8] = [
        HandleId::NW,
        HandleId::N,
        HandleId::NE,
        HandleId::E,
        HandleId::SE,
        HandleId::S,
        HandleId::SW,
        HandleId::W,
    ];

    pub fn kind(&self) -> HandleKind {
        match self {
            HandleId::Move => HandleKind::Move,
            HandleId::N | HandleId::S | HandleId::E | HandleId::W => HandleKind::Edge,
            HandleId::NW | HandleId::NE | HandleId::SW | HandleId::SE => HandleKind::Corner,
            HandleId::ControlPoint(_) => HandleKind::ControlPoint,
        }
    }

    /// Edges that follow the pointer; the opposite edges stay fixed.
    pub fn moving_edges(&self) -> MovingEdges {
        let (left, right, top, bottom) = match self {
            HandleId::N => (false, false, true, false),
            HandleId::S => (false, false, false, true),
            HandleId::E => (false, true, false, false),
            HandleId::W => (true, false, false, false),
            HandleId::NW => (true, false, true, false),
            HandleId::NE => (false, true, true, false),
            HandleId::SW => (true, false, false, true),
            HandleId::SE => (false, true, false, true),
            HandleId::Move | HandleId::ControlPoint(_) => (false, false, false, false),
        };
        MovingEdges {
            left,
            right,
            top,
            bottom,
        }
    }

    pub fn name(&self) -> String {
        match self {
            HandleId::Move => "move".to_string(),
            HandleId::N => "n".to_string(),
            HandleId::S => "s".to_string(),
            HandleId::E => "e".to_string(),
            HandleId::W => "w".to_string(),
            HandleId::NW => "nw".to_string(),
            HandleId::NE => "ne".to_string(),
            HandleId::SW => "sw".to_string(),
            HandleId::SE => "se".to_string(),
            HandleId::ControlPoint(i) => format!("point:{}", i),
        }
    }

    /// Position of an anchor handle on `bbox`; control points have no fixed spot.
    pub fn anchor_position(&self, bbox: &BoundingBox<Screen>) -> Option<Point> {
        let (x0, x1, y0, y1) = (bbox.x, bbox.right(), bbox.y, bbox.bottom());
        let (xm, ym) = ((x0 + x1) / 2.0, (y0 + y1) / 2.0);
        let p = match self {
            HandleId::Move => (xm, ym),
            HandleId::N => (xm, y0),
            HandleId::S => (xm, y1),
            HandleId::E => (x1, ym),
            HandleId::W => (x0, ym),
            HandleId::NW => (x0, y0),
            HandleId::NE => (x1, y0),
            HandleId::SW => (x0, y1),
            HandleId::SE => (x1, y1),
            HandleId::ControlPoint(_) => return None,
        };
        Some(Point::new(p.0, p.1))
    }
}

impl std::str::FromStr for HandleId {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = match s.to_ascii_lowercase().as_str() {
            "move" => HandleId::Move,
            "n" => HandleId::N,
            "s" => HandleId::S,
            "e" => HandleId::E,
            "w" => HandleId::W,
            "nw" => HandleId::NW,
            "ne" => HandleId::NE,
            "sw" => HandleId::SW,
            "se" => HandleId::SE,
            other => {
                return other
                    .strip_prefix("point:")
                    .and_then(|i| i.parse().ok())
                    .map(HandleId::ControlPoint)
                    .ok_or_else(|| TransformError::UnknownHandle {
                        name: s.to_string(),
                    })
            }
        };
        Ok(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Handle {
    pub id: HandleId,
    /// Screen position.
    pub position: Point,
    /// Owning path segment for control points of a path.
    pub segment: Option<usize>,
}

impl Handle {
    pub fn new(id: HandleId, position: Point) -> Self {
        Self {
            id,
            position,
            segment: None,
        }
    }

    pub fn kind(&self) -> HandleKind {
        self.id.kind()
    }

    /// Control point index for control-point handles.
    pub fn point_index(&self) -> Option<usize> {
        match self.id {
            HandleId::ControlPoint(i) => Some(i),
            _ => None,
        }
    }
}

/// Move handle plus the eight anchors of `bbox`.
pub fn anchor_handles(bbox: &BoundingBox<Screen>) -> SmallVec<[Handle; 9]> {
    std::iter::once(HandleId::Move)
        .chain(HandleId::ANCHORS)
        .filter_map(|id| id.anchor_position(bbox).map(|p| Handle::new(id, p)))
        .collect()
}

/// Every handle for a shape: anchors, then vertex handles for kinds whose
/// control points are free vertices (lines, polylines, polygons, paths).
pub fn handles_for(shape: &Shape, mapper: &CoordinateMapper) -> Vec<Handle> {
    let Some(bbox) = mapper.screen_bbox(shape) else {
        return Vec::new();
    };
    let mut handles: Vec<Handle> = anchor_handles(&bbox).into_vec();

    match shape {
        Shape::Line(_) | Shape::Polyline(_) | Shape::Polygon(_) => {
            handles.extend(
                shape
                    .control_points()
                    .into_iter()
                    .enumerate()
                    .map(|(i, p)| Handle::new(HandleId::ControlPoint(i), mapper.to_screen(p))),
            );
        }
        Shape::Path(path) => {
            let mut index = 0;
            for (segment_index, segment) in path.segments.iter().enumerate() {
                for p in segment.points() {
                    handles.push(Handle {
                        id: HandleId::ControlPoint(index),
                        position: mapper.to_screen(p),
                        segment: Some(segment_index),
                    });
                    index += 1;
                }
            }
        }
        _ => {}
    }

    handles
}

fn priority(kind: HandleKind) -> u8 {
    match kind {
        HandleKind::Corner => 0,
        HandleKind::ControlPoint => 1,
        HandleKind::Edge => 2,
        HandleKind::Move => 3,
    }
}

/// Picks the handle under `pointer`.
///
/// Handles within `tolerance` win by kind (corner, control point, edge) and
/// then by distance. Corners come first so a vertex lying on a bbox corner
/// never hides the rotate and corner-scale gestures. A pointer elsewhere
/// inside the bbox grabs the move handle.
pub fn hit_test(
    handles: &[Handle],
    bbox: &BoundingBox<Screen>,
    pointer: Point,
    tolerance: f64,
) -> Option<Handle> {
    let best = handles
        .iter()
        .filter(|h| h.kind() != HandleKind::Move)
        .map(|h| (h, h.position.distance_to(&pointer)))
        .filter(|(_, d)| *d <= tolerance)
        .min_by(|(a, da), (b, db)| {
            priority(a.kind())
                .cmp(&priority(b.kind()))
                .then(da.total_cmp(db))
        })
        .map(|(h, _)| *h);

    best.or_else(|| {
        if bbox.contains(pointer, 0.0) {
            handles.iter().find(|h| h.id == HandleId::Move).copied()
        } else {
            None
        }
    })
}

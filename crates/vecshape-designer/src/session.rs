//! A single drag gesture from pointer-down to pointer-up.
//!
//! The session captures everything at drag start (the element snapshot, the
//! materialized shape, both bounding boxes and the grabbed handle) and derives
//! every preview and the final commit from that fixed state plus the current
//! pointer. Nothing is written to the element until [`TransformSession::finish`].

use serde::{Deserialize, Serialize};
use vecshape_core::{EngineConfig, ModifierKey, TransformError};

use crate::element::{Commit, Element};
use crate::handles::{Handle, HandleId, HandleKind};
use crate::mapper::CoordinateMapper;
use crate::model::{BoundingBox, Local, Point, Primitive, Screen, Shape};
use crate::operations::{self, AxisMap};

/// Keyboard modifiers held at pointer-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub alt: bool,
    pub shift: bool,
    pub ctrl: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: ModifierKey) {
        match key {
            ModifierKey::Alt => self.alt = true,
            ModifierKey::Shift => self.shift = true,
            ModifierKey::Ctrl => self.ctrl = true,
            ModifierKey::Meta => self.meta = true,
        }
    }

    pub fn is_pressed(&self, key: ModifierKey) -> bool {
        match key {
            ModifierKey::Alt => self.alt,
            ModifierKey::Shift => self.shift,
            ModifierKey::Ctrl => self.ctrl,
            ModifierKey::Meta => self.meta,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "gesture", rename_all = "snake_case")]
pub enum Gesture {
    Move,
    Scale { handle: HandleId, lock_aspect: bool },
    Rotate,
    EditPoint { index: usize },
}

impl Gesture {
    /// Gesture for a grabbed handle under the held modifiers.
    pub fn resolve(handle: &Handle, modifiers: Modifiers, config: &EngineConfig) -> Self {
        match handle.kind() {
            HandleKind::Move => Gesture::Move,
            HandleKind::ControlPoint => Gesture::EditPoint {
                index: handle.point_index().unwrap_or_default(),
            },
            HandleKind::Corner if modifiers.is_pressed(config.rotate_modifier) => Gesture::Rotate,
            HandleKind::Corner => Gesture::Scale {
                handle: handle.id,
                lock_aspect: modifiers.is_pressed(config.aspect_modifier),
            },
            HandleKind::Edge => Gesture::Scale {
                handle: handle.id,
                lock_aspect: false,
            },
        }
    }
}

/// Rotation pivot and angles, in local space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationState {
    pub center: Point,
    /// Pointer angle at drag start, radians.
    pub start_angle: f64,
    /// Live angle relative to the start, degrees in `(-180, 180]`.
    pub accumulated_angle: f64,
}

/// What the host should draw while dragging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Preview {
    /// Outline of the target bbox in screen space.
    Overlay { bbox: BoundingBox<Screen> },
    /// Live geometry in local space.
    Shape { shape: Shape },
}

#[derive(Debug, Clone, PartialEq)]
pub enum AbortReason {
    Transform(TransformError),
    /// Rotation angle below the configured epsilon.
    NegligibleRotation,
    /// Released where it was pressed.
    NoMovement,
    Cancelled,
}

impl std::fmt::Display for AbortReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transform(e) => write!(f, "{}", e),
            Self::NegligibleRotation => write!(f, "rotation below threshold"),
            Self::NoMovement => write!(f, "pointer did not move"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    Commit(Commit),
    /// The element must be restored to `snapshot`.
    Abort {
        snapshot: Element,
        reason: AbortReason,
    },
}

impl SessionOutcome {
    pub fn is_commit(&self) -> bool {
        matches!(self, SessionOutcome::Commit(_))
    }
}

#[derive(Debug, Clone)]
pub struct TransformSession {
    snapshot: Element,
    shape: Shape,
    handle: Handle,
    gesture: Gesture,
    start_pointer: Point,
    start_screen_bbox: Option<BoundingBox<Screen>>,
    start_local_bbox: Option<BoundingBox<Local>>,
    rotation: Option<RotationState>,
    config: EngineConfig,
}

impl TransformSession {
    /// Starts a drag on `element` grabbed at `handle`.
    pub fn begin(
        element: Element,
        handle: Handle,
        pointer: Point,
        modifiers: Modifiers,
        mapper: &CoordinateMapper,
        config: &EngineConfig,
    ) -> Self {
        let shape = Shape::from_element(&element);
        let start_local_bbox = shape.bounds();
        let start_screen_bbox = start_local_bbox.map(|bb| mapper.bbox_to_screen(&bb));
        let gesture = Gesture::resolve(&handle, modifiers, config);

        let rotation = match (gesture, start_local_bbox) {
            (Gesture::Rotate, Some(bb)) => {
                let center = bb.center();
                Some(RotationState {
                    center,
                    start_angle: operations::pointer_angle(center, mapper.to_local(pointer)),
                    accumulated_angle: 0.0,
                })
            }
            _ => None,
        };

        tracing::debug!(
            tag = %element.tag,
            handle = %handle.id.name(),
            ?gesture,
            "transform session started"
        );

        Self {
            snapshot: element,
            shape,
            handle,
            gesture,
            start_pointer: pointer,
            start_screen_bbox,
            start_local_bbox,
            rotation,
            config: config.clone(),
        }
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    pub fn snapshot(&self) -> &Element {
        &self.snapshot
    }

    /// Shape as materialized at drag start.
    pub fn start_shape(&self) -> &Shape {
        &self.shape
    }

    pub fn start_local_bbox(&self) -> Option<BoundingBox<Local>> {
        self.start_local_bbox
    }

    pub fn rotation(&self) -> Option<&RotationState> {
        self.rotation.as_ref()
    }

    /// Screen bbox the current pointer position would produce.
    pub fn target_screen_bbox(&self, pointer: Point) -> Option<BoundingBox<Screen>> {
        let (lock_aspect, handle) = match self.gesture {
            Gesture::Scale {
                lock_aspect,
                handle,
            } => (lock_aspect, handle),
            Gesture::Move => (false, HandleId::Move),
            Gesture::Rotate | Gesture::EditPoint { .. } => return None,
        };
        self.start_screen_bbox.map(|start| {
            operations::target_bbox(
                &start,
                handle,
                pointer.x - self.start_pointer.x,
                pointer.y - self.start_pointer.y,
                self.config.min_bbox_size,
                lock_aspect,
            )
        })
    }

    fn live_angle(&self, pointer: Point, mapper: &CoordinateMapper) -> Option<f64> {
        self.rotation.map(|r| {
            let current = operations::pointer_angle(r.center, mapper.to_local(pointer));
            operations::normalize_degrees((current - r.start_angle).to_degrees())
        })
    }

    /// Geometry the gesture produces with the pointer at `pointer`.
    pub fn evaluate(&self, pointer: Point, mapper: &CoordinateMapper) -> Result<Shape, TransformError> {
        match self.gesture {
            Gesture::Move => {
                let (dx, dy) = mapper.delta_to_local(
                    pointer.x - self.start_pointer.x,
                    pointer.y - self.start_pointer.y,
                );
                operations::translate(&self.shape, dx, dy)
            }
            Gesture::Scale { .. } => {
                let (Some(start), Some(target)) =
                    (self.start_screen_bbox, self.target_screen_bbox(pointer))
                else {
                    return Ok(self.shape.clone());
                };
                // Both boxes go through the same hull mapping so untouched
                // axes compare equal.
                let map = AxisMap::between(
                    &mapper.bbox_to_local(&start),
                    &mapper.bbox_to_local(&target),
                    self.config.epsilon,
                )?;
                operations::scale(&self.shape, &map, self.config.epsilon)
            }
            Gesture::Rotate => match (self.rotation, self.live_angle(pointer, mapper)) {
                (Some(r), Some(angle)) => operations::rotate(&self.shape, r.center, angle),
                _ => Ok(self.shape.clone()),
            },
            Gesture::EditPoint { index } => {
                let Some(start) = self.shape.control_points().get(index).copied() else {
                    return Err(TransformError::UnknownHandle {
                        name: self.handle.id.name(),
                    });
                };
                let (dx, dy) = mapper.delta_to_local(
                    pointer.x - self.start_pointer.x,
                    pointer.y - self.start_pointer.y,
                );
                operations::move_control_point(&self.shape, index, Point::new(start.x + dx, start.y + dy))
            }
        }
    }

    /// Recomputes the preview for a pointer move.
    pub fn update(&mut self, pointer: Point, mapper: &CoordinateMapper) -> Result<Preview, TransformError> {
        match self.gesture {
            Gesture::Move | Gesture::Scale { .. } => {
                let bbox = self
                    .target_screen_bbox(pointer)
                    .unwrap_or_else(|| BoundingBox::new(pointer.x, pointer.y, 0.0, 0.0));
                Ok(Preview::Overlay { bbox })
            }
            Gesture::Rotate => {
                if let Some(angle) = self.live_angle(pointer, mapper) {
                    if let Some(r) = self.rotation.as_mut() {
                        r.accumulated_angle = angle;
                    }
                }
                Ok(Preview::Shape {
                    shape: self.evaluate(pointer, mapper)?,
                })
            }
            Gesture::EditPoint { .. } => Ok(Preview::Shape {
                shape: self.evaluate(pointer, mapper)?,
            }),
        }
    }

    /// Ends the drag at `pointer`, producing the commit or the abort.
    pub fn finish(self, pointer: Point, mapper: &CoordinateMapper) -> SessionOutcome {
        if pointer == self.start_pointer {
            return self.abort(AbortReason::NoMovement);
        }
        if let Some(angle) = self.live_angle(pointer, mapper) {
            if angle.abs() < self.config.angle_epsilon_degrees {
                return self.abort(AbortReason::NegligibleRotation);
            }
        }

        match self.evaluate(pointer, mapper) {
            Ok(shape) => {
                let commit = shape.commit_against(&self.snapshot, self.config.decimals);
                tracing::debug!(tag = %self.snapshot.tag, gesture = ?self.gesture, "transform committed");
                SessionOutcome::Commit(commit)
            }
            Err(e) => self.abort(AbortReason::Transform(e)),
        }
    }

    /// Ends the drag without applying anything.
    pub fn abort(self, reason: AbortReason) -> SessionOutcome {
        match &reason {
            AbortReason::Transform(e) => tracing::warn!(tag = %self.snapshot.tag, "transform aborted: {}", e),
            other => tracing::debug!(tag = %self.snapshot.tag, "transform aborted: {}", other),
        }
        SessionOutcome::Abort {
            snapshot: self.snapshot,
            reason,
        }
    }
}

//! # VecShape Designer
//!
//! Interactive move, scale and rotate for vector shapes in a retained document.
//!
//! ## Core Components
//!
//! - **Path Codec**: Parses path data into absolute segments and writes it back
//! - **Model**: Rectangles, circles, ellipses, lines, polylines, polygons and paths
//!   behind one [`Primitive`] contract
//! - **Element**: Tag plus ordered attribute bag, the engine's view of a host node
//! - **Mapper**: Local/screen coordinate conversion through the element's CTM
//! - **Handles**: Anchor and vertex handles with hit testing
//! - **Operations**: Pure move/scale/rotate/vertex edits
//! - **Session**: One drag from pointer-down to commit or abort
//! - **Interaction**: The idle/dragging state machine that drives a [`Host`]
//!
//! ## Architecture
//!
//! ```text
//! Interaction (pointer events, capture)
//!   └── TransformSession (snapshot, preview, commit)
//!         ├── Operations (translate, scale, rotate)
//!         ├── CoordinateMapper (local <-> screen)
//!         └── Shape / Primitive
//!               └── PathCodec
//! ```

pub mod element;
pub mod handles;
pub mod interaction;
pub mod mapper;
pub mod model;
pub mod operations;
pub mod path_codec;
pub mod session;

pub use element::{AttributeBag, Commit, Element};
pub use handles::{handles_for, hit_test, Handle, HandleId, HandleKind};
pub use interaction::{Host, Interaction, InteractionState, PointerCapture};
pub use mapper::CoordinateMapper;
pub use model::{
    BoundingBox, CircleShape, EllipseShape, LineShape, Local, OpaqueShape, PathShape, Point,
    PolyShape, Primitive, RectShape, Screen, Shape, ShapeKind,
};
pub use operations::{compute_bbox, move_control_point, rotate, scale, scale_to, translate, AxisMap};
pub use path_codec::{parse, serialize, PathSegment};
pub use session::{
    AbortReason, Gesture, Modifiers, Preview, RotationState, SessionOutcome, TransformSession,
};

pub use vecshape_core::{EngineConfig, ModifierKey, TransformError};

/// Starts a drag session; see [`TransformSession::begin`].
pub fn begin_session(
    element: Element,
    handle: Handle,
    pointer: Point,
    modifiers: Modifiers,
    mapper: &CoordinateMapper,
    config: &EngineConfig,
) -> TransformSession {
    TransformSession::begin(element, handle, pointer, modifiers, mapper, config)
}

/// Recomputes the live preview; see [`TransformSession::update`].
pub fn update_session(
    session: &mut TransformSession,
    pointer: Point,
    mapper: &CoordinateMapper,
) -> Result<Preview, TransformError> {
    session.update(pointer, mapper)
}

/// Ends the session at `pointer`; see [`TransformSession::finish`].
pub fn commit_session(
    session: TransformSession,
    pointer: Point,
    mapper: &CoordinateMapper,
) -> SessionOutcome {
    session.finish(pointer, mapper)
}

//! Pointer-driven state machine around [`TransformSession`].
//!
//! `Idle --pointer_down on handle--> Dragging --pointer_up/cancel--> Idle`.
//! At most one session exists at a time. Pointer capture is held by a guard
//! stored in the dragging state, so leaving that state by any path releases it.

use nalgebra::Matrix3;
use vecshape_core::{EngineConfig, TransformError};

use crate::element::{Commit, Element};
use crate::handles::{handles_for, hit_test, Handle};
use crate::mapper::CoordinateMapper;
use crate::model::{Point, Shape};
use crate::session::{AbortReason, Modifiers, Preview, SessionOutcome, TransformSession};

/// Releases the host's pointer subscription when dropped.
pub struct PointerCapture {
    release: Option<Box<dyn FnOnce()>>,
}

impl PointerCapture {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A capture with nothing to release.
    pub fn detached() -> Self {
        Self { release: None }
    }
}

impl Drop for PointerCapture {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl std::fmt::Debug for PointerCapture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointerCapture")
            .field("active", &self.release.is_some())
            .finish()
    }
}

/// The document and canvas the engine drives.
pub trait Host {
    /// The selected element, if any.
    fn selected_element(&self) -> Option<Element>;

    /// Current local-to-screen transform of the selected element.
    fn local_to_screen(&self) -> Matrix3<f64>;

    /// Routes pointer move/up to the engine until the guard drops.
    fn capture_pointer(&mut self) -> PointerCapture;

    fn show_preview(&mut self, preview: &Preview);

    fn commit(&mut self, commit: Commit);

    /// Puts the element back exactly as it was at drag start.
    fn restore(&mut self, snapshot: &Element);

    /// Asks the host to recompute the selection box after the drag.
    fn refresh_selection(&mut self);
}

#[derive(Debug, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Dragging {
        session: TransformSession,
        capture: PointerCapture,
    },
}

#[derive(Debug, Default)]
pub struct Interaction {
    state: InteractionState,
    config: EngineConfig,
}

impl Interaction {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            state: InteractionState::Idle,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, InteractionState::Dragging { .. })
    }

    pub fn session(&self) -> Option<&TransformSession> {
        match &self.state {
            InteractionState::Dragging { session, .. } => Some(session),
            InteractionState::Idle => None,
        }
    }

    fn mapper<H: Host>(&self, host: &H) -> Result<CoordinateMapper, TransformError> {
        CoordinateMapper::with_threshold(host.local_to_screen(), self.config.singular_threshold)
            .inspect_err(|e| tracing::warn!("coordinate mapping unavailable: {}", e))
    }

    /// Handles to draw for the current selection.
    pub fn handles<H: Host>(&self, host: &H) -> Vec<Handle> {
        let (Some(element), Some(mapper)) = (host.selected_element(), self.mapper(host).ok()) else {
            return Vec::new();
        };
        handles_for(&Shape::from_element(&element), &mapper)
    }

    /// Starts a drag when `pointer` lands on a handle. Returns whether a
    /// session started.
    pub fn pointer_down<H: Host>(&mut self, host: &mut H, pointer: Point, modifiers: Modifiers) -> bool {
        if self.is_dragging() {
            tracing::debug!("pointer down ignored, drag already in progress");
            return false;
        }
        let Some(element) = host.selected_element() else {
            return false;
        };
        let Ok(mapper) = self.mapper(host) else {
            return false;
        };

        let shape = Shape::from_element(&element);
        let Some(bbox) = mapper.screen_bbox(&shape) else {
            return false;
        };
        let handles = handles_for(&shape, &mapper);
        let Some(handle) = hit_test(&handles, &bbox, pointer, self.config.handle_tolerance) else {
            return false;
        };

        let session = TransformSession::begin(element, handle, pointer, modifiers, &mapper, &self.config);
        let capture = host.capture_pointer();
        self.state = InteractionState::Dragging { session, capture };
        true
    }

    pub fn pointer_move<H: Host>(&mut self, host: &mut H, pointer: Point) {
        let Ok(mapper) = self.mapper(host) else {
            return;
        };
        if let InteractionState::Dragging { session, .. } = &mut self.state {
            match session.update(pointer, &mapper) {
                Ok(preview) => host.show_preview(&preview),
                Err(e) => tracing::debug!("preview skipped: {}", e),
            }
        }
    }

    /// Ends the drag, committing or restoring. `None` when no drag was active.
    pub fn pointer_up<H: Host>(&mut self, host: &mut H, pointer: Point) -> Option<SessionOutcome> {
        let mapper = self.mapper(host);
        let InteractionState::Dragging { session, capture } = std::mem::take(&mut self.state) else {
            return None;
        };
        drop(capture);

        let outcome = match mapper {
            Ok(mapper) => session.finish(pointer, &mapper),
            Err(e) => session.abort(AbortReason::Transform(e)),
        };
        Self::settle(host, &outcome);
        Some(outcome)
    }

    /// Abandons the drag and restores the element.
    pub fn cancel<H: Host>(&mut self, host: &mut H) -> Option<SessionOutcome> {
        let InteractionState::Dragging { session, capture } = std::mem::take(&mut self.state) else {
            return None;
        };
        drop(capture);
        let outcome = session.abort(AbortReason::Cancelled);
        Self::settle(host, &outcome);
        Some(outcome)
    }

    fn settle<H: Host>(host: &mut H, outcome: &SessionOutcome) {
        match outcome {
            SessionOutcome::Commit(commit) => host.commit(commit.clone()),
            SessionOutcome::Abort { snapshot, .. } => host.restore(snapshot),
        }
        host.refresh_selection();
    }
}

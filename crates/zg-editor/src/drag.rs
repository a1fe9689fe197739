//! Drag/drop protocol.
//!
//! Two independent flows:
//!
//! | Flow | States | Result |
//! |------|--------|--------|
//! | Catalog → canvas (`CreationDrag`) | Idle → Dragging → Dropped / Cancelled | new placed element |
//! | Canvas reposition (`RepositionDrag`) | Idle → Dragging → Idle | element moved |
//!
//! The creation flow carries the full `ElementDefinition` as JSON so it can
//! cross the host's drag boundary verbatim. Unparseable transfer data is a
//! cancellation, never an error.

use crate::pointer::{PointerHub, PointerSignal, PointerSubscription};
use log::{debug, trace, warn};
use zg_core::error::{GardenError, Result};
use zg_core::{ElementDefinition, ElementId, PlacedElement, Point, Position, Vec2, ViewTransform};

/// MIME type under which the payload travels in the host's transfer data.
pub const DRAG_MIME: &str = "application/json";

/// Serialize a definition into drag transfer data.
///
/// # Errors
/// `GardenError::Codec` if serialization fails.
pub fn encode_payload(definition: &ElementDefinition) -> Result<String> {
    serde_json::to_string(definition).map_err(|e| GardenError::Codec(e.to_string()))
}

/// Parse drag transfer data. Extra fields are ignored; anything else that
/// does not describe a definition yields `None`.
pub fn decode_payload(data: &str) -> Option<ElementDefinition> {
    match serde_json::from_str(data) {
        Ok(definition) => Some(definition),
        Err(e) => {
            warn!("ignoring malformed drag payload: {e}");
            None
        }
    }
}

// ─── Catalog → canvas ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum CreationDragState {
    Idle,
    Dragging { definition: ElementDefinition },
    Dropped { definition_id: String },
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct CreationDrag {
    state: CreationDragState,
}

impl Default for CreationDrag {
    fn default() -> Self {
        Self::new()
    }
}

impl CreationDrag {
    pub fn new() -> Self {
        Self {
            state: CreationDragState::Idle,
        }
    }

    pub fn state(&self) -> &CreationDragState {
        &self.state
    }

    /// Begin dragging `definition` out of the palette. Returns the transfer
    /// data to attach to the host drag event.
    ///
    /// # Errors
    /// `GardenError::Codec` if the definition cannot be serialized; the
    /// state is left unchanged.
    pub fn start(&mut self, definition: &ElementDefinition) -> Result<String> {
        let data = encode_payload(definition)?;
        debug!("catalog drag start: {}", definition.id);
        self.state = CreationDragState::Dragging {
            definition: definition.clone(),
        };
        Ok(data)
    }

    /// Complete a drop over the canvas. On success returns the decoded
    /// definition and the drop point in scene space (not yet clamped).
    ///
    /// Transfer data is decoded even without a matching `start`, since the
    /// drag may originate outside this controller.
    pub fn drop_on_canvas(
        &mut self,
        data: &str,
        screen: Point,
        viewport_origin: Point,
        view: &ViewTransform,
    ) -> Option<(ElementDefinition, Position)> {
        let Some(definition) = decode_payload(data) else {
            self.state = CreationDragState::Cancelled;
            return None;
        };
        let position = view.to_scene_space(screen, viewport_origin);
        debug!(
            "catalog drop: {} at scene ({:.1}, {:.1})",
            definition.id, position.x, position.y
        );
        self.state = CreationDragState::Dropped {
            definition_id: definition.id.clone(),
        };
        Some((definition, position))
    }

    /// Abandon the drag (dropped outside the canvas, or never completed).
    /// Safe to call in any state.
    pub fn cancel(&mut self) {
        if matches!(self.state, CreationDragState::Dragging { .. }) {
            debug!("catalog drag cancelled");
            self.state = CreationDragState::Cancelled;
        }
    }
}

// ─── Canvas reposition ───────────────────────────────────────────────────

#[derive(Debug)]
pub enum RepositionState {
    Idle,
    Dragging {
        element: ElementId,
        /// `pointer - element.position` at press time.
        offset: Vec2,
        listener: PointerSubscription,
    },
}

/// Moves an existing element with the pointer, keeping the grab offset.
#[derive(Debug)]
pub struct RepositionDrag {
    state: RepositionState,
}

impl Default for RepositionDrag {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositionDrag {
    pub fn new() -> Self {
        Self {
            state: RepositionState::Idle,
        }
    }

    pub fn state(&self) -> &RepositionState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, RepositionState::Dragging { .. })
    }

    pub fn active_element(&self) -> Option<ElementId> {
        match &self.state {
            RepositionState::Dragging { element, .. } => Some(*element),
            RepositionState::Idle => None,
        }
    }

    /// Press on `element` with the pointer at `pointer` (scene space).
    /// Installs a window-level listener for the duration of the drag.
    pub fn press(&mut self, element: &PlacedElement, pointer: Position, hub: &PointerHub) {
        // Drop any previous listener before installing the next one.
        self.release();
        let offset = Point::from(pointer) - Point::from(element.position);
        debug!("reposition drag start: {}", element.id);
        self.state = RepositionState::Dragging {
            element: element.id,
            offset,
            listener: hub.subscribe(),
        };
    }

    /// Window-level pointer signals received since the last call. Empty
    /// unless a drag holds a subscription.
    pub fn take_signals(&self) -> Vec<PointerSignal> {
        match &self.state {
            RepositionState::Dragging { listener, .. } => listener.drain(),
            RepositionState::Idle => Vec::new(),
        }
    }

    /// Target position for a pointer move, or `None` when not dragging.
    /// The result is unclamped; the scene clamps on update.
    pub fn drag_to(&self, pointer: Position) -> Option<(ElementId, Position)> {
        let RepositionState::Dragging {
            element, offset, ..
        } = &self.state
        else {
            return None;
        };
        let target = Position::from(Point::from(pointer) - *offset);
        trace!("reposition {element} -> ({:.1}, {:.1})", target.x, target.y);
        Some((*element, target))
    }

    /// End the drag, wherever the pointer is. Returns the element that was
    /// being dragged, if any.
    pub fn release(&mut self) -> Option<ElementId> {
        match std::mem::replace(&mut self.state, RepositionState::Idle) {
            RepositionState::Dragging { element, .. } => {
                debug!("reposition drag end: {element}");
                Some(element)
            }
            RepositionState::Idle => None,
        }
    }
}

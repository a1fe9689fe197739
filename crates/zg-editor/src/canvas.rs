//! The canvas controller: the editing surface of the garden designer.
//!
//! Holds the scene, the view transform, both drag flows and the pointer
//! hub. All interaction from the host goes through this struct, and every
//! call returns the `CanvasIntent`s it applied so the host can react
//! (notifications, dirty flags, enabling "Save").
//!
//! | State | Trigger | Next state | Effect |
//! |---|---|---|---|
//! | Idle | creation drop | Idle | element added, unselected |
//! | Idle | press on element | ElementDragging | element selected, offset recorded |
//! | ElementDragging | pointer move | ElementDragging | position updated (clamped) |
//! | ElementDragging | pointer release | Idle | drag ends |
//! | Idle | delete selected | Idle | element removed, selection cleared |

use crate::drag::{CreationDrag, CreationDragState, RepositionDrag};
use crate::hit::hit_test;
use crate::input::{InputEvent, Modifiers};
use crate::pointer::{PointerHub, PointerSignal};
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use log::{debug, info};
use zg_core::error::Result;
use zg_core::{
    CanvasConfig, ElementDefinition, ElementId, ElementPatch, PlacedElement, Point, Position,
    Rect, Scene, SceneDocument, Vec2, ViewTransform,
};

/// A change the controller applied, reported upward to the host.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasIntent {
    Added(PlacedElement),
    Moved { id: ElementId, position: Position },
    Removed(PlacedElement),
    Selected(Option<ElementId>),
    Cleared,
    Replaced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    ElementDragging,
}

/// What the host needs to draw one element.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementView<'a> {
    pub element: &'a PlacedElement,
    /// Screen-space anchor after pan/zoom.
    pub screen: Point,
    pub selected: bool,
    /// The delete affordance is offered on the selected element only.
    pub deletable: bool,
}

#[derive(Debug)]
pub struct CanvasController {
    config: CanvasConfig,
    scene: Scene,
    view: ViewTransform,
    /// Canvas rectangle in screen pixels.
    viewport: Rect,
    creation: CreationDrag,
    reposition: RepositionDrag,
    pointer_hub: PointerHub,
}

impl Default for CanvasController {
    fn default() -> Self {
        Self::new(CanvasConfig::default())
    }
}

impl CanvasController {
    pub fn new(config: CanvasConfig) -> Self {
        let viewport = Rect::new(0.0, 0.0, config.bounds.width, config.bounds.height);
        Self {
            scene: Scene::new(config.bounds),
            view: ViewTransform::new(&config),
            viewport,
            creation: CreationDrag::new(),
            reposition: RepositionDrag::new(),
            pointer_hub: PointerHub::new(),
            config,
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn pointer_hub(&self) -> &PointerHub {
        &self.pointer_hub
    }

    pub fn catalog_drag_state(&self) -> &CreationDragState {
        self.creation.state()
    }

    pub fn state(&self) -> ControllerState {
        if self.reposition.is_dragging() {
            ControllerState::ElementDragging
        } else {
            ControllerState::Idle
        }
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Move/resize the canvas on screen.
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    /// Elements in paint order with their selection state.
    pub fn element_views(&self) -> Vec<ElementView<'_>> {
        let origin = self.viewport.origin();
        self.scene
            .elements()
            .iter()
            .map(|element| {
                let selected = self.scene.is_selected(element.id);
                ElementView {
                    element,
                    screen: self.view.to_screen_space(element.position, origin),
                    selected,
                    deletable: selected,
                }
            })
            .collect()
    }

    // ─── Catalog → canvas ────────────────────────────────────────────────

    /// Start dragging a palette entry. Returns the transfer data to attach
    /// to the host drag event under [`crate::drag::DRAG_MIME`].
    ///
    /// # Errors
    /// `GardenError::Codec` if the definition cannot be serialized.
    pub fn begin_catalog_drag(&mut self, definition: &ElementDefinition) -> Result<String> {
        self.creation.start(definition)
    }

    /// A catalog drag ended without a drop on the canvas.
    pub fn cancel_catalog_drag(&mut self) {
        self.creation.cancel();
    }

    /// Handle a drop at `screen`. Drops outside the viewport and malformed
    /// transfer data cancel the drag without touching the scene.
    pub fn drop_on_canvas(&mut self, data: &str, screen: Point) -> Vec<CanvasIntent> {
        if !self.viewport_contains(screen) {
            debug!("drop outside canvas at ({:.1}, {:.1})", screen.x, screen.y);
            self.creation.cancel();
            return Vec::new();
        }
        let Some((definition, position)) =
            self.creation
                .drop_on_canvas(data, screen, self.viewport.origin(), &self.view)
        else {
            return Vec::new();
        };
        let element = self.scene.add_element(&definition, position);
        info!("added {} to garden", definition.name);
        vec![CanvasIntent::Added(element)]
    }

    // ─── Pointer ─────────────────────────────────────────────────────────

    /// Pointer pressed over the canvas: press the topmost element under the
    /// pointer, or clear the selection on empty canvas.
    pub fn pointer_down(&mut self, screen: Point) -> Vec<CanvasIntent> {
        let point = self.scene_point(screen);
        match hit_test(&self.scene, point, self.config.element_extent) {
            Some(id) => self.press_element(id, screen),
            None => self.clear_selection(),
        }
    }

    /// Pointer pressed on a known element (the host already resolved the
    /// target). Selects it and starts a reposition drag.
    pub fn press_element(&mut self, id: ElementId, screen: Point) -> Vec<CanvasIntent> {
        let point = self.scene_point(screen);
        let Some(element) = self.scene.get(id) else {
            return Vec::new();
        };
        self.reposition.press(element, point, &self.pointer_hub);
        self.scene.select_element(id);
        vec![CanvasIntent::Selected(Some(id))]
    }

    /// Window-level pointer move. Reaches the controller only through the
    /// drag's subscription, so it is ignored unless an element drag is active.
    pub fn pointer_move(&mut self, screen: Point) -> Vec<CanvasIntent> {
        self.pointer_hub.dispatch(PointerSignal::Move(screen));
        self.deliver_pointer_signals()
    }

    /// Window-level pointer release. Ends an element drag wherever it happens.
    pub fn pointer_up(&mut self) -> Vec<CanvasIntent> {
        self.pointer_hub.dispatch(PointerSignal::Release);
        self.deliver_pointer_signals()
    }

    fn deliver_pointer_signals(&mut self) -> Vec<CanvasIntent> {
        let mut intents = Vec::new();
        for signal in self.reposition.take_signals() {
            match signal {
                PointerSignal::Move(screen) => intents.extend(self.drag_element_to(screen)),
                PointerSignal::Release => {
                    self.reposition.release();
                }
            }
        }
        intents
    }

    fn drag_element_to(&mut self, screen: Point) -> Option<CanvasIntent> {
        let point = self.scene_point(screen);
        let (id, target) = self.reposition.drag_to(point)?;
        if !self.scene.update_element(id, ElementPatch::position(target)) {
            self.reposition.release();
            return None;
        }
        let position = self.scene.get(id)?.position;
        Some(CanvasIntent::Moved { id, position })
    }

    /// Dispatch a normalized input event.
    pub fn handle_event(&mut self, event: &InputEvent) -> Vec<CanvasIntent> {
        match event {
            InputEvent::PointerDown { x, y, .. } => self.pointer_down(Point::new(*x, *y)),
            InputEvent::PointerMove { x, y, .. } => self.pointer_move(Point::new(*x, *y)),
            InputEvent::PointerUp { .. } => self.pointer_up(),
            InputEvent::Key { key, modifiers } => self.handle_key(key, *modifiers),
        }
    }

    /// Run the shortcut bound to `key`, if any.
    pub fn handle_key(&mut self, key: &str, modifiers: Modifiers) -> Vec<CanvasIntent> {
        match ShortcutMap::resolve(key, modifiers) {
            Some(ShortcutAction::ZoomIn) => {
                self.zoom_in();
                Vec::new()
            }
            Some(ShortcutAction::ZoomOut) => {
                self.zoom_out();
                Vec::new()
            }
            Some(ShortcutAction::ResetView) => {
                self.reset_view();
                Vec::new()
            }
            Some(ShortcutAction::Delete) => self.delete_selected(),
            Some(ShortcutAction::Deselect) => self.clear_selection(),
            Some(ShortcutAction::ClearAll) => self.clear(),
            None => Vec::new(),
        }
    }

    // ─── Selection & removal ─────────────────────────────────────────────

    pub fn select(&mut self, id: ElementId) -> Vec<CanvasIntent> {
        if self.scene.is_selected(id) {
            return Vec::new();
        }
        self.scene.select_element(id);
        vec![CanvasIntent::Selected(Some(id))]
    }

    pub fn clear_selection(&mut self) -> Vec<CanvasIntent> {
        if self.scene.selected_id().is_none() {
            return Vec::new();
        }
        self.scene.clear_selection();
        vec![CanvasIntent::Selected(None)]
    }

    /// Remove an element. If it was selected the selection is cleared in
    /// the same call; both intents are reported together.
    pub fn remove_element(&mut self, id: ElementId) -> Vec<CanvasIntent> {
        if self.reposition.active_element() == Some(id) {
            self.reposition.release();
        }
        let was_selected = self.scene.is_selected(id);
        let Some(removed) = self.scene.remove_element(id) else {
            return Vec::new();
        };
        info!("removed {} from garden", removed.element_id);
        let mut intents = vec![CanvasIntent::Removed(removed)];
        if was_selected {
            intents.push(CanvasIntent::Selected(None));
        }
        intents
    }

    /// The delete affordance on the selected element.
    pub fn delete_selected(&mut self) -> Vec<CanvasIntent> {
        let Some(id) = self.scene.selected_element().map(|e| e.id) else {
            return Vec::new();
        };
        self.remove_element(id)
    }

    // ─── Whole-scene operations ──────────────────────────────────────────

    /// Remove every element ("Clear"). The scene name is kept.
    pub fn clear(&mut self) -> Vec<CanvasIntent> {
        self.reposition.release();
        self.scene.clear();
        info!("garden cleared");
        vec![CanvasIntent::Cleared]
    }

    /// Start over with an empty, unnamed scene ("New Garden").
    pub fn new_scene(&mut self) -> Vec<CanvasIntent> {
        let intents = self.clear();
        self.scene.name.clear();
        intents
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.scene.name = name.into();
    }

    /// Snapshot for persistence. Later edits do not affect the snapshot.
    pub fn document(&self) -> SceneDocument {
        self.scene.to_document()
    }

    /// Replace the scene with a loaded document.
    pub fn load_document(&mut self, document: SceneDocument) -> Vec<CanvasIntent> {
        self.reposition.release();
        self.scene = Scene::from_document(document, self.config.bounds);
        info!(
            "loaded garden {:?} ({} elements)",
            self.scene.name,
            self.scene.len()
        );
        vec![CanvasIntent::Replaced]
    }

    // ─── View ────────────────────────────────────────────────────────────

    pub fn zoom_in(&mut self) {
        self.view.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.view.zoom_out();
    }

    pub fn reset_view(&mut self) {
        self.view.reset_view();
    }

    pub fn pan_by(&mut self, delta: Vec2) {
        self.view.pan_by(delta);
    }

    /// Edges count as inside, unlike `Rect::contains`.
    fn viewport_contains(&self, screen: Point) -> bool {
        let r = self.viewport;
        (r.x0..=r.x1).contains(&screen.x) && (r.y0..=r.y1).contains(&screen.y)
    }

    fn scene_point(&self, screen: Point) -> Position {
        self.view.to_scene_space(screen, self.viewport.origin())
    }
}

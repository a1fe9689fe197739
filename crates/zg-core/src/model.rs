//! Core data model for garden scenes.
//!
//! A scene is an ordered list of placed elements. Order is z-order:
//! later elements paint on top of earlier ones. Every element position is
//! kept inside the scene's logical bounds on every mutation path, so
//! consumers never need to re-clamp.

use crate::id::ElementId;
use kurbo::Point;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::fmt;

// ─── Geometry ────────────────────────────────────────────────────────────

/// A point in scene space (logical units, independent of screen pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<Point> for Position {
    fn from(p: Point) -> Self {
        Self { x: p.x, y: p.y }
    }
}

impl From<Position> for Point {
    fn from(p: Position) -> Self {
        Point::new(p.x, p.y)
    }
}

/// The fixed logical size of a scene. Positions live in `[0, width] × [0, height]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneBounds {
    pub width: f64,
    pub height: f64,
}

impl Default for SceneBounds {
    fn default() -> Self {
        Self {
            width: 500.0,
            height: 400.0,
        }
    }
}

impl SceneBounds {
    /// Clamp a raw position into bounds. NaN maps to 0; infinities clamp
    /// to the nearest edge.
    pub fn clamp(&self, p: Position) -> Position {
        Position {
            x: clamp_axis(p.x, self.width),
            y: clamp_axis(p.y, self.height),
        }
    }

    /// Both sides finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        [self.width, self.height]
            .iter()
            .all(|side| side.is_finite() && *side > 0.0)
    }

    pub fn contains(&self, p: Position) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }
}

// `f64::max` discards NaN, so NaN input and a degenerate `max` both land on 0.
fn clamp_axis(v: f64, max: f64) -> f64 {
    v.max(0.0).min(max.max(0.0))
}

// ─── Catalog definitions ─────────────────────────────────────────────────

/// The fixed set of element categories offered by the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementCategory {
    Rock,
    Water,
    Plant,
}

impl ElementCategory {
    pub const ALL: [ElementCategory; 3] = [Self::Rock, Self::Water, Self::Plant];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rock => "rock",
            Self::Water => "water",
            Self::Plant => "plant",
        }
    }

    /// Palette tab label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Rock => "Rocks",
            Self::Water => "Water",
            Self::Plant => "Plants",
        }
    }
}

impl fmt::Display for ElementCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_scale() -> f64 {
    1.0
}

/// A placeable element as offered by the catalog. Immutable.
///
/// Unknown fields are ignored when deserializing, so catalog and drag
/// payloads may carry extra visual metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementDefinition {
    pub id: String,
    pub category: ElementCategory,
    pub name: String,
    pub icon: String,
    #[serde(default = "default_scale")]
    pub default_scale: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ElementDefinition {
    pub fn new(
        id: impl Into<String>,
        category: ElementCategory,
        name: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            category,
            name: name.into(),
            icon: icon.into(),
            default_scale: 1.0,
            color: None,
            description: None,
        }
    }

    /// Scale for freshly placed copies: `default_scale`, or 1 if that is not
    /// a positive finite number.
    pub fn initial_scale(&self) -> f64 {
        if is_valid_scale(self.default_scale) {
            self.default_scale
        } else {
            1.0
        }
    }
}

fn is_valid_scale(s: f64) -> bool {
    s.is_finite() && s > 0.0
}

// ─── Placed elements ─────────────────────────────────────────────────────

/// An instantiated, positioned copy of a catalog definition.
///
/// Serializes exactly as `{id, type, elementId, position: {x, y}, rotation, scale}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedElement {
    pub id: ElementId,
    #[serde(rename = "type")]
    pub kind: ElementCategory,
    /// Weak back-reference to `ElementDefinition::id`.
    pub element_id: String,
    pub position: Position,
    /// Degrees.
    #[serde(default)]
    pub rotation: f64,
    #[serde(default = "default_scale")]
    pub scale: f64,
}

impl PlacedElement {
    /// Element content without its identity, for comparing scenes whose
    /// ids were reassigned.
    pub fn content(&self) -> (ElementCategory, &str, Position, f64, f64) {
        (
            self.kind,
            self.element_id.as_str(),
            self.position,
            self.rotation,
            self.scale,
        )
    }
}

/// A partial update for a placed element. `None` fields are left untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ElementPatch {
    pub position: Option<Position>,
    pub rotation: Option<f64>,
    pub scale: Option<f64>,
}

impl ElementPatch {
    pub fn position(position: Position) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }
}

// ─── Scene ───────────────────────────────────────────────────────────────

/// The ordered collection of placed elements plus the current selection.
///
/// Elements are only reachable by shared reference from outside, so every
/// mutation goes through the methods below and the bounds invariant holds.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub name: String,
    elements: Vec<PlacedElement>,
    selected: Option<ElementId>,
    bounds: SceneBounds,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(SceneBounds::default())
    }
}

impl Scene {
    pub fn new(bounds: SceneBounds) -> Self {
        Self {
            name: String::new(),
            elements: Vec::new(),
            selected: None,
            bounds,
        }
    }

    pub fn bounds(&self) -> SceneBounds {
        self.bounds
    }

    /// Elements in z-order (bottom first).
    pub fn elements(&self) -> &[PlacedElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, id: ElementId) -> Option<&PlacedElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// The raw selection reference, which may dangle.
    pub fn selected_id(&self) -> Option<ElementId> {
        self.selected
    }

    /// The selected element, or `None` if nothing is selected or the
    /// selection refers to an element no longer in the scene.
    pub fn selected_element(&self) -> Option<&PlacedElement> {
        self.selected.and_then(|id| self.get(id))
    }

    pub fn is_selected(&self, id: ElementId) -> bool {
        self.selected == Some(id)
    }

    /// Place a new copy of `definition` at `raw_position` (clamped into
    /// bounds) on top of every existing element.
    pub fn add_element(
        &mut self,
        definition: &ElementDefinition,
        raw_position: Position,
    ) -> PlacedElement {
        let element = PlacedElement {
            id: self.fresh_id(),
            kind: definition.category,
            element_id: definition.id.clone(),
            position: self.bounds.clamp(raw_position),
            rotation: 0.0,
            scale: definition.initial_scale(),
        };
        debug!(
            "add {} ({}) at ({:.1}, {:.1})",
            element.id, element.element_id, element.position.x, element.position.y
        );
        self.elements.push(element.clone());
        element
    }

    /// Merge `patch` into the element with `id`. Positions are clamped;
    /// non-positive or non-finite scales are ignored.
    ///
    /// Returns `false` (and changes nothing) if no such element exists.
    pub fn update_element(&mut self, id: ElementId, patch: ElementPatch) -> bool {
        let bounds = self.bounds;
        let Some(element) = self.elements.iter_mut().find(|e| e.id == id) else {
            trace!("update {id}: no such element");
            return false;
        };
        if let Some(position) = patch.position {
            element.position = bounds.clamp(position);
        }
        if let Some(rotation) = patch.rotation
            && rotation.is_finite()
        {
            element.rotation = rotation;
        }
        if let Some(scale) = patch.scale
            && is_valid_scale(scale)
        {
            element.scale = scale;
        }
        true
    }

    /// Remove the element with `id`, clearing the selection in the same
    /// step if it pointed at it. No-op if absent.
    pub fn remove_element(&mut self, id: ElementId) -> Option<PlacedElement> {
        let index = self.elements.iter().position(|e| e.id == id)?;
        if self.selected == Some(id) {
            self.selected = None;
        }
        debug!("remove {id}");
        Some(self.elements.remove(index))
    }

    /// Set the selection. Existence is not checked.
    pub fn select_element(&mut self, id: ElementId) {
        self.selected = Some(id);
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Remove every element and the selection. The name is kept.
    pub fn clear(&mut self) {
        self.elements.clear();
        self.selected = None;
    }

    /// An id no element of this scene carries. Loaded documents may hold
    /// ids the process counter has not reached yet.
    fn fresh_id(&self) -> ElementId {
        loop {
            let id = ElementId::generate();
            if self.get(id).is_none() {
                return id;
            }
        }
    }

    /// Append an already-built element (e.g. from a loaded document),
    /// clamping its position and repairing its scale. A repeated id is
    /// replaced with a fresh one.
    pub(crate) fn push_restored(&mut self, mut element: PlacedElement) {
        if self.get(element.id).is_some() {
            let id = self.fresh_id();
            debug!("restore: duplicate id {} renamed to {id}", element.id);
            element.id = id;
        }
        element.position = self.bounds.clamp(element.position);
        if !is_valid_scale(element.scale) {
            element.scale = 1.0;
        }
        if !element.rotation.is_finite() {
            element.rotation = 0.0;
        }
        self.elements.push(element);
    }
}

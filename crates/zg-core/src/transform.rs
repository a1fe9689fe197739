//! View transform: zoom and pan between screen pixels and scene space.
//!
//! `scene = (screen - viewport_origin - pan) / scale`
//!
//! Conversion functions are pure; the zoom/pan operations only touch the
//! transform's own state.

use crate::config::CanvasConfig;
use crate::model::Position;
use kurbo::{Point, Vec2};
use log::debug;
use serde::{Deserialize, Serialize};

/// Zoom factor and pan offset of the canvas viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub scale: f64,
    pub pan: Vec2,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            scale: 1.0,
            pan: Vec2::ZERO,
        }
    }
}

/// Convert a screen point to scene space for the given view.
pub fn to_scene_space(view: &ViewState, screen: Point, viewport_origin: Point) -> Position {
    let local = screen - viewport_origin - view.pan;
    Position::new(local.x / view.scale, local.y / view.scale)
}

/// Convert a scene point back to screen space for the given view.
pub fn to_screen_space(view: &ViewState, scene: Position, viewport_origin: Point) -> Point {
    viewport_origin + view.pan + Vec2::new(scene.x * view.scale, scene.y * view.scale)
}

/// The zoom/pan state machine of a canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewTransform {
    state: ViewState,
    min_zoom: f64,
    max_zoom: f64,
    step: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new(&CanvasConfig::default())
    }
}

impl ViewTransform {
    pub fn new(config: &CanvasConfig) -> Self {
        Self {
            state: ViewState::default(),
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
            step: config.zoom_step,
        }
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn scale(&self) -> f64 {
        self.state.scale
    }

    pub fn pan(&self) -> Vec2 {
        self.state.pan
    }

    pub fn to_scene_space(&self, screen: Point, viewport_origin: Point) -> Position {
        to_scene_space(&self.state, screen, viewport_origin)
    }

    pub fn to_screen_space(&self, scene: Position, viewport_origin: Point) -> Point {
        to_screen_space(&self.state, scene, viewport_origin)
    }

    pub fn zoom_in(&mut self) {
        self.set_scale(self.state.scale * self.step);
    }

    pub fn zoom_out(&mut self) {
        self.set_scale(self.state.scale / self.step);
    }

    pub fn reset_view(&mut self) {
        self.state = ViewState::default();
        debug!("view reset");
    }

    pub fn pan_by(&mut self, delta: Vec2) {
        self.state.pan += delta;
    }

    pub fn can_zoom_in(&self) -> bool {
        self.state.scale < self.max_zoom
    }

    pub fn can_zoom_out(&self) -> bool {
        self.state.scale > self.min_zoom
    }

    /// Zoom as a rounded percentage, as shown in the canvas header.
    pub fn zoom_percent(&self) -> u32 {
        // Scale is clamped to a small positive range, so this cannot truncate.
        (self.state.scale * 100.0).round() as u32
    }

    fn set_scale(&mut self, scale: f64) {
        self.state.scale = scale.clamp(self.min_zoom, self.max_zoom);
        debug!("zoom {:.3}", self.state.scale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn identity_view_subtracts_origin() {
        let view = ViewTransform::default();
        let p = view.to_scene_space(Point::new(150.0, 90.0), Point::new(50.0, 40.0));
        assert_eq!(p, Position::new(100.0, 50.0));
    }

    #[test]
    fn conversion_accounts_for_pan_and_scale() {
        let view = ViewState {
            scale: 2.0,
            pan: Vec2::new(10.0, 20.0),
        };
        let p = to_scene_space(&view, Point::new(110.0, 120.0), Point::ZERO);
        assert_eq!(p, Position::new(50.0, 50.0));
        let back = to_screen_space(&view, p, Point::ZERO);
        assert!(approx(back.x, 110.0) && approx(back.y, 120.0));
    }

    #[test]
    fn zoom_in_is_bounded_by_max() {
        let mut view = ViewTransform::default();
        for _ in 0..50 {
            view.zoom_in();
            assert!(view.scale() <= 3.0);
        }
        assert_eq!(view.scale(), 3.0);
        assert!(!view.can_zoom_in());
    }

    #[test]
    fn zoom_out_is_bounded_by_min() {
        let mut view = ViewTransform::default();
        for _ in 0..50 {
            view.zoom_out();
            assert!(view.scale() >= 0.5);
        }
        assert_eq!(view.scale(), 0.5);
        assert!(!view.can_zoom_out());
    }

    #[test]
    fn two_zoom_outs_from_one() {
        let mut view = ViewTransform::default();
        view.zoom_out();
        view.zoom_out();
        assert!(approx(view.scale(), 1.0 / 1.2 / 1.2));
        assert!(view.scale() >= 0.5);
        assert_eq!(view.zoom_percent(), 69);
    }

    #[test]
    fn reset_restores_scale_and_pan() {
        let mut view = ViewTransform::default();
        view.zoom_in();
        view.pan_by(Vec2::new(-30.0, 12.0));
        view.reset_view();
        assert_eq!(view.state(), ViewState::default());
    }
}

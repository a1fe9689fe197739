//! Hit testing: scene point → placed element lookup.
//!
//! An element occupies a square of `extent × element.scale` scene units
//! anchored at its position (top-left). The selected element is drawn above
//! the others, so it is tested first; the rest are walked front-to-back.

use zg_core::{ElementId, PlacedElement, Point, Position, Rect, Scene};

/// The scene-space footprint of an element.
pub fn footprint(element: &PlacedElement, extent: f64) -> Rect {
    let side = extent * element.scale;
    Rect::from_origin_size(Point::from(element.position), (side, side))
}

/// Find the topmost element at `point`. Returns `None` for background.
pub fn hit_test(scene: &Scene, point: Position, extent: f64) -> Option<ElementId> {
    let p = Point::from(point);
    if let Some(selected) = scene.selected_element()
        && footprint(selected, extent).contains(p)
    {
        return Some(selected.id);
    }
    scene
        .elements()
        .iter()
        .rev()
        .find(|e| footprint(e, extent).contains(p))
        .map(|e| e.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use zg_core::{ElementCategory, ElementDefinition};

    fn stone() -> ElementDefinition {
        ElementDefinition::new("river-stone", ElementCategory::Rock, "River Stone", "🪨")
    }

    #[test]
    fn background_misses() {
        let mut scene = Scene::default();
        scene.add_element(&stone(), Position::new(100.0, 100.0));
        assert_eq!(hit_test(&scene, Position::new(10.0, 10.0), 40.0), None);
    }

    #[test]
    fn topmost_wins() {
        let mut scene = Scene::default();
        let _below = scene.add_element(&stone(), Position::new(100.0, 100.0));
        let above = scene.add_element(&stone(), Position::new(110.0, 110.0));
        assert_eq!(
            hit_test(&scene, Position::new(120.0, 120.0), 40.0),
            Some(above.id)
        );
    }

    #[test]
    fn selected_is_tested_first() {
        let mut scene = Scene::default();
        let below = scene.add_element(&stone(), Position::new(100.0, 100.0));
        scene.add_element(&stone(), Position::new(110.0, 110.0));
        scene.select_element(below.id);
        assert_eq!(
            hit_test(&scene, Position::new(120.0, 120.0), 40.0),
            Some(below.id)
        );
    }

    #[test]
    fn footprint_grows_with_scale() {
        let mut scene = Scene::default();
        let mut def = stone();
        def.default_scale = 2.0;
        let big = scene.add_element(&def, Position::new(0.0, 0.0));
        assert_eq!(footprint(&big, 40.0).width(), 80.0);
        assert_eq!(hit_test(&scene, Position::new(70.0, 70.0), 40.0), Some(big.id));
    }
}

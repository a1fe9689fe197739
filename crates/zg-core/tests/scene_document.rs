//! Integration tests: scene mutation invariants and document round-trips.
//!
//! Verifies that element content survives Scene → SceneDocument → Scene in
//! both encodings, and that the scene stays consistent under edits.

use pretty_assertions::assert_eq;
use zg_core::*;

// ─── Helpers ─────────────────────────────────────────────────────────────

fn sample_scene() -> Scene {
    let catalog = StaticCatalog::builtin();
    let mut scene = Scene::default();
    scene.name = "Morning Garden".into();
    let placements = [
        ("river-stone", 40.0, 60.0),
        ("koi-pond", 250.0, 200.0),
        ("bamboo", 480.0, 20.0),
        ("cherry-blossom", 900.0, -30.0),
    ];
    for (id, x, y) in placements {
        let definition = catalog.get(id).expect("builtin definition");
        scene.add_element(&definition, Position::new(x, y));
    }
    let pond = scene.elements()[1].id;
    scene.update_element(
        pond,
        ElementPatch {
            rotation: Some(45.0),
            scale: Some(1.5),
            ..ElementPatch::default()
        },
    );
    scene
}

fn contents(scene: &Scene) -> Vec<(ElementCategory, &str, Position, f64, f64)> {
    scene.elements().iter().map(PlacedElement::content).collect()
}

// ─── Round-trips ─────────────────────────────────────────────────────────

#[test]
fn json_roundtrip_preserves_content() {
    let scene = sample_scene();
    let json = scene.to_document().to_json().expect("encode");
    let restored = Scene::from_document(
        SceneDocument::from_json(&json).expect("decode"),
        SceneBounds::default(),
    );
    assert_eq!(contents(&restored), contents(&scene));
    assert_eq!(restored.name, scene.name);
}

#[test]
fn msgpack_roundtrip_preserves_content() {
    let scene = sample_scene();
    let bytes = scene.to_document().to_msgpack().expect("encode");
    let restored = Scene::from_document(
        SceneDocument::from_msgpack(&bytes).expect("decode"),
        SceneBounds::default(),
    );
    assert_eq!(contents(&restored), contents(&scene));
}

#[test]
fn document_json_uses_wire_field_names() {
    let json = sample_scene().to_document().to_json().expect("encode");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    let first = &value["elements"][0];
    assert_eq!(first["type"], "rock");
    assert_eq!(first["elementId"], "river-stone");
    assert_eq!(first["position"]["x"], 40.0);
    assert_eq!(first["rotation"], 0.0);
    assert_eq!(first["scale"], 1.0);
}

#[test]
fn restored_document_is_clamped_and_unselected() {
    let document = SceneDocument::from_json(
        r#"{
            "name": "Imported",
            "elements": [{
                "id": "imported-1",
                "type": "water",
                "elementId": "stream",
                "position": { "x": 640.0, "y": -12.0 },
                "rotation": 0.0,
                "scale": 1.0
            }]
        }"#,
    )
    .expect("decode");
    let scene = Scene::from_document(document, SceneBounds::default());
    assert_eq!(scene.elements()[0].position, Position::new(500.0, 0.0));
    assert_eq!(scene.selected_id(), None);
}

#[test]
fn garbage_bytes_are_codec_errors() {
    let err = SceneDocument::from_msgpack(&[0xc1, 0x00, 0xff]).unwrap_err();
    assert!(matches!(err, GardenError::Codec(_)));
    assert!(!err.is_retryable());
}

// ─── Scene invariants ────────────────────────────────────────────────────

#[test]
fn every_element_stays_inside_bounds() {
    let scene = sample_scene();
    let bounds = scene.bounds();
    for element in scene.elements() {
        assert!(bounds.contains(element.position), "{:?}", element.position);
    }
}

#[test]
fn ids_are_unique_across_many_adds() {
    let moss = ElementDefinition::new("moss", ElementCategory::Plant, "Moss", "🌿");
    let mut scene = Scene::default();
    for i in 0..200 {
        scene.add_element(&moss, Position::new(f64::from(i), 10.0));
    }
    let mut ids: Vec<_> = scene.elements().iter().map(|e| e.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 200);
}

#[test]
fn removing_selected_twice_keeps_selection_clear() {
    let mut scene = sample_scene();
    let target = scene.elements()[2].id;
    scene.select_element(target);
    assert!(scene.remove_element(target).is_some());
    assert_eq!(scene.selected_id(), None);
    assert!(scene.remove_element(target).is_none());
    assert_eq!(scene.selected_id(), None);
    assert_eq!(scene.len(), 3);
}

#[test]
fn view_and_config_agree() {
    let config = CanvasConfig::from_json(r#"{ "maxZoom": 2.0 }"#).expect("config");
    let mut view = ViewTransform::new(&config);
    for _ in 0..10 {
        view.zoom_in();
    }
    assert_eq!(view.scale(), 2.0);
    assert!(!view.can_zoom_in());
    assert_eq!(view.zoom_percent(), 200);

    let scene_point = view.to_scene_space(Point::new(220.0, 120.0), Point::new(20.0, 20.0));
    assert_eq!(scene_point, Position::new(100.0, 50.0));
}

//! Serializable scene snapshot exchanged with the persistence layer.
//!
//! JSON is the interchange format; MessagePack is the compact form used for
//! stored snapshots.

use crate::error::{GardenError, Result};
use crate::model::{PlacedElement, Scene, SceneBounds};
use serde::{Deserialize, Serialize};

/// `{ name, elements[] }`: a scene without its editing state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneDocument {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub elements: Vec<PlacedElement>,
}

impl SceneDocument {
    /// # Errors
    /// `GardenError::Codec` if the value cannot be encoded.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| GardenError::Codec(e.to_string()))
    }

    /// # Errors
    /// `GardenError::Codec` on malformed input.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| GardenError::Codec(e.to_string()))
    }

    /// # Errors
    /// `GardenError::Codec` if the value cannot be encoded.
    pub fn to_msgpack(&self) -> Result<Vec<u8>> {
        rmp_serde::to_vec_named(self).map_err(|e| GardenError::Codec(e.to_string()))
    }

    /// # Errors
    /// `GardenError::Codec` on malformed input.
    pub fn from_msgpack(bytes: &[u8]) -> Result<Self> {
        rmp_serde::from_slice(bytes).map_err(|e| GardenError::Codec(e.to_string()))
    }
}

impl Scene {
    /// Snapshot the scene's name and elements.
    pub fn to_document(&self) -> SceneDocument {
        SceneDocument {
            name: self.name.clone(),
            elements: self.elements().to_vec(),
        }
    }

    /// Rebuild a scene from a document. Positions are clamped into `bounds`
    /// and the selection starts empty.
    pub fn from_document(document: SceneDocument, bounds: SceneBounds) -> Self {
        let mut scene = Scene::new(bounds);
        scene.name = document.name;
        for element in document.elements {
            scene.push_restored(element);
        }
        scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::ElementId;
    use crate::model::{ElementCategory, ElementDefinition, ElementPatch, Position};
    use pretty_assertions::assert_eq;

    fn sample_scene() -> Scene {
        let mut scene = Scene::default();
        scene.name = "Evening Calm".into();
        let stone = ElementDefinition::new("river-stone", ElementCategory::Rock, "Stone", "🪨");
        let mut pond = ElementDefinition::new("koi-pond", ElementCategory::Water, "Pond", "🐟");
        pond.default_scale = 1.4;
        let a = scene.add_element(&stone, Position::new(40.0, 60.0));
        scene.add_element(&pond, Position::new(250.0, 200.0));
        scene.update_element(
            a.id,
            ElementPatch {
                rotation: Some(15.0),
                ..ElementPatch::default()
            },
        );
        scene
    }

    #[test]
    fn json_roundtrip_preserves_content() {
        let scene = sample_scene();
        let json = scene.to_document().to_json().unwrap();
        let restored = Scene::from_document(
            SceneDocument::from_json(&json).unwrap(),
            SceneBounds::default(),
        );
        assert_eq!(restored.name, scene.name);
        let before: Vec<_> = scene.elements().iter().map(|e| e.content()).collect();
        let after: Vec<_> = restored.elements().iter().map(|e| e.content()).collect();
        assert_eq!(after, before);
    }

    #[test]
    fn msgpack_roundtrip_preserves_document() {
        let document = sample_scene().to_document();
        let bytes = document.to_msgpack().unwrap();
        assert_eq!(SceneDocument::from_msgpack(&bytes).unwrap(), document);
    }

    #[test]
    fn from_document_clamps_and_repairs() {
        let json = r#"{
            "name": "Imported",
            "elements": [
                {"id":"element-x","type":"plant","elementId":"moss",
                 "position":{"x":900,"y":-3},"rotation":0,"scale":0}
            ]
        }"#;
        let scene = Scene::from_document(
            SceneDocument::from_json(json).unwrap(),
            SceneBounds::default(),
        );
        let element = scene.get(ElementId::intern("element-x")).unwrap();
        assert_eq!(element.position, Position::new(500.0, 0.0));
        assert_eq!(element.scale, 1.0);
        assert_eq!(scene.selected_id(), None);
    }

    #[test]
    fn missing_rotation_and_scale_default() {
        let json = r#"{"name":"n","elements":[{"id":"e1","type":"rock","elementId":"pebbles","position":{"x":1,"y":2}}]}"#;
        let doc = SceneDocument::from_json(json).unwrap();
        assert_eq!(doc.elements[0].rotation, 0.0);
        assert_eq!(doc.elements[0].scale, 1.0);
    }

    #[test]
    fn malformed_json_is_codec_error() {
        assert!(matches!(
            SceneDocument::from_json("{not json"),
            Err(GardenError::Codec(_))
        ));
    }
}

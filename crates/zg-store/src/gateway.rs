//! Scene Persistence Gateway contract.
//!
//! Every call is a one-shot async operation. Implementations store an
//! immutable snapshot of each document; callers keep editing their own
//! in-memory scene while a call is pending.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use zg_core::error::{GardenError, Result};
use zg_core::{PlacedElement, SceneDocument};

/// Gateway-assigned identifier of a stored scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SceneId(Uuid);

impl SceneId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SceneId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for SceneId {
    type Err = GardenError;

    /// An unparseable id cannot name any stored scene.
    fn from_str(s: &str) -> Result<Self> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| GardenError::scene_not_found(s))
    }
}

/// A persisted scene as returned by the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredScene {
    pub id: SceneId,
    pub name: String,
    pub elements: Vec<PlacedElement>,
    pub created_at: DateTime<Utc>,
    /// Preview image reference, stored as given.
    #[serde(default)]
    pub thumbnail: Option<String>,
    /// Ambient sound ids attached to the scene, stored as given.
    #[serde(default)]
    pub sounds: Vec<String>,
}

impl StoredScene {
    pub fn document(&self) -> SceneDocument {
        SceneDocument {
            name: self.name.clone(),
            elements: self.elements.clone(),
        }
    }
}

/// Fields to replace on `update`. `None` leaves the stored value as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScenePatch {
    pub name: Option<String>,
    pub elements: Option<Vec<PlacedElement>>,
    pub thumbnail: Option<String>,
    pub sounds: Option<Vec<String>>,
}

impl From<SceneDocument> for ScenePatch {
    fn from(document: SceneDocument) -> Self {
        Self {
            name: Some(document.name),
            elements: Some(document.elements),
            ..Self::default()
        }
    }
}

#[async_trait]
pub trait SceneGateway: Send + Sync {
    /// Store a new scene, assigning its id and creation timestamp.
    /// Thumbnail and sounds start empty; set them with `update`.
    async fn create(&self, document: SceneDocument) -> Result<StoredScene>;

    /// All stored scenes, newest first.
    async fn list(&self) -> Result<Vec<StoredScene>>;

    /// # Errors
    /// `GardenError::NotFound` if absent.
    async fn get(&self, id: SceneId) -> Result<StoredScene>;

    /// # Errors
    /// `GardenError::NotFound` if absent.
    async fn update(&self, id: SceneId, patch: ScenePatch) -> Result<StoredScene>;

    /// # Errors
    /// `GardenError::NotFound` if absent.
    async fn delete(&self, id: SceneId) -> Result<bool>;

    /// Copy a scene under a new id and timestamp, suffixing its name.
    ///
    /// # Errors
    /// `GardenError::NotFound` if absent.
    async fn duplicate(&self, id: SceneId) -> Result<StoredScene>;

    /// Scenes whose name contains `query`, case-insensitively. A blank
    /// query matches everything.
    async fn search(&self, query: &str) -> Result<Vec<StoredScene>> {
        let needle = query.trim().to_lowercase();
        let scenes = self.list().await?;
        if needle.is_empty() {
            return Ok(scenes);
        }
        Ok(scenes
            .into_iter()
            .filter(|s| s.name.to_lowercase().contains(&needle))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_id_parse_roundtrip() {
        let id = SceneId::new();
        let parsed: SceneId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn unparseable_scene_id_is_not_found() {
        let err = "garden-1".parse::<SceneId>().unwrap_err();
        assert!(matches!(err, GardenError::NotFound { .. }));
    }

    #[test]
    fn document_converts_into_full_patch() {
        let patch = ScenePatch::from(SceneDocument {
            name: "Renamed".into(),
            elements: Vec::new(),
        });
        assert_eq!(patch.name.as_deref(), Some("Renamed"));
        assert_eq!(patch.elements, Some(Vec::new()));
        assert_eq!(patch.thumbnail, None);
        assert_eq!(patch.sounds, None);
    }
}

//! In-memory gateway.
//!
//! Scenes are kept newest-first as MessagePack snapshots, so a stored scene
//! shares nothing with the editor state it was saved from.

use crate::gateway::{SceneGateway, SceneId, ScenePatch, StoredScene};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, info};
use std::time::Duration;
use tokio::sync::RwLock;
use zg_core::SceneDocument;
use zg_core::error::{GardenError, Result};

/// Name given to scenes created with a blank name.
pub const UNTITLED_NAME: &str = "Untitled Garden";

/// Suffix appended to the name of a duplicated scene.
pub const COPY_SUFFIX: &str = " (Copy)";

#[derive(Debug, Clone)]
struct Record {
    id: SceneId,
    created_at: DateTime<Utc>,
    snapshot: Vec<u8>,
    thumbnail: Option<String>,
    sounds: Vec<String>,
}

impl Record {
    fn new(id: SceneId, created_at: DateTime<Utc>, document: &SceneDocument) -> Result<Self> {
        Ok(Self {
            id,
            created_at,
            snapshot: document.to_msgpack()?,
            thumbnail: None,
            sounds: Vec::new(),
        })
    }

    fn load(&self) -> Result<StoredScene> {
        let document = SceneDocument::from_msgpack(&self.snapshot)?;
        Ok(StoredScene {
            id: self.id,
            name: document.name,
            elements: document.elements,
            created_at: self.created_at,
            thumbnail: self.thumbnail.clone(),
            sounds: self.sounds.clone(),
        })
    }
}

#[derive(Debug, Default)]
pub struct MemorySceneStore {
    records: RwLock<Vec<Record>>,
    latency: Option<Duration>,
}

impl MemorySceneStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every call by `latency`, to exercise hosts against a slow backend.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            records: RwLock::default(),
            latency: Some(latency),
        }
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }

    async fn insert_front(&self, record: Record) -> Result<StoredScene> {
        let stored = record.load()?;
        self.records.write().await.insert(0, record);
        Ok(stored)
    }
}

#[async_trait]
impl SceneGateway for MemorySceneStore {
    async fn create(&self, mut document: SceneDocument) -> Result<StoredScene> {
        self.simulate_latency().await;
        if document.name.trim().is_empty() {
            document.name = UNTITLED_NAME.to_string();
        }
        let record = Record::new(SceneId::new(), Utc::now(), &document)?;
        let stored = self.insert_front(record).await?;
        info!(
            "created scene {} {:?} ({} elements)",
            stored.id,
            stored.name,
            stored.elements.len()
        );
        Ok(stored)
    }

    async fn list(&self) -> Result<Vec<StoredScene>> {
        self.simulate_latency().await;
        self.records.read().await.iter().map(Record::load).collect()
    }

    async fn get(&self, id: SceneId) -> Result<StoredScene> {
        self.simulate_latency().await;
        self.records
            .read()
            .await
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| GardenError::scene_not_found(id.to_string()))?
            .load()
    }

    async fn update(&self, id: SceneId, patch: ScenePatch) -> Result<StoredScene> {
        self.simulate_latency().await;
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| GardenError::scene_not_found(id.to_string()))?;
        let mut document = record.load()?.document();
        if let Some(name) = patch.name {
            document.name = name;
        }
        if let Some(elements) = patch.elements {
            document.elements = elements;
        }
        record.snapshot = document.to_msgpack()?;
        if let Some(thumbnail) = patch.thumbnail {
            record.thumbnail = Some(thumbnail);
        }
        if let Some(sounds) = patch.sounds {
            record.sounds = sounds;
        }
        debug!("updated scene {id}");
        record.load()
    }

    async fn delete(&self, id: SceneId) -> Result<bool> {
        self.simulate_latency().await;
        let mut records = self.records.write().await;
        let index = records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| GardenError::scene_not_found(id.to_string()))?;
        records.remove(index);
        info!("deleted scene {id}");
        Ok(true)
    }

    async fn duplicate(&self, id: SceneId) -> Result<StoredScene> {
        let original = self.get(id).await?;
        let mut document = original.document();
        document.name.push_str(COPY_SUFFIX);
        let record = Record {
            thumbnail: original.thumbnail,
            sounds: original.sounds,
            ..Record::new(SceneId::new(), Utc::now(), &document)?
        };
        let stored = self.insert_front(record).await?;
        info!("duplicated scene {id} as {}", stored.id);
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use zg_core::{ElementCategory, ElementDefinition, Position, Scene};

    fn document(name: &str) -> SceneDocument {
        let mut scene = Scene::default();
        scene.name = name.to_string();
        let moss = ElementDefinition::new("moss", ElementCategory::Plant, "Moss", "🌿");
        scene.add_element(&moss, Position::new(30.0, 40.0));
        scene.to_document()
    }

    #[tokio::test]
    async fn create_assigns_id_and_lists_newest_first() {
        let store = MemorySceneStore::new();
        let first = store.create(document("First")).await.unwrap();
        let second = store.create(document("Second")).await.unwrap();
        assert_ne!(first.id, second.id);
        let names: Vec<_> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Second", "First"]);
    }

    #[tokio::test]
    async fn blank_name_becomes_untitled() {
        let store = MemorySceneStore::new();
        let stored = store.create(document("   ")).await.unwrap();
        assert_eq!(stored.name, UNTITLED_NAME);
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let store = MemorySceneStore::new();
        let err = store.get(SceneId::new()).await.unwrap_err();
        assert!(matches!(err, GardenError::NotFound { .. }));
    }

    #[tokio::test]
    async fn update_merges_patch_and_keeps_timestamp() {
        let store = MemorySceneStore::new();
        let stored = store.create(document("Before")).await.unwrap();
        let updated = store
            .update(
                stored.id,
                ScenePatch {
                    name: Some("After".into()),
                    ..ScenePatch::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "After");
        assert_eq!(updated.elements, stored.elements);
        assert_eq!(updated.created_at, stored.created_at);
        assert_eq!(store.get(stored.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn delete_then_delete_again() {
        let store = MemorySceneStore::new();
        let stored = store.create(document("Gone")).await.unwrap();
        assert!(store.delete(stored.id).await.unwrap());
        assert!(store.is_empty().await);
        assert!(matches!(
            store.delete(stored.id).await,
            Err(GardenError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn duplicate_suffixes_name_and_copies_elements() {
        let store = MemorySceneStore::new();
        let stored = store.create(document("Moss Bed")).await.unwrap();
        let copy = store.duplicate(stored.id).await.unwrap();
        assert_ne!(copy.id, stored.id);
        assert_eq!(copy.name, "Moss Bed (Copy)");
        assert_eq!(copy.elements, stored.elements);
        assert!(copy.created_at >= stored.created_at);
        assert_eq!(store.list().await.unwrap()[0].id, copy.id);
    }

    #[tokio::test]
    async fn thumbnail_and_sounds_pass_through() {
        let store = MemorySceneStore::new();
        let stored = store.create(document("Rain")).await.unwrap();
        assert_eq!(stored.thumbnail, None);
        assert!(stored.sounds.is_empty());

        let patch = ScenePatch {
            thumbnail: Some("rain.png".into()),
            sounds: Some(vec!["rain".into(), "chimes".into()]),
            ..ScenePatch::default()
        };
        let updated = store.update(stored.id, patch).await.unwrap();
        assert_eq!(updated.thumbnail.as_deref(), Some("rain.png"));
        assert_eq!(updated.name, "Rain");

        let copy = store.duplicate(stored.id).await.unwrap();
        assert_eq!(copy.thumbnail, updated.thumbnail);
        assert_eq!(copy.sounds, vec!["rain", "chimes"]);
    }

    #[tokio::test]
    async fn search_is_case_insensitive() {
        let store = MemorySceneStore::new();
        store.create(document("Morning Mist")).await.unwrap();
        store.create(document("Evening Calm")).await.unwrap();
        let hits = store.search("MIST").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Morning Mist");
        assert_eq!(store.search("  ").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn latency_still_completes() {
        let store = MemorySceneStore::with_latency(Duration::from_millis(5));
        let stored = store.create(document("Slow")).await.unwrap();
        assert_eq!(store.get(stored.id).await.unwrap().name, "Slow");
        assert_eq!(store.len().await, 1);
    }
}

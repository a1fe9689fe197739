//! Host-side save flow.
//!
//! A `SaveSession` validates a document before any gateway call and refuses
//! to start a second save while one is still pending. It only ever sees an
//! owned snapshot, so the editor keeps mutating its own scene meanwhile.

use crate::gateway::{SceneGateway, SceneId, ScenePatch, StoredScene};
use log::{info, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use zg_core::SceneDocument;
use zg_core::error::{GardenError, Result, ValidationError};

/// Check that a document is worth persisting.
pub fn validate(document: &SceneDocument) -> Result<(), ValidationError> {
    if document.name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if document.elements.is_empty() {
        return Err(ValidationError::EmptyScene);
    }
    Ok(())
}

pub struct SaveSession<G: SceneGateway + ?Sized> {
    gateway: Arc<G>,
    saving: AtomicBool,
}

/// Clears the in-progress flag however the save ends.
struct SavingGuard<'a>(&'a AtomicBool);

impl Drop for SavingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<G: SceneGateway + ?Sized> SaveSession<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            saving: AtomicBool::new(false),
        }
    }

    pub fn gateway(&self) -> &Arc<G> {
        &self.gateway
    }

    pub fn is_saving(&self) -> bool {
        self.saving.load(Ordering::Acquire)
    }

    /// Persist `document` as a new scene.
    ///
    /// # Errors
    /// `Validation` before any gateway call, `SaveInProgress` while another
    /// save is pending, or whatever the gateway reports.
    pub async fn save(&self, document: SceneDocument) -> Result<StoredScene> {
        self.check(&document)?;
        let _guard = self.begin()?;
        let stored = self.gateway.create(document).await?;
        info!("saved scene {} {:?}", stored.id, stored.name);
        Ok(stored)
    }

    /// Overwrite the stored scene `id` with `document`.
    pub async fn save_existing(&self, id: SceneId, document: SceneDocument) -> Result<StoredScene> {
        self.check(&document)?;
        let _guard = self.begin()?;
        let stored = self.gateway.update(id, ScenePatch::from(document)).await?;
        info!("saved over scene {}", stored.id);
        Ok(stored)
    }

    /// Fetch a stored scene as a document ready for `CanvasController::load_document`.
    pub async fn open(&self, id: SceneId) -> Result<SceneDocument> {
        let stored = self.gateway.get(id).await?;
        info!("opened scene {id} ({} elements)", stored.elements.len());
        Ok(stored.document())
    }

    fn check(&self, document: &SceneDocument) -> Result<()> {
        validate(document).map_err(|e| {
            warn!("save rejected: {e}");
            GardenError::from(e)
        })
    }

    fn begin(&self) -> Result<SavingGuard<'_>> {
        if self
            .saving
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("save rejected: another save is pending");
            return Err(GardenError::SaveInProgress);
        }
        Ok(SavingGuard(&self.saving))
    }
}

//! Error taxonomy shared by the catalog, the editor and the persistence layer.
//!
//! None of these are fatal: every variant is reported to the user and leaves
//! the editing session intact.

use std::fmt;

/// What kind of record a `NotFound` refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Element,
    Scene,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Element => f.write_str("element"),
            Resource::Scene => f.write_str("scene"),
        }
    }
}

/// A save request rejected before it reached the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("scene name must not be empty")]
    EmptyName,
    #[error("scene must contain at least one element")]
    EmptyScene,
}

#[derive(Debug, thiserror::Error)]
pub enum GardenError {
    #[error("{resource} not found: {id}")]
    NotFound { resource: Resource, id: String },
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("gateway failure: {0}")]
    Gateway(String),
    #[error("a save is already in progress")]
    SaveInProgress,
    #[error("codec error: {0}")]
    Codec(String),
}

impl GardenError {
    pub fn element_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            resource: Resource::Element,
            id: id.into(),
        }
    }

    pub fn scene_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            resource: Resource::Scene,
            id: id.into(),
        }
    }

    /// Transient failures the user can simply retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Gateway(_) | Self::SaveInProgress)
    }
}

pub type Result<T, E = GardenError> = std::result::Result<T, E>;

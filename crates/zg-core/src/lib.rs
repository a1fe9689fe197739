pub mod catalog;
pub mod config;
pub mod document;
pub mod error;
pub mod id;
pub mod model;
pub mod transform;

pub use catalog::{ElementCatalog, StaticCatalog};
pub use config::CanvasConfig;
pub use document::SceneDocument;
pub use error::{GardenError, Resource, ValidationError};
pub use id::ElementId;
pub use model::*;
pub use transform::{ViewState, ViewTransform, to_scene_space, to_screen_space};

// Re-export kurbo geometry so downstream crates don't need a direct dependency
pub use kurbo::{Point, Rect, Vec2};

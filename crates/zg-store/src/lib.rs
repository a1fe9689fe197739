//! Scene persistence for the garden editor.
//!
//! `SceneGateway` is the async contract a backend implements;
//! `MemorySceneStore` is the in-process implementation and `SaveSession`
//! the host-side flow that validates and serializes saves.

pub mod gateway;
pub mod memory;
pub mod session;

pub use gateway::{SceneGateway, SceneId, ScenePatch, StoredScene};
pub use memory::MemorySceneStore;
pub use session::{SaveSession, validate};

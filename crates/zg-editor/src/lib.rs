//! Interactive editing layer for the garden canvas.
//!
//! Input events go in, `CanvasIntent`s come out. Everything here runs
//! synchronously on the thread that receives pointer events.

pub mod canvas;
pub mod drag;
pub mod hit;
pub mod input;
pub mod pointer;
pub mod shortcuts;

pub use canvas::{CanvasController, CanvasIntent, ControllerState, ElementView};
pub use drag::{CreationDrag, CreationDragState, DRAG_MIME, RepositionDrag};
pub use input::{InputEvent, Modifiers};
pub use pointer::{PointerHub, PointerSignal, PointerSubscription};

//! WebGPU rendering module
//!
//! The scene is built as colored triangles in pixel space and mapped to NDC
//! at upload time. Overlay and HUD text live in the DOM.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{build_scene, clear_color};
pub use vertex::Vertex;

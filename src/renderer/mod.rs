//! WebGPU rendering module
//!
//! The scene is rebuilt as a triangle list every frame and drawn with a
//! single flat-color pipeline.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{SceneOptions, build_scene};
pub use vertex::Vertex;

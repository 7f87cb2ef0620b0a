//! WebGPU rendering module
//!
//! The scene is rebuilt from game state every frame as layered triangle
//! lists, then drawn by one alpha-blended pipeline.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderInitError, RenderState};
pub use scene::{Layer, LayerKind, Scene, build_scene};
pub use vertex::Vertex;

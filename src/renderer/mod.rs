//! WebGPU rendering module
//!
//! The scene is rebuilt every frame as one flat-coloured triangle list in
//! surface pixels; the pipeline maps it to clip space and draws it in a
//! single pass.

pub mod glyphs;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod sprites;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{SceneOptions, build_scene};
pub use vertex::Vertex;

//! Rendering: draw lists built from game state, tessellated for the GPU

pub mod draw;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use draw::{DrawCommand, DrawList, build_frame};
pub use pipeline::RenderState;
pub use vertex::Vertex;

//! WebGPU rendering module
//!
//! Rasterizes the rectangle commands of a [`crate::render::DrawList`] as
//! flat-colored triangles. Text is left to the host page.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, pixel_to_ndc};
pub use vertex::Vertex;

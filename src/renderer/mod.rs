//! Rendering module
//!
//! Games describe each frame as a list of flat-coloured triangles (`Frame`);
//! the WebGPU pipeline uploads and presents that list.

pub mod font;
pub mod frame;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use frame::{Align, Frame};
pub use pipeline::RenderState;
pub use vertex::{Vertex, colors};

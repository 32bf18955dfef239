//! Rendering module
//!
//! `frame` paints game state onto any `Canvas`. `MeshCanvas` turns those
//! primitives into triangles that `RenderState` draws with WebGPU.

pub mod canvas;
pub mod frame;
pub mod mesh;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use canvas::{Canvas, Color, DisplayList, DrawCommand};
pub use frame::draw_frame;
pub use mesh::{MeshCanvas, TextLabel};
pub use pipeline::RenderState;

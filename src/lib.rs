//! Recursive ray tracer for scenes of spheres and wall quads lit by point
//! lights, with polled render progress.

pub mod config;
pub mod domain;
pub mod error;
pub mod math;
pub mod render;

pub use config::SceneDescription;
pub use error::RenderError;
pub use render::{Renderer, Viewport};

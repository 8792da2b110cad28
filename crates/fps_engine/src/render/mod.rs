//! Renderer-facing data
//!
//! The engine does not draw. It produces a camera (view and projection
//! matrices) and mesh data that a backend consumes.

pub mod camera;
pub mod mesh;

pub use camera::{Camera, CameraConfig, Orientation, Projection};
pub use mesh::{Mesh, Vertex};

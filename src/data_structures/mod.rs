//! Scene data structures: transforms, materials, lights and textures.
//!
//! - `transform` composes the model matrix of a single draw
//! - `material` is the Phong material record looked up by tag
//! - `light` holds light sources and the fixed-size light rig
//! - `texture` contains the GPU texture wrapper and creation utilities

pub mod light;
pub mod material;
pub mod texture;
pub mod transform;

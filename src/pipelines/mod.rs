//! Render pipeline and uniform plumbing for the scene shader.
//!
//! - `scene` defines the vertex layout, the WGSL shader and the pipeline
//! - `uniforms` holds the GPU uniform structs and the wgpu
//!   [`ShaderSink`](crate::shader::ShaderSink)

pub mod scene;
pub mod uniforms;

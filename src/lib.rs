//! still-life
//!
//! Texture and material registries plus the shader-parameter binding layer of
//! a static wgpu scene. Textures and materials are registered under tags once
//! during setup; before every draw a [`shader::ShaderPusher`] resolves those
//! tags and writes transform, colour/texture, UV scale and material values
//! into a shader sink. Mesh geometry and the per-object scene script live
//! outside this crate.
//!
//! High-level modules
//! - `context`: headless device/queue and constructors for the GPU backends
//! - `data_structures`: transforms, materials, lights and GPU textures
//! - `error`: the [`error::SceneError`] taxonomy
//! - `mesh`: primitive kinds and the mesh-drawing collaborator trait
//! - `pipelines`: scene shader, pipeline and uniform buffers
//! - `registry`: the texture slot table and the material table
//! - `resources`: image decoding and wgpu texture uploads
//! - `scene`: setup-time bundle of registries and lights
//! - `shader`: the shader state pusher and the sink it writes to
//!

pub mod context;
pub mod data_structures;
pub mod error;
pub mod mesh;
pub mod pipelines;
pub mod registry;
pub mod resources;
pub mod scene;
pub mod shader;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath;
pub use error::SceneError;
pub use wgpu;

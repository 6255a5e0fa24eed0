//! Error types for texture, material and light registration.

use thiserror::Error;

/// Everything that can go wrong while populating the scene registries.
///
/// None of these are fatal: callers log them and keep building the scene, the
/// affected object then renders untextured or with stale material state.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("could not decode image for texture `{tag}`: {reason}")]
    DecodeFailed { tag: String, reason: String },

    #[error("all {capacity} texture slots are in use, cannot register `{tag}`")]
    CapacityExceeded { tag: String, capacity: usize },

    #[error("tag `{tag}` is already registered")]
    DuplicateTag { tag: String },

    #[error("a light rig holds at most {capacity} light sources")]
    TooManyLights { capacity: usize },

    #[error("could not upload texture `{tag}`: {reason}")]
    Upload { tag: String, reason: String },
}

/// Result type alias for registry operations
pub type Result<T> = std::result::Result<T, SceneError>;

//! Tag-addressed lookup tables populated during scene setup.
//!
//! - `texture` maps tags to uploaded textures and the slot each is bound to
//! - `material` maps tags to lighting materials

pub mod material;
pub mod texture;

//! Everything a frame needs that is prepared once: textures, materials, lights.
//!
//! [`SceneAssets`] splits scene work into the two phases the renderer runs in.
//! Setup fills the registries and the light rig; per frame a [`ShaderPusher`]
//! borrows them read-only. Teardown releases the textures.

use std::path::Path;

use crate::{
    data_structures::{
        light::{LightSource, Lighting},
        material::Material,
    },
    error::Result,
    registry::{
        material::MaterialRegistry,
        texture::{TextureBackend, TextureRegistry},
    },
    shader::{ShaderPusher, ShaderSink},
};

#[derive(Debug)]
pub struct SceneAssets<H> {
    pub textures: TextureRegistry<H>,
    pub materials: MaterialRegistry,
    pub lighting: Lighting,
}

impl<H> SceneAssets<H> {
    pub fn new() -> Self {
        Self {
            textures: TextureRegistry::new(),
            materials: MaterialRegistry::new(),
            lighting: Lighting::new(),
        }
    }

    /// Load and bind textures, skipping the ones that fail. Returns how many loaded.
    pub fn load_textures<B, P>(&mut self, backend: &mut B, textures: &[(&str, P)]) -> usize
    where
        B: TextureBackend<Handle = H>,
        P: AsRef<Path>,
    {
        self.textures.load_all(backend, textures)
    }

    pub fn define_materials<'t>(
        &mut self,
        materials: impl IntoIterator<Item = (&'t str, Material)>,
    ) -> Result<()> {
        for (tag, material) in materials {
            self.materials.add(tag, material)?;
        }
        Ok(())
    }

    pub fn add_light(&mut self, light: LightSource) -> Result<usize> {
        self.lighting.add(light)
    }

    /// A pusher over these assets with the lights already written to `sink`.
    pub fn pusher<S: ShaderSink>(&self, sink: Option<S>) -> ShaderPusher<'_, S, H> {
        let mut pusher = ShaderPusher::new(sink, &self.textures, &self.materials);
        if !self.lighting.is_empty() {
            pusher.set_lights(&self.lighting);
        }
        pusher
    }

    pub fn release<B>(&mut self, backend: &mut B)
    where
        B: TextureBackend<Handle = H>,
    {
        self.textures.release_all(backend);
    }
}

impl<H> Default for SceneAssets<H> {
    fn default() -> Self {
        Self::new()
    }
}

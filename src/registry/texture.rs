//! Texture slot table.
//!
//! Textures are registered once during scene setup and looked up by tag while
//! rendering. The slot of an entry is its index in registration order, which
//! is also the texture unit it is bound to by [`TextureRegistry::bind_all`].
//!
//! The registry does not talk to the GPU itself. Uploading, binding and
//! destroying go through a [`TextureBackend`], so the table logic runs the
//! same against wgpu ([`GpuTextures`](crate::resources::texture::GpuTextures))
//! or an in-memory fake.

use std::path::Path;

use crate::{
    error::{Result, SceneError},
    resources::texture::{DecodedImage, decode_bytes, decode_file},
};

/// Number of texture units the scene shader samples from.
pub const MAX_TEXTURE_SLOTS: usize = 16;

/// The graphics side of texture management.
pub trait TextureBackend {
    type Handle;

    /// Upload decoded pixels as a repeat-wrapped, linearly filtered 2D texture.
    fn upload(
        &mut self,
        tag: &str,
        image: &DecodedImage,
        options: &TextureOptions,
    ) -> Result<Self::Handle>;

    /// Make `handle` the texture sampled through `slot`.
    fn bind(&mut self, slot: usize, handle: &Self::Handle);

    fn unbind(&mut self, slot: usize);

    /// Free the GPU resource behind `handle`.
    fn release(&mut self, handle: Self::Handle);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextureOptions {
    /// Flip rows on load so UV (0, 0) addresses the bottom-left texel.
    pub flip_vertically: bool,
    pub generate_mipmaps: bool,
}

impl Default for TextureOptions {
    fn default() -> Self {
        Self {
            flip_vertically: true,
            generate_mipmaps: true,
        }
    }
}

#[derive(Clone, Debug)]
pub struct TextureEntry<H> {
    pub tag: String,
    pub handle: H,
    pub slot: usize,
}

#[derive(Debug)]
pub struct TextureRegistry<H> {
    entries: Vec<TextureEntry<H>>,
    capacity: usize,
    options: TextureOptions,
}

impl<H> TextureRegistry<H> {
    pub fn new() -> Self {
        Self::with_capacity(MAX_TEXTURE_SLOTS)
    }

    /// A registry with fewer than [`MAX_TEXTURE_SLOTS`] slots. Larger
    /// capacities are clamped since the shader cannot address them.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity.min(MAX_TEXTURE_SLOTS)),
            capacity: capacity.min(MAX_TEXTURE_SLOTS),
            options: TextureOptions::default(),
        }
    }

    pub fn with_options(mut self, options: TextureOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &TextureOptions {
        &self.options
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TextureEntry<H>> {
        self.entries.iter()
    }

    /// Decode the image at `path` and register it under `tag`.
    pub fn register_file<B>(
        &mut self,
        backend: &mut B,
        tag: &str,
        path: impl AsRef<Path>,
    ) -> Result<&H>
    where
        B: TextureBackend<Handle = H>,
    {
        self.check_free(tag)?;
        let image = decode_file(tag, path.as_ref(), self.options.flip_vertically)?;
        self.register_image(backend, tag, &image)
    }

    /// Decode in-memory image file contents and register them under `tag`.
    pub fn register_bytes<B>(&mut self, backend: &mut B, tag: &str, bytes: &[u8]) -> Result<&H>
    where
        B: TextureBackend<Handle = H>,
    {
        self.check_free(tag)?;
        let image = decode_bytes(tag, bytes, self.options.flip_vertically)?;
        self.register_image(backend, tag, &image)
    }

    /// Upload already decoded pixels and take the next free slot.
    pub fn register_image<B>(
        &mut self,
        backend: &mut B,
        tag: &str,
        image: &DecodedImage,
    ) -> Result<&H>
    where
        B: TextureBackend<Handle = H>,
    {
        self.check_free(tag)?;
        if !matches!(image.channels, 3 | 4) {
            return Err(SceneError::DecodeFailed {
                tag: tag.to_string(),
                reason: format!("images with {} channels are not supported", image.channels),
            });
        }
        let handle = backend.upload(tag, image, &self.options)?;
        let slot = self.entries.len();
        self.entries.push(TextureEntry {
            tag: tag.to_string(),
            handle,
            slot,
        });
        Ok(&self.entries[slot].handle)
    }

    /// Register every `(tag, path)` pair in order and bind the result.
    ///
    /// A texture that fails to load is logged and skipped, the remaining ones
    /// are still registered. Returns how many textures were registered.
    pub fn load_all<B, P>(&mut self, backend: &mut B, textures: &[(&str, P)]) -> usize
    where
        B: TextureBackend<Handle = H>,
        P: AsRef<Path>,
    {
        let mut loaded = 0;
        for (tag, path) in textures {
            match self.register_file(backend, tag, path) {
                Ok(_) => loaded += 1,
                Err(e) => log::error!("Skipping texture {}: {e}", path.as_ref().display()),
            }
        }
        self.bind_all(backend);
        loaded
    }

    /// Bind every registered texture to its slot.
    pub fn bind_all<B>(&self, backend: &mut B)
    where
        B: TextureBackend<Handle = H>,
    {
        for entry in &self.entries {
            backend.bind(entry.slot, &entry.handle);
        }
    }

    pub fn find_handle(&self, tag: &str) -> Option<&H> {
        self.find(tag).map(|entry| &entry.handle)
    }

    pub fn find_slot(&self, tag: &str) -> Option<usize> {
        self.find(tag).map(|entry| entry.slot)
    }

    /// Unbind and destroy every texture, leaving the registry empty.
    pub fn release_all<B>(&mut self, backend: &mut B)
    where
        B: TextureBackend<Handle = H>,
    {
        for entry in self.entries.drain(..) {
            backend.unbind(entry.slot);
            backend.release(entry.handle);
        }
    }

    fn find(&self, tag: &str) -> Option<&TextureEntry<H>> {
        self.entries.iter().find(|entry| entry.tag == tag)
    }

    fn check_free(&self, tag: &str) -> Result<()> {
        if self.find(tag).is_some() {
            return Err(SceneError::DuplicateTag {
                tag: tag.to_string(),
            });
        }
        if self.entries.len() >= self.capacity {
            return Err(SceneError::CapacityExceeded {
                tag: tag.to_string(),
                capacity: self.capacity,
            });
        }
        Ok(())
    }
}

impl<H> Default for TextureRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

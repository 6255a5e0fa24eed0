use std::path::Path;

use image::{DynamicImage, RgbImage, RgbaImage};

use crate::{
    data_structures::texture::{Texture, create_default_sampler},
    error::{Result, SceneError},
    registry::texture::{MAX_TEXTURE_SLOTS, TextureBackend, TextureOptions},
};

/// Pixel data of a decoded image, tightly packed, 8 bits per channel.
///
/// Only RGB (3 channels) and RGBA (4 channels) images are accepted.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    pub fn from_dynamic(tag: &str, img: DynamicImage) -> Result<Self> {
        let (width, height) = (img.width(), img.height());
        let channels = img.color().channel_count();
        let pixels = match channels {
            3 => img.to_rgb8().into_raw(),
            4 => img.to_rgba8().into_raw(),
            n => {
                return Err(SceneError::DecodeFailed {
                    tag: tag.to_string(),
                    reason: format!("images with {n} channels are not supported"),
                });
            }
        };
        Ok(Self {
            width,
            height,
            channels,
            pixels,
        })
    }

    /// RGBA view of the pixels, `None` if the buffer does not match the
    /// declared dimensions.
    pub fn to_rgba8(&self) -> Option<RgbaImage> {
        match self.channels {
            4 => RgbaImage::from_raw(self.width, self.height, self.pixels.clone()),
            3 => RgbImage::from_raw(self.width, self.height, self.pixels.clone())
                .map(|rgb| DynamicImage::ImageRgb8(rgb).to_rgba8()),
            _ => None,
        }
    }
}

pub fn load_binary(path: &Path) -> std::io::Result<Vec<u8>> {
    std::fs::read(path)
}

/// Decode image file contents (PNG, JPEG, BMP).
pub fn decode_bytes(tag: &str, bytes: &[u8], flip_vertically: bool) -> Result<DecodedImage> {
    let img = image::load_from_memory(bytes).map_err(|e| SceneError::DecodeFailed {
        tag: tag.to_string(),
        reason: e.to_string(),
    })?;
    // Image rows are stored top-down, texture coordinates start bottom-left.
    let img = if flip_vertically { img.flipv() } else { img };
    DecodedImage::from_dynamic(tag, img)
}

pub fn decode_file(tag: &str, path: &Path, flip_vertically: bool) -> Result<DecodedImage> {
    let bytes = load_binary(path).map_err(|e| SceneError::DecodeFailed {
        tag: tag.to_string(),
        reason: format!("{}: {e}", path.display()),
    })?;
    let decoded = decode_bytes(tag, &bytes, flip_vertically)?;
    log::info!(
        "Loaded image {}, width: {}, height: {}, channels: {}",
        path.display(),
        decoded.width,
        decoded.height,
        decoded.channels
    );
    Ok(decoded)
}

/// Bind group layout with one 2D texture per slot followed by the shared sampler.
///
/// Bindings `0..MAX_TEXTURE_SLOTS` are the texture slots, binding
/// `MAX_TEXTURE_SLOTS` is the sampler.
pub fn texture_slots_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    let entries: Vec<wgpu::BindGroupLayoutEntry> = (0..MAX_TEXTURE_SLOTS as u32)
        .map(|binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                multisampled: false,
                view_dimension: wgpu::TextureViewDimension::D2,
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
            },
            count: None,
        })
        .chain(std::iter::once(wgpu::BindGroupLayoutEntry {
            binding: MAX_TEXTURE_SLOTS as u32,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
            count: None,
        }))
        .collect();

    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &entries,
        label: Some("texture_slots_bind_group_layout"),
    })
}

/// Texture uploads and slot bindings on a wgpu device.
///
/// Binding only records which view occupies a slot; [`bind_group`](Self::bind_group)
/// turns the current slot table into a bind group for the scene pipeline.
pub struct GpuTextures {
    device: wgpu::Device,
    queue: wgpu::Queue,
    layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    placeholder: Texture,
    slots: Vec<Option<wgpu::TextureView>>,
}

impl GpuTextures {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        Self {
            device: device.clone(),
            queue: queue.clone(),
            layout: texture_slots_layout(device),
            sampler: create_default_sampler(device),
            placeholder: Texture::placeholder(device, queue),
            slots: vec![None; MAX_TEXTURE_SLOTS],
        }
    }

    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    pub fn is_bound(&self, slot: usize) -> bool {
        self.slots.get(slot).is_some_and(Option::is_some)
    }

    pub fn bound_slots(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn bind_group(&self) -> wgpu::BindGroup {
        let mut entries: Vec<wgpu::BindGroupEntry> = self
            .slots
            .iter()
            .enumerate()
            .map(|(binding, view)| wgpu::BindGroupEntry {
                binding: binding as u32,
                resource: wgpu::BindingResource::TextureView(
                    view.as_ref().unwrap_or(&self.placeholder.view),
                ),
            })
            .collect();
        entries.push(wgpu::BindGroupEntry {
            binding: MAX_TEXTURE_SLOTS as u32,
            resource: wgpu::BindingResource::Sampler(&self.sampler),
        });

        self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &self.layout,
            entries: &entries,
            label: Some("texture_slots_bind_group"),
        })
    }
}

impl TextureBackend for GpuTextures {
    type Handle = Texture;

    fn upload(
        &mut self,
        tag: &str,
        image: &DecodedImage,
        options: &TextureOptions,
    ) -> Result<Texture> {
        Texture::from_decoded(
            &self.device,
            &self.queue,
            image,
            tag,
            options.generate_mipmaps,
        )
    }

    fn bind(&mut self, slot: usize, handle: &Texture) {
        if let Some(entry) = self.slots.get_mut(slot) {
            *entry = Some(handle.view.clone());
        }
    }

    fn unbind(&mut self, slot: usize) {
        if let Some(entry) = self.slots.get_mut(slot) {
            *entry = None;
        }
    }

    fn release(&mut self, handle: Texture) {
        handle.texture.destroy();
    }
}

use std::{
    collections::HashMap,
    io::Cursor,
    path::PathBuf,
    sync::atomic::{AtomicUsize, Ordering},
};

use cgmath::Matrix4;
use image::{DynamicImage, ImageFormat};
use still_life::{
    data_structures::{light::LightSource, material::Material},
    error::{Result, SceneError},
    mesh::{MeshPrimitives, Primitive},
    registry::texture::{TextureBackend, TextureOptions},
    resources::texture::DecodedImage,
    shader::{DrawId, ShaderSink},
};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// PNG file contents of a solid image with `channels` channels (1 to 4).
pub fn png_bytes(width: u32, height: u32, channels: u8) -> Vec<u8> {
    let img = match channels {
        1 => DynamicImage::new_luma8(width, height),
        2 => DynamicImage::new_luma_a8(width, height),
        3 => DynamicImage::new_rgb8(width, height),
        _ => DynamicImage::new_rgba8(width, height),
    };
    let mut bytes = Cursor::new(Vec::new());
    img.write_to(&mut bytes, ImageFormat::Png)
        .expect("failed to encode fixture png");
    bytes.into_inner()
}

static FIXTURE_DIRS: AtomicUsize = AtomicUsize::new(0);

/// Writes a PNG fixture into a fresh temp directory and returns its path.
pub fn png_file(test: &str, name: &str, width: u32, height: u32, channels: u8) -> PathBuf {
    let n = FIXTURE_DIRS.fetch_add(1, Ordering::Relaxed);
    let dir = std::env::temp_dir()
        .join("still-life-tests")
        .join(format!("{test}-{}-{n}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("failed to create fixture dir");
    let path = dir.join(name);
    std::fs::write(&path, png_bytes(width, height, channels)).expect("failed to write fixture");
    path
}

pub fn rgb_image(width: u32, height: u32) -> DecodedImage {
    DecodedImage {
        width,
        height,
        channels: 3,
        pixels: vec![128; (width * height * 3) as usize],
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FakeHandle(pub u32);

#[derive(Clone, Debug, PartialEq)]
pub struct Upload {
    pub tag: String,
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    pub options: TextureOptions,
}

/// In-memory texture backend: hands out sequential ids and tracks bindings.
#[derive(Debug, Default)]
pub struct FakeTextures {
    next_id: u32,
    pub uploads: Vec<Upload>,
    pub bindings: HashMap<usize, FakeHandle>,
    pub bind_calls: usize,
    pub released: Vec<FakeHandle>,
    pub reject_tag: Option<String>,
}

impl FakeTextures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting(tag: &str) -> Self {
        Self {
            reject_tag: Some(tag.to_string()),
            ..Default::default()
        }
    }
}

impl TextureBackend for FakeTextures {
    type Handle = FakeHandle;

    fn upload(
        &mut self,
        tag: &str,
        image: &DecodedImage,
        options: &TextureOptions,
    ) -> Result<FakeHandle> {
        if self.reject_tag.as_deref() == Some(tag) {
            return Err(SceneError::Upload {
                tag: tag.to_string(),
                reason: "rejected by fake backend".to_string(),
            });
        }
        self.uploads.push(Upload {
            tag: tag.to_string(),
            width: image.width,
            height: image.height,
            channels: image.channels,
            options: *options,
        });
        self.next_id += 1;
        Ok(FakeHandle(self.next_id))
    }

    fn bind(&mut self, slot: usize, handle: &FakeHandle) {
        self.bind_calls += 1;
        self.bindings.insert(slot, *handle);
    }

    fn unbind(&mut self, slot: usize) {
        self.bindings.remove(&slot);
    }

    fn release(&mut self, handle: FakeHandle) {
        self.released.push(handle);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Write {
    Model(Matrix4<f32>),
    UseTexture(bool),
    Color([f32; 4]),
    TextureSlot(Option<usize>),
    UvScale([f32; 2]),
    Material(Material),
    Light(usize, LightSource),
    LightCount(usize),
    Lighting(bool),
}

/// Shader state as the shader would see it at a draw call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SinkState {
    pub model: Option<Matrix4<f32>>,
    pub use_texture: Option<bool>,
    pub color: Option<[f32; 4]>,
    pub texture_slot: Option<Option<usize>>,
    pub uv_scale: Option<[f32; 2]>,
    pub material: Option<Material>,
    pub lights: HashMap<usize, LightSource>,
    pub light_count: Option<usize>,
    pub lighting: Option<bool>,
}

/// Shader sink that logs every write and snapshots the state on commit.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub writes: Vec<Write>,
    pub state: SinkState,
    pub commits: Vec<SinkState>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ShaderSink for RecordingSink {
    fn set_model(&mut self, model: &Matrix4<f32>) {
        self.writes.push(Write::Model(*model));
        self.state.model = Some(*model);
    }

    fn set_use_texture(&mut self, enabled: bool) {
        self.writes.push(Write::UseTexture(enabled));
        self.state.use_texture = Some(enabled);
    }

    fn set_color(&mut self, color: [f32; 4]) {
        self.writes.push(Write::Color(color));
        self.state.color = Some(color);
    }

    fn set_texture_slot(&mut self, slot: Option<usize>) {
        self.writes.push(Write::TextureSlot(slot));
        self.state.texture_slot = Some(slot);
    }

    fn set_uv_scale(&mut self, scale: [f32; 2]) {
        self.writes.push(Write::UvScale(scale));
        self.state.uv_scale = Some(scale);
    }

    fn set_material(&mut self, material: &Material) {
        self.writes.push(Write::Material(*material));
        self.state.material = Some(*material);
    }

    fn set_light(&mut self, index: usize, light: &LightSource) {
        self.writes.push(Write::Light(index, *light));
        self.state.lights.insert(index, *light);
    }

    fn set_light_count(&mut self, count: usize) {
        self.writes.push(Write::LightCount(count));
        self.state.light_count = Some(count);
    }

    fn set_lighting(&mut self, enabled: bool) {
        self.writes.push(Write::Lighting(enabled));
        self.state.lighting = Some(enabled);
    }

    fn commit(&mut self) -> DrawId {
        self.commits.push(self.state.clone());
        DrawId(self.commits.len() as u32 - 1)
    }
}

#[derive(Debug, Default)]
pub struct RecordingMeshes {
    pub draws: Vec<(Primitive, DrawId)>,
}

impl MeshPrimitives for RecordingMeshes {
    fn draw(&mut self, primitive: Primitive, draw: DrawId) {
        self.draws.push((primitive, draw));
    }
}

pub fn gold() -> Material {
    Material::new([0.2, 0.2, 0.1], 0.4, [0.3, 0.3, 0.2], [0.6, 0.5, 0.4], 60.0)
}

pub fn wood() -> Material {
    Material::new([0.4, 0.3, 0.1], 0.2, [0.3, 0.2, 0.1], [0.1, 0.1, 0.1], 0.3)
}

pub fn tile() -> Material {
    Material::new(
        [0.8549, 0.7529, 0.6078],
        0.3,
        [0.3, 0.2, 0.1],
        [0.4, 0.5, 0.6],
        25.0,
    )
}

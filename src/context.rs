use crate::{
    data_structures::texture::Texture,
    pipelines::{scene::mk_scene_pipeline, uniforms::UniformSink},
    resources::texture::GpuTextures,
};

/// Device and queue the scene resources are created on.
///
/// The context never owns a surface: presenting, clearing and viewport setup
/// belong to whoever drives the frame.
#[derive(Debug, Clone)]
pub struct Context {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
}

impl Context {
    pub fn new(device: wgpu::Device, queue: wgpu::Queue) -> Self {
        Self { device, queue }
    }

    /// Create a device without any window or surface.
    pub async fn headless() -> anyhow::Result<Self> {
        log::info!("WGPU headless setup");
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..wgpu::InstanceDescriptor::new_without_display_handle()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("Using adapter {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("still-life device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                ..Default::default()
            })
            .await?;

        Ok(Self { device, queue })
    }

    /// [`headless`](Self::headless) for callers without an async runtime.
    pub fn headless_blocking() -> anyhow::Result<Self> {
        futures::executor::block_on(Self::headless())
    }

    pub fn textures(&self) -> GpuTextures {
        GpuTextures::new(&self.device, &self.queue)
    }

    pub fn uniform_sink(&self, initial_draws: usize) -> UniformSink {
        UniformSink::new(&self.device, initial_draws)
    }

    /// Depth attachment matching a `width` x `height` colour target.
    pub fn depth_texture(&self, width: u32, height: u32) -> Texture {
        Texture::create_depth_texture(&self.device, [width, height], "scene depth texture")
    }

    pub fn scene_pipeline(
        &self,
        color_format: wgpu::TextureFormat,
        sink: &UniformSink,
        textures: &GpuTextures,
    ) -> wgpu::RenderPipeline {
        mk_scene_pipeline(
            &self.device,
            color_format,
            sink.frame_layout(),
            sink.object_layout(),
            textures.layout(),
        )
    }
}

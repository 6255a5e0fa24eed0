//! Uniform buffers backing the scene shader.
//!
//! Object state (model and normal matrices, colour, texture slot, UV scale,
//! material) changes between every draw of a frame. Writing one buffer repeatedly before submit
//! would leave every draw with the last value, so [`UniformSink`] stages one
//! [`ObjectUniform`] per committed draw and uploads them side by side. Each
//! draw selects its block with a dynamic offset.
//!
//! Frame state (camera and lights) lives in a separate, single [`FrameUniform`].

use cgmath::{Matrix3, Matrix4};
use wgpu::util::DeviceExt;

use crate::{
    data_structures::{
        light::{LightSource, MAX_LIGHTS},
        material::Material,
        transform::normal_matrix,
    },
    shader::{DrawId, ShaderSink},
};

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub ambient_color: [f32; 3],
    pub ambient_strength: f32,
    pub diffuse_color: [f32; 3],
    // Due to uniforms requiring 16 byte (4 float) spacing, we need to use a padding field here
    _padding: u32,
    pub specular_color: [f32; 3],
    pub shininess: f32,
}

impl From<&Material> for MaterialUniform {
    fn from(material: &Material) -> Self {
        Self {
            ambient_color: material.ambient_color,
            ambient_strength: material.ambient_strength,
            diffuse_color: material.diffuse_color,
            _padding: 0,
            specular_color: material.specular_color,
            shininess: material.shininess,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    /// WGSL `mat3x3<f32>`: three columns, each padded to 16 bytes.
    pub normal: [[f32; 4]; 3],
    pub color: [f32; 4],
    pub uv_scale: [f32; 2],
    pub use_texture: u32,
    /// Texture unit to sample, -1 for none.
    pub texture_slot: i32,
    pub material: MaterialUniform,
}

impl Default for ObjectUniform {
    fn default() -> Self {
        use cgmath::SquareMatrix;
        Self {
            model: Matrix4::<f32>::identity().into(),
            normal: padded_mat3(Matrix3::identity()),
            color: [1.0, 1.0, 1.0, 1.0],
            uv_scale: [1.0, 1.0],
            use_texture: 0,
            texture_slot: -1,
            material: MaterialUniform::from(&Material::default()),
        }
    }
}

impl ObjectUniform {
    /// Store `model` together with the normal matrix derived from it.
    pub fn set_model(&mut self, model: &Matrix4<f32>) {
        self.model = (*model).into();
        self.normal = padded_mat3(normal_matrix(model));
    }
}

fn padded_mat3(m: Matrix3<f32>) -> [[f32; 4]; 3] {
    [
        m.x.extend(0.0).into(),
        m.y.extend(0.0).into(),
        m.z.extend(0.0).into(),
    ]
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    pub position: [f32; 3],
    pub focal_strength: f32,
    pub ambient_color: [f32; 3],
    pub specular_intensity: f32,
    pub diffuse_color: [f32; 3],
    _padding: u32,
    pub specular_color: [f32; 3],
    _padding2: u32,
}

impl From<&LightSource> for LightUniform {
    fn from(light: &LightSource) -> Self {
        Self {
            position: light.position,
            focal_strength: light.focal_strength,
            ambient_color: light.ambient_color,
            specular_intensity: light.specular_intensity,
            diffuse_color: light.diffuse_color,
            _padding: 0,
            specular_color: light.specular_color,
            _padding2: 0,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniform {
    pub view_proj: [[f32; 4]; 4],
    pub view_position: [f32; 4],
    pub lights: [LightUniform; MAX_LIGHTS],
    pub light_count: u32,
    pub use_lighting: u32,
    _padding: [u32; 2],
}

impl Default for FrameUniform {
    fn default() -> Self {
        use cgmath::SquareMatrix;
        Self {
            view_proj: Matrix4::<f32>::identity().into(),
            view_position: [0.0, 0.0, 0.0, 1.0],
            lights: [LightUniform::default(); MAX_LIGHTS],
            light_count: 0,
            use_lighting: 0,
            _padding: [0; 2],
        }
    }
}

impl FrameUniform {
    /// Indices past [`MAX_LIGHTS`] are ignored.
    pub fn set_light(&mut self, index: usize, light: &LightSource) {
        if let Some(slot) = self.lights.get_mut(index) {
            *slot = light.into();
        }
    }

    /// Number of lights the shader evaluates, clamped to [`MAX_LIGHTS`].
    pub fn set_light_count(&mut self, count: usize) {
        self.light_count = count.min(MAX_LIGHTS) as u32;
    }

    pub fn set_lighting(&mut self, enabled: bool) {
        self.use_lighting = enabled as u32;
    }
}

/// Layout of the frame uniform at group 0.
pub fn frame_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some("frame_bind_group_layout"),
    })
}

/// Layout of the per-draw object uniform at group 1, addressed by dynamic offset.
pub fn object_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: true,
                min_binding_size: wgpu::BufferSize::new(
                    std::mem::size_of::<ObjectUniform>() as u64,
                ),
            },
            count: None,
        }],
        label: Some("object_bind_group_layout"),
    })
}

/// [`ShaderSink`] on wgpu uniform buffers.
///
/// Writes update the pending [`ObjectUniform`]; [`commit`](ShaderSink::commit)
/// stages a copy for the next draw. After all draws of a frame are recorded,
/// [`upload`](Self::upload) copies the staged blocks to the GPU and
/// [`begin_frame`](Self::begin_frame) starts over. The pending state survives
/// frames.
pub struct UniformSink {
    device: wgpu::Device,
    current: ObjectUniform,
    staged: Vec<ObjectUniform>,
    stride: u64,
    capacity: usize,
    object_layout: wgpu::BindGroupLayout,
    object_buffer: wgpu::Buffer,
    object_bind_group: wgpu::BindGroup,
    frame: FrameUniform,
    frame_layout: wgpu::BindGroupLayout,
    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
}

impl UniformSink {
    /// `initial_draws` is the number of draws per frame the object buffer
    /// holds before it has to grow.
    pub fn new(device: &wgpu::Device, initial_draws: usize) -> Self {
        let alignment = device.limits().min_uniform_buffer_offset_alignment as u64;
        let stride = wgpu::util::align_to(std::mem::size_of::<ObjectUniform>() as u64, alignment);
        let capacity = initial_draws.max(1);

        let object_layout = object_layout(device);
        let object_buffer = mk_object_buffer(device, stride, capacity);
        let object_bind_group = mk_object_bind_group(device, &object_layout, &object_buffer);

        let frame = FrameUniform::default();
        let frame_layout = frame_layout(device);
        let frame_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Frame Uniform Buffer"),
            contents: bytemuck::cast_slice(&[frame]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &frame_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
            label: Some("frame_bind_group"),
        });

        Self {
            device: device.clone(),
            current: ObjectUniform::default(),
            staged: Vec::with_capacity(capacity),
            stride,
            capacity,
            object_layout,
            object_buffer,
            object_bind_group,
            frame,
            frame_layout,
            frame_buffer,
            frame_bind_group,
        }
    }

    pub fn current(&self) -> &ObjectUniform {
        &self.current
    }

    pub fn staged(&self) -> &[ObjectUniform] {
        &self.staged
    }

    pub fn frame(&self) -> &FrameUniform {
        &self.frame
    }

    pub fn stride(&self) -> u64 {
        self.stride
    }

    /// Number of draws the object buffer currently has room for.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn set_view(&mut self, view_proj: Matrix4<f32>, eye: [f32; 3]) {
        self.frame.view_proj = view_proj.into();
        self.frame.view_position = [eye[0], eye[1], eye[2], 1.0];
    }

    /// Offset to pass to `set_bind_group` for the object group of `draw`.
    pub fn dynamic_offset(&self, draw: DrawId) -> u32 {
        (draw.0 as u64 * self.stride) as u32
    }

    pub fn frame_layout(&self) -> &wgpu::BindGroupLayout {
        &self.frame_layout
    }

    pub fn object_layout(&self) -> &wgpu::BindGroupLayout {
        &self.object_layout
    }

    pub fn frame_bind_group(&self) -> &wgpu::BindGroup {
        &self.frame_bind_group
    }

    pub fn object_bind_group(&self) -> &wgpu::BindGroup {
        &self.object_bind_group
    }

    /// Drop the staged draws of the previous frame.
    pub fn begin_frame(&mut self) {
        self.staged.clear();
    }

    /// Copy the frame uniform and every staged object block to the GPU.
    ///
    /// Grows the object buffer (and recreates its bind group) when more
    /// draws were committed than it holds; fetch
    /// [`object_bind_group`](Self::object_bind_group) after uploading.
    pub fn upload(&mut self, queue: &wgpu::Queue) {
        queue.write_buffer(&self.frame_buffer, 0, bytemuck::cast_slice(&[self.frame]));
        if self.staged.is_empty() {
            return;
        }
        if self.staged.len() > self.capacity {
            self.capacity = self.staged.len().next_power_of_two();
            log::debug!("Growing object uniform buffer to {} draws", self.capacity);
            self.object_buffer = mk_object_buffer(&self.device, self.stride, self.capacity);
            self.object_bind_group =
                mk_object_bind_group(&self.device, &self.object_layout, &self.object_buffer);
        }

        let mut bytes = vec![0u8; self.staged.len() * self.stride as usize];
        for (block, uniform) in bytes.chunks_mut(self.stride as usize).zip(&self.staged) {
            let uniform = bytemuck::bytes_of(uniform);
            block[..uniform.len()].copy_from_slice(uniform);
        }
        queue.write_buffer(&self.object_buffer, 0, &bytes);
    }
}

fn mk_object_buffer(device: &wgpu::Device, stride: u64, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Object Uniform Buffer"),
        size: stride * capacity as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn mk_object_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    buffer: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                buffer,
                offset: 0,
                size: wgpu::BufferSize::new(std::mem::size_of::<ObjectUniform>() as u64),
            }),
        }],
        label: Some("object_bind_group"),
    })
}

impl ShaderSink for UniformSink {
    fn set_model(&mut self, model: &Matrix4<f32>) {
        self.current.set_model(model);
    }

    fn set_use_texture(&mut self, enabled: bool) {
        self.current.use_texture = enabled as u32;
    }

    fn set_color(&mut self, color: [f32; 4]) {
        self.current.color = color;
    }

    fn set_texture_slot(&mut self, slot: Option<usize>) {
        self.current.texture_slot = slot.map_or(-1, |slot| slot as i32);
    }

    fn set_uv_scale(&mut self, scale: [f32; 2]) {
        self.current.uv_scale = scale;
    }

    fn set_material(&mut self, material: &Material) {
        self.current.material = material.into();
    }

    fn set_light(&mut self, index: usize, light: &LightSource) {
        self.frame.set_light(index, light);
    }

    fn set_light_count(&mut self, count: usize) {
        self.frame.set_light_count(count);
    }

    fn set_lighting(&mut self, enabled: bool) {
        self.frame.set_lighting(enabled);
    }

    fn commit(&mut self) -> DrawId {
        self.staged.push(self.current);
        DrawId(self.staged.len() as u32 - 1)
    }
}

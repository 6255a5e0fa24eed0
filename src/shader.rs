//! Shader state pushed before each draw call.
//!
//! [`ShaderPusher`] resolves tags through the texture and material registries
//! and writes the resulting values into a [`ShaderSink`]. The sink is whatever
//! holds the shader parameters: wgpu uniform buffers in
//! [`UniformSink`](crate::pipelines::uniforms::UniformSink), a recording fake
//! in tests.
//!
//! Nothing here enforces ordering. Whatever was last written is what the next
//! draw uses, so an object that skips `set_material` inherits the previous
//! object's material.
//!
//! # Example
//!
//! ```ignore
//! pusher.set_transformations([1.3, 1.3, 1.3].into(), 0.0, 0.0, 0.0, [3.3, 1.3, 5.0].into());
//! pusher.set_texture("lemon_skin");
//! pusher.set_material("wood");
//! pusher.draw(&mut meshes, Primitive::Sphere);
//! ```

use cgmath::{Matrix4, Vector3};

use crate::{
    data_structures::{
        light::{LightSource, Lighting},
        material::Material,
        transform::Transform,
    },
    mesh::{MeshPrimitives, Primitive},
    registry::{material::MaterialRegistry, texture::TextureRegistry},
};

/// Index of a committed uniform block within the current frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DrawId(pub u32);

/// How the next draw is coloured. Texturing and flat colour are exclusive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RenderMode {
    Flat([f32; 4]),
    /// `slot` is `None` when the requested tag was never registered.
    Textured { slot: Option<usize> },
}

/// Receiver of shader parameter writes.
pub trait ShaderSink {
    fn set_model(&mut self, model: &Matrix4<f32>);
    fn set_use_texture(&mut self, enabled: bool);
    fn set_color(&mut self, color: [f32; 4]);
    /// `None` selects no texture unit at all.
    fn set_texture_slot(&mut self, slot: Option<usize>);
    fn set_uv_scale(&mut self, scale: [f32; 2]);
    fn set_material(&mut self, material: &Material);
    fn set_light(&mut self, index: usize, light: &LightSource);
    /// Lights at `count` and above are no longer evaluated.
    fn set_light_count(&mut self, count: usize);
    fn set_lighting(&mut self, enabled: bool);
    /// Freeze the current values for one draw call.
    fn commit(&mut self) -> DrawId;
}

impl<S: ShaderSink + ?Sized> ShaderSink for &mut S {
    fn set_model(&mut self, model: &Matrix4<f32>) {
        (**self).set_model(model)
    }

    fn set_use_texture(&mut self, enabled: bool) {
        (**self).set_use_texture(enabled)
    }

    fn set_color(&mut self, color: [f32; 4]) {
        (**self).set_color(color)
    }

    fn set_texture_slot(&mut self, slot: Option<usize>) {
        (**self).set_texture_slot(slot)
    }

    fn set_uv_scale(&mut self, scale: [f32; 2]) {
        (**self).set_uv_scale(scale)
    }

    fn set_material(&mut self, material: &Material) {
        (**self).set_material(material)
    }

    fn set_light(&mut self, index: usize, light: &LightSource) {
        (**self).set_light(index, light)
    }

    fn set_light_count(&mut self, count: usize) {
        (**self).set_light_count(count)
    }

    fn set_lighting(&mut self, enabled: bool) {
        (**self).set_lighting(enabled)
    }

    fn commit(&mut self) -> DrawId {
        (**self).commit()
    }
}

/// Writes per-draw shader state, resolving texture and material tags.
///
/// A pusher without a sink accepts every call and does nothing.
pub struct ShaderPusher<'r, S, H> {
    sink: Option<S>,
    textures: &'r TextureRegistry<H>,
    materials: &'r MaterialRegistry,
    mode: Option<RenderMode>,
}

impl<'r, S: ShaderSink, H> ShaderPusher<'r, S, H> {
    pub fn new(
        sink: Option<S>,
        textures: &'r TextureRegistry<H>,
        materials: &'r MaterialRegistry,
    ) -> Self {
        Self {
            sink,
            textures,
            materials,
            mode: None,
        }
    }

    pub fn sink(&self) -> Option<&S> {
        self.sink.as_ref()
    }

    pub fn sink_mut(&mut self) -> Option<&mut S> {
        self.sink.as_mut()
    }

    pub fn into_sink(self) -> Option<S> {
        self.sink
    }

    /// The mode the last `set_color` / `set_texture` left the shader in.
    pub fn render_mode(&self) -> Option<RenderMode> {
        self.mode
    }

    pub fn set_transform(&mut self, transform: &Transform) {
        if let Some(sink) = self.sink.as_mut() {
            sink.set_model(&transform.to_matrix());
        }
    }

    pub fn set_transformations(
        &mut self,
        scale: Vector3<f32>,
        x_rotation_deg: f32,
        y_rotation_deg: f32,
        z_rotation_deg: f32,
        translation: Vector3<f32>,
    ) {
        self.set_transform(&Transform::from_parts(
            scale,
            x_rotation_deg,
            y_rotation_deg,
            z_rotation_deg,
            translation,
        ));
    }

    pub fn set_color(&mut self, r: f32, g: f32, b: f32, a: f32) {
        if let Some(sink) = self.sink.as_mut() {
            let color = [r, g, b, a];
            sink.set_use_texture(false);
            sink.set_color(color);
            self.mode = Some(RenderMode::Flat(color));
        }
    }

    pub fn set_texture(&mut self, tag: &str) {
        if let Some(sink) = self.sink.as_mut() {
            let slot = self.textures.find_slot(tag);
            if slot.is_none() {
                log::warn!("No texture registered for tag {tag}");
            }
            sink.set_use_texture(true);
            sink.set_texture_slot(slot);
            self.mode = Some(RenderMode::Textured { slot });
        }
    }

    pub fn set_uv_scale(&mut self, u: f32, v: f32) {
        if let Some(sink) = self.sink.as_mut() {
            sink.set_uv_scale([u, v]);
        }
    }

    /// Unknown tags leave the previous material in place.
    pub fn set_material(&mut self, tag: &str) {
        if let Some(sink) = self.sink.as_mut() {
            match self.materials.find_material(tag) {
                Some(material) => sink.set_material(&material),
                None => log::debug!("No material registered for tag {tag}"),
            }
        }
    }

    /// Replace the shader's light rig with `lighting`.
    ///
    /// An empty rig switches lighting off, so objects keep their unlit colour
    /// instead of going black.
    pub fn set_lights(&mut self, lighting: &Lighting) {
        if let Some(sink) = self.sink.as_mut() {
            for (index, light) in lighting.iter().enumerate() {
                sink.set_light(index, light);
            }
            sink.set_light_count(lighting.len());
            sink.set_lighting(!lighting.is_empty());
        }
    }

    /// Commit the current state and draw `primitive` with it.
    ///
    /// Without a sink the primitive is still drawn, against `DrawId(0)`.
    pub fn draw<M: MeshPrimitives>(&mut self, meshes: &mut M, primitive: Primitive) -> DrawId {
        let draw = match self.sink.as_mut() {
            Some(sink) => sink.commit(),
            None => DrawId(0),
        };
        meshes.draw(primitive, draw);
        draw
    }
}

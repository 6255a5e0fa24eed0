//! Lighting materials.

/// Phong lighting response of a surface.
///
/// Materials are looked up by tag from the
/// [`MaterialRegistry`](crate::registry::material::MaterialRegistry) and pushed
/// into the shader whole; there is no partial update of a material.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub ambient_color: [f32; 3],
    pub ambient_strength: f32,
    pub diffuse_color: [f32; 3],
    pub specular_color: [f32; 3],
    pub shininess: f32,
}

impl Material {
    pub fn new(
        ambient_color: [f32; 3],
        ambient_strength: f32,
        diffuse_color: [f32; 3],
        specular_color: [f32; 3],
        shininess: f32,
    ) -> Self {
        Self {
            ambient_color,
            ambient_strength,
            diffuse_color,
            specular_color,
            shininess,
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient_color: [1.0, 1.0, 1.0],
            ambient_strength: 0.1,
            diffuse_color: [1.0, 1.0, 1.0],
            specular_color: [0.0, 0.0, 0.0],
            shininess: 1.0,
        }
    }
}

//! Scene light sources.
//!
//! The shader supports a fixed number of point lights. A [`Lighting`] rig is
//! configured once during setup and pushed into the shader before rendering.

use crate::error::{Result, SceneError};

/// Number of light sources the scene shader evaluates.
pub const MAX_LIGHTS: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightSource {
    pub position: [f32; 3],
    pub ambient_color: [f32; 3],
    pub diffuse_color: [f32; 3],
    pub specular_color: [f32; 3],
    /// Exponent applied to the specular highlight of this light.
    pub focal_strength: f32,
    pub specular_intensity: f32,
}

impl Default for LightSource {
    fn default() -> Self {
        Self {
            position: [0.0, 10.0, 0.0],
            ambient_color: [0.05, 0.05, 0.05],
            diffuse_color: [1.0, 1.0, 1.0],
            specular_color: [1.0, 1.0, 1.0],
            focal_strength: 32.0,
            specular_intensity: 0.1,
        }
    }
}

/// Up to [`MAX_LIGHTS`] light sources, in the order they were added.
#[derive(Clone, Debug, Default)]
pub struct Lighting {
    lights: Vec<LightSource>,
}

impl Lighting {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a light and return its index in the shader's light array.
    pub fn add(&mut self, light: LightSource) -> Result<usize> {
        if self.lights.len() >= MAX_LIGHTS {
            return Err(SceneError::TooManyLights {
                capacity: MAX_LIGHTS,
            });
        }
        self.lights.push(light);
        Ok(self.lights.len() - 1)
    }

    pub fn get(&self, index: usize) -> Option<&LightSource> {
        self.lights.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LightSource> {
        self.lights.iter()
    }

    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }
}

//! Primitive meshes the scene is assembled from.
//!
//! Geometry lives outside this crate. A [`MeshPrimitives`] implementor owns the
//! vertex/index buffers (laid out as [`SceneVertex`](crate::pipelines::scene::SceneVertex))
//! and issues the draw; this crate only says which primitive and which
//! committed uniform block to use.

use crate::shader::DrawId;

/// Which parts of a cylinder to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Faces {
    pub top: bool,
    pub bottom: bool,
    pub sides: bool,
}

impl Faces {
    pub const ALL: Faces = Faces {
        top: true,
        bottom: true,
        sides: true,
    };

    pub fn new(top: bool, bottom: bool, sides: bool) -> Self {
        Self { top, bottom, sides }
    }

    pub fn caps_only() -> Self {
        Self::new(true, true, false)
    }

    pub fn sides_only() -> Self {
        Self::new(false, false, true)
    }
}

impl Default for Faces {
    fn default() -> Self {
        Self::ALL
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Primitive {
    Plane,
    Sphere,
    HalfSphere,
    Cylinder(Faces),
    TaperedCylinder(Faces),
    Torus,
    Box,
}

pub trait MeshPrimitives {
    /// Draw `primitive` with the uniform block committed as `draw`.
    fn draw(&mut self, primitive: Primitive, draw: DrawId);
}

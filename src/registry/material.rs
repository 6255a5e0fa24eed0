use crate::{
    data_structures::material::Material,
    error::{Result, SceneError},
};

#[derive(Clone, Debug, PartialEq)]
pub struct MaterialEntry {
    pub tag: String,
    pub material: Material,
}

/// Append-only list of named materials.
///
/// Materials are defined once during setup; there is no removal.
#[derive(Clone, Debug, Default)]
pub struct MaterialRegistry {
    entries: Vec<MaterialEntry>,
}

impl MaterialRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, tag: &str, material: Material) -> Result<()> {
        if self.entries.iter().any(|entry| entry.tag == tag) {
            return Err(SceneError::DuplicateTag {
                tag: tag.to_string(),
            });
        }
        self.entries.push(MaterialEntry {
            tag: tag.to_string(),
            material,
        });
        Ok(())
    }

    /// Copy of the material registered under `tag`.
    pub fn find_material(&self, tag: &str) -> Option<Material> {
        self.entries
            .iter()
            .find(|entry| entry.tag == tag)
            .map(|entry| entry.material)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MaterialEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

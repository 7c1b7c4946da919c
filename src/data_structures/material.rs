//! Named surface materials for the lighting model.

use std::collections::HashMap;

use cgmath::Vector3;

/// Diffuse/specular reflectance and shininess of a surface.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub tag: String,
    pub diffuse_color: Vector3<f32>,
    pub specular_color: Vector3<f32>,
    pub shininess: f32,
}

/// Insertion-ordered list of materials, looked up by tag.
///
/// Tags are not required to be unique. Lookup returns the first material defined
/// under a tag, so a later definition with the same tag is never reachable.
#[derive(Debug, Default)]
pub struct MaterialRegistry {
    materials: Vec<Material>,
    first_by_tag: HashMap<String, usize>,
}

impl MaterialRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a material. Negative shininess is clamped to zero.
    pub fn define(
        &mut self,
        tag: &str,
        diffuse_color: Vector3<f32>,
        specular_color: Vector3<f32>,
        shininess: f32,
    ) {
        let shininess = if shininess < 0.0 {
            log::warn!("Material `{tag}` has negative shininess {shininess}, using 0");
            0.0
        } else {
            shininess
        };
        let index = self.materials.len();
        self.materials.push(Material {
            tag: tag.to_string(),
            diffuse_color,
            specular_color,
            shininess,
        });
        if self.first_by_tag.contains_key(tag) {
            log::warn!("Material `{tag}` is defined twice, the later definition is unreachable");
        } else {
            self.first_by_tag.insert(tag.to_string(), index);
        }
    }

    /// First material defined under `tag`, exact and case-sensitive.
    pub fn find(&self, tag: &str) -> Option<&Material> {
        self.first_by_tag
            .get(tag)
            .and_then(|&index| self.materials.get(index))
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// All definitions in the order they were made, shadowed duplicates included.
    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }
}

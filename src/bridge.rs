//! Pushes scene state into the active shader program before a draw call.
//!
//! [`UniformBridge`] is the only place that knows which uniform a texture slot,
//! a material or a model matrix ends up in. Every push is skipped when no
//! program is active.
//!
//! Two lookups can miss, and neither is an error:
//!
//! - an unknown texture tag still switches texturing on and sets the sampler to
//!   [`NOT_FOUND_SLOT`], the renderer then samples its fallback texture
//! - an unknown material tag leaves the material uniforms untouched, so the
//!   object inherits whatever material the previous draw used

use cgmath::{Matrix4, Vector2, Vector4};

use crate::{
    data_structures::material::MaterialRegistry,
    resources::texture::{TextureBackend, TextureRegistry},
    shader::{
        MATERIAL_DIFFUSE, MATERIAL_SHININESS, MATERIAL_SPECULAR, MODEL, OBJECT_COLOR,
        OBJECT_TEXTURE, ShaderProgram, USE_TEXTURE, UV_SCALE,
    },
};

/// Sampler index sent to the shader for a texture tag that is not registered.
pub const NOT_FOUND_SLOT: i32 = -1;

pub struct UniformBridge<'a, B: TextureBackend> {
    program: Option<&'a mut dyn ShaderProgram>,
    textures: &'a TextureRegistry<B>,
    materials: &'a MaterialRegistry,
}

impl<'a, B: TextureBackend> UniformBridge<'a, B> {
    pub fn new(
        program: Option<&'a mut dyn ShaderProgram>,
        textures: &'a TextureRegistry<B>,
        materials: &'a MaterialRegistry,
    ) -> Self {
        Self {
            program,
            textures,
            materials,
        }
    }

    pub fn is_active(&self) -> bool {
        self.program.is_some()
    }

    pub fn push_transform(&mut self, model: Matrix4<f32>) {
        if let Some(program) = self.program.as_deref_mut() {
            program.set_mat4(MODEL, model);
        }
    }

    /// Render with a flat color instead of a texture.
    pub fn push_flat_color(&mut self, color: Vector4<f32>) {
        if let Some(program) = self.program.as_deref_mut() {
            program.set_int(USE_TEXTURE, 0);
            program.set_vec4(OBJECT_COLOR, color);
        }
    }

    /// Sample the texture registered under `tag`. Returns the sampler index that was
    /// set, [`NOT_FOUND_SLOT`] if the tag is unknown, `None` without an active program.
    pub fn push_texture(&mut self, tag: &str) -> Option<i32> {
        let program = self.program.as_deref_mut()?;
        program.set_int(USE_TEXTURE, 1);
        let slot = match self.textures.find_slot(tag) {
            Some(slot) => slot as i32,
            None => {
                log::debug!("No texture registered under `{tag}`");
                NOT_FOUND_SLOT
            }
        };
        program.set_int(OBJECT_TEXTURE, slot);
        Some(slot)
    }

    pub fn push_uv_scale(&mut self, u: f32, v: f32) {
        if let Some(program) = self.program.as_deref_mut() {
            program.set_vec2(UV_SCALE, Vector2::new(u, v));
        }
    }

    /// Set the material registered under `tag`. Returns whether it was found and set.
    pub fn push_material(&mut self, tag: &str) -> bool {
        let Some(program) = self.program.as_deref_mut() else {
            return false;
        };
        match self.materials.find(tag) {
            Some(material) => {
                program.set_vec3(MATERIAL_DIFFUSE, material.diffuse_color);
                program.set_vec3(MATERIAL_SPECULAR, material.specular_color);
                program.set_float(MATERIAL_SHININESS, material.shininess);
                true
            }
            None => {
                log::debug!("No material defined as `{tag}`, keeping the previous one");
                false
            }
        }
    }
}

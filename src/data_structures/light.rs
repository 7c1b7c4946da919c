//! Scene lighting: one directional light and up to four point lights.
//!
//! Lights are pushed into the shader once during scene setup and are not touched
//! again while drawing.

use cgmath::Vector3;

use crate::shader::{MAX_POINT_LIGHTS, ShaderProgram, USE_LIGHTING};

/// Ambient, diffuse and specular contribution of a light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightColor {
    pub ambient: Vector3<f32>,
    pub diffuse: Vector3<f32>,
    pub specular: Vector3<f32>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    pub direction: Vector3<f32>,
    pub color: LightColor,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vector3<f32>,
    pub color: LightColor,
}

/// All light sources of a scene.
///
/// With `use_lighting` disabled the shader falls back to unlit colors and ignores
/// every light below.
#[derive(Clone, Debug, PartialEq)]
pub struct LightSetup {
    pub use_lighting: bool,
    pub directional: Option<DirectionalLight>,
    pub point_lights: Vec<PointLight>,
}

impl Default for LightSetup {
    fn default() -> Self {
        Self {
            use_lighting: true,
            directional: None,
            point_lights: Vec::new(),
        }
    }
}

impl LightSetup {
    pub fn with_directional(mut self, light: DirectionalLight) -> Self {
        self.directional = Some(light);
        self
    }

    pub fn with_point(mut self, light: PointLight) -> Self {
        self.point_lights.push(light);
        self
    }

    /// Write every light into `program`. Point light slots that are not used get
    /// `bActive = false`; lights beyond [`MAX_POINT_LIGHTS`] are dropped.
    pub fn apply(&self, program: &mut dyn ShaderProgram) {
        program.set_bool(USE_LIGHTING, self.use_lighting);

        match &self.directional {
            Some(light) => {
                program.set_vec3("directionalLight.direction", light.direction);
                set_color(program, "directionalLight", &light.color);
                program.set_bool("directionalLight.bActive", true);
            }
            None => program.set_bool("directionalLight.bActive", false),
        }

        if self.point_lights.len() > MAX_POINT_LIGHTS {
            log::warn!(
                "{} point lights configured, only the first {} are used",
                self.point_lights.len(),
                MAX_POINT_LIGHTS
            );
        }
        for index in 0..MAX_POINT_LIGHTS {
            let prefix = format!("pointLights[{index}]");
            match self.point_lights.get(index) {
                Some(light) => {
                    program.set_vec3(&format!("{prefix}.position"), light.position);
                    set_color(program, &prefix, &light.color);
                    program.set_bool(&format!("{prefix}.bActive"), true);
                }
                None => program.set_bool(&format!("{prefix}.bActive"), false),
            }
        }
    }
}

fn set_color(program: &mut dyn ShaderProgram, prefix: &str, color: &LightColor) {
    program.set_vec3(&format!("{prefix}.ambient"), color.ambient);
    program.set_vec3(&format!("{prefix}.diffuse"), color.diffuse);
    program.set_vec3(&format!("{prefix}.specular"), color.specular);
}

//! Shader program interface and the CPU-side uniform store of the scene shader.
//!
//! The scene only ever talks to a shader through [`ShaderProgram`]: a named-uniform
//! setter in the spirit of `glUniform*`. [`UniformBlock`] is the implementation
//! used by the wgpu renderer. It maps every uniform name the scene shader declares
//! onto two `#[repr(C)]` structs that are copied into GPU buffers verbatim:
//!
//! - [`FrameUniform`] holds state that is set once (view, projection, lights)
//! - [`DrawUniform`] holds state that changes between draw calls (model matrix,
//!   texture selection, material)
//!
//! Values persist until they are overwritten, the same way uniforms of a linked GL
//! program keep their value between draws.

use cgmath::{Matrix4, SquareMatrix, Vector2, Vector3, Vector4};

pub const MODEL: &str = "model";
pub const VIEW: &str = "view";
pub const PROJECTION: &str = "projection";
pub const VIEW_POSITION: &str = "viewPosition";
pub const OBJECT_COLOR: &str = "objectColor";
pub const OBJECT_TEXTURE: &str = "objectTexture";
pub const USE_TEXTURE: &str = "bUseTexture";
pub const USE_LIGHTING: &str = "bUseLighting";
pub const UV_SCALE: &str = "UVscale";
pub const MATERIAL_DIFFUSE: &str = "material.diffuseColor";
pub const MATERIAL_SPECULAR: &str = "material.specularColor";
pub const MATERIAL_SHININESS: &str = "material.shininess";

/// Number of point lights the scene shader declares.
pub const MAX_POINT_LIGHTS: usize = 4;

/// A single uniform value as handed to a shader program.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UniformValue {
    Mat4(Matrix4<f32>),
    Vec4(Vector4<f32>),
    Vec3(Vector3<f32>),
    Vec2(Vector2<f32>),
    Float(f32),
    Bool(bool),
    Int(i32),
}

/// A linked shader program that accepts uniform values by name.
///
/// Implementors only provide [`set`](Self::set). Setting a name the program does not
/// declare must be silently ignored, never panic.
pub trait ShaderProgram {
    fn set(&mut self, name: &str, value: UniformValue);

    fn set_mat4(&mut self, name: &str, value: Matrix4<f32>) {
        self.set(name, UniformValue::Mat4(value));
    }

    fn set_vec4(&mut self, name: &str, value: Vector4<f32>) {
        self.set(name, UniformValue::Vec4(value));
    }

    fn set_vec3(&mut self, name: &str, value: Vector3<f32>) {
        self.set(name, UniformValue::Vec3(value));
    }

    fn set_vec2(&mut self, name: &str, value: Vector2<f32>) {
        self.set(name, UniformValue::Vec2(value));
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.set(name, UniformValue::Float(value));
    }

    fn set_bool(&mut self, name: &str, value: bool) {
        self.set(name, UniformValue::Bool(value));
    }

    fn set_int(&mut self, name: &str, value: i32) {
        self.set(name, UniformValue::Int(value));
    }
}

/// One light as laid out in the shader. `vector` is the direction of the
/// directional light and the position of a point light.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightRaw {
    pub vector: [f32; 3],
    pub active: u32,
    pub ambient: [f32; 3],
    // Due to uniforms requiring 16 byte (4 float) spacing, we need to use a padding field here
    _padding: u32,
    pub diffuse: [f32; 3],
    _padding2: u32,
    pub specular: [f32; 3],
    _padding3: u32,
}

/// Uniforms shared by every draw call of a frame.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub view_position: [f32; 3],
    pub use_lighting: u32,
    pub directional: LightRaw,
    pub point_lights: [LightRaw; MAX_POINT_LIGHTS],
}

/// Uniforms captured for each individual draw call.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DrawUniform {
    pub model: [[f32; 4]; 4],
    pub object_color: [f32; 4],
    pub uv_scale: [f32; 2],
    pub use_texture: u32,
    pub texture_slot: i32,
    pub diffuse_color: [f32; 3],
    pub shininess: f32,
    pub specular_color: [f32; 3],
    _padding: u32,
}

impl Default for FrameUniform {
    fn default() -> Self {
        let identity: [[f32; 4]; 4] = Matrix4::<f32>::identity().into();
        Self {
            view: identity,
            projection: identity,
            view_position: [0.0; 3],
            use_lighting: 0,
            directional: LightRaw::default(),
            point_lights: [LightRaw::default(); MAX_POINT_LIGHTS],
        }
    }
}

impl Default for DrawUniform {
    fn default() -> Self {
        Self {
            model: Matrix4::<f32>::identity().into(),
            object_color: [1.0; 4],
            uv_scale: [1.0, 1.0],
            use_texture: 0,
            texture_slot: 0,
            diffuse_color: [1.0; 3],
            shininess: 1.0,
            specular_color: [0.0; 3],
            _padding: 0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LightField {
    Vector,
    Ambient,
    Diffuse,
    Specular,
    Active,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Location {
    Model,
    View,
    Projection,
    ViewPosition,
    ObjectColor,
    ObjectTexture,
    UseTexture,
    UseLighting,
    UvScale,
    MaterialDiffuse,
    MaterialSpecular,
    MaterialShininess,
    Directional(LightField),
    Point(usize, LightField),
}

/// Resolve a uniform name the same way a GL program resolves a uniform location.
fn locate(name: &str) -> Option<Location> {
    let location = match name {
        MODEL => Location::Model,
        VIEW => Location::View,
        PROJECTION => Location::Projection,
        VIEW_POSITION => Location::ViewPosition,
        OBJECT_COLOR => Location::ObjectColor,
        OBJECT_TEXTURE => Location::ObjectTexture,
        USE_TEXTURE => Location::UseTexture,
        USE_LIGHTING => Location::UseLighting,
        UV_SCALE => Location::UvScale,
        MATERIAL_DIFFUSE => Location::MaterialDiffuse,
        MATERIAL_SPECULAR => Location::MaterialSpecular,
        MATERIAL_SHININESS => Location::MaterialShininess,
        _ => {
            if let Some(field) = name.strip_prefix("directionalLight.") {
                let field = match field {
                    "direction" => LightField::Vector,
                    other => light_field(other)?,
                };
                return Some(Location::Directional(field));
            }
            let rest = name.strip_prefix("pointLights[")?;
            let (index, field) = rest.split_once("].")?;
            let index: usize = index.parse().ok()?;
            if index >= MAX_POINT_LIGHTS {
                return None;
            }
            let field = match field {
                "position" => LightField::Vector,
                other => light_field(other)?,
            };
            Location::Point(index, field)
        }
    };
    Some(location)
}

fn light_field(name: &str) -> Option<LightField> {
    match name {
        "ambient" => Some(LightField::Ambient),
        "diffuse" => Some(LightField::Diffuse),
        "specular" => Some(LightField::Specular),
        "bActive" => Some(LightField::Active),
        _ => None,
    }
}

/// Flags are declared as ints in the shader, GL accepts both `glUniform1i` and bools for them.
fn as_flag(value: UniformValue) -> Option<u32> {
    match value {
        UniformValue::Bool(b) => Some(b as u32),
        UniformValue::Int(i) => Some((i != 0) as u32),
        _ => None,
    }
}

/// CPU-side copy of every uniform the scene shader declares.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UniformBlock {
    frame: FrameUniform,
    draw: DrawUniform,
}

impl UniformBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame(&self) -> &FrameUniform {
        &self.frame
    }

    pub fn draw(&self) -> &DrawUniform {
        &self.draw
    }

    /// Store `value` under `name`. Returns `false` if the name is unknown or the value
    /// has the wrong type; the block is left untouched in that case.
    pub fn apply(&mut self, name: &str, value: UniformValue) -> bool {
        let Some(location) = locate(name) else {
            log::debug!("Shader declares no uniform named `{name}`");
            return false;
        };
        let accepted = match (location, value) {
            (Location::Model, UniformValue::Mat4(m)) => {
                self.draw.model = m.into();
                true
            }
            (Location::View, UniformValue::Mat4(m)) => {
                self.frame.view = m.into();
                true
            }
            (Location::Projection, UniformValue::Mat4(m)) => {
                self.frame.projection = m.into();
                true
            }
            (Location::ViewPosition, UniformValue::Vec3(v)) => {
                self.frame.view_position = v.into();
                true
            }
            (Location::ObjectColor, UniformValue::Vec4(v)) => {
                self.draw.object_color = v.into();
                true
            }
            (Location::ObjectTexture, UniformValue::Int(slot)) => {
                self.draw.texture_slot = slot;
                true
            }
            (Location::UvScale, UniformValue::Vec2(v)) => {
                self.draw.uv_scale = v.into();
                true
            }
            (Location::MaterialDiffuse, UniformValue::Vec3(v)) => {
                self.draw.diffuse_color = v.into();
                true
            }
            (Location::MaterialSpecular, UniformValue::Vec3(v)) => {
                self.draw.specular_color = v.into();
                true
            }
            (Location::MaterialShininess, UniformValue::Float(f)) => {
                self.draw.shininess = f;
                true
            }
            (Location::UseTexture, value) => as_flag(value)
                .map(|flag| self.draw.use_texture = flag)
                .is_some(),
            (Location::UseLighting, value) => as_flag(value)
                .map(|flag| self.frame.use_lighting = flag)
                .is_some(),
            (Location::Directional(field), value) => {
                Self::apply_light(&mut self.frame.directional, field, value)
            }
            (Location::Point(index, field), value) => {
                Self::apply_light(&mut self.frame.point_lights[index], field, value)
            }
            _ => false,
        };
        if !accepted {
            log::debug!("Uniform `{name}` does not accept {value:?}");
        }
        accepted
    }

    fn apply_light(light: &mut LightRaw, field: LightField, value: UniformValue) -> bool {
        match (field, value) {
            (LightField::Active, value) => as_flag(value).map(|flag| light.active = flag).is_some(),
            (LightField::Vector, UniformValue::Vec3(v)) => {
                light.vector = v.into();
                true
            }
            (LightField::Ambient, UniformValue::Vec3(v)) => {
                light.ambient = v.into();
                true
            }
            (LightField::Diffuse, UniformValue::Vec3(v)) => {
                light.diffuse = v.into();
                true
            }
            (LightField::Specular, UniformValue::Vec3(v)) => {
                light.specular = v.into();
                true
            }
            _ => false,
        }
    }
}

impl ShaderProgram for UniformBlock {
    fn set(&mut self, name: &str, value: UniformValue) {
        self.apply(name, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_indexed_light_names() {
        assert_eq!(
            locate("pointLights[3].position"),
            Some(Location::Point(3, LightField::Vector))
        );
        assert_eq!(
            locate("directionalLight.bActive"),
            Some(Location::Directional(LightField::Active))
        );
        assert_eq!(locate("pointLights[4].position"), None);
        assert_eq!(locate("pointLights[x].position"), None);
        assert_eq!(locate("directionalLight.position"), None);
        assert_eq!(locate("pointLights[0].direction"), None);
    }

    #[test]
    fn ignores_unknown_names_and_wrong_types() {
        let mut block = UniformBlock::new();
        let before = block.clone();
        assert!(!block.apply("bogus", UniformValue::Float(1.0)));
        assert!(!block.apply(MODEL, UniformValue::Float(1.0)));
        assert_eq!(block, before);
    }

    #[test]
    fn flags_accept_ints_and_bools() {
        let mut block = UniformBlock::new();
        block.set_int(USE_TEXTURE, 1);
        assert_eq!(block.draw().use_texture, 1);
        block.set_bool(USE_TEXTURE, false);
        assert_eq!(block.draw().use_texture, 0);
        block.set_bool("pointLights[1].bActive", true);
        assert_eq!(block.frame().point_lights[1].active, 1);
    }

    #[test]
    fn values_persist_until_overwritten() {
        let mut block = UniformBlock::new();
        block.set_float(MATERIAL_SHININESS, 30.0);
        block.set_vec2(UV_SCALE, Vector2::new(2.0, 2.0));
        block.set_float("unrelated", 3.0);
        assert_eq!(block.draw().shininess, 30.0);
        assert_eq!(block.draw().uv_scale, [2.0, 2.0]);
    }
}

//! Scene orchestration: setup once, render every frame, tear down once.
//!
//! A [`SceneComposer`] owns the texture and material registries of one scene and
//! walks a [`SceneDescription`] through three phases:
//!
//! 1. [`setup`](SceneComposer::setup) loads and binds textures, defines materials,
//!    pushes the lights and loads every primitive mesh
//! 2. [`render`](SceneComposer::render) draws every object, in description order
//! 3. [`teardown`](SceneComposer::teardown) releases the textures
//!
//! Drawing goes through a [`RenderBackend`], which provides both the active shader
//! program and the mesh drawer.

use std::path::{Path, PathBuf};

use cgmath::{Vector3, Vector4};

use crate::{
    bridge::UniformBridge,
    data_structures::{
        light::LightSetup,
        material::MaterialRegistry,
        mesh::{MeshDrawer, Primitive, Surfaces},
        transform::Transform,
    },
    error::{Result, SceneError},
    resources::{
        resolve_asset,
        texture::{TextureBackend, TextureRegistry},
    },
    shader::ShaderProgram,
};

/// Lifecycle of a [`SceneComposer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Empty,
    Ready,
    TornDown,
}

/// Mesh drawing plus the shader program the draws read their uniforms from.
pub trait RenderBackend: MeshDrawer {
    /// The active program, `None` if no program is in use.
    fn program(&mut self) -> Option<&mut dyn ShaderProgram>;
}

/// How an object is colored.
#[derive(Clone, Debug, PartialEq)]
pub enum Appearance {
    Color(Vector4<f32>),
    Texture(String),
}

/// One draw call: where, what and how.
///
/// Several objects can share a transform and select different [`Surfaces`] of the
/// same primitive to give each face its own texture.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneObject {
    pub primitive: Primitive,
    pub surfaces: Surfaces,
    pub transform: Transform,
    pub appearance: Appearance,
    pub material: Option<String>,
    pub uv_scale: (f32, f32),
}

impl SceneObject {
    /// A white, unscaled object drawing every surface of `primitive`.
    pub fn new(primitive: Primitive, transform: Transform) -> Self {
        Self {
            primitive,
            surfaces: Surfaces::ALL,
            transform,
            appearance: Appearance::Color(Vector4::new(1.0, 1.0, 1.0, 1.0)),
            material: None,
            uv_scale: (1.0, 1.0),
        }
    }

    pub fn textured(mut self, tag: &str) -> Self {
        self.appearance = Appearance::Texture(tag.to_string());
        self
    }

    pub fn colored(mut self, r: f32, g: f32, b: f32, a: f32) -> Self {
        self.appearance = Appearance::Color(Vector4::new(r, g, b, a));
        self
    }

    pub fn material(mut self, tag: &str) -> Self {
        self.material = Some(tag.to_string());
        self
    }

    pub fn uv_scale(mut self, u: f32, v: f32) -> Self {
        self.uv_scale = (u, v);
        self
    }

    pub fn surfaces(mut self, surfaces: Surfaces) -> Self {
        self.surfaces = surfaces;
        self
    }

    pub fn texture_tag(&self) -> Option<&str> {
        match &self.appearance {
            Appearance::Texture(tag) => Some(tag),
            Appearance::Color(_) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextureSpec {
    pub tag: String,
    pub path: PathBuf,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MaterialSpec {
    pub tag: String,
    pub diffuse_color: Vector3<f32>,
    pub specular_color: Vector3<f32>,
    pub shininess: f32,
}

/// Everything needed to build a scene. Texture paths are resolved against the
/// assets directory of the composer unless they are absolute.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneDescription {
    pub textures: Vec<TextureSpec>,
    pub materials: Vec<MaterialSpec>,
    pub lights: LightSetup,
    pub objects: Vec<SceneObject>,
}

impl SceneDescription {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texture(mut self, tag: &str, path: impl Into<PathBuf>) -> Self {
        self.textures.push(TextureSpec {
            tag: tag.to_string(),
            path: path.into(),
        });
        self
    }

    pub fn material(
        mut self,
        tag: &str,
        diffuse_color: Vector3<f32>,
        specular_color: Vector3<f32>,
        shininess: f32,
    ) -> Self {
        self.materials.push(MaterialSpec {
            tag: tag.to_string(),
            diffuse_color,
            specular_color,
            shininess,
        });
        self
    }

    pub fn lights(mut self, lights: LightSetup) -> Self {
        self.lights = lights;
        self
    }

    pub fn object(mut self, object: SceneObject) -> Self {
        self.objects.push(object);
        self
    }
}

/// Outcome of [`SceneComposer::setup`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SetupSummary {
    /// Number of textures registered.
    pub loaded: usize,
    /// Tags of the textures that failed to load.
    pub failed: Vec<String>,
    /// Texture and material tags used by objects that resolve to nothing.
    pub unresolved: Vec<String>,
    /// Primitives whose geometry could not be loaded; draws of these are skipped.
    pub missing_meshes: Vec<Primitive>,
}

pub struct SceneComposer<B: TextureBackend> {
    textures: TextureRegistry<B>,
    materials: MaterialRegistry,
    objects: Vec<SceneObject>,
    assets_dir: PathBuf,
    phase: Phase,
}

impl<B: TextureBackend> SceneComposer<B> {
    pub fn new(texture_backend: B) -> Self {
        Self {
            textures: TextureRegistry::new(texture_backend),
            materials: MaterialRegistry::new(),
            objects: Vec::new(),
            assets_dir: PathBuf::from("."),
            phase: Phase::Empty,
        }
    }

    pub fn with_assets_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.assets_dir = dir.into();
        self
    }

    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn textures(&self) -> &TextureRegistry<B> {
        &self.textures
    }

    pub fn materials(&self) -> &MaterialRegistry {
        &self.materials
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    fn expect_phase(&self, expected: Phase) -> Result<()> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(SceneError::Phase {
                expected,
                found: self.phase,
            })
        }
    }

    /// Load the resources of `description` and push its lights.
    ///
    /// Textures that fail to load are reported in the summary and the scene goes on
    /// without them. Having more textures than units fails the whole setup and
    /// releases what was loaded.
    pub fn setup(
        &mut self,
        backend: &mut dyn RenderBackend,
        description: SceneDescription,
    ) -> Result<SetupSummary> {
        self.expect_phase(Phase::Empty)?;
        let mut summary = SetupSummary::default();

        for spec in &description.textures {
            let path = resolve_asset(&self.assets_dir, &spec.path);
            match self.textures.load(&path, &spec.tag) {
                Ok(_) => summary.loaded += 1,
                Err(_) => summary.failed.push(spec.tag.clone()),
            }
        }
        if let Err(e) = self.textures.bind_all() {
            self.textures.release_all();
            return Err(e);
        }

        for spec in &description.materials {
            self.materials.define(
                &spec.tag,
                spec.diffuse_color,
                spec.specular_color,
                spec.shininess,
            );
        }

        match backend.program() {
            Some(program) => description.lights.apply(program),
            None => log::warn!("No active shader program, lights are not set"),
        }

        for primitive in Primitive::ALL {
            if let Err(e) = backend.load(primitive) {
                log::warn!("Could not load {primitive:?} mesh: {e:#}");
                summary.missing_meshes.push(primitive);
            }
        }

        self.objects = description.objects;
        summary.unresolved = self.unresolved_tags();
        for tag in &summary.unresolved {
            log::warn!("Tag `{tag}` is used by the scene but resolves to nothing");
        }

        self.phase = Phase::Ready;
        log::info!(
            "Scene ready: {} textures, {} materials, {} objects",
            self.textures.len(),
            self.materials.len(),
            self.objects.len()
        );
        Ok(summary)
    }

    fn unresolved_tags(&self) -> Vec<String> {
        let mut unresolved: Vec<String> = Vec::new();
        for object in &self.objects {
            let texture = object
                .texture_tag()
                .filter(|tag| self.textures.find_slot(tag).is_none());
            let material = object
                .material
                .as_deref()
                .filter(|tag| self.materials.find(tag).is_none());
            for tag in texture.into_iter().chain(material) {
                if !unresolved.iter().any(|known| known == tag) {
                    unresolved.push(tag.to_string());
                }
            }
        }
        unresolved
    }

    /// Draw every object once. Returns the number of draw calls issued.
    pub fn render(&mut self, backend: &mut dyn RenderBackend) -> Result<usize> {
        self.expect_phase(Phase::Ready)?;
        for object in &self.objects {
            {
                let mut bridge =
                    UniformBridge::new(backend.program(), &self.textures, &self.materials);
                bridge.push_transform(object.transform.to_matrix());
                match &object.appearance {
                    Appearance::Texture(tag) => {
                        bridge.push_texture(tag);
                    }
                    Appearance::Color(color) => bridge.push_flat_color(*color),
                }
                bridge.push_uv_scale(object.uv_scale.0, object.uv_scale.1);
                if let Some(tag) = &object.material {
                    bridge.push_material(tag);
                }
            }
            backend.draw(object.primitive, object.surfaces);
        }
        Ok(self.objects.len())
    }

    /// Release every texture. The composer cannot be set up again afterwards.
    pub fn teardown(&mut self) -> Result<()> {
        self.expect_phase(Phase::Ready)?;
        self.textures.release_all();
        self.objects.clear();
        self.phase = Phase::TornDown;
        log::info!("Scene torn down");
        Ok(())
    }
}

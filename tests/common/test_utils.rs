use std::{
    cell::RefCell,
    collections::HashSet,
    path::{Path, PathBuf},
    rc::Rc,
};

use image::{GrayAlphaImage, GrayImage, Luma, LumaA, Rgb, RgbImage, Rgba, RgbaImage};
use parlor_ngin::{
    composer::RenderBackend,
    data_structures::mesh::{MeshDrawer, Primitive, Surfaces},
    error::{Result, SceneError},
    resources::texture::{DecodedImage, TextureBackend},
    shader::{ShaderProgram, UniformValue},
};

/// A shader program that remembers every uniform it was given, in order.
#[derive(Debug, Default)]
pub struct RecordingProgram {
    pub sets: Vec<(String, UniformValue)>,
}

impl RecordingProgram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent value set under `name`.
    pub fn last(&self, name: &str) -> Option<UniformValue> {
        self.sets
            .iter()
            .rev()
            .find(|(set_name, _)| set_name == name)
            .map(|(_, value)| *value)
    }

    pub fn names(&self) -> Vec<&str> {
        self.sets.iter().map(|(name, _)| name.as_str()).collect()
    }
}

impl ShaderProgram for RecordingProgram {
    fn set(&mut self, name: &str, value: UniformValue) {
        self.sets.push((name.to_string(), value));
    }
}

/// Texture backend handing out increasing integer handles.
///
/// Releases go to a shared list so they can be checked after the registry
/// owning the backend is gone.
#[derive(Debug)]
pub struct FakeTextures {
    pub max_units: usize,
    pub fail_uploads: bool,
    pub uploads: Vec<(String, u32, u32)>,
    pub binds: Vec<(usize, u32)>,
    pub released: Rc<RefCell<Vec<u32>>>,
    next: u32,
}

impl FakeTextures {
    pub fn new() -> Self {
        Self::with_units(16)
    }

    pub fn with_units(max_units: usize) -> Self {
        Self {
            max_units,
            fail_uploads: false,
            uploads: Vec::new(),
            binds: Vec::new(),
            released: Rc::new(RefCell::new(Vec::new())),
            next: 100,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_uploads: true,
            ..Self::new()
        }
    }
}

impl TextureBackend for FakeTextures {
    type Handle = u32;

    fn upload(&mut self, image: &DecodedImage, label: &str) -> Result<u32> {
        if self.fail_uploads {
            return Err(SceneError::Upload(format!("refusing {label}")));
        }
        let handle = self.next;
        self.next += 1;
        self.uploads
            .push((label.to_string(), image.width(), image.height()));
        Ok(handle)
    }

    fn max_units(&self) -> usize {
        self.max_units
    }

    fn bind(&mut self, unit: usize, handle: u32) {
        self.binds.push((unit, handle));
    }

    fn release(&mut self, handle: u32) {
        self.released.borrow_mut().push(handle);
    }
}

/// Everything a [`RecordingBackend`] was asked to do, in order.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Set(String, UniformValue),
    Load(Primitive),
    Draw(Primitive, Surfaces),
}

/// Render backend that is its own shader program and logs uniform sets and draw
/// calls into one list.
#[derive(Debug)]
pub struct RecordingBackend {
    pub calls: Vec<Call>,
    pub program_active: bool,
    pub unavailable: HashSet<Primitive>,
    loaded: HashSet<Primitive>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            program_active: true,
            unavailable: HashSet::new(),
            loaded: HashSet::new(),
        }
    }

    pub fn without_program() -> Self {
        Self {
            program_active: false,
            ..Self::new()
        }
    }

    pub fn draws(&self) -> Vec<(Primitive, Surfaces)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Draw(primitive, surfaces) => Some((*primitive, *surfaces)),
                _ => None,
            })
            .collect()
    }

    pub fn loads(&self) -> Vec<Primitive> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Load(primitive) => Some(*primitive),
                _ => None,
            })
            .collect()
    }

    /// Uniforms set between draw call `index - 1` and draw call `index`.
    pub fn sets_before_draw(&self, index: usize) -> Vec<(String, UniformValue)> {
        let mut draws_seen = 0;
        let mut sets = Vec::new();
        for call in &self.calls {
            match call {
                Call::Draw(..) if draws_seen == index => return sets,
                Call::Draw(..) => {
                    draws_seen += 1;
                    sets.clear();
                }
                Call::Set(name, value) => sets.push((name.clone(), *value)),
                Call::Load(_) => {}
            }
        }
        sets
    }

    pub fn last_set(&self, name: &str) -> Option<UniformValue> {
        self.calls.iter().rev().find_map(|call| match call {
            Call::Set(set_name, value) if set_name == name => Some(*value),
            _ => None,
        })
    }
}

impl ShaderProgram for RecordingBackend {
    fn set(&mut self, name: &str, value: UniformValue) {
        self.calls.push(Call::Set(name.to_string(), value));
    }
}

impl MeshDrawer for RecordingBackend {
    fn load(&mut self, primitive: Primitive) -> anyhow::Result<()> {
        self.calls.push(Call::Load(primitive));
        if self.unavailable.contains(&primitive) {
            anyhow::bail!("no geometry for {primitive:?}");
        }
        self.loaded.insert(primitive);
        Ok(())
    }

    fn is_loaded(&self, primitive: Primitive) -> bool {
        self.loaded.contains(&primitive)
    }

    fn draw(&mut self, primitive: Primitive, surfaces: Surfaces) {
        self.calls.push(Call::Draw(primitive, surfaces));
    }
}

impl RenderBackend for RecordingBackend {
    fn program(&mut self) -> Option<&mut dyn ShaderProgram> {
        if self.program_active {
            Some(self as &mut dyn ShaderProgram)
        } else {
            None
        }
    }
}

/// A fresh, empty directory for the files of one test.
pub fn temp_dir(test_name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "parlor-ngin-{}-{}",
        test_name,
        std::process::id()
    ));
    if dir.exists() {
        std::fs::remove_dir_all(&dir).unwrap();
    }
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

pub fn write_rgb(dir: &Path, file: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(file);
    RgbImage::from_pixel(width, height, Rgb([200, 120, 40]))
        .save(&path)
        .unwrap();
    path
}

pub fn write_rgba(dir: &Path, file: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(file);
    RgbaImage::from_pixel(width, height, Rgba([20, 40, 60, 128]))
        .save(&path)
        .unwrap();
    path
}

pub fn write_gray(dir: &Path, file: &str) -> PathBuf {
    let path = dir.join(file);
    GrayImage::from_pixel(4, 4, Luma([90])).save(&path).unwrap();
    path
}

pub fn write_gray_alpha(dir: &Path, file: &str) -> PathBuf {
    let path = dir.join(file);
    GrayAlphaImage::from_pixel(4, 4, LumaA([90, 255]))
        .save(&path)
        .unwrap();
    path
}

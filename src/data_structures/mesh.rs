//! Primitive meshes and the contract for drawing them.
//!
//! A scene is assembled from a small fixed set of primitives. Each one is loaded
//! once and then drawn any number of times with different uniforms. Primitives
//! with caps (cylinders, cones) can draw their top, bottom and side surfaces
//! separately so one logical object can carry a different texture per face.

use std::ops::Range;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Primitive {
    Plane,
    Box,
    Cylinder,
    Sphere,
    TaperedCylinder,
    Cone,
    HalfSphere,
}

impl Primitive {
    pub const ALL: [Primitive; 7] = [
        Primitive::Plane,
        Primitive::Box,
        Primitive::Cylinder,
        Primitive::Sphere,
        Primitive::TaperedCylinder,
        Primitive::Cone,
        Primitive::HalfSphere,
    ];

    /// File name (without extension) the geometry of this primitive is stored under.
    pub fn file_stem(&self) -> &'static str {
        match self {
            Primitive::Plane => "plane",
            Primitive::Box => "box",
            Primitive::Cylinder => "cylinder",
            Primitive::Sphere => "sphere",
            Primitive::TaperedCylinder => "tapered_cylinder",
            Primitive::Cone => "cone",
            Primitive::HalfSphere => "half_sphere",
        }
    }
}

/// A part of a primitive that can be drawn on its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Surface {
    Top,
    Bottom,
    Sides,
}

impl Surface {
    /// Caps are named `top` and `bottom`, everything else counts as side geometry.
    pub fn from_group_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "top" => Surface::Top,
            "bottom" => Surface::Bottom,
            _ => Surface::Sides,
        }
    }
}

/// Which surfaces a draw call renders. Primitives without caps only have sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Surfaces {
    pub top: bool,
    pub bottom: bool,
    pub sides: bool,
}

impl Surfaces {
    pub const ALL: Surfaces = Surfaces::new(true, true, true);
    pub const TOP: Surfaces = Surfaces::new(true, false, false);
    pub const BOTTOM: Surfaces = Surfaces::new(false, true, false);
    pub const SIDES: Surfaces = Surfaces::new(false, false, true);

    pub const fn new(top: bool, bottom: bool, sides: bool) -> Self {
        Self { top, bottom, sides }
    }

    pub fn includes(&self, surface: Surface) -> bool {
        match surface {
            Surface::Top => self.top,
            Surface::Bottom => self.bottom,
            Surface::Sides => self.sides,
        }
    }
}

impl Default for Surfaces {
    fn default() -> Self {
        Self::ALL
    }
}

/// Load-once, draw-many access to the primitive meshes.
pub trait MeshDrawer {
    /// Make `primitive` drawable. Loading an already loaded primitive does nothing.
    fn load(&mut self, primitive: Primitive) -> anyhow::Result<()>;

    fn is_loaded(&self, primitive: Primitive) -> bool;

    /// Draw the selected surfaces of `primitive` with the uniforms currently set on
    /// the active shader program.
    fn draw(&mut self, primitive: Primitive, surfaces: Surfaces);
}

pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coords: [f32; 2],
}

impl Vertex for MeshVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// A contiguous index range that belongs to one surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MeshPart {
    pub surface: Surface,
    pub indices: Range<u32>,
}

/// CPU-side geometry of one primitive, split into surfaces.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
    pub parts: Vec<MeshPart>,
}

impl MeshData {
    /// Index ranges to draw for `surfaces`, in the order the parts were stored.
    pub fn ranges(&self, surfaces: Surfaces) -> impl Iterator<Item = Range<u32>> + '_ {
        self.parts
            .iter()
            .filter(move |part| surfaces.includes(part.surface))
            .map(|part| part.indices.clone())
    }
}

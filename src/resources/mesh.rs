use std::{
    collections::HashMap,
    io::{BufRead, BufReader, Cursor},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use wgpu::util::DeviceExt;

use crate::data_structures::mesh::{MeshData, MeshPart, MeshVertex, Primitive, Surface};

/**
 * Reads the geometry of one primitive from OBJ text. Every object/group in the file
 * becomes one part; groups called `top` or `bottom` are the caps that can be drawn
 * on their own.
 */
pub fn mesh_data_from_obj(reader: &mut impl BufRead) -> anyhow::Result<MeshData> {
    let (models, _) = tobj::load_obj_buf(
        reader,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
        // Primitives carry no materials, those come from the scene.
        |_| Err(tobj::LoadError::OpenFileFailed),
    )?;

    let mut data = MeshData::default();
    for model in models {
        let m = &model.mesh;
        let base = data.vertices.len() as u32;
        data.vertices
            .extend((0..m.positions.len() / 3).map(|i| MeshVertex {
                position: [m.positions[i * 3], m.positions[i * 3 + 1], m.positions[i * 3 + 2]],
                normal: [
                    m.normals.get(i * 3).map_or(0.0, |f| *f),
                    m.normals.get(i * 3 + 1).map_or(0.0, |f| *f),
                    m.normals.get(i * 3 + 2).map_or(0.0, |f| *f),
                ],
                // Images are flipped on load, so v already points up like in the file.
                tex_coords: [
                    m.texcoords.get(i * 2).map_or(0.0, |f| *f),
                    m.texcoords.get(i * 2 + 1).map_or(0.0, |f| *f),
                ],
            }));

        let start = data.indices.len() as u32;
        data.indices.extend(m.indices.iter().map(|index| index + base));
        let end = data.indices.len() as u32;
        if end > start {
            data.parts.push(MeshPart {
                surface: Surface::from_group_name(&model.name),
                indices: start..end,
            });
        }
    }
    Ok(data)
}

pub fn load_mesh_data(path: &Path) -> anyhow::Result<MeshData> {
    let obj_text = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read mesh file {}", path.display()))?;
    let mut obj_reader = BufReader::new(Cursor::new(obj_text));
    mesh_data_from_obj(&mut obj_reader)
        .with_context(|| format!("Could not parse mesh file {}", path.display()))
}

/// A primitive uploaded to the GPU.
#[derive(Debug)]
pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub parts: Vec<MeshPart>,
}

impl GpuMesh {
    pub fn new(device: &wgpu::Device, data: &MeshData, label: &str) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Vertex Buffer")),
            contents: bytemuck::cast_slice(&data.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Index Buffer")),
            contents: bytemuck::cast_slice(&data.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            parts: data.parts.clone(),
        }
    }
}

/// Primitive meshes read from `<dir>/<primitive>.obj`, each uploaded once.
pub struct MeshLibrary {
    device: wgpu::Device,
    dir: PathBuf,
    meshes: HashMap<Primitive, GpuMesh>,
}

impl MeshLibrary {
    pub fn new(device: &wgpu::Device, dir: impl Into<PathBuf>) -> Self {
        Self {
            device: device.clone(),
            dir: dir.into(),
            meshes: HashMap::new(),
        }
    }

    pub fn load(&mut self, primitive: Primitive) -> anyhow::Result<()> {
        if self.meshes.contains_key(&primitive) {
            return Ok(());
        }
        let path = self.dir.join(format!("{}.obj", primitive.file_stem()));
        let data = load_mesh_data(&path)?;
        log::info!(
            "Loaded {:?} mesh with {} vertices in {} parts",
            primitive,
            data.vertices.len(),
            data.parts.len()
        );
        let mesh = GpuMesh::new(&self.device, &data, primitive.file_stem());
        self.meshes.insert(primitive, mesh);
        Ok(())
    }

    pub fn get(&self, primitive: Primitive) -> Option<&GpuMesh> {
        self.meshes.get(&primitive)
    }
}

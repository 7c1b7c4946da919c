//! The wgpu side of drawing a scene.
//!
//! [`GpuRenderer`] is the shader program and mesh drawer the composer renders
//! through. A scene draw is recorded in two steps:
//!
//! - every [`MeshDrawer::draw`] call snapshots the draw uniforms that are set at
//!   that moment, so later uniform changes do not leak into earlier draws
//! - [`GpuRenderer::encode`] uploads all snapshots at once and replays the draws
//!   into a render pass, each with its own dynamic uniform offset and texture unit
//!
//! Uniforms that are never overwritten keep their value across draws and frames.

use std::{collections::HashSet, path::PathBuf};

use cgmath::EuclideanSpace;

use crate::{
    composer::RenderBackend,
    context::Viewpoint,
    data_structures::mesh::{MeshDrawer, Primitive, Surfaces},
    pipelines::scene::{mk_draw_bind_group_layout, mk_frame_bind_group_layout, mk_scene_pipeline},
    resources::{mesh::MeshLibrary, texture::WgpuTextures},
    shader::{
        DrawUniform, FrameUniform, PROJECTION, ShaderProgram, UniformBlock, VIEW, VIEW_POSITION,
    },
};

/// Initial number of draws the per-draw uniform buffer has room for.
const INITIAL_DRAW_CAPACITY: usize = 64;

/// A recorded draw call.
#[derive(Clone, Copy, Debug)]
struct DrawCommand {
    primitive: Primitive,
    surfaces: Surfaces,
    uniform: DrawUniform,
}

pub struct GpuRenderer {
    device: wgpu::Device,
    queue: wgpu::Queue,
    program: UniformBlock,
    meshes: MeshLibrary,
    pipeline: wgpu::RenderPipeline,
    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    draw_layout: wgpu::BindGroupLayout,
    draw_buffer: wgpu::Buffer,
    draw_bind_group: wgpu::BindGroup,
    draw_capacity: usize,
    draw_stride: u64,
    commands: Vec<DrawCommand>,
    warned_missing: HashSet<Primitive>,
}

impl GpuRenderer {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        color_format: wgpu::TextureFormat,
        textures: &WgpuTextures,
        mesh_dir: impl Into<PathBuf>,
    ) -> Self {
        let frame_layout = mk_frame_bind_group_layout(device);
        let draw_layout = mk_draw_bind_group_layout(device);
        let pipeline = mk_scene_pipeline(
            device,
            color_format,
            &frame_layout,
            &draw_layout,
            textures.layout(),
        );

        let frame_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Frame Uniform Buffer"),
            size: size_of::<FrameUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &frame_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
            label: Some("frame_bind_group"),
        });

        let alignment = device.limits().min_uniform_buffer_offset_alignment as u64;
        let draw_stride = (size_of::<DrawUniform>() as u64).div_ceil(alignment) * alignment;
        let (draw_buffer, draw_bind_group) =
            mk_draw_resources(device, &draw_layout, draw_stride, INITIAL_DRAW_CAPACITY);

        Self {
            device: device.clone(),
            queue: queue.clone(),
            program: UniformBlock::new(),
            meshes: MeshLibrary::new(device, mesh_dir),
            pipeline,
            frame_buffer,
            frame_bind_group,
            draw_layout,
            draw_buffer,
            draw_bind_group,
            draw_capacity: INITIAL_DRAW_CAPACITY,
            draw_stride,
            commands: Vec::new(),
            warned_missing: HashSet::new(),
        }
    }

    /// Point the camera from `viewpoint` for a surface of the given aspect ratio.
    pub fn set_viewpoint(&mut self, viewpoint: &Viewpoint, aspect: f32) {
        self.program.set_mat4(VIEW, viewpoint.view_matrix());
        self.program
            .set_mat4(PROJECTION, viewpoint.projection_matrix(aspect));
        self.program.set_vec3(VIEW_POSITION, viewpoint.eye.to_vec());
    }

    /// Forget the draws of the previous frame.
    pub fn begin_frame(&mut self) {
        self.commands.clear();
    }

    pub fn recorded_draws(&self) -> usize {
        self.commands.len()
    }

    /// Upload the uniforms of this frame and replay every recorded draw.
    pub fn encode(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        depth_view: &wgpu::TextureView,
        clear_colour: wgpu::Color,
        textures: &WgpuTextures,
    ) {
        self.upload_uniforms();

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Scene Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear_colour),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            ..Default::default()
        });

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.frame_bind_group, &[]);
        for (index, command) in self.commands.iter().enumerate() {
            let Some(mesh) = self.meshes.get(command.primitive) else {
                continue;
            };
            let offset = index as u64 * self.draw_stride;
            render_pass.set_bind_group(1, &self.draw_bind_group, &[offset as u32]);
            let slot = if command.uniform.use_texture != 0 {
                command.uniform.texture_slot
            } else {
                crate::bridge::NOT_FOUND_SLOT
            };
            render_pass.set_bind_group(2, textures.unit(slot), &[]);
            render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
            render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            for part in mesh
                .parts
                .iter()
                .filter(|part| command.surfaces.includes(part.surface))
            {
                render_pass.draw_indexed(part.indices.clone(), 0, 0..1);
            }
        }
    }

    fn upload_uniforms(&mut self) {
        self.queue.write_buffer(
            &self.frame_buffer,
            0,
            bytemuck::cast_slice(&[*self.program.frame()]),
        );

        if self.commands.len() > self.draw_capacity {
            let capacity = self.commands.len().next_power_of_two();
            let (buffer, bind_group) =
                mk_draw_resources(&self.device, &self.draw_layout, self.draw_stride, capacity);
            self.draw_buffer = buffer;
            self.draw_bind_group = bind_group;
            self.draw_capacity = capacity;
        }
        if self.commands.is_empty() {
            return;
        }

        let stride = self.draw_stride as usize;
        let mut bytes = vec![0u8; self.commands.len() * stride];
        for (chunk, command) in bytes.chunks_exact_mut(stride).zip(&self.commands) {
            chunk[..size_of::<DrawUniform>()].copy_from_slice(bytemuck::bytes_of(&command.uniform));
        }
        self.queue.write_buffer(&self.draw_buffer, 0, &bytes);
    }
}

fn mk_draw_resources(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    stride: u64,
    capacity: usize,
) -> (wgpu::Buffer, wgpu::BindGroup) {
    let buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Draw Uniform Buffer"),
        size: stride * capacity as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                buffer: &buffer,
                offset: 0,
                size: wgpu::BufferSize::new(size_of::<DrawUniform>() as u64),
            }),
        }],
        label: Some("draw_bind_group"),
    });
    (buffer, bind_group)
}

impl MeshDrawer for GpuRenderer {
    fn load(&mut self, primitive: Primitive) -> anyhow::Result<()> {
        self.meshes.load(primitive)
    }

    fn is_loaded(&self, primitive: Primitive) -> bool {
        self.meshes.get(primitive).is_some()
    }

    fn draw(&mut self, primitive: Primitive, surfaces: Surfaces) {
        if !self.is_loaded(primitive) {
            if self.warned_missing.insert(primitive) {
                log::warn!("{primitive:?} mesh is not loaded, its draws are skipped");
            }
            return;
        }
        self.commands.push(DrawCommand {
            primitive,
            surfaces,
            uniform: *self.program.draw(),
        });
    }
}

impl RenderBackend for GpuRenderer {
    fn program(&mut self) -> Option<&mut dyn ShaderProgram> {
        Some(&mut self.program as &mut dyn ShaderProgram)
    }
}

//! Texture loading and the tag → slot registry.
//!
//! Images are decoded on the CPU with the `image` crate and handed to a
//! [`TextureBackend`] for upload. The [`TextureRegistry`] records every upload
//! under a tag and hands out slots in load order: the first texture loaded
//! occupies slot 0, the second slot 1 and so on. Slots are what the shader
//! samples from, so they only become meaningful after [`TextureRegistry::bind_all`].

use std::{
    collections::HashMap,
    fmt::Debug,
    path::{Path, PathBuf},
};

use image::RgbaImage;

use crate::{
    data_structures::texture::Texture,
    error::{Result, SceneError},
};

/// Number of texture units a scene can bind at once unless configured otherwise.
pub const DEFAULT_TEXTURE_UNITS: usize = 16;

/// A decoded image, flipped so that row 0 is the bottom row, expanded to RGBA8.
#[derive(Clone, Debug)]
pub struct DecodedImage {
    pub path: PathBuf,
    pub channels: u8,
    pub pixels: RgbaImage,
}

impl DecodedImage {
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }
}

/// Decode an image file with 3 (RGB) or 4 (RGBA) color channels.
pub fn decode_image(path: &Path) -> Result<DecodedImage> {
    let img = image::open(path).map_err(|source| SceneError::Load {
        path: path.to_path_buf(),
        source,
    })?;
    let channels = img.color().channel_count();
    if channels != 3 && channels != 4 {
        return Err(SceneError::UnsupportedFormat {
            path: path.to_path_buf(),
            channels,
        });
    }
    // Texture coordinates have their origin at the bottom left.
    let pixels = img.flipv().to_rgba8();
    Ok(DecodedImage {
        path: path.to_path_buf(),
        channels,
        pixels,
    })
}

/// GPU side of texture management.
pub trait TextureBackend {
    /// Opaque identifier of an uploaded texture.
    type Handle: Copy + Eq + Debug;

    fn upload(&mut self, image: &DecodedImage, label: &str) -> Result<Self::Handle>;

    /// Number of texture units that can be bound simultaneously.
    fn max_units(&self) -> usize;

    /// Make `handle` the texture sampled through `unit`.
    fn bind(&mut self, unit: usize, handle: Self::Handle);

    fn release(&mut self, handle: Self::Handle);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextureEntry<H> {
    pub tag: String,
    pub handle: H,
}

/// All textures of a scene, in load order.
///
/// Owns the backend and every handle it created. Handles are released by
/// [`release_all`](Self::release_all) or when the registry is dropped.
pub struct TextureRegistry<B: TextureBackend> {
    backend: B,
    entries: Vec<TextureEntry<B::Handle>>,
    slots: HashMap<String, usize>,
    bound: bool,
}

impl<B: TextureBackend> TextureRegistry<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            entries: Vec::new(),
            slots: HashMap::new(),
            bound: false,
        }
    }

    /// Decode `path`, upload it and register it under `tag`.
    ///
    /// Returns the slot the texture will be bound to. On failure the error is logged
    /// and the registry is left exactly as it was.
    pub fn load(&mut self, path: impl AsRef<Path>, tag: &str) -> Result<usize> {
        let path = path.as_ref();
        let result = self.try_load(path, tag);
        if let Err(e) = &result {
            log::error!("Could not register texture `{tag}`: {e}");
        }
        result
    }

    fn try_load(&mut self, path: &Path, tag: &str) -> Result<usize> {
        if self.slots.contains_key(tag) {
            return Err(SceneError::DuplicateTexture(tag.to_string()));
        }
        let image = decode_image(path)?;
        let handle = self.backend.upload(&image, tag)?;
        log::info!(
            "Loaded image {}, width: {}, height: {}, channels: {}",
            path.display(),
            image.width(),
            image.height(),
            image.channels
        );

        let slot = self.entries.len();
        self.entries.push(TextureEntry {
            tag: tag.to_string(),
            handle,
        });
        self.slots.insert(tag.to_string(), slot);
        self.bound = false;
        Ok(slot)
    }

    /// Bind every texture to the unit matching its slot, in load order.
    ///
    /// Having more textures than units is an authoring error; nothing is bound then.
    pub fn bind_all(&mut self) -> Result<()> {
        let limit = self.backend.max_units();
        if self.entries.len() > limit {
            return Err(SceneError::CapacityExceeded {
                loaded: self.entries.len(),
                limit,
            });
        }
        for (unit, entry) in self.entries.iter().enumerate() {
            self.backend.bind(unit, entry.handle);
        }
        self.bound = true;
        Ok(())
    }

    /// Slot of the texture registered under `tag`, exact and case-sensitive.
    pub fn find_slot(&self, tag: &str) -> Option<usize> {
        self.slots.get(tag).copied()
    }

    pub fn find_handle(&self, tag: &str) -> Option<B::Handle> {
        self.find_slot(tag).map(|slot| self.entries[slot].handle)
    }

    /// Whether every loaded texture is currently bound to its unit.
    pub fn is_bound(&self) -> bool {
        self.bound
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[TextureEntry<B::Handle>] {
        &self.entries
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Release every texture. Calling this again is a no-op.
    pub fn release_all(&mut self) {
        for entry in self.entries.drain(..) {
            self.backend.release(entry.handle);
        }
        self.slots.clear();
        self.bound = false;
    }
}

impl<B: TextureBackend> Drop for TextureRegistry<B> {
    fn drop(&mut self) {
        self.release_all();
    }
}

pub fn texture_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
        label: Some("object_texture_bind_group_layout"),
    })
}

fn texture_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    texture: &Texture,
    sampler: &wgpu::Sampler,
    label: &str,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&texture.view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(texture.sampler.as_ref().unwrap_or(sampler)),
            },
        ],
        label: Some(label),
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(usize);

/// wgpu implementation of [`TextureBackend`].
///
/// A texture unit is a bind group holding one texture and its sampler. Units
/// that hold nothing resolve to a 1x1 white fallback.
pub struct WgpuTextures {
    device: wgpu::Device,
    queue: wgpu::Queue,
    layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    max_units: usize,
    textures: Vec<Option<Texture>>,
    units: Vec<Option<(TextureId, wgpu::BindGroup)>>,
    fallback: wgpu::BindGroup,
}

impl WgpuTextures {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue, max_units: usize) -> Self {
        let layout = texture_bind_group_layout(device);
        let sampler = crate::data_structures::texture::create_default_sampler(device);
        let fallback_texture = Texture::create_fallback(device, queue);
        let fallback = texture_bind_group(
            device,
            &layout,
            &fallback_texture,
            &sampler,
            "fallback_texture_bind_group",
        );
        Self {
            device: device.clone(),
            queue: queue.clone(),
            layout,
            sampler,
            max_units,
            textures: Vec::new(),
            units: Vec::new(),
            fallback,
        }
    }

    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    /// Bind group for a sampler index as set on the shader.
    ///
    /// Negative, out of range or empty units give the fallback texture.
    pub fn unit(&self, index: i32) -> &wgpu::BindGroup {
        usize::try_from(index)
            .ok()
            .and_then(|index| self.units.get(index))
            .and_then(Option::as_ref)
            .map(|(_, group)| group)
            .unwrap_or(&self.fallback)
    }
}

impl TextureBackend for WgpuTextures {
    type Handle = TextureId;

    fn upload(&mut self, image: &DecodedImage, label: &str) -> Result<TextureId> {
        let max = self.device.limits().max_texture_dimension_2d;
        if image.width() > max || image.height() > max {
            return Err(SceneError::Upload(format!(
                "{} is {}x{}, the device supports at most {max}x{max}",
                image.path.display(),
                image.width(),
                image.height()
            )));
        }
        let texture = Texture::from_rgba(&self.device, &self.queue, &image.pixels, Some(label));
        self.textures.push(Some(texture));
        Ok(TextureId(self.textures.len() - 1))
    }

    fn max_units(&self) -> usize {
        self.max_units
    }

    fn bind(&mut self, unit: usize, handle: TextureId) {
        let Some(Some(texture)) = self.textures.get(handle.0) else {
            log::warn!("Texture {handle:?} was released and cannot be bound to unit {unit}");
            return;
        };
        let group = texture_bind_group(
            &self.device,
            &self.layout,
            texture,
            &self.sampler,
            &format!("texture_unit_{unit}"),
        );
        if self.units.len() <= unit {
            self.units.resize_with(unit + 1, || None);
        }
        self.units[unit] = Some((handle, group));
    }

    fn release(&mut self, handle: TextureId) {
        for unit in self.units.iter_mut() {
            if matches!(unit, Some((bound, _)) if *bound == handle) {
                *unit = None;
            }
        }
        if let Some(Some(texture)) = self.textures.get_mut(handle.0).map(Option::take) {
            texture.texture.destroy();
        }
    }
}

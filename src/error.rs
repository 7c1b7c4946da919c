//! Error types for scene setup and rendering.
//!
//! Only failures that stop an operation from taking effect are errors. A tag that
//! cannot be resolved is not one of them: texture and material lookups return
//! `Option`, and the shader receives [`NOT_FOUND_SLOT`](crate::bridge::NOT_FOUND_SLOT)
//! so the object renders with a missing or stale appearance instead of aborting.

use std::path::PathBuf;

use thiserror::Error;

use crate::composer::Phase;

pub type Result<T> = std::result::Result<T, SceneError>;

#[derive(Error, Debug)]
pub enum SceneError {
    /// The image file could not be opened or decoded.
    #[error("Could not load image {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The image decoded to a channel count other than 3 (RGB) or 4 (RGBA).
    #[error("Image {path} has {channels} color channels, only 3 or 4 are supported")]
    UnsupportedFormat { path: PathBuf, channels: u8 },

    /// A texture with this tag was already registered.
    #[error("Texture tag `{0}` is already registered")]
    DuplicateTexture(String),

    /// The GPU rejected the texture upload.
    #[error("Texture upload failed: {0}")]
    Upload(String),

    /// More textures were loaded than there are bindable texture units.
    #[error("{loaded} textures were loaded but only {limit} texture units can be bound")]
    CapacityExceeded { loaded: usize, limit: usize },

    /// A scene phase was entered out of order.
    #[error("Scene is {found:?}, expected {expected:?}")]
    Phase { expected: Phase, found: Phase },
}

impl SceneError {
    /// Whether the error indicates an authoring mistake the scene cannot run with.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::CapacityExceeded { .. } | Self::Phase { .. })
    }
}

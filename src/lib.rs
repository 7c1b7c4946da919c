//! parlor-ngin
//!
//! A static scene composer on top of wgpu. A scene is a flat list of primitive
//! meshes, each placed in world space and colored by a texture or a flat color
//! plus an optional material. The composer loads the textures and materials of
//! a scene once, pushes the lights once and then issues one draw call per
//! object every frame.
//!
//! High-level modules
//! - `bridge`: pushes transforms, textures and materials into the active shader program
//! - `composer`: scene description and the setup / render / teardown lifecycle
//! - `context`: window and GPU context, render settings and the fixed viewpoint
//! - `data_structures`: transforms, materials, lights, meshes and textures
//! - `error`: error types of scene setup
//! - `flow`: the winit application running a scene
//! - `pipelines`: the scene render pipeline and its shader
//! - `render`: records draw calls and replays them into a render pass
//! - `resources`: texture registry, image decoding and mesh loading
//! - `scenes`: ready-made scenes
//! - `shader`: the named-uniform program interface and its uniform store
//!

pub mod bridge;
pub mod composer;
pub mod context;
pub mod data_structures;
pub mod error;
pub mod flow;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod scenes;
pub mod shader;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::*;
pub use error::{Result, SceneError};

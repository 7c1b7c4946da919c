//! Engine data structures: transforms, materials, lights, meshes and textures.
//!
//! - `transform` composes model matrices from scale, rotation and position
//! - `material` holds named surface materials and their registry
//! - `light` describes the directional and point lights of a scene
//! - `mesh` defines the primitive meshes and the contract for drawing them
//! - `texture` contains the GPU texture wrapper and creation utilities

pub mod light;
pub mod material;
pub mod mesh;
pub mod texture;
pub mod transform;

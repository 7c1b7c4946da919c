use std::path::{Path, PathBuf};

/**
 * This module contains all logic for loading textures and primitive meshes from external files.
 */
pub mod mesh;
pub mod texture;

/// Resolve an asset path: absolute paths are kept, relative ones are looked up in `assets_dir`.
pub fn resolve_asset(assets_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        assets_dir.join(path)
    }
}

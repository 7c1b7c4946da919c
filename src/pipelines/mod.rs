//! Render pipelines and their bind group layouts.

pub mod scene;

//! Rendering backend (raylib).
//!
//! Re-exports:
//! - `textures`: Wood/brick textures with procedural fallbacks
//! - `scene`: Meshes, models and the per-frame 3D scene
//! - `hud`: Text overlay

pub mod textures;
pub mod scene;
pub mod hud;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("texture upload failed: {0}")]
    Texture(String),
    #[error("model creation failed: {0}")]
    Model(String),
}

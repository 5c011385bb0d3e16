//! Block catalogue, per-type capability table, and appearance registry.
#![forbid(unsafe_code)]

pub mod catalog;
pub mod config;
pub mod registry;
pub mod types;

// Re-exports for convenience
pub use catalog::{BlockTraits, traits};
pub use registry::{BlockRegistry, FaceAppearance, RegistryError, ShaderId, TextureSlot};
pub use types::{Block, BlockType, Color, Face, FaceRole, Visibility};

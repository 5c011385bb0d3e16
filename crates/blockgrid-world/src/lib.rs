//! Chunked world: lifecycle, persistence, generation, and body registry.
#![forbid(unsafe_code)]

pub mod body;
pub mod error;
pub mod generator;
pub mod storage;
pub mod world;

pub use body::Body;
pub use error::{StorageError, WorldError};
pub use generator::{ChunkGenerator, EmptyGenerator, FlatGenerator, NoiseGenerator, NoiseParams};
pub use storage::{ChunkStore, DirStore, MemoryStore};
pub use world::{LoadOutcome, World};

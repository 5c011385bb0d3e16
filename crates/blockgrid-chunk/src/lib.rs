//! Chunk storage, coordinate spaces, and mesh data types.
#![forbid(unsafe_code)]

pub mod chunk;
pub mod coords;
pub mod mesh;

pub use chunk::{Chunk, ChunkError, NeighborInvalidation};
pub use coords::{BlockInChunk, BlockInWorld, CHUNK_SIZE, CHUNK_VOLUME, ChunkInWorld};
pub use mesh::{MeshMap, MeshVertex, SurfaceKey, Triangle, triangle_count};

use blockgrid_blocks::Block;

/// Read access to blocks by absolute position. Unloaded space reads as [`Block::NONE`].
pub trait BlockSource: Sync {
    fn block_at(&self, pos: BlockInWorld) -> Block;
}

/// Source with nothing loaded; every lookup is `none`.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptySource;

impl BlockSource for EmptySource {
    fn block_at(&self, _pos: BlockInWorld) -> Block {
        Block::NONE
    }
}

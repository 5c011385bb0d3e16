//! Persistence seam: opaque byte blobs keyed by chunk, plus one world blob.

mod codec;
mod dir;
mod memory;

pub use codec::{BlockIds, WorldMeta, decode_chunk, decode_world, encode_chunk, encode_world};
pub use dir::DirStore;
pub use memory::MemoryStore;

use blockgrid_chunk::ChunkInWorld;

use crate::error::StorageError;

pub trait ChunkStore: Send + Sync {
    /// Stored blob for `key`, or `None` if the chunk was never saved.
    fn load_chunk(&self, key: ChunkInWorld) -> Result<Option<Vec<u8>>, StorageError>;
    fn save_chunk(&mut self, key: ChunkInWorld, blob: &[u8]) -> Result<(), StorageError>;
    fn load_world(&self) -> Result<Option<Vec<u8>>, StorageError>;
    fn save_world(&mut self, blob: &[u8]) -> Result<(), StorageError>;
}

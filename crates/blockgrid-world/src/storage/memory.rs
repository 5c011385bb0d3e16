use blockgrid_chunk::ChunkInWorld;
use hashbrown::HashMap;

use super::ChunkStore;
use crate::error::StorageError;

/// Volatile store; everything is lost with the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    chunks: HashMap<ChunkInWorld, Vec<u8>>,
    world: Option<Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn contains(&self, key: ChunkInWorld) -> bool {
        self.chunks.contains_key(&key)
    }
}

impl ChunkStore for MemoryStore {
    fn load_chunk(&self, key: ChunkInWorld) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.chunks.get(&key).cloned())
    }

    fn save_chunk(&mut self, key: ChunkInWorld, blob: &[u8]) -> Result<(), StorageError> {
        self.chunks.insert(key, blob.to_vec());
        Ok(())
    }

    fn load_world(&self) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.world.clone())
    }

    fn save_world(&mut self, blob: &[u8]) -> Result<(), StorageError> {
        self.world = Some(blob.to_vec());
        Ok(())
    }
}

use blockgrid_blocks::{Block, BlockType, Color};
use blockgrid_chunk::{CHUNK_VOLUME, Chunk, ChunkInWorld};
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::error::StorageError;

#[derive(Serialize, Deserialize)]
struct StoredBlock {
    id: u16,
    color: Color,
}

#[derive(Serialize, Deserialize)]
struct ChunkBlob {
    pos: ChunkInWorld,
    blocks: Vec<StoredBlock>,
    lights: Vec<Color>,
}

/// World-level record: tick counter and the id table chunk blobs were written with.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldMeta {
    pub ticks: u64,
    pub block_ids: Vec<(u16, String)>,
}

/// Maps stored numeric ids back to block kinds by name.
#[derive(Clone, Debug)]
pub struct BlockIds {
    by_id: HashMap<u16, BlockType>,
}

impl BlockIds {
    /// Names that no longer exist in the catalogue are dropped; their ids decode as errors.
    pub fn from_table(table: &[(u16, String)]) -> Self {
        let by_id = table
            .iter()
            .filter_map(|(id, name)| BlockType::from_name(name).map(|ty| (*id, ty)))
            .collect();
        Self { by_id }
    }

    #[inline]
    pub fn lookup(&self, id: u16) -> Option<BlockType> {
        self.by_id.get(&id).copied()
    }
}

pub fn encode_chunk(chunk: &Chunk) -> Result<Vec<u8>, StorageError> {
    let blob = ChunkBlob {
        pos: chunk.pos(),
        blocks: chunk
            .blocks()
            .iter()
            .map(|b| StoredBlock {
                id: b.ty().id(),
                color: b.color(),
            })
            .collect(),
        lights: chunk.lights().to_vec(),
    };
    Ok(bincode::serialize(&blob)?)
}

pub fn decode_chunk(bytes: &[u8], key: ChunkInWorld, ids: &BlockIds) -> Result<Chunk, StorageError> {
    let blob: ChunkBlob =
        bincode::deserialize(bytes).map_err(|e| StorageError::corrupt(e.to_string()))?;
    if blob.pos != key {
        return Err(StorageError::corrupt(format!(
            "blob for chunk {} stored under {}",
            blob.pos, key
        )));
    }
    if blob.blocks.len() != CHUNK_VOLUME || blob.lights.len() != CHUNK_VOLUME {
        return Err(StorageError::corrupt(format!(
            "expected {} cells, found {} blocks and {} lights",
            CHUNK_VOLUME,
            blob.blocks.len(),
            blob.lights.len()
        )));
    }
    let blocks = blob
        .blocks
        .iter()
        .map(|s| {
            ids.lookup(s.id)
                .map(|ty| Block::from_parts(ty, s.color))
                .ok_or(StorageError::UnknownBlockId(s.id))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Chunk::from_parts(blob.pos, blocks, blob.lights).map_err(|e| StorageError::corrupt(e.to_string()))
}

pub fn encode_world(meta: &WorldMeta) -> Result<Vec<u8>, StorageError> {
    Ok(bincode::serialize(meta)?)
}

pub fn decode_world(bytes: &[u8]) -> Result<WorldMeta, StorageError> {
    bincode::deserialize(bytes).map_err(|e| StorageError::corrupt(e.to_string()))
}

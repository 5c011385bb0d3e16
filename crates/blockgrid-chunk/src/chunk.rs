use blockgrid_blocks::{Block, Color};
use thiserror::Error;

use crate::coords::{BlockInChunk, BlockInWorld, CHUNK_SIZE, CHUNK_VOLUME, ChunkInWorld};
use crate::mesh::MeshMap;
use crate::BlockSource;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChunkError {
    #[error("local position ({x}, {y}, {z}) is outside the chunk")]
    OutOfBounds { x: u8, y: u8, z: u8 },
    #[error("expected {expected} cells, got {got}")]
    WrongLength { expected: usize, got: usize },
}

/// Chunks bordering a modified cell whose meshes are now stale. At most one per axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NeighborInvalidation {
    keys: [Option<ChunkInWorld>; 3],
}

impl NeighborInvalidation {
    pub fn iter(&self) -> impl Iterator<Item = ChunkInWorld> + '_ {
        self.keys.iter().flatten().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.iter().all(Option::is_none)
    }

    pub fn len(&self) -> usize {
        self.keys.iter().flatten().count()
    }

    fn for_cell(chunk: ChunkInWorld, local: BlockInChunk) -> Self {
        let last = (CHUNK_SIZE - 1) as u8;
        let axis = |v: u8| -> i32 {
            if v == 0 {
                -1
            } else if v == last {
                1
            } else {
                0
            }
        };
        let d = [axis(local.x), axis(local.y), axis(local.z)];
        let mut keys = [None; 3];
        for (i, step) in d.into_iter().enumerate() {
            if step != 0 {
                let mut off = [0; 3];
                off[i] = step;
                keys[i] = Some(chunk.offset(off[0], off[1], off[2]));
            }
        }
        Self { keys }
    }
}

/// Dense `CHUNK_SIZE³` block volume with a parallel light array and a cached mesh.
#[derive(Clone, Debug)]
pub struct Chunk {
    pos: ChunkInWorld,
    blocks: Vec<Block>,
    lights: Vec<Color>,
    changed: bool,
    unsaved: bool,
    meshes: Option<MeshMap>,
}

impl Chunk {
    /// All-air chunk; starts changed so it is meshed once.
    pub fn new(pos: ChunkInWorld) -> Self {
        Self {
            pos,
            blocks: vec![Block::AIR; CHUNK_VOLUME],
            lights: vec![Color::BLACK; CHUNK_VOLUME],
            changed: true,
            unsaved: false,
            meshes: None,
        }
    }

    /// Rebuilds a chunk from decoded storage; the result is clean for storage purposes.
    pub fn from_parts(
        pos: ChunkInWorld,
        blocks: Vec<Block>,
        lights: Vec<Color>,
    ) -> Result<Self, ChunkError> {
        for len in [blocks.len(), lights.len()] {
            if len != CHUNK_VOLUME {
                return Err(ChunkError::WrongLength {
                    expected: CHUNK_VOLUME,
                    got: len,
                });
            }
        }
        Ok(Self {
            pos,
            blocks,
            lights,
            changed: true,
            unsaved: false,
            meshes: None,
        })
    }

    #[inline]
    pub fn pos(&self) -> ChunkInWorld {
        self.pos
    }

    #[inline]
    fn index(local: BlockInChunk) -> Result<usize, ChunkError> {
        local.index().ok_or(ChunkError::OutOfBounds {
            x: local.x,
            y: local.y,
            z: local.z,
        })
    }

    pub fn get_block(&self, local: BlockInChunk) -> Result<Block, ChunkError> {
        Ok(self.blocks[Self::index(local)?])
    }

    pub fn set_block(
        &mut self,
        local: BlockInChunk,
        block: Block,
    ) -> Result<NeighborInvalidation, ChunkError> {
        let i = Self::index(local)?;
        self.blocks[i] = block;
        self.changed = true;
        self.unsaved = true;
        Ok(NeighborInvalidation::for_cell(self.pos, local))
    }

    pub fn get_light(&self, local: BlockInChunk) -> Result<Color, ChunkError> {
        Ok(self.lights[Self::index(local)?])
    }

    pub fn set_light(&mut self, local: BlockInChunk, color: Color) -> Result<(), ChunkError> {
        let i = Self::index(local)?;
        self.lights[i] = color;
        self.changed = true;
        self.unsaved = true;
        Ok(())
    }

    /// Block at signed local coordinates; positions outside the chunk are read from `source`.
    /// Positions past the edge of the `i32` grid read as `none`.
    pub fn get_extended(&self, source: &dyn BlockSource, x: i32, y: i32, z: i32) -> Block {
        if let Some(i) = BlockInChunk::try_from_signed(x, y, z).and_then(BlockInChunk::index) {
            return self.blocks[i];
        }
        match self.pos.origin().checked_offset(x, y, z) {
            Some(pos) => source.block_at(pos),
            None => Block::NONE,
        }
    }

    /// Overwrites every cell. Does not mark the chunk unsaved.
    pub fn fill(&mut self, block: Block) {
        self.blocks.fill(block);
        self.changed = true;
    }

    /// Sets every cell in the horizontal layer `y`; generators use this for terrain slabs.
    pub fn fill_layer(&mut self, y: u8, block: Block) -> Result<(), ChunkError> {
        let start = Self::index(BlockInChunk::new(0, y, 0))?;
        let layer = (CHUNK_SIZE * CHUNK_SIZE) as usize;
        self.blocks[start..start + layer].fill(block);
        self.changed = true;
        Ok(())
    }

    /// Blocks in storage order.
    #[inline]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    #[inline]
    pub fn lights(&self) -> &[Color] {
        &self.lights
    }

    pub fn is_all_air(&self) -> bool {
        self.blocks.iter().all(|b| *b == Block::AIR)
    }

    #[inline]
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    #[inline]
    pub fn mark_changed(&mut self) {
        self.changed = true;
    }

    #[inline]
    pub fn is_unsaved(&self) -> bool {
        self.unsaved
    }

    #[inline]
    pub fn mark_unsaved(&mut self) {
        self.unsaved = true;
    }

    #[inline]
    pub fn mark_saved(&mut self) {
        self.unsaved = false;
    }

    #[inline]
    pub fn meshes(&self) -> Option<&MeshMap> {
        self.meshes.as_ref()
    }

    /// Caches a freshly built mesh and clears the changed flag.
    pub fn set_meshes(&mut self, meshes: MeshMap) {
        self.meshes = Some(meshes);
        self.changed = false;
    }

    pub fn take_meshes(&mut self) -> Option<MeshMap> {
        self.meshes.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_cells_invalidate_nothing() {
        let inv = NeighborInvalidation::for_cell(ChunkInWorld::new(0, 0, 0), BlockInChunk::new(5, 5, 5));
        assert!(inv.is_empty());
    }

    #[test]
    fn corner_cell_invalidates_three_neighbors() {
        let inv = NeighborInvalidation::for_cell(ChunkInWorld::new(2, 0, -1), BlockInChunk::new(0, 15, 0));
        let keys: Vec<_> = inv.iter().collect();
        assert_eq!(
            keys,
            vec![
                ChunkInWorld::new(1, 0, -1),
                ChunkInWorld::new(2, 1, -1),
                ChunkInWorld::new(2, 0, -2)
            ]
        );
    }
}

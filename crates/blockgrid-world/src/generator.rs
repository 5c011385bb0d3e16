//! Chunk generators: fill a freshly created chunk from its key alone.

use blockgrid_blocks::{Block, BlockType};
use blockgrid_chunk::{BlockInChunk, CHUNK_SIZE, Chunk, ChunkInWorld};
use fastnoise_lite::{FastNoiseLite, NoiseType};
use serde::Deserialize;

pub trait ChunkGenerator: Send + Sync {
    /// `chunk` arrives all-air with position `key`.
    fn generate(&self, key: ChunkInWorld, chunk: &mut Chunk);
}

/// Leaves every chunk empty.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyGenerator;

impl ChunkGenerator for EmptyGenerator {
    fn generate(&self, _key: ChunkInWorld, _chunk: &mut Chunk) {}
}

/// Every block below `ground_level` is `surface`.
#[derive(Clone, Copy, Debug)]
pub struct FlatGenerator {
    pub ground_level: i32,
    pub surface: Block,
}

impl Default for FlatGenerator {
    fn default() -> Self {
        Self {
            ground_level: 0,
            surface: Block::new(BlockType::CrappyMarble),
        }
    }
}

impl ChunkGenerator for FlatGenerator {
    fn generate(&self, key: ChunkInWorld, chunk: &mut Chunk) {
        let base = key.y * CHUNK_SIZE;
        let top = (self.ground_level - base).clamp(0, CHUNK_SIZE);
        if top == CHUNK_SIZE {
            chunk.fill(self.surface);
            return;
        }
        for y in 0..top {
            if let Err(e) = chunk.fill_layer(y as u8, self.surface) {
                log::warn!("flat generator skipped layer {y} of chunk {key}: {e}");
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct NoiseParams {
    pub seed: i32,
    pub base_height: i32,
    pub amplitude: f32,
    pub frequency: f32,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            seed: 1337,
            base_height: 0,
            amplitude: 12.0,
            frequency: 0.02,
        }
    }
}

/// Heightmap terrain: `white` topsoil over `crappy_marble`.
pub struct NoiseGenerator {
    params: NoiseParams,
    height: FastNoiseLite,
}

impl NoiseGenerator {
    pub fn new(params: NoiseParams) -> Self {
        let mut height = FastNoiseLite::with_seed(params.seed);
        height.set_noise_type(Some(NoiseType::OpenSimplex2));
        height.set_frequency(Some(params.frequency));
        Self { params, height }
    }

    /// Y of the first air block above the column.
    pub fn surface_height(&self, wx: i32, wz: i32) -> i32 {
        let n = self.height.get_noise_2d(wx as f32, wz as f32);
        self.params.base_height + (n * self.params.amplitude).round() as i32
    }
}

impl ChunkGenerator for NoiseGenerator {
    fn generate(&self, key: ChunkInWorld, chunk: &mut Chunk) {
        let origin = key.origin();
        let topsoil = Block::new(BlockType::White);
        let rock = Block::new(BlockType::CrappyMarble);
        for z in 0..CHUNK_SIZE {
            for x in 0..CHUNK_SIZE {
                let h = self.surface_height(origin.x + x, origin.z + z);
                for y in 0..CHUNK_SIZE {
                    let wy = origin.y + y;
                    if wy >= h {
                        break;
                    }
                    let block = if wy == h - 1 { topsoil } else { rock };
                    let local = BlockInChunk::new(x as u8, y as u8, z as u8);
                    if let Err(e) = chunk.set_block(local, block) {
                        log::warn!("noise generator skipped {local} in chunk {key}: {e}");
                    }
                }
            }
        }
    }
}

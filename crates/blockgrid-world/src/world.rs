use std::sync::Arc;
use std::time::Instant;

use blockgrid_blocks::{Block, BlockRegistry, Color};
use blockgrid_chunk::{BlockInWorld, BlockSource, Chunk, ChunkInWorld};
use hashbrown::HashMap;

use crate::body::Body;
use crate::error::{StorageError, WorldError};
use crate::generator::ChunkGenerator;
use crate::storage::{self, BlockIds, ChunkStore, WorldMeta};

/// How [`World::load_chunk`] produced the chunk now resident under a key.
#[derive(Debug)]
pub enum LoadOutcome {
    AlreadyLoaded,
    FromStorage,
    Generated,
    /// The stored blob could not be used; the chunk was generated instead.
    Regenerated { cause: StorageError },
}

impl LoadOutcome {
    pub fn is_new(&self) -> bool {
        !matches!(self, LoadOutcome::AlreadyLoaded)
    }
}

pub struct World {
    chunks: HashMap<ChunkInWorld, Chunk>,
    ticks: u64,
    bodies: HashMap<String, Body>,
    registry: Arc<BlockRegistry>,
    block_ids: BlockIds,
    store: Box<dyn ChunkStore>,
    generator: Box<dyn ChunkGenerator>,
}

impl World {
    /// Fresh world; ignores anything already in `store`'s world blob.
    pub fn new(
        registry: Arc<BlockRegistry>,
        store: Box<dyn ChunkStore>,
        generator: Box<dyn ChunkGenerator>,
    ) -> Self {
        let block_ids = BlockIds::from_table(&registry.id_table());
        Self {
            chunks: HashMap::new(),
            ticks: 0,
            bodies: HashMap::new(),
            registry,
            block_ids,
            store,
            generator,
        }
    }

    /// Restores tick count and block-id table from `store`, or starts fresh if it holds no world.
    pub fn open(
        registry: Arc<BlockRegistry>,
        store: Box<dyn ChunkStore>,
        generator: Box<dyn ChunkGenerator>,
    ) -> Result<Self, WorldError> {
        let meta = match store.load_world()? {
            Some(bytes) => Some(storage::decode_world(&bytes)?),
            None => None,
        };
        let mut world = Self::new(registry, store, generator);
        if let Some(meta) = meta {
            log::info!(
                "opened world at tick {} ({} block ids)",
                meta.ticks,
                meta.block_ids.len()
            );
            world.ticks = meta.ticks;
            world.block_ids = BlockIds::from_table(&meta.block_ids);
        }
        Ok(world)
    }

    #[inline]
    pub fn registry(&self) -> &BlockRegistry {
        &self.registry
    }

    pub fn registry_arc(&self) -> Arc<BlockRegistry> {
        Arc::clone(&self.registry)
    }

    pub fn store(&self) -> &dyn ChunkStore {
        self.store.as_ref()
    }

    pub fn tick(&mut self) {
        self.ticks += 1;
    }

    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    // ---- blocks ----

    /// Block at `pos`; `none` when its chunk is not loaded.
    pub fn get_block(&self, pos: BlockInWorld) -> Block {
        match self.chunks.get(&pos.chunk()) {
            Some(chunk) => chunk.get_block(pos.local()).unwrap_or(Block::NONE),
            None => Block::NONE,
        }
    }

    /// Loads or generates the owning chunk, writes the block, then dirties bordering chunks.
    pub fn set_block(&mut self, pos: BlockInWorld, block: Block) -> Result<(), WorldError> {
        let key = pos.chunk();
        self.load_chunk(key);
        let invalidation = match self.chunks.get_mut(&key) {
            Some(chunk) => chunk.set_block(pos.local(), block)?,
            None => return Ok(()),
        };
        for neighbor in invalidation.iter() {
            if let Some(chunk) = self.chunks.get_mut(&neighbor) {
                chunk.mark_changed();
            }
        }
        Ok(())
    }

    pub fn get_light(&self, pos: BlockInWorld) -> Color {
        self.chunks
            .get(&pos.chunk())
            .and_then(|c| c.get_light(pos.local()).ok())
            .unwrap_or(Color::BLACK)
    }

    pub fn set_light(&mut self, pos: BlockInWorld, color: Color) -> Result<(), WorldError> {
        let key = pos.chunk();
        self.load_chunk(key);
        if let Some(chunk) = self.chunks.get_mut(&key) {
            chunk.set_light(pos.local(), color)?;
        }
        Ok(())
    }

    // ---- chunk lifecycle ----

    #[inline]
    pub fn get_chunk(&self, key: ChunkInWorld) -> Option<&Chunk> {
        self.chunks.get(&key)
    }

    #[inline]
    pub fn get_chunk_mut(&mut self, key: ChunkInWorld) -> Option<&mut Chunk> {
        self.chunks.get_mut(&key)
    }

    pub fn is_loaded(&self, key: ChunkInWorld) -> bool {
        self.chunks.contains_key(&key)
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Loaded keys in ascending order.
    pub fn loaded_keys(&self) -> Vec<ChunkInWorld> {
        let mut keys: Vec<_> = self.chunks.keys().copied().collect();
        keys.sort_unstable();
        keys
    }

    pub fn chunks(&self) -> impl Iterator<Item = (&ChunkInWorld, &Chunk)> {
        self.chunks.iter()
    }

    /// Makes `key` resident. Storage failures are logged and fall back to generation.
    pub fn load_chunk(&mut self, key: ChunkInWorld) -> LoadOutcome {
        if self.chunks.contains_key(&key) {
            return LoadOutcome::AlreadyLoaded;
        }
        let t0 = Instant::now();
        let stored = self
            .store
            .load_chunk(key)
            .and_then(|blob| match blob {
                Some(bytes) => storage::decode_chunk(&bytes, key, &self.block_ids).map(Some),
                None => Ok(None),
            });
        let (chunk, outcome) = match stored {
            Ok(Some(chunk)) => (chunk, LoadOutcome::FromStorage),
            Ok(None) => (self.generate(key), LoadOutcome::Generated),
            Err(cause) => {
                log::error!("chunk {key} could not be loaded, regenerating: {cause}");
                let mut chunk = self.generate(key);
                // Overwrite the unusable blob on the next save.
                chunk.mark_unsaved();
                (chunk, LoadOutcome::Regenerated { cause })
            }
        };
        self.chunks.insert(key, chunk);
        self.invalidate_neighbors(key);
        log::debug!(
            target: "perf",
            "ms={} chunk_load key={} outcome={:?}",
            t0.elapsed().as_millis(),
            key,
            outcome
        );
        outcome
    }

    fn generate(&self, key: ChunkInWorld) -> Chunk {
        let mut chunk = Chunk::new(key);
        self.generator.generate(key, &mut chunk);
        chunk.mark_saved();
        chunk
    }

    // A new chunk changes which faces its loaded neighbors expose along the shared border.
    fn invalidate_neighbors(&mut self, key: ChunkInWorld) {
        for d in [[1, 0, 0], [-1, 0, 0], [0, 1, 0], [0, -1, 0], [0, 0, 1], [0, 0, -1]] {
            if let Some(chunk) = self.chunks.get_mut(&key.offset(d[0], d[1], d[2])) {
                chunk.mark_changed();
            }
        }
    }

    /// Evicts `key`, persisting it first when it has unsaved edits. `Ok(false)` if it was not loaded.
    pub fn unload_chunk(&mut self, key: ChunkInWorld) -> Result<bool, WorldError> {
        let Some(chunk) = self.chunks.get_mut(&key) else {
            return Ok(false);
        };
        if chunk.is_unsaved() {
            let blob = storage::encode_chunk(chunk)?;
            self.store.save_chunk(key, &blob)?;
            chunk.mark_saved();
        }
        self.chunks.remove(&key);
        self.invalidate_neighbors(key);
        Ok(true)
    }

    /// Writes the world blob and every loaded chunk with unsaved edits. Returns the chunk count written.
    pub fn save_all(&mut self) -> Result<usize, WorldError> {
        let meta = WorldMeta {
            ticks: self.ticks,
            block_ids: self.registry.id_table(),
        };
        self.store.save_world(&storage::encode_world(&meta)?)?;
        let mut saved = 0;
        for (key, chunk) in self.chunks.iter_mut() {
            if !chunk.is_unsaved() {
                continue;
            }
            let blob = storage::encode_chunk(chunk)?;
            self.store.save_chunk(*key, &blob)?;
            chunk.mark_saved();
            saved += 1;
        }
        // Chunks still loaded are now written with the current table.
        self.block_ids = BlockIds::from_table(&meta.block_ids);
        log::info!("saved world at tick {} ({} chunks written)", self.ticks, saved);
        Ok(saved)
    }

    /// Cube of chunk keys within `radius` (Chebyshev) of `center`, in ascending order.
    pub fn keys_within(center: ChunkInWorld, radius: i32) -> Vec<ChunkInWorld> {
        let r = radius.max(0);
        let mut keys = Vec::with_capacity(((2 * r + 1) as usize).pow(3));
        for x in -r..=r {
            for y in -r..=r {
                for z in -r..=r {
                    keys.push(center.offset(x, y, z));
                }
            }
        }
        keys
    }

    // ---- bodies ----

    /// Registers `body` under `name`, returning the body it replaced.
    pub fn add_body(&mut self, name: impl Into<String>, body: Body) -> Option<Body> {
        self.bodies.insert(name.into(), body)
    }

    pub fn body(&self, name: &str) -> Option<&Body> {
        self.bodies.get(name)
    }

    pub fn body_mut(&mut self, name: &str) -> Option<&mut Body> {
        self.bodies.get_mut(name)
    }

    pub fn remove_body(&mut self, name: &str) -> Option<Body> {
        self.bodies.remove(name)
    }

    pub fn bodies(&self) -> impl Iterator<Item = (&str, &Body)> {
        self.bodies.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Temporarily removes a body so it can be moved against `&self`.
    pub fn with_body<R>(&mut self, name: &str, f: impl FnOnce(&World, &mut Body) -> R) -> Option<R> {
        let mut body = self.bodies.remove(name)?;
        let out = f(self, &mut body);
        self.bodies.insert(name.to_string(), body);
        Some(out)
    }
}

impl BlockSource for World {
    #[inline]
    fn block_at(&self, pos: BlockInWorld) -> Block {
        self.get_block(pos)
    }
}

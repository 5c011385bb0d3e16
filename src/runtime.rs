use std::time::Instant;

use blockgrid_chunk::{ChunkInWorld, MeshMap};
use blockgrid_mesh_cpu::{MeshStats, Mesher, mesh_chunk};
use blockgrid_world::World;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::render::RenderSink;

/// What one [`Runtime::update`] did.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub loaded: usize,
    pub unloaded: usize,
    pub meshed: usize,
    pub mesh: MeshStats,
}

/// Keeps the chunks around a centre resident and meshed, pushing results to a renderer.
pub struct Runtime<R: RenderSink> {
    pub world: World,
    mesher: Box<dyn Mesher>,
    renderer: R,
    pool: ThreadPool,
    render_distance: i32,
}

impl<R: RenderSink> Runtime<R> {
    /// `workers == 0` sizes the pool from the machine.
    pub fn new(
        world: World,
        mesher: Box<dyn Mesher>,
        renderer: R,
        render_distance: i32,
        workers: usize,
    ) -> Result<Self, rayon::ThreadPoolBuildError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("blockgrid-mesh-{i}"))
            .build()?;
        log::info!(
            "runtime: render_distance={} mesh_workers={}",
            render_distance,
            pool.current_num_threads()
        );
        Ok(Self {
            world,
            mesher,
            renderer,
            pool,
            render_distance: render_distance.max(0),
        })
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Loads the cube around `center`, evicts chunks past the keep radius, then remeshes dirty chunks.
    pub fn update(&mut self, center: ChunkInWorld) -> FrameStats {
        let t0 = Instant::now();
        let mut stats = FrameStats::default();

        for key in World::keys_within(center, self.render_distance) {
            if self.world.load_chunk(key).is_new() {
                stats.loaded += 1;
            }
        }

        // One chunk of slack so walking along a border does not thrash.
        let keep = self.render_distance + 1;
        let stale: Vec<ChunkInWorld> = self
            .world
            .loaded_keys()
            .into_iter()
            .filter(|k| k.chebyshev(center) > keep)
            .collect();
        for key in stale {
            // A chunk that failed to save stays loaded and keeps its uploaded mesh.
            match self.world.unload_chunk(key) {
                Ok(true) => {
                    self.renderer.release(key);
                    stats.unloaded += 1;
                }
                Ok(false) => {}
                Err(e) => log::error!("chunk {key} kept loaded, save failed: {e}"),
            }
        }

        let dirty: Vec<ChunkInWorld> = self
            .world
            .chunks()
            .filter(|(_, c)| c.is_changed())
            .map(|(k, _)| *k)
            .collect();
        if !dirty.is_empty() {
            let world = &self.world;
            let mesher = self.mesher.as_ref();
            let built: Vec<(ChunkInWorld, MeshMap)> = self.pool.install(|| {
                dirty
                    .par_iter()
                    .filter_map(|key| {
                        let chunk = world.get_chunk(*key)?;
                        Some((*key, mesh_chunk(mesher, chunk, world, world.registry())))
                    })
                    .collect()
            });
            for (key, meshes) in built {
                stats.mesh += MeshStats::of(&meshes);
                self.renderer.upload(key, &meshes);
                if let Some(chunk) = self.world.get_chunk_mut(key) {
                    chunk.set_meshes(meshes);
                }
                stats.meshed += 1;
            }
        }

        log::debug!(
            target: "perf",
            "ms={} runtime_update center={} loaded={} unloaded={} meshed={} tris={}",
            t0.elapsed().as_millis(),
            center,
            stats.loaded,
            stats.unloaded,
            stats.meshed,
            stats.mesh.triangles
        );
        stats
    }

    pub fn into_parts(self) -> (World, R) {
        (self.world, self.renderer)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use blockgrid_blocks::{Block, BlockRegistry, BlockType};
    use blockgrid_chunk::BlockInWorld;
    use blockgrid_mesh_cpu::MesherKind;
    use blockgrid_world::{ChunkStore, FlatGenerator, MemoryStore, StorageError};

    use super::*;
    use crate::render::NullRenderer;

    fn runtime(rd: i32) -> Runtime<NullRenderer> {
        let world = World::new(
            Arc::new(BlockRegistry::builtin()),
            Box::new(MemoryStore::new()),
            Box::new(FlatGenerator::default()),
        );
        Runtime::new(world, MesherKind::Greedy.build(), NullRenderer::new(), rd, 2).unwrap()
    }

    #[test]
    fn first_update_loads_and_meshes_the_cube() {
        let mut rt = runtime(1);
        let stats = rt.update(ChunkInWorld::new(0, 0, 0));
        assert_eq!(stats.loaded, 27);
        assert_eq!(stats.meshed, 27);
        assert_eq!(rt.renderer().resident_chunks(), 27);
        assert!(stats.mesh.triangles > 0);

        let again = rt.update(ChunkInWorld::new(0, 0, 0));
        assert_eq!(again, FrameStats::default());
    }

    #[test]
    fn edits_remesh_only_dirty_chunks() {
        let mut rt = runtime(1);
        rt.update(ChunkInWorld::new(0, 0, 0));
        rt.world
            .set_block(BlockInWorld::new(5, 5, 5), Block::new(BlockType::Dots))
            .unwrap();
        let stats = rt.update(ChunkInWorld::new(0, 0, 0));
        assert_eq!(stats.meshed, 1);

        // A border cell also dirties the chunk across the border.
        rt.world
            .set_block(BlockInWorld::new(15, 5, 5), Block::new(BlockType::Dots))
            .unwrap();
        let stats = rt.update(ChunkInWorld::new(0, 0, 0));
        assert_eq!(stats.meshed, 2);
    }

    #[test]
    fn moving_away_unloads_past_keep_radius() {
        let mut rt = runtime(0);
        rt.update(ChunkInWorld::new(0, 0, 0));
        rt.update(ChunkInWorld::new(1, 0, 0));
        assert!(rt.world.is_loaded(ChunkInWorld::new(0, 0, 0)));

        let stats = rt.update(ChunkInWorld::new(3, 0, 0));
        assert_eq!(stats.unloaded, 2);
        assert!(!rt.world.is_loaded(ChunkInWorld::new(0, 0, 0)));
        assert!(!rt.renderer().is_resident(ChunkInWorld::new(0, 0, 0)));
        assert_eq!(rt.world.chunk_count(), 1);
    }

    #[test]
    fn unloaded_edits_survive_on_disk() {
        use blockgrid_world::DirStore;

        let dir = tempfile::tempdir().unwrap();
        let open = || {
            let world = World::open(
                Arc::new(BlockRegistry::builtin()),
                Box::new(DirStore::open(dir.path()).unwrap()),
                Box::new(FlatGenerator::default()),
            )
            .unwrap();
            Runtime::new(world, MesherKind::Simple.build(), NullRenderer::new(), 0, 1).unwrap()
        };

        let mut rt = open();
        rt.update(ChunkInWorld::new(0, 0, 0));
        rt.world
            .set_block(BlockInWorld::new(3, 2, 3), Block::new(BlockType::Eye))
            .unwrap();
        rt.update(ChunkInWorld::new(5, 0, 0));
        assert!(!rt.world.is_loaded(ChunkInWorld::new(0, 0, 0)));
        rt.world.save_all().unwrap();

        let mut rt = open();
        rt.update(ChunkInWorld::new(0, 0, 0));
        assert_eq!(
            rt.world.get_block(BlockInWorld::new(3, 2, 3)),
            Block::new(BlockType::Eye)
        );
    }

    struct ReadOnlyStore;

    impl ChunkStore for ReadOnlyStore {
        fn load_chunk(&self, _key: ChunkInWorld) -> Result<Option<Vec<u8>>, StorageError> {
            Ok(None)
        }
        fn save_chunk(&mut self, _key: ChunkInWorld, _blob: &[u8]) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::other("read-only")))
        }
        fn load_world(&self) -> Result<Option<Vec<u8>>, StorageError> {
            Ok(None)
        }
        fn save_world(&mut self, _blob: &[u8]) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::other("read-only")))
        }
    }

    #[test]
    fn failed_unload_keeps_chunk_loaded_and_resident() {
        let world = World::new(
            Arc::new(BlockRegistry::builtin()),
            Box::new(ReadOnlyStore),
            Box::new(FlatGenerator::default()),
        );
        let mut rt = Runtime::new(world, MesherKind::Greedy.build(), NullRenderer::new(), 0, 1).unwrap();
        let home = ChunkInWorld::new(0, 0, 0);
        rt.update(home);
        rt.world
            .set_block(BlockInWorld::new(2, 2, 2), Block::new(BlockType::Eye))
            .unwrap();
        rt.update(home);

        let away = ChunkInWorld::new(3, 0, 0);
        let stats = rt.update(away);
        assert_eq!(stats.unloaded, 0);
        assert_eq!(stats.loaded, 1);
        assert!(rt.world.is_loaded(home));
        assert!(rt.renderer().is_resident(home));
        assert!(rt.renderer().is_resident(away));
        assert!(rt.world.get_chunk(home).unwrap().is_unsaved());
    }
}

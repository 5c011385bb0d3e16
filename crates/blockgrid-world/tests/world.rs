use std::sync::Arc;

use blockgrid_blocks::{Block, BlockRegistry, BlockType, Color};
use blockgrid_chunk::{BlockInWorld, ChunkInWorld};
use blockgrid_world::{
    Body, ChunkStore, EmptyGenerator, FlatGenerator, LoadOutcome, MemoryStore, NoiseGenerator,
    NoiseParams, StorageError, World,
};

fn memory_world() -> World {
    World::new(
        Arc::new(BlockRegistry::builtin()),
        Box::new(MemoryStore::new()),
        Box::new(EmptyGenerator),
    )
}

#[test]
fn unloaded_space_reads_none() {
    let world = memory_world();
    assert_eq!(world.get_block(BlockInWorld::new(5, -3, 100)), Block::NONE);
    assert!(world.get_chunk(ChunkInWorld::new(0, 0, 0)).is_none());
    assert_eq!(world.chunk_count(), 0);
}

#[test]
fn set_block_creates_chunk_and_reads_back() {
    let mut world = memory_world();
    let pos = BlockInWorld::new(-1, 17, 3);
    world.set_block(pos, Block::new(BlockType::Eye)).unwrap();
    assert_eq!(world.get_block(pos).ty(), BlockType::Eye);
    assert_eq!(world.loaded_keys(), vec![ChunkInWorld::new(-1, 1, 0)]);
    // Rest of the generated chunk is air, not none.
    assert_eq!(world.get_block(BlockInWorld::new(-2, 17, 3)), Block::AIR);
}

#[test]
fn load_chunk_is_idempotent() {
    let mut world = memory_world();
    let key = ChunkInWorld::new(2, 0, 0);
    assert!(matches!(world.load_chunk(key), LoadOutcome::Generated));
    assert!(matches!(world.load_chunk(key), LoadOutcome::AlreadyLoaded));
    assert_eq!(world.chunk_count(), 1);
}

#[test]
fn border_edits_dirty_loaded_neighbors_only() {
    let mut world = memory_world();
    let home = ChunkInWorld::new(0, 0, 0);
    let east = ChunkInWorld::new(1, 0, 0);
    let up = ChunkInWorld::new(0, 1, 0);
    for key in [home, east, up] {
        world.load_chunk(key);
        world.get_chunk_mut(key).unwrap().set_meshes(Default::default());
    }

    world.set_block(BlockInWorld::new(15, 5, 5), Block::new(BlockType::White)).unwrap();
    assert!(world.get_chunk(home).unwrap().is_changed());
    assert!(world.get_chunk(east).unwrap().is_changed());
    assert!(!world.get_chunk(up).unwrap().is_changed());
    // The western neighbor is not loaded and must stay that way.
    assert!(!world.is_loaded(ChunkInWorld::new(-1, 0, 0)));
}

#[test]
fn interior_edit_leaves_neighbors_clean() {
    let mut world = memory_world();
    let home = ChunkInWorld::new(0, 0, 0);
    let east = ChunkInWorld::new(1, 0, 0);
    for key in [home, east] {
        world.load_chunk(key);
        world.get_chunk_mut(key).unwrap().set_meshes(Default::default());
    }
    world.set_block(BlockInWorld::new(7, 7, 7), Block::new(BlockType::White)).unwrap();
    assert!(!world.get_chunk(east).unwrap().is_changed());
}

#[test]
fn unload_persists_unsaved_chunk() {
    let mut world = memory_world();
    let pos = BlockInWorld::new(3, 3, 3);
    let key = pos.chunk();
    world.set_block(pos, Block::light(Color::new(10, 20, 30))).unwrap();

    assert!(world.unload_chunk(key).unwrap());
    assert!(!world.unload_chunk(key).unwrap());
    assert_eq!(world.get_block(pos), Block::NONE);
    assert!(world.store().load_chunk(key).unwrap().is_some());

    assert!(matches!(world.load_chunk(key), LoadOutcome::FromStorage));
    let back = world.get_block(pos);
    assert_eq!(back.ty(), BlockType::Light);
    assert_eq!(back.color(), Color::new(10, 20, 30));
    assert!(!world.get_chunk(key).unwrap().is_unsaved());
}

#[test]
fn clean_chunks_are_not_written_on_unload() {
    let mut world = memory_world();
    let key = ChunkInWorld::new(0, 0, 0);
    world.load_chunk(key);
    assert!(world.unload_chunk(key).unwrap());
    assert!(world.store().load_chunk(key).unwrap().is_none());
}

#[test]
fn corrupt_blob_triggers_regeneration() {
    let key = ChunkInWorld::new(0, -1, 0);
    let mut store = MemoryStore::new();
    store.save_chunk(key, &[1, 2, 3]).unwrap();
    let mut world = World::new(
        Arc::new(BlockRegistry::builtin()),
        Box::new(store),
        Box::new(FlatGenerator::default()),
    );

    let outcome = world.load_chunk(key);
    assert!(matches!(
        outcome,
        LoadOutcome::Regenerated {
            cause: StorageError::Corrupt { .. }
        }
    ));
    assert_eq!(
        world.get_block(BlockInWorld::new(0, -1, 0)).ty(),
        BlockType::CrappyMarble
    );
    assert!(world.get_chunk(key).unwrap().is_unsaved());
}

#[test]
fn flat_generator_fills_below_ground() {
    let mut world = World::new(
        Arc::new(BlockRegistry::builtin()),
        Box::new(MemoryStore::new()),
        Box::new(FlatGenerator {
            ground_level: 3,
            surface: Block::new(BlockType::Dots),
        }),
    );
    world.load_chunk(ChunkInWorld::new(0, 0, 0));
    world.load_chunk(ChunkInWorld::new(0, -1, 0));
    assert_eq!(world.get_block(BlockInWorld::new(4, 2, 9)).ty(), BlockType::Dots);
    assert_eq!(world.get_block(BlockInWorld::new(4, 3, 9)), Block::AIR);
    assert_eq!(world.get_block(BlockInWorld::new(4, -16, 9)).ty(), BlockType::Dots);
    assert!(!world.get_chunk(ChunkInWorld::new(0, 0, 0)).unwrap().is_unsaved());
}

#[test]
fn noise_generator_caps_columns_with_topsoil() {
    let params = NoiseParams::default();
    let heights = NoiseGenerator::new(params);
    let mut world = World::new(
        Arc::new(BlockRegistry::builtin()),
        Box::new(MemoryStore::new()),
        Box::new(NoiseGenerator::new(params)),
    );
    world.load_chunk(ChunkInWorld::new(0, 0, 0));
    world.load_chunk(ChunkInWorld::new(0, -1, 0));
    for (x, z) in [(0, 0), (3, 7), (15, 15)] {
        let h = heights.surface_height(x, z);
        assert_eq!(world.get_block(BlockInWorld::new(x, h, z)), Block::AIR);
        assert_eq!(world.get_block(BlockInWorld::new(x, h - 1, z)).ty(), BlockType::White);
        assert_eq!(world.get_block(BlockInWorld::new(x, h - 2, z)).ty(), BlockType::CrappyMarble);
    }
    assert!(!world.get_chunk(ChunkInWorld::new(0, -1, 0)).unwrap().is_unsaved());
}

#[test]
fn save_all_writes_only_unsaved_chunks() {
    let mut world = memory_world();
    world.tick();
    world.tick();
    world.set_block(BlockInWorld::new(0, 0, 0), Block::new(BlockType::Test)).unwrap();
    assert_eq!(world.save_all().unwrap(), 1);
    assert_eq!(world.save_all().unwrap(), 0);
    assert_eq!(world.ticks(), 2);
}

#[test]
fn body_registry() {
    let mut world = memory_world();
    assert!(world.add_body("player", Body::default()).is_none());
    world.body_mut("player").unwrap().noclip = true;
    assert!(world.body("player").unwrap().noclip);
    assert_eq!(world.bodies().count(), 1);
    let seen = world.with_body("player", |w, b| {
        b.position.y += 1.0;
        w.chunk_count()
    });
    assert_eq!(seen, Some(0));
    assert_eq!(world.body("player").unwrap().position.y, 2.0);
    assert!(world.remove_body("player").is_some());
    assert!(world.body("player").is_none());
}

#[test]
fn keys_within_is_a_cube() {
    let keys = World::keys_within(ChunkInWorld::new(0, 0, 0), 1);
    assert_eq!(keys.len(), 27);
    assert!(keys.contains(&ChunkInWorld::new(-1, 1, -1)));
    assert_eq!(World::keys_within(ChunkInWorld::new(4, 4, 4), 0), vec![ChunkInWorld::new(4, 4, 4)]);
}

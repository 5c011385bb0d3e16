use std::fs;
use std::sync::Arc;

use blockgrid_blocks::{Block, BlockRegistry, BlockType};
use blockgrid_chunk::{BlockInWorld, ChunkInWorld};
use blockgrid_world::{
    ChunkStore, DirStore, EmptyGenerator, LoadOutcome, StorageError, World,
};

fn open(dir: &std::path::Path) -> World {
    let store = DirStore::open(dir).unwrap();
    World::open(
        Arc::new(BlockRegistry::builtin()),
        Box::new(store),
        Box::new(EmptyGenerator),
    )
    .unwrap()
}

#[test]
fn chunks_and_ticks_survive_reopen() {
    let tmp = tempfile::tempdir().unwrap();
    let pos = BlockInWorld::new(-20, 4, 33);
    {
        let mut world = open(tmp.path());
        for _ in 0..5 {
            world.tick();
        }
        world.set_block(pos, Block::new(BlockType::Glass)).unwrap();
        world.save_all().unwrap();
    }
    let key = pos.chunk();
    assert!(tmp.path().join("chunks").join("-2_0_2.gz").is_file());
    assert!(tmp.path().join("world").is_file());

    let mut world = open(tmp.path());
    assert_eq!(world.ticks(), 5);
    assert!(matches!(world.load_chunk(key), LoadOutcome::FromStorage));
    assert_eq!(world.get_block(pos).ty(), BlockType::Glass);
}

#[test]
fn missing_chunk_file_is_none() {
    let tmp = tempfile::tempdir().unwrap();
    let store = DirStore::open(tmp.path()).unwrap();
    assert!(store.load_chunk(ChunkInWorld::new(9, 9, 9)).unwrap().is_none());
    assert!(store.load_world().unwrap().is_none());
}

#[test]
fn garbage_gzip_is_regenerated() {
    let tmp = tempfile::tempdir().unwrap();
    let store = DirStore::open(tmp.path()).unwrap();
    let key = ChunkInWorld::new(0, 0, 0);
    fs::write(store.chunk_path(key), b"not gzip at all").unwrap();

    let mut world = World::new(
        Arc::new(BlockRegistry::builtin()),
        Box::new(store),
        Box::new(EmptyGenerator),
    );
    assert!(matches!(
        world.load_chunk(key),
        LoadOutcome::Regenerated {
            cause: StorageError::Corrupt { .. }
        }
    ));
    assert_eq!(world.get_block(BlockInWorld::new(1, 1, 1)), Block::AIR);
}

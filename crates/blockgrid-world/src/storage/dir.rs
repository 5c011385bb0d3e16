use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use blockgrid_chunk::ChunkInWorld;
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;

use super::ChunkStore;
use crate::error::StorageError;

/// Directory layout: `world` plus `chunks/{x}_{y}_{z}.gz`, one gzip file per chunk.
#[derive(Clone, Debug)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    /// Opens (creating if needed) a world directory.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, StorageError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(root.join("chunks"))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn chunk_path(&self, key: ChunkInWorld) -> PathBuf {
        self.root
            .join("chunks")
            .join(format!("{}_{}_{}.gz", key.x, key.y, key.z))
    }

    fn world_path(&self) -> PathBuf {
        self.root.join("world")
    }
}

fn read_optional(path: &Path) -> Result<Option<Vec<u8>>, StorageError> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

// Readers only ever see a complete blob: write a sibling, then rename over.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, bytes)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

impl ChunkStore for DirStore {
    fn load_chunk(&self, key: ChunkInWorld) -> Result<Option<Vec<u8>>, StorageError> {
        let Some(compressed) = read_optional(&self.chunk_path(key))? else {
            return Ok(None);
        };
        let mut out = Vec::new();
        GzDecoder::new(compressed.as_slice())
            .read_to_end(&mut out)
            .map_err(|e| StorageError::corrupt(format!("chunk {key}: {e}")))?;
        Ok(Some(out))
    }

    fn save_chunk(&mut self, key: ChunkInWorld, blob: &[u8]) -> Result<(), StorageError> {
        let mut enc = GzEncoder::new(Vec::new(), Compression::default());
        enc.write_all(blob)?;
        let compressed = enc.finish()?;
        write_atomic(&self.chunk_path(key), &compressed)
    }

    fn load_world(&self) -> Result<Option<Vec<u8>>, StorageError> {
        read_optional(&self.world_path())
    }

    fn save_world(&mut self, blob: &[u8]) -> Result<(), StorageError> {
        write_atomic(&self.world_path(), blob)
    }
}

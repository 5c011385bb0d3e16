use blockgrid_chunk::{ChunkInWorld, MeshMap, triangle_count};
use hashbrown::HashMap;

/// Destination for finished chunk meshes. Uploads replace any previous mesh for the key.
pub trait RenderSink {
    fn upload(&mut self, key: ChunkInWorld, meshes: &MeshMap);
    fn release(&mut self, key: ChunkInWorld);
}

/// Headless sink: tracks resident triangle counts and logs traffic.
#[derive(Debug, Default)]
pub struct NullRenderer {
    resident: HashMap<ChunkInWorld, usize>,
    uploads: u64,
}

impl NullRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_resident(&self, key: ChunkInWorld) -> bool {
        self.resident.contains_key(&key)
    }

    pub fn resident_chunks(&self) -> usize {
        self.resident.len()
    }

    pub fn resident_triangles(&self) -> usize {
        self.resident.values().sum()
    }

    pub fn uploads(&self) -> u64 {
        self.uploads
    }
}

impl RenderSink for NullRenderer {
    fn upload(&mut self, key: ChunkInWorld, meshes: &MeshMap) {
        let tris = triangle_count(meshes);
        log::trace!("upload chunk {key}: {} surfaces, {tris} tris", meshes.len());
        self.resident.insert(key, tris);
        self.uploads += 1;
    }

    fn release(&mut self, key: ChunkInWorld) {
        if self.resident.remove(&key).is_some() {
            log::trace!("release chunk {key}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_replaces_and_release_forgets() {
        let mut r = NullRenderer::new();
        let key = ChunkInWorld::new(1, 0, -1);
        r.upload(key, &MeshMap::new());
        r.upload(key, &MeshMap::new());
        assert_eq!(r.uploads(), 2);
        assert_eq!(r.resident_chunks(), 1);
        r.release(key);
        assert!(!r.is_resident(key));
        r.release(key);
        assert_eq!(r.resident_chunks(), 0);
    }
}

use blockgrid_blocks::{BlockRegistry, Face};
use blockgrid_chunk::{BlockInChunk, BlockSource, CHUNK_VOLUME, Chunk, MeshMap};

use crate::Mesher;
use crate::emit::{add_face, face_visible, surface_for};
use crate::face::neighbor_of;

/// One quad per visible block face.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimpleMesher;

impl Mesher for SimpleMesher {
    fn make_mesh(&self, chunk: &Chunk, world: &dyn BlockSource, reg: &BlockRegistry) -> MeshMap {
        let mut meshes = MeshMap::new();
        let blocks = chunk.blocks();
        for i in 0..CHUNK_VOLUME {
            let block = blocks[i];
            if block.is_invisible() {
                continue;
            }
            let local = BlockInChunk::from_index(i);
            let pos = [i32::from(local.x), i32::from(local.y), i32::from(local.z)];
            for face in Face::ALL {
                let [nx, ny, nz] = neighbor_of(pos, face);
                if !face_visible(block, chunk.get_extended(world, nx, ny, nz)) {
                    continue;
                }
                let (key, tex_index, rotation) = surface_for(reg, block, face);
                add_face(
                    meshes.entry(key).or_default(),
                    [local.x, local.y, local.z],
                    face,
                    1,
                    1,
                    tex_index,
                    rotation,
                );
            }
        }
        meshes
    }
}

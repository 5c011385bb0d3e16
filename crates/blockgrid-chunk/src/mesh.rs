use blockgrid_blocks::{Face, ShaderId};
use hashbrown::HashMap;

/// One corner of a block face, in chunk-local units (`0..=CHUNK_SIZE`).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MeshVertex {
    pub pos: [u8; 3],
    pub face: Face,
    /// Quarter turns of the texture, `0..=3`.
    pub rotation: u8,
    pub tex_index: u16,
}

impl MeshVertex {
    /// Face and rotation packed as `face | rotation << 3` for the vertex stream.
    #[inline]
    pub fn packed_face_rotation(&self) -> u8 {
        (self.face as u8) | ((self.rotation & 0b11) << 3)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Triangle(pub [MeshVertex; 3]);

/// Triangles sharing a key draw with the same shader, blend mode and texture unit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceKey {
    pub shader: ShaderId,
    pub translucent: bool,
    pub tex_unit: u8,
}

pub type MeshMap = HashMap<SurfaceKey, Vec<Triangle>>;

/// Total triangle count across all surfaces.
pub fn triangle_count(map: &MeshMap) -> usize {
    map.values().map(Vec::len).sum()
}

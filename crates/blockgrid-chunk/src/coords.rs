use std::fmt;

use blockgrid_geom::Vec3;
use serde::{Deserialize, Serialize};

/// Edge length of a cubic chunk, in blocks.
pub const CHUNK_SIZE: i32 = 16;
/// Blocks per chunk.
pub const CHUNK_VOLUME: usize = (CHUNK_SIZE * CHUNK_SIZE * CHUNK_SIZE) as usize;

/// Absolute block position. Unbounded in every direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockInWorld {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// Chunk key: `floor(block / CHUNK_SIZE)` per axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkInWorld {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// Position inside a chunk. Values outside `0..CHUNK_SIZE` are representable and
/// rejected by the chunk accessors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockInChunk {
    pub x: u8,
    pub y: u8,
    pub z: u8,
}

impl BlockInWorld {
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Composes a world position from a chunk key and a local offset.
    #[inline]
    pub fn from_parts(chunk: ChunkInWorld, local: BlockInChunk) -> Self {
        Self {
            x: chunk.x * CHUNK_SIZE + i32::from(local.x),
            y: chunk.y * CHUNK_SIZE + i32::from(local.y),
            z: chunk.z * CHUNK_SIZE + i32::from(local.z),
        }
    }

    /// Wraps at the edge of the `i32` grid.
    #[inline]
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x.wrapping_add(dx),
            y: self.y.wrapping_add(dy),
            z: self.z.wrapping_add(dz),
        }
    }

    #[inline]
    pub fn offset_by(self, d: [i32; 3]) -> Self {
        self.offset(d[0], d[1], d[2])
    }

    /// `None` when any axis leaves the `i32` range.
    #[inline]
    pub fn checked_offset(self, dx: i32, dy: i32, dz: i32) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
            z: self.z.checked_add(dz)?,
        })
    }

    #[inline]
    pub fn chunk(self) -> ChunkInWorld {
        ChunkInWorld::from(self)
    }

    #[inline]
    pub fn local(self) -> BlockInChunk {
        BlockInChunk::from(self)
    }

    /// Minimum corner of the cell in continuous space.
    #[inline]
    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(f64::from(self.x), f64::from(self.y), f64::from(self.z))
    }

    #[inline]
    pub fn to_array(self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<Vec3> for BlockInWorld {
    /// Cell containing the point (floors each axis).
    fn from(v: Vec3) -> Self {
        Self {
            x: v.x.floor() as i32,
            y: v.y.floor() as i32,
            z: v.z.floor() as i32,
        }
    }
}

impl From<[i32; 3]> for BlockInWorld {
    fn from(v: [i32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl ChunkInWorld {
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }

    /// World position of the chunk's `(0, 0, 0)` block.
    #[inline]
    pub fn origin(self) -> BlockInWorld {
        BlockInWorld::from_parts(self, BlockInChunk::default())
    }

    /// Chebyshev distance in chunks.
    #[inline]
    pub fn chebyshev(self, other: ChunkInWorld) -> i32 {
        (self.x - other.x)
            .abs()
            .max((self.y - other.y).abs())
            .max((self.z - other.z).abs())
    }
}

impl From<BlockInWorld> for ChunkInWorld {
    #[inline]
    fn from(b: BlockInWorld) -> Self {
        Self {
            x: b.x.div_euclid(CHUNK_SIZE),
            y: b.y.div_euclid(CHUNK_SIZE),
            z: b.z.div_euclid(CHUNK_SIZE),
        }
    }
}

impl From<Vec3> for ChunkInWorld {
    fn from(v: Vec3) -> Self {
        BlockInWorld::from(v).chunk()
    }
}

impl BlockInChunk {
    #[inline]
    pub const fn new(x: u8, y: u8, z: u8) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn in_bounds(self) -> bool {
        let s = CHUNK_SIZE as u8;
        self.x < s && self.y < s && self.z < s
    }

    /// Storage index `y*S*S + z*S + x`, or `None` outside the chunk.
    #[inline]
    pub fn index(self) -> Option<usize> {
        if !self.in_bounds() {
            return None;
        }
        let s = CHUNK_SIZE as usize;
        Some(usize::from(self.y) * s * s + usize::from(self.z) * s + usize::from(self.x))
    }

    /// Inverse of [`BlockInChunk::index`] for `i < CHUNK_VOLUME`.
    #[inline]
    pub fn from_index(i: usize) -> Self {
        let s = CHUNK_SIZE as usize;
        Self {
            x: (i % s) as u8,
            z: ((i / s) % s) as u8,
            y: (i / (s * s)) as u8,
        }
    }

    /// Local position from signed coordinates when they fall inside the chunk.
    #[inline]
    pub fn try_from_signed(x: i32, y: i32, z: i32) -> Option<Self> {
        let r = 0..CHUNK_SIZE;
        if r.contains(&x) && r.contains(&y) && r.contains(&z) {
            Some(Self::new(x as u8, y as u8, z as u8))
        } else {
            None
        }
    }
}

impl From<BlockInWorld> for BlockInChunk {
    #[inline]
    fn from(b: BlockInWorld) -> Self {
        Self {
            x: b.x.rem_euclid(CHUNK_SIZE) as u8,
            y: b.y.rem_euclid(CHUNK_SIZE) as u8,
            z: b.z.rem_euclid(CHUNK_SIZE) as u8,
        }
    }
}

impl fmt::Display for BlockInWorld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl fmt::Display for ChunkInWorld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl fmt::Display for BlockInChunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

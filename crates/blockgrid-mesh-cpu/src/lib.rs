//! CPU meshing: turns chunk blocks into grouped triangle lists (simple and greedy).
#![forbid(unsafe_code)]

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use blockgrid_blocks::BlockRegistry;
use blockgrid_chunk::{BlockSource, Chunk, MeshMap};
use serde::Deserialize;

pub mod emit;
pub mod face;
mod greedy;
mod simple;

pub use greedy::GreedyMesher;
pub use simple::SimpleMesher;

/// Converts one chunk into surface geometry. Never fails; an empty chunk yields an empty map.
pub trait Mesher: Send + Sync {
    fn make_mesh(&self, chunk: &Chunk, world: &dyn BlockSource, reg: &BlockRegistry) -> MeshMap;
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MesherKind {
    Simple,
    #[default]
    Greedy,
}

impl MesherKind {
    pub fn build(self) -> Box<dyn Mesher> {
        match self {
            MesherKind::Simple => Box::new(SimpleMesher),
            MesherKind::Greedy => Box::new(GreedyMesher),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MesherKind::Simple => "simple",
            MesherKind::Greedy => "greedy",
        }
    }
}

impl fmt::Display for MesherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MesherKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "simple" => Ok(MesherKind::Simple),
            "greedy" => Ok(MesherKind::Greedy),
            other => Err(format!("unknown mesher `{other}` (expected simple or greedy)")),
        }
    }
}

/// Summary of a mesh map for logging.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MeshStats {
    pub surfaces: usize,
    pub triangles: usize,
    pub translucent_triangles: usize,
}

impl MeshStats {
    pub fn of(map: &MeshMap) -> Self {
        let mut stats = MeshStats {
            surfaces: map.len(),
            ..Default::default()
        };
        for (key, tris) in map {
            stats.triangles += tris.len();
            if key.translucent {
                stats.translucent_triangles += tris.len();
            }
        }
        stats
    }
}

impl std::ops::AddAssign for MeshStats {
    fn add_assign(&mut self, rhs: MeshStats) {
        self.surfaces += rhs.surfaces;
        self.triangles += rhs.triangles;
        self.translucent_triangles += rhs.translucent_triangles;
    }
}

/// Meshes `chunk` and logs timing under the `perf` target.
pub fn mesh_chunk(
    mesher: &dyn Mesher,
    chunk: &Chunk,
    world: &dyn BlockSource,
    reg: &BlockRegistry,
) -> MeshMap {
    let t0 = Instant::now();
    let map = mesher.make_mesh(chunk, world, reg);
    let stats = MeshStats::of(&map);
    log::debug!(
        target: "perf",
        "ms={} mesher_chunk key={} surfaces={} tris={}",
        t0.elapsed().as_millis(),
        chunk.pos(),
        stats.surfaces,
        stats.triangles
    );
    map
}

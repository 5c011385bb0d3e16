use blockgrid_blocks::{BlockRegistry, Face};
use blockgrid_chunk::{BlockSource, CHUNK_SIZE, Chunk, MeshMap, SurfaceKey};

use crate::Mesher;
use crate::emit::{add_face, face_visible, surface_for};
use crate::face::face_axes;

const S: usize = CHUNK_SIZE as usize;

type Cell = Option<(SurfaceKey, u16, u8)>;

/// Merges coplanar faces that share key, texture and rotation into maximal rectangles.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyMesher;

impl Mesher for GreedyMesher {
    fn make_mesh(&self, chunk: &Chunk, world: &dyn BlockSource, reg: &BlockRegistry) -> MeshMap {
        let mut meshes = MeshMap::new();
        // Indexed [v * S + u] in the face's own axes.
        let mut surface: Vec<Cell> = vec![None; S * S];
        for face in Face::ALL {
            let axes = face_axes(face);
            let n = face.normal();
            for layer in 0..S {
                let mut any = false;
                for v in 0..S {
                    for u in 0..S {
                        let mut p = [0i32; 3];
                        p[axes.normal] = layer as i32;
                        p[axes.u] = u as i32;
                        p[axes.v] = v as i32;
                        let block = chunk.get_extended(world, p[0], p[1], p[2]);
                        let neighbor =
                            chunk.get_extended(world, p[0] + n[0], p[1] + n[1], p[2] + n[2]);
                        let cell = if face_visible(block, neighbor) {
                            any = true;
                            Some(surface_for(reg, block, face))
                        } else {
                            None
                        };
                        surface[v * S + u] = cell;
                    }
                }
                if !any {
                    continue;
                }
                greedy_rects(S, S, &mut surface, |u, v, w, h, (key, tex_index, rotation)| {
                    let mut xyz = [0u8; 3];
                    xyz[axes.normal] = layer as u8;
                    xyz[axes.u] = u as u8;
                    xyz[axes.v] = v as u8;
                    add_face(
                        meshes.entry(key).or_default(),
                        xyz,
                        face,
                        w as u8,
                        h as u8,
                        tex_index,
                        rotation,
                    );
                });
            }
        }
        meshes
    }
}

/// Scans row-major, growing each rectangle along the row first and then down whole rows.
/// Consumed cells are cleared.
fn greedy_rects<T: Copy + PartialEq>(
    width: usize,
    height: usize,
    mask: &mut [Option<T>],
    mut emit: impl FnMut(usize, usize, usize, usize, T),
) {
    for y in 0..height {
        for x in 0..width {
            let Some(code) = mask[y * width + x] else {
                continue;
            };
            let mut w = 1;
            while x + w < width && mask[y * width + x + w] == Some(code) {
                w += 1;
            }
            let mut h = 1;
            'expand: while y + h < height {
                for i in 0..w {
                    if mask[(y + h) * width + x + i] != Some(code) {
                        break 'expand;
                    }
                }
                h += 1;
            }
            emit(x, y, w, h, code);
            for yy in 0..h {
                for xx in 0..w {
                    mask[(y + yy) * width + x + xx] = None;
                }
            }
        }
    }
}

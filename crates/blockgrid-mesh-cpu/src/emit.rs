use blockgrid_blocks::{Block, BlockRegistry, BlockType, Face};
use blockgrid_chunk::{MeshVertex, SurfaceKey, Triangle};

use crate::face::face_axes;

/// Whether `block`'s face toward `neighbor` is drawn.
///
/// Unloaded neighbors hide the face until they load; same-type neighbors hide
/// the shared face so translucent volumes do not show internal walls.
#[inline]
pub fn face_visible(block: Block, neighbor: Block) -> bool {
    neighbor.ty() != BlockType::None
        && !block.is_invisible()
        && !neighbor.is_opaque()
        && block.ty() != neighbor.ty()
}

/// Grouping key and texture data for one face of `block`.
#[inline]
pub fn surface_for(reg: &BlockRegistry, block: Block, face: Face) -> (SurfaceKey, u16, u8) {
    let app = reg.appearance(block.ty(), face);
    let key = SurfaceKey {
        shader: app.shader,
        translucent: block.is_translucent(),
        tex_unit: app.texture.unit,
    };
    (key, app.texture.index, app.rotation)
}

/// Appends a `w × h` quad (two triangles) for `face` of the cell at `xyz`.
///
/// `w` extends along the face's `u` axis and `h` along `v`. Positive faces sit one unit
/// out along the normal and wind forward; negative faces wind in reverse.
pub fn add_face(
    tris: &mut Vec<Triangle>,
    xyz: [u8; 3],
    face: Face,
    w: u8,
    h: u8,
    tex_index: u16,
    rotation: u8,
) {
    let axes = face_axes(face);
    let mut p1 = xyz;
    if face.is_positive() {
        p1[axes.normal] += 1;
    }
    let mut p2 = p1;
    p2[axes.u] += w;
    let mut p3 = p2;
    p3[axes.v] += h;
    let mut p4 = p1;
    p4[axes.v] += h;

    let vert = |pos: [u8; 3]| MeshVertex {
        pos,
        face,
        rotation,
        tex_index,
    };
    let (a, b, c, d) = if face.is_positive() {
        (vert(p1), vert(p2), vert(p3), vert(p4))
    } else {
        (vert(p4), vert(p3), vert(p2), vert(p1))
    };
    tris.push(Triangle([a, b, c]));
    tris.push(Triangle([c, d, a]));
}

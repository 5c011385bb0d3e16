use blockgrid_blocks::Face;

/// Axis assignment for a face: the quad spans `u` and `v`, and `normal` is perpendicular to it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FaceAxes {
    pub u: usize,
    pub normal: usize,
    pub v: usize,
}

#[inline]
pub fn face_axes(face: Face) -> FaceAxes {
    match face {
        Face::Right | Face::Left => FaceAxes { u: 1, normal: 0, v: 2 },
        Face::Top | Face::Bottom => FaceAxes { u: 2, normal: 1, v: 0 },
        Face::Front | Face::Back => FaceAxes { u: 0, normal: 2, v: 1 },
    }
}

/// Signed position of the neighbor cell a face looks into.
#[inline]
pub fn neighbor_of(pos: [i32; 3], face: Face) -> [i32; 3] {
    let n = face.normal();
    [pos[0] + n[0], pos[1] + n[1], pos[2] + n[2]]
}

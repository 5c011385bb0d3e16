use blockgrid_blocks::Face;
use blockgrid_chunk::{BlockInWorld, BlockSource};
use blockgrid_geom::Vec3;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Expected to be normalized; only a zero vector is rejected.
    pub direction: Vec3,
}

impl Ray {
    #[inline]
    pub const fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RaycastError {
    #[error("ray direction is zero")]
    ZeroDirection,
    #[error("ray origin, direction or radius is not finite")]
    NonFinite,
}

/// First selectable block along a ray.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RaycastHit {
    pub pos: BlockInWorld,
    /// Normal of the face the ray entered through; zero if the ray started inside `pos`.
    pub face_normal: [i32; 3],
}

impl RaycastHit {
    /// Cell on the near side of the entered face, where a new block would be placed.
    #[inline]
    pub fn adjacent(&self) -> BlockInWorld {
        self.pos.offset_by(self.face_normal)
    }

    #[inline]
    pub fn face(&self) -> Option<Face> {
        Face::from_normal(self.face_normal)
    }
}

// Smallest positive t such that s + t*ds is an integer.
fn intbound(s: f64, ds: f64) -> f64 {
    if ds == 0.0 {
        return f64::INFINITY;
    }
    if ds < 0.0 {
        return intbound(-s, -ds);
    }
    let s = s - s.floor();
    (1.0 - s) / ds
}

#[inline]
fn delta(d: f64) -> f64 {
    if d == 0.0 { f64::INFINITY } else { 1.0 / d.abs() }
}

#[inline]
fn sign(d: f64) -> i32 {
    if d > 0.0 {
        1
    } else if d < 0.0 {
        -1
    } else {
        0
    }
}

/// Amanatides–Woo grid traversal from `ray.origin`, visiting cells in order of entry.
///
/// Only cells inside the cube `origin ± radius` are tested. Traversal ends once any axis
/// passes that bound in its direction of travel. Ties between x and y go to y; z is taken
/// only when strictly closer.
pub fn raycast<S: BlockSource + ?Sized>(
    source: &S,
    ray: &Ray,
    radius: f64,
) -> Result<Option<RaycastHit>, RaycastError> {
    if !ray.origin.is_finite() || !ray.direction.is_finite() || !radius.is_finite() {
        return Err(RaycastError::NonFinite);
    }
    if ray.direction == Vec3::ZERO {
        return Err(RaycastError::ZeroDirection);
    }

    let o = ray.origin.to_array();
    let d = ray.direction.to_array();
    let mut cube = BlockInWorld::from(ray.origin).to_array();
    let step = d.map(sign);
    let mut t_max = [intbound(o[0], d[0]), intbound(o[1], d[1]), intbound(o[2], d[2])];
    let t_delta = d.map(delta);
    let min = o.map(|v| v - radius);
    let max = o.map(|v| v + radius);
    let mut face = [0i32; 3];

    let in_range = |cube: &[i32; 3]| {
        (0..3).all(|i| {
            let c = f64::from(cube[i]);
            if step[i] > 0 { c < max[i] } else { c > min[i] }
        })
    };
    let in_bounds =
        |cube: &[i32; 3]| (0..3).all(|i| (min[i]..=max[i]).contains(&f64::from(cube[i])));

    while in_range(&cube) {
        if in_bounds(&cube) && source.block_at(BlockInWorld::from(cube)).is_selectable() {
            return Ok(Some(RaycastHit {
                pos: BlockInWorld::from(cube),
                face_normal: face,
            }));
        }
        let mut i = if t_max[0] < t_max[1] { 0 } else { 1 };
        if t_max[2] < t_max[i] {
            i = 2;
        }
        // Leaving the i32 grid ends the walk like leaving the radius does.
        let Some(next) = cube[i].checked_add(step[i]) else {
            break;
        };
        cube[i] = next;
        t_max[i] += t_delta[i];
        face = [0; 3];
        face[i] = -step[i];
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intbound_handles_both_directions() {
        assert_eq!(intbound(0.25, 1.0), 0.75);
        assert_eq!(intbound(0.25, -1.0), 0.25);
        assert_eq!(intbound(2.0, 0.5), 2.0);
        assert_eq!(intbound(0.5, 0.0), f64::INFINITY);
    }
}

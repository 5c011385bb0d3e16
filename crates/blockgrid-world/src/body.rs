use blockgrid_chunk::BlockInWorld;
use blockgrid_geom::{Aabb, Vec3};

/// Upright box-shaped body. `position` is the centre of the feet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    pub position: Vec3,
    pub velocity: Vec3,
    pub half_width: f64,
    pub height: f64,
    pub eye_height: f64,
    pub on_ground: bool,
    pub noclip: bool,
}

impl Default for Body {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.5, 1.0, 0.5),
            velocity: Vec3::ZERO,
            half_width: 0.4,
            height: 1.8,
            eye_height: 1.6,
            on_ground: false,
            noclip: false,
        }
    }
}

impl Body {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Bounding box the body would occupy with its feet at `pos`.
    #[inline]
    pub fn aabb_at(&self, pos: Vec3) -> Aabb {
        let hw = self.half_width;
        Aabb::new(
            Vec3::new(pos.x - hw, pos.y, pos.z - hw),
            Vec3::new(pos.x + hw, pos.y + self.height, pos.z + hw),
        )
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        self.aabb_at(self.position)
    }

    #[inline]
    pub fn eye(&self) -> Vec3 {
        self.position + Vec3::new(0.0, self.eye_height, 0.0)
    }

    #[inline]
    pub fn feet_cell(&self) -> BlockInWorld {
        BlockInWorld::from(self.position)
    }

    /// Placing a block at `pos` must not trap the body, unless it ignores collisions.
    pub fn can_place_block_at(&self, pos: BlockInWorld) -> bool {
        self.noclip || !self.aabb().intersects(&Aabb::unit_cell(pos.x, pos.y, pos.z))
    }
}

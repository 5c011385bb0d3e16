use blockgrid_blocks::{Block, BlockType};
use blockgrid_chunk::BlockInWorld;
use blockgrid_geom::Vec3;
use blockgrid_physics::move_body;
use blockgrid_world::{Body, World};

use crate::config::PhysicsConfig;

/// Held movement keys plus one-shot requests consumed by the next [`Walker::step`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MoveInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub sprint: bool,
    pub jump: bool,
    /// Stick input in body space: x strafes, y moves along +z.
    pub analog: [f64; 2],
}

/// Feet moved into a new cell holding a non-solid, non-air block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnteredBlock {
    pub pos: BlockInWorld,
    pub block: Block,
}

/// Turns input and gravity into per-tick body motion.
#[derive(Clone, Debug)]
pub struct Walker {
    pub input: MoveInput,
    /// Degrees; 0 faces -z.
    pub yaw: f64,
    pub pitch: f64,
    pub physics: PhysicsConfig,
}

impl Walker {
    pub fn new(physics: PhysicsConfig) -> Self {
        Self {
            input: MoveInput::default(),
            yaw: 0.0,
            pitch: 0.0,
            physics,
        }
    }

    /// Direction the eye looks along.
    pub fn look_direction(&self) -> Vec3 {
        look_direction(self.yaw, self.pitch)
    }

    pub fn respawn(&mut self, body: &mut Body, spawn: Vec3) {
        self.yaw = 0.0;
        self.pitch = 0.0;
        body.velocity = Vec3::ZERO;
        body.position = spawn;
        body.on_ground = false;
    }

    /// Advances `body` one tick of `dt`. Clears `jump` and `analog` afterwards.
    pub fn step(&mut self, world: &World, body: &mut Body, dt: f64) -> Option<EnteredBlock> {
        let p = self.physics;
        let mut acc = Vec3::new(0.0, -p.gravity, 0.0);

        let mut speed = p.walk_speed;
        if self.input.sprint {
            speed *= p.sprint_multiplier;
        }
        acc = self.apply_input(acc, speed);

        let mut velocity = body.velocity;
        if body.noclip {
            velocity = velocity * p.noclip_damping;
            acc.y = 0.0;
            if self.input.jump {
                acc.y += p.noclip_jump;
            }
        } else {
            if self.input.jump && body.on_ground {
                acc.y += p.jump;
            }
            if body.on_ground {
                velocity.x *= p.ground_friction;
                velocity.z *= p.ground_friction;
            } else {
                velocity.x *= p.air_friction;
                velocity.z *= p.air_friction;
                // No steering in the air.
                acc.x = 0.0;
                acc.z = 0.0;
            }
        }
        self.input.jump = false;
        body.velocity = velocity;

        if acc == Vec3::ZERO {
            return None;
        }
        let old_cell = body.feet_cell();
        self.apply_acceleration(world, body, acc * dt);
        let new_cell = body.feet_cell();
        if new_cell == old_cell {
            return None;
        }
        let block = world.get_block(new_cell);
        let enterable = !matches!(block.ty(), BlockType::None | BlockType::Air) && !block.is_solid();
        enterable.then_some(EnteredBlock {
            pos: new_cell,
            block,
        })
    }

    fn apply_input(&mut self, mut acc: Vec3, speed: f64) -> Vec3 {
        let i = self.input;
        if i.forward {
            acc.z -= speed;
        }
        if i.backward {
            acc.z += speed;
        }
        if i.left {
            acc.x -= speed;
        }
        if i.right {
            acc.x += speed;
        }
        acc.x += i.analog[0] * speed;
        acc.z += i.analog[1] * speed;
        self.input.analog = [0.0, 0.0];
        acc
    }

    fn apply_acceleration(&self, world: &World, body: &mut Body, acc: Vec3) {
        let max = self.physics.max_velocity;
        let mut v = body.velocity + acc;
        v.x = v.x.clamp(-max, max);
        v.z = v.z.clamp(-max, max);
        body.velocity = v;

        let (sin_y, cos_y) = self.yaw.to_radians().sin_cos();
        let motion = Vec3::new(
            v.x * cos_y - v.z * sin_y,
            v.y,
            v.z * cos_y + v.x * sin_y,
        );
        move_body(world, body, motion);
    }
}

/// Unit vector for yaw/pitch in degrees. Yaw 0 and pitch 0 look down -z; positive pitch looks up.
pub fn look_direction(yaw: f64, pitch: f64) -> Vec3 {
    let (sy, cy) = yaw.to_radians().sin_cos();
    let (sp, cp) = pitch.to_radians().sin_cos();
    Vec3::new(sy * cp, sp, -cy * cp)
}

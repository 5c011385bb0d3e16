//! Grid queries for continuous space: voxel raycasting and body-vs-block collision.
#![forbid(unsafe_code)]

pub mod collide;
pub mod raycast;

pub use collide::move_body;
pub use raycast::{Ray, RaycastError, RaycastHit, raycast};

use blockgrid_chunk::{BlockInWorld, BlockSource};
use blockgrid_geom::{Aabb, Vec3};
use blockgrid_world::Body;

/// Moves `body` by `displacement`, resolving overlap with solid blocks.
///
/// Horizontal overlap is pushed out against the blocks around the starting feet cell,
/// edge neighbors first and diagonal neighbors second. Vertical motion is then checked
/// against the single cell under the feet (falling) or above the head (rising).
/// `velocity.y` and `on_ground` are updated from what was hit.
pub fn move_body<S: BlockSource + ?Sized>(source: &S, body: &mut Body, displacement: Vec3) {
    let mut new_position = body.position + displacement;
    if body.noclip {
        body.position = new_position;
        return;
    }

    let old_cell = body.feet_cell();
    push_out_horizontal(source, body, old_cell, &mut new_position, false);
    push_out_horizontal(source, body, old_cell, &mut new_position, true);

    if displacement.y < 0.0 {
        let feet = BlockInWorld::from(new_position);
        let block = source.block_at(feet);
        if block.is_solid() {
            new_position.y = f64::from(feet.y + 1);
            if body.on_ground {
                body.velocity.y = 0.0;
            } else {
                body.velocity.y *= -block.bounciness();
                body.on_ground = true;
            }
        } else {
            body.on_ground = false;
        }
    } else if displacement.y > 0.0 {
        let head = BlockInWorld::from(new_position + Vec3::new(0.0, body.height, 0.0));
        let block = source.block_at(head);
        if block.is_solid() {
            new_position.y = f64::from(head.y) - body.height;
            body.velocity.y *= -block.bounciness();
        }
        body.on_ground = false;
    } else {
        body.on_ground = true;
    }

    body.position = new_position;
}

// One pass over the 3×3 columns around the feet cell, from the feet up to head height.
// `corners` selects the diagonal columns; otherwise only the centre and edge columns are used.
fn push_out_horizontal<S: BlockSource + ?Sized>(
    source: &S,
    body: &Body,
    old_cell: BlockInWorld,
    new_position: &mut Vec3,
    corners: bool,
) {
    let levels = body.height.floor() as i32;
    for dy in 0..=levels {
        for dx in -1..=1 {
            for dz in -1..=1 {
                let diagonal = dx != 0 && dz != 0;
                if diagonal != corners {
                    continue;
                }
                let cell = old_cell.offset(dx, dy, dz);
                if !source.block_at(cell).is_solid() {
                    continue;
                }
                let body_box = body.aabb_at(*new_position);
                let block_box = Aabb::unit_cell(cell.x, cell.y, cell.z);
                if !body_box.intersects(&block_box) {
                    continue;
                }
                let mut offset = body_box.push_out(&block_box, [dx, 0, dz]);
                if corners {
                    // Keep only the shallower push; equal depths keep both.
                    let (ax, az) = (offset.x.abs(), offset.z.abs());
                    if ax > az {
                        offset.x = 0.0;
                    } else if az > ax {
                        offset.z = 0.0;
                    }
                }
                *new_position += offset;
            }
        }
    }
}

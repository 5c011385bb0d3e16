#![forbid(unsafe_code)]

mod config;
mod player;
mod render;
mod runtime;

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use blockgrid_blocks::{Block, BlockType, Color};
use blockgrid_chunk::ChunkInWorld;
use blockgrid_geom::Vec3;
use blockgrid_mesh_cpu::MesherKind;
use blockgrid_physics::{Ray, raycast};
use blockgrid_world::{Body, World};
use clap::Parser;

use crate::config::EngineConfig;
use crate::player::Walker;
use crate::render::NullRenderer;
use crate::runtime::Runtime;

const PLAYER: &str = "player";

#[derive(Parser, Debug)]
#[command(name = "blockgrid", about = "Headless voxel world driver")]
struct Args {
    /// Engine config (TOML). Missing file means defaults.
    #[arg(long, default_value = "blockgrid.toml")]
    config: PathBuf,
    /// Ticks to simulate before saving and exiting.
    #[arg(long, default_value_t = 240)]
    ticks: u64,
    /// Seconds per tick.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f64,
    /// Override the configured mesher (simple|greedy).
    #[arg(long)]
    mesher: Option<MesherKind>,
    /// Override the save directory.
    #[arg(long)]
    world_dir: Option<PathBuf>,
    /// Override the render distance in chunks.
    #[arg(long)]
    render_distance: Option<i32>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut cfg = EngineConfig::load_or_default(&args.config)?;
    if let Some(m) = args.mesher {
        cfg.mesher = m;
    }
    if let Some(dir) = args.world_dir {
        cfg.world_dir = Some(dir);
    }
    if let Some(rd) = args.render_distance {
        cfg.render_distance = rd;
    }

    let registry = Arc::new(cfg.build_registry()?);
    log::info!(
        "block registry: {} textures, {} kinds",
        registry.texture_count(),
        BlockType::ALL.len()
    );
    let mut world = World::open(registry, cfg.build_store()?, cfg.generator.build()?)?;
    let spawn = Vec3::from(cfg.spawn);
    world.add_body(PLAYER, Body::at(spawn));

    let mut runtime = Runtime::new(
        world,
        cfg.mesher.build(),
        NullRenderer::new(),
        cfg.render_distance,
        cfg.mesh_workers,
    )?;
    log::info!("mesher={} ticks={} dt={:.4}", cfg.mesher, args.ticks, args.dt);

    let mut walker = Walker::new(cfg.physics);
    for tick in 0..args.ticks {
        script_input(&mut walker, tick);

        let entered = runtime
            .world
            .with_body(PLAYER, |world, body| walker.step(world, body, args.dt))
            .flatten();
        if let Some(e) = entered {
            log::info!("tick {tick}: entered {} at {}", e.block.ty().name(), e.pos);
        }
        runtime.world.tick();

        let Some(body) = runtime.world.body(PLAYER).copied() else {
            return Err("player body vanished".into());
        };
        if body.position.y < -64.0 {
            log::warn!("tick {tick}: fell out of the world, respawning");
            runtime
                .world
                .with_body(PLAYER, |_, b| walker.respawn(b, spawn));
        }

        let frame = runtime.update(ChunkInWorld::from(body.position));
        if frame.meshed > 0 {
            log::debug!(
                "tick {tick}: loaded={} unloaded={} meshed={} tris={}",
                frame.loaded,
                frame.unloaded,
                frame.meshed,
                frame.mesh.triangles
            );
        }

        if tick % 30 == 0 {
            check_reach(&mut runtime.world, &walker, &body, cfg.reach_distance, tick)?;
        }
    }

    let saved = runtime.world.save_all()?;
    let (world, renderer) = runtime.into_parts();
    log::info!(
        "done: tick={} chunks={} resident={} tris={} uploads={} saved={}",
        world.ticks(),
        world.chunk_count(),
        renderer.resident_chunks(),
        renderer.resident_triangles(),
        renderer.uploads(),
        saved
    );
    Ok(())
}

// Walks forward while slowly turning, hopping every two seconds and glancing down.
fn script_input(walker: &mut Walker, tick: u64) {
    walker.input.forward = true;
    walker.input.sprint = tick % 240 >= 180;
    walker.input.jump = tick % 120 == 60;
    walker.yaw = (tick as f64 * 0.75) % 360.0;
    walker.pitch = -30.0;
}

// Casts from the eye; places a light block against the hit face when nothing is in the way.
fn check_reach(
    world: &mut World,
    walker: &Walker,
    body: &Body,
    reach: f64,
    tick: u64,
) -> Result<(), Box<dyn Error>> {
    let ray = Ray::new(body.eye(), walker.look_direction());
    let Some(hit) = raycast(&*world, &ray, reach)? else {
        log::debug!("tick {tick}: nothing within reach");
        return Ok(());
    };
    let target = world.get_block(hit.pos);
    log::info!(
        "tick {tick}: looking at {} {} face={:?}",
        target.ty().name(),
        hit.pos,
        hit.face()
    );
    let place = hit.adjacent();
    let free = world.get_block(place).ty() == BlockType::Air;
    if hit.face().is_some() && free && body.can_place_block_at(place) {
        let color = Color::new((tick % 256) as u8, 200, 255);
        world.set_block(place, Block::light(color))?;
        world.set_light(place, color)?;
        log::info!("tick {tick}: placed light at {place}");
    }
    Ok(())
}

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use blockgrid_blocks::{Block, BlockRegistry, BlockType};
use blockgrid_mesh_cpu::MesherKind;
use blockgrid_world::{
    ChunkGenerator, ChunkStore, DirStore, EmptyGenerator, FlatGenerator, MemoryStore,
    NoiseGenerator, NoiseParams,
};
use serde::Deserialize;

fn default_render_distance() -> i32 {
    2
}
fn default_reach() -> f64 {
    16.0
}
fn default_spawn() -> [f64; 3] {
    [0.5, 1.0, 0.5]
}

/// Top-level engine settings, read from `blockgrid.toml`.
#[derive(Deserialize, Debug, Clone)]
pub struct EngineConfig {
    /// Chunks kept loaded around the player, in each direction.
    #[serde(default = "default_render_distance")]
    pub render_distance: i32,
    #[serde(default)]
    pub mesher: MesherKind,
    /// Meshing threads; 0 lets rayon pick.
    #[serde(default)]
    pub mesh_workers: usize,
    /// Directory for saved chunks. Without one the world lives in memory only.
    #[serde(default)]
    pub world_dir: Option<PathBuf>,
    #[serde(default)]
    pub blocks_config: Option<PathBuf>,
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub physics: PhysicsConfig,
    #[serde(default = "default_reach")]
    pub reach_distance: f64,
    #[serde(default = "default_spawn")]
    pub spawn: [f64; 3],
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            render_distance: default_render_distance(),
            mesher: MesherKind::default(),
            mesh_workers: 0,
            world_dir: None,
            blocks_config: None,
            generator: GeneratorConfig::default(),
            physics: PhysicsConfig::default(),
            reach_distance: default_reach(),
            spawn: default_spawn(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GeneratorConfig {
    Empty,
    Flat {
        #[serde(default)]
        ground_level: i32,
        /// Block name from the catalogue, e.g. `"crappy_marble"`.
        surface: String,
    },
    Noise(NoiseParams),
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig::Flat {
            ground_level: 0,
            surface: BlockType::CrappyMarble.name().to_string(),
        }
    }
}

impl GeneratorConfig {
    pub fn build(&self) -> Result<Box<dyn ChunkGenerator>, Box<dyn Error>> {
        Ok(match self {
            GeneratorConfig::Empty => Box::new(EmptyGenerator),
            GeneratorConfig::Flat {
                ground_level,
                surface,
            } => {
                let ty = BlockType::from_name(surface)
                    .ok_or_else(|| format!("unknown surface block `{surface}`"))?;
                Box::new(FlatGenerator {
                    ground_level: *ground_level,
                    surface: Block::new(ty),
                })
            }
            GeneratorConfig::Noise(params) => Box::new(NoiseGenerator::new(*params)),
        })
    }
}

/// Walker tuning. Units are blocks and ticks.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: f64,
    pub jump: f64,
    pub noclip_jump: f64,
    pub walk_speed: f64,
    pub sprint_multiplier: f64,
    pub max_velocity: f64,
    pub ground_friction: f64,
    pub air_friction: f64,
    pub noclip_damping: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            jump: 9.0,
            noclip_jump: 18.0,
            walk_speed: 2.0,
            sprint_multiplier: 4.0,
            max_velocity: 1.0,
            ground_friction: 0.75,
            air_friction: 0.99,
            noclip_damping: 0.75,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, Box<dyn Error>> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    /// Loads `path` when it exists, otherwise falls back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, Box<dyn Error>> {
        if path.exists() {
            log::info!("loading config from {}", path.display());
            Self::load(path)
        } else {
            log::warn!("config {} not found; using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn build_registry(&self) -> Result<BlockRegistry, Box<dyn Error>> {
        match &self.blocks_config {
            Some(path) => {
                log::info!("loading block overrides from {}", path.display());
                Ok(BlockRegistry::load_from_path(path)?)
            }
            None => Ok(BlockRegistry::builtin()),
        }
    }

    pub fn build_store(&self) -> Result<Box<dyn ChunkStore>, Box<dyn Error>> {
        Ok(match &self.world_dir {
            Some(dir) => Box::new(DirStore::open(dir)?),
            None => Box::new(MemoryStore::new()),
        })
    }
}

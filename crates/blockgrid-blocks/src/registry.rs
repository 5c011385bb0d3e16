use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;

use thiserror::Error;

use super::catalog::traits;
use super::config::{BlockDef, BlocksConfig};
use super::types::{BlockType, Face, FaceRole};

/// Texture layers addressable through one texture unit.
pub const LAYERS_PER_UNIT: usize = 256;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureSlot {
    pub unit: u8,
    pub index: u16,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShaderId(pub u16);

/// Everything the mesher needs to know about one face of one block kind.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FaceAppearance {
    pub texture: TextureSlot,
    pub rotation: u8,
    pub shader: ShaderId,
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("unknown block `{0}` in blocks config")]
    UnknownBlock(String),
    #[error("rotation {rotation} for block `{block}` is outside 0..=3")]
    BadRotation { block: String, rotation: u8 },
    #[error("too many textures ({0}) for the available texture units")]
    TooManyTextures(usize),
    #[error("failed to read blocks config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse blocks config: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Clone, Debug)]
struct FacePick {
    texture: String,
    rotation: u8,
    shader: String,
}

#[derive(Clone, Debug)]
pub struct BlockRegistry {
    faces: Vec<[FaceAppearance; 6]>,
    textures: Vec<String>,
    texture_by_name: HashMap<String, TextureSlot>,
    shaders: Vec<String>,
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl BlockRegistry {
    /// Registry built from the static catalogue only.
    pub fn builtin() -> Self {
        match Self::from_config(BlocksConfig::default()) {
            Ok(reg) => reg,
            // The catalogue holds far fewer textures than a single unit can address.
            Err(_) => unreachable!("built-in catalogue always compiles"),
        }
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, RegistryError> {
        let cfg: BlocksConfig = toml::from_str(toml_str)?;
        Self::from_config(cfg)
    }

    pub fn from_config(cfg: BlocksConfig) -> Result<Self, RegistryError> {
        let mut overrides: HashMap<BlockType, BlockDef> = HashMap::new();
        for (name, def) in cfg.blocks {
            let ty = BlockType::from_name(&name).ok_or_else(|| RegistryError::UnknownBlock(name.clone()))?;
            if let Some(rotation) = def.rotation {
                if rotation > 3 {
                    return Err(RegistryError::BadRotation {
                        block: name,
                        rotation,
                    });
                }
            }
            overrides.insert(ty, def);
        }

        let picks: Vec<[FacePick; 6]> = BlockType::ALL
            .iter()
            .map(|&ty| Face::ALL.map(|face| face_pick(ty, face, overrides.get(&ty))))
            .collect();

        // Sort names so slot/shader assignment is stable across runs.
        let texture_names: BTreeSet<&str> = picks
            .iter()
            .flatten()
            .map(|s| s.texture.as_str())
            .filter(|t| !t.is_empty())
            .collect();
        let shader_names: BTreeSet<&str> = picks.iter().flatten().map(|s| s.shader.as_str()).collect();

        let max_textures = LAYERS_PER_UNIT * (u8::MAX as usize + 1);
        if texture_names.len() > max_textures {
            return Err(RegistryError::TooManyTextures(texture_names.len()));
        }

        let textures: Vec<String> = texture_names.iter().map(|s| s.to_string()).collect();
        let texture_by_name: HashMap<String, TextureSlot> = textures
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let slot = TextureSlot {
                    unit: (i / LAYERS_PER_UNIT) as u8,
                    index: (i % LAYERS_PER_UNIT) as u16,
                };
                (name.clone(), slot)
            })
            .collect();
        let shaders: Vec<String> = shader_names.iter().map(|s| s.to_string()).collect();
        let shader_by_name: HashMap<&str, ShaderId> = shaders
            .iter()
            .enumerate()
            .map(|(i, name)| (name.as_str(), ShaderId(i as u16)))
            .collect();

        let faces = picks
            .iter()
            .map(|per_face| {
                per_face.clone().map(|pick| FaceAppearance {
                    texture: texture_by_name.get(&pick.texture).copied().unwrap_or_default(),
                    rotation: pick.rotation,
                    shader: shader_by_name.get(pick.shader.as_str()).copied().unwrap_or_default(),
                })
            })
            .collect();

        Ok(BlockRegistry {
            faces,
            textures,
            texture_by_name,
            shaders,
        })
    }

    #[inline]
    pub fn appearance(&self, ty: BlockType, face: Face) -> FaceAppearance {
        self.faces[ty.id() as usize][face.index()]
    }

    pub fn texture_slot(&self, name: &str) -> Option<TextureSlot> {
        self.texture_by_name.get(name).copied()
    }

    pub fn texture_name(&self, slot: TextureSlot) -> Option<&str> {
        let i = slot.unit as usize * LAYERS_PER_UNIT + slot.index as usize;
        self.textures.get(i).map(String::as_str)
    }

    pub fn shader_name(&self, id: ShaderId) -> Option<&str> {
        self.shaders.get(id.0 as usize).map(String::as_str)
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// External id table persisted next to saved chunks.
    pub fn id_table(&self) -> Vec<(u16, String)> {
        BlockType::ALL
            .iter()
            .map(|t| (t.id(), t.name().to_string()))
            .collect()
    }
}

fn face_pick(ty: BlockType, face: Face, def: Option<&BlockDef>) -> FacePick {
    let base = traits(ty);
    let mut texture = base.texture.to_string();
    let mut shader = base.shader.to_string();
    let mut rotation = 0;
    if let Some(def) = def {
        if let Some(t) = def.textures.as_ref() {
            let pick = match face.role() {
                FaceRole::Top => t.top.as_ref(),
                FaceRole::Bottom => t.bottom.as_ref(),
                FaceRole::Side => t.side.as_ref(),
            }
            .or(t.all.as_ref());
            if let Some(name) = pick {
                texture = name.clone();
            }
        }
        if let Some(s) = def.shader.as_ref() {
            shader = s.clone();
        }
        rotation = def.rotation.unwrap_or(0);
    }
    FacePick {
        texture,
        rotation,
        shader,
    }
}

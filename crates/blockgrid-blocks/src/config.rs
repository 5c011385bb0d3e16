use serde::Deserialize;
use std::collections::HashMap;

// Top-level blocks config file: `[blocks.<name>]` tables overriding built-in appearance
#[derive(Deserialize, Debug, Default, Clone)]
pub struct BlocksConfig {
    #[serde(default)]
    pub blocks: HashMap<String, BlockDef>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct BlockDef {
    #[serde(default)]
    pub textures: Option<TexturesDef>,
    #[serde(default)]
    pub shader: Option<String>,
    // Quarter turns applied to every face texture (0..=3)
    #[serde(default)]
    pub rotation: Option<u8>,
}

// Texture mapping: all/top/bottom/side, the specific roles win over `all`
#[derive(Deserialize, Debug, Clone, Default)]
pub struct TexturesDef {
    #[serde(default)]
    pub all: Option<String>,
    #[serde(default)]
    pub top: Option<String>,
    #[serde(default)]
    pub bottom: Option<String>,
    #[serde(default)]
    pub side: Option<String>,
}

//! Static capability table keyed by [`BlockType`].

use crate::types::{BlockType, Visibility};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BlockTraits {
    pub visibility: Visibility,
    pub solid: bool,
    pub selectable: bool,
    /// Fraction of vertical speed kept (and reversed) on impact, `0..=1`.
    pub bounciness: f64,
    pub emits_light: bool,
    /// Texture applied to every face unless the registry config overrides it.
    pub texture: &'static str,
    pub shader: &'static str,
}

const EMPTY: BlockTraits = BlockTraits {
    visibility: Visibility::Invisible,
    solid: false,
    selectable: false,
    bounciness: 0.0,
    emits_light: false,
    texture: "",
    shader: "default",
};

const fn cube(texture: &'static str) -> BlockTraits {
    BlockTraits {
        visibility: Visibility::Opaque,
        solid: true,
        selectable: true,
        bounciness: 0.0,
        emits_light: false,
        texture,
        shader: "default",
    }
}

pub const fn traits(ty: BlockType) -> BlockTraits {
    match ty {
        BlockType::None | BlockType::Air => EMPTY,
        BlockType::Test => BlockTraits {
            bounciness: 1.0,
            ..cube("test")
        },
        BlockType::Dots => cube("dots"),
        BlockType::Eye => cube("eye"),
        BlockType::Teleporter => BlockTraits {
            visibility: Visibility::Translucent,
            solid: false,
            selectable: true,
            bounciness: 0.0,
            emits_light: false,
            texture: "teleporter",
            shader: "teleporter",
        },
        BlockType::CrappyMarble => cube("crappy_marble"),
        BlockType::White => cube("white"),
        BlockType::Black => cube("black"),
        BlockType::Glass => BlockTraits {
            visibility: Visibility::Translucent,
            shader: "translucent",
            ..cube("glass")
        },
        BlockType::Light => BlockTraits {
            emits_light: true,
            shader: "light",
            ..cube("light")
        },
    }
}

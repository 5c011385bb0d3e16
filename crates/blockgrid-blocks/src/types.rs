use serde::{Deserialize, Serialize};

use crate::catalog::traits;

/// Closed catalogue of block kinds. The discriminant is the stable on-disk id.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum BlockType {
    None = 0,
    Air = 1,
    Test = 2,
    Dots = 3,
    Eye = 4,
    Teleporter = 5,
    CrappyMarble = 6,
    White = 7,
    Black = 8,
    Glass = 9,
    Light = 10,
}

impl BlockType {
    pub const ALL: [BlockType; 11] = [
        BlockType::None,
        BlockType::Air,
        BlockType::Test,
        BlockType::Dots,
        BlockType::Eye,
        BlockType::Teleporter,
        BlockType::CrappyMarble,
        BlockType::White,
        BlockType::Black,
        BlockType::Glass,
        BlockType::Light,
    ];

    #[inline]
    pub fn id(self) -> u16 {
        self as u16
    }

    #[inline]
    pub fn from_id(id: u16) -> Option<BlockType> {
        BlockType::ALL.get(id as usize).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            BlockType::None => "none",
            BlockType::Air => "air",
            BlockType::Test => "test",
            BlockType::Dots => "dots",
            BlockType::Eye => "eye",
            BlockType::Teleporter => "teleporter",
            BlockType::CrappyMarble => "crappy_marble",
            BlockType::White => "white",
            BlockType::Black => "black",
            BlockType::Glass => "glass",
            BlockType::Light => "light",
        }
    }

    pub fn from_name(name: &str) -> Option<BlockType> {
        BlockType::ALL.iter().copied().find(|t| t.name() == name)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Visibility {
    Opaque,
    Translucent,
    Invisible,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
    };

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub fn is_black(self) -> bool {
        self == Color::BLACK
    }
}

/// Cube faces. `Right`, `Top` and `Front` face the positive direction of their axis.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Face {
    Right = 0,
    Left = 1,
    Top = 2,
    Bottom = 3,
    Front = 4,
    Back = 5,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Right,
        Face::Left,
        Face::Top,
        Face::Bottom,
        Face::Front,
        Face::Back,
    ];

    /// Returns the `[0..6)` index of this face.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn from_index(i: usize) -> Option<Face> {
        Face::ALL.get(i).copied()
    }

    /// Axis the face is perpendicular to (0 = x, 1 = y, 2 = z).
    #[inline]
    pub fn axis(self) -> usize {
        match self {
            Face::Right | Face::Left => 0,
            Face::Top | Face::Bottom => 1,
            Face::Front | Face::Back => 2,
        }
    }

    #[inline]
    pub fn is_positive(self) -> bool {
        matches!(self, Face::Right | Face::Top | Face::Front)
    }

    /// Integer grid delta when stepping out through this face.
    #[inline]
    pub fn normal(self) -> [i32; 3] {
        let mut n = [0; 3];
        n[self.axis()] = if self.is_positive() { 1 } else { -1 };
        n
    }

    /// Inverse of [`Face::normal`]; `None` unless exactly one component is ±1.
    pub fn from_normal(n: [i32; 3]) -> Option<Face> {
        match n {
            [1, 0, 0] => Some(Face::Right),
            [-1, 0, 0] => Some(Face::Left),
            [0, 1, 0] => Some(Face::Top),
            [0, -1, 0] => Some(Face::Bottom),
            [0, 0, 1] => Some(Face::Front),
            [0, 0, -1] => Some(Face::Back),
            _ => None,
        }
    }

    #[inline]
    pub fn role(self) -> FaceRole {
        match self {
            Face::Top => FaceRole::Top,
            Face::Bottom => FaceRole::Bottom,
            _ => FaceRole::Side,
        }
    }
}

// Used when resolving per-face textures from config
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FaceRole {
    Top,
    Bottom,
    Side,
}

/// Compact block value stored in chunk arrays. `color` is only meaningful for
/// light-emitting kinds and is kept black otherwise.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Block {
    ty: BlockType,
    color: Color,
}

impl Block {
    pub const NONE: Block = Block {
        ty: BlockType::None,
        color: Color::BLACK,
    };
    pub const AIR: Block = Block {
        ty: BlockType::Air,
        color: Color::BLACK,
    };

    /// Block of the given kind with its default payload.
    #[inline]
    pub fn new(ty: BlockType) -> Self {
        let color = if traits(ty).emits_light {
            Color::WHITE
        } else {
            Color::BLACK
        };
        Self { ty, color }
    }

    /// Light-emitting block with an explicit color.
    #[inline]
    pub fn light(color: Color) -> Self {
        Self {
            ty: BlockType::Light,
            color,
        }
    }

    /// Rebuilds a block from its stored parts; the payload is dropped for kinds that do not emit.
    #[inline]
    pub fn from_parts(ty: BlockType, color: Color) -> Self {
        if traits(ty).emits_light {
            Self { ty, color }
        } else {
            Self::new(ty)
        }
    }

    #[inline]
    pub fn ty(self) -> BlockType {
        self.ty
    }

    #[inline]
    pub fn visibility(self) -> Visibility {
        traits(self.ty).visibility
    }

    #[inline]
    pub fn is_opaque(self) -> bool {
        self.visibility() == Visibility::Opaque
    }

    #[inline]
    pub fn is_translucent(self) -> bool {
        self.visibility() == Visibility::Translucent
    }

    #[inline]
    pub fn is_invisible(self) -> bool {
        self.visibility() == Visibility::Invisible
    }

    /// Can bodies collide with this block?
    #[inline]
    pub fn is_solid(self) -> bool {
        traits(self.ty).solid
    }

    /// Can rays select this block?
    #[inline]
    pub fn is_selectable(self) -> bool {
        traits(self.ty).selectable
    }

    #[inline]
    pub fn bounciness(self) -> f64 {
        traits(self.ty).bounciness
    }

    /// Emitted light; black for blocks that do not glow.
    #[inline]
    pub fn color(self) -> Color {
        self.color
    }
}

impl Default for Block {
    fn default() -> Self {
        Block::AIR
    }
}

impl From<BlockType> for Block {
    fn from(ty: BlockType) -> Self {
        Block::new(ty)
    }
}

use blockgrid_blocks::{Block, BlockType, Color, Face, Visibility, traits};

#[test]
fn ids_and_names_round_trip() {
    for ty in BlockType::ALL {
        assert_eq!(BlockType::from_id(ty.id()), Some(ty));
        assert_eq!(BlockType::from_name(ty.name()), Some(ty));
    }
    assert_eq!(BlockType::from_id(BlockType::ALL.len() as u16), None);
    assert_eq!(BlockType::from_name("granite"), None);
}

#[test]
fn sentinel_and_air_are_empty() {
    for b in [Block::NONE, Block::AIR] {
        assert!(b.is_invisible());
        assert!(!b.is_solid());
        assert!(!b.is_selectable());
    }
    assert_eq!(Block::default(), Block::AIR);
}

#[test]
fn capabilities_follow_catalogue() {
    assert!(Block::new(BlockType::White).is_opaque());
    assert!(Block::new(BlockType::Glass).is_translucent());
    assert!(Block::new(BlockType::Glass).is_solid());
    let tele = Block::new(BlockType::Teleporter);
    assert!(!tele.is_solid());
    assert!(tele.is_selectable());
    assert_eq!(Block::new(BlockType::Test).bounciness(), 1.0);
    assert_eq!(Block::new(BlockType::Dots).bounciness(), 0.0);
    assert_eq!(traits(BlockType::Air).visibility, Visibility::Invisible);
}

#[test]
fn color_payload_only_for_emitters() {
    let red = Color::new(255, 0, 0);
    assert_eq!(Block::light(red).color(), red);
    assert_eq!(Block::new(BlockType::Light).color(), Color::WHITE);
    assert_eq!(Block::from_parts(BlockType::Eye, red).color(), Color::BLACK);
    assert_eq!(Block::from_parts(BlockType::Light, red).color(), red);
}

#[test]
fn face_normals_round_trip() {
    for face in Face::ALL {
        let n = face.normal();
        assert_eq!(Face::from_normal(n), Some(face));
        assert_eq!(n[face.axis()], if face.is_positive() { 1 } else { -1 });
        assert_eq!(Face::from_index(face.index()), Some(face));
    }
    assert_eq!(Face::from_normal([1, 1, 0]), None);
    assert_eq!(Face::from_normal([0, 0, 0]), None);
}

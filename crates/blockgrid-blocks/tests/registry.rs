use blockgrid_blocks::{BlockRegistry, BlockType, Face, RegistryError};

#[test]
fn builtin_assigns_sorted_texture_slots() {
    let reg = BlockRegistry::builtin();
    let black = reg.texture_slot("black").expect("black texture");
    let white = reg.texture_slot("white").expect("white texture");
    assert_eq!(black.unit, 0);
    assert!(black.index < white.index);
    assert_eq!(reg.texture_name(black), Some("black"));

    let app = reg.appearance(BlockType::Dots, Face::Top);
    assert_eq!(reg.texture_name(app.texture), Some("dots"));
    assert_eq!(reg.shader_name(app.shader), Some("default"));
    assert_eq!(app.rotation, 0);
}

#[test]
fn translucent_blocks_use_their_own_shader() {
    let reg = BlockRegistry::builtin();
    let glass = reg.appearance(BlockType::Glass, Face::Front);
    let white = reg.appearance(BlockType::White, Face::Front);
    assert_ne!(glass.shader, white.shader);
    assert_eq!(reg.shader_name(glass.shader), Some("translucent"));
}

#[test]
fn toml_overrides_per_face_textures() {
    let src = r#"
        [blocks.crappy_marble]
        textures = { all = "marble_side", top = "marble_top" }
        rotation = 2

        [blocks.eye]
        shader = "glow"
    "#;
    let reg = BlockRegistry::from_toml_str(src).expect("parse");
    let top = reg.appearance(BlockType::CrappyMarble, Face::Top);
    let side = reg.appearance(BlockType::CrappyMarble, Face::Left);
    let bottom = reg.appearance(BlockType::CrappyMarble, Face::Bottom);
    assert_eq!(reg.texture_name(top.texture), Some("marble_top"));
    assert_eq!(reg.texture_name(side.texture), Some("marble_side"));
    assert_eq!(reg.texture_name(bottom.texture), Some("marble_side"));
    assert_eq!(top.rotation, 2);
    let eye = reg.appearance(BlockType::Eye, Face::Right);
    assert_eq!(reg.shader_name(eye.shader), Some("glow"));
}

#[test]
fn rejects_unknown_blocks_and_rotations() {
    let err = BlockRegistry::from_toml_str("[blocks.granite]\nshader = \"x\"\n").unwrap_err();
    assert!(matches!(err, RegistryError::UnknownBlock(name) if name == "granite"));

    let err = BlockRegistry::from_toml_str("[blocks.white]\nrotation = 4\n").unwrap_err();
    assert!(matches!(err, RegistryError::BadRotation { rotation: 4, .. }));

    let err = BlockRegistry::from_toml_str("[blocks.white\n").unwrap_err();
    assert!(matches!(err, RegistryError::Toml(_)));
}

#[test]
fn id_table_lists_every_type() {
    let table = BlockRegistry::builtin().id_table();
    assert_eq!(table.len(), BlockType::ALL.len());
    assert!(table.contains(&(6, "crappy_marble".to_string())));
}

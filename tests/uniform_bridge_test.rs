use parlor_ngin::{
    Matrix4, SquareMatrix, Vector2, Vector3, Vector4,
    bridge::{NOT_FOUND_SLOT, UniformBridge},
    data_structures::material::MaterialRegistry,
    resources::texture::TextureRegistry,
    shader::{
        MATERIAL_DIFFUSE, MATERIAL_SHININESS, MATERIAL_SPECULAR, MODEL, OBJECT_COLOR,
        OBJECT_TEXTURE, ShaderProgram, USE_TEXTURE, UV_SCALE, UniformBlock, UniformValue,
    },
};

use crate::common::test_utils::{FakeTextures, RecordingProgram, temp_dir, write_rgb};

mod common;

fn registries(test_name: &str) -> (TextureRegistry<FakeTextures>, MaterialRegistry) {
    let dir = temp_dir(test_name);
    let mut textures = TextureRegistry::new(FakeTextures::new());
    textures.load(write_rgb(&dir, "floor.png", 2, 2), "woodFloor").unwrap();
    textures.load(write_rgb(&dir, "wall.png", 2, 2), "beigeWall").unwrap();
    textures.bind_all().unwrap();

    let mut materials = MaterialRegistry::new();
    materials.define(
        "wood",
        Vector3::new(0.5, 0.3, 0.1),
        Vector3::new(0.2, 0.2, 0.2),
        30.0,
    );
    (textures, materials)
}

#[test]
fn push_texture_sets_the_slot_and_enables_texturing() {
    let (textures, materials) = registries("push_texture_sets_the_slot");
    let mut program = RecordingProgram::new();
    let mut bridge = UniformBridge::new(Some(&mut program), &textures, &materials);

    assert_eq!(bridge.push_texture("beigeWall"), Some(1));

    assert_eq!(
        program.sets,
        vec![
            (USE_TEXTURE.to_string(), UniformValue::Int(1)),
            (OBJECT_TEXTURE.to_string(), UniformValue::Int(1)),
        ]
    );
}

#[test]
fn push_texture_with_an_unknown_tag_sends_the_sentinel() {
    let (textures, materials) = registries("push_texture_with_an_unknown_tag");
    let mut program = RecordingProgram::new();
    let mut bridge = UniformBridge::new(Some(&mut program), &textures, &materials);

    assert_eq!(bridge.push_texture("pillowBody"), Some(NOT_FOUND_SLOT));

    assert_eq!(program.last(USE_TEXTURE), Some(UniformValue::Int(1)));
    assert_eq!(program.last(OBJECT_TEXTURE), Some(UniformValue::Int(-1)));
}

#[test]
fn push_flat_color_disables_texturing() {
    let (textures, materials) = registries("push_flat_color_disables_texturing");
    let mut program = RecordingProgram::new();
    let mut bridge = UniformBridge::new(Some(&mut program), &textures, &materials);

    bridge.push_texture("woodFloor");
    bridge.push_flat_color(Vector4::new(1.0, 0.0, 0.0, 1.0));

    assert_eq!(program.last(USE_TEXTURE), Some(UniformValue::Int(0)));
    assert_eq!(
        program.last(OBJECT_COLOR),
        Some(UniformValue::Vec4(Vector4::new(1.0, 0.0, 0.0, 1.0)))
    );
}

#[test]
fn push_transform_and_uv_scale() {
    let (textures, materials) = registries("push_transform_and_uv_scale");
    let mut program = RecordingProgram::new();
    let mut bridge = UniformBridge::new(Some(&mut program), &textures, &materials);
    let model = Matrix4::from_translation(Vector3::new(13.0, 4.02, -6.0));

    bridge.push_transform(model);
    bridge.push_uv_scale(1.0, 9.0);

    assert_eq!(program.last(MODEL), Some(UniformValue::Mat4(model)));
    assert_eq!(
        program.last(UV_SCALE),
        Some(UniformValue::Vec2(Vector2::new(1.0, 9.0)))
    );
}

#[test]
fn push_material_sets_all_three_fields() {
    let (textures, materials) = registries("push_material_sets_all_three_fields");
    let mut program = RecordingProgram::new();
    let mut bridge = UniformBridge::new(Some(&mut program), &textures, &materials);

    assert!(bridge.push_material("wood"));

    assert_eq!(
        program.names(),
        [MATERIAL_DIFFUSE, MATERIAL_SPECULAR, MATERIAL_SHININESS]
    );
    assert_eq!(
        program.last(MATERIAL_DIFFUSE),
        Some(UniformValue::Vec3(Vector3::new(0.5, 0.3, 0.1)))
    );
    assert_eq!(program.last(MATERIAL_SHININESS), Some(UniformValue::Float(30.0)));
}

#[test]
fn unknown_materials_keep_the_previous_values() {
    let (textures, materials) = registries("unknown_materials_keep_the_previous_values");
    let mut block = UniformBlock::new();
    {
        let mut bridge = UniformBridge::new(Some(&mut block), &textures, &materials);
        bridge.push_material("wood");
        assert!(!bridge.push_material("velvet"));
    }

    assert_eq!(block.draw().diffuse_color, [0.5, 0.3, 0.1]);
    assert_eq!(block.draw().specular_color, [0.2, 0.2, 0.2]);
    assert_eq!(block.draw().shininess, 30.0);
}

#[test]
fn unknown_material_sets_nothing() {
    let (textures, materials) = registries("unknown_material_sets_nothing");
    let mut program = RecordingProgram::new();
    let mut bridge = UniformBridge::new(Some(&mut program), &textures, &materials);

    assert!(!bridge.push_material("velvet"));

    assert!(program.sets.is_empty());
}

#[test]
fn every_push_is_skipped_without_a_program() {
    let (textures, materials) = registries("every_push_is_skipped_without_a_program");
    let mut bridge = UniformBridge::new(None, &textures, &materials);

    assert!(!bridge.is_active());
    bridge.push_transform(Matrix4::identity());
    bridge.push_flat_color(Vector4::new(1.0, 1.0, 1.0, 1.0));
    bridge.push_uv_scale(2.0, 2.0);
    assert_eq!(bridge.push_texture("woodFloor"), None);
    assert!(!bridge.push_material("wood"));
}

#[test]
fn pushes_land_in_the_draw_uniforms() {
    let (textures, materials) = registries("pushes_land_in_the_draw_uniforms");
    let mut block = UniformBlock::new();
    let model = Matrix4::from_nonuniform_scale(20.0, 1.0, 10.0);
    {
        let mut bridge = UniformBridge::new(Some(&mut block), &textures, &materials);
        bridge.push_transform(model);
        bridge.push_texture("woodFloor");
        bridge.push_uv_scale(2.0, 2.0);
        bridge.push_material("wood");
    }

    let draw = block.draw();
    let expected: [[f32; 4]; 4] = model.into();
    assert_eq!(draw.model, expected);
    assert_eq!(draw.use_texture, 1);
    assert_eq!(draw.texture_slot, 0);
    assert_eq!(draw.uv_scale, [2.0, 2.0]);
    assert_eq!(draw.shininess, 30.0);

    // The block is a regular program too.
    block.set_int(OBJECT_TEXTURE, NOT_FOUND_SLOT);
    assert_eq!(block.draw().texture_slot, -1);
}

use parlor_ngin::{
    Vector3,
    data_structures::light::{DirectionalLight, LightColor, LightSetup, PointLight},
    shader::{MAX_POINT_LIGHTS, USE_LIGHTING, UniformBlock, UniformValue},
};

use crate::common::test_utils::RecordingProgram;

mod common;

fn color(level: f32) -> LightColor {
    LightColor {
        ambient: Vector3::new(level, level, level),
        diffuse: Vector3::new(level * 2.0, level * 2.0, level * 2.0),
        specular: Vector3::new(level * 3.0, level * 3.0, level * 3.0),
    }
}

fn point(x: f32) -> PointLight {
    PointLight {
        position: Vector3::new(x, 5.5, -6.0),
        color: color(0.1),
    }
}

#[test]
fn directional_and_point_lights_fill_the_frame_uniforms() {
    let lights = LightSetup::default()
        .with_directional(DirectionalLight {
            direction: Vector3::new(-0.2, 1.0, -0.3),
            color: color(0.2),
        })
        .with_point(point(-7.0))
        .with_point(point(13.0));
    let mut block = UniformBlock::new();

    lights.apply(&mut block);

    let frame = block.frame();
    assert_eq!(frame.use_lighting, 1);
    assert_eq!(frame.directional.active, 1);
    assert_eq!(frame.directional.vector, [-0.2, 1.0, -0.3]);
    assert_eq!(frame.directional.ambient, [0.2, 0.2, 0.2]);
    assert_eq!(frame.point_lights[0].vector, [-7.0, 5.5, -6.0]);
    assert_eq!(frame.point_lights[1].vector, [13.0, 5.5, -6.0]);
    assert_eq!(frame.point_lights[1].active, 1);
    assert_eq!(frame.point_lights[2].active, 0);
    assert_eq!(frame.point_lights[3].active, 0);
}

#[test]
fn unused_slots_are_switched_off_explicitly() {
    let mut program = RecordingProgram::new();

    LightSetup::default().apply(&mut program);

    assert_eq!(program.last(USE_LIGHTING), Some(UniformValue::Bool(true)));
    assert_eq!(
        program.last("directionalLight.bActive"),
        Some(UniformValue::Bool(false))
    );
    for index in 0..MAX_POINT_LIGHTS {
        assert_eq!(
            program.last(&format!("pointLights[{index}].bActive")),
            Some(UniformValue::Bool(false))
        );
    }
    assert!(program.last("directionalLight.direction").is_none());
}

#[test]
fn reapplying_a_smaller_setup_switches_stale_lights_off() {
    let mut block = UniformBlock::new();
    LightSetup::default()
        .with_point(point(1.0))
        .with_point(point(2.0))
        .apply(&mut block);

    LightSetup::default().with_point(point(3.0)).apply(&mut block);

    assert_eq!(block.frame().point_lights[0].vector, [3.0, 5.5, -6.0]);
    assert_eq!(block.frame().point_lights[1].active, 0);
}

#[test]
fn lighting_can_be_disabled() {
    let mut block = UniformBlock::new();
    let lights = LightSetup {
        use_lighting: false,
        ..LightSetup::default()
    };

    lights.apply(&mut block);

    assert_eq!(block.frame().use_lighting, 0);
}

#[test]
fn lights_past_the_shader_limit_are_dropped() {
    let mut lights = LightSetup::default();
    for i in 0..MAX_POINT_LIGHTS + 2 {
        lights = lights.with_point(point(i as f32));
    }
    let mut program = RecordingProgram::new();

    lights.apply(&mut program);

    let positions = program
        .names()
        .into_iter()
        .filter(|name| name.ends_with(".position"))
        .count();
    assert_eq!(positions, MAX_POINT_LIGHTS);
    assert!(program.last("pointLights[4].position").is_none());
}

//! A furnished living room: floor, wall, rug, side table with a lamp, couch and a pillow.
//!
//! Texture files are expected under `textures/` in the assets directory.

use cgmath::Vector3;

use crate::{
    composer::{SceneDescription, SceneObject},
    data_structures::{
        light::{DirectionalLight, LightColor, LightSetup, PointLight},
        mesh::{Primitive, Surfaces},
        transform::Transform,
    },
};

pub fn living_room() -> SceneDescription {
    let mut scene = SceneDescription::new()
        .texture("beigeWall", "textures/BeigeWall.jpg")
        .texture("carpet", "textures/carpet.jpg")
        .texture("cushionFabric", "textures/cushionFabric.jpg")
        .texture("woodTable", "textures/WoodTable.png")
        .texture("woodFloor", "textures/WoodFloor.jpg")
        .texture("blackMetal", "textures/BlackMetal.jpg")
        .texture("lampShadeCanvas", "textures/lampShadeCanvas.png")
        .texture("MetalBulb", "textures/MetalBulb.jpg")
        .texture("WoodTableTop", "textures/WoodTableTop.jpg")
        .texture("glassBulb", "textures/glassBulb.jpg")
        .texture("marble", "textures/Marble.jpg")
        .texture("pillowFront", "textures/pillowFront.jpg")
        .texture("pillowBody", "textures/pillowBody.jpg")
        .material("fabric", v(0.8, 0.7, 0.6), v(0.06, 0.06, 0.05), 3.0)
        .material("wood", v(0.5, 0.3, 0.1), v(0.2, 0.2, 0.2), 30.0)
        .material("metal", v(0.6, 0.6, 0.6), v(0.3, 0.3, 0.3), 8.0)
        .material("wall", v(0.9, 0.85, 0.8), v(0.02, 0.02, 0.02), 2.0)
        .material("carpet", v(0.5, 0.3, 0.1), v(0.03, 0.03, 0.03), 2.0)
        .lights(lights());

    scene.objects.extend(room());
    scene.objects.extend(table());
    scene.objects.extend(lamp());
    scene.objects.extend(couch());
    scene.objects.extend(pillow());
    scene
}

fn v(x: f32, y: f32, z: f32) -> Vector3<f32> {
    Vector3::new(x, y, z)
}

fn lights() -> LightSetup {
    LightSetup::default()
        .with_directional(DirectionalLight {
            direction: v(-0.2, 1.0, -0.3),
            color: LightColor {
                ambient: v(0.6, 0.5, 0.4),
                diffuse: v(0.5, 0.4, 0.35),
                specular: v(0.4, 0.35, 0.3),
            },
        })
        // left of the couch
        .with_point(PointLight {
            position: v(-7.0, 7.0, -4.0),
            color: LightColor {
                ambient: v(0.2, 0.15, 0.12),
                diffuse: v(0.4, 0.4, 0.3),
                specular: v(0.4, 0.3, 0.2),
            },
        })
        // above the lamp bulb
        .with_point(PointLight {
            position: v(13.0, 5.5, -6.0),
            color: LightColor {
                ambient: v(0.1, 0.08, 0.06),
                diffuse: v(0.25, 0.2, 0.15),
                specular: v(0.2, 0.15, 0.1),
            },
        })
}

fn room() -> Vec<SceneObject> {
    vec![
        SceneObject::new(Primitive::Plane, Transform::new().scaled(20.0, 1.0, 10.0))
            .textured("woodFloor")
            .uv_scale(2.0, 2.0)
            .material("wood"),
        SceneObject::new(
            Primitive::Plane,
            Transform::new()
                .scaled(20.0, 1.0, 10.0)
                .rotated(90.0, 0.0, 0.0)
                .at(0.0, 9.0, -10.0),
        )
        .textured("beigeWall")
        .uv_scale(2.0, 2.0)
        .material("wall"),
        SceneObject::new(
            Primitive::Plane,
            Transform::new().scaled(9.0, 1.0, 6.0).at(0.0, 0.1, -4.0),
        )
        .textured("carpet")
        .uv_scale(5.0, 5.0)
        .material("wall"),
    ]
}

fn table() -> Vec<SceneObject> {
    let wood = |primitive, transform| {
        SceneObject::new(primitive, transform)
            .textured("woodTable")
            .material("wood")
    };
    let metal = |transform| {
        SceneObject::new(Primitive::Box, transform)
            .textured("blackMetal")
            .material("metal")
    };

    let mut objects: Vec<SceneObject> = [(12.0, -7.0), (12.0, -5.0), (14.0, -7.0), (14.0, -5.0)]
        .into_iter()
        .map(|(x, z)| {
            wood(
                Primitive::Box,
                Transform::new().scaled(0.25, 4.0, 0.25).at(x, 2.0, z),
            )
        })
        .collect();
    objects.extend([
        // lower shelf
        wood(
            Primitive::Plane,
            Transform::new().scaled(1.13, 20.0, 1.13).at(13.0, 1.0, -6.0),
        ),
        // drawer body
        wood(
            Primitive::Box,
            Transform::new().scaled(2.0, 1.0, 2.0).at(13.0, 3.5, -6.0),
        ),
        // table top
        wood(
            Primitive::Plane,
            Transform::new().scaled(1.3, 20.0, 1.3).at(13.0, 4.03, -6.0),
        ),
        // drawer handle
        metal(Transform::new().scaled(0.1, 0.1, 0.3).at(13.5, 3.5, -4.7)),
        metal(Transform::new().scaled(0.1, 0.1, 0.3).at(12.5, 3.5, -4.7)),
        metal(Transform::new().scaled(1.1, 0.1, 0.1).at(13.0, 3.5, -4.5)),
    ]);
    objects
}

fn lamp() -> Vec<SceneObject> {
    let base = Transform::new().scaled(0.5, 0.09, 0.5).at(13.0, 4.02, -6.0);
    vec![
        // marble top, metal rim
        SceneObject::new(Primitive::Cylinder, base)
            .surfaces(Surfaces::TOP)
            .textured("marble")
            .material("metal"),
        SceneObject::new(Primitive::Cylinder, base)
            .surfaces(Surfaces::new(false, true, true))
            .textured("blackMetal")
            .material("metal"),
        // pole
        SceneObject::new(
            Primitive::Cylinder,
            Transform::new().scaled(0.1, 1.3, 0.1).at(13.0, 4.07, -6.0),
        )
        .textured("blackMetal")
        .material("metal"),
        // socket
        SceneObject::new(
            Primitive::Cylinder,
            Transform::new().scaled(0.13, 0.18, 0.13).at(13.0, 5.2, -6.0),
        )
        .textured("MetalBulb")
        .uv_scale(1.0, 9.0)
        .material("metal"),
        // The bulb sets no material and keeps the one of the socket.
        SceneObject::new(
            Primitive::Sphere,
            Transform::new().scaled(0.2, 0.2, 0.2).at(13.0, 5.5, -6.0),
        )
        .textured("glassBulb"),
        // shade, open at both ends
        SceneObject::new(
            Primitive::TaperedCylinder,
            Transform::new().scaled(0.9, 1.0, 0.9).at(13.0, 5.35, -6.0),
        )
        .surfaces(Surfaces::SIDES)
        .textured("lampShadeCanvas")
        .material("fabric"),
    ]
}

fn couch() -> Vec<SceneObject> {
    let fabric = |primitive, transform| {
        SceneObject::new(primitive, transform)
            .textured("cushionFabric")
            .material("fabric")
    };

    let mut objects: Vec<SceneObject> = [(-7.0, -2.0), (-7.0, -9.0), (7.0, -2.0), (7.0, -9.0)]
        .into_iter()
        .map(|(x, z)| {
            SceneObject::new(
                Primitive::TaperedCylinder,
                Transform::new()
                    .scaled(0.35, 0.9, 0.35)
                    .rotated(180.0, 0.0, 0.0)
                    .at(x, 0.9, z),
            )
            .textured("woodTable")
            .material("wood")
        })
        .collect();
    objects.extend([
        // arms
        fabric(
            Primitive::Box,
            Transform::new().scaled(0.8, 4.0, 7.75).at(-7.0, 2.9, -5.4),
        ),
        fabric(
            Primitive::Box,
            Transform::new().scaled(0.8, 4.0, 7.75).at(7.0, 2.9, -5.4),
        ),
        // seat
        fabric(
            Primitive::Box,
            Transform::new().scaled(6.63, 0.8, 7.6).at(-3.33, 1.31, -5.33),
        ),
        fabric(
            Primitive::Box,
            Transform::new().scaled(6.63, 0.8, 7.6).at(3.33, 1.31, -5.33),
        ),
        // back
        fabric(
            Primitive::Box,
            Transform::new()
                .scaled(13.2, 4.0, 0.8)
                .rotated(-8.0, 0.0, 0.0)
                .at(0.0, 3.0, -8.7),
        ),
    ]);
    // seat cushions, then back cushions
    objects.extend([-6.5, 0.0].into_iter().map(|x| {
        fabric(
            Primitive::Cylinder,
            Transform::new()
                .scaled(3.3, 6.45, 0.4)
                .rotated(90.0, 90.0, 0.0)
                .at(x, 2.0, -4.8),
        )
        .uv_scale(2.0, 2.0)
    }));
    objects.extend([-6.5, 0.0].into_iter().map(|x| {
        fabric(
            Primitive::Cylinder,
            Transform::new()
                .scaled(3.0, 6.45, 0.4)
                .rotated(0.0, -20.0, -90.0)
                .at(x, 4.0, -7.8),
        )
        .uv_scale(2.0, 2.0)
    }));
    objects
}

fn pillow() -> Vec<SceneObject> {
    vec![
        SceneObject::new(
            Primitive::Cylinder,
            Transform::new()
                .scaled(1.4, 0.7, 1.4)
                .rotated(40.0, -45.0, 0.0)
                .at(5.3, 3.2, -5.9),
        )
        .textured("cushionFabric")
        .material("fabric"),
        SceneObject::new(
            Primitive::HalfSphere,
            Transform::new()
                .scaled(1.4, 0.4, 1.4)
                .rotated(40.0, -45.0, 0.0)
                .at(5.0, 3.7, -5.56),
        )
        .textured("pillowFront")
        .material("fabric"),
    ]
}

use std::ops::Range;

use parlor_ngin::{
    data_structures::mesh::{Surface, Surfaces},
    resources::mesh::{load_mesh_data, mesh_data_from_obj},
};

use crate::common::test_utils::temp_dir;

mod common;

const CAPPED: &str = "\
v 0 1 0
v 1 1 0
v 1 1 1
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
v 0 0 0
v 0 0 1
v 1 0 0
vn 0 1 0
vn 0 0 1
vn 0 -1 0
o top
f 1//1 2//1 3//1
o sides
f 4//2 5//2 6//2 7//2
o bottom
f 8//3 9//3 10//3
";

#[test]
fn named_objects_become_drawable_surfaces() {
    let data = mesh_data_from_obj(&mut CAPPED.as_bytes()).unwrap();

    let surfaces: Vec<Surface> = data.parts.iter().map(|part| part.surface).collect();
    assert_eq!(surfaces, [Surface::Top, Surface::Sides, Surface::Bottom]);

    // The quad is split into two triangles.
    let ranges: Vec<Range<u32>> = data.parts.iter().map(|p| p.indices.clone()).collect();
    assert_eq!(ranges, [0..3, 3..9, 9..12]);
    assert_eq!(data.indices.len(), 12);
    assert!(data.indices.iter().all(|&i| (i as usize) < data.vertices.len()));
}

#[test]
fn ranges_select_the_requested_surfaces() {
    let data = mesh_data_from_obj(&mut CAPPED.as_bytes()).unwrap();

    assert_eq!(data.ranges(Surfaces::TOP).collect::<Vec<_>>(), [0..3]);
    assert_eq!(
        data.ranges(Surfaces::new(true, true, false)).collect::<Vec<_>>(),
        [0..3, 9..12]
    );
    assert_eq!(data.ranges(Surfaces::ALL).count(), 3);
    assert_eq!(data.ranges(Surfaces::new(false, false, false)).count(), 0);
}

#[test]
fn group_names_are_matched_without_case() {
    assert_eq!(Surface::from_group_name("TOP"), Surface::Top);
    assert_eq!(Surface::from_group_name("Bottom"), Surface::Bottom);
    assert_eq!(Surface::from_group_name("cylinder_body"), Surface::Sides);
}

#[test]
fn normals_are_read_and_missing_uvs_default_to_zero() {
    let data = mesh_data_from_obj(&mut CAPPED.as_bytes()).unwrap();

    let first_top = data.indices[0] as usize;
    assert_eq!(data.vertices[first_top].normal, [0.0, 1.0, 0.0]);
    assert_eq!(data.vertices[first_top].tex_coords, [0.0, 0.0]);
}

#[test]
fn missing_mesh_files_name_the_path() {
    let dir = temp_dir("missing_mesh_files_name_the_path");
    let path = dir.join("cone.obj");

    let err = load_mesh_data(&path).unwrap_err();

    assert!(format!("{err:#}").contains("cone.obj"));
}

#[test]
fn mesh_files_are_loaded_from_disk() {
    let dir = temp_dir("mesh_files_are_loaded_from_disk");
    let path = dir.join("cylinder.obj");
    std::fs::write(&path, CAPPED).unwrap();

    let data = load_mesh_data(&path).unwrap();

    assert_eq!(data.parts.len(), 3);
}

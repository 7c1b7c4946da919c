use parlor_ngin::{Vector3, data_structures::material::MaterialRegistry};

#[test]
fn find_returns_the_defined_values() {
    let mut materials = MaterialRegistry::new();
    materials.define(
        "wood",
        Vector3::new(0.5, 0.3, 0.1),
        Vector3::new(0.2, 0.2, 0.2),
        30.0,
    );
    materials.define(
        "metal",
        Vector3::new(0.6, 0.6, 0.6),
        Vector3::new(0.3, 0.3, 0.3),
        8.0,
    );

    let metal = materials.find("metal").unwrap();
    assert_eq!(metal.tag, "metal");
    assert_eq!(metal.diffuse_color, Vector3::new(0.6, 0.6, 0.6));
    assert_eq!(metal.specular_color, Vector3::new(0.3, 0.3, 0.3));
    assert_eq!(metal.shininess, 8.0);
}

#[test]
fn duplicate_tags_resolve_to_the_first_definition() {
    let mut materials = MaterialRegistry::new();
    materials.define(
        "fabric",
        Vector3::new(0.8, 0.7, 0.6),
        Vector3::new(0.06, 0.06, 0.05),
        3.0,
    );
    materials.define(
        "fabric",
        Vector3::new(0.1, 0.1, 0.1),
        Vector3::new(0.9, 0.9, 0.9),
        64.0,
    );

    let fabric = materials.find("fabric").unwrap();
    assert_eq!(fabric.diffuse_color, Vector3::new(0.8, 0.7, 0.6));
    assert_eq!(fabric.shininess, 3.0);
    // Both definitions are kept.
    assert_eq!(materials.len(), 2);
    assert_eq!(materials.iter().filter(|m| m.tag == "fabric").count(), 2);
}

#[test]
fn find_on_empty_or_unknown_tags_returns_none() {
    let mut materials = MaterialRegistry::new();
    assert!(materials.is_empty());
    assert!(materials.find("wall").is_none());

    materials.define("wall", Vector3::new(0.9, 0.85, 0.8), Vector3::new(0.02, 0.02, 0.02), 2.0);
    assert!(materials.find("Wall").is_none());
    assert!(materials.find("carpet").is_none());
}

#[test]
fn negative_shininess_is_clamped() {
    let mut materials = MaterialRegistry::new();
    materials.define("odd", Vector3::new(1.0, 1.0, 1.0), Vector3::new(0.0, 0.0, 0.0), -4.0);

    assert_eq!(materials.find("odd").unwrap().shininess, 0.0);
}

#[test]
fn iteration_keeps_definition_order() {
    let mut materials = MaterialRegistry::new();
    for tag in ["fabric", "wood", "metal", "wall", "carpet"] {
        materials.define(tag, Vector3::new(0.5, 0.5, 0.5), Vector3::new(0.1, 0.1, 0.1), 1.0);
    }

    let tags: Vec<&str> = materials.iter().map(|m| m.tag.as_str()).collect();
    assert_eq!(tags, ["fabric", "wood", "metal", "wall", "carpet"]);
}

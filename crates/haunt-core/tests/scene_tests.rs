// Host-side tests for procedural meshes and the haunted house layout.

use glam::Vec3;
use haunt_core::assets::TextureImage;
use haunt_core::constants::*;
use haunt_core::geometry::*;
use haunt_core::scene::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn layout(seed: u64) -> SceneLayout {
    haunted_house(&mut StdRng::seed_from_u64(seed))
}

fn face_normal(mesh: &MeshData, tri: usize) -> Vec3 {
    let p = |i: usize| Vec3::from(mesh.vertices[mesh.indices[tri * 3 + i] as usize].position);
    (p(1) - p(0)).cross(p(2) - p(0))
}

#[test]
fn box_faces_point_outward() {
    let mesh = box_mesh(4.0, 2.5, 4.0);
    assert_eq!(mesh.vertices.len(), 24);
    assert_eq!(mesh.triangle_count(), 12);
    for tri in 0..mesh.triangle_count() {
        let n = face_normal(&mesh, tri);
        let centroid = (0..3)
            .map(|i| Vec3::from(mesh.vertices[mesh.indices[tri * 3 + i] as usize].position))
            .fold(Vec3::ZERO, |acc, p| acc + p)
            / 3.0;
        assert!(n.dot(centroid) > 0.0, "triangle {tri} winds inward");
    }
}

#[test]
fn plane_subdivision_counts() {
    let mesh = plane_mesh(2.2, 2.2, DOOR_SEGMENTS, DOOR_SEGMENTS);
    let s = DOOR_SEGMENTS as usize;
    assert_eq!(mesh.vertices.len(), (s + 1) * (s + 1));
    assert_eq!(mesh.triangle_count(), s * s * 2);
    assert!(face_normal(&mesh, 0).z > 0.0);
    assert_eq!(mesh.vertices[0].uv, [0.0, 0.0]);
    assert_eq!(mesh.vertices[0].position, [-1.1, 1.1, 0.0]);
}

#[test]
fn sphere_vertices_lie_on_radius() {
    let mesh = sphere_mesh(0.5, 16, 16);
    for v in &mesh.vertices {
        assert!((Vec3::from(v.position).length() - 0.5).abs() < 1e-5);
    }
    // fans at the poles: 16 + 16 triangles fewer than a full grid
    assert_eq!(mesh.triangle_count(), 16 * 16 * 2 - 32);
}

#[test]
fn four_sided_cone_is_a_pyramid() {
    let mesh = cone_mesh(3.5, 1.0, 4);
    assert_eq!(mesh.triangle_count(), 8);
    let top = mesh
        .vertices
        .iter()
        .map(|v| v.position[1])
        .fold(f32::MIN, f32::max);
    assert_eq!(top, 0.5);
    for tri in 0..mesh.triangle_count() {
        let n = face_normal(&mesh, tri);
        let stored = Vec3::from(mesh.vertices[mesh.indices[tri * 3] as usize].normal);
        assert!(n.normalize().dot(stored) > 0.999);
    }
}

#[test]
fn displacement_follows_height_map() {
    let mut mesh = plane_mesh(1.0, 1.0, 4, 4);
    let white = TextureImage::solid(2, 2, [255, 255, 255, 255]);
    displace_along_normals(&mut mesh, &white, 0.1);
    for v in &mesh.vertices {
        assert!((v.position[2] - 0.1).abs() < 1e-6);
    }
    let black = TextureImage::solid(2, 2, [0, 0, 0, 255]);
    let before = mesh.vertices.clone();
    displace_along_normals(&mut mesh, &black, 0.1);
    assert_eq!(mesh.vertices, before);
}

#[test]
fn red_sampling_clamps_coordinates() {
    let img = TextureImage {
        width: 2,
        height: 1,
        rgba: vec![0, 0, 0, 255, 255, 0, 0, 255],
    };
    assert_eq!(img.sample_red(-3.0, 0.5), 0.0);
    assert_eq!(img.sample_red(9.0, 0.5), 1.0);
    assert_eq!(TextureImage::solid(0, 0, [255; 4]).sample_red(0.5, 0.5), 0.0);
}

#[test]
fn layout_has_every_named_node() {
    let l = layout(1);
    let labels: Vec<_> = l.nodes.iter().map(|n| n.label).collect();
    assert_eq!(labels, ["walls", "roof", "bushes", "graves", "floor", "door"]);
    assert_eq!(l.node("bushes").map(|n| n.instances.len()), Some(4));
    assert!(l.node("chimney").is_none());
}

#[test]
fn door_is_the_only_blended_node_and_draws_last() {
    let l = layout(1);
    let door = l.nodes.last().unwrap();
    assert_eq!(door.label, "door");
    assert!(door.material.transparent);
    assert_eq!(door.material.displacement_scale, DOOR_DISPLACEMENT_SCALE);
    assert_eq!(door.material.maps.paths().count(), 7);
    assert_eq!(l.nodes.iter().filter(|n| n.material.transparent).count(), 1);
}

#[test]
fn graves_ring_the_house() {
    let l = layout(42);
    let graves = l.node("graves").unwrap();
    assert_eq!(graves.instances.len(), GRAVE_COUNT);
    for m in &graves.instances {
        let (_, rot, pos) = m.to_scale_rotation_translation();
        let r = (pos.x * pos.x + pos.z * pos.z).sqrt();
        assert!(r >= GRAVE_MIN_RADIUS - 1e-4 && r < GRAVE_MIN_RADIUS + GRAVE_RADIUS_SPAN + 1e-4);
        assert!((pos.y - GRAVE_HEIGHT).abs() < 1e-6);
        let (x, y, z) = rot.to_euler(glam::EulerRot::XYZ);
        assert!(x.abs() < 1e-4);
        assert!(y.abs() <= GRAVE_TILT * 0.5 + 1e-4);
        assert!(z.abs() <= GRAVE_TILT * 0.5 + 1e-4);
    }
}

#[test]
fn grave_layout_is_reproducible_per_seed() {
    let a = layout(9);
    let b = layout(9);
    let c = layout(10);
    let graves = |l: &SceneLayout| l.node("graves").unwrap().instances.clone();
    assert_eq!(graves(&a), graves(&b));
    assert_ne!(graves(&a), graves(&c));
}

#[test]
fn texture_paths_are_unique_and_complete() {
    let l = layout(1);
    let paths = l.texture_paths();
    assert_eq!(paths.len(), 15);
    for (i, p) in paths.iter().enumerate() {
        assert!(!paths[i + 1..].contains(p), "duplicate {p}");
        assert!(p.starts_with("/textures/"));
    }
    assert_eq!(paths[0], BRICKS_COLOR);
    assert!(paths.contains(&DOOR_HEIGHT));
}

#[test]
fn grass_repeats_and_fog_matches_clear_color() {
    let l = layout(1);
    assert_eq!(l.node("floor").unwrap().material.uv_repeat, GRASS_REPEAT);
    assert_eq!(l.fog.color, l.clear_color);
    assert_eq!((l.fog.near, l.fog.far), (FOG_NEAR, FOG_FAR));
}

#[test]
fn generated_meshes_are_well_formed() {
    let meshes = [
        box_mesh(0.6, 0.8, 0.2),
        plane_mesh(20.0, 20.0, 1, 1),
        sphere_mesh(1.0, 16, 16),
        cone_mesh(3.5, 1.0, 4),
    ];
    for mesh in &meshes {
        assert_eq!(mesh.indices.len() % 3, 0);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
        for v in &mesh.vertices {
            assert!((Vec3::from(v.normal).length() - 1.0).abs() < 1e-4);
        }
    }
}

#[test]
fn hex_colours_convert_to_linear() {
    use haunt_core::color::*;
    assert_eq!(hex_srgb(0xff8000), Vec3::new(1.0, 128.0 / 255.0, 0.0));
    assert_eq!(srgb_to_linear(0.0), 0.0);
    assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-6);
    let fog = hex_linear(FOG_COLOR);
    assert!(fog.x < hex_srgb(FOG_COLOR).x);
}

//! Declarative layout of the haunted house scene.
//!
//! Nothing here touches the GPU. The web renderer walks a [`SceneLayout`],
//! builds one vertex/index buffer per node and draws every node's instance
//! transforms with its material.

use crate::color::hex_linear;
use crate::constants::*;
use crate::geometry::{box_mesh, cone_mesh, plane_mesh, sphere_mesh, MeshData};
use crate::lights::LightRig;
use glam::{Mat4, Quat, Vec3};
use rand::Rng;
use std::f32::consts::{PI, TAU};

// Texture locations served next to the page
pub const DOOR_COLOR: &str = "/textures/door/color.jpg";
pub const DOOR_ALPHA: &str = "/textures/door/alpha.jpg";
pub const DOOR_AO: &str = "/textures/door/ambientOcclusion.jpg";
pub const DOOR_HEIGHT: &str = "/textures/door/height.jpg";
pub const DOOR_NORMAL: &str = "/textures/door/normal.jpg";
pub const DOOR_METALNESS: &str = "/textures/door/metalness.jpg";
pub const DOOR_ROUGHNESS: &str = "/textures/door/roughness.jpg";
pub const BRICKS_COLOR: &str = "/textures/bricks/color.jpg";
pub const BRICKS_AO: &str = "/textures/bricks/ambientOcclusion.jpg";
pub const BRICKS_NORMAL: &str = "/textures/bricks/normal.jpg";
pub const BRICKS_ROUGHNESS: &str = "/textures/bricks/roughness.jpg";
pub const GRASS_COLOR: &str = "/textures/grass/color.jpg";
pub const GRASS_AO: &str = "/textures/grass/ambientOcclusion.jpg";
pub const GRASS_NORMAL: &str = "/textures/grass/normal.jpg";
pub const GRASS_ROUGHNESS: &str = "/textures/grass/roughness.jpg";

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Box { width: f32, height: f32, depth: f32 },
    Plane { width: f32, height: f32, segments: u32 },
    Sphere { radius: f32, segments: u32 },
    Cone { radius: f32, height: f32, segments: u32 },
}

impl Shape {
    pub fn build(&self) -> MeshData {
        match *self {
            Shape::Box { width, height, depth } => box_mesh(width, height, depth),
            Shape::Plane { width, height, segments } => plane_mesh(width, height, segments, segments),
            Shape::Sphere { radius, segments } => sphere_mesh(radius, segments, segments),
            Shape::Cone { radius, height, segments } => cone_mesh(radius, height, segments),
        }
    }
}

/// Texture paths per map. `height` displaces vertices on the CPU; every
/// other map is sampled in the fragment shader.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MaterialMaps {
    pub color: Option<&'static str>,
    pub alpha: Option<&'static str>,
    pub ambient_occlusion: Option<&'static str>,
    pub height: Option<&'static str>,
    pub normal: Option<&'static str>,
    pub metalness: Option<&'static str>,
    pub roughness: Option<&'static str>,
}

impl MaterialMaps {
    pub fn paths(&self) -> impl Iterator<Item = &'static str> {
        [
            self.color,
            self.alpha,
            self.ambient_occlusion,
            self.height,
            self.normal,
            self.metalness,
            self.roughness,
        ]
        .into_iter()
        .flatten()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// Linear RGB.
    pub base_color: Vec3,
    pub maps: MaterialMaps,
    pub uv_repeat: f32,
    pub transparent: bool,
    pub displacement_scale: f32,
}

impl Material {
    pub fn solid(hex: u32) -> Self {
        Self {
            base_color: hex_linear(hex),
            maps: MaterialMaps::default(),
            uv_repeat: 1.0,
            transparent: false,
            displacement_scale: 0.0,
        }
    }

    pub fn textured(maps: MaterialMaps) -> Self {
        Self {
            base_color: Vec3::ONE,
            maps,
            uv_repeat: 1.0,
            transparent: false,
            displacement_scale: 0.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct MeshNode {
    pub label: &'static str,
    pub shape: Shape,
    pub material: Material,
    /// One world transform per drawn copy.
    pub instances: Vec<Mat4>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fog {
    pub color: Vec3,
    pub near: f32,
    pub far: f32,
}

#[derive(Clone, Debug)]
pub struct SceneLayout {
    pub nodes: Vec<MeshNode>,
    pub fog: Fog,
    pub clear_color: Vec3,
    pub lights: LightRig,
}

impl SceneLayout {
    pub fn node(&self, label: &str) -> Option<&MeshNode> {
        self.nodes.iter().find(|n| n.label == label)
    }

    /// Every texture the layout references, deduplicated, in first-use order.
    pub fn texture_paths(&self) -> Vec<&'static str> {
        let mut out: Vec<&'static str> = Vec::new();
        for path in self.nodes.iter().flat_map(|n| n.material.maps.paths()) {
            if !out.contains(&path) {
                out.push(path);
            }
        }
        out
    }
}

fn at(translation: Vec3) -> Mat4 {
    Mat4::from_translation(translation)
}

fn scaled_at(scale: f32, translation: Vec3) -> Mat4 {
    Mat4::from_scale_rotation_translation(Vec3::splat(scale), Quat::IDENTITY, translation)
}

/// Build the haunted house. `rng` only drives grave placement.
pub fn haunted_house<R: Rng>(rng: &mut R) -> SceneLayout {
    let mut nodes = Vec::new();

    nodes.push(MeshNode {
        label: "walls",
        shape: Shape::Box { width: 4.0, height: 2.5, depth: 4.0 },
        material: Material::textured(MaterialMaps {
            color: Some(BRICKS_COLOR),
            ambient_occlusion: Some(BRICKS_AO),
            normal: Some(BRICKS_NORMAL),
            roughness: Some(BRICKS_ROUGHNESS),
            ..Default::default()
        }),
        instances: vec![at(Vec3::new(0.0, 1.25, 0.0))],
    });

    nodes.push(MeshNode {
        label: "roof",
        shape: Shape::Cone { radius: 3.5, height: 1.0, segments: 4 },
        material: Material::solid(ROOF_COLOR),
        instances: vec![Mat4::from_rotation_translation(
            Quat::from_rotation_y(PI * 0.25),
            Vec3::new(0.0, 3.0, 0.0),
        )],
    });

    nodes.push(MeshNode {
        label: "bushes",
        shape: Shape::Sphere { radius: 1.0, segments: 16 },
        material: Material::solid(BUSH_COLOR),
        instances: vec![
            scaled_at(0.5, Vec3::new(0.8, 0.2, 2.2)),
            scaled_at(0.25, Vec3::new(1.4, 0.1, 2.1)),
            scaled_at(0.4, Vec3::new(-0.8, 0.1, 2.2)),
            scaled_at(0.15, Vec3::new(-1.0, 0.05, 2.6)),
        ],
    });

    nodes.push(MeshNode {
        label: "graves",
        shape: Shape::Box { width: 0.6, height: 0.8, depth: 0.2 },
        material: Material::solid(GRAVE_COLOR),
        instances: (0..GRAVE_COUNT).map(|_| grave_transform(rng)).collect(),
    });

    let mut grass = Material::textured(MaterialMaps {
        color: Some(GRASS_COLOR),
        ambient_occlusion: Some(GRASS_AO),
        normal: Some(GRASS_NORMAL),
        roughness: Some(GRASS_ROUGHNESS),
        ..Default::default()
    });
    grass.uv_repeat = GRASS_REPEAT;
    nodes.push(MeshNode {
        label: "floor",
        shape: Shape::Plane { width: 20.0, height: 20.0, segments: 1 },
        material: grass,
        instances: vec![Mat4::from_rotation_x(-PI * 0.5)],
    });

    // drawn last: blended, depth-tested against everything above
    let mut door = Material::textured(MaterialMaps {
        color: Some(DOOR_COLOR),
        alpha: Some(DOOR_ALPHA),
        ambient_occlusion: Some(DOOR_AO),
        height: Some(DOOR_HEIGHT),
        normal: Some(DOOR_NORMAL),
        metalness: Some(DOOR_METALNESS),
        roughness: Some(DOOR_ROUGHNESS),
    });
    door.transparent = true;
    door.displacement_scale = DOOR_DISPLACEMENT_SCALE;
    nodes.push(MeshNode {
        label: "door",
        shape: Shape::Plane { width: 2.2, height: 2.2, segments: DOOR_SEGMENTS },
        material: door,
        instances: vec![at(Vec3::new(0.0, 1.0, 2.01))],
    });

    SceneLayout {
        nodes,
        fog: Fog {
            color: hex_linear(FOG_COLOR),
            near: FOG_NEAR,
            far: FOG_FAR,
        },
        clear_color: hex_linear(FOG_COLOR),
        lights: LightRig::haunted(),
    }
}

fn grave_transform<R: Rng>(rng: &mut R) -> Mat4 {
    let angle = rng.gen::<f32>() * TAU;
    let radius = GRAVE_MIN_RADIUS + rng.gen::<f32>() * GRAVE_RADIUS_SPAN;
    let position = Vec3::new(angle.cos() * radius, GRAVE_HEIGHT, angle.sin() * radius);
    let tilt_z = (rng.gen::<f32>() - 0.5) * GRAVE_TILT;
    let tilt_y = (rng.gen::<f32>() - 0.5) * GRAVE_TILT;
    let rotation = Quat::from_euler(glam::EulerRot::XYZ, 0.0, tilt_y, tilt_z);
    Mat4::from_rotation_translation(rotation, position)
}

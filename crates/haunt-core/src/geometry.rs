//! Procedural mesh generation.
//!
//! Sizes are full extents centred on the origin, planes face +Z and cones
//! point up +Y. Texture coordinates put `v = 0` at the top edge, matching
//! wgpu's texture origin. Front faces wind counter-clockwise.

use crate::assets::TextureImage;
use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use std::f32::consts::{PI, TAU};

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    fn push_quad_face(&mut self, center: Vec3, u: Vec3, v: Vec3, width: f32, height: f32) {
        let normal = u.cross(v).normalize();
        let base = self.vertices.len() as u32;
        let hw = width * 0.5;
        let hh = height * 0.5;
        // TL, TR, BL, BR
        let corners = [
            (center - u * hw + v * hh, [0.0, 0.0]),
            (center + u * hw + v * hh, [1.0, 0.0]),
            (center - u * hw - v * hh, [0.0, 1.0]),
            (center + u * hw - v * hh, [1.0, 1.0]),
        ];
        for (p, uv) in corners {
            self.vertices.push(MeshVertex {
                position: p.to_array(),
                normal: normal.to_array(),
                uv,
            });
        }
        self.indices
            .extend_from_slice(&[base, base + 2, base + 3, base, base + 3, base + 1]);
    }
}

/// Axis-aligned box centred on the origin.
pub fn box_mesh(width: f32, height: f32, depth: f32) -> MeshData {
    let mut mesh = MeshData::default();
    let (hw, hh, hd) = (width * 0.5, height * 0.5, depth * 0.5);
    mesh.push_quad_face(Vec3::new(hw, 0.0, 0.0), Vec3::NEG_Z, Vec3::Y, depth, height);
    mesh.push_quad_face(Vec3::new(-hw, 0.0, 0.0), Vec3::Z, Vec3::Y, depth, height);
    mesh.push_quad_face(Vec3::new(0.0, hh, 0.0), Vec3::X, Vec3::NEG_Z, width, depth);
    mesh.push_quad_face(Vec3::new(0.0, -hh, 0.0), Vec3::X, Vec3::Z, width, depth);
    mesh.push_quad_face(Vec3::new(0.0, 0.0, hd), Vec3::X, Vec3::Y, width, height);
    mesh.push_quad_face(Vec3::new(0.0, 0.0, -hd), Vec3::NEG_X, Vec3::Y, width, height);
    mesh
}

/// Subdivided plane in the XY plane, facing +Z.
pub fn plane_mesh(width: f32, height: f32, segments_x: u32, segments_y: u32) -> MeshData {
    let sx = segments_x.max(1);
    let sy = segments_y.max(1);
    let stride = sx + 1;
    let mut mesh = MeshData {
        vertices: Vec::with_capacity(((sx + 1) * (sy + 1)) as usize),
        indices: Vec::with_capacity((sx * sy * 6) as usize),
    };
    for iy in 0..=sy {
        let fv = iy as f32 / sy as f32;
        let y = height * 0.5 - fv * height;
        for ix in 0..=sx {
            let fu = ix as f32 / sx as f32;
            let x = -width * 0.5 + fu * width;
            mesh.vertices.push(MeshVertex {
                position: [x, y, 0.0],
                normal: [0.0, 0.0, 1.0],
                uv: [fu, fv],
            });
        }
    }
    for iy in 0..sy {
        for ix in 0..sx {
            let a = ix + stride * iy;
            let b = ix + stride * (iy + 1);
            let c = b + 1;
            let d = a + 1;
            mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    mesh
}

/// UV sphere; poles are fans so no degenerate triangles are emitted.
pub fn sphere_mesh(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let ws = width_segments.max(3);
    let hs = height_segments.max(2);
    let stride = ws + 1;
    let mut mesh = MeshData::default();
    for iy in 0..=hs {
        let v = iy as f32 / hs as f32;
        let phi = v * PI;
        for ix in 0..=ws {
            let u = ix as f32 / ws as f32;
            let theta = u * TAU;
            let n = Vec3::new(-theta.cos() * phi.sin(), phi.cos(), theta.sin() * phi.sin());
            mesh.vertices.push(MeshVertex {
                position: (n * radius).to_array(),
                normal: n.to_array(),
                uv: [u, v],
            });
        }
    }
    for iy in 0..hs {
        for ix in 0..ws {
            let a = stride * iy + ix + 1;
            let b = stride * iy + ix;
            let c = stride * (iy + 1) + ix;
            let d = stride * (iy + 1) + ix + 1;
            if iy != 0 {
                mesh.indices.extend_from_slice(&[a, b, d]);
            }
            if iy != hs - 1 {
                mesh.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    mesh
}

/// Closed cone with its apex at `+height/2` and a capped base at `-height/2`.
///
/// Faces are flat shaded so a four-segment cone reads as a pyramid roof.
pub fn cone_mesh(radius: f32, height: f32, radial_segments: u32) -> MeshData {
    let n = radial_segments.max(3);
    let half = height * 0.5;
    let apex = Vec3::new(0.0, half, 0.0);
    let center = Vec3::new(0.0, -half, 0.0);
    let rim = |i: u32| {
        let theta = i as f32 / n as f32 * TAU;
        Vec3::new(radius * theta.sin(), -half, radius * theta.cos())
    };
    let mut mesh = MeshData::default();
    for i in 0..n {
        let b0 = rim(i);
        let b1 = rim(i + 1);
        let side_normal = (b0 - apex).cross(b1 - apex).normalize();
        let u0 = i as f32 / n as f32;
        let u1 = (i + 1) as f32 / n as f32;
        let base = mesh.vertices.len() as u32;
        for (p, uv) in [(apex, [(u0 + u1) * 0.5, 0.0]), (b0, [u0, 1.0]), (b1, [u1, 1.0])] {
            mesh.vertices.push(MeshVertex {
                position: p.to_array(),
                normal: side_normal.to_array(),
                uv,
            });
        }
        mesh.indices.extend_from_slice(&[base, base + 1, base + 2]);

        let base = mesh.vertices.len() as u32;
        for p in [center, b1, b0] {
            let planar = [p.x / (2.0 * radius) + 0.5, p.z / (2.0 * radius) + 0.5];
            mesh.vertices.push(MeshVertex {
                position: p.to_array(),
                normal: [0.0, -1.0, 0.0],
                uv: planar,
            });
        }
        mesh.indices.extend_from_slice(&[base, base + 1, base + 2]);
    }
    mesh
}

/// Push every vertex along its normal by `height(uv) * scale`.
///
/// The height map is sampled nearest-neighbour from its red channel.
pub fn displace_along_normals(mesh: &mut MeshData, height_map: &TextureImage, scale: f32) {
    if height_map.width == 0 || height_map.height == 0 {
        return;
    }
    for v in &mut mesh.vertices {
        let h = height_map.sample_red(v.uv[0], v.uv[1]);
        let p = Vec3::from(v.position) + Vec3::from(v.normal) * (h * scale);
        v.position = p.to_array();
    }
}

//! Decoding of fetched asset bytes into CPU-side images and meshes.
//!
//! Fetching is the web crate's job; everything here works on byte slices
//! so it can be exercised from host tests.

use crate::error::AssetError;
use crate::geometry::{MeshData, MeshVertex};
use glam::{Mat3, Mat4, Vec3};
use gltf::image::Format;

#[derive(Clone, Debug, PartialEq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGBA8, row-major from the top-left texel.
    pub rgba: Vec<u8>,
}

impl TextureImage {
    pub fn solid(width: u32, height: u32, texel: [u8; 4]) -> Self {
        let rgba = texel.repeat((width * height) as usize);
        Self { width, height, rgba }
    }

    /// Nearest texel's red channel in \[0, 1\]. `u`/`v` are clamped.
    pub fn sample_red(&self, u: f32, v: f32) -> f32 {
        if self.width == 0 || self.height == 0 {
            return 0.0;
        }
        let x = (u.clamp(0.0, 1.0) * (self.width - 1) as f32).round() as u32;
        let y = (v.clamp(0.0, 1.0) * (self.height - 1) as f32).round() as u32;
        let idx = ((y * self.width + x) * 4) as usize;
        self.rgba.get(idx).map_or(0.0, |&r| r as f32 / 255.0)
    }
}

pub fn decode_texture(path: &str, bytes: &[u8]) -> Result<TextureImage, AssetError> {
    let img = image::load_from_memory(bytes).map_err(|e| AssetError::Decode {
        path: path.to_string(),
        reason: e.to_string(),
    })?;
    let rgba = img.to_rgba8();
    Ok(TextureImage {
        width: rgba.width(),
        height: rgba.height(),
        rgba: rgba.into_raw(),
    })
}

#[derive(Clone, Debug)]
pub struct ModelPart {
    pub mesh: MeshData,
    pub base_color: [f32; 4],
    /// Index into [`ModelData::images`].
    pub texture: Option<usize>,
}

/// A glTF scene flattened into model-space triangle lists.
#[derive(Clone, Debug, Default)]
pub struct ModelData {
    pub parts: Vec<ModelPart>,
    pub images: Vec<TextureImage>,
}

impl ModelData {
    pub fn triangle_count(&self) -> usize {
        self.parts.iter().map(|p| p.mesh.triangle_count()).sum()
    }
}

pub fn decode_glb(path: &str, bytes: &[u8]) -> Result<ModelData, AssetError> {
    let model_err = |reason: String| AssetError::Model {
        path: path.to_string(),
        reason,
    };
    let (document, buffers, images) =
        gltf::import_slice(bytes).map_err(|e| model_err(e.to_string()))?;

    let mut model = ModelData {
        parts: Vec::new(),
        images: images
            .iter()
            .map(|img| TextureImage {
                width: img.width,
                height: img.height,
                rgba: convert_image_to_rgba(img),
            })
            .collect(),
    };

    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .ok_or_else(|| model_err("no scene".into()))?;
    for node in scene.nodes() {
        collect_node(&node, Mat4::IDENTITY, &buffers, &mut model);
    }

    if model.parts.is_empty() {
        return Err(model_err("no triangle meshes".into()));
    }
    log::info!(
        "[assets] {}: {} parts, {} images, {} triangles",
        path,
        model.parts.len(),
        model.images.len(),
        model.triangle_count()
    );
    Ok(model)
}

fn collect_node(
    node: &gltf::Node<'_>,
    parent: Mat4,
    buffers: &[gltf::buffer::Data],
    model: &mut ModelData,
) {
    let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());
    if let Some(mesh) = node.mesh() {
        let normal_matrix = Mat3::from_mat4(world).inverse().transpose();
        for primitive in mesh.primitives() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                continue;
            }
            let reader = primitive.reader(|b| buffers.get(b.index()).map(|d| &d.0[..]));
            let Some(positions) = reader.read_positions().map(|i| i.collect::<Vec<_>>()) else {
                continue;
            };
            if positions.is_empty() {
                continue;
            }
            let normals: Vec<[f32; 3]> = reader
                .read_normals()
                .map(|i| i.collect())
                .unwrap_or_else(|| vec![[0.0, 1.0, 0.0]; positions.len()]);
            let uvs: Vec<[f32; 2]> = reader
                .read_tex_coords(0)
                .map(|i| i.into_f32().collect())
                .unwrap_or_else(|| vec![[0.0, 0.0]; positions.len()]);
            let indices: Vec<u32> = reader
                .read_indices()
                .map(|i| i.into_u32().collect())
                .unwrap_or_else(|| (0..positions.len() as u32).collect());

            let vertices = positions
                .iter()
                .zip(&normals)
                .zip(&uvs)
                .map(|((p, n), uv)| MeshVertex {
                    position: world.transform_point3(Vec3::from(*p)).to_array(),
                    normal: (normal_matrix * Vec3::from(*n)).normalize_or_zero().to_array(),
                    uv: *uv,
                })
                .collect();

            let pbr = primitive.material().pbr_metallic_roughness();
            model.parts.push(ModelPart {
                mesh: MeshData { vertices, indices },
                base_color: pbr.base_color_factor(),
                texture: pbr.base_color_texture().map(|t| t.texture().source().index()),
            });
        }
    }
    for child in node.children() {
        collect_node(&child, world, buffers, model);
    }
}

fn convert_image_to_rgba(image: &gltf::image::Data) -> Vec<u8> {
    match image.format {
        Format::R8G8B8A8 => image.pixels.clone(),
        Format::R8G8B8 => image
            .pixels
            .chunks(3)
            .flat_map(|c| [c[0], c[1], c[2], 255])
            .collect(),
        Format::R8 => image.pixels.iter().flat_map(|&g| [g, g, g, 255]).collect(),
        Format::R8G8 => image
            .pixels
            .chunks(2)
            .flat_map(|c| [c[0], c[0], c[0], c[1]])
            .collect(),
        _ => {
            log::warn!("[assets] unsupported image format {:?}, using white", image.format);
            [255u8; 4].repeat((image.width * image.height) as usize)
        }
    }
}

use glam::{Mat4, Vec3};
use haunt_core::assets::{ModelData, TextureImage};
use haunt_core::constants::MAX_POINT_LIGHTS;
use haunt_core::geometry::{displace_along_normals, MeshData};
use haunt_core::scene::{Fog, MaterialMaps, SceneLayout};
use haunt_core::{RenderError, RenderFrame, SceneRenderer};
use web_sys as web;

mod helpers;
mod material;
mod mesh;
mod targets;
use material::{GpuMaterial, MapSlot, MaterialShared};
use mesh::GpuMesh;
use targets::RenderTargets;

#[repr(C)]
#[derive(Copy, Clone, Default, bytemuck::Pod, bytemuck::Zeroable)]
struct PointLightRaw {
    position_range: [f32; 4],
    color_intensity: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct FrameUniforms {
    view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    fog_color: [f32; 4],
    fog_params: [f32; 4],
    ambient: [f32; 4],
    moon_dir: [f32; 4],
    moon_color: [f32; 4],
    points: [PointLightRaw; MAX_POINT_LIGHTS],
}

fn rgb_w(v: Vec3, w: f32) -> [f32; 4] {
    [v.x, v.y, v.z, w]
}

struct SceneNode {
    label: &'static str,
    mesh: GpuMesh,
    material: GpuMaterial,
    maps: MaterialMaps,
    /// CPU copy kept for meshes a height map displaces.
    displace: Option<(MeshData, &'static str, f32)>,
}

struct GhostPart {
    mesh: GpuMesh,
    material: GpuMaterial,
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    targets: RenderTargets,

    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    materials: MaterialShared,
    opaque_pipeline: wgpu::RenderPipeline,
    blended_pipeline: wgpu::RenderPipeline,

    nodes: Vec<SceneNode>,
    ghost: Vec<GhostPart>,

    fog: Fog,
    clear_color: wgpu::Color,
    encode_srgb: bool,
    width: u32,
    height: u32,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement, layout: &SceneLayout) -> Result<Self, RenderError> {
        let unavailable = |what: &str, e: &dyn std::fmt::Debug| {
            RenderError::TargetUnavailable(format!("{what}: {e:?}"))
        };
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| unavailable("create_surface", &e))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| RenderError::TargetUnavailable("no WebGPU adapter".into()))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| unavailable("request_device", &e))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| RenderError::TargetUnavailable("surface reports no formats".into()))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!("[render] surface {}x{} {:?}", width, height, format);

        let targets = RenderTargets::new(&device, width, height);

        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("frame_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let frame_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("frame_uniforms"),
            size: std::mem::size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("frame_bg"),
            layout: &frame_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
        });

        let materials = MaterialShared::new(&device, &queue);
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(haunt_core::SCENE_WGSL.into()),
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&frame_layout, &materials.layout],
            push_constant_ranges: &[],
        });
        let opaque_pipeline = helpers::make_scene_pipeline(&device, &pipeline_layout, &shader, format, false);
        let blended_pipeline = helpers::make_scene_pipeline(&device, &pipeline_layout, &shader, format, true);

        let nodes = layout
            .nodes
            .iter()
            .map(|node| {
                let data = node.shape.build();
                let displace = node
                    .material
                    .maps
                    .height
                    .map(|path| (data.clone(), path, node.material.displacement_scale));
                SceneNode {
                    label: node.label,
                    mesh: GpuMesh::upload(&device, node.label, &data, &node.instances),
                    material: GpuMaterial::from_scene(&device, &materials, node.label, &node.material),
                    maps: node.material.maps.clone(),
                    displace,
                }
            })
            .collect();

        let c = layout.clear_color;
        Ok(Self {
            surface,
            device,
            queue,
            config,
            targets,
            frame_buffer,
            frame_bind_group,
            materials,
            opaque_pipeline,
            blended_pipeline,
            nodes,
            ghost: Vec::new(),
            fog: layout.fog,
            clear_color: wgpu::Color {
                r: c.x as f64,
                g: c.y as f64,
                b: c.z as f64,
                a: 1.0,
            },
            encode_srgb: !format.is_srgb(),
            width,
            height,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.targets.recreate(&self.device, width, height);
        }
    }

    /// Bind a decoded texture to every material slot that references `path`.
    /// Height maps re-displace their mesh instead.
    pub fn install_texture(&mut self, path: &str, image: &TextureImage) {
        let mut srgb_view = None;
        let mut linear_view = None;
        for node in &mut self.nodes {
            for slot in MapSlot::ALL {
                if slot.path(&node.maps) == Some(path) {
                    let cache = if slot.srgb() { &mut srgb_view } else { &mut linear_view };
                    let view = cache
                        .get_or_insert_with(|| {
                            helpers::upload_rgba_texture(&self.device, &self.queue, path, image, slot.srgb())
                        })
                        .clone();
                    node.material
                        .set_map(&self.device, &self.queue, &self.materials, slot, view);
                }
            }
            if let Some((base, height_path, scale)) = &node.displace {
                if *height_path == path {
                    let mut displaced = base.clone();
                    displace_along_normals(&mut displaced, image, *scale);
                    node.mesh.replace_vertices(&self.device, node.label, &displaced);
                }
            }
        }
    }

    pub fn install_ghost(&mut self, model: &ModelData) {
        let views: Vec<wgpu::TextureView> = model
            .images
            .iter()
            .enumerate()
            .map(|(i, img)| {
                helpers::upload_rgba_texture(&self.device, &self.queue, &format!("ghost_tex_{i}"), img, true)
            })
            .collect();
        self.ghost = model
            .parts
            .iter()
            .enumerate()
            .map(|(i, part)| {
                let label = format!("ghost_{i}");
                let mut material =
                    GpuMaterial::new(&self.device, &self.materials, &label, part.base_color, 1.0, false);
                if let Some(view) = part.texture.and_then(|t| views.get(t)) {
                    material.set_map(&self.device, &self.queue, &self.materials, MapSlot::Color, view.clone());
                }
                GhostPart {
                    mesh: GpuMesh::upload(&self.device, &label, &part.mesh, &[Mat4::IDENTITY]),
                    material,
                }
            })
            .collect();
        log::info!("[render] ghost model uploaded ({} parts)", self.ghost.len());
    }

    fn write_frame_uniforms(&self, frame: &RenderFrame<'_>) {
        let lights = frame.lights;
        let points = lights.point_lights(frame.ghost);
        let mut raw = [PointLightRaw::default(); MAX_POINT_LIGHTS];
        for (dst, p) in raw.iter_mut().zip(points.iter()) {
            *dst = PointLightRaw {
                position_range: rgb_w(p.position, p.range),
                color_intensity: rgb_w(p.color, p.intensity),
            };
        }
        let uniforms = FrameUniforms {
            view_proj: frame.camera.view_proj().to_cols_array_2d(),
            camera_pos: rgb_w(frame.camera.eye, 1.0),
            fog_color: rgb_w(self.fog.color, 1.0),
            fog_params: [
                self.fog.near,
                self.fog.far,
                points.len().min(MAX_POINT_LIGHTS) as f32,
                if self.encode_srgb { 1.0 } else { 0.0 },
            ],
            ambient: rgb_w(lights.ambient.color * lights.ambient.intensity, 1.0),
            moon_dir: rgb_w(lights.moon.direction(), 0.0),
            moon_color: rgb_w(lights.moon.color * lights.moon.intensity, 1.0),
            points: raw,
        };
        self.queue
            .write_buffer(&self.frame_buffer, 0, bytemuck::bytes_of(&uniforms));
    }
}

impl SceneRenderer for GpuState<'_> {
    type Error = RenderError;

    fn render(&mut self, frame: &RenderFrame<'_>) -> Result<(), RenderError> {
        self.write_frame_uniforms(frame);
        let ghost_visible = match frame.ghost {
            Some(pose) if pose.visible && !self.ghost.is_empty() => {
                let m = pose.model_matrix();
                for part in &self.ghost {
                    part.mesh.write_transform(&self.queue, m);
                }
                true
            }
            _ => false,
        };

        let output = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(e @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                log::warn!("[render] surface {:?}, reconfiguring", e);
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("[render] surface timeout, skipping frame");
                return Ok(());
            }
            Err(e) => return Err(RenderError::TargetUnavailable(format!("{e:?}"))),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.frame_bind_group, &[]);

            rpass.set_pipeline(&self.opaque_pipeline);
            for node in self.nodes.iter().filter(|n| !n.material.transparent) {
                rpass.set_bind_group(1, node.material.bind_group(), &[]);
                node.mesh.draw(&mut rpass);
            }
            if ghost_visible {
                for part in &self.ghost {
                    rpass.set_bind_group(1, part.material.bind_group(), &[]);
                    part.mesh.draw(&mut rpass);
                }
            }

            rpass.set_pipeline(&self.blended_pipeline);
            for node in self.nodes.iter().filter(|n| n.material.transparent) {
                rpass.set_bind_group(1, node.material.bind_group(), &[]);
                node.mesh.draw(&mut rpass);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        output.present();
        Ok(())
    }
}

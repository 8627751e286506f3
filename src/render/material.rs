use super::helpers;
use haunt_core::assets::TextureImage;
use haunt_core::scene::{Material, MaterialMaps};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct MaterialUniforms {
    base_color: [f32; 4],
    // uv repeat, normal map on, alpha map on, metalness
    params: [f32; 4],
    // roughness
    params2: [f32; 4],
}

/// Texture bindings of the material group, in binding order after the uniform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MapSlot {
    Color,
    Alpha,
    AmbientOcclusion,
    Normal,
    Roughness,
    Metalness,
}

impl MapSlot {
    pub(crate) const ALL: [MapSlot; 6] = [
        MapSlot::Color,
        MapSlot::Alpha,
        MapSlot::AmbientOcclusion,
        MapSlot::Normal,
        MapSlot::Roughness,
        MapSlot::Metalness,
    ];

    fn index(self) -> usize {
        self as usize
    }

    pub(crate) fn srgb(self) -> bool {
        self == MapSlot::Color
    }

    pub(crate) fn path(self, maps: &MaterialMaps) -> Option<&'static str> {
        match self {
            MapSlot::Color => maps.color,
            MapSlot::Alpha => maps.alpha,
            MapSlot::AmbientOcclusion => maps.ambient_occlusion,
            MapSlot::Normal => maps.normal,
            MapSlot::Roughness => maps.roughness,
            MapSlot::Metalness => maps.metalness,
        }
    }
}

/// Layout, sampler and 1x1 stand-ins shared by every material.
pub(crate) struct MaterialShared {
    pub(crate) layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    white_srgb: wgpu::TextureView,
    white: wgpu::TextureView,
    flat_normal: wgpu::TextureView,
}

impl MaterialShared {
    pub(crate) fn new(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let texture_entry = |binding: u32| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                view_dimension: wgpu::TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        };
        let mut entries = vec![wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }];
        entries.extend((1..=MapSlot::ALL.len() as u32).map(texture_entry));
        entries.push(wgpu::BindGroupLayoutEntry {
            binding: MapSlot::ALL.len() as u32 + 1,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
            count: None,
        });
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("material_bgl"),
            entries: &entries,
        });
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("repeat_sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });
        let white_img = TextureImage::solid(1, 1, [255, 255, 255, 255]);
        let normal_img = TextureImage::solid(1, 1, [128, 128, 255, 255]);
        Self {
            layout,
            sampler,
            white_srgb: helpers::upload_rgba_texture(device, queue, "white_srgb", &white_img, true),
            white: helpers::upload_rgba_texture(device, queue, "white", &white_img, false),
            flat_normal: helpers::upload_rgba_texture(device, queue, "flat_normal", &normal_img, false),
        }
    }

    fn fallback(&self, slot: MapSlot) -> &wgpu::TextureView {
        match slot {
            MapSlot::Color => &self.white_srgb,
            MapSlot::Normal => &self.flat_normal,
            _ => &self.white,
        }
    }
}

pub(crate) struct GpuMaterial {
    label: String,
    uniforms: MaterialUniforms,
    buffer: wgpu::Buffer,
    maps: [Option<wgpu::TextureView>; 6],
    bind_group: wgpu::BindGroup,
    pub(crate) transparent: bool,
}

impl GpuMaterial {
    pub(crate) fn new(
        device: &wgpu::Device,
        shared: &MaterialShared,
        label: &str,
        base_color: [f32; 4],
        uv_repeat: f32,
        transparent: bool,
    ) -> Self {
        let uniforms = MaterialUniforms {
            base_color,
            params: [uv_repeat, 0.0, 0.0, 0.0],
            params2: [1.0, 0.0, 0.0, 0.0],
        };
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::bytes_of(&uniforms),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let maps: [Option<wgpu::TextureView>; 6] = Default::default();
        let bind_group = Self::make_bind_group(device, shared, label, &buffer, &maps);
        Self {
            label: label.to_string(),
            uniforms,
            buffer,
            maps,
            bind_group,
            transparent,
        }
    }

    pub(crate) fn from_scene(device: &wgpu::Device, shared: &MaterialShared, label: &str, material: &Material) -> Self {
        let c = material.base_color;
        Self::new(
            device,
            shared,
            label,
            [c.x, c.y, c.z, 1.0],
            material.uv_repeat,
            material.transparent,
        )
    }

    pub(crate) fn set_map(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        shared: &MaterialShared,
        slot: MapSlot,
        view: wgpu::TextureView,
    ) {
        self.maps[slot.index()] = Some(view);
        match slot {
            MapSlot::Normal => self.uniforms.params[1] = 1.0,
            MapSlot::Alpha => self.uniforms.params[2] = 1.0,
            _ => {}
        }
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(&self.uniforms));
        self.bind_group = Self::make_bind_group(device, shared, &self.label, &self.buffer, &self.maps);
    }

    pub(crate) fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    fn make_bind_group(
        device: &wgpu::Device,
        shared: &MaterialShared,
        label: &str,
        buffer: &wgpu::Buffer,
        maps: &[Option<wgpu::TextureView>; 6],
    ) -> wgpu::BindGroup {
        let mut entries = vec![wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        }];
        for slot in MapSlot::ALL {
            let view = maps[slot.index()]
                .as_ref()
                .unwrap_or_else(|| shared.fallback(slot));
            entries.push(wgpu::BindGroupEntry {
                binding: slot.index() as u32 + 1,
                resource: wgpu::BindingResource::TextureView(view),
            });
        }
        entries.push(wgpu::BindGroupEntry {
            binding: MapSlot::ALL.len() as u32 + 1,
            resource: wgpu::BindingResource::Sampler(&shared.sampler),
        });
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &shared.layout,
            entries: &entries,
        })
    }
}

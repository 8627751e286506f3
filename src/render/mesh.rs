use glam::Mat4;
use haunt_core::geometry::MeshData;
use wgpu::util::DeviceExt;

/// Vertex/index buffers plus a per-instance transform buffer.
pub(crate) struct GpuMesh {
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    index_count: u32,
    instances: wgpu::Buffer,
    instance_count: u32,
}

fn instance_data(transforms: &[Mat4]) -> Vec<[f32; 16]> {
    transforms.iter().map(|m| m.to_cols_array()).collect()
}

impl GpuMesh {
    pub(crate) fn upload(device: &wgpu::Device, label: &str, mesh: &MeshData, transforms: &[Mat4]) -> Self {
        let vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let instances = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&instance_data(transforms)),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });
        Self {
            vertices,
            indices,
            index_count: mesh.indices.len() as u32,
            instances,
            instance_count: transforms.len() as u32,
        }
    }

    /// Swap in new vertex data; the instance buffer is kept.
    pub(crate) fn replace_vertices(&mut self, device: &wgpu::Device, label: &str, mesh: &MeshData) {
        self.vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
    }

    /// Overwrite the first instance transform.
    pub(crate) fn write_transform(&self, queue: &wgpu::Queue, transform: Mat4) {
        queue.write_buffer(&self.instances, 0, bytemuck::cast_slice(&transform.to_cols_array()));
    }

    pub(crate) fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        if self.index_count == 0 || self.instance_count == 0 {
            return;
        }
        pass.set_vertex_buffer(0, self.vertices.slice(..));
        pass.set_vertex_buffer(1, self.instances.slice(..));
        pass.set_index_buffer(self.indices.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.index_count, 0, 0..self.instance_count);
    }
}

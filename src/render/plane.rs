use gallery_core::constants::PLANE_SEGMENTS;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PlaneVertex {
    position: [f32; 3],
    uv: [f32; 2],
}

impl PlaneVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2];

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PlaneVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Unit plane centred on the origin, shared by every tile.
pub(crate) struct PlaneMesh {
    pub(crate) vertices: wgpu::Buffer,
    pub(crate) indices: wgpu::Buffer,
    pub(crate) index_count: u32,
}

fn grid(segments: u32) -> (Vec<PlaneVertex>, Vec<u16>) {
    let n = segments.max(1);
    let mut vertices = Vec::with_capacity(((n + 1) * (n + 1)) as usize);
    for iy in 0..=n {
        let v = iy as f32 / n as f32;
        for ix in 0..=n {
            let u = ix as f32 / n as f32;
            vertices.push(PlaneVertex {
                position: [u - 0.5, 0.5 - v, 0.0],
                uv: [u, v],
            });
        }
    }
    let row = n + 1;
    let mut indices = Vec::with_capacity((n * n * 6) as usize);
    for iy in 0..n {
        for ix in 0..n {
            let a = (iy * row + ix) as u16;
            let b = a + 1;
            let c = a + row as u16;
            let d = c + 1;
            indices.extend_from_slice(&[a, c, b, b, c, d]);
        }
    }
    (vertices, indices)
}

pub(crate) fn create_plane(device: &wgpu::Device) -> PlaneMesh {
    let (vertices, indices) = grid(PLANE_SEGMENTS);
    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("plane_vertices"),
        contents: bytemuck::cast_slice(&vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("plane_indices"),
        contents: bytemuck::cast_slice(&indices),
        usage: wgpu::BufferUsages::INDEX,
    });
    PlaneMesh {
        vertices: vertex_buffer,
        indices: index_buffer,
        index_count: indices.len() as u32,
    }
}

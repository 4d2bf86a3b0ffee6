use backdrop_core::{uv_sphere, NebulaInstance, Scene};
use wgpu::util::DeviceExt;

struct SphereMesh {
    vb: wgpu::Buffer,
    ib: wgpu::Buffer,
    index_count: u32,
    segments: u32,
}

impl SphereMesh {
    fn new(device: &wgpu::Device, segments: u32) -> Self {
        let mesh = uv_sphere(1.0, segments, segments);
        let vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("nebula_sphere_vb"),
            contents: bytemuck::cast_slice(&mesh.positions),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let ib = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("nebula_sphere_ib"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vb,
            ib,
            index_count: mesh.index_count(),
            segments,
        }
    }

    fn destroy(&self) {
        self.vb.destroy();
        self.ib.destroy();
    }
}

/// Shared unit sphere drawn once per nebula with a per-instance transform and tint.
pub(crate) struct NebulaResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    // Built on first upload from the scene's segment count.
    sphere: Option<SphereMesh>,
    instances: Option<wgpu::Buffer>,
    capacity: usize,
    count: u32,
}

pub(crate) fn create_nebula_resources(
    device: &wgpu::Device,
    shader: &wgpu::ShaderModule,
    layout: &wgpu::PipelineLayout,
    color_format: wgpu::TextureFormat,
    sample_count: u32,
) -> NebulaResources {
    let buffers = [
        // slot 0: sphere vertex
        wgpu::VertexBufferLayout {
            array_stride: (std::mem::size_of::<f32>() * 3) as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 0,
                shader_location: 0,
            }],
        },
        // slot 1: model matrix columns + rgba
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<NebulaInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 0,
                    shader_location: 1,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 16,
                    shader_location: 2,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 32,
                    shader_location: 3,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 48,
                    shader_location: 4,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 64,
                    shader_location: 5,
                },
            ],
        },
    ];
    let pipeline = super::helpers::make_additive_pipeline(
        device,
        "nebula_pipeline",
        layout,
        shader,
        ("vs_nebula", "fs_nebula"),
        &buffers,
        color_format,
        sample_count,
    );

    NebulaResources {
        pipeline,
        sphere: None,
        instances: None,
        capacity: 0,
        count: 0,
    }
}

impl NebulaResources {
    /// Rotations change every frame, so instances are rewritten unconditionally.
    pub(crate) fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, scene: &Scene) {
        let segments = scene.params().nebula_segments;
        if self.sphere.as_ref().map(|m| m.segments) != Some(segments) {
            if let Some(old) = self.sphere.take() {
                old.destroy();
            }
            self.sphere = Some(SphereMesh::new(device, segments));
        }

        let packed = scene.nebula_instances();
        if self.instances.is_none() || packed.len() > self.capacity {
            if let Some(old) = self.instances.take() {
                old.destroy();
            }
            self.instances = Some(device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("nebula_instances"),
                size: (packed.len().max(1) * std::mem::size_of::<NebulaInstance>()) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.capacity = packed.len();
        }
        self.count = packed.len() as u32;
        if let (Some(buf), false) = (&self.instances, packed.is_empty()) {
            queue.write_buffer(buf, 0, bytemuck::cast_slice(&packed));
        }
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        let (Some(sphere), Some(instances)) = (&self.sphere, &self.instances) else {
            return;
        };
        if self.count == 0 {
            return;
        }
        rpass.set_pipeline(&self.pipeline);
        rpass.set_vertex_buffer(0, sphere.vb.slice(..));
        rpass.set_vertex_buffer(1, instances.slice(..));
        rpass.set_index_buffer(sphere.ib.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..sphere.index_count, 0, 0..self.count);
    }

    pub(crate) fn destroy(&mut self) {
        if let Some(sphere) = self.sphere.take() {
            sphere.destroy();
        }
        if let Some(buf) = self.instances.take() {
            buf.destroy();
        }
    }
}

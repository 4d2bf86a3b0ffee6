use crate::constants::STAR_QUAD_CORNERS;
use wgpu::util::DeviceExt;

/// Star point cloud drawn as one instanced quad per star.
pub(crate) struct StarResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) quad_vb: wgpu::Buffer,
    // Created on first draw, when the star count is known.
    instances: Option<wgpu::Buffer>,
    capacity: usize,
    count: u32,
}

pub(crate) fn create_star_resources(
    device: &wgpu::Device,
    shader: &wgpu::ShaderModule,
    layout: &wgpu::PipelineLayout,
    color_format: wgpu::TextureFormat,
    sample_count: u32,
) -> StarResources {
    let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("star_quad_vb"),
        contents: bytemuck::cast_slice(&STAR_QUAD_CORNERS),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let buffers = [
        // slot 0: quad corner
        wgpu::VertexBufferLayout {
            array_stride: (std::mem::size_of::<f32>() * 2) as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x2,
                offset: 0,
                shader_location: 0,
            }],
        },
        // slot 1: star center, straight from the flat position buffer
        wgpu::VertexBufferLayout {
            array_stride: (std::mem::size_of::<f32>() * 3) as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 0,
                shader_location: 1,
            }],
        },
    ];
    let pipeline = super::helpers::make_additive_pipeline(
        device,
        "star_pipeline",
        layout,
        shader,
        ("vs_star", "fs_star"),
        &buffers,
        color_format,
        sample_count,
    );
    StarResources {
        pipeline,
        quad_vb,
        instances: None,
        capacity: 0,
        count: 0,
    }
}

impl StarResources {
    /// Upload positions when they changed or the buffer had to grow.
    pub(crate) fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        flat_positions: &[f32],
        dirty: bool,
    ) {
        let stars = flat_positions.len() / 3;
        let grew = self.instances.is_none() || stars > self.capacity;
        if grew {
            if let Some(old) = self.instances.take() {
                old.destroy();
            }
            self.instances = Some(device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("star_instances"),
                size: (flat_positions.len().max(3) * std::mem::size_of::<f32>()) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.capacity = stars;
        }
        self.count = stars as u32;
        if let Some(buf) = &self.instances {
            if (dirty || grew) && !flat_positions.is_empty() {
                queue.write_buffer(buf, 0, bytemuck::cast_slice(flat_positions));
            }
        }
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        let Some(instances) = &self.instances else {
            return;
        };
        if self.count == 0 {
            return;
        }
        rpass.set_pipeline(&self.pipeline);
        rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
        rpass.set_vertex_buffer(1, instances.slice(..));
        rpass.draw(0..STAR_QUAD_CORNERS.len() as u32, 0..self.count);
    }

    pub(crate) fn destroy(&mut self) {
        self.quad_vb.destroy();
        if let Some(buf) = self.instances.take() {
            buf.destroy();
        }
    }
}

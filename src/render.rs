use crate::constants::MSAA_SAMPLE_COUNT;
use backdrop_core::{BackdropError, Camera, Scene};
use glam::{Mat4, Vec2};
use web_sys as web;

mod helpers;
mod nebula;
mod stars;
mod targets;

use nebula::{create_nebula_resources, NebulaResources};
use stars::{create_star_resources, StarResources};
use targets::MsaaTarget;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct FrameUniforms {
    view_proj: Mat4,
    scene_model: Mat4,
    resolution: Vec2,
    star_size: f32,
    star_opacity: f32,
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    msaa: MsaaTarget,

    frame_uniforms: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    stars: StarResources,
    nebulae: NebulaResources,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl GpuState {
    pub async fn new(canvas: web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas))
            .map_err(|e| BackdropError::SurfaceUnavailable(e.to_string()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(BackdropError::Adapter)?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: Some("backdrop_device"),
                },
                None,
            )
            .await
            .map_err(|e| BackdropError::Device(e.to_string()))?;

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
            .ok_or_else(|| BackdropError::SurfaceUnavailable("no surface formats".into()))?;
        // Transparent clear only shows the page through when the canvas composites premultiplied.
        let alpha_mode = caps
            .alpha_modes
            .iter()
            .copied()
            .find(|m| *m == wgpu::CompositeAlphaMode::PreMultiplied)
            .or_else(|| caps.alpha_modes.first().copied())
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let msaa = MsaaTarget::new(&device, width, height, format, MSAA_SAMPLE_COUNT);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("backdrop_shader"),
            source: wgpu::ShaderSource::Wgsl(backdrop_core::BACKDROP_WGSL.into()),
        });
        let frame_uniforms = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("frame_uniforms"),
            size: std::mem::size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
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
        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("frame_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_uniforms.as_entire_binding(),
            }],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("backdrop_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });

        let stars = create_star_resources(&device, &shader, &layout, format, MSAA_SAMPLE_COUNT);
        let nebulae = create_nebula_resources(&device, &shader, &layout, format, MSAA_SAMPLE_COUNT);

        log::info!(
            "[gpu] ready {}x{} format={:?} alpha={:?}",
            width,
            height,
            format,
            alpha_mode
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            msaa,
            frame_uniforms,
            frame_bind_group,
            stars,
            nebulae,
            width,
            height,
            clear_color: wgpu::Color::TRANSPARENT,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.reconfigure();
        }
    }

    fn reconfigure(&mut self) {
        self.config.width = self.width;
        self.config.height = self.height;
        self.surface.configure(&self.device, &self.config);
        self.msaa
            .recreate(&self.device, self.width, self.height, self.config.format);
    }

    pub fn render(&mut self, scene: &mut Scene, camera: &Camera) -> Result<(), wgpu::SurfaceError> {
        let params = scene.params();
        let uniforms = FrameUniforms {
            view_proj: camera.view_proj(),
            scene_model: scene.model_matrix(),
            resolution: Vec2::new(self.width as f32, self.height as f32),
            star_size: params.star_size,
            star_opacity: params.star_opacity,
        };
        self.queue
            .write_buffer(&self.frame_uniforms, 0, bytemuck::bytes_of(&uniforms));

        let dirty = scene.stars_mut().take_dirty();
        self.stars
            .upload(&self.device, &self.queue, scene.stars().as_flat(), dirty);
        self.nebulae.upload(&self.device, &self.queue, scene);

        let frame = match self.surface.get_current_texture() {
            Ok(f) => f,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                // Skip this frame; the next one draws into the fresh swapchain.
                self.reconfigure();
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("backdrop_encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("backdrop_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.msaa.view,
                    resolve_target: Some(&view),
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Discard,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.frame_bind_group, &[]);
            self.nebulae.draw(&mut rpass);
            self.stars.draw(&mut rpass);
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    /// Free every GPU object this renderer created. The state is unusable afterwards.
    pub fn destroy(mut self) {
        self.stars.destroy();
        self.nebulae.destroy();
        self.frame_uniforms.destroy();
        self.msaa.destroy();
        self.device.destroy();
        log::debug!("[gpu] destroyed");
    }
}

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;

use super::geometry::line_list;
use super::shaders::HERO_SHADER;
use super::HeroScene;
use crate::Result;

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ObjectUniforms {
    proj: [[f32; 4]; 4],
    view: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    color: [f32; 4],
    point_size: f32,
    _padding: [f32; 3],
}

impl ObjectUniforms {
    fn new(scene: &HeroScene, model: Mat4, color: [f32; 4], point_size: f32) -> Self {
        Self {
            proj: scene.camera.projection().to_cols_array_2d(),
            view: scene.camera.view().to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            color,
            point_size,
            _padding: [0.0; 3],
        }
    }
}

struct ObjectBinding {
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// GPU side of the hero scene: one surface, a line pipeline for the
/// wireframe and an instanced quad pipeline for the particles.
pub struct HeroRenderer {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    wire_pipeline: wgpu::RenderPipeline,
    point_pipeline: wgpu::RenderPipeline,
    wire: ObjectBinding,
    points: ObjectBinding,
    wire_vertex_buffer: wgpu::Buffer,
    wire_index_buffer: wgpu::Buffer,
    wire_index_count: u32,
    point_buffer: wgpu::Buffer,
    point_count: u32,
    sample_count: u32,
    msaa_view: Option<wgpu::TextureView>,
}

impl HeroRenderer {
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'static>,
        width: u32,
        height: u32,
        msaa_samples: u32,
        scene: &HeroScene,
    ) -> Result<Self> {
        cfg_if::cfg_if! {
            if #[cfg(target_arch = "wasm32")] {
                let limits = wgpu::Limits::downlevel_webgl2_defaults();
            } else {
                let limits = wgpu::Limits::default();
            }
        }

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                force_fallback_adapter: false,
                compatible_surface: Some(&surface),
            })
            .await?;

        let adapter_info = adapter.get_info();
        log::info!(
            "Selected GPU: {} ({:?}, {:?})",
            adapter_info.name,
            adapter_info.device_type,
            adapter_info.backend
        );

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Hero Device"),
                required_features: wgpu::Features::empty(),
                required_limits: limits,
                memory_hints: wgpu::MemoryHints::default(),
                trace: Default::default(),
            })
            .await?;

        let caps = surface.get_capabilities(&adapter);
        let surface_format = *caps
            .formats
            .first()
            .ok_or_else(|| crate::PageError::Gpu("surface reports no formats".to_string()))?;
        // The canvas sits over the page, so prefer compositing with alpha.
        let alpha_mode = if caps.alpha_modes.contains(&wgpu::CompositeAlphaMode::PreMultiplied) {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            caps.alpha_modes.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![surface_format.add_srgb_suffix()],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Hero Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let wire = Self::create_object_binding(&device, &bind_group_layout, "Wireframe");
        let points = Self::create_object_binding(&device, &bind_group_layout, "Particles");

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Hero Shader"),
            source: wgpu::ShaderSource::Wgsl(HERO_SHADER.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Hero Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let target_format = config.format.add_srgb_suffix();
        let format_flags = adapter.get_texture_format_features(target_format).flags;
        let sample_count =
            pick_sample_count(msaa_samples, |count| format_flags.sample_count_supported(count));
        log::info!("Hero canvas antialiasing: {}x", sample_count);
        let msaa_view = Self::create_msaa_view(&device, &config, sample_count);
        let wire_pipeline = Self::create_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            target_format,
            "Wireframe Pipeline",
            "vs_wire",
            wgpu::VertexStepMode::Vertex,
            wgpu::PrimitiveTopology::LineList,
            sample_count,
        );
        let point_pipeline = Self::create_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            target_format,
            "Particle Pipeline",
            "vs_point",
            wgpu::VertexStepMode::Instance,
            wgpu::PrimitiveTopology::TriangleList,
            sample_count,
        );

        let wire_vertices: Vec<[f32; 3]> = scene.wireframe.vertices.iter().map(|v| v.to_array()).collect();
        let wire_indices = line_list(&scene.wireframe_edges);
        let particle_positions = scene.particles.as_arrays();

        let wire_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Wireframe Vertex Buffer"),
            contents: bytemuck::cast_slice(&wire_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let wire_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Wireframe Index Buffer"),
            contents: bytemuck::cast_slice(&wire_indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let point_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Particle Instance Buffer"),
            contents: bytemuck::cast_slice(&particle_positions),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            wire_pipeline,
            point_pipeline,
            wire,
            points,
            wire_vertex_buffer,
            wire_index_buffer,
            wire_index_count: wire_indices.len() as u32,
            point_buffer,
            point_count: particle_positions.len() as u32,
            sample_count,
            msaa_view,
        })
    }

    fn create_object_binding(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, name: &str) -> ObjectBinding {
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("{} Uniform Buffer", name)),
            size: std::mem::size_of::<ObjectUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{} Bind Group", name)),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        ObjectBinding {
            uniform_buffer,
            bind_group,
        }
    }

    fn create_msaa_view(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        sample_count: u32,
    ) -> Option<wgpu::TextureView> {
        if sample_count <= 1 {
            return None;
        }

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Hero MSAA Texture"),
            size: wgpu::Extent3d {
                width: config.width,
                height: config.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count,
            dimension: wgpu::TextureDimension::D2,
            format: config.format.add_srgb_suffix(),
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        Some(texture.create_view(&wgpu::TextureViewDescriptor::default()))
    }

    #[allow(clippy::too_many_arguments)]
    fn create_pipeline(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        shader: &wgpu::ShaderModule,
        format: wgpu::TextureFormat,
        label: &str,
        vertex_entry: &str,
        step_mode: wgpu::VertexStepMode,
        topology: wgpu::PrimitiveTopology,
        sample_count: u32,
    ) -> wgpu::RenderPipeline {
        let position_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
            step_mode,
            attributes: &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            }],
        };

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some(vertex_entry),
                buffers: &[position_layout],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: sample_count,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.config.width = width.max(1);
        self.config.height = height.max(1);
        self.surface.configure(&self.device, &self.config);
        self.msaa_view = Self::create_msaa_view(&self.device, &self.config, self.sample_count);
    }

    pub fn render(&mut self, scene: &HeroScene) -> std::result::Result<(), wgpu::SurfaceError> {
        let wire_uniforms = ObjectUniforms::new(scene, scene.wireframe_rotation.matrix(), scene.wireframe_color, 0.0);
        let point_uniforms = ObjectUniforms::new(
            scene,
            scene.particle_rotation.matrix(),
            scene.particle_color,
            scene.particle_size,
        );
        self.queue
            .write_buffer(&self.wire.uniform_buffer, 0, bytemuck::cast_slice(&[wire_uniforms]));
        self.queue
            .write_buffer(&self.points.uniform_buffer, 0, bytemuck::cast_slice(&[point_uniforms]));

        let output = self.surface.get_current_texture()?;
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor {
            format: Some(self.config.format.add_srgb_suffix()),
            ..Default::default()
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Hero Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Hero Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: self.msaa_view.as_ref().unwrap_or(&view),
                    resolve_target: self.msaa_view.as_ref().map(|_| &view),
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(&self.wire_pipeline);
            render_pass.set_bind_group(0, &self.wire.bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.wire_vertex_buffer.slice(..));
            render_pass.set_index_buffer(self.wire_index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..self.wire_index_count, 0, 0..1);

            render_pass.set_pipeline(&self.point_pipeline);
            render_pass.set_bind_group(0, &self.points.bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.point_buffer.slice(..));
            render_pass.draw(0..6, 0..self.point_count);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Reacts to a failed frame. Returns `false` when rendering should stop.
    pub fn recover(&mut self, err: wgpu::SurfaceError) -> bool {
        match err {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
                log::warn!("Surface {:?}, reconfiguring...", err);
                self.surface.configure(&self.device, &self.config);
                true
            }
            wgpu::SurfaceError::OutOfMemory => {
                log::error!("Out of memory, stopping hero animation");
                false
            }
            e => {
                log::error!("Render error: {:?}", e);
                true
            }
        }
    }
}

/// Highest of `requested`, 4, 2 that the target format supports, else 1.
fn pick_sample_count(requested: u32, supported: impl Fn(u32) -> bool) -> u32 {
    [requested, 4, 2]
        .into_iter()
        .filter(|&count| count > 1 && count <= requested)
        .find(|&count| supported(count))
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_count_prefers_request() {
        assert_eq!(pick_sample_count(4, |_| true), 4);
    }

    #[test]
    fn sample_count_falls_back_when_unsupported() {
        assert_eq!(pick_sample_count(4, |count| count == 2), 2);
        assert_eq!(pick_sample_count(4, |_| false), 1);
    }

    #[test]
    fn single_sample_request_disables_msaa() {
        assert_eq!(pick_sample_count(1, |_| true), 1);
        assert_eq!(pick_sample_count(0, |_| true), 1);
    }

    #[test]
    fn uniforms_match_wgsl_layout() {
        // 3 x mat4x4 + vec4 + f32, rounded up to 16-byte alignment.
        assert_eq!(std::mem::size_of::<ObjectUniforms>(), 224);
    }
}

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2};
use log::{info, warn};
use wgpu::util::{BufferInitDescriptor, DeviceExt};
use wgpu::{
    vertex_attr_array, BindGroup, BindGroupDescriptor, BindGroupEntry, BindGroupLayoutDescriptor,
    BindGroupLayoutEntry, BindingType, Buffer, BufferBindingType, BufferUsages, ColorTargetState,
    ColorWrites, CommandEncoderDescriptor, CompositeAlphaMode, DeviceDescriptor, FragmentState,
    Instance, LoadOp, MultisampleState, Operations, PipelineLayoutDescriptor, PresentMode,
    PrimitiveState, RenderPassColorAttachment, RenderPassDescriptor, RenderPipeline,
    RenderPipelineDescriptor, RequestAdapterOptions, ShaderModuleDescriptor, ShaderSource,
    SurfaceConfiguration, TextureFormat, TextureUsages, TextureView, TextureViewDescriptor,
    VertexState,
};
use winit::{dpi::PhysicalSize, window::Window};

use crate::render::{
    draw_list::{DrawList, ShapeVertex},
    srgb_to_linear,
    text::TextRenderer,
};

/// Wrapper around wgpu surface/device setup and simple frame management.
pub struct Renderer {
    backend: WgpuBackend,
}

impl Renderer {
    pub fn new(window: Arc<Window>, vsync: bool) -> Result<Self> {
        let backend = WgpuBackend::new(window, vsync)?;
        Ok(Self { backend })
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.backend.resize(new_size);
    }

    /// Acquire the next surface texture and start recording a frame.
    pub fn begin_frame(&mut self) -> Result<Frame> {
        self.backend.begin_frame()
    }

    /// Draw everything recorded in `frame` and present it.
    pub fn end_frame(&mut self, frame: Frame) -> Result<()> {
        self.backend.end_frame(frame)
    }
}

/// A frame being recorded. Dropping it without `end_frame` still presents the surface.
pub struct Frame {
    surface_texture: Option<wgpu::SurfaceTexture>,
    view: TextureView,
    draw_list: DrawList,
}

impl Frame {
    /// Set the background color.
    pub fn clear(&mut self, color: [f32; 4]) {
        self.draw_list.clear(color);
    }

    /// Commands recorded so far.
    pub fn draw_list(&mut self) -> &mut DrawList {
        &mut self.draw_list
    }
}

impl Drop for Frame {
    fn drop(&mut self) {
        if let Some(surface_texture) = self.surface_texture.take() {
            surface_texture.present();
        }
    }
}

/// Reconfigure-and-retry budget for one frame before giving up on the surface.
const MAX_ACQUIRE_ATTEMPTS: usize = 3;

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct ShapeUniforms {
    projection: [[f32; 4]; 4],
}

struct ShapePipeline {
    pipeline: RenderPipeline,
    uniform_buffer: Buffer,
    bind_group: BindGroup,
}

struct WgpuBackend {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface_config: SurfaceConfiguration,
    present_mode: PresentMode,
    shape_pipeline: ShapePipeline,
    text: TextRenderer,
}

impl WgpuBackend {
    fn new(window: Arc<Window>, vsync: bool) -> Result<Self> {
        let instance = Instance::default();
        let surface = instance
            .create_surface(Arc::clone(&window))
            .context("failed to create surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("no compatible graphics adapter")?;
        info!("using graphics adapter {}", adapter.get_info().name);

        let (device, queue) = pollster::block_on(adapter.request_device(&DeviceDescriptor {
            label: Some("woodchain-device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            experimental_features: Default::default(),
            memory_hints: Default::default(),
            trace: wgpu::Trace::Off,
        }))
        .context("failed to create graphics device")?;

        let size = window.inner_size();
        let capabilities = surface.get_capabilities(&adapter);
        let format = capabilities
            .formats
            .iter()
            .copied()
            .find(|format| format.is_srgb())
            .or_else(|| capabilities.formats.first().copied())
            .ok_or_else(|| anyhow!("surface reports no supported formats"))?;

        let present_mode = choose_present_mode(&capabilities.present_modes, vsync);
        let alpha_mode = choose_alpha_mode(&capabilities.alpha_modes);
        info!("surface format {format:?}, present mode {present_mode:?}");

        let surface_config = SurfaceConfiguration {
            usage: TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        let shape_pipeline = create_shape_pipeline(&device, format);
        let text = TextRenderer::new(&device, &queue, format);

        Ok(Self {
            window,
            surface,
            device,
            queue,
            surface_config,
            present_mode,
            shape_pipeline,
            text,
        })
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }

        self.surface_config.width = new_size.width;
        self.surface_config.height = new_size.height;
        self.surface_config.present_mode = self.present_mode;
        self.surface.configure(&self.device, &self.surface_config);
    }

    fn begin_frame(&mut self) -> Result<Frame> {
        let surface = &self.surface;
        let (device, config) = (&self.device, &self.surface_config);
        let surface_texture = acquire_with_retry(
            MAX_ACQUIRE_ATTEMPTS,
            || surface.get_current_texture(),
            || surface.configure(device, config),
        )?;
        let view = surface_texture
            .texture
            .create_view(&TextureViewDescriptor::default());
        Ok(Frame {
            surface_texture: Some(surface_texture),
            view,
            draw_list: DrawList::new(),
        })
    }

    fn end_frame(&mut self, mut frame: Frame) -> Result<()> {
        let (width, height) = (self.surface_config.width, self.surface_config.height);
        let scale = self.window.scale_factor() as f32;
        let logical = Vec2::new(width as f32 / scale, height as f32 / scale);

        // Game code draws in logical pixels with the origin at the top-left.
        let projection = Mat4::orthographic_rh(0.0, logical.x, logical.y, 0.0, -1.0, 1.0);
        self.queue.write_buffer(
            &self.shape_pipeline.uniform_buffer,
            0,
            bytemuck::bytes_of(&ShapeUniforms {
                projection: projection.to_cols_array_2d(),
            }),
        );

        // Blending happens in linear space on sRGB surfaces.
        let srgb = self.surface_config.format.is_srgb();
        let to_target = |color: [f32; 4]| if srgb { srgb_to_linear(color) } else { color };

        let vertices: Vec<ShapeVertex> = frame
            .draw_list
            .vertices()
            .iter()
            .map(|vertex| ShapeVertex {
                position: vertex.position,
                color: to_target(vertex.color),
            })
            .collect();
        let vertex_buffer = (!vertices.is_empty()).then(|| {
            self.device.create_buffer_init(&BufferInitDescriptor {
                label: Some("shape-vertices"),
                contents: bytemuck::cast_slice(&vertices),
                usage: BufferUsages::VERTEX,
            })
        });

        self.text.prepare(
            &self.device,
            &self.queue,
            frame.draw_list.texts(),
            (width, height),
            scale,
        )?;

        let mut encoder = self
            .device
            .create_command_encoder(&CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });
        {
            let clear = to_target(frame.draw_list.clear_color());
            let mut pass = encoder.begin_render_pass(&RenderPassDescriptor {
                label: Some("frame-pass"),
                color_attachments: &[Some(RenderPassColorAttachment {
                    view: &frame.view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: Operations {
                        load: LoadOp::Clear(wgpu::Color {
                            r: f64::from(clear[0]),
                            g: f64::from(clear[1]),
                            b: f64::from(clear[2]),
                            a: f64::from(clear[3]),
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                multiview_mask: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            if let Some(buffer) = &vertex_buffer {
                pass.set_pipeline(&self.shape_pipeline.pipeline);
                pass.set_bind_group(0, &self.shape_pipeline.bind_group, &[]);
                pass.set_vertex_buffer(0, buffer.slice(..));
                pass.draw(0..vertices.len() as u32, 0..1);
            }
            self.text.render(&mut pass)?;
        }
        self.queue.submit(Some(encoder.finish()));

        let surface_texture = frame
            .surface_texture
            .take()
            .ok_or_else(|| anyhow!("Frame already ended"))?;
        self.window.pre_present_notify();
        surface_texture.present();
        self.text.trim();
        Ok(())
    }
}

/// Call `acquire` up to `attempts` times. Lost or outdated surfaces are
/// reconfigured with `reconfigure` and timeouts retried; other errors end at once.
fn acquire_with_retry<T>(
    attempts: usize,
    mut acquire: impl FnMut() -> Result<T, wgpu::SurfaceError>,
    mut reconfigure: impl FnMut(),
) -> Result<T> {
    for _ in 0..attempts {
        match acquire() {
            Ok(texture) => return Ok(texture),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("surface lost or outdated, reconfiguring");
                reconfigure();
            }
            Err(wgpu::SurfaceError::Timeout) => warn!("timed out acquiring surface texture"),
            Err(err) => return Err(anyhow!("failed to acquire surface texture: {err}")),
        }
    }
    Err(anyhow!("surface did not recover after {attempts} attempts"))
}

fn choose_present_mode(modes: &[PresentMode], vsync: bool) -> PresentMode {
    if vsync {
        modes
            .iter()
            .copied()
            .find(|mode| matches!(mode, PresentMode::Fifo | PresentMode::FifoRelaxed))
            .unwrap_or(PresentMode::Fifo)
    } else {
        modes
            .iter()
            .copied()
            .find(|mode| matches!(mode, PresentMode::Immediate | PresentMode::Mailbox))
            .unwrap_or(PresentMode::Fifo)
    }
}

fn choose_alpha_mode(modes: &[CompositeAlphaMode]) -> CompositeAlphaMode {
    modes
        .iter()
        .copied()
        .find(|mode| matches!(mode, CompositeAlphaMode::Auto))
        .unwrap_or_else(|| modes.first().copied().unwrap_or(CompositeAlphaMode::Opaque))
}

fn create_shape_pipeline(device: &wgpu::Device, surface_format: TextureFormat) -> ShapePipeline {
    let shader = device.create_shader_module(ShaderModuleDescriptor {
        label: Some("shape-shader"),
        source: ShaderSource::Wgsl(include_str!("shape.wgsl").into()),
    });

    let bind_group_layout = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
        label: Some("shape-bind-group-layout"),
        entries: &[BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX,
            ty: BindingType::Buffer {
                ty: BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: std::num::NonZeroU64::new(
                    std::mem::size_of::<ShapeUniforms>() as u64,
                ),
            },
            count: None,
        }],
    });

    let uniform_buffer = device.create_buffer_init(&BufferInitDescriptor {
        label: Some("shape-uniform-buffer"),
        contents: bytemuck::bytes_of(&ShapeUniforms {
            projection: Mat4::IDENTITY.to_cols_array_2d(),
        }),
        usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
    });

    let bind_group = device.create_bind_group(&BindGroupDescriptor {
        label: Some("shape-bind-group"),
        layout: &bind_group_layout,
        entries: &[BindGroupEntry {
            binding: 0,
            resource: uniform_buffer.as_entire_binding(),
        }],
    });

    let pipeline_layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
        label: Some("shape-pipeline-layout"),
        bind_group_layouts: &[&bind_group_layout],
        immediate_size: 0,
    });

    let pipeline = device.create_render_pipeline(&RenderPipelineDescriptor {
        label: Some("shape-pipeline"),
        layout: Some(&pipeline_layout),
        vertex: VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<ShapeVertex>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &vertex_attr_array![0 => Float32x2, 1 => Float32x4],
            }],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(ColorTargetState {
                format: surface_format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            unclipped_depth: false,
            polygon_mode: wgpu::PolygonMode::Fill,
            conservative: false,
        },
        depth_stencil: None,
        multisample: MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    });

    ShapePipeline {
        pipeline,
        uniform_buffer,
        bind_group,
    }
}

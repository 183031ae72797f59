//! Shared GPU types and utilities used by all shape renderers.

use std::marker::PhantomData;
use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::coords::Viewport;
use crate::render::RenderCtx;

// ── blend ─────────────────────────────────────────────────────────────────

pub(super) fn premul_alpha_blend() -> wgpu::BlendState {
    wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
    }
}

// ── viewport uniform ──────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct ViewportUniform {
    pub viewport: [f32; 2],
    pub _pad: [f32; 2], // 16-byte alignment
}

impl ViewportUniform {
    pub(super) fn new(viewport: Viewport) -> Self {
        Self {
            viewport: [viewport.width.max(1.0), viewport.height.max(1.0)],
            _pad: [0.0; 2],
        }
    }
}

/// Minimum binding size for the viewport uniform. Non-zero by construction.
fn viewport_ubo_min_binding_size() -> Option<std::num::NonZeroU64> {
    std::num::NonZeroU64::new(std::mem::size_of::<ViewportUniform>() as u64)
}

/// Layout entry for the viewport uniform, visible to the vertex stage.
pub(super) fn viewport_layout_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: viewport_ubo_min_binding_size(),
        },
        count: None,
    }
}

pub(super) fn create_viewport_ubo(device: &wgpu::Device, label: &str) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: std::mem::size_of::<ViewportUniform>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

pub(super) fn write_viewport_ubo(queue: &wgpu::Queue, ubo: &wgpu::Buffer, viewport: Viewport) {
    queue.write_buffer(ubo, 0, bytemuck::bytes_of(&ViewportUniform::new(viewport)));
}

// ── quad mesh ─────────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct QuadVertex {
    pub pos: [f32; 2], // 0..1
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { pos: [0.0, 0.0] },
    QuadVertex { pos: [1.0, 0.0] },
    QuadVertex { pos: [1.0, 1.0] },
    QuadVertex { pos: [0.0, 1.0] },
];

const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Unit quad shared by every instance of a renderer (vertex slot 0).
pub(super) struct QuadMesh {
    vbo: wgpu::Buffer,
    ibo: wgpu::Buffer,
}

impl QuadMesh {
    pub(super) fn new(device: &wgpu::Device, label: &str) -> Self {
        let vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} quad vbo")),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let ibo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} quad ibo")),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self { vbo, ibo }
    }

    pub(super) fn bind(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_vertex_buffer(0, self.vbo.slice(..));
        rpass.set_index_buffer(self.ibo.slice(..), wgpu::IndexFormat::Uint16);
    }

    pub(super) const INDEX_COUNT: u32 = QUAD_INDICES.len() as u32;
}

// ── instance buffer ───────────────────────────────────────────────────────

/// Growable GPU vertex buffer holding per-instance data (vertex slot 1).
///
/// Grows to the next power of two (min 64 instances) and never shrinks.
pub(super) struct InstanceBuffer<T> {
    label: String,
    buffer: Option<wgpu::Buffer>,
    capacity: usize,
    _marker: PhantomData<T>,
}

impl<T: Pod> InstanceBuffer<T> {
    pub(super) fn new(label: &str) -> Self {
        Self {
            label: format!("{label} instance vbo"),
            buffer: None,
            capacity: 0,
            _marker: PhantomData,
        }
    }

    pub(super) fn upload(&mut self, ctx: &RenderCtx<'_>, data: &[T]) {
        if data.is_empty() {
            return;
        }

        if self.buffer.is_none() || data.len() > self.capacity {
            let capacity = data.len().next_power_of_two().max(64);
            self.buffer = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(&self.label),
                size: (capacity * std::mem::size_of::<T>()) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.capacity = capacity;
        }

        if let Some(buffer) = self.buffer.as_ref() {
            ctx.queue.write_buffer(buffer, 0, bytemuck::cast_slice(data));
        }
    }

    pub(super) fn buffer(&self) -> Option<&wgpu::Buffer> {
        self.buffer.as_ref()
    }
}

// ── pipelines ─────────────────────────────────────────────────────────────

/// Everything that differs between the instanced-quad pipelines.
pub(super) struct PipelineDesc<'a> {
    pub label: &'a str,
    pub shader: &'a str,
    pub bind_group_layout: &'a wgpu::BindGroupLayout,
    pub instance_layout: wgpu::VertexBufferLayout<'static>,
}

/// Builds a premultiplied-alpha triangle-list pipeline drawing instanced
/// unit quads (slot 0) with per-instance data (slot 1).
pub(super) fn create_instanced_pipeline(
    ctx: &RenderCtx<'_>,
    desc: PipelineDesc<'_>,
) -> wgpu::RenderPipeline {
    let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(&format!("{} shader", desc.label)),
        source: wgpu::ShaderSource::Wgsl(desc.shader.into()),
    });

    let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(&format!("{} pipeline layout", desc.label)),
        bind_group_layouts: &[desc.bind_group_layout],
        immediate_size: 0,
    });

    ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(&format!("{} pipeline", desc.label)),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[QuadVertex::layout(), desc.instance_layout],
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: ctx.surface_format,
                blend: Some(premul_alpha_blend()),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

// ── instanced pass ────────────────────────────────────────────────────────

struct PassGpu {
    format: wgpu::TextureFormat,
    pipeline: wgpu::RenderPipeline,
    viewport_ubo: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    quad: QuadMesh,
}

/// Instanced-quad renderer whose only binding is the viewport uniform.
///
/// Circle and line renderers are this plus a command → instance conversion.
pub(super) struct InstancedPass<T> {
    label: &'static str,
    shader: &'static str,
    instance_layout: fn() -> wgpu::VertexBufferLayout<'static>,

    gpu: Option<PassGpu>,
    instances: Vec<T>,
    buffer: InstanceBuffer<T>,
}

impl<T: Pod> InstancedPass<T> {
    pub(super) fn new(
        label: &'static str,
        shader: &'static str,
        instance_layout: fn() -> wgpu::VertexBufferLayout<'static>,
    ) -> Self {
        Self {
            label,
            shader,
            instance_layout,
            gpu: None,
            instances: Vec::new(),
            buffer: InstanceBuffer::new(label),
        }
    }

    pub(super) fn clear(&mut self) {
        self.instances.clear();
    }

    /// Number of instances recorded this frame.
    pub(super) fn len(&self) -> u32 {
        self.instances.len() as u32
    }

    pub(super) fn push(&mut self, instance: T) {
        self.instances.push(instance);
    }

    pub(super) fn upload(&mut self, ctx: &RenderCtx<'_>) {
        if self.instances.is_empty() {
            return;
        }

        if self.gpu.as_ref().is_none_or(|g| g.format != ctx.surface_format) {
            self.gpu = Some(self.build_gpu(ctx));
        }

        if let Some(gpu) = self.gpu.as_ref() {
            write_viewport_ubo(ctx.queue, &gpu.viewport_ubo, ctx.viewport);
        }
        self.buffer.upload(ctx, &self.instances);
    }

    pub(super) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, range: Range<u32>) {
        let Some(gpu) = self.gpu.as_ref() else { return };
        let Some(instances) = self.buffer.buffer() else { return };

        rpass.set_pipeline(&gpu.pipeline);
        rpass.set_bind_group(0, &gpu.bind_group, &[]);
        gpu.quad.bind(rpass);
        rpass.set_vertex_buffer(1, instances.slice(..));
        rpass.draw_indexed(0..QuadMesh::INDEX_COUNT, 0, range);
    }

    fn build_gpu(&self, ctx: &RenderCtx<'_>) -> PassGpu {
        let layout = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(&format!("{} bgl", self.label)),
            entries: &[viewport_layout_entry(0)],
        });

        let pipeline = create_instanced_pipeline(ctx, PipelineDesc {
            label: self.label,
            shader: self.shader,
            bind_group_layout: &layout,
            instance_layout: (self.instance_layout)(),
        });

        let viewport_ubo = create_viewport_ubo(ctx.device, &format!("{} viewport ubo", self.label));
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{} bind group", self.label)),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_ubo.as_entire_binding(),
            }],
        });

        log::debug!("{}: pipeline built for {:?}", self.label, ctx.surface_format);

        PassGpu {
            format: ctx.surface_format,
            pipeline,
            viewport_ubo,
            bind_group,
            quad: QuadMesh::new(ctx.device, self.label),
        }
    }
}

use std::collections::HashMap;
use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use fontdue::layout::{CoordinateSystem, GlyphRasterConfig, Layout, LayoutSettings, TextStyle};

use crate::coords::Vec2;
use crate::render::RenderCtx;
use crate::scene::{TextAlign, TextCmd};
use crate::text::{raster_px, FontSystem};

use super::common::{
    create_instanced_pipeline, create_viewport_ubo, viewport_layout_entry, write_viewport_ubo,
    InstanceBuffer, PipelineDesc, QuadMesh,
};

// ── atlas constants ────────────────────────────────────────────────────────

const ATLAS_SIZE: u32 = 2048;
const GLYPH_PADDING: u32 = 1; // pixels between glyphs in the atlas

// ── shelf packer ──────────────────────────────────────────────────────────

/// Row-based ("shelf") allocator for the square glyph atlas.
#[derive(Debug, Clone, PartialEq)]
struct ShelfPacker {
    size: u32,
    cursor_x: u32,
    cursor_y: u32,
    row_height: u32,
}

impl ShelfPacker {
    fn new(size: u32) -> Self {
        Self {
            size,
            cursor_x: GLYPH_PADDING,
            cursor_y: GLYPH_PADDING,
            row_height: 0,
        }
    }

    fn reset(&mut self) {
        *self = Self::new(self.size);
    }

    /// Reserves a `w × h` slot; `None` when the atlas has no room left.
    fn place(&mut self, w: u32, h: u32) -> Option<(u32, u32)> {
        if w + 2 * GLYPH_PADDING > self.size {
            return None;
        }

        if self.cursor_x + w + GLYPH_PADDING > self.size {
            self.cursor_y += self.row_height + GLYPH_PADDING;
            self.cursor_x = GLYPH_PADDING;
            self.row_height = 0;
        }

        if self.cursor_y + h + GLYPH_PADDING > self.size {
            return None;
        }

        let slot = (self.cursor_x, self.cursor_y);
        self.cursor_x += w + GLYPH_PADDING;
        self.row_height = self.row_height.max(h);
        Some(slot)
    }
}

// ── cached glyph ──────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, PartialEq)]
struct CachedGlyph {
    uv_min: [f32; 2],
    uv_max: [f32; 2],
}

impl CachedGlyph {
    fn at(x: u32, y: u32, w: u32, h: u32) -> Self {
        let atlas_f = ATLAS_SIZE as f32;
        Self {
            uv_min: [x as f32 / atlas_f, y as f32 / atlas_f],
            uv_max: [(x + w) as f32 / atlas_f, (y + h) as f32 / atlas_f],
        }
    }
}

/// A laid-out glyph, in physical pixels.
#[derive(Debug, Copy, Clone)]
struct PlacedGlyph {
    key: GlyphRasterConfig,
    x: f32,
    y: f32,
    w: usize,
    h: usize,
}

/// Top-left of the line box in physical pixels, snapped to whole pixels.
///
/// `measured` is the logical line box from [`FontSystem::measure_line`].
fn line_origin(cmd: &TextCmd, measured: Vec2, scale: f32) -> Vec2 {
    let top_left = match cmd.align {
        TextAlign::TopLeft => cmd.position,
        TextAlign::Center => cmd.position - measured * 0.5,
    };
    Vec2::new((top_left.x * scale).round(), (top_left.y * scale).round())
}

// ── renderer ──────────────────────────────────────────────────────────────

struct TextGpu {
    format: wgpu::TextureFormat,
    pipeline: wgpu::RenderPipeline,
    viewport_ubo: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    quad: QuadMesh,
}

/// Renderer for `DrawCmd::Text`.
///
/// Maintains a 2048 × 2048 R8Unorm glyph atlas. Glyphs are rasterized through
/// fontdue at physical size (`size × scale_factor`, see [`raster_px`]) and
/// cached by `GlyphRasterConfig`, which encodes font identity, glyph index and
/// pixel size.
///
/// Frame protocol: [`prepare`](Self::prepare) every text command first so all
/// glyphs are resident, then [`push`](Self::push) them. When the atlas fills
/// up it is cleared and the frame's glyphs are placed again, once.
pub struct TextRenderer {
    gpu: Option<TextGpu>,

    atlas_texture: Option<wgpu::Texture>,
    atlas_view: Option<wgpu::TextureView>,
    packer: ShelfPacker,
    atlas_generation: u64,

    glyph_cache: HashMap<GlyphRasterConfig, CachedGlyph>,

    instances: Vec<GlyphInstance>,
    buffer: InstanceBuffer<GlyphInstance>,

    // reusable fontdue layout
    layout: Layout<()>,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            gpu: None,
            atlas_texture: None,
            atlas_view: None,
            packer: ShelfPacker::new(ATLAS_SIZE),
            atlas_generation: 0,
            glyph_cache: HashMap::new(),
            instances: Vec::new(),
            buffer: InstanceBuffer::new("horae text"),
            layout: Layout::new(CoordinateSystem::PositiveYDown),
        }
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn len(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Number of times the atlas has been (re)started.
    pub fn atlas_generation(&self) -> u64 {
        self.atlas_generation
    }

    /// Makes every glyph of `texts` resident in the atlas.
    pub fn prepare<'c>(
        &mut self,
        ctx: &RenderCtx<'_>,
        fonts: &FontSystem,
        texts: impl Iterator<Item = &'c TextCmd> + Clone,
    ) {
        self.ensure_atlas(ctx);
        self.ensure_gpu(ctx);

        if self.rasterize_missing(ctx, fonts, texts.clone()) {
            return;
        }

        log::debug!("TextRenderer: glyph atlas full; starting a new atlas");
        self.reset_atlas();
        if !self.rasterize_missing(ctx, fonts, texts) {
            log::warn!(
                "TextRenderer: glyph atlas is full ({ATLAS_SIZE}×{ATLAS_SIZE}); \
                 some glyphs will not be rendered"
            );
        }
    }

    /// Records the glyph quads of `cmd`; returns the number of instances added.
    ///
    /// Glyphs that were not made resident by [`prepare`](Self::prepare) are
    /// skipped.
    pub fn push(&mut self, ctx: &RenderCtx<'_>, fonts: &FontSystem, cmd: &TextCmd) -> u32 {
        let scale = ctx.scale_factor.max(0.01);
        let Some(glyphs) = self.lay_out(fonts, cmd, scale) else { return 0 };

        let color = cmd.color.to_array();
        let before = self.instances.len();

        for g in glyphs {
            let Some(cached) = self.glyph_cache.get(&g.key) else { continue };
            self.instances.push(GlyphInstance {
                dst_min: [g.x / scale, g.y / scale],
                dst_max: [(g.x + g.w as f32) / scale, (g.y + g.h as f32) / scale],
                uv_min: cached.uv_min,
                uv_max: cached.uv_max,
                color,
            });
        }

        (self.instances.len() - before) as u32
    }

    pub fn upload(&mut self, ctx: &RenderCtx<'_>) {
        if self.instances.is_empty() {
            return;
        }
        self.ensure_gpu(ctx);

        if let Some(gpu) = self.gpu.as_ref() {
            write_viewport_ubo(ctx.queue, &gpu.viewport_ubo, ctx.viewport);
        }
        self.buffer.upload(ctx, &self.instances);
    }

    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, range: Range<u32>) {
        let Some(gpu) = self.gpu.as_ref() else { return };
        let Some(instances) = self.buffer.buffer() else { return };

        rpass.set_pipeline(&gpu.pipeline);
        rpass.set_bind_group(0, &gpu.bind_group, &[]);
        gpu.quad.bind(rpass);
        rpass.set_vertex_buffer(1, instances.slice(..));
        rpass.draw_indexed(0..QuadMesh::INDEX_COUNT, 0, range);
    }

    // ── layout ─────────────────────────────────────────────────────────────

    /// Lays `cmd` out at physical scale. `None` for unknown fonts.
    fn lay_out(&mut self, fonts: &FontSystem, cmd: &TextCmd, scale: f32) -> Option<Vec<PlacedGlyph>> {
        let Some(font) = fonts.get(cmd.font) else {
            log::warn!("TextRenderer: unknown FontId {:?}, skipping", cmd.font);
            return None;
        };

        let measured = match cmd.align {
            TextAlign::TopLeft => Vec2::zero(),
            TextAlign::Center => fonts.measure_line(&cmd.text, cmd.font, cmd.size, scale),
        };
        let origin = line_origin(cmd, measured, scale);
        let px = raster_px(cmd.size, scale);

        self.layout.reset(&LayoutSettings {
            x: origin.x,
            y: origin.y,
            ..LayoutSettings::default()
        });
        self.layout.append(&[font], &TextStyle::new(&cmd.text, px, 0));

        Some(
            self.layout
                .glyphs()
                .iter()
                .filter(|g| g.char_data.rasterize() && g.width > 0 && g.height > 0)
                .map(|g| PlacedGlyph { key: g.key, x: g.x, y: g.y, w: g.width, h: g.height })
                .collect(),
        )
    }

    // ── atlas helpers ──────────────────────────────────────────────────────

    /// Rasterizes glyphs not yet cached. Returns `false` if the atlas overflowed.
    fn rasterize_missing<'c>(
        &mut self,
        ctx: &RenderCtx<'_>,
        fonts: &FontSystem,
        texts: impl Iterator<Item = &'c TextCmd>,
    ) -> bool {
        let scale = ctx.scale_factor.max(0.01);

        for cmd in texts {
            let Some(glyphs) = self.lay_out(fonts, cmd, scale) else { continue };
            let Some(font) = fonts.get(cmd.font) else { continue };

            for g in glyphs {
                if self.glyph_cache.contains_key(&g.key) {
                    continue;
                }

                let (metrics, bitmap) = font.rasterize_config(g.key);
                if metrics.width == 0 || metrics.height == 0 {
                    continue;
                }

                let (w, h) = (metrics.width as u32, metrics.height as u32);
                let Some((x, y)) = self.packer.place(w, h) else { return false };
                self.upload_glyph(ctx, &bitmap, x, y, w, h);
                self.glyph_cache.insert(g.key, CachedGlyph::at(x, y, w, h));
            }
        }

        true
    }

    fn upload_glyph(&self, ctx: &RenderCtx<'_>, bitmap: &[u8], x: u32, y: u32, w: u32, h: u32) {
        let Some(atlas) = self.atlas_texture.as_ref() else { return };

        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: atlas,
                mip_level: 0,
                origin: wgpu::Origin3d { x, y, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            bitmap,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(w),
                rows_per_image: Some(h),
            },
            wgpu::Extent3d { width: w, height: h, depth_or_array_layers: 1 },
        );
    }

    /// Forgets every cached glyph; their atlas space is reused.
    fn reset_atlas(&mut self) {
        self.glyph_cache.clear();
        self.packer.reset();
        self.atlas_generation += 1;
    }

    // ── lazy-init helpers ──────────────────────────────────────────────────

    fn ensure_atlas(&mut self, ctx: &RenderCtx<'_>) {
        if self.atlas_texture.is_some() {
            return;
        }

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("horae text atlas"),
            size: wgpu::Extent3d {
                width: ATLAS_SIZE,
                height: ATLAS_SIZE,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        self.atlas_view = Some(texture.create_view(&wgpu::TextureViewDescriptor::default()));
        self.atlas_texture = Some(texture);
        self.reset_atlas();
        self.gpu = None;
    }

    fn ensure_gpu(&mut self, ctx: &RenderCtx<'_>) {
        if self.gpu.as_ref().is_some_and(|g| g.format == ctx.surface_format) {
            return;
        }
        let Some(atlas_view) = self.atlas_view.as_ref() else { return };

        let layout = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("horae text bgl"),
            entries: &[
                viewport_layout_entry(0),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline = create_instanced_pipeline(ctx, PipelineDesc {
            label: "horae text",
            shader: include_str!("shaders/text.wgsl"),
            bind_group_layout: &layout,
            instance_layout: GlyphInstance::layout(),
        });

        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("horae text sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        let viewport_ubo = create_viewport_ubo(ctx.device, "horae text viewport ubo");
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("horae text bind group"),
            layout: &layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: viewport_ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(atlas_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        log::debug!("TextRenderer: pipeline built for {:?}", ctx.surface_format);

        self.gpu = Some(TextGpu {
            format: ctx.surface_format,
            pipeline,
            viewport_ubo,
            bind_group,
            quad: QuadMesh::new(ctx.device, "horae text"),
        });
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (48 bytes):
///
///  offset  0  dst_min  [f32; 2]   loc 1
///  offset  8  dst_max  [f32; 2]   loc 2
///  offset 16  uv_min   [f32; 2]   loc 3
///  offset 24  uv_max   [f32; 2]   loc 4
///  offset 32  color    [f32; 4]   loc 5
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct GlyphInstance {
    dst_min: [f32; 2],
    dst_max: [f32; 2],
    uv_min: [f32; 2],
    uv_max: [f32; 2],
    color: [f32; 4],
}

impl GlyphInstance {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        1 => Float32x2, // dst_min
        2 => Float32x2, // dst_max
        3 => Float32x2, // uv_min
        4 => Float32x2, // uv_max
        5 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GlyphInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

use anyhow::{anyhow, Result};
use glyphon::{
    Attrs, Buffer as GlyphonBuffer, Cache, Color, Family, FontSystem, Metrics, Resolution,
    Shaping, SwashCache, TextArea, TextAtlas, TextBounds, TextRenderer as GlyphonTextRenderer,
    Viewport,
};
use wgpu::{Device, MultisampleState, Queue, RenderPass, TextureFormat};

use crate::render::draw_list::TextSection;

const LINE_HEIGHT: f32 = 1.2;

/// Glyphon state for drawing queued text sections on top of the frame.
///
/// Fonts come from the system font database, so no font files ship with the game.
pub(crate) struct TextRenderer {
    font_system: FontSystem,
    swash_cache: SwashCache,
    viewport: Viewport,
    atlas: TextAtlas,
    renderer: GlyphonTextRenderer,
    buffers: Vec<GlyphonBuffer>,
}

impl TextRenderer {
    pub(crate) fn new(device: &Device, queue: &Queue, format: TextureFormat) -> Self {
        let cache = Cache::new(device);
        let viewport = Viewport::new(device, &cache);
        let mut atlas = TextAtlas::new(device, queue, &cache, format);
        let renderer =
            GlyphonTextRenderer::new(&mut atlas, device, MultisampleState::default(), None);

        Self {
            font_system: FontSystem::new(),
            swash_cache: SwashCache::new(),
            viewport,
            atlas,
            renderer,
            buffers: Vec::new(),
        }
    }

    /// Shape and upload this frame's text. `scale` maps logical to physical pixels.
    pub(crate) fn prepare(
        &mut self,
        device: &Device,
        queue: &Queue,
        sections: &[TextSection],
        (width, height): (u32, u32),
        scale: f32,
    ) -> Result<()> {
        self.viewport.update(queue, Resolution { width, height });

        self.buffers.clear();
        for section in sections {
            let mut buffer = GlyphonBuffer::new(
                &mut self.font_system,
                Metrics::new(section.size, section.size * LINE_HEIGHT),
            );
            let attrs = Attrs::new().family(Family::SansSerif);
            buffer.set_text(
                &mut self.font_system,
                &section.text,
                &attrs,
                Shaping::Advanced,
                None,
            );
            buffer.shape_until_scroll(&mut self.font_system, false);
            self.buffers.push(buffer);
        }

        let bounds = TextBounds {
            left: 0,
            top: 0,
            right: width as i32,
            bottom: height as i32,
        };
        let areas = self
            .buffers
            .iter()
            .zip(sections)
            .map(|(buffer, section)| TextArea {
                buffer,
                left: section.position.x * scale,
                top: section.position.y * scale,
                scale,
                bounds,
                default_color: to_glyphon_color(section.color),
                custom_glyphs: &[],
            });

        self.renderer
            .prepare(
                device,
                queue,
                &mut self.font_system,
                &mut self.atlas,
                &self.viewport,
                areas,
                &mut self.swash_cache,
            )
            .map_err(|err| anyhow!("failed to prepare text: {err}"))
    }

    pub(crate) fn render(&self, pass: &mut RenderPass<'_>) -> Result<()> {
        self.renderer
            .render(&self.atlas, &self.viewport, pass)
            .map_err(|err| anyhow!("failed to render text: {err}"))
    }

    /// Drop glyphs that were not used this frame from the atlas.
    pub(crate) fn trim(&mut self) {
        self.atlas.trim();
    }
}

fn to_glyphon_color(color: [f32; 4]) -> Color {
    let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color::rgba(byte(color[0]), byte(color[1]), byte(color[2]), byte(color[3]))
}

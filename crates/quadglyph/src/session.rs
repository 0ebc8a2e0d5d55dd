//! One font, its curve atlas, and a layout stream kept in sync with text
//!
//! The atlas is built once when the session starts. Every
//! [`TextSession::set_text`] lays the new string out and rewrites the
//! layout texture; when either step fails the previous content stays on
//! screen.

use std::sync::Arc;

use quadglyph_core::{
    error::Result,
    texture::{ShaderConstants, TextureSize},
    traits::{FontRef, Shaper, TextureSurface, UniformSink},
    HostTexture, LayoutParams,
};
use quadglyph_curves::{build_atlas, AtlasOptions, AtlasReport, CurveAtlas};
use quadglyph_layout::{layout, TextLayout};
use quadglyph_stream::{LayoutStream, StreamConfig};

/// Font, atlas and layout stream in one place
pub struct TextSession<S> {
    font: Arc<dyn FontRef>,
    shaper: Option<Arc<dyn Shaper>>,
    params: LayoutParams,
    atlas: CurveAtlas,
    report: AtlasReport,
    stream: LayoutStream<S>,
    current: Option<TextLayout>,
}

impl TextSession<HostTexture> {
    /// A session whose layout texture lives in CPU memory
    pub fn host(
        font: Arc<dyn FontRef>,
        atlas_options: &AtlasOptions,
        stream_config: StreamConfig,
    ) -> Result<Self> {
        let stream = LayoutStream::with_host(stream_config)?;
        Self::from_parts(font, atlas_options, stream)
    }
}

impl<S: TextureSurface + UniformSink> TextSession<S> {
    /// Start a session on a caller-provided layout texture
    pub fn new(
        font: Arc<dyn FontRef>,
        atlas_options: &AtlasOptions,
        surface: S,
        stream_config: StreamConfig,
    ) -> Result<Self> {
        let stream = LayoutStream::create(surface, stream_config)?;
        Self::from_parts(font, atlas_options, stream)
    }

    fn from_parts(
        font: Arc<dyn FontRef>,
        atlas_options: &AtlasOptions,
        stream: LayoutStream<S>,
    ) -> Result<Self> {
        let build = build_atlas(font.as_ref(), atlas_options)?;
        Ok(Self {
            font,
            shaper: None,
            params: LayoutParams::default(),
            atlas: build.atlas,
            report: build.report,
            stream,
            current: None,
        })
    }

    pub fn with_shaper(mut self, shaper: Arc<dyn Shaper>) -> Self {
        self.shaper = Some(shaper);
        self
    }

    pub fn with_params(mut self, params: LayoutParams) -> Self {
        self.params = params;
        self
    }

    pub fn params(&self) -> &LayoutParams {
        &self.params
    }

    /// Change size or origin; takes effect on the next [`Self::set_text`]
    pub fn set_params(&mut self, params: LayoutParams) {
        self.params = params;
    }

    /// Lay out `text` and stream it into the layout texture
    pub fn set_text(&mut self, text: &str) -> Result<&TextLayout> {
        let laid_out = layout(
            text,
            self.font.as_ref(),
            &self.params,
            self.shaper.as_deref(),
        )?;
        self.stream.write_layout(&laid_out.glyphs, &laid_out.lines)?;
        log::debug!(
            "Session text now {} glyphs on {} lines",
            laid_out.glyph_count(),
            laid_out.line_count()
        );
        Ok(self.current.insert(laid_out))
    }

    /// Layout of the last successful [`Self::set_text`]
    pub fn current(&self) -> Option<&TextLayout> {
        self.current.as_ref()
    }

    pub fn font(&self) -> &dyn FontRef {
        self.font.as_ref()
    }

    pub fn atlas(&self) -> &CurveAtlas {
        &self.atlas
    }

    pub fn atlas_report(&self) -> &AtlasReport {
        &self.report
    }

    /// Write the curve atlas into a texture at least as large as the atlas
    pub fn upload_atlas(&self, surface: &mut dyn TextureSurface) -> Result<()> {
        self.atlas.upload(surface)
    }

    pub fn stream(&self) -> &LayoutStream<S> {
        &self.stream
    }

    pub fn layout_texture_size(&self) -> TextureSize {
        self.stream.size()
    }

    /// Numbers a shader needs to address both textures
    pub fn shader_constants(&self) -> ShaderConstants {
        ShaderConstants {
            curve_texture: self.atlas.size(),
            layout_texture: self.stream.size(),
            glyph_bounding_radius: self.font.bounding_radius(),
        }
    }

    /// End the session and get the layout texture back
    pub fn into_surface(self) -> S {
        self.stream.destroy()
    }
}

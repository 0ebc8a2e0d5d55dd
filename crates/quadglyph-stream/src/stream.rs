//! The persistent layout texture and its write policy
//!
//! A [`LayoutStream`] owns one texture for its whole life. Every write
//! overwrites sub-regions only; the texture is never reallocated, so a
//! consumer that bound it once keeps seeing current content.
//!
//! Lifecycle: [`LayoutStream::create`], then any number of
//! [`LayoutStream::write_layout`] calls (each growing the reserved rows
//! when needed), then [`LayoutStream::destroy`] to get the surface back.

use quadglyph_core::{
    config::{self, WritePolicy},
    error::{Axis, CapacityError, Result},
    records::{GlyphLayoutArray, LineLayoutArray, Record},
    texture::{TextureLimits, TextureSize, FLOATS_PER_TEXEL},
    traits::{TextureSurface, UniformSink},
    HostTexture,
};

use crate::geometry::{row_spans, rows_needed, StreamEnd};

/// Layout texture shape and how stale texels are dealt with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamConfig {
    /// Texels per row
    pub width: u32,
    /// Rows shared by the glyph and line runs
    pub height: u32,
    pub policy: WritePolicy,
    pub limits: TextureLimits,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 64,
            policy: config::stream_policy(),
            limits: TextureLimits::default(),
        }
    }
}

impl StreamConfig {
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_policy(mut self, policy: WritePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_limits(mut self, limits: TextureLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn size(&self) -> TextureSize {
        TextureSize::new(self.width, self.height)
    }
}

/// Bookkeeping for one end of the texture
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct RunState {
    /// Texels holding the latest content
    written: usize,
    /// Largest run ever written
    high_water: usize,
    /// Rows claimed by the last write
    reserved_rows: u32,
}

impl RunState {
    /// Texels that may still hold non-zero data from earlier writes
    fn stale(&self, policy: WritePolicy) -> usize {
        match policy {
            WritePolicy::ClearPrevious => self.written,
            WritePolicy::ClampNoShrink => self.high_water,
        }
    }
}

/// Glyph records from the top, line records from the bottom
pub struct LayoutStream<S> {
    surface: S,
    config: StreamConfig,
    glyphs: RunState,
    lines: RunState,
    line_count: u32,
}

impl LayoutStream<HostTexture> {
    /// A stream over a freshly allocated CPU texture of the configured size
    pub fn with_host(config: StreamConfig) -> Result<Self> {
        config.limits.check(config.width as u64, config.height as u64)?;
        Self::create(HostTexture::new(config.width, config.height), config)
    }
}

impl<S: TextureSurface + UniformSink> LayoutStream<S> {
    /// Take ownership of `surface` as the layout texture
    ///
    /// The configured size must fit both the device limits and the
    /// surface itself.
    pub fn create(surface: S, config: StreamConfig) -> Result<Self> {
        config.limits.check(config.width as u64, config.height as u64)?;

        let actual = surface.size();
        if config.width > actual.width {
            return Err(CapacityError {
                axis: Axis::Width,
                required: config.width as u64,
                available: actual.width as u64,
            }
            .into());
        }
        if config.height > actual.height {
            return Err(CapacityError {
                axis: Axis::Height,
                required: config.height as u64,
                available: actual.height as u64,
            }
            .into());
        }

        log::debug!(
            "Layout stream on {}x{} texels ({:?})",
            config.width,
            config.height,
            config.policy
        );

        Ok(Self {
            surface,
            config,
            glyphs: RunState::default(),
            lines: RunState::default(),
            line_count: 0,
        })
    }

    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    pub fn size(&self) -> TextureSize {
        self.config.size()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Line records currently valid, as last pushed to the uniform
    pub fn line_count(&self) -> u32 {
        self.line_count
    }

    /// Rows reserved by the glyph run and the line run
    pub fn reserved_rows(&self) -> (u32, u32) {
        (self.glyphs.reserved_rows, self.lines.reserved_rows)
    }

    /// Reserve enough rows for `glyph_texels` and `line_texels`
    ///
    /// Each run keeps the rows it needs to cover both the new records and
    /// whatever is still stale from earlier writes. Under
    /// [`WritePolicy::ClampNoShrink`] reservations only grow; under
    /// [`WritePolicy::ClearPrevious`] rows are released once they have been
    /// zeroed. Fails without touching anything when the two runs would
    /// overlap.
    pub fn grow_if_needed(&mut self, glyph_texels: usize, line_texels: usize) -> Result<()> {
        let (glyph_rows, line_rows) = self.plan(glyph_texels, line_texels)?;
        if glyph_rows > self.glyphs.reserved_rows || line_rows > self.lines.reserved_rows {
            log::debug!(
                "Layout stream grows to {} glyph rows and {} line rows",
                glyph_rows,
                line_rows
            );
        }
        self.glyphs.reserved_rows = glyph_rows;
        self.lines.reserved_rows = line_rows;
        Ok(())
    }

    fn plan(&self, glyph_texels: usize, line_texels: usize) -> Result<(u32, u32)> {
        let width = self.config.width;
        let policy = self.config.policy;
        let extent = |run: &RunState, texels: usize| {
            let rows = rows_needed(texels.max(run.stale(policy)), width);
            match policy {
                WritePolicy::ClearPrevious => rows,
                WritePolicy::ClampNoShrink => rows.max(run.reserved_rows),
            }
        };
        let glyph_rows = extent(&self.glyphs, glyph_texels);
        let line_rows = extent(&self.lines, line_texels);

        let required = glyph_rows as u64 + line_rows as u64;
        if required > self.config.height as u64 {
            return Err(CapacityError {
                axis: Axis::Height,
                required,
                available: self.config.height as u64,
            }
            .into());
        }
        Ok((glyph_rows, line_rows))
    }

    /// Replace the texture content with `glyphs` and `lines`
    ///
    /// Capacity is checked for both runs before the first upload, so a
    /// failed call leaves the previous content in place. On success the
    /// line count uniform is updated.
    pub fn write_layout(&mut self, glyphs: &GlyphLayoutArray, lines: &LineLayoutArray) -> Result<()> {
        self.grow_if_needed(glyphs.texel_count(), lines.texel_count())?;

        let policy = self.config.policy;
        self.glyphs = write_run(
            &mut self.surface,
            &self.config,
            self.glyphs,
            glyphs.as_floats(),
            StreamEnd::Top,
            policy,
        )?;
        self.lines = write_run(
            &mut self.surface,
            &self.config,
            self.lines,
            lines.as_floats(),
            StreamEnd::Bottom,
            policy,
        )?;

        self.line_count = lines.len() as u32;
        self.surface.set_line_count(self.line_count);

        log::debug!(
            "Streamed {} glyph records and {} line records",
            glyphs.len(),
            lines.len()
        );
        Ok(())
    }

    /// Zero everything written so far and report no lines
    pub fn clear(&mut self) -> Result<()> {
        self.write_layout(&GlyphLayoutArray::new(), &LineLayoutArray::new())
    }

    /// Hand the texture back
    pub fn destroy(self) -> S {
        self.surface
    }
}

/// Upload one record run, zero-padding over whatever is stale
fn write_run<S: TextureSurface>(
    surface: &mut S,
    config: &StreamConfig,
    state: RunState,
    floats: &[f32],
    end: StreamEnd,
    policy: WritePolicy,
) -> Result<RunState> {
    let texels = floats.len() / FLOATS_PER_TEXEL;
    let extent = texels.max(state.stale(policy));

    let mut padded = Vec::with_capacity(extent * FLOATS_PER_TEXEL);
    padded.extend_from_slice(floats);
    padded.resize(extent * FLOATS_PER_TEXEL, 0.0);

    for span in row_spans(extent, config.width, config.height, end) {
        let data = &padded[span.start * FLOATS_PER_TEXEL..span.end * FLOATS_PER_TEXEL];
        surface.write_region(span.region, data)?;
    }

    Ok(RunState {
        written: texels,
        high_water: state.high_water.max(texels),
        reserved_rows: state.reserved_rows,
    })
}

/// Every record type the stream accepts spans whole texels
const _: () = {
    assert!(quadglyph_core::GlyphLayoutRecord::STRIDE_BYTES % 16 == 0);
    assert!(quadglyph_core::LineLayoutRecord::STRIDE_BYTES % 16 == 0);
};

#[cfg(test)]
mod tests {
    use super::*;
    use quadglyph_core::{GlyphLayoutRecord, LineLayoutRecord};

    fn glyphs(n: usize) -> GlyphLayoutArray {
        (0..n)
            .map(|i| GlyphLayoutRecord::new(i as f32 + 1.0, 2.0, i as u32 + 1, 0.5))
            .collect()
    }

    fn lines(n: usize) -> LineLayoutArray {
        (0..n)
            .map(|i| LineLayoutRecord::new([1.0, 2.0, 3.0, 4.0], i, 1))
            .collect()
    }

    fn stream(policy: WritePolicy) -> LayoutStream<HostTexture> {
        let config = StreamConfig::default()
            .with_size(4, 8)
            .with_policy(policy)
            .with_limits(TextureLimits::new(64));
        LayoutStream::with_host(config).unwrap()
    }

    #[test]
    fn test_write_layout_places_glyphs_top_and_lines_bottom() {
        let mut s = stream(WritePolicy::ClearPrevious);
        s.write_layout(&glyphs(5), &lines(1)).unwrap();

        let tex = s.surface();
        assert_eq!(tex.texel(0, 0), Some([1.0, 2.0, 1.0, 0.5]));
        assert_eq!(tex.texel(0, 1), Some([5.0, 2.0, 5.0, 0.5]));
        assert_eq!(tex.texel(1, 1), Some([0.0; 4]));
        assert_eq!(tex.texel(0, 7), Some([1.0, 2.0, 3.0, 4.0]));
        assert_eq!(tex.texel(1, 7), Some([0.0, 1.0, 0.0, 0.0]));
        assert_eq!(tex.line_count(), 1);
        assert_eq!(s.line_count(), 1);
    }

    #[test]
    fn test_partial_last_row_is_a_short_upload() {
        let mut s = stream(WritePolicy::ClearPrevious);
        s.write_layout(&glyphs(6), &LineLayoutArray::new()).unwrap();
        // One full glyph row plus one 2-texel row; no line uploads
        assert_eq!(s.surface().upload_count(), 2);
    }

    #[test]
    fn test_shorter_string_when_clear_previous_then_tail_zeroed() {
        let mut s = stream(WritePolicy::ClearPrevious);
        s.write_layout(&glyphs(7), &lines(2)).unwrap();
        s.write_layout(&glyphs(2), &lines(1)).unwrap();

        let tex = s.surface();
        assert_eq!(tex.texel(1, 0), Some([2.0, 2.0, 2.0, 0.5]));
        for u in 2..4 {
            assert_eq!(tex.texel(u, 0), Some([0.0; 4]));
        }
        for u in 0..3 {
            assert_eq!(tex.texel(u, 1), Some([0.0; 4]));
        }
        assert_eq!(tex.texel(2, 7), Some([0.0; 4]));
        assert_eq!(tex.line_count(), 1);
    }

    #[test]
    fn test_clamp_no_shrink_keeps_uploading_high_water_region() {
        let mut s = stream(WritePolicy::ClampNoShrink);
        s.write_layout(&glyphs(6), &LineLayoutArray::new()).unwrap();
        s.write_layout(&glyphs(1), &LineLayoutArray::new()).unwrap();
        let before = s.surface().upload_count();
        s.write_layout(&glyphs(1), &LineLayoutArray::new()).unwrap();

        // Still two rows' worth of uploads for a one-record string
        assert_eq!(s.surface().upload_count() - before, 2);
        assert_eq!(s.surface().texel(1, 1), Some([0.0; 4]));
    }

    #[test]
    fn test_write_when_runs_would_collide_then_previous_content_kept() {
        let mut s = stream(WritePolicy::ClearPrevious);
        s.write_layout(&glyphs(3), &lines(1)).unwrap();
        let uploads = s.surface().upload_count();

        // 6 glyph rows + 3 line rows > 8
        let err = s.write_layout(&glyphs(21), &lines(4)).unwrap_err();
        assert!(err.to_string().contains("height needs 9, only 8 available"));
        assert_eq!(s.surface().upload_count(), uploads);
        assert_eq!(s.surface().texel(0, 0), Some([1.0, 2.0, 1.0, 0.5]));
        assert_eq!(s.line_count(), 1);
    }

    #[test]
    fn test_reserved_rows_when_clamp_no_shrink_then_never_shrink() {
        let mut s = stream(WritePolicy::ClampNoShrink);
        s.write_layout(&glyphs(9), &lines(1)).unwrap();
        assert_eq!(s.reserved_rows(), (3, 1));
        s.write_layout(&glyphs(1), &lines(1)).unwrap();
        assert_eq!(s.reserved_rows(), (3, 1));
    }

    #[test]
    fn test_reserved_rows_when_clear_previous_then_released_after_zeroing() {
        let mut s = stream(WritePolicy::ClearPrevious);
        s.write_layout(&glyphs(9), &lines(1)).unwrap();
        assert_eq!(s.reserved_rows(), (3, 1));

        // Still covers the nine stale records while zeroing them
        s.write_layout(&glyphs(1), &lines(1)).unwrap();
        assert_eq!(s.reserved_rows(), (3, 1));

        s.write_layout(&glyphs(1), &lines(1)).unwrap();
        assert_eq!(s.reserved_rows(), (1, 1));
    }

    #[test]
    fn test_big_glyph_run_then_clear_then_many_lines_fits() {
        let mut s = stream(WritePolicy::ClearPrevious);
        s.write_layout(&glyphs(24), &LineLayoutArray::new()).unwrap();
        s.clear().unwrap();
        s.clear().unwrap();

        // 8 lines are 16 texels: 5 line rows plus 1 glyph row
        s.write_layout(&GlyphLayoutArray::new(), &lines(8)).unwrap();
        assert_eq!(s.reserved_rows(), (1, 5));
        assert_eq!(s.line_count(), 8);
        assert!(s.surface().as_floats()[..4 * 4 * 3].iter().all(|f| *f == 0.0));
    }

    #[test]
    fn test_create_when_surface_smaller_than_config_then_fails() {
        let config = StreamConfig::default()
            .with_size(8, 8)
            .with_limits(TextureLimits::new(64));
        assert!(LayoutStream::create(HostTexture::new(4, 8), config).is_err());
        assert!(LayoutStream::with_host(config.with_limits(TextureLimits::new(4))).is_err());
    }

    #[test]
    fn test_destroy_returns_surface_with_content() {
        let mut s = stream(WritePolicy::ClearPrevious);
        s.write_layout(&glyphs(1), &lines(1)).unwrap();
        let tex = s.destroy();
        assert_eq!(tex.texel(0, 0), Some([1.0, 2.0, 1.0, 0.5]));
    }
}

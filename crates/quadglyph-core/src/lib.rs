//! quadglyph core: the shared vocabulary of the GPU text pipeline
//!
//! Text on the GPU needs two kinds of data. Glyph outlines, reduced to
//! quadratic curves and packed one glyph per texture row, and placement
//! records saying which glyph goes where. This crate holds the types both
//! sides agree on.
//!
//! ## The Pipeline
//!
//! 1. **Decompose** - outline commands become uniform quadratic curves
//! 2. **Pack** - per-glyph curve lists become one float texture
//! 3. **Lay out** - a string becomes glyph and line records
//! 4. **Stream** - records are written into a persistent layout texture
//!
//! ## The Traits
//!
//! - [`traits::FontRef`] - metrics and outlines of one font, read-only
//! - [`traits::Shaper`] - optional external shaping (kerning, ligatures)
//! - [`traits::TextureSurface`] - where texels are uploaded
//! - [`traits::UniformSink`] - where the line count scalar goes
//!
//! Records written to textures live in [`records`]; texture geometry and
//! the CPU-side [`texture::HostTexture`] live in [`texture`].

pub mod config;
pub mod error;
pub mod records;
pub mod texture;
pub mod traits;

pub use error::{QuadglyphError, Result};
pub use records::{GlyphLayoutArray, GlyphLayoutRecord, LineLayoutArray, LineLayoutRecord};
pub use texture::{HostTexture, TexelRegion, TextureLimits, TextureSize};
pub use traits::{FontRef, Shaper, TextureSurface, UniformSink};

/// The data structures that flow between stages
pub mod types {
    use bytemuck::{Pod, Zeroable};

    /// Font-internal glyph index
    pub type GlyphId = u32;

    /// One raw outline command, absolute coordinates in font units
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub enum OutlineCommand {
        MoveTo {
            x: f32,
            y: f32,
        },
        LineTo {
            x: f32,
            y: f32,
        },
        QuadTo {
            cx: f32,
            cy: f32,
            x: f32,
            y: f32,
        },
        CubicTo {
            c0x: f32,
            c0y: f32,
            c1x: f32,
            c1y: f32,
            x: f32,
            y: f32,
        },
        Close,
    }

    impl OutlineCommand {
        /// Whether this command produces a curve
        pub fn is_drawing(&self) -> bool {
            !matches!(self, OutlineCommand::MoveTo { .. } | OutlineCommand::Close)
        }
    }

    /// Start, control and end point plus two metadata slots
    ///
    /// Eight floats, two RGBA texels. The all-zero curve is the padding
    /// curve and contributes nothing to coverage.
    #[repr(C)]
    #[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
    pub struct QuadraticCurve {
        pub x0: f32,
        pub y0: f32,
        pub x1: f32,
        pub y1: f32,
        pub x2: f32,
        pub y2: f32,
        pub meta1: f32,
        pub meta2: f32,
    }

    impl QuadraticCurve {
        /// Floats per curve
        pub const FLOATS: usize = 8;

        pub const fn new(start: (f32, f32), control: (f32, f32), end: (f32, f32)) -> Self {
            Self {
                x0: start.0,
                y0: start.1,
                x1: control.0,
                y1: control.1,
                x2: end.0,
                y2: end.1,
                meta1: 0.0,
                meta2: 0.0,
            }
        }

        pub fn to_floats(&self) -> [f32; 8] {
            [
                self.x0, self.y0, self.x1, self.y1, self.x2, self.y2, self.meta1, self.meta2,
            ]
        }

        pub fn from_floats(f: [f32; 8]) -> Self {
            Self {
                x0: f[0],
                y0: f[1],
                x1: f[2],
                y1: f[3],
                x2: f[4],
                y2: f[5],
                meta1: f[6],
                meta2: f[7],
            }
        }

        /// True for the zero-area padding curve at the origin
        pub fn is_padding(&self) -> bool {
            self.to_floats().iter().all(|v| *v == 0.0)
        }
    }

    /// Ascender, descender and line gap in font units
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct VerticalMetrics {
        pub ascender: i16,
        pub descender: i16,
        pub line_gap: i16,
    }

    impl VerticalMetrics {
        /// `ascender - descender + line_gap`, in font units
        pub fn line_height(&self) -> i32 {
            self.ascender as i32 - self.descender as i32 + self.line_gap as i32
        }
    }

    /// The OS/2 fields layout cares about
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Os2Metrics {
        pub fs_selection: u16,
        pub typo: VerticalMetrics,
    }

    impl Os2Metrics {
        /// fsSelection bit 7
        pub const USE_TYPO_METRICS: u16 = 1 << 7;

        pub fn use_typo_metrics(&self) -> bool {
            self.fs_selection & Self::USE_TYPO_METRICS != 0
        }
    }

    /// The `head` table's global outline box
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct FontBounds {
        pub x_min: i16,
        pub y_min: i16,
        pub x_max: i16,
        pub y_max: i16,
    }

    impl FontBounds {
        /// Radius of a circle around the origin that holds any glyph
        pub fn bounding_radius(&self) -> f32 {
            let x = (self.x_max as f32).abs().max((self.x_min as f32).abs());
            let y = (self.y_max as f32).abs().max((self.y_min as f32).abs());
            (x * x + y * y).sqrt()
        }
    }

    /// One glyph as returned by an external shaper, in font units
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ShapedGlyph {
        pub glyph_id: GlyphId,
        pub x_advance: i32,
        pub y_advance: i32,
        pub x_offset: i32,
        pub y_offset: i32,
        /// Byte offset of the source cluster within the shaped text
        pub cluster: u32,
    }
}

/// How a string should be placed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    /// Pixels per em
    pub px_per_em: f32,
    /// Pen position of the first line's top-left corner
    pub origin: (f32, f32),
}

impl LayoutParams {
    pub fn with_px_per_em(mut self, px_per_em: f32) -> Self {
        self.px_per_em = px_per_em;
        self
    }

    pub fn with_origin(mut self, x: f32, y: f32) -> Self {
        self.origin = (x, y);
        self
    }
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            px_per_em: 16.0,
            origin: (0.0, 0.0),
        }
    }
}

#[cfg(test)]
mod proptests;

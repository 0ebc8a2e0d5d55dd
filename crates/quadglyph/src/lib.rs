//! quadglyph - text drawn by the GPU from glyph curves
//!
//! The pipeline has four stages:
//! 1. Curve decomposition of glyph outlines into quadratic curves
//! 2. Packing of every glyph's curves into one float texture
//! 3. Layout of a string into glyph and line records
//! 4. Streaming of those records into a persistent layout texture
//!
//! [`TextSession`] runs all four for one font and keeps the layout texture
//! in step with the current text. [`TextReveal`] grows the text a few
//! characters at a time.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use quadglyph::prelude::*;
//! use quadglyph::fontdb::Font;
//!
//! let font = Arc::new(Font::from_file("Inter.ttf")?);
//! let mut session = TextSession::host(font, &AtlasOptions::default(), StreamConfig::default())?
//!     .with_params(LayoutParams::default().with_px_per_em(32.0));
//! session.set_text("Hello\nworld")?;
//! let constants = session.shader_constants();
//! ```
//!
//! # Feature Flags
//!
//! - `fontdb`: font file loading (on by default)
//! - `shaping-hr`: harfrust shaping
//! - `wgpu`: wgpu texture backend
//! - `full`: all of the above

mod reveal;
mod session;

pub use quadglyph_core::{config, error, records, texture, traits, types, LayoutParams};
pub use quadglyph_curves as curves;
pub use quadglyph_layout as layout;
pub use quadglyph_stream as stream;

#[cfg(feature = "fontdb")]
pub use quadglyph_fontdb as fontdb;

#[cfg(feature = "shaping-hr")]
pub use quadglyph_shape_hr as shape_hr;

#[cfg(feature = "wgpu")]
pub use quadglyph_wgpu as gpu;

pub use reveal::TextReveal;
pub use session::TextSession;

/// Common imports for typical usage
pub mod prelude {
    pub use quadglyph_core::{
        error::{QuadglyphError, Result},
        texture::{HostTexture, ShaderConstants, TextureLimits, TextureSize},
        traits::{FontRef, Shaper, TextureSurface, UniformSink},
        LayoutParams,
    };
    pub use quadglyph_curves::{AtlasOptions, CurveAtlas, CurveMeta};
    pub use quadglyph_layout::TextLayout;
    pub use quadglyph_stream::StreamConfig;

    pub use crate::{TextReveal, TextSession};
}

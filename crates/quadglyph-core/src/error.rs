//! Error types for quadglyph

use thiserror::Error;

pub type Result<T> = std::result::Result<T, QuadglyphError>;

/// Main error type for quadglyph
#[derive(Debug, Error)]
pub enum QuadglyphError {
    #[error("Font loading failed: {0}")]
    FontLoad(#[from] FontLoadError),

    #[error("Malformed outline: {0}")]
    Outline(#[from] OutlineError),

    #[error("Packing failed: {0}")]
    Pack(#[from] PackError),

    #[error("Texture capacity exceeded: {0}")]
    Capacity(#[from] CapacityError),

    #[error("Font metrics unavailable: {0}")]
    Metrics(#[from] MetricsError),

    #[error("Shaping failed: {0}")]
    ShapingFailed(#[from] ShapingError),

    #[error("Upload failed: {0}")]
    Upload(#[from] UploadError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Font loading errors
#[derive(Debug, Error)]
pub enum FontLoadError {
    #[error("Font file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid font data")]
    InvalidData,

    #[error("Missing required table: {0}")]
    MissingTable(&'static str),

    #[error("Outline of glyph {0} could not be read")]
    OutlineUnreadable(u32),
}

/// A drawing command arrived while no contour was open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OutlineError {
    #[error("command {command_index} draws without a preceding move-to")]
    NoCurrentPoint { command_index: usize },
}

/// Curve rows that cannot be laid out as RGBA texels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PackError {
    #[error("row {row} holds {len} floats, not a multiple of 4")]
    MisalignedRow { row: usize, len: usize },

    #[error("font has no glyphs")]
    Empty,
}

/// Which texture dimension ran out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Width,
    Height,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Width => f.write_str("width"),
            Axis::Height => f.write_str("height"),
        }
    }
}

/// Required texture size is larger than the device (or configured) limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{axis} needs {required}, only {available} available")]
pub struct CapacityError {
    pub axis: Axis,
    pub required: u64,
    pub available: u64,
}

/// Vertical metric lookup failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MetricsError {
    #[error("font has neither an OS/2 nor an hhea table")]
    NoVerticalMetrics,

    #[error("units per em is zero")]
    ZeroUnitsPerEm,
}

/// Shaping errors
#[derive(Debug, Error)]
pub enum ShapingError {
    #[error("Invalid font data for shaping")]
    InvalidFont,

    #[error("Backend error: {0}")]
    BackendError(String),
}

/// Texture upload errors
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("region {x},{y} {width}x{height} lies outside a {texture_width}x{texture_height} texture")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        texture_width: u32,
        texture_height: u32,
    },

    #[error("region expects {expected} floats, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Backend error: {0}")]
    BackendError(String),
}

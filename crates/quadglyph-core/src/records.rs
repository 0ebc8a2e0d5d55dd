//! Fixed-stride records destined for the layout texture
//!
//! Records are plain `#[repr(C)]` structs of 32-bit floats, so a record
//! array is its own upload buffer: [`RecordArray::as_floats`] hands the
//! bytes to a texture unchanged.

use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use serde::{Serialize, Serializer};

use crate::texture::TEXEL_BYTES;

/// Position given to glyphs that must not be drawn
pub const SENTINEL: f32 = f32::INFINITY;

/// A record with a stride that is a whole number of texels
pub trait Record: Pod + PartialEq + std::fmt::Debug {
    const STRIDE_BYTES: usize = std::mem::size_of::<Self>();
    const TEXELS_PER_RECORD: usize = Self::STRIDE_BYTES / TEXEL_BYTES;
}

/// Where one character's glyph goes
///
/// 16 bytes, one texel.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable, Serialize)]
pub struct GlyphLayoutRecord {
    #[serde(serialize_with = "serialize_position")]
    pub x: f32,
    #[serde(serialize_with = "serialize_position")]
    pub y: f32,
    pub glyph_index: f32,
    /// Font units to pixels scale
    pub size: f32,
}

impl GlyphLayoutRecord {
    pub fn new(x: f32, y: f32, glyph_id: u32, size: f32) -> Self {
        Self {
            x,
            y,
            glyph_index: glyph_id as f32,
            size,
        }
    }

    /// A record parked at the sentinel position
    pub fn hidden(glyph_id: u32, size: f32) -> Self {
        Self::new(SENTINEL, SENTINEL, glyph_id, size)
    }

    pub fn glyph_id(&self) -> u32 {
        self.glyph_index as u32
    }

    /// Whether the glyph sits somewhere a viewport could see it
    pub fn is_visible(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Record for GlyphLayoutRecord {}

/// Finite positions as numbers, the sentinel as `"inf"`
///
/// JSON has no infinity; `serde_json` would otherwise write `null`.
fn serialize_position<S: Serializer>(value: &f32, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() {
        serializer.serialize_f32(*value)
    } else if value.is_nan() {
        serializer.serialize_str("nan")
    } else if value.is_sign_positive() {
        serializer.serialize_str("inf")
    } else {
        serializer.serialize_str("-inf")
    }
}

/// One line: its bounding box and which glyph records belong to it
///
/// 32 bytes, two texels.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable, Serialize)]
pub struct LineLayoutRecord {
    pub x1: f32,
    pub x2: f32,
    pub y1: f32,
    pub y2: f32,
    pub buffer_offset: f32,
    pub char_count: f32,
    pub reserved0: f32,
    pub reserved1: f32,
}

impl LineLayoutRecord {
    pub fn new(bounds: [f32; 4], buffer_offset: usize, char_count: usize) -> Self {
        Self {
            x1: bounds[0],
            x2: bounds[1],
            y1: bounds[2],
            y2: bounds[3],
            buffer_offset: buffer_offset as f32,
            char_count: char_count as f32,
            reserved0: 0.0,
            reserved1: 0.0,
        }
    }

    pub fn buffer_offset(&self) -> usize {
        self.buffer_offset as usize
    }

    pub fn char_count(&self) -> usize {
        self.char_count as usize
    }

    /// Index range of this line's glyph records
    pub fn glyph_range(&self) -> Range<usize> {
        self.buffer_offset()..self.buffer_offset() + self.char_count()
    }
}

impl Record for LineLayoutRecord {}

/// Typed accessor over a packed record buffer
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RecordArray<R: Record> {
    records: Vec<R>,
}

pub type GlyphLayoutArray = RecordArray<GlyphLayoutRecord>;
pub type LineLayoutArray = RecordArray<LineLayoutRecord>;

impl<R: Record> RecordArray<R> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// `len` zeroed records
    pub fn zeroed(len: usize) -> Self {
        Self {
            records: vec![R::zeroed(); len],
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<R> {
        self.records.get(index).copied()
    }

    /// Replace record `index`, returning the old one
    ///
    /// Out-of-range indices leave the array untouched and return `None`.
    pub fn set(&mut self, index: usize, record: R) -> Option<R> {
        let slot = self.records.get_mut(index)?;
        Some(std::mem::replace(slot, record))
    }

    pub fn push(&mut self, record: R) {
        self.records.push(record);
    }

    /// Records `a..b`, or `None` when the range is out of bounds
    pub fn slice(&self, a: usize, b: usize) -> Option<&[R]> {
        self.records.get(a..b)
    }

    pub fn iter(&self) -> impl Iterator<Item = &R> + '_ {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[R] {
        &self.records
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.records)
    }

    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.records)
    }

    pub fn texel_count(&self) -> usize {
        self.records.len() * R::TEXELS_PER_RECORD
    }
}

impl<R: Record> From<Vec<R>> for RecordArray<R> {
    fn from(records: Vec<R>) -> Self {
        Self { records }
    }
}

impl<R: Record> FromIterator<R> for RecordArray<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

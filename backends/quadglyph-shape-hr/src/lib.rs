//! Pure Rust text shaping backend using harfrust
//!
//! Harfrust is a pure Rust port of HarfBuzz. It gives the layout engine
//! kerned advances, mark offsets and ligature glyphs without any C
//! dependencies.
//!
//! Results are returned unscaled, in font units; the layout engine applies
//! the pixel size. Because of that, a cached line is valid at every size,
//! which makes the cache pay off when the same text is laid out repeatedly
//! (scrolling text, progressive reveal).

use std::collections::HashMap;

use harfrust::{
    Direction as HrDirection, Feature, FontRef as HrFontRef, GlyphBuffer, ShaperData, Tag,
    UnicodeBuffer,
};
use parking_lot::Mutex;

use quadglyph_core::{
    error::{Result, ShapingError},
    traits::{FontRef, Shaper},
    types::ShapedGlyph,
};

/// Lines kept before the cache starts over
const CACHE_CAPACITY: usize = 512;

/// Identity of a shaped line: font bytes (by address and length), face and text
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    font_addr: usize,
    font_len: usize,
    face_index: u32,
    text: String,
}

/// Hit and miss counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

#[derive(Default)]
struct ShapeCache {
    entries: HashMap<CacheKey, Vec<ShapedGlyph>>,
    hits: u64,
    misses: u64,
}

/// Pure Rust text shaping powered by harfrust
pub struct HarfrustShaper {
    features: Vec<Feature>,
    cache: Option<Mutex<ShapeCache>>,
}

impl HarfrustShaper {
    /// A shaper with the font's default features and no cache
    pub fn new() -> Self {
        Self {
            features: Vec::new(),
            cache: None,
        }
    }

    /// A shaper that remembers lines it has already shaped
    pub fn with_cache() -> Self {
        Self {
            cache: Some(Mutex::new(ShapeCache::default())),
            ..Self::new()
        }
    }

    /// Turn OpenType features on or off, e.g. `("kern", 0)`
    ///
    /// Tags that are not four bytes long are ignored.
    pub fn with_features<S: AsRef<str>>(mut self, features: &[(S, u32)]) -> Self {
        self.features = features
            .iter()
            .filter_map(|(name, value)| {
                Self::parse_tag(name.as_ref()).map(|tag| Feature {
                    tag,
                    value: *value,
                    start: 0,
                    end: u32::MAX,
                })
            })
            .collect();
        self
    }

    /// Cache counters, `None` when caching is off
    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(|cache| {
            let cache = cache.lock();
            CacheStats {
                hits: cache.hits,
                misses: cache.misses,
                entries: cache.entries.len(),
            }
        })
    }

    /// Parse a 4-character tag string into a harfrust Tag
    fn parse_tag(tag_str: &str) -> Option<Tag> {
        let bytes: [u8; 4] = tag_str.as_bytes().try_into().ok()?;
        Some(Tag::new(&bytes))
    }

    /// Advance-only shaping from the font's own cmap and hmtx
    fn fallback_shape(text: &str, font: &dyn FontRef) -> Vec<ShapedGlyph> {
        text.char_indices()
            .map(|(cluster, ch)| {
                let glyph_id = font.glyph_id(ch).unwrap_or(0);
                ShapedGlyph {
                    glyph_id,
                    x_advance: font.advance_width(glyph_id).round() as i32,
                    cluster: cluster as u32,
                    ..ShapedGlyph::default()
                }
            })
            .collect()
    }

    /// Extract glyphs from harfrust's output buffer, font units throughout
    fn extract_glyphs(buffer: &GlyphBuffer) -> Vec<ShapedGlyph> {
        buffer
            .glyph_infos()
            .iter()
            .zip(buffer.glyph_positions())
            .map(|(info, pos)| ShapedGlyph {
                glyph_id: info.glyph_id,
                x_advance: pos.x_advance,
                y_advance: pos.y_advance,
                x_offset: pos.x_offset,
                y_offset: pos.y_offset,
                cluster: info.cluster,
            })
            .collect()
    }

    fn shape_uncached(&self, text: &str, font: &dyn FontRef) -> Result<Vec<ShapedGlyph>> {
        let font_data = font.data();
        if font_data.is_empty() {
            // Synthetic fonts have no tables to shape with
            return Ok(Self::fallback_shape(text, font));
        }

        let hr_font = HrFontRef::from_index(font_data, font.face_index())
            .map_err(|_| ShapingError::InvalidFont)?;
        let shaper_data = ShaperData::new(&hr_font);
        let shaper = shaper_data.shaper(&hr_font).build();

        let mut buffer = UnicodeBuffer::new();
        buffer.push_str(text);
        buffer.set_direction(HrDirection::LeftToRight);

        let output = shaper.shape(buffer, &self.features);
        Ok(Self::extract_glyphs(&output))
    }
}

impl Default for HarfrustShaper {
    fn default() -> Self {
        Self::new()
    }
}

impl Shaper for HarfrustShaper {
    fn name(&self) -> &'static str {
        "harfrust"
    }

    fn shape(&self, text: &str, font: &dyn FontRef) -> Result<Vec<ShapedGlyph>> {
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let Some(cache) = &self.cache else {
            return self.shape_uncached(text, font);
        };

        let key = CacheKey {
            font_addr: font.data().as_ptr() as usize,
            font_len: font.data().len(),
            face_index: font.face_index(),
            text: text.to_string(),
        };
        {
            let mut guard = cache.lock();
            if let Some(hit) = guard.entries.get(&key).cloned() {
                guard.hits += 1;
                return Ok(hit);
            }
            guard.misses += 1;
        }

        let glyphs = self.shape_uncached(text, font)?;

        let mut guard = cache.lock();
        if guard.entries.len() >= CACHE_CAPACITY {
            log::debug!("Shaping cache full, starting over");
            guard.entries.clear();
        }
        guard.entries.insert(key, glyphs.clone());
        Ok(glyphs)
    }

    fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            *cache.lock() = ShapeCache::default();
        }
    }
}

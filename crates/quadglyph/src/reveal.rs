//! Text that appears a few characters per tick
//!
//! Each [`TextReveal::tick`] lays out a longer prefix of the same string
//! and streams it into the session's layout texture. Ticks are synchronous;
//! whatever the last tick wrote is what the next draw sees.

use quadglyph_core::{
    error::Result,
    traits::{TextureSurface, UniformSink},
};

use crate::session::TextSession;

/// Progressive reveal of one string
#[derive(Debug, Clone)]
pub struct TextReveal {
    text: String,
    /// Byte offset after each char, so prefixes never split a char
    ends: Vec<usize>,
    shown: usize,
    chars_per_tick: usize,
}

impl TextReveal {
    pub fn new(text: impl Into<String>, chars_per_tick: usize) -> Self {
        let text = text.into();
        let ends = text.char_indices().map(|(i, ch)| i + ch.len_utf8()).collect();
        Self {
            text,
            ends,
            shown: 0,
            chars_per_tick: chars_per_tick.max(1),
        }
    }

    /// The prefix currently on screen
    pub fn visible(&self) -> &str {
        let end = match self.shown {
            0 => 0,
            n => self.ends.get(n - 1).copied().unwrap_or(self.text.len()),
        };
        &self.text[..end]
    }

    pub fn shown_chars(&self) -> usize {
        self.shown
    }

    pub fn total_chars(&self) -> usize {
        self.ends.len()
    }

    pub fn is_done(&self) -> bool {
        self.shown >= self.ends.len()
    }

    /// Reveal the next characters and re-stream; `false` once complete
    ///
    /// A failed tick does not advance, so the next tick retries the same
    /// prefix.
    pub fn tick<S: TextureSurface + UniformSink>(
        &mut self,
        session: &mut TextSession<S>,
    ) -> Result<bool> {
        let next = (self.shown + self.chars_per_tick).min(self.ends.len());
        let previous = std::mem::replace(&mut self.shown, next);
        if let Err(e) = session.set_text(self.visible()) {
            self.shown = previous;
            return Err(e);
        }
        Ok(!self.is_done())
    }

    /// Start over from an empty prefix
    pub fn reset(&mut self) {
        self.shown = 0;
    }
}

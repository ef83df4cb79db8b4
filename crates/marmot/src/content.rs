//! The content catalog: names the renderer can be asked to draw.
//!
//! Glyphs are single-image textures; sprites are sheets of equally sized
//! frames. The engine only bookkeeps the names (the renderer owns the
//! actual resources), but registration is strict: colliding names fail
//! unless the caller explicitly opts into overwriting, because a silent
//! replacement usually means two assets were given the same key by
//! mistake.

use std::collections::{HashMap, HashSet};

use crate::error::StageError;

/// Frame dimensions of a registered sprite sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteSheet {
    /// Width of one frame in texels.
    pub frame_width: u32,
    /// Height of one frame in texels.
    pub frame_height: u32,
}

/// Registered drawable content, keyed by name.
#[derive(Debug, Default)]
pub struct ContentCatalog {
    glyphs: HashSet<String>,
    sprites: HashMap<String, SpriteSheet>,
}

impl ContentCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a glyph name.
    pub fn register_glyph(
        &mut self,
        name: impl Into<String>,
        overwrite: bool,
    ) -> Result<(), StageError> {
        let name = name.into();
        if !overwrite && self.glyphs.contains(&name) {
            return Err(StageError::DuplicateGlyph { name });
        }
        self.glyphs.insert(name);
        Ok(())
    }

    /// Register a sprite sheet with its frame dimensions.
    pub fn register_sprite(
        &mut self,
        name: impl Into<String>,
        frame_width: u32,
        frame_height: u32,
        overwrite: bool,
    ) -> Result<(), StageError> {
        let name = name.into();
        if !overwrite && self.sprites.contains_key(&name) {
            return Err(StageError::DuplicateSprite { name });
        }
        self.sprites.insert(
            name,
            SpriteSheet {
                frame_width,
                frame_height,
            },
        );
        Ok(())
    }

    /// Whether a glyph with this name is registered.
    pub fn has_glyph(&self, name: &str) -> bool {
        self.glyphs.contains(name)
    }

    /// Look up a sprite sheet by name.
    pub fn sprite(&self, name: &str) -> Option<SpriteSheet> {
        self.sprites.get(name).copied()
    }

    /// The number of registered glyphs.
    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// The number of registered sprites.
    pub fn sprite_count(&self) -> usize {
        self.sprites.len()
    }
}

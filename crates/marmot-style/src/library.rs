//! The style library: named styles for the current screen set.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::style::Style;

/// All styles available to the currently loaded screens, keyed by name.
///
/// The library is rebuilt when a screen set is loaded and merged into when
/// a single screen is hot-swapped. Registration rejects duplicate names
/// unless `overwrite` is passed, in which case the later registration wins.
#[derive(Debug, Default)]
pub struct StyleLibrary {
    styles: HashMap<String, Style>,
}

impl StyleLibrary {
    /// Create an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a style under its own name.
    ///
    /// Fails with [`Error::DuplicateStyle`] if the name is taken and
    /// `overwrite` is `false`.
    pub fn register(&mut self, style: Style, overwrite: bool) -> Result<()> {
        let name = style.name().to_string();
        if !overwrite && self.styles.contains_key(&name) {
            return Err(Error::DuplicateStyle { name });
        }
        tracing::debug!(target: "marmot::style", style = %name, overwrite, "registering style");
        self.styles.insert(name, style);
        Ok(())
    }

    /// Merge a batch of styles, overwriting existing names.
    ///
    /// Used on screen hot-swap, where redefinitions from the newly loaded
    /// source are intentional.
    pub fn merge(&mut self, styles: impl IntoIterator<Item = Style>) {
        for style in styles {
            // register with overwrite never fails
            let _ = self.register(style, true);
        }
    }

    /// Look up a style by name.
    pub fn get(&self, name: &str) -> Option<&Style> {
        self.styles.get(name)
    }

    /// Whether a style with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }

    /// The number of registered styles.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Whether the library is empty.
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Remove every style, e.g. before a full screen-set reload.
    pub fn clear(&mut self) {
        self.styles.clear();
    }
}

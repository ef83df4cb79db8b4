//! Screens: named root widgets and the loader seam.
//!
//! A screen is a named widget tree root. The screen table tracks every
//! loaded screen plus which one is current; the [`LayoutLoader`] trait is
//! the seam to the external markup parser, which builds widgets directly
//! into the tree and reports the screens and styles it found.

use std::collections::HashMap;

use marmot_style::Style;

use crate::error::StageError;
use crate::widget::{WidgetId, WidgetTree};

/// The product of loading a layout source: the screens it defined and the
/// styles discovered inside it (pulled out for the style library).
#[derive(Debug, Default)]
pub struct LoadedLayout {
    /// Screen name to root widget, in declaration order.
    pub screens: Vec<(String, WidgetId)>,
    /// Styles declared by the source.
    pub styles: Vec<Style>,
}

/// The external markup parser.
///
/// Implementations build widget nodes directly into `tree` (so the engine
/// owns them from the start) and return the roots and styles they
/// produced. The source format is entirely the loader's business.
pub trait LayoutLoader {
    /// Parse `source` and build its widgets into `tree`.
    fn load_layout(&mut self, tree: &mut WidgetTree, source: &str) -> LoadedLayout;
}

/// The table of loaded screens.
#[derive(Debug, Default)]
pub struct ScreenTable {
    screens: HashMap<String, WidgetId>,
    current: Option<String>,
}

impl ScreenTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a screen root under a name.
    ///
    /// Fails with [`StageError::DuplicateScreen`] when the name is taken
    /// and `overwrite` is `false`. With `overwrite`, the later
    /// registration wins and the previous root is returned so the caller
    /// can destroy it.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        root: WidgetId,
        overwrite: bool,
    ) -> Result<Option<WidgetId>, StageError> {
        let name = name.into();
        if !overwrite && self.screens.contains_key(&name) {
            return Err(StageError::DuplicateScreen { name });
        }
        tracing::debug!(target: "marmot::stage", screen = %name, overwrite, "registering screen");
        Ok(self.screens.insert(name, root))
    }

    /// Select the current screen.
    pub fn set_current(&mut self, name: &str) -> Result<WidgetId, StageError> {
        let root = self.get(name).ok_or_else(|| StageError::UnknownScreen {
            name: name.to_string(),
        })?;
        self.current = Some(name.to_string());
        Ok(root)
    }

    /// The current screen's name and root.
    pub fn current(&self) -> Option<(&str, WidgetId)> {
        let name = self.current.as_deref()?;
        let root = self.screens.get(name)?;
        Some((name, *root))
    }

    /// Look up a screen root by name.
    pub fn get(&self, name: &str) -> Option<WidgetId> {
        self.screens.get(name).copied()
    }

    /// Remove a screen, returning its root.
    pub fn remove(&mut self, name: &str) -> Option<WidgetId> {
        if self.current.as_deref() == Some(name) {
            self.current = None;
        }
        self.screens.remove(name)
    }

    /// The number of registered screens.
    pub fn len(&self) -> usize {
        self.screens.len()
    }

    /// Whether no screens are registered.
    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }

    /// Iterate over registered screen names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.screens.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::WidgetKind;

    #[test]
    fn duplicate_screen_registration_fails_without_overwrite() {
        let mut tree = WidgetTree::new();
        let a = tree.create(WidgetKind::Panel);
        let b = tree.create(WidgetKind::Panel);

        let mut screens = ScreenTable::new();
        screens.register("main", a, false).unwrap();
        assert!(matches!(
            screens.register("main", b, false),
            Err(StageError::DuplicateScreen { name }) if name == "main"
        ));
        assert_eq!(screens.get("main"), Some(a));
    }

    #[test]
    fn overwrite_returns_the_replaced_root() {
        let mut tree = WidgetTree::new();
        let a = tree.create(WidgetKind::Panel);
        let b = tree.create(WidgetKind::Panel);

        let mut screens = ScreenTable::new();
        screens.register("main", a, false).unwrap();
        let replaced = screens.register("main", b, true).unwrap();
        assert_eq!(replaced, Some(a));
        assert_eq!(screens.get("main"), Some(b));
    }

    #[test]
    fn current_screen_tracking() {
        let mut tree = WidgetTree::new();
        let a = tree.create(WidgetKind::Panel);

        let mut screens = ScreenTable::new();
        screens.register("main", a, false).unwrap();

        assert!(screens.current().is_none());
        assert!(matches!(
            screens.set_current("missing"),
            Err(StageError::UnknownScreen { .. })
        ));
        assert_eq!(screens.set_current("main").unwrap(), a);
        assert_eq!(screens.current(), Some(("main", a)));

        screens.remove("main");
        assert!(screens.current().is_none());
    }
}

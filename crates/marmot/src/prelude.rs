//! Prelude module for Marmot.
//!
//! Re-exports the most commonly used types for convenient importing:
//!
//! ```
//! use marmot::prelude::*;
//! ```

// ============================================================================
// Widget tree
// ============================================================================

pub use crate::widget::{
    Animation, BindingExpr, BindingSource, SizeChanged, WidgetContent, WidgetId, WidgetKind,
    WidgetNode, WidgetTree,
};

pub use crate::widget::animation::{Easing, ease, generate_bounce_profile};

// ============================================================================
// Stage driver
// ============================================================================

pub use crate::content::ContentCatalog;
pub use crate::error::{AnimationError, StageError, TreeError};
pub use crate::screen::{LayoutLoader, LoadedLayout, ScreenTable};
pub use crate::stage::Stage;

// ============================================================================
// Signals
// ============================================================================

pub use marmot_core::{ConnectionId, Signal};

// ============================================================================
// Geometry and rendering
// ============================================================================

pub use marmot_render::{Color, DrawCommand, Point, Rect, RecordingRenderer, Renderer, Size};

// ============================================================================
// Styling
// ============================================================================

pub use marmot_style::{
    EdgeInsets, HorizontalAlign, PropertyValue, Stretch, StretchMode, Style, StyleLibrary,
    VerticalAlign, WidgetProperty,
};

//! Error types for the widget tree engine.
//!
//! Only construction-time misconfiguration is surfaced as an error. Runtime
//! lookups that miss (an unregistered style name, a binding member the
//! context does not expose) are silent no-ops so that a half-authored
//! screen still renders every frame.

use crate::widget::WidgetId;

/// Errors from structural operations on the widget tree.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TreeError {
    /// The widget ID is invalid or the widget has been destroyed.
    #[error("invalid or destroyed widget id {0:?}")]
    InvalidWidget(WidgetId),

    /// The requested re-parenting would make a widget its own ancestor.
    #[error("cannot attach a widget beneath itself or one of its descendants")]
    CircularParentage,
}

/// Errors from animation construction.
///
/// Factories validate their parameters up front; a misconfigured animation
/// is rejected here rather than clamped or allowed to misbehave mid-frame.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum AnimationError {
    /// Bounce rate outside the supported range.
    #[error("bounce rate {rate} is out of range (expected 0 to 1000)")]
    RateOutOfRange {
        /// The rejected rate.
        rate: f32,
    },

    /// A finite animation was given a non-positive duration.
    #[error("duration must be greater than zero, got {duration}")]
    NonPositiveDuration {
        /// The rejected duration in seconds.
        duration: f32,
    },

    /// A scale animation was given a negative scale factor.
    #[error("scale factor must be non-negative, got {factor}")]
    NegativeScale {
        /// The rejected factor.
        factor: f32,
    },

    /// A profile-driven animation was given no samples to play back.
    #[error("animation profile must contain at least one sample")]
    EmptyProfile,

    /// A bounce profile decay outside `[0, 1)`.
    #[error("bounce decay {decay} is out of range (expected 0 inclusive to 1 exclusive)")]
    DecayOutOfRange {
        /// The rejected decay.
        decay: f32,
    },
}

/// Errors from the stage driver: screen and content registration.
#[derive(Debug, thiserror::Error)]
pub enum StageError {
    /// A screen with this name is already registered.
    #[error("screen '{name}' is already registered (pass overwrite to replace it)")]
    DuplicateScreen {
        /// The conflicting screen name.
        name: String,
    },

    /// A glyph with this name is already registered.
    #[error("glyph '{name}' is already registered (pass overwrite to replace it)")]
    DuplicateGlyph {
        /// The conflicting glyph name.
        name: String,
    },

    /// A sprite with this name is already registered.
    #[error("sprite '{name}' is already registered (pass overwrite to replace it)")]
    DuplicateSprite {
        /// The conflicting sprite name.
        name: String,
    },

    /// The named screen does not exist.
    #[error("unknown screen '{name}'")]
    UnknownScreen {
        /// The missing screen name.
        name: String,
    },

    /// A style error bubbled up from the library.
    #[error(transparent)]
    Style(#[from] marmot_style::Error),

    /// A tree error bubbled up from a structural operation.
    #[error(transparent)]
    Tree(#[from] TreeError),
}

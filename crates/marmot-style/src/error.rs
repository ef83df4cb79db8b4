//! Error types for the styling system.

/// Result type alias for style operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the styling system.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A style with this name is already registered.
    #[error("style '{name}' is already registered (pass overwrite to replace it)")]
    DuplicateStyle {
        /// The conflicting style name.
        name: String,
    },

    /// A property name that does not map to any widget property.
    #[error("unknown widget property '{name}'")]
    UnknownProperty {
        /// The unrecognized property name.
        name: String,
    },
}

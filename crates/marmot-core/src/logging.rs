//! Logging facilities for Marmot.
//!
//! Marmot uses the `tracing` crate for instrumentation. To see logs, install
//! a tracing subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt::init();
//! ```
//!
//! Log lines carry per-subsystem `target:` strings so they can be filtered
//! with `tracing` directives, e.g. `marmot::animation=trace`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "marmot_core";
    /// Signal emission target.
    pub const SIGNAL: &str = "marmot_core::signal";
    /// Widget tree structure target.
    pub const TREE: &str = "marmot::tree";
    /// Layout propagation target.
    pub const LAYOUT: &str = "marmot::layout";
    /// Style application target.
    pub const STYLE: &str = "marmot::style";
    /// Binding refresh target.
    pub const BINDING: &str = "marmot::binding";
    /// Animation scheduler target.
    pub const ANIMATION: &str = "marmot::animation";
    /// Screen table and stage driver target.
    pub const STAGE: &str = "marmot::stage";
}

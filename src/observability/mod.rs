//! Logging setup for the tool adapters
//!
//! The adapters emit structured events through `tracing`; hosts that embed
//! the crate can install their own subscriber instead of calling the
//! initializers here.

pub mod logging;

// Re-export for convenience
pub use logging::{init_default_logging, init_logging, LogFormat};

// Span macro for structured logging
pub use logging::tool_span;

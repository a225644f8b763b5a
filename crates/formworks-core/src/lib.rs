//! # formworks-core
//!
//! Core types for the formworks toolkit. This crate has no dependency on
//! the rest of the workspace and provides the foundation every other
//! crate builds on.
//!
//! ## Modules
//!
//! - [`error`] - Error types and the result alias
//! - [`id`] - Opaque identifiers for fields, forms, and share links
//! - [`settings`] - Toolkit settings loaded from file and environment
//! - [`logging`] - Tracing-based logging integration

pub mod error;
pub mod id;
pub mod logging;
pub mod settings;

// Re-export the most commonly used types at the crate root.
pub use error::{FormworksError, FormworksResult, ValidationError};
pub use id::{FieldId, FormId, ShareToken};
pub use settings::Settings;

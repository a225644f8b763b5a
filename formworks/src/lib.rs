//! # formworks
//!
//! A form-building toolkit for Rust.
//!
//! This is the meta-crate that re-exports all sub-crates for convenient
//! access. You can depend on `formworks` to get the whole toolkit, or
//! depend on individual crates for finer-grained control.
//!
//! The shape of the toolkit, leaf-first:
//!
//! - a closed **field type registry** mapping each kind tag to its
//!   behavior bundle (construct, validate, render hooks);
//! - the **form document model**, an ordered field list serialized to one
//!   opaque text blob;
//! - the **designer state machine**, which owns the live list during
//!   editing and resolves drag-and-drop gestures into list mutations;
//! - the **submission renderer and validator**, which replays a persisted
//!   document as a fillable form;
//! - the async **persistence collaborator** seam the sessions push to.

/// Core types: errors, identifiers, settings, and logging.
pub use formworks_core as core;

/// The field type registry: kinds, attribute schemas, behavior bundles,
/// and render hooks.
pub use formworks_elements as elements;

/// The form document model and its storage blob format.
pub use formworks_document as document;

/// The designer state machine and drop-zone resolution.
pub use formworks_designer as designer;

/// The submission renderer and validator.
pub use formworks_submit as submit;

/// Form and submission records, the async store trait, and the in-memory
/// reference store.
pub use formworks_store as store;

/// Session glue: the editing session and the shared-link visitor flow.
pub use formworks_builder as builder;

// Third-party re-exports for user convenience.
pub use serde;
pub use serde_json;
pub use tracing;

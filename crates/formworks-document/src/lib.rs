//! # formworks-document
//!
//! The form document model: an ordered sequence of field instances whose
//! insertion order is the authoritative visual top-to-bottom order, plus
//! the (de)serialization to the opaque text blob a form record stores.
//!
//! ## Modules
//!
//! - [`document`] - [`FormDocument`](document::FormDocument) and its list operations
//! - [`storage`] - the storage blob format and round-trip guarantees

pub mod document;
pub mod storage;

pub use document::FormDocument;

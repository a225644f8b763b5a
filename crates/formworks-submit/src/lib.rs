//! # formworks-submit
//!
//! The submission side of a form's life: walking a persisted document,
//! rendering each field as an interactive input, collecting committed
//! values into a value map, and validating the map against the registry
//! before the submission leaves the page.

pub mod session;

pub use session::SubmitSession;

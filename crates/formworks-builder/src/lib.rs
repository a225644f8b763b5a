//! # formworks-builder
//!
//! The glue between the synchronous core and the asynchronous
//! persistence collaborator: one [`BuilderSession`](session::BuilderSession)
//! per form-editing session (eager in-memory mutations, explicit save,
//! irreversible publish), and the visitor flow that turns a share token
//! into a fillable [`SubmitSession`](formworks_submit::SubmitSession).
//!
//! ## Modules
//!
//! - [`session`] - the editing session
//! - [`visit`] - the shared-link visitor flow

pub mod session;
pub mod visit;

pub use session::BuilderSession;
pub use visit::{open_shared, submit_shared};

//! # formworks-designer
//!
//! The designer state machine: the live ordered field list during
//! editing, selection tracking, and the drop-zone resolution algorithm
//! that turns drag gestures into list mutations.
//!
//! The state machine is purely synchronous and single-threaded. Every
//! operation is an atomic, total function over the in-memory list: no
//! partial states are observable, and no locking exists because one
//! editing session owns its state exclusively.
//!
//! ## Modules
//!
//! - [`state`] - [`DesignerState`](state::DesignerState) and its operations
//! - [`dragdrop`] - drag descriptors and the pure resolution algorithm

pub mod dragdrop;
pub mod state;

pub use dragdrop::{resolve_drop, DragSource, DropTarget, Half, Mutation};
pub use state::DesignerState;

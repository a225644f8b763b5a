//! Drop-zone resolution: translating drag gestures into list mutations.
//!
//! A drag gesture is a single synchronous start → (move)* → end/cancel
//! sequence; only the end event reaches this module. Intermediate move
//! events affect hover highlighting only, so a cancelled gesture needs no
//! rollback. Resolution is a pure function over descriptors (no pointer
//! events, no timers), which is what makes the two-phase reorder commit
//! directly unit-testable.
//!
//! Each rendered field exposes two drop targets, the top and bottom half
//! of its bounding box; the palette exposes drag sources only; the canvas
//! empty area is a target only (reachable in practice when the list is
//! empty, since a populated canvas is tiled edge-to-edge by field
//! targets).

use tracing::warn;

use formworks_core::error::{FormworksError, FormworksResult};
use formworks_core::id::FieldId;
use formworks_elements::{FieldInstance, FieldKind, FieldRegistry};

use crate::state::DesignerState;

/// Which half of a field's bounding box a drop landed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Half {
    /// Upper half: insert before the field.
    Top,
    /// Lower half: insert after the field.
    Bottom,
}

/// What is being dragged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragSource {
    /// A palette button for the given kind; dropping constructs a fresh
    /// instance.
    PaletteButton {
        /// The kind the button creates.
        kind: FieldKind,
    },
    /// The drag handle of a field already on the canvas; dropping
    /// repositions it.
    CanvasField {
        /// Id of the dragged field.
        id: FieldId,
    },
}

/// Where the drop landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// The canvas-level empty-area target.
    CanvasArea,
    /// The top or bottom half of a rendered field.
    FieldHalf {
        /// Id of the field whose half was hit.
        id: FieldId,
        /// Which half.
        half: Half,
    },
}

/// The mutation a resolved gesture commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Insert a freshly constructed instance at `index`.
    Insert {
        /// Insertion position in the current list.
        index: usize,
        /// The new instance (id already generated).
        instance: Box<FieldInstance>,
    },
    /// Move an existing field: remove it, then insert at `index`.
    ///
    /// `index` is computed against the post-removal list: removing the
    /// dragged element before computing the target index is what prevents
    /// an off-by-one when the element is dragged downward past its own
    /// position.
    Reorder {
        /// Id of the field being moved.
        id: FieldId,
        /// Insertion position in the list with the field removed.
        index: usize,
    },
    /// No mutation (cancelled drag, drop outside any target, or a
    /// source/target pairing with no meaning).
    None,
}

/// Resolves a drag-end into the mutation it commits.
///
/// Cases are evaluated in priority order:
///
/// 1. Palette button over the canvas area: construct and append.
/// 2. Palette button over a field half: construct and insert before
///    (top) or after (bottom) that field.
/// 3. Canvas field over a field half: reorder, with the insertion index
///    computed against the post-removal list. Dropping a field onto its
///    own half resolves to its current position, a legal no-op.
/// 4. Anything else resolves to [`Mutation::None`].
///
/// A descriptor naming a field id that is no longer present fails with
/// [`FormworksError::ElementNotFound`]; callers abort the gesture
/// (unreachable in the single-threaded model, checked defensively).
pub fn resolve_drop(
    state: &DesignerState,
    source: &DragSource,
    target: Option<&DropTarget>,
) -> FormworksResult<Mutation> {
    let Some(target) = target else {
        return Ok(Mutation::None);
    };

    match (source, target) {
        (DragSource::PaletteButton { kind }, DropTarget::CanvasArea) => {
            let instance = construct_fresh(*kind)?;
            Ok(Mutation::Insert {
                index: state.len(),
                instance: Box::new(instance),
            })
        }

        (DragSource::PaletteButton { kind }, DropTarget::FieldHalf { id, half }) => {
            let over = state
                .document()
                .position(id)
                .ok_or_else(|| FormworksError::ElementNotFound(id.to_string()))?;
            let instance = construct_fresh(*kind)?;
            Ok(Mutation::Insert {
                index: insertion_index(over, *half),
                instance: Box::new(instance),
            })
        }

        (DragSource::CanvasField { id: active }, DropTarget::FieldHalf { id: over, half }) => {
            let document = state.document();
            let active_pos = document
                .position(active)
                .ok_or_else(|| FormworksError::ElementNotFound(active.to_string()))?;

            if active == over {
                // Self-drop: both halves resolve to the current position,
                // leaving the list unchanged.
                return Ok(Mutation::Reorder {
                    id: active.clone(),
                    index: active_pos,
                });
            }

            let over_pos = document
                .position(over)
                .ok_or_else(|| FormworksError::ElementNotFound(over.to_string()))?;
            // Index of the target once the dragged element is gone.
            let over_post_removal = if over_pos > active_pos {
                over_pos - 1
            } else {
                over_pos
            };
            Ok(Mutation::Reorder {
                id: active.clone(),
                index: insertion_index(over_post_removal, *half),
            })
        }

        _ => Ok(Mutation::None),
    }
}

fn construct_fresh(kind: FieldKind) -> FormworksResult<FieldInstance> {
    let behavior = FieldRegistry::global().lookup(kind)?;
    Ok(behavior.construct(FieldId::generate()))
}

const fn insertion_index(over: usize, half: Half) -> usize {
    match half {
        Half::Top => over,
        Half::Bottom => over + 1,
    }
}

impl DesignerState {
    /// Executes a resolved mutation.
    ///
    /// `Reorder` is the two-phase commit: remove first, insert second, in
    /// that order, so the index computed by [`resolve_drop`] lands where
    /// it was aimed.
    pub fn apply(&mut self, mutation: Mutation) -> FormworksResult<()> {
        match mutation {
            Mutation::Insert { index, instance } => self.add_element(index, *instance),
            Mutation::Reorder { id, index } => {
                let instance = self
                    .document_mut()
                    .remove(&id)
                    .ok_or_else(|| FormworksError::ElementNotFound(id.to_string()))?;
                self.document_mut().insert(index, instance)
            }
            Mutation::None => Ok(()),
        }
    }

    /// Resolves and applies a drag-end in one step.
    ///
    /// Returns `true` when a mutation was applied (a self-drop applies a
    /// reorder that leaves the list identical). An `ElementNotFound` from
    /// either phase aborts the gesture: it is logged and the state is
    /// left untouched, with no user-visible effect.
    pub fn complete_drag(
        &mut self,
        source: &DragSource,
        target: Option<&DropTarget>,
    ) -> FormworksResult<bool> {
        let mutation = match resolve_drop(self, source, target) {
            Ok(Mutation::None) => return Ok(false),
            Ok(mutation) => mutation,
            Err(FormworksError::ElementNotFound(id)) => {
                warn!(element = %id, "drag target vanished; gesture aborted");
                return Ok(false);
            }
            Err(e) => return Err(e),
        };
        match self.apply(mutation) {
            Ok(()) => Ok(true),
            Err(FormworksError::ElementNotFound(id)) => {
                warn!(element = %id, "drag source vanished; gesture aborted");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}

//! The async store trait the toolkit calls through.

use async_trait::async_trait;

use formworks_core::error::{FormworksError, FormworksResult};
use formworks_core::id::{FormId, ShareToken};

use crate::records::{Form, FormStats, Submission};

/// Minimum length of a form name.
pub const MIN_FORM_NAME_LEN: usize = 4;

/// Validates a form name. Shared by every store implementation so the
/// rule cannot drift between backends.
pub fn validate_form_name(name: &str) -> FormworksResult<()> {
    if name.chars().count() < MIN_FORM_NAME_LEN {
        return Err(FormworksError::validation(
            format!("Form name must contain at least {MIN_FORM_NAME_LEN} characters."),
            "min_length",
        ));
    }
    Ok(())
}

/// The persistence collaborator contract.
///
/// Every method is an asynchronous I/O call the toolkit must tolerate
/// arbitrary latency on. Callers never mutate the authoritative stored
/// copy optimistically: the in-memory designer state is the only thing
/// mutated eagerly, and an explicit save pushes it here.
///
/// All implementations must be `Send + Sync` so one store can back many
/// concurrent sessions.
#[async_trait]
pub trait FormStore: Send + Sync {
    /// Creates a form with an empty document.
    ///
    /// Fails with a validation error when `name` is shorter than
    /// [`MIN_FORM_NAME_LEN`] characters.
    async fn create_form(&self, name: &str, description: &str) -> FormworksResult<FormId>;

    /// Loads a form record, or [`FormworksError::NotFound`].
    async fn load_form(&self, id: FormId) -> FormworksResult<Form>;

    /// Overwrites a form's content blob.
    ///
    /// Fails with [`FormworksError::NotFound`] for an unknown id and with
    /// [`FormworksError::Frozen`] when the form is published. The
    /// document is read-only after publishing, and rejecting the write is
    /// the documented policy (not a silent no-op).
    async fn save_content(&self, id: FormId, content: &str) -> FormworksResult<()>;

    /// Marks a form published. Irreversible; idempotent when already
    /// published.
    async fn publish(&self, id: FormId) -> FormworksResult<()>;

    /// Loads the content blob behind a share token and increments the
    /// visit counter.
    ///
    /// Every load counts; there are deliberately no idempotent-visit
    /// semantics.
    async fn load_by_share_token(&self, token: &ShareToken) -> FormworksResult<String>;

    /// Records a submission for the form behind a share token:
    /// atomically increments the submission counter and appends an
    /// immutable [`Submission`].
    ///
    /// Only published forms accept submissions; an unpublished form's
    /// token behaves as [`FormworksError::NotFound`].
    async fn submit(&self, token: &ShareToken, values: &str) -> FormworksResult<()>;

    /// All forms, newest first.
    async fn list_forms(&self) -> FormworksResult<Vec<Form>>;

    /// Submissions received for one form, oldest first.
    async fn submissions(&self, id: FormId) -> FormworksResult<Vec<Submission>>;

    /// Aggregate visit/submission statistics across all forms.
    async fn stats(&self) -> FormworksResult<FormStats>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_length_rule() {
        assert!(validate_form_name("abc").is_err());
        assert!(validate_form_name("abcd").is_ok());
        // Multibyte names count characters, not bytes.
        assert!(validate_form_name("опрос").is_ok());
        assert!(validate_form_name("да").is_err());
    }
}

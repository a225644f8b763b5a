//! Stored records: forms, submissions, and aggregate statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use formworks_core::id::{FormId, ShareToken};

/// One form record.
///
/// The toolkit reads `content` out of this container and writes it back
/// in; everything else is bookkeeping owned by the store. `content` holds
/// the serialized form document as one opaque text blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Form {
    /// Internal primary key.
    pub id: FormId,
    /// Display name (at least 4 characters).
    pub name: String,
    /// Optional description.
    pub description: String,
    /// The serialized form document.
    pub content: String,
    /// Whether the form has been published. Irreversible; a published
    /// form's content is frozen.
    pub published: bool,
    /// Public token behind the shareable submission link.
    pub share_token: ShareToken,
    /// Number of times the shared form was loaded.
    pub visits: u64,
    /// Number of submissions received.
    pub submissions: u64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// One received submission. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    /// The form this submission belongs to.
    pub form_id: FormId,
    /// The serialized value map (`{fieldId: value}`).
    pub content: String,
    /// When the submission was received.
    pub submitted_at: DateTime<Utc>,
}

/// Aggregate visit/submission statistics across forms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FormStats {
    /// Total visits across all forms.
    pub visits: u64,
    /// Total submissions across all forms.
    pub submissions: u64,
    /// Share of visits that submitted, in percent.
    pub submission_rate: f64,
    /// Share of visits that left without submitting, in percent.
    pub bounce_rate: f64,
}

impl FormStats {
    /// Computes rates from raw totals.
    ///
    /// With zero visits the submission rate is zero (and the bounce rate
    /// therefore 100).
    pub fn from_totals(visits: u64, submissions: u64) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let submission_rate = if visits > 0 {
            submissions as f64 / visits as f64 * 100.0
        } else {
            0.0
        };
        Self {
            visits,
            submissions,
            submission_rate,
            bounce_rate: 100.0 - submission_rate,
        }
    }
}

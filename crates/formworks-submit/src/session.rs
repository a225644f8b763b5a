//! One visitor's pass over a shared form.

use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use formworks_core::error::{FormworksError, FormworksResult, ValidationError};
use formworks_core::id::FieldId;
use formworks_document::FormDocument;
use formworks_elements::{FieldRegistry, InteractiveContext};

/// The filling-and-submitting state machine for one visitor session.
///
/// The document is read-only here; the session owns only the local value
/// map (keyed by field id), the invalid-id set from the last rejected
/// attempt, and the terminal submitted flag. Interactive controls commit
/// values on blur/change (checkbox and select on toggle) through
/// [`set_value`](Self::set_value), never per keystroke.
#[derive(Debug)]
pub struct SubmitSession {
    document: FormDocument,
    values: BTreeMap<FieldId, String>,
    invalid: HashSet<FieldId>,
    submitted: bool,
}

impl SubmitSession {
    /// Starts a fresh session over a document.
    pub fn new(document: FormDocument) -> Self {
        Self {
            document,
            values: BTreeMap::new(),
            invalid: HashSet::new(),
            submitted: false,
        }
    }

    /// Re-creates a session showing a partially-invalid attempt: the
    /// values entered so far plus the ids that failed validation.
    pub fn with_attempt(
        document: FormDocument,
        values: BTreeMap<FieldId, String>,
        invalid: HashSet<FieldId>,
    ) -> Self {
        Self {
            document,
            values,
            invalid,
            submitted: false,
        }
    }

    /// The document being filled.
    pub const fn document(&self) -> &FormDocument {
        &self.document
    }

    /// Commits a field value into the local value map.
    ///
    /// This is the submit callback threaded into every interactive
    /// control. Committing a value clears the field's invalid mark so the
    /// visitor sees the correction immediately. Ignored once the session
    /// has reached its terminal submitted state.
    pub fn set_value(&mut self, id: FieldId, value: impl Into<String>) {
        if self.submitted {
            debug!(field = %id, "value committed after submission; ignored");
            return;
        }
        self.invalid.remove(&id);
        self.values.insert(id, value.into());
    }

    /// The committed value of a field, if any.
    pub fn value(&self, id: &FieldId) -> Option<&str> {
        self.values.get(id).map(String::as_str)
    }

    /// Ids that failed the last submission attempt.
    pub const fn invalid_ids(&self) -> &HashSet<FieldId> {
        &self.invalid
    }

    /// Returns `true` once the session has submitted successfully.
    pub const fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Validates the value map and serializes it for persistence,
    /// without leaving the filling state.
    ///
    /// Every instance is validated against its committed value (missing
    /// values validate as the empty string). When any field fails, the
    /// failing ids are stored for re-rendering and a recoverable
    /// validation error is returned; the visitor corrects and retries.
    ///
    /// The caller sends the returned blob to the persistence collaborator
    /// and calls [`mark_submitted`](Self::mark_submitted) once the send
    /// succeeds; a failed send leaves the session filling so the visitor
    /// may retry.
    pub fn prepare_submission(&mut self) -> FormworksResult<String> {
        if self.submitted {
            return Ok(self.serialized_values());
        }

        let registry = FieldRegistry::global();
        let mut failing = HashSet::new();
        for instance in &self.document {
            let behavior = registry.lookup(instance.kind)?;
            let raw = self.value(&instance.id).unwrap_or("");
            if !behavior.validate(instance, raw) {
                failing.insert(instance.id.clone());
            }
        }

        if !failing.is_empty() {
            let attribute_errors = failing
                .iter()
                .map(|id| {
                    (
                        id.to_string(),
                        vec![ValidationError::new("This field is required.", "required")],
                    )
                })
                .collect();
            self.invalid = failing;
            return Err(FormworksError::Validation(
                ValidationError::with_attribute_errors(attribute_errors),
            ));
        }

        Ok(self.serialized_values())
    }

    /// Transitions to the terminal submitted state. No further edits are
    /// possible; the page renders the thank-you panel from here on.
    pub fn mark_submitted(&mut self) {
        self.submitted = true;
    }

    /// Validates, serializes, and transitions to the terminal submitted
    /// state in one step: the store-less path for flows that persist the
    /// blob themselves.
    pub fn submit(&mut self) -> FormworksResult<String> {
        let blob = self.prepare_submission()?;
        self.mark_submitted();
        Ok(blob)
    }

    /// Serializes the committed value map as the submission content blob.
    pub fn serialized_values(&self) -> String {
        let map: BTreeMap<&str, &str> = self
            .values
            .iter()
            .map(|(id, value)| (id.as_str(), value.as_str()))
            .collect();
        serde_json::to_string(&map).expect("value map serialization is infallible")
    }

    /// Renders the whole page: every instance's interactive control with
    /// its committed value and invalid mark, plus the submit button, or
    /// the terminal thank-you panel once submitted.
    pub fn render_page(&self) -> FormworksResult<String> {
        if self.submitted {
            return Ok(concat!(
                r#"<div class="submitted"><h1>Form submitted</h1>"#,
                r#"<p>Thank you for filling in the form. You can close this page now.</p></div>"#
            )
            .to_string());
        }

        let registry = FieldRegistry::global();
        let mut out = String::from(r#"<div class="submit-form">"#);
        for instance in &self.document {
            let behavior = registry.lookup(instance.kind)?;
            let ctx = InteractiveContext {
                value: self.value(&instance.id),
                invalid: self.invalid.contains(&instance.id),
            };
            out.push_str(&behavior.render_interactive(instance, &ctx));
        }
        out.push_str(r#"<button type="submit" class="submit">Submit</button></div>"#);
        Ok(out)
    }
}

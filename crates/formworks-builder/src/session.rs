//! One form-editing session.

use std::sync::Arc;

use tracing::{debug, warn};

use formworks_core::error::{FormworksError, FormworksResult};
use formworks_core::id::{FormId, ShareToken};
use formworks_core::logging::session_span;
use formworks_designer::DesignerState;
use formworks_document::FormDocument;
use formworks_elements::FieldRegistry;
use formworks_store::FormStore;

/// The editing session of one form: the in-memory designer state plus
/// the calls that push it to storage.
///
/// Mutations are applied eagerly to the in-memory designer only; nothing
/// reaches the authoritative stored copy until an explicit
/// [`save`](Self::save); there is no autosave. A save or publish already
/// in flight is not re-triggered (a simple guard, not a queue), and a
/// store failure surfaces as a recoverable error while the in-memory
/// state stays untouched, so the user can retry.
///
/// One session assumes exclusive single-threaded access; concurrent
/// sessions against the same form are last-write-wins by design.
pub struct BuilderSession {
    store: Arc<dyn FormStore>,
    form_id: FormId,
    share_token: ShareToken,
    designer: DesignerState,
    published: bool,
    saving: bool,
    publishing: bool,
}

impl std::fmt::Debug for BuilderSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuilderSession")
            .field("form_id", &self.form_id)
            .field("share_token", &self.share_token)
            .field("designer", &self.designer)
            .field("published", &self.published)
            .field("saving", &self.saving)
            .field("publishing", &self.publishing)
            .finish_non_exhaustive()
    }
}

impl BuilderSession {
    /// Opens an editing session: loads the form record and deserializes
    /// its content into a designer state.
    ///
    /// `NotFound`, `CorruptDocument`, and `UnknownFieldKind` bubble up:
    /// they are page-level errors, not something the session recovers
    /// from.
    pub async fn open(store: Arc<dyn FormStore>, form_id: FormId) -> FormworksResult<Self> {
        let form = store.load_form(form_id).await?;
        let document = FormDocument::from_storage(&form.content)?;
        Ok(Self {
            store,
            form_id,
            share_token: form.share_token,
            designer: DesignerState::from_document(document),
            published: form.published,
            saving: false,
            publishing: false,
        })
    }

    /// The form being edited.
    pub const fn form_id(&self) -> FormId {
        self.form_id
    }

    /// The public token of this form's submission link.
    pub const fn share_token(&self) -> &ShareToken {
        &self.share_token
    }

    /// Whether the form has been published (and is therefore read-only).
    pub const fn is_published(&self) -> bool {
        self.published
    }

    /// Read access to the designer state.
    pub const fn designer(&self) -> &DesignerState {
        &self.designer
    }

    /// Mutable access to the designer state.
    ///
    /// Fails with [`FormworksError::Frozen`] once the form is published;
    /// the document may only be mutated while unpublished.
    pub fn designer_mut(&mut self) -> FormworksResult<&mut DesignerState> {
        if self.published {
            return Err(FormworksError::Frozen(self.form_id.to_string()));
        }
        Ok(&mut self.designer)
    }

    /// Pushes the in-memory layout to storage.
    ///
    /// Returns `Ok(false)` when a save is already in flight (the
    /// re-trigger is skipped, not queued). A store failure is returned to
    /// the caller for a transient toast; the in-memory layout is never
    /// reverted.
    pub async fn save(&mut self) -> FormworksResult<bool> {
        let span = session_span(&self.form_id.to_string());
        let _guard = span.enter();

        if self.saving {
            debug!("save already in flight; skipped");
            return Ok(false);
        }
        if self.published {
            return Err(FormworksError::Frozen(self.form_id.to_string()));
        }

        self.saving = true;
        let blob = self.designer.document().to_storage();
        let result = self.store.save_content(self.form_id, &blob).await;
        self.saving = false;

        match result {
            Ok(()) => {
                debug!(elements = self.designer.len(), "layout saved");
                Ok(true)
            }
            Err(e) => {
                warn!(error = %e, "saving layout failed; in-memory state kept");
                Err(e)
            }
        }
    }

    /// Publishes the form, freezing its stored content.
    ///
    /// Irreversible. Saving is a separate, explicit step; publish does
    /// not flush unsaved layout changes. Returns `Ok(false)` when a
    /// publish is already in flight.
    pub async fn publish(&mut self) -> FormworksResult<bool> {
        let span = session_span(&self.form_id.to_string());
        let _guard = span.enter();

        if self.publishing {
            debug!("publish already in flight; skipped");
            return Ok(false);
        }

        self.publishing = true;
        let result = self.store.publish(self.form_id).await;
        self.publishing = false;

        match result {
            Ok(()) => {
                self.published = true;
                Ok(true)
            }
            Err(e) => {
                warn!(error = %e, "publishing failed");
                Err(e)
            }
        }
    }

    /// Renders the read-only designer previews of the current layout, in
    /// visual order.
    pub fn preview_html(&self) -> FormworksResult<String> {
        let registry = FieldRegistry::global();
        let mut out = String::from(r#"<div class="canvas">"#);
        for instance in self.designer.document() {
            let behavior = registry.lookup(instance.kind)?;
            out.push_str(&behavior.render_designer_preview(instance));
        }
        out.push_str("</div>");
        Ok(out)
    }

    /// Renders the property editor of the selected element, or `None`
    /// when nothing is selected.
    pub fn property_editor_html(&self) -> FormworksResult<Option<String>> {
        let Some(instance) = self.designer.selected_element() else {
            return Ok(None);
        };
        let behavior = FieldRegistry::global().lookup(instance.kind)?;
        Ok(Some(behavior.render_property_editor(instance)))
    }
}

//! Integration tests for the full create → design → publish → submit
//! pipeline, covering:
//! 1. The end-to-end life of one form (design, save, publish, visit, submit)
//! 2. Drag-driven layout editing against a live session
//! 3. Failure paths: transient store errors, frozen documents, corrupt blobs

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use formworks_builder::{open_shared, submit_shared, BuilderSession};
use formworks_core::error::{FormworksError, FormworksResult};
use formworks_core::id::{FieldId, FormId, ShareToken};
use formworks_designer::{DragSource, DropTarget, Half};
use formworks_document::FormDocument;
use formworks_elements::{fields, FieldKind};
use formworks_store::{Form, FormStats, FormStore, MemoryStore, Submission};

// ============================================================================
// Shared helpers
// ============================================================================

/// A store wrapper that can be switched to fail writes, for exercising
/// the transient-failure paths.
struct FlakyStore {
    inner: MemoryStore,
    fail_writes: AtomicBool,
}

impl FlakyStore {
    fn new() -> Self {
        Self {
            inner: MemoryStore::new(),
            fail_writes: AtomicBool::new(false),
        }
    }

    fn set_failing(&self, failing: bool) {
        self.fail_writes.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> FormworksResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(FormworksError::Storage("connection reset".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl FormStore for FlakyStore {
    async fn create_form(&self, name: &str, description: &str) -> FormworksResult<FormId> {
        self.check()?;
        self.inner.create_form(name, description).await
    }

    async fn load_form(&self, id: FormId) -> FormworksResult<Form> {
        self.inner.load_form(id).await
    }

    async fn save_content(&self, id: FormId, content: &str) -> FormworksResult<()> {
        self.check()?;
        self.inner.save_content(id, content).await
    }

    async fn publish(&self, id: FormId) -> FormworksResult<()> {
        self.check()?;
        self.inner.publish(id).await
    }

    async fn load_by_share_token(&self, token: &ShareToken) -> FormworksResult<String> {
        self.inner.load_by_share_token(token).await
    }

    async fn submit(&self, token: &ShareToken, values: &str) -> FormworksResult<()> {
        self.check()?;
        self.inner.submit(token, values).await
    }

    async fn list_forms(&self) -> FormworksResult<Vec<Form>> {
        self.inner.list_forms().await
    }

    async fn submissions(&self, id: FormId) -> FormworksResult<Vec<Submission>> {
        self.inner.submissions(id).await
    }

    async fn stats(&self) -> FormworksResult<FormStats> {
        self.inner.stats().await
    }
}

fn palette(kind: FieldKind) -> DragSource {
    DragSource::PaletteButton { kind }
}

// ============================================================================
// End-to-end pipeline
// ============================================================================

#[tokio::test]
async fn test_full_form_lifecycle() {
    let store = Arc::new(MemoryStore::new());

    // Create and open.
    let form_id = store
        .create_form("Customer survey", "How did we do?")
        .await
        .unwrap();
    let mut session = BuilderSession::open(store.clone() as Arc<dyn FormStore>, form_id)
        .await
        .unwrap();

    // Design: a title, then a required text field below it.
    {
        let designer = session.designer_mut().unwrap();
        designer
            .complete_drag(&palette(FieldKind::Title), Some(&DropTarget::CanvasArea))
            .unwrap();
        designer
            .complete_drag(&palette(FieldKind::Text), Some(&DropTarget::CanvasArea))
            .unwrap();

        let text_id = designer.elements()[1].id.clone();
        let mut edited = designer.elements()[1].clone();
        edited.attributes.insert(fields::attr::LABEL, "Your name");
        edited.attributes.insert(fields::attr::REQUIRED, true);
        designer.update_element(&text_id, edited).unwrap();
    }

    // Save and publish.
    assert!(session.save().await.unwrap());
    assert!(session.publish().await.unwrap());

    // The visitor opens the shared link (counting a visit) and first
    // submits an empty form: rejected locally with exactly one invalid id.
    let token = session.share_token().clone();
    let mut visit = open_shared(store.as_ref(), &token).await.unwrap();
    let err = submit_shared(store.as_ref(), &token, &mut visit)
        .await
        .unwrap_err();
    assert!(matches!(err, FormworksError::Validation(_)));
    assert_eq!(visit.invalid_ids().len(), 1);

    // Correcting the field makes the submission go through.
    let field_id = visit.document().elements()[1].id.clone();
    visit.set_value(field_id.clone(), "Alice");
    submit_shared(store.as_ref(), &token, &mut visit)
        .await
        .unwrap();
    assert!(visit.is_submitted());

    // The stored submission carries the value map keyed by field id.
    let submissions = store.submissions(form_id).await.unwrap();
    assert_eq!(submissions.len(), 1);
    assert_eq!(
        submissions[0].content,
        format!(r#"{{"{field_id}":"Alice"}}"#)
    );

    // Counters and aggregate stats reflect the one visit and submission.
    let form = store.load_form(form_id).await.unwrap();
    assert_eq!(form.visits, 1);
    assert_eq!(form.submissions, 1);
    let stats = store.stats().await.unwrap();
    assert!((stats.submission_rate - 100.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_layout_editing_with_halves_round_trips() {
    let store = Arc::new(MemoryStore::new());
    let form_id = store.create_form("Layout form", "").await.unwrap();
    let mut session = BuilderSession::open(store.clone() as Arc<dyn FormStore>, form_id)
        .await
        .unwrap();

    {
        let designer = session.designer_mut().unwrap();
        designer
            .complete_drag(&palette(FieldKind::Text), Some(&DropTarget::CanvasArea))
            .unwrap();
        designer
            .complete_drag(&palette(FieldKind::Date), Some(&DropTarget::CanvasArea))
            .unwrap();

        // Drop a separator on the date field's top half: it lands between.
        let date_id = designer.elements()[1].id.clone();
        designer
            .complete_drag(
                &palette(FieldKind::Separator),
                Some(&DropTarget::FieldHalf {
                    id: date_id,
                    half: Half::Top,
                }),
            )
            .unwrap();

        let kinds: Vec<FieldKind> = designer.elements().iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            [FieldKind::Text, FieldKind::Separator, FieldKind::Date]
        );

        // Reorder: drag the text field below the date field.
        let text_id = designer.elements()[0].id.clone();
        let date_id = designer.elements()[2].id.clone();
        designer
            .complete_drag(
                &DragSource::CanvasField { id: text_id },
                Some(&DropTarget::FieldHalf {
                    id: date_id,
                    half: Half::Bottom,
                }),
            )
            .unwrap();

        let kinds: Vec<FieldKind> = designer.elements().iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            [FieldKind::Separator, FieldKind::Date, FieldKind::Text]
        );
    }

    // The layout survives a save/reload cycle unchanged.
    session.save().await.unwrap();
    let reopened = BuilderSession::open(store as Arc<dyn FormStore>, form_id)
        .await
        .unwrap();
    assert_eq!(
        reopened.designer().document(),
        session.designer().document()
    );
}

// ============================================================================
// Failure paths
// ============================================================================

#[tokio::test]
async fn test_transient_save_failure_keeps_memory_and_allows_retry() {
    let store = Arc::new(FlakyStore::new());
    let form_id = store.create_form("Flaky form", "").await.unwrap();
    let mut session = BuilderSession::open(store.clone() as Arc<dyn FormStore>, form_id)
        .await
        .unwrap();

    session
        .designer_mut()
        .unwrap()
        .complete_drag(&palette(FieldKind::Paragraph), Some(&DropTarget::CanvasArea))
        .unwrap();

    store.set_failing(true);
    let err = session.save().await.unwrap_err();
    assert!(err.is_recoverable());
    // In-memory layout is untouched by the failure...
    assert_eq!(session.designer().len(), 1);
    // ...and the stored copy was not partially written.
    assert_eq!(store.load_form(form_id).await.unwrap().content, "[]");

    // The retry succeeds once the store recovers.
    store.set_failing(false);
    assert!(session.save().await.unwrap());
    assert!(store
        .load_form(form_id)
        .await
        .unwrap()
        .content
        .contains("ParagraphField"));
}

#[tokio::test]
async fn test_transient_submit_failure_keeps_session_fillable() {
    let store = FlakyStore::new();
    let form_id = store.create_form("Flaky survey", "").await.unwrap();
    let field = fields::construct(FieldKind::Text, FieldId::from("txt00001"));
    let blob = FormDocument::from_elements(vec![field]).unwrap().to_storage();
    store.save_content(form_id, &blob).await.unwrap();
    store.publish(form_id).await.unwrap();
    let token = store.load_form(form_id).await.unwrap().share_token;

    let mut visit = open_shared(&store, &token).await.unwrap();
    visit.set_value(FieldId::from("txt00001"), "Bob");

    store.set_failing(true);
    let err = submit_shared(&store, &token, &mut visit).await.unwrap_err();
    assert!(matches!(err, FormworksError::Storage(_)));
    assert!(!visit.is_submitted());

    store.set_failing(false);
    submit_shared(&store, &token, &mut visit).await.unwrap();
    assert!(visit.is_submitted());
    assert_eq!(store.submissions(form_id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_published_form_rejects_stale_editor_writes() {
    let store = Arc::new(MemoryStore::new());
    let form_id = store.create_form("Frozen form", "").await.unwrap();

    // Two sessions against the same form; one publishes.
    let mut editing = BuilderSession::open(store.clone() as Arc<dyn FormStore>, form_id)
        .await
        .unwrap();
    let mut publishing = BuilderSession::open(store.clone() as Arc<dyn FormStore>, form_id)
        .await
        .unwrap();
    publishing.publish().await.unwrap();

    // The stale session still believes the form is editable; the store
    // rejects its write and the stored content stays frozen.
    editing
        .designer_mut()
        .unwrap()
        .complete_drag(&palette(FieldKind::Text), Some(&DropTarget::CanvasArea))
        .unwrap();
    let err = editing.save().await.unwrap_err();
    assert!(matches!(err, FormworksError::Frozen(_)));
    assert_eq!(store.load_form(form_id).await.unwrap().content, "[]");
}

#[tokio::test]
async fn test_corrupt_stored_blob_is_a_page_level_error() {
    let store = MemoryStore::new();
    let form_id = store.create_form("Broken form", "").await.unwrap();
    store
        .save_content(form_id, r#"[{"id":"aa","kind":"MagicField","attributes":{}}]"#)
        .await
        .unwrap();
    store.publish(form_id).await.unwrap();
    let token = store.load_form(form_id).await.unwrap().share_token;

    let err = open_shared(&store, &token).await.unwrap_err();
    assert!(matches!(err, FormworksError::UnknownFieldKind(_)));
}

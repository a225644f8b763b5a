//! The shared-link visitor flow.
//!
//! A visitor opens a form through its share token (every load counts a
//! visit), fills it locally, and submits. Validation failures stay on the
//! page; only a validated value map reaches the store, and the session
//! turns terminal only after the store accepts it.

use tracing::warn;

use formworks_core::error::FormworksResult;
use formworks_core::id::ShareToken;
use formworks_document::FormDocument;
use formworks_store::FormStore;
use formworks_submit::SubmitSession;

/// Opens the form behind a share token as a fillable session.
///
/// The load increments the form's visit counter. Fails with `NotFound`
/// for an unknown token and with `CorruptDocument`/`UnknownFieldKind`
/// when the stored blob cannot be reconstructed, both page-level
/// errors.
pub async fn open_shared(
    store: &dyn FormStore,
    token: &ShareToken,
) -> FormworksResult<SubmitSession> {
    let blob = store.load_by_share_token(token).await?;
    let document = FormDocument::from_storage(&blob)?;
    Ok(SubmitSession::new(document))
}

/// Validates and persists a visitor's submission.
///
/// Local validation failure returns the recoverable error and marks the
/// failing fields on the session. A store failure leaves the session
/// filling (nothing was recorded, so the visitor may retry). Only after
/// the store accepts the submission does the session become terminal.
pub async fn submit_shared(
    store: &dyn FormStore,
    token: &ShareToken,
    session: &mut SubmitSession,
) -> FormworksResult<()> {
    let values = session.prepare_submission()?;
    if let Err(e) = store.submit(token, &values).await {
        warn!(error = %e, "persisting submission failed; session kept fillable");
        return Err(e);
    }
    session.mark_submitted();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use formworks_core::error::FormworksError;
    use formworks_core::id::FieldId;
    use formworks_store::MemoryStore;

    async fn shared_form(store: &MemoryStore) -> ShareToken {
        let id = store.create_form("Survey", "").await.unwrap();
        let blob = concat!(
            r#"[{"id":"txt00001","kind":"TextField","attributes":"#,
            r#"{"helperText":"","label":"Your name","placeholder":"","required":true}}]"#
        );
        store.save_content(id, blob).await.unwrap();
        store.publish(id).await.unwrap();
        store.load_form(id).await.unwrap().share_token
    }

    #[tokio::test]
    async fn test_open_counts_a_visit() {
        let store = MemoryStore::new();
        let token = shared_form(&store).await;
        let session = open_shared(&store, &token).await.unwrap();
        assert_eq!(session.document().len(), 1);

        let stats = store.stats().await.unwrap();
        assert_eq!(stats.visits, 1);
    }

    #[tokio::test]
    async fn test_unknown_token_is_not_found() {
        let store = MemoryStore::new();
        let err = open_shared(&store, &ShareToken::generate())
            .await
            .unwrap_err();
        assert!(matches!(err, FormworksError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_invalid_submission_stays_local() {
        let store = MemoryStore::new();
        let token = shared_form(&store).await;
        let mut session = open_shared(&store, &token).await.unwrap();

        let err = submit_shared(&store, &token, &mut session).await.unwrap_err();
        assert!(err.is_recoverable());
        assert!(!session.is_submitted());
        assert_eq!(store.stats().await.unwrap().submissions, 0);
    }

    #[tokio::test]
    async fn test_valid_submission_is_persisted_and_terminal() {
        let store = MemoryStore::new();
        let token = shared_form(&store).await;
        let mut session = open_shared(&store, &token).await.unwrap();

        session.set_value(FieldId::from("txt00001"), "Alice");
        submit_shared(&store, &token, &mut session).await.unwrap();
        assert!(session.is_submitted());
        assert_eq!(store.stats().await.unwrap().submissions, 1);
    }
}

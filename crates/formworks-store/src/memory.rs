//! The in-memory reference store.
//!
//! Backs tests and single-process deployments. Counter updates run
//! inside one write guard, which is what makes the visit/submission
//! increments atomic with their reads. Cross-session writes are
//! last-write-wins by design.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;

use formworks_core::error::{FormworksError, FormworksResult};
use formworks_core::id::{FormId, ShareToken};

use crate::records::{Form, FormStats, Submission};
use crate::store::{validate_form_name, FormStore};

#[derive(Debug, Default)]
struct Inner {
    forms: HashMap<FormId, Form>,
    tokens: HashMap<ShareToken, FormId>,
    submissions: Vec<Submission>,
    creation_order: Vec<FormId>,
}

impl Inner {
    fn form(&self, id: FormId) -> FormworksResult<&Form> {
        self.forms
            .get(&id)
            .ok_or_else(|| FormworksError::NotFound(id.to_string()))
    }

    fn form_mut(&mut self, id: FormId) -> FormworksResult<&mut Form> {
        self.forms
            .get_mut(&id)
            .ok_or_else(|| FormworksError::NotFound(id.to_string()))
    }

    fn resolve_token(&self, token: &ShareToken) -> FormworksResult<FormId> {
        self.tokens
            .get(token)
            .copied()
            .ok_or_else(|| FormworksError::NotFound(token.to_string()))
    }
}

/// An in-memory [`FormStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FormStore for MemoryStore {
    async fn create_form(&self, name: &str, description: &str) -> FormworksResult<FormId> {
        validate_form_name(name)?;
        let form = Form {
            id: FormId::generate(),
            name: name.to_string(),
            description: description.to_string(),
            content: "[]".to_string(),
            published: false,
            share_token: ShareToken::generate(),
            visits: 0,
            submissions: 0,
            created_at: Utc::now(),
        };
        let id = form.id;
        let mut inner = self.inner.write().await;
        inner.tokens.insert(form.share_token.clone(), id);
        inner.creation_order.push(id);
        inner.forms.insert(id, form);
        info!(form = %id, "form created");
        Ok(id)
    }

    async fn load_form(&self, id: FormId) -> FormworksResult<Form> {
        let inner = self.inner.read().await;
        inner.form(id).cloned()
    }

    async fn save_content(&self, id: FormId, content: &str) -> FormworksResult<()> {
        let mut inner = self.inner.write().await;
        let form = inner.form_mut(id)?;
        if form.published {
            return Err(FormworksError::Frozen(id.to_string()));
        }
        form.content = content.to_string();
        Ok(())
    }

    async fn publish(&self, id: FormId) -> FormworksResult<()> {
        let mut inner = self.inner.write().await;
        let form = inner.form_mut(id)?;
        if !form.published {
            form.published = true;
            info!(form = %id, "form published");
        }
        Ok(())
    }

    async fn load_by_share_token(&self, token: &ShareToken) -> FormworksResult<String> {
        let mut inner = self.inner.write().await;
        let id = inner.resolve_token(token)?;
        let form = inner.form_mut(id)?;
        form.visits += 1;
        Ok(form.content.clone())
    }

    async fn submit(&self, token: &ShareToken, values: &str) -> FormworksResult<()> {
        let mut inner = self.inner.write().await;
        let id = inner.resolve_token(token)?;
        let form = inner.form_mut(id)?;
        if !form.published {
            return Err(FormworksError::NotFound(token.to_string()));
        }
        form.submissions += 1;
        inner.submissions.push(Submission {
            form_id: id,
            content: values.to_string(),
            submitted_at: Utc::now(),
        });
        info!(form = %id, "submission recorded");
        Ok(())
    }

    async fn list_forms(&self) -> FormworksResult<Vec<Form>> {
        let inner = self.inner.read().await;
        Ok(inner
            .creation_order
            .iter()
            .rev()
            .filter_map(|id| inner.forms.get(id).cloned())
            .collect())
    }

    async fn submissions(&self, id: FormId) -> FormworksResult<Vec<Submission>> {
        let inner = self.inner.read().await;
        inner.form(id)?;
        Ok(inner
            .submissions
            .iter()
            .filter(|s| s.form_id == id)
            .cloned()
            .collect())
    }

    async fn stats(&self) -> FormworksResult<FormStats> {
        let inner = self.inner.read().await;
        let visits = inner.forms.values().map(|f| f.visits).sum();
        let submissions = inner.forms.values().map(|f| f.submissions).sum();
        Ok(FormStats::from_totals(visits, submissions))
    }
}

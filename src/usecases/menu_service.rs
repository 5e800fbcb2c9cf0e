//! Menu store: fetch once, answer filter and category queries.
//!
//! - Single load attempt; failure leaves the store empty
//! - Category and text filters combine (both must match)
//! - Document order is display order; no sorting

use crate::domain::{DomainError, MenuDocument, MenuFilter, MenuItem};
use crate::ports::MenuSource;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Menu service. Owns the loaded document; queries never mutate it.
pub struct MenuService {
    source: Arc<dyn MenuSource>,
    doc: RwLock<Option<MenuDocument>>,
}

impl MenuService {
    pub fn new(source: Arc<dyn MenuSource>) -> Self {
        Self {
            source,
            doc: RwLock::new(None),
        }
    }

    /// Fetch and store the menu. Single attempt; on failure the store stays
    /// empty and the error surfaces to the caller.
    pub async fn load(&self) -> Result<(), DomainError> {
        let doc = self.source.fetch_menu().await?;
        info!(
            restaurant = %doc.restaurant_name,
            categories = doc.categories.len(),
            "menu loaded"
        );
        *self.doc.write().await = Some(doc);
        Ok(())
    }

    /// Clone of the loaded document, for display metadata.
    pub async fn document(&self) -> Result<MenuDocument, DomainError> {
        self.doc
            .read()
            .await
            .clone()
            .ok_or_else(|| DomainError::MenuLoad("menu not loaded".into()))
    }

    /// Items visible under `filter`, in document order.
    pub async fn visible_items(
        &self,
        filter: &MenuFilter,
    ) -> Result<Vec<MenuItem>, DomainError> {
        let guard = self.doc.read().await;
        let doc = guard
            .as_ref()
            .ok_or_else(|| DomainError::MenuLoad("menu not loaded".into()))?;
        Ok(doc.visible_items(filter).into_iter().cloned().collect())
    }

    /// Category names in document order, "All" first.
    pub async fn category_names(&self) -> Result<Vec<String>, DomainError> {
        let guard = self.doc.read().await;
        let doc = guard
            .as_ref()
            .ok_or_else(|| DomainError::MenuLoad("menu not loaded".into()))?;
        Ok(doc.category_names())
    }
}

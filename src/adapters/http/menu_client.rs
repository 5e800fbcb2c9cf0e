//! Implements MenuSource over HTTP.
//!
//! Each fetch appends a `t=<millis>` query parameter so intermediary caches
//! never serve a stale menu.

use crate::domain::{DomainError, MenuDocument};
use crate::ports::MenuSource;
use reqwest::Client;
use std::time::Duration;
use tracing::info;

/// HTTP menu source. One GET per session.
pub struct HttpMenuSource {
    client: Client,
    url: String,
}

impl HttpMenuSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::MenuLoad(format!("http client: {}", e)))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait::async_trait]
impl MenuSource for HttpMenuSource {
    async fn fetch_menu(&self) -> Result<MenuDocument, DomainError> {
        let ts = chrono::Utc::now().timestamp_millis();
        let res = self
            .client
            .get(&self.url)
            .query(&[("t", ts)])
            .send()
            .await
            .map_err(|e| DomainError::MenuLoad(format!("request failed: {}", e)))?;

        if !res.status().is_success() {
            return Err(DomainError::MenuLoad(format!(
                "server returned {}",
                res.status()
            )));
        }

        let doc: MenuDocument = res
            .json()
            .await
            .map_err(|e| DomainError::MenuLoad(format!("invalid menu document: {}", e)))?;

        info!(url = %self.url, categories = doc.categories.len(), "fetched menu");
        Ok(doc)
    }
}

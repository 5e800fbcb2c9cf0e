//! Offline fallback for the menu source: keep the last good menu on disk and
//! serve it when the network is unavailable.

use crate::domain::{DomainError, MenuDocument};
use crate::ports::MenuSource;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::{info, warn};

/// Decorator over another MenuSource. Snapshot writes are best-effort and
/// never fail a successful load.
pub struct CachedMenuSource {
    inner: Arc<dyn MenuSource>,
    snapshot_path: PathBuf,
}

impl CachedMenuSource {
    pub fn new(inner: Arc<dyn MenuSource>, snapshot_path: impl AsRef<Path>) -> Self {
        Self {
            inner,
            snapshot_path: snapshot_path.as_ref().to_path_buf(),
        }
    }

    /// Best-effort setup of the snapshot directory. Never blocks or fails the
    /// rest of initialization.
    pub async fn register(&self) {
        if let Some(dir) = self.snapshot_path.parent() {
            if let Err(e) = fs::create_dir_all(dir).await {
                warn!(path = %dir.display(), error = %e, "offline cache unavailable");
            }
        }
    }

    async fn write_snapshot(&self, doc: &MenuDocument) {
        let json = match serde_json::to_string(doc) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "failed to serialize menu snapshot");
                return;
            }
        };
        if let Err(e) = fs::write(&self.snapshot_path, json).await {
            warn!(path = %self.snapshot_path.display(), error = %e, "failed to write menu snapshot");
        }
    }

    async fn read_snapshot(&self) -> Option<MenuDocument> {
        let raw = fs::read_to_string(&self.snapshot_path).await.ok()?;
        serde_json::from_str(&raw).ok()
    }
}

#[async_trait::async_trait]
impl MenuSource for CachedMenuSource {
    async fn fetch_menu(&self) -> Result<MenuDocument, DomainError> {
        match self.inner.fetch_menu().await {
            Ok(doc) => {
                self.write_snapshot(&doc).await;
                Ok(doc)
            }
            Err(e) => match self.read_snapshot().await {
                Some(doc) => {
                    info!(
                        path = %self.snapshot_path.display(),
                        "network fetch failed; serving cached menu"
                    );
                    Ok(doc)
                }
                None => Err(e),
            },
        }
    }
}

//! Implements CartStore using a JSON file.
//!
//! One file holds the whole serialized cart; rewritten on every mutation.

use crate::domain::{Cart, DomainError};
use crate::ports::CartStore;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// JSON file-based cart storage.
pub struct CartJson {
    path: std::path::PathBuf,
}

impl CartJson {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait::async_trait]
impl CartStore for CartJson {
    /// Missing or corrupt files load as an empty cart.
    async fn load(&self) -> Result<Cart, DomainError> {
        let cart = match fs::read_to_string(&self.path).await {
            Ok(s) => serde_json::from_str(&s).unwrap_or_default(),
            Err(_) => Cart::default(),
        };
        Ok(cart)
    }

    /// Atomic save using the write-replace pattern:
    /// 1. Write to temp file
    /// 2. sync_all() to ensure flush to disk
    /// 3. Atomic rename to target path
    /// A crash mid-write never corrupts the stored cart.
    async fn save(&self, cart: &Cart) -> Result<(), DomainError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .await
                .map_err(|e| DomainError::Storage(format!("create data dir: {}", e)))?;
        }
        let json = serde_json::to_string_pretty(cart)
            .map_err(|e| DomainError::Storage(e.to_string()))?;

        let temp_path = self.path.with_extension("json.tmp");
        let mut f = fs::File::create(&temp_path)
            .await
            .map_err(|e| DomainError::Storage(format!("create temp file: {}", e)))?;
        f.write_all(json.as_bytes())
            .await
            .map_err(|e| DomainError::Storage(format!("write temp file: {}", e)))?;
        f.sync_all()
            .await
            .map_err(|e| DomainError::Storage(format!("sync temp file: {}", e)))?;
        drop(f); // Close file handle before rename

        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| DomainError::Storage(format!("atomic rename failed: {}", e)))?;

        debug!(path = %self.path.display(), "cart saved");
        Ok(())
    }

    async fn clear(&self) -> Result<(), DomainError> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DomainError::Storage(format!("remove cart file: {}", e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MenuItem, Price};

    fn menu_item(name: &str, price: f64) -> MenuItem {
        MenuItem {
            name: name.to_string(),
            price: Price::Amount(price),
            desc: String::new(),
            image: None,
            badge: None,
        }
    }

    #[tokio::test]
    async fn test_round_trip_preserves_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = CartJson::new(dir.path().join("cart.json"));

        let mut cart = Cart::default();
        cart.add(&menu_item("Soup", 100.0));
        cart.add(&menu_item("Veg Roll", 120.0));
        cart.add(&menu_item("Soup", 100.0));

        store.save(&cart).await.expect("save succeeds");
        let loaded = store.load().await.expect("load succeeds");
        assert_eq!(loaded, cart);
    }

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = CartJson::new(dir.path().join("cart.json"));
        assert!(store.load().await.expect("load succeeds").is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("cart.json");
        std::fs::write(&path, "not a cart {{{").expect("write corrupt file");
        let store = CartJson::new(&path);
        assert!(store.load().await.expect("load succeeds").is_empty());
    }

    #[tokio::test]
    async fn test_clear_removes_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("cart.json");
        let store = CartJson::new(&path);

        let mut cart = Cart::default();
        cart.add(&menu_item("Soup", 100.0));
        store.save(&cart).await.expect("save succeeds");
        assert!(path.exists());

        store.clear().await.expect("clear succeeds");
        assert!(!path.exists());

        // clearing again is a no-op
        store.clear().await.expect("clear is idempotent");
    }
}

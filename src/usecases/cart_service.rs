//! Cart manager: in-memory cart with durable persistence.
//!
//! - One line per item name; repeat adds increment qty (price snapshot kept)
//! - Every mutation is followed by an awaited write of the full cart; a write
//!   failure is logged and the in-memory cart stays authoritative
//! - Checkout formatting fails fast on a missing channel or an empty cart

use crate::domain::{Cart, DomainError, MenuItem, OrderMessage};
use crate::ports::CartStore;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Totals shown in the cart bar. The bar is hidden iff `total_items == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CartSummary {
    pub total_items: u32,
    pub total_price: f64,
}

/// One rendered cart row: the line plus its computed subtotal.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLineView {
    pub name: String,
    pub qty: u32,
    pub subtotal: f64,
}

/// Cart detail view: ordered rows plus the grand total.
#[derive(Debug, Clone, Default)]
pub struct CartDetail {
    pub rows: Vec<CartLineView>,
    pub total: f64,
}

/// Cart service. Owns cart state; persists through the store port.
pub struct CartService {
    store: Arc<dyn CartStore>,
    cart: RwLock<Cart>,
}

impl CartService {
    pub fn new(store: Arc<dyn CartStore>) -> Self {
        Self {
            store,
            cart: RwLock::new(Cart::default()),
        }
    }

    /// Restore the persisted cart. Call once at startup; corrupt or missing
    /// data restores an empty cart without surfacing an error.
    pub async fn restore(&self) {
        match self.store.load().await {
            Ok(cart) => {
                if !cart.is_empty() {
                    info!(lines = cart.lines().len(), "restored cart from storage");
                }
                *self.cart.write().await = cart;
            }
            Err(e) => warn!(error = %e, "cart restore failed; starting empty"),
        }
    }

    /// Add one unit of `item`, then persist. Returns the updated totals.
    pub async fn add_item(&self, item: &MenuItem) -> CartSummary {
        let mut cart = self.cart.write().await;
        cart.add(item);
        self.persist(&cart).await;
        Self::summarize(&cart)
    }

    /// Empty the cart and remove the persisted entry.
    pub async fn clear(&self) {
        let mut cart = self.cart.write().await;
        cart.clear();
        if let Err(e) = self.store.clear().await {
            warn!(error = %e, "failed to remove persisted cart");
        }
    }

    pub async fn summary(&self) -> CartSummary {
        let cart = self.cart.read().await;
        Self::summarize(&cart)
    }

    pub async fn detail(&self) -> CartDetail {
        let cart = self.cart.read().await;
        CartDetail {
            rows: cart
                .lines()
                .iter()
                .map(|line| CartLineView {
                    name: line.name.clone(),
                    qty: line.qty,
                    subtotal: line.subtotal(),
                })
                .collect(),
            total: cart.total_price(),
        }
    }

    /// Format the order for the messaging channel: a header naming the
    /// restaurant, one `"<name> x <qty>"` line per cart entry, and a closing
    /// confirmation phrase.
    ///
    /// # Errors
    /// `Configuration` when no channel is set, regardless of cart contents;
    /// `EmptyCart` when there is nothing to order.
    pub async fn build_order_message(
        &self,
        restaurant_name: &str,
        channel: Option<&str>,
    ) -> Result<OrderMessage, DomainError> {
        let channel = channel
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| DomainError::Configuration("WhatsApp contact".into()))?;

        let cart = self.cart.read().await;
        if cart.is_empty() {
            return Err(DomainError::EmptyCart);
        }

        let mut text = format!("Order from {}\n\n", restaurant_name);
        for line in cart.lines() {
            text.push_str(&format!("{} x {}\n", line.name, line.qty));
        }
        text.push_str("\nPlease confirm. Thanks!");

        Ok(OrderMessage {
            text,
            channel: channel.to_string(),
        })
    }

    async fn persist(&self, cart: &Cart) {
        if let Err(e) = self.store.save(cart).await {
            warn!(error = %e, "cart save failed; keeping in-memory cart");
        }
    }

    fn summarize(cart: &Cart) -> CartSummary {
        CartSummary {
            total_items: cart.total_items(),
            total_price: cart.total_price(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Price;
    use tokio::sync::Mutex;

    /// In-memory store: `slot` plays the durable key-value entry.
    #[derive(Default)]
    struct MemStore {
        slot: Mutex<Option<Cart>>,
    }

    #[async_trait::async_trait]
    impl CartStore for MemStore {
        async fn load(&self) -> Result<Cart, DomainError> {
            Ok(self.slot.lock().await.clone().unwrap_or_default())
        }

        async fn save(&self, cart: &Cart) -> Result<(), DomainError> {
            *self.slot.lock().await = Some(cart.clone());
            Ok(())
        }

        async fn clear(&self) -> Result<(), DomainError> {
            *self.slot.lock().await = None;
            Ok(())
        }
    }

    struct FailingStore;

    #[async_trait::async_trait]
    impl CartStore for FailingStore {
        async fn load(&self) -> Result<Cart, DomainError> {
            Err(DomainError::Storage("disk gone".into()))
        }

        async fn save(&self, _cart: &Cart) -> Result<(), DomainError> {
            Err(DomainError::Storage("disk gone".into()))
        }

        async fn clear(&self) -> Result<(), DomainError> {
            Err(DomainError::Storage("disk gone".into()))
        }
    }

    fn menu_item(name: &str, price: f64) -> MenuItem {
        MenuItem {
            name: name.to_string(),
            price: Price::Amount(price),
            desc: String::new(),
            image: None,
            badge: None,
        }
    }

    fn service() -> (Arc<MemStore>, CartService) {
        let store = Arc::new(MemStore::default());
        let service = CartService::new(Arc::clone(&store) as Arc<dyn CartStore>);
        (store, service)
    }

    #[tokio::test]
    async fn test_add_twice_merges_line() {
        let (_, service) = service();
        service.add_item(&menu_item("Soup", 100.0)).await;
        let summary = service.add_item(&menu_item("Soup", 100.0)).await;
        assert_eq!(summary.total_items, 2);
        assert_eq!(summary.total_price, 200.0);

        let detail = service.detail().await;
        assert_eq!(detail.rows.len(), 1);
        assert_eq!(detail.rows[0].qty, 2);
        assert_eq!(detail.rows[0].subtotal, 200.0);
        assert_eq!(detail.total, 200.0);
    }

    #[tokio::test]
    async fn test_total_items_equals_add_calls() {
        let (_, service) = service();
        for _ in 0..3 {
            service.add_item(&menu_item("Soup", 100.0)).await;
        }
        service.add_item(&menu_item("Veg Roll", 120.0)).await;
        assert_eq!(service.summary().await.total_items, 4);
    }

    #[tokio::test]
    async fn test_every_add_persists_full_cart() {
        let (store, service) = service();
        service.add_item(&menu_item("Soup", 100.0)).await;
        let stored = store.slot.lock().await.clone().expect("cart persisted");
        assert_eq!(stored.total_items(), 1);
    }

    #[tokio::test]
    async fn test_clear_empties_cart_and_storage() {
        let (store, service) = service();
        service.add_item(&menu_item("Soup", 100.0)).await;
        service.clear().await;
        let summary = service.summary().await;
        assert_eq!(summary.total_items, 0);
        assert_eq!(summary.total_price, 0.0);
        assert!(store.slot.lock().await.is_none());
    }

    #[tokio::test]
    async fn test_restore_round_trip() {
        let (store, service) = service();
        service.add_item(&menu_item("Soup", 100.0)).await;
        service.add_item(&menu_item("Veg Roll", 120.0)).await;
        service.add_item(&menu_item("Soup", 100.0)).await;

        let restored = CartService::new(Arc::clone(&store) as Arc<dyn CartStore>);
        restored.restore().await;
        let detail = restored.detail().await;
        let rows: Vec<(&str, u32)> = detail
            .rows
            .iter()
            .map(|r| (r.name.as_str(), r.qty))
            .collect();
        assert_eq!(rows, vec![("Soup", 2), ("Veg Roll", 1)]);
        assert_eq!(detail.total, 320.0);
    }

    #[tokio::test]
    async fn test_restore_failure_starts_empty() {
        let service = CartService::new(Arc::new(FailingStore));
        service.restore().await;
        assert_eq!(service.summary().await.total_items, 0);
    }

    #[tokio::test]
    async fn test_save_failure_keeps_in_memory_cart() {
        let service = CartService::new(Arc::new(FailingStore));
        let summary = service.add_item(&menu_item("Soup", 100.0)).await;
        assert_eq!(summary.total_items, 1);
        assert_eq!(service.summary().await.total_items, 1);
    }

    #[tokio::test]
    async fn test_order_message_requires_channel() {
        let (_, service) = service();
        service.add_item(&menu_item("Soup", 100.0)).await;
        let err = service
            .build_order_message("Spice Villa", None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_missing_channel_wins_over_empty_cart() {
        let (_, service) = service();
        let err = service
            .build_order_message("Spice Villa", None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_order_message_requires_lines() {
        let (_, service) = service();
        let err = service
            .build_order_message("Spice Villa", Some("+911234567890"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::EmptyCart));
    }

    #[tokio::test]
    async fn test_order_message_format() {
        let (_, service) = service();
        service.add_item(&menu_item("Soup", 100.0)).await;
        service.add_item(&menu_item("Soup", 100.0)).await;
        service.add_item(&menu_item("Veg Roll", 120.0)).await;
        let order = service
            .build_order_message("Spice Villa", Some("+911234567890"))
            .await
            .expect("order built");
        assert_eq!(
            order.text,
            "Order from Spice Villa\n\nSoup x 2\nVeg Roll x 1\n\nPlease confirm. Thanks!"
        );
        assert_eq!(order.channel, "+911234567890");
    }
}

//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{Cart, DomainError, MenuDocument, OrderMessage};

/// Menu source. One fetch per session; a failure is terminal.
#[async_trait::async_trait]
pub trait MenuSource: Send + Sync {
    /// Fetch the menu document. Transport and parse failures both surface as
    /// `DomainError::MenuLoad`.
    async fn fetch_menu(&self) -> Result<MenuDocument, DomainError>;
}

/// Durable cart storage. One entry holds the whole serialized cart.
#[async_trait::async_trait]
pub trait CartStore: Send + Sync {
    /// Load the persisted cart. Missing or corrupt data loads as an empty
    /// cart, never as an error.
    async fn load(&self) -> Result<Cart, DomainError>;

    /// Persist the full cart. Called after every mutation.
    async fn save(&self, cart: &Cart) -> Result<(), DomainError>;

    /// Remove the persisted entry entirely.
    async fn clear(&self) -> Result<(), DomainError>;
}

/// Messaging channel handoff. The application builds the order message; the
/// adapter presents the channel link. Opening the chat stays with the user.
#[async_trait::async_trait]
pub trait MessengerPort: Send + Sync {
    async fn send_order(&self, order: &OrderMessage) -> Result<(), DomainError>;
}

//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// Menu fetch or parse failed. Terminal for the session; no retry.
    #[error("Menu load error: {0}")]
    MenuLoad(String),

    #[error("Cart storage error: {0}")]
    Storage(String),

    /// Checkout attempted with no messaging channel configured.
    #[error("Not configured: {0}")]
    Configuration(String),

    /// Checkout attempted with zero cart lines.
    #[error("Cart is empty")]
    EmptyCart,

    #[error("Messenger error: {0}")]
    Messenger(String),
}

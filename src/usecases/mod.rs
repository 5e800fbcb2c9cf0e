//! Application use cases. Orchestrate domain logic via ports.

pub mod cart_service;
pub mod menu_service;

pub use cart_service::{CartDetail, CartLineView, CartService, CartSummary};
pub use menu_service::MenuService;

//! Durable client storage adapters.

pub mod cart_json;

pub use cart_json::CartJson;

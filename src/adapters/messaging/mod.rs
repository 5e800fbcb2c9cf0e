//! Messaging adapters. Implement the order handoff.

pub mod whatsapp;

pub use whatsapp::{WhatsAppMessenger, order_url};

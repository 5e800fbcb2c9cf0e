//! Infrastructure adapters. Implement outbound ports.
//!
//! HTTP, filesystem, messaging, terminal UI. Map errors to DomainError.

pub mod http;
pub mod messaging;
pub mod persistence;
pub mod ui;

//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here. Dependencies flow inward.

pub mod entities;
pub mod errors;

pub use entities::{
    ALL_CATEGORY, Cart, CartLine, Category, Contact, MenuDocument, MenuFilter, MenuItem,
    OpenStatus, OrderMessage, Price,
};
pub use errors::DomainError;

//! `contactbook-core` — the contact record model.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod contact;
pub mod error;
pub mod id;

pub use contact::{Contact, ContactDraft};
pub use error::{DomainError, DomainResult};
pub use id::ContactId;

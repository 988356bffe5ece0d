//! Infrastructure layer: the contact document store gateway.

pub mod contact_store;

pub use contact_store::{
    ContactCursor, ContactStore, InMemoryContactStore, PostgresContactStore, StoreError,
};

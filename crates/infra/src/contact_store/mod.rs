//! Store gateway for contact documents.
//!
//! A thin adapter over a document collection addressed by `ContactId`. Every
//! implementation stores raw JSON documents and decodes them on the way out,
//! so decoding is a per-record step that can fail independently.

pub mod cursor;
pub mod in_memory;
pub mod postgres;
pub mod r#trait;

pub use cursor::ContactCursor;
pub use in_memory::InMemoryContactStore;
pub use postgres::PostgresContactStore;
pub use r#trait::{ContactStore, StoreError};

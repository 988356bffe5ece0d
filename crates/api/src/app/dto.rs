use serde::{Deserialize, Serialize};

use contactbook_core::ContactId;

/// Result of a create: the identifier the store assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertResult {
    pub inserted_id: ContactId,
}

pub const DELETED: &str = "record successfully deleted";
pub const NOT_FOUND: &str = "record with specified ID not found";

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::id::ContactId;

/// Inbound representation of a contact (create/update request body).
///
/// Missing fields deserialize to empty strings so that absence surfaces as a
/// validation failure rather than a parse failure. Any `id` supplied by the
/// caller is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl ContactDraft {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// A draft is valid iff both `name` and `email` are non-empty.
    ///
    /// Presence only: no format check on `email`.
    pub fn validate(&self) -> DomainResult<()> {
        let mut missing = Vec::new();
        if self.name.is_empty() {
            missing.push("name is required");
        }
        if self.email.is_empty() {
            missing.push("email is required");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(DomainError::validation(missing.join("; ")))
        }
    }
}

/// A persisted contact document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub id: ContactId,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email: String,
}

impl Contact {
    pub fn from_draft(id: ContactId, draft: ContactDraft) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
        }
    }

    /// Zero-value record: nil id, empty fields.
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn is_zero(&self) -> bool {
        self.id.is_nil() && self.name.is_empty() && self.email.is_empty()
    }
}

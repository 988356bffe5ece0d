use serde_json::Value as JsonValue;

use contactbook_core::Contact;

use super::r#trait::StoreError;

/// Lazy, single-pass scan over raw contact documents.
///
/// Each call to `next` decodes one document. A document that fails to decode
/// yields `Err(StoreError::Decode)` and the scan moves on to the next one.
/// Once exhausted the cursor stays exhausted.
#[derive(Debug)]
pub struct ContactCursor {
    documents: std::vec::IntoIter<JsonValue>,
}

impl ContactCursor {
    pub fn new(documents: Vec<JsonValue>) -> Self {
        Self {
            documents: documents.into_iter(),
        }
    }

    /// Documents not yet visited.
    pub fn remaining(&self) -> usize {
        self.documents.len()
    }
}

impl Iterator for ContactCursor {
    type Item = Result<Contact, StoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        let document = self.documents.next()?;
        Some(serde_json::from_value(document).map_err(|e| StoreError::decode(e.to_string())))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.documents.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_failure_does_not_end_the_scan() {
        let mut cursor = ContactCursor::new(vec![
            json!({ "id": "0190f1e2-0000-7000-8000-000000000001", "name": "Ada", "email": "ada@example.com" }),
            json!({ "id": 42, "name": "broken" }),
            json!({ "id": "0190f1e2-0000-7000-8000-000000000002", "name": "Grace", "email": "grace@example.com" }),
        ]);

        assert_eq!(cursor.next().unwrap().unwrap().name, "Ada");
        assert!(matches!(cursor.next(), Some(Err(StoreError::Decode(_)))));
        assert_eq!(cursor.next().unwrap().unwrap().name, "Grace");
        assert!(cursor.next().is_none());
        assert!(cursor.next().is_none());
    }

    #[test]
    fn remaining_counts_down() {
        let mut cursor = ContactCursor::new(vec![json!({}), json!({})]);
        assert_eq!(cursor.remaining(), 2);
        let _ = cursor.next();
        assert_eq!(cursor.remaining(), 1);
    }
}

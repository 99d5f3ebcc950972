//! Typed records and the filters used to query them.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::CollaboratorError;
use crate::models::{Appointment, Barber, Customer, Service};

/// A stored document: a JSON object including its `id` field.
pub type Document = serde_json::Map<String, Value>;

/// A record kept in a named collection.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Name of the collection holding records of this type.
    const COLLECTION: &'static str;

    /// Returns the record id, empty before the store assigns one.
    fn id(&self) -> &str;

    /// Sets the record id.
    fn set_id(&mut self, id: String);
}

macro_rules! impl_record {
    ($ty:ty, $collection:literal) => {
        impl Record for $ty {
            const COLLECTION: &'static str = $collection;

            fn id(&self) -> &str {
                &self.id
            }

            fn set_id(&mut self, id: String) {
                self.id = id;
            }
        }
    };
}

impl_record!(Customer, "customers");
impl_record!(Appointment, "appointments");
impl_record!(Service, "services");
impl_record!(Barber, "barbers");

/// An equality predicate over one top-level document field.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// The field equals the value.
    Eq(String, Value),
    /// The field is absent or differs from the value.
    Ne(String, Value),
}

impl Filter {
    /// Matches documents whose `field` equals `value`.
    pub fn eq(field: &str, value: impl Into<Value>) -> Self {
        Filter::Eq(field.to_string(), value.into())
    }

    /// Matches documents whose `field` differs from `value`.
    pub fn ne(field: &str, value: impl Into<Value>) -> Self {
        Filter::Ne(field.to_string(), value.into())
    }

    /// Returns true if `document` satisfies the predicate.
    pub fn matches(&self, document: &Document) -> bool {
        match self {
            Filter::Eq(field, value) => document.get(field) == Some(value),
            Filter::Ne(field, value) => document.get(field) != Some(value),
        }
    }
}

/// Returns true if `document` satisfies every filter.
pub fn matches_all(filters: &[Filter], document: &Document) -> bool {
    filters.iter().all(|filter| filter.matches(document))
}

/// Serializes a record into a document.
pub fn to_document<R: Record>(record: &R) -> Result<Document, CollaboratorError> {
    match serde_json::to_value(record) {
        Ok(Value::Object(document)) => Ok(document),
        Ok(other) => Err(CollaboratorError::Serialization {
            message: format!("{} record is not an object: {}", R::COLLECTION, other),
        }),
        Err(e) => Err(CollaboratorError::Serialization {
            message: e.to_string(),
        }),
    }
}

/// Deserializes a record from a document.
pub fn from_document<R: Record>(document: &Document) -> Result<R, CollaboratorError> {
    serde_json::from_value(Value::Object(document.clone())).map_err(|e| {
        CollaboratorError::Serialization {
            message: format!("{} record is malformed: {}", R::COLLECTION, e),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn haircut() -> Service {
        Service {
            id: "svc_001".to_string(),
            name: "Haircut".to_string(),
            price: Decimal::new(5000, 2),
            active: true,
        }
    }

    #[test]
    fn test_collection_names() {
        assert_eq!(Customer::COLLECTION, "customers");
        assert_eq!(Appointment::COLLECTION, "appointments");
        assert_eq!(Service::COLLECTION, "services");
        assert_eq!(Barber::COLLECTION, "barbers");
    }

    #[test]
    fn test_document_keeps_id() {
        let document = to_document(&haircut()).unwrap();
        assert_eq!(document.get("id"), Some(&Value::from("svc_001")));
        let back: Service = from_document(&document).unwrap();
        assert_eq!(back, haircut());
    }

    #[test]
    fn test_filters_compare_top_level_fields() {
        let document = to_document(&haircut()).unwrap();
        assert!(Filter::eq("name", "Haircut").matches(&document));
        assert!(Filter::eq("active", true).matches(&document));
        assert!(!Filter::ne("active", true).matches(&document));
        assert!(Filter::ne("name", "Beard").matches(&document));
    }

    #[test]
    fn test_ne_matches_missing_field() {
        let document = to_document(&haircut()).unwrap();
        assert!(Filter::ne("status", "cancelled").matches(&document));
        assert!(!Filter::eq("status", "cancelled").matches(&document));
    }

    #[test]
    fn test_matches_all_requires_every_filter() {
        let document = to_document(&haircut()).unwrap();
        let filters = [Filter::eq("name", "Haircut"), Filter::eq("active", false)];
        assert!(!matches_all(&filters, &document));
        assert!(matches_all(&[], &document));
    }

    #[test]
    fn test_malformed_document_is_a_serialization_error() {
        let mut document = to_document(&haircut()).unwrap();
        document.insert("price".to_string(), Value::Bool(true));
        let result: Result<Service, _> = from_document(&document);
        assert!(matches!(result, Err(CollaboratorError::Serialization { .. })));
    }
}

//! Record kinds managed by the catalog and the trait that makes them storable.

mod category;
mod customer;
mod product;

pub use category::Category;
pub use customer::Customer;
pub use product::{Product, ProductBuilder};

use crate::core::{DbError, RecordId, Value};
use std::fmt;

/// A flat record kind that can live in an `EntityStore`.
///
/// `fields` exposes every matchable field (the identifier included) by name, so
/// example matching and the unique index work the same way for every kind.
/// `Default` must produce the all-empty record.
pub trait Entity: Clone + Default + fmt::Debug + Send + Sync + 'static {
    /// Kind name used in messages and logs.
    const KIND: &'static str;

    fn id(&self) -> Option<RecordId>;

    fn set_id(&mut self, id: RecordId);

    /// Field name/value pairs in declaration order.
    fn fields(&self) -> Vec<(&'static str, Value)>;

    fn field(&self, name: &str) -> Option<Value> {
        self.fields()
            .into_iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
    }

    fn field_names() -> Vec<&'static str> {
        Self::default()
            .fields()
            .into_iter()
            .map(|(field, _)| field)
            .collect()
    }
}

/// The field that must be unique across all live records of a kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NaturalKey {
    field: &'static str,
    label: String,
}

impl NaturalKey {
    pub fn new(field: &'static str) -> Self {
        Self {
            field,
            label: field.replace('_', " "),
        }
    }

    pub fn value_of<T: Entity>(&self, record: &T) -> Value {
        record.field(self.field).unwrap_or(Value::Null)
    }

    pub fn duplicate_error(&self) -> DbError {
        DbError::DuplicateKey(format!("{} already registered", self.label))
    }
}

impl fmt::Display for NaturalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_key_label_and_message() {
        let key = NaturalKey::new("tax_id");
        assert_eq!(
            key.duplicate_error(),
            DbError::DuplicateKey("tax id already registered".into())
        );
    }

    #[test]
    fn test_natural_key_value_of() {
        let category = Category::new("Shoes");
        assert_eq!(NaturalKey::new("name").value_of(&category), Value::from("Shoes"));
        assert_eq!(NaturalKey::new("missing").value_of(&category), Value::Null);
    }

    #[test]
    fn test_field_names_include_id() {
        assert_eq!(Category::field_names(), vec!["id", "name"]);
        assert_eq!(
            Product::field_names(),
            vec!["id", "name", "color", "material", "stock_count", "price", "category"]
        );
    }
}

//! Query by example.
//!
//! An [`Example`] is a list of field criteria combined with AND. Text criteria
//! match when the stored value contains the probe, ignoring case; all other
//! values must be equal. The same `Example` works for every [`Entity`] kind
//! because records expose their fields by name.

use crate::core::{DbError, Result, Value};
use crate::model::Entity;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Criterion {
    pub field: String,
    pub value: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Example {
    criteria: Vec<Criterion>,
}

impl Example {
    /// Matches every record.
    pub fn unconstrained() -> Self {
        Self::default()
    }

    /// Build an example from a partially populated probe record.
    ///
    /// Fields holding their type's empty default (null, `""`, `0`) impose no
    /// constraint, so a probe can never ask for an exact zero or empty value.
    /// Use [`Example::and`] for that.
    pub fn of<T: Entity>(probe: &T) -> Self {
        let criteria = probe
            .fields()
            .into_iter()
            .filter(|(_, value)| !value.is_empty_default())
            .map(|(field, value)| Criterion {
                field: field.to_string(),
                value,
            })
            .collect();
        Self { criteria }
    }

    /// Add an explicit criterion. Empty and zero values are real constraints here.
    pub fn and(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.criteria.push(Criterion {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// Add a criterion only when `value` is present.
    pub fn and_some<V: Into<Value>>(self, field: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.and(field, value),
            None => self,
        }
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn is_unconstrained(&self) -> bool {
        self.criteria.is_empty()
    }

    /// Reject criteria naming fields that `T` does not have.
    pub fn validate_for<T: Entity>(&self) -> Result<()> {
        let known = T::field_names();
        match self
            .criteria
            .iter()
            .find(|criterion| !known.contains(&criterion.field.as_str()))
        {
            Some(unknown) => Err(DbError::UnknownField(
                unknown.field.clone(),
                T::KIND.to_string(),
            )),
            None => Ok(()),
        }
    }

    pub fn matches<T: Entity>(&self, record: &T) -> bool {
        if self.is_unconstrained() {
            return true;
        }

        let fields = record.fields();
        self.criteria.iter().all(|criterion| {
            fields
                .iter()
                .find(|(field, _)| *field == criterion.field)
                .is_some_and(|(_, stored)| stored.matches(&criterion.value))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Customer, Product};
    use rust_decimal::Decimal;

    fn blue_a() -> Product {
        Product::builder("A").color("Blue").build()
    }

    fn red_b() -> Product {
        Product::builder("B").color("Red").build()
    }

    #[test]
    fn test_empty_fields_are_excluded() {
        let probe = Product::builder("").color("Blue").build();
        let example = Example::of(&probe);

        assert_eq!(example.criteria().len(), 1);
        assert_eq!(example.criteria()[0].field, "color");
        assert!(example.matches(&blue_a()));
        assert!(!example.matches(&red_b()));
    }

    #[test]
    fn test_empty_probe_matches_everything() {
        let example = Example::of(&Product::default());
        assert!(example.is_unconstrained());
        assert!(example.matches(&blue_a()));
        assert!(example.matches(&Product::default()));
    }

    #[test]
    fn test_text_is_case_insensitive_substring() {
        let example = Example::of(&Category::new("cat"));
        assert!(example.matches(&Category::new("Category1")));
        assert!(example.matches(&Category::new("BOBCAT")));
        assert!(!example.matches(&Category::new("Dogs")));
    }

    #[test]
    fn test_all_criteria_must_match() {
        let example = Example::of(&Customer::probe("ana", "123"));
        let mut hit = Customer::probe("Ana Maria", "98123");
        hit.id = Some(4);
        let miss = Customer::probe("Ana Maria", "98765");

        assert!(example.matches(&hit));
        assert!(!example.matches(&miss));
    }

    #[test]
    fn test_zero_price_in_probe_is_unconstrained() {
        let probe = Product::builder("").price(Decimal::ZERO).build();
        let pricey = Product::builder("X").price(Decimal::new(10, 0)).build();
        assert!(Example::of(&probe).matches(&pricey));
    }

    #[test]
    fn test_explicit_zero_price_is_a_constraint() {
        let example = Example::unconstrained().and("price", Decimal::ZERO);
        let free = Product::builder("Free").build();
        let pricey = Product::builder("X").price(Decimal::new(10, 0)).build();

        assert!(example.matches(&free));
        assert!(!example.matches(&pricey));
    }

    #[test]
    fn test_and_some_skips_missing_values() {
        let example = Example::unconstrained()
            .and_some("name", Some("a"))
            .and_some::<i64>("stock_count", None);
        assert_eq!(example.criteria().len(), 1);
    }

    #[test]
    fn test_identifier_is_matched_exactly() {
        let mut probe = Category::default();
        probe.id = Some(2);
        let mut stored = Category::new("Shoes");
        stored.id = Some(12);
        assert!(!Example::of(&probe).matches(&stored));
        stored.id = Some(2);
        assert!(Example::of(&probe).matches(&stored));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let example = Example::unconstrained().and("colour", "Blue");
        assert_eq!(
            example.validate_for::<Product>(),
            Err(DbError::UnknownField("colour".into(), "product".into()))
        );
        assert!(Example::unconstrained().and("color", "Blue").validate_for::<Product>().is_ok());
    }
}

use super::Entity;
use crate::core::{RecordId, Value};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Catalog product. `category_id` references a `Category` by id; resolving
/// it to a full category is left to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: Option<RecordId>,
    pub name: String,
    pub color: String,
    pub material: String,
    pub stock_count: i64,
    pub price: Decimal,
    pub category_id: Option<RecordId>,
}

impl Product {
    pub fn builder(name: impl Into<String>) -> ProductBuilder {
        ProductBuilder::new(name)
    }
}

impl Entity for Product {
    const KIND: &'static str = "product";

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn fields(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("id", self.id.into()),
            ("name", self.name.as_str().into()),
            ("color", self.color.as_str().into()),
            ("material", self.material.as_str().into()),
            ("stock_count", self.stock_count.into()),
            ("price", self.price.into()),
            ("category", self.category_id.into()),
        ]
    }
}

pub struct ProductBuilder {
    product: Product,
}

impl ProductBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            product: Product {
                name: name.into(),
                ..Product::default()
            },
        }
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.product.color = color.into();
        self
    }

    pub fn material(mut self, material: impl Into<String>) -> Self {
        self.product.material = material.into();
        self
    }

    pub fn stock_count(mut self, stock_count: i64) -> Self {
        self.product.stock_count = stock_count;
        self
    }

    pub fn price(mut self, price: Decimal) -> Self {
        self.product.price = price;
        self
    }

    pub fn category(mut self, category_id: RecordId) -> Self {
        self.product.category_id = Some(category_id);
        self
    }

    pub fn build(self) -> Product {
        self.product
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let product = Product::builder("Sneaker")
            .color("Blue")
            .material("Canvas")
            .stock_count(12)
            .price(Decimal::new(4990, 2))
            .category(3)
            .build();

        assert_eq!(product.id, None);
        assert_eq!(product.field("color"), Some(Value::from("Blue")));
        assert_eq!(product.field("price"), Some(Value::Decimal(Decimal::new(4990, 2))));
        assert_eq!(product.field("category"), Some(Value::Integer(3)));
    }
}

//! Wire types. Request bodies use `Option` fields so that missing values
//! surface as validation errors instead of deserialization failures.

use crate::core::{Page, RecordId};
use crate::model::{Category, Customer, Product};
use crate::query::Example;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ============================================================================
// Category
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRequest {
    pub name: Option<String>,
}

impl CategoryRequest {
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        require_text(&mut errors, "name", self.name.as_deref());
        errors
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: Option<RecordId>,
    pub name: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryQuery {
    pub id: Option<RecordId>,
    pub name: Option<String>,
    pub page: Option<usize>,
    pub size: Option<usize>,
}

impl CategoryQuery {
    pub fn example(&self) -> Example {
        Example::unconstrained()
            .and_some("id", self.id)
            .and_some("name", self.name.clone())
    }
}

// ============================================================================
// Customer
// ============================================================================

/// Customer payload. A client-sent registration date is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRequest {
    pub name: Option<String>,
    pub tax_id: Option<String>,
}

impl CustomerRequest {
    pub fn validate_create(&self) -> Vec<String> {
        let mut errors = Vec::new();
        require_text(&mut errors, "name", self.name.as_deref());
        require_text(&mut errors, "taxId", self.tax_id.as_deref());
        errors
    }

    /// Only the name can change after registration.
    pub fn validate_update(&self) -> Vec<String> {
        let mut errors = Vec::new();
        require_text(&mut errors, "name", self.name.as_deref());
        errors
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    pub id: Option<RecordId>,
    pub name: String,
    pub tax_id: String,
    pub registration_date: Option<NaiveDate>,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            name: customer.name,
            tax_id: customer.tax_id,
            registration_date: customer.registration_date,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerQuery {
    pub id: Option<RecordId>,
    pub name: Option<String>,
    pub tax_id: Option<String>,
    pub page: Option<usize>,
    pub size: Option<usize>,
}

impl CustomerQuery {
    pub fn example(&self) -> Example {
        Example::unconstrained()
            .and_some("id", self.id)
            .and_some("name", self.name.clone())
            .and_some("tax_id", self.tax_id.clone())
    }
}

// ============================================================================
// Product
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRef {
    pub id: Option<RecordId>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub name: Option<String>,
    pub color: Option<String>,
    pub material: Option<String>,
    pub stock_count: Option<i64>,
    pub price: Option<Decimal>,
    pub category: Option<CategoryRef>,
}

impl ProductRequest {
    pub fn validate_create(&self) -> Vec<String> {
        let mut errors = self.validate_update();
        if self.category.as_ref().and_then(|c| c.id).is_none() {
            errors.push("category is required".to_string());
        }
        errors
    }

    /// The category is fixed at creation; every other field is required.
    pub fn validate_update(&self) -> Vec<String> {
        let mut errors = Vec::new();
        require_text(&mut errors, "name", self.name.as_deref());
        require_text(&mut errors, "color", self.color.as_deref());
        require_text(&mut errors, "material", self.material.as_deref());
        match self.stock_count {
            None => errors.push("stockCount is required".to_string()),
            Some(count) if count < 0 => errors.push("stockCount must not be negative".to_string()),
            Some(_) => {}
        }
        match self.price {
            None => errors.push("price is required".to_string()),
            Some(price) if price.is_sign_negative() => {
                errors.push("price must not be negative".to_string())
            }
            Some(_) => {}
        }
        errors
    }

    pub fn category_id(&self) -> Option<RecordId> {
        self.category.as_ref().and_then(|c| c.id)
    }

    /// Copy the updatable fields onto `product`. Call after validation.
    pub fn apply_to(self, product: &mut Product) {
        product.name = self.name.unwrap_or_default();
        product.color = self.color.unwrap_or_default();
        product.material = self.material.unwrap_or_default();
        product.stock_count = self.stock_count.unwrap_or_default();
        product.price = self.price.unwrap_or_default();
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: Option<RecordId>,
    pub name: String,
    pub color: String,
    pub material: String,
    pub stock_count: i64,
    pub price: Decimal,
    pub category: Option<CategoryResponse>,
}

impl ProductResponse {
    pub fn new(product: Product, category: Option<Category>) -> Self {
        Self {
            id: product.id,
            name: product.name,
            color: product.color,
            material: product.material,
            stock_count: product.stock_count,
            price: product.price,
            category: category.map(CategoryResponse::from),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    pub id: Option<RecordId>,
    pub name: Option<String>,
    pub color: Option<String>,
    pub material: Option<String>,
    pub stock_count: Option<i64>,
    pub price: Option<Decimal>,
    pub category_id: Option<RecordId>,
    pub page: Option<usize>,
    pub size: Option<usize>,
}

impl ProductQuery {
    pub fn example(&self) -> Example {
        Example::unconstrained()
            .and_some("id", self.id)
            .and_some("name", self.name.clone())
            .and_some("color", self.color.clone())
            .and_some("material", self.material.clone())
            .and_some("stock_count", self.stock_count)
            .and_some("price", self.price)
            .and_some("category", self.category_id)
    }
}

// ============================================================================
// Shared
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub page: usize,
    pub size: usize,
    pub total_elements: usize,
    pub total_pages: usize,
}

impl<T> From<Page<T>> for PageResponse<T> {
    fn from(page: Page<T>) -> Self {
        let total_pages = page.total_pages();
        Self {
            content: page.content,
            page: page.page,
            size: page.size,
            total_elements: page.total_elements,
            total_pages,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

fn require_text(errors: &mut Vec<String>, field: &str, value: Option<&str>) {
    if value.is_none_or(|v| v.trim().is_empty()) {
        errors.push(format!("{} must not be blank", field));
    }
}

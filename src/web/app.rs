use super::handlers::{self, category, customer, product};
use super::{Result, WebError};
use crate::config::AppConfig;
use crate::core::PageRequest;
use crate::facade::CatalogDb;
use axum::Router;
use axum::routing::get;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Page-size limits applied to list requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    pub default_size: usize,
    pub max_size: usize,
}

impl Paging {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            default_size: config.default_page_size,
            max_size: config.max_page_size,
        }
    }

    pub fn request(&self, page: Option<usize>, size: Option<usize>) -> Result<PageRequest> {
        let size = size.unwrap_or(self.default_size);
        if size == 0 || size > self.max_size {
            return Err(WebError::validation(format!(
                "size must be between 1 and {}",
                self.max_size
            )));
        }
        Ok(PageRequest::new(page.unwrap_or(0), size))
    }
}

impl Default for Paging {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<CatalogDb>,
    pub paging: Paging,
}

impl AppState {
    pub fn new(db: Arc<CatalogDb>) -> Self {
        Self {
            db,
            paging: Paging::default(),
        }
    }

    pub fn with_paging(mut self, paging: Paging) -> Self {
        self.paging = paging;
        self
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::healthcheck))
        .route(
            "/api/categories",
            get(category::list_categories).post(category::create_category),
        )
        .route(
            "/api/categories/:id",
            get(category::get_category)
                .put(category::update_category)
                .delete(category::delete_category),
        )
        .route(
            "/api/customers",
            get(customer::list_customers).post(customer::create_customer),
        )
        .route(
            "/api/customers/:id",
            get(customer::get_customer)
                .put(customer::update_customer)
                .delete(customer::delete_customer),
        )
        .route(
            "/api/products",
            get(product::list_products).post(product::create_product),
        )
        .route(
            "/api/products/:id",
            get(product::get_product)
                .put(product::update_product)
                .delete(product::delete_product),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

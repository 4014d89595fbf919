// ============================================================================
// catalogdb Library
// ============================================================================

pub mod config;
pub mod core;
pub mod facade;
pub mod model;
pub mod query;
pub mod service;
pub mod storage;
pub mod web;

// Re-export main types for convenience
pub use crate::core::{DbError, Page, PageRequest, RecordId, Result, Value};
pub use facade::{CatalogDb, CatalogStats};
pub use model::{Category, Customer, Entity, NaturalKey, Product};
pub use query::Example;
pub use service::EntityService;
pub use storage::{EntityStore, MemoryStore};

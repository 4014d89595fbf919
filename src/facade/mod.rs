pub mod catalog;

pub use catalog::{CatalogDb, CatalogStats};

use crate::core::{DbError, Result};
use crate::model::{Category, Customer, NaturalKey, Product};
use crate::service::EntityService;
use crate::storage::{CatalogSnapshot, MemoryStore, SnapshotManager};
use serde::Serialize;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::info;

pub fn category_key() -> NaturalKey {
    NaturalKey::new("name")
}

pub fn customer_key() -> NaturalKey {
    NaturalKey::new("tax_id")
}

pub fn product_key() -> NaturalKey {
    NaturalKey::new("name")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub categories: usize,
    pub customers: usize,
    pub products: usize,
}

/// The three catalog services plus optional snapshot persistence.
pub struct CatalogDb {
    categories: EntityService<Category>,
    customers: EntityService<Customer>,
    products: EntityService<Product>,
    /// Held for the whole checkpoint, snapshot included.
    persistence: Option<Mutex<SnapshotManager>>,
}

impl CatalogDb {
    pub fn in_memory() -> Self {
        Self {
            categories: EntityService::in_memory(category_key()),
            customers: EntityService::in_memory(customer_key()),
            products: EntityService::in_memory(product_key()),
            persistence: None,
        }
    }

    /// Open a catalog persisted under `data_dir`, recovering the last snapshot if any.
    pub fn open<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let manager = SnapshotManager::in_dir(data_dir);
        let snapshot = match manager.load()? {
            Some(snapshot) => {
                info!(
                    path = %manager.path().display(),
                    records = snapshot.record_count(),
                    "recovered catalog snapshot"
                );
                snapshot
            }
            None => {
                info!(path = %manager.path().display(), "no snapshot found, starting empty");
                CatalogSnapshot::default()
            }
        };

        let mut db = Self::restore(snapshot)?;
        db.persistence = Some(Mutex::new(manager));
        Ok(db)
    }

    /// In-memory catalog pre-populated from a snapshot.
    pub fn restore(snapshot: CatalogSnapshot) -> Result<Self> {
        Ok(Self {
            categories: service(category_key(), snapshot.categories)?,
            customers: service(customer_key(), snapshot.customers)?,
            products: service(product_key(), snapshot.products)?,
            persistence: None,
        })
    }

    pub fn categories(&self) -> &EntityService<Category> {
        &self.categories
    }

    pub fn customers(&self) -> &EntityService<Customer> {
        &self.customers
    }

    pub fn products(&self) -> &EntityService<Product> {
        &self.products
    }

    pub fn is_persistent(&self) -> bool {
        self.persistence.is_some()
    }

    /// Copy of every live record. Kinds are read one after another, not atomically.
    pub fn snapshot(&self) -> Result<CatalogSnapshot> {
        Ok(CatalogSnapshot::new(
            self.categories.store().records()?,
            self.customers.store().records()?,
            self.products.store().records()?,
        ))
    }

    /// Write a snapshot. Returns `false` when the catalog is not persistent.
    pub fn checkpoint(&self) -> Result<bool> {
        let Some(persistence) = &self.persistence else {
            return Ok(false);
        };

        // Taken under the lock: snapshots reach disk in the order they were taken.
        let manager = persistence.lock()?;
        let snapshot = self.snapshot()?;
        manager.save(&snapshot)?;
        info!(
            path = %manager.path().display(),
            records = snapshot.record_count(),
            "catalog checkpoint written"
        );
        Ok(true)
    }

    /// `checkpoint` on tokio's blocking pool, for callers on an async runtime.
    pub async fn checkpoint_blocking(self: Arc<Self>) -> Result<bool> {
        tokio::task::spawn_blocking(move || self.checkpoint())
            .await
            .map_err(|e| DbError::IoError(format!("Checkpoint task failed: {}", e)))?
    }

    pub fn stats(&self) -> Result<CatalogStats> {
        Ok(CatalogStats {
            categories: self.categories.count()?,
            customers: self.customers.count()?,
            products: self.products.count()?,
        })
    }
}

impl Default for CatalogDb {
    fn default() -> Self {
        Self::in_memory()
    }
}

fn service<T: crate::model::Entity>(key: NaturalKey, records: Vec<T>) -> Result<EntityService<T>> {
    let store = MemoryStore::restore(key.clone(), records)?;
    Ok(EntityService::new(Arc::new(store), key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PageRequest;

    #[test]
    fn test_kinds_are_independent() {
        let db = CatalogDb::in_memory();
        db.categories().save(Category::new("Shoes")).unwrap();
        db.products()
            .save(Product::builder("Shoes").build())
            .unwrap();

        let stats = db.stats().unwrap();
        assert_eq!(stats.categories, 1);
        assert_eq!(stats.products, 1);
        assert_eq!(stats.customers, 0);
    }

    #[test]
    fn test_customer_key_is_tax_id() {
        let db = CatalogDb::in_memory();
        db.customers().save(Customer::new("Ana", "111")).unwrap();
        db.customers().save(Customer::new("Ana", "222")).unwrap();
        let err = db.customers().save(Customer::new("Bia", "111")).unwrap_err();
        assert_eq!(err, DbError::DuplicateKey("tax id already registered".into()));
    }

    #[test]
    fn test_checkpoint_without_persistence() {
        let db = CatalogDb::in_memory();
        assert!(!db.is_persistent());
        assert!(!db.checkpoint().unwrap());
    }

    #[test]
    fn test_restore_from_snapshot() {
        let db = CatalogDb::in_memory();
        db.categories().save(Category::new("Shoes")).unwrap();
        db.categories().save(Category::new("Hats")).unwrap();

        let restored = CatalogDb::restore(db.snapshot().unwrap()).unwrap();
        let page = restored
            .categories()
            .find(&Category::default(), PageRequest::default())
            .unwrap();
        assert_eq!(page.total_elements, 2);
        assert!(restored.categories().save(Category::new("Hats")).is_err());
    }
}

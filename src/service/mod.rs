//! Business rules on top of an [`EntityStore`]: natural-key uniqueness on save
//! and identifier checks on delete/update. One generic service serves every
//! record kind; the natural key is plain configuration.

use crate::core::{Page, PageRequest, RecordId, Result};
use crate::model::{Entity, NaturalKey};
use crate::query::Example;
use crate::storage::table::missing_id;
use crate::storage::{EntityStore, MemoryStore};
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct EntityService<T: Entity, S: EntityStore<T> = MemoryStore<T>> {
    store: Arc<S>,
    key: NaturalKey,
    _kind: PhantomData<fn() -> T>,
}

impl<T: Entity> EntityService<T, MemoryStore<T>> {
    /// Service over a fresh in-memory store that enforces the same key.
    pub fn in_memory(key: NaturalKey) -> Self {
        let store = Arc::new(MemoryStore::new(key.clone()));
        Self::new(store, key)
    }
}

impl<T: Entity, S: EntityStore<T>> EntityService<T, S> {
    pub fn new(store: Arc<S>, key: NaturalKey) -> Self {
        Self {
            store,
            key,
            _kind: PhantomData,
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Insert a new record unless its natural key is already registered.
    pub fn save(&self, record: T) -> Result<T> {
        let key_value = self.key.value_of(&record);
        if self.store.exists_by_key(&key_value)? {
            warn!(kind = T::KIND, key = %self.key, value = %key_value, "rejected duplicate");
            return Err(self.key.duplicate_error());
        }

        let saved = self.store.insert(record)?;
        debug!(kind = T::KIND, id = ?saved.id(), "saved");
        Ok(saved)
    }

    pub fn get_by_id(&self, id: RecordId) -> Result<Option<T>> {
        self.store.get_by_id(id)
    }

    /// Remove a record. Whether it still exists is the caller's concern.
    pub fn delete(&self, record: &T) -> Result<()> {
        self.require_id(record)?;
        self.store.delete(record)
    }

    /// Overwrite the stored record with the same id.
    pub fn update(&self, record: T) -> Result<T> {
        self.require_id(&record)?;
        self.store.replace(record)
    }

    /// Page of records matching `probe`; its empty fields are unconstrained.
    pub fn find(&self, probe: &T, page: PageRequest) -> Result<Page<T>> {
        self.store.find_by_example(&Example::of(probe), page)
    }

    /// Page of records matching an explicitly built example.
    pub fn find_matching(&self, example: &Example, page: PageRequest) -> Result<Page<T>> {
        self.store.find_by_example(example, page)
    }

    pub fn count(&self) -> Result<usize> {
        self.store.count()
    }

    fn require_id(&self, record: &T) -> Result<RecordId> {
        record.id().ok_or_else(missing_id::<T>)
    }
}

impl<T: Entity, S: EntityStore<T>> Clone for EntityService<T, S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            key: self.key.clone(),
            _kind: PhantomData,
        }
    }
}

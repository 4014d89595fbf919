use crate::core::{Page, PageRequest, RecordId, Result, Value};
use crate::model::Entity;
use crate::query::Example;

/// Keyed storage for one record kind - allows pluggable storage backends
pub trait EntityStore<T: Entity>: Send + Sync {
    /// Assign a fresh id and persist the record
    fn insert(&self, record: T) -> Result<T>;

    /// Point lookup; an absent id is `Ok(None)`
    fn get_by_id(&self, id: RecordId) -> Result<Option<T>>;

    /// Remove the record stored under `record.id`
    fn delete(&self, record: &T) -> Result<()>;

    /// Overwrite every field of the record stored under `record.id`
    fn replace(&self, record: T) -> Result<T>;

    /// True iff a live record's natural key equals `key` exactly
    fn exists_by_key(&self, key: &Value) -> Result<bool>;

    /// Filtered, paged scan in ascending id order
    fn find_by_example(&self, example: &Example, page: PageRequest) -> Result<Page<T>>;

    /// Number of live records
    fn count(&self) -> Result<usize>;
}

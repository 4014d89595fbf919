use super::engine::EntityStore;
use super::table::{Table, missing_id};
use crate::core::{Page, PageRequest, RecordId, Result, Value};
use crate::model::{Entity, NaturalKey};
use crate::query::Example;
use std::sync::RwLock;
use tracing::debug;

/// In-memory `EntityStore` backed by a single lock-protected [`Table`].
///
/// Uniqueness of the natural key is checked under the write lock, so two
/// concurrent inserts of the same key cannot both succeed.
pub struct MemoryStore<T: Entity> {
    table: RwLock<Table<T>>,
}

impl<T: Entity> MemoryStore<T> {
    pub fn new(key: NaturalKey) -> Self {
        Self {
            table: RwLock::new(Table::new(key)),
        }
    }

    /// Store pre-populated from a snapshot.
    pub fn restore(key: NaturalKey, records: Vec<T>) -> Result<Self> {
        Ok(Self {
            table: RwLock::new(Table::restore(key, records)?),
        })
    }

    /// All live records in id order, for snapshots.
    pub fn records(&self) -> Result<Vec<T>> {
        Ok(self.table.read()?.scan().cloned().collect())
    }
}

impl<T: Entity> EntityStore<T> for MemoryStore<T> {
    fn insert(&self, record: T) -> Result<T> {
        let stored = self.table.write()?.insert(record)?;
        debug!(kind = T::KIND, id = ?stored.id(), "inserted");
        Ok(stored)
    }

    fn get_by_id(&self, id: RecordId) -> Result<Option<T>> {
        Ok(self.table.read()?.get(id).cloned())
    }

    fn delete(&self, record: &T) -> Result<()> {
        let id = record.id().ok_or_else(missing_id::<T>)?;
        let removed = self.table.write()?.delete(id);
        debug!(kind = T::KIND, id, removed = removed.is_some(), "deleted");
        Ok(())
    }

    fn replace(&self, record: T) -> Result<T> {
        let stored = self.table.write()?.update(record)?;
        debug!(kind = T::KIND, id = ?stored.id(), "replaced");
        Ok(stored)
    }

    fn exists_by_key(&self, key: &Value) -> Result<bool> {
        Ok(self.table.read()?.contains_key(key))
    }

    fn find_by_example(&self, example: &Example, page: PageRequest) -> Result<Page<T>> {
        example.validate_for::<T>()?;

        let table = self.table.read()?;
        let matches: Vec<T> = table
            .scan()
            .filter(|record| example.matches(*record))
            .cloned()
            .collect();
        Ok(Page::from_matches(matches, page))
    }

    fn count(&self) -> Result<usize> {
        Ok(self.table.read()?.row_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DbError;
    use crate::model::{Category, Product};

    fn categories() -> MemoryStore<Category> {
        MemoryStore::new(NaturalKey::new("name"))
    }

    #[test]
    fn test_round_trip() {
        let store = categories();
        let saved = store.insert(Category::new("Shoes")).unwrap();
        let fetched = store.get_by_id(saved.id.unwrap()).unwrap();
        assert_eq!(fetched, Some(saved));
    }

    #[test]
    fn test_get_missing_is_none() {
        assert_eq!(categories().get_by_id(42).unwrap(), None);
    }

    #[test]
    fn test_delete_missing_id_is_noop() {
        let store = categories();
        store.insert(Category::new("Shoes")).unwrap();
        let mut ghost = Category::new("ghost");
        ghost.id = Some(77);
        store.delete(&ghost).unwrap();
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_delete_without_id_is_rejected() {
        let err = categories().delete(&Category::new("x")).unwrap_err();
        assert!(matches!(err, DbError::InvalidArgument(_)));
    }

    #[test]
    fn test_exists_by_key_is_exact() {
        let store = categories();
        store.insert(Category::new("Shoes")).unwrap();
        assert!(store.exists_by_key(&Value::from("Shoes")).unwrap());
        assert!(!store.exists_by_key(&Value::from("shoes")).unwrap());
        assert!(!store.exists_by_key(&Value::from("Sho")).unwrap());
    }

    #[test]
    fn test_find_by_example_filters_and_pages() {
        let store: MemoryStore<Product> = MemoryStore::new(NaturalKey::new("name"));
        for (name, color) in [("A", "Blue"), ("B", "Red"), ("C", "navy blue"), ("D", "BLUE")] {
            store
                .insert(Product::builder(name).color(color).build())
                .unwrap();
        }

        let probe = Product::builder("").color("blue").build();
        let page = store
            .find_by_example(&Example::of(&probe), PageRequest::new(0, 2))
            .unwrap();
        assert_eq!(page.total_elements, 3);
        let names: Vec<_> = page.content.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);

        let rest = store
            .find_by_example(&Example::of(&probe), PageRequest::new(1, 2))
            .unwrap();
        assert_eq!(rest.content.len(), 1);
        assert_eq!(rest.content[0].name, "D");
    }

    #[test]
    fn test_find_does_not_mutate() {
        let store = categories();
        store.insert(Category::new("Shoes")).unwrap();
        store
            .find_by_example(&Example::unconstrained(), PageRequest::default())
            .unwrap();
        assert_eq!(store.records().unwrap().len(), 1);
    }

    #[test]
    fn test_find_with_unknown_field() {
        let example = Example::unconstrained().and("title", "x");
        let err = categories()
            .find_by_example(&example, PageRequest::default())
            .unwrap_err();
        assert_eq!(err, DbError::UnknownField("title".into(), "category".into()));
    }
}

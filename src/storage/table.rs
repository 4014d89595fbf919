use crate::core::{DbError, RecordId, Result, Value};
use crate::model::{Entity, NaturalKey};
use std::collections::{BTreeMap, HashMap};

/// Rows of one record kind ordered by id, with a unique index on the natural key.
#[derive(Debug, Clone)]
pub struct Table<T: Entity> {
    key: NaturalKey,
    rows: BTreeMap<RecordId, T>,
    next_id: RecordId,
    unique_index: HashMap<Value, RecordId>,
}

impl<T: Entity> Table<T> {
    pub fn new(key: NaturalKey) -> Self {
        Self {
            key,
            rows: BTreeMap::new(),
            next_id: 1,
            unique_index: HashMap::new(),
        }
    }

    /// Rebuild a table from previously stored records.
    ///
    /// Records without an id are assigned one; ids continue after the largest
    /// restored id.
    pub fn restore(key: NaturalKey, records: Vec<T>) -> Result<Self> {
        let mut table = Self::new(key);
        table.next_id = match records.iter().filter_map(Entity::id).max() {
            Some(max) => max.checked_add(1).ok_or_else(id_space_exhausted::<T>)?,
            None => 1,
        };

        for mut record in records {
            let id = match record.id() {
                Some(id) => id,
                None => table.allocate_id()?,
            };
            if table.rows.contains_key(&id) {
                return Err(DbError::InvalidArgument(format!(
                    "duplicate {} id {} in snapshot",
                    T::KIND,
                    id
                )));
            }
            record.set_id(id);
            table.check_uniqueness(&record, None)?;
            table.index(id, &record);
            table.rows.insert(id, record);
        }
        Ok(table)
    }

    pub fn insert(&mut self, mut record: T) -> Result<T> {
        self.check_uniqueness(&record, None)?;

        let id = self.allocate_id()?;
        record.set_id(id);
        self.index(id, &record);
        self.rows.insert(id, record.clone());
        Ok(record)
    }

    pub fn get(&self, id: RecordId) -> Option<&T> {
        self.rows.get(&id)
    }

    pub fn update(&mut self, record: T) -> Result<T> {
        let id = record.id().ok_or_else(missing_id::<T>)?;
        let old = self.rows.get(&id).cloned().ok_or_else(|| DbError::RecordNotFound {
            kind: T::KIND.to_string(),
            id,
        })?;
        self.check_uniqueness(&record, Some(id))?;

        self.unindex(&old);
        self.index(id, &record);
        self.rows.insert(id, record.clone());
        Ok(record)
    }

    pub fn delete(&mut self, id: RecordId) -> Option<T> {
        let removed = self.rows.remove(&id)?;
        self.unindex(&removed);
        Some(removed)
    }

    pub fn contains_key(&self, key: &Value) -> bool {
        self.unique_index.contains_key(key)
    }

    /// Live records in ascending id order.
    pub fn scan(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn allocate_id(&mut self) -> Result<RecordId> {
        let id = self.next_id;
        self.next_id = id.checked_add(1).ok_or_else(id_space_exhausted::<T>)?;
        Ok(id)
    }

    fn check_uniqueness(&self, record: &T, ignore_id: Option<RecordId>) -> Result<()> {
        let value = self.key.value_of(record);
        if value.is_null() {
            return Ok(());
        }
        match self.unique_index.get(&value) {
            Some(owner) if Some(*owner) != ignore_id => Err(self.key.duplicate_error()),
            _ => Ok(()),
        }
    }

    fn index(&mut self, id: RecordId, record: &T) {
        let value = self.key.value_of(record);
        if !value.is_null() {
            self.unique_index.insert(value, id);
        }
    }

    fn unindex(&mut self, record: &T) {
        self.unique_index.remove(&self.key.value_of(record));
    }
}

pub(crate) fn missing_id<T: Entity>() -> DbError {
    DbError::InvalidArgument(format!("{} id must not be empty", T::KIND))
}

fn id_space_exhausted<T: Entity>() -> DbError {
    DbError::InvalidArgument(format!("{} ids exhausted", T::KIND))
}

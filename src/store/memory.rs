use std::collections::BTreeMap;

use async_trait::async_trait;

use super::{Store, StoreError};
use crate::actor_framework::{Entity, SequentialId};

/// In-process table backed by an ordered map.
///
/// Rows iterate in ascending id order; since ids come from a monotonic
/// sequence this is the order in which they were created.
pub struct MemoryStore<T: Entity> {
    rows: BTreeMap<T::Id, T>,
    last_id: Option<T::Id>,
}

impl<T: Entity> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: None,
        }
    }
}

impl<T: Entity> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> Store<T> for MemoryStore<T> {
    async fn next_id(&mut self) -> Result<T::Id, StoreError> {
        let id = match &self.last_id {
            Some(last) => last.successor(),
            None => T::Id::first(),
        };
        self.last_id = Some(id.clone());
        Ok(id)
    }

    async fn insert(&mut self, item: T) -> Result<(), StoreError> {
        let id = item.id().clone();
        if self.rows.contains_key(&id) {
            return Err(StoreError::Duplicate(id.to_string()));
        }
        self.rows.insert(id, item);
        Ok(())
    }

    async fn get(&self, id: &T::Id) -> Result<Option<T>, StoreError> {
        Ok(self.rows.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<T>, StoreError> {
        Ok(self.rows.values().cloned().collect())
    }

    async fn update(&mut self, item: T) -> Result<(), StoreError> {
        match self.rows.get_mut(item.id()) {
            Some(row) => {
                *row = item;
                Ok(())
            }
            None => Err(StoreError::Missing(item.id().to_string())),
        }
    }

    async fn remove(&mut self, id: &T::Id) -> Result<Option<T>, StoreError> {
        Ok(self.rows.remove(id))
    }
}

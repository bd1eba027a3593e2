use async_trait::async_trait;
use parking_lot::RwLock;
use sqlx::Database;
use std::error::Error;
use uuid::Uuid;

use crate::models::{Auditable, Identifiable};
use crate::repository::{
    CreateBatch, DeleteBatch, ExistByIds, Load, LoadAll, LoadBatch, UpdateBatch,
};

/// Process-local store for one record type.
///
/// Records are kept in creation order behind a `parking_lot::RwLock`; no lock
/// is held across an `.await`. Used by the `memory` storage backend and by
/// service tests.
pub struct InMemoryRepository<T> {
    items: RwLock<Vec<T>>,
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }
}

impl<T: Identifiable + Clone> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    pub fn find_first(&self, predicate: impl Fn(&T) -> bool) -> Option<T> {
        self.items.read().iter().find(|item| predicate(item)).cloned()
    }

    pub fn find_all(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.items
            .read()
            .iter()
            .filter(|item| predicate(item))
            .cloned()
            .collect()
    }

    pub(crate) fn snapshot(&self) -> Vec<T> {
        self.items.read().clone()
    }

    pub(crate) fn insert_unique(&self, item: T) -> Result<T, Box<dyn Error + Send + Sync>> {
        let mut items = self.items.write();
        let id = item.get_id();
        if items.iter().any(|existing| existing.get_id() == id) {
            return Err(format!("duplicate key value violates primary key: {id}").into());
        }
        items.push(item.clone());
        Ok(item)
    }
}

#[async_trait]
impl<DB, T> CreateBatch<DB, T> for InMemoryRepository<T>
where
    DB: Database,
    T: Auditable + Clone + Send + Sync + 'static,
{
    async fn create_batch(
        &self,
        items: Vec<T>,
        audit_log_id: Option<Uuid>,
    ) -> Result<Vec<T>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut store = self.items.write();
        for item in &items {
            let id = item.get_id();
            if store.iter().any(|existing| existing.get_id() == id) {
                return Err(format!("duplicate key value violates primary key: {id}").into());
            }
        }

        let mut saved = Vec::with_capacity(items.len());
        for mut item in items {
            item.set_audit_log_id(audit_log_id);
            store.push(item.clone());
            saved.push(item);
        }
        Ok(saved)
    }
}

#[async_trait]
impl<DB, T> LoadBatch<DB, T> for InMemoryRepository<T>
where
    DB: Database,
    T: Identifiable + Clone + Send + Sync + 'static,
{
    async fn load_batch(&self, ids: &[Uuid]) -> Result<Vec<Option<T>>, Box<dyn Error + Send + Sync>> {
        let store = self.items.read();
        Ok(ids
            .iter()
            .map(|id| store.iter().find(|item| item.get_id() == *id).cloned())
            .collect())
    }
}

#[async_trait]
impl<DB, T> Load<DB, T> for InMemoryRepository<T>
where
    DB: Database,
    T: Identifiable + Clone + Send + Sync + 'static,
{
    async fn load(&self, id: Uuid) -> Result<T, Box<dyn Error + Send + Sync>> {
        self.find_first(|item| item.get_id() == id)
            .ok_or_else(|| format!("Entity not found: {id}").into())
    }
}

#[async_trait]
impl<DB, T> UpdateBatch<DB, T> for InMemoryRepository<T>
where
    DB: Database,
    T: Auditable + Clone + Send + Sync + 'static,
{
    async fn update_batch(
        &self,
        items: Vec<T>,
        audit_log_id: Option<Uuid>,
    ) -> Result<Vec<T>, Box<dyn Error + Send + Sync>> {
        let mut store = self.items.write();
        let mut updated = Vec::with_capacity(items.len());
        for mut item in items {
            let id = item.get_id();
            if let Some(slot) = store.iter_mut().find(|existing| existing.get_id() == id) {
                item.set_audit_log_id(audit_log_id);
                *slot = item.clone();
                updated.push(item);
            }
        }
        Ok(updated)
    }
}

#[async_trait]
impl<DB, T> DeleteBatch<DB> for InMemoryRepository<T>
where
    DB: Database,
    T: Identifiable + Send + Sync + 'static,
{
    async fn delete_batch(
        &self,
        ids: &[Uuid],
        _audit_log_id: Option<Uuid>,
    ) -> Result<usize, Box<dyn Error + Send + Sync>> {
        let mut store = self.items.write();
        let before = store.len();
        store.retain(|item| !ids.contains(&item.get_id()));
        Ok(before - store.len())
    }
}

#[async_trait]
impl<DB, T> ExistByIds<DB> for InMemoryRepository<T>
where
    DB: Database,
    T: Identifiable + Send + Sync + 'static,
{
    async fn exist_by_ids(&self, ids: &[Uuid]) -> Result<Vec<(Uuid, bool)>, Box<dyn Error + Send + Sync>> {
        let store = self.items.read();
        Ok(ids
            .iter()
            .map(|id| (*id, store.iter().any(|item| item.get_id() == *id)))
            .collect())
    }
}

#[async_trait]
impl<DB, T> LoadAll<DB, T> for InMemoryRepository<T>
where
    DB: Database,
    T: Identifiable + Clone + Send + Sync + 'static,
{
    async fn load_all(&self) -> Result<Vec<T>, Box<dyn Error + Send + Sync>> {
        Ok(self.snapshot())
    }
}

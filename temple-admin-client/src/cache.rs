use parking_lot::RwLock;
use temple_admin_db::models::Identifiable;
use uuid::Uuid;

/// In-memory copy of one entity collection for the current session.
///
/// Server responses are reconciled by id: created and updated records
/// replace their local copy, deleted records are dropped.
#[derive(Debug)]
pub struct EntityCache<T> {
    items: RwLock<Option<Vec<T>>>,
}

impl<T> Default for EntityCache<T> {
    fn default() -> Self {
        Self {
            items: RwLock::new(None),
        }
    }
}

impl<T: Identifiable + Clone> EntityCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` until the collection has been fetched.
    pub fn snapshot(&self) -> Option<Vec<T>> {
        self.items.read().clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.items.read().is_some()
    }

    pub fn get(&self, id: Uuid) -> Option<T> {
        self.items
            .read()
            .as_ref()
            .and_then(|items| items.iter().find(|item| item.get_id() == id).cloned())
    }

    pub fn replace_all(&self, items: Vec<T>) {
        *self.items.write() = Some(items);
    }

    /// Replaces the record with the same id or prepends it. A collection
    /// that was never fetched stays unloaded.
    pub fn upsert(&self, item: T) {
        if let Some(items) = self.items.write().as_mut() {
            match items.iter_mut().find(|existing| existing.get_id() == item.get_id()) {
                Some(slot) => *slot = item,
                None => items.insert(0, item),
            }
        }
    }

    pub fn remove(&self, id: Uuid) {
        if let Some(items) = self.items.write().as_mut() {
            items.retain(|item| item.get_id() != id);
        }
    }

    /// Forces the next read to go to the server.
    pub fn invalidate(&self) {
        *self.items.write() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: Uuid,
        label: &'static str,
    }

    impl Identifiable for Item {
        fn get_id(&self) -> Uuid {
            self.id
        }
    }

    #[test]
    fn test_reconciles_by_id() {
        let cache = EntityCache::new();
        let a = Item { id: Uuid::new_v4(), label: "a" };
        let b = Item { id: Uuid::new_v4(), label: "b" };

        cache.upsert(a.clone());
        assert!(!cache.is_loaded());

        cache.replace_all(vec![a.clone()]);
        cache.upsert(b.clone());
        cache.upsert(Item { id: a.id, label: "a2" });
        let items = cache.snapshot().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0], b);
        assert_eq!(cache.get(a.id).unwrap().label, "a2");

        cache.remove(b.id);
        assert_eq!(cache.snapshot().unwrap().len(), 1);

        cache.invalidate();
        assert!(cache.snapshot().is_none());
    }
}

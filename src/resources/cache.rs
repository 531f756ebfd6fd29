//
//  bcr-api
//  resources/cache.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/14.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Name to id cache owned by each resource manager.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use super::ResourceId;

/// Maps caller-facing resource names to vendor ids.
///
/// Entries are added whenever a manager sees a resource (create, get,
/// list). They are removed when the resource is deleted through the same
/// manager, or when the API answers 404 for a cached id. Names are matched
/// exactly.
#[derive(Debug, Default)]
pub struct HandleCache {
    entries: Mutex<HashMap<String, ResourceId>>,
}

impl HandleCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, ResourceId>> {
        // A panic while holding the lock cannot leave the map half-written.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn insert(&self, name: &str, id: ResourceId) {
        self.lock().insert(name.to_string(), id);
    }

    pub fn get(&self, name: &str) -> Option<ResourceId> {
        self.lock().get(name).copied()
    }

    pub fn remove(&self, name: &str) -> Option<ResourceId> {
        self.lock().remove(name)
    }

    /// Removes every name that points at `id`.
    pub fn remove_id(&self, id: ResourceId) {
        self.lock().retain(|_, cached| *cached != id);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_get_remove() {
        let cache = HandleCache::new();
        cache.insert("brand", ResourceId(7));
        assert_eq!(cache.get("brand"), Some(ResourceId(7)));
        assert_eq!(cache.get("Brand"), None);
        assert_eq!(cache.remove("brand"), Some(ResourceId(7)));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_remove_id_drops_every_alias() {
        let cache = HandleCache::new();
        cache.insert("old name", ResourceId(3));
        cache.insert("new name", ResourceId(3));
        cache.insert("other", ResourceId(4));
        cache.remove_id(ResourceId(3));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("other"), Some(ResourceId(4)));
    }
}

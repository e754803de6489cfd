//! Rendered page cache
//!
//! Read endpoints cache their JSON body by request path. A `Refresh(path)`
//! effect drops the page at `path` and every page nested below it, so the
//! next read is recomputed from the store.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Path-keyed cache of rendered pages, shared across handlers
#[derive(Clone, Default)]
pub struct PageCache {
    pages: Arc<RwLock<HashMap<String, Value>>>,
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached body for `path`; a poisoned lock reads as a miss
    pub fn get(&self, path: &str) -> Option<Value> {
        self.pages.read().ok()?.get(path).cloned()
    }

    pub fn put(&self, path: impl Into<String>, page: Value) {
        if let Ok(mut pages) = self.pages.write() {
            pages.insert(path.into(), page);
        }
    }

    /// Drop `path` and the pages nested under it; returns how many were dropped
    pub fn invalidate(&self, path: &str) -> usize {
        let Ok(mut pages) = self.pages.write() else {
            return 0;
        };
        let prefix = format!("{}/", path.trim_end_matches('/'));
        let before = pages.len();
        pages.retain(|cached, _| cached != path && !cached.starts_with(&prefix));
        before - pages.len()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.pages
            .read()
            .map(|pages| pages.contains_key(path))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.pages.read().map(|pages| pages.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

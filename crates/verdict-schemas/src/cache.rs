//! Schema caching
//!
//! The cache is an opaque keyed mapping of resolved schemas; no eviction
//! policy is prescribed. Implementations must be safe to share across
//! concurrent validations.
//!
//! Copyright (c) 2025 Verdict Team
//! Licensed under the Apache-2.0 license

use crate::system::Schema;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

/// Keyed lookup/store of resolved schemas
pub trait SchemaCache: fmt::Debug + Send + Sync {
    fn get(&self, schema_id: &str) -> Option<Arc<Schema>>;
    fn put(&self, schema_id: &str, schema: Arc<Schema>);
}

/// The default cache: an unbounded in-memory map
#[derive(Debug, Default)]
pub struct InMemorySchemaCache {
    entries: RwLock<HashMap<String, Arc<Schema>>>,
}

impl InMemorySchemaCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SchemaCache for InMemorySchemaCache {
    fn get(&self, schema_id: &str) -> Option<Arc<Schema>> {
        self.entries
            .read()
            .ok()
            .and_then(|m| m.get(schema_id).cloned())
    }

    fn put(&self, schema_id: &str, schema: Arc<Schema>) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(schema_id.to_string(), schema);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_put_round_trip() {
        let cache = InMemorySchemaCache::new();
        assert!(cache.get("sample").is_none());

        let schema = Arc::new(Schema::new("sample", Vec::new()));
        cache.put("sample", Arc::clone(&schema));
        let found = cache.get("sample").expect("schema should be cached");
        assert!(Arc::ptr_eq(&found, &schema));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_put_overwrites() {
        let cache = InMemorySchemaCache::new();
        cache.put("sample", Arc::new(Schema::new("sample", Vec::new())));
        let replacement = Arc::new(Schema::new("sample", Vec::new()));
        cache.put("sample", Arc::clone(&replacement));
        assert!(Arc::ptr_eq(
            &cache.get("sample").expect("schema should be cached"),
            &replacement
        ));
        assert_eq!(cache.len(), 1);
    }
}

//! Read-through cache of source documents.
//!
//! Generation reuses the same source document for every variant of a tool
//! type, so the snapshot is loaded once per process and shared. The cache
//! is an explicit value passed to whoever needs it, not ambient global
//! state; construct one per process and hand out references.
//!
//! Entries are immutable snapshots behind `Arc`. Two concurrent readers
//! missing the same key may both run the loader; the duplicate insert is
//! harmless because both loads observe identical on-disk content.

use parking_lot::RwLock;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::Arc;

/// An immutable snapshot of one tool's reference content.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceDocument {
    /// The tool's `seo` object.
    pub seo: JsonValue,
    /// The tool's example media references.
    pub examples: Vec<JsonValue>,
}

impl SourceDocument {
    /// Extract the `seo` object and `examples` array from a full tool
    /// JSON document. Missing pieces default to empty.
    pub fn from_tool_json(tool: &JsonValue) -> Self {
        let seo = tool.get("seo").cloned().unwrap_or(JsonValue::Null);
        let examples = tool
            .get("examples")
            .and_then(JsonValue::as_array)
            .cloned()
            .unwrap_or_default();
        Self { seo, examples }
    }

    /// Whether the snapshot carries no usable SEO content.
    pub fn is_empty(&self) -> bool {
        match &self.seo {
            JsonValue::Object(map) => map.is_empty(),
            _ => true,
        }
    }
}

/// Process-wide cache of source documents, keyed by tool type.
#[derive(Debug, Default)]
pub struct SourceCache {
    entries: RwLock<HashMap<String, Arc<SourceDocument>>>,
}

impl SourceCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a cached snapshot.
    pub fn get(&self, key: &str) -> Option<Arc<SourceDocument>> {
        self.entries.read().get(key).cloned()
    }

    /// Insert a snapshot, replacing any existing entry.
    pub fn insert(&self, key: impl Into<String>, doc: SourceDocument) -> Arc<SourceDocument> {
        let doc = Arc::new(doc);
        self.entries.write().insert(key.into(), doc.clone());
        doc
    }

    /// Read-through lookup: return the cached snapshot or run `loader`
    /// to populate it.
    ///
    /// The loader runs outside the lock, so concurrent misses for the
    /// same key may load twice; last write wins with an identical value.
    pub fn get_or_insert_with<E>(
        &self,
        key: &str,
        loader: impl FnOnce() -> Result<SourceDocument, E>,
    ) -> Result<Arc<SourceDocument>, E> {
        if let Some(doc) = self.get(key) {
            return Ok(doc);
        }
        let doc = loader()?;
        Ok(self.insert(key, doc))
    }

    /// Drop one entry.
    pub fn invalidate(&self, key: &str) {
        self.entries.write().remove(key);
    }

    /// Drop all entries.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Number of cached snapshots.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

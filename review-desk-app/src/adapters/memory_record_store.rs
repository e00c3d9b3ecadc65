//! In-memory document store keyed by collection name.
//!
//! Seed files map each collection name to an array of documents; every
//! document carries its own `id`:
//!
//! ```json
//! { "users": [{ "id": "u1", "firstName": "Ada", "status": "not-approved" }] }
//! ```

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use review_desk_core::error::{CoreError, CoreResult};
use review_desk_core::traits::RecordStore;
use review_desk_core::types::{RecordCategory, StoredDocument};

use crate::config::CollectionNames;

/// Document store held in memory, one collection per category
pub struct InMemoryRecordStore {
    collections: CollectionNames,
    documents: RwLock<HashMap<String, Vec<StoredDocument>>>,
}

impl InMemoryRecordStore {
    /// Create an empty store
    #[must_use]
    pub fn new(collections: CollectionNames) -> Self {
        Self {
            collections,
            documents: RwLock::new(HashMap::new()),
        }
    }

    /// Create a store seeded from a JSON string.
    ///
    /// Collections not backing any category are rejected so a typo in the
    /// seed does not silently hide records.
    pub fn from_json_str(raw: &str, collections: CollectionNames) -> CoreResult<Self> {
        let seed: HashMap<String, Vec<Map<String, Value>>> = serde_json::from_str(raw)
            .map_err(|e| CoreError::SerializationError(format!("Invalid seed data: {e}")))?;

        let mut documents = HashMap::with_capacity(seed.len());
        for (collection, entries) in seed {
            if collections.category_of(&collection).is_none() {
                return Err(CoreError::ValidationError(format!(
                    "Unknown collection '{collection}' in seed data"
                )));
            }
            let docs = entries
                .into_iter()
                .map(|entry| into_document(&collection, entry))
                .collect::<CoreResult<Vec<_>>>()?;
            documents.insert(collection, docs);
        }

        Ok(Self {
            collections,
            documents: RwLock::new(documents),
        })
    }

    /// Create a store seeded from a JSON file
    pub fn from_json_file(path: &Path, collections: CollectionNames) -> CoreResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            CoreError::StorageError(format!("Failed to read {}: {e}", path.display()))
        })?;
        let store = Self::from_json_str(&raw, collections)?;
        log::info!("Seeded record store from {}", path.display());
        Ok(store)
    }

    /// Add a document to a category
    pub async fn insert(&self, category: RecordCategory, doc: StoredDocument) {
        let collection = self.collections.get(category).to_string();
        self.documents
            .write()
            .await
            .entry(collection)
            .or_default()
            .push(doc);
    }

    /// Look up one document
    pub async fn get(&self, category: RecordCategory, id: &str) -> Option<StoredDocument> {
        self.documents
            .read()
            .await
            .get(self.collections.get(category))
            .and_then(|docs| docs.iter().find(|d| d.id == id))
            .cloned()
    }
}

fn into_document(collection: &str, mut entry: Map<String, Value>) -> CoreResult<StoredDocument> {
    match entry.remove("id") {
        Some(Value::String(id)) if !id.is_empty() => {
            Ok(StoredDocument::new(id, Value::Object(entry)))
        }
        _ => Err(CoreError::ValidationError(format!(
            "Document in '{collection}' is missing a string id"
        ))),
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn list_all(&self, category: RecordCategory) -> CoreResult<Vec<StoredDocument>> {
        Ok(self
            .documents
            .read()
            .await
            .get(self.collections.get(category))
            .cloned()
            .unwrap_or_default())
    }

    async fn update_status(
        &self,
        category: RecordCategory,
        id: &str,
        status: &str,
        updated_at: DateTime<Utc>,
    ) -> CoreResult<()> {
        let mut documents = self.documents.write().await;
        let doc = documents
            .get_mut(self.collections.get(category))
            .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
            .ok_or_else(|| CoreError::RecordNotFound {
                category,
                id: id.to_string(),
            })?;

        let Value::Object(fields) = &mut doc.data else {
            return Err(CoreError::StorageError(format!(
                "{category} {id} is not an object document"
            )));
        };
        fields.insert("status".to_string(), Value::String(status.to_string()));
        fields.insert(
            "updatedAt".to_string(),
            Value::String(updated_at.to_rfc3339()),
        );
        Ok(())
    }
}

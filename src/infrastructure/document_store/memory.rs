use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::domain::errors::{DomainError, DomainResult};

use super::store::{Document, DocumentStore, Filter, entity_label};

/// In-memory [`DocumentStore`]: the backing store for tests and for running
/// the core without a cloud project. Documents are kept per collection,
/// keyed by their `id` field.
#[derive(Default)]
pub struct InMemoryDocumentStore {
    collections: RwLock<HashMap<String, BTreeMap<String, Document>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn doc_id(doc: &Document) -> DomainResult<String> {
    doc.get("id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| DomainError::Validation("document is missing a string id field".to_string()))
}

fn merge(target: &mut Document, patch: Document) -> DomainResult<()> {
    let Value::Object(entries) = patch else {
        return Err(DomainError::Validation(
            "update patch must be a JSON object".to_string(),
        ));
    };

    let Some(target) = target.as_object_mut() else {
        return Err(DomainError::Validation(
            "stored document is not a JSON object".to_string(),
        ));
    };

    for (field, value) in entries {
        target.insert(field, value);
    }
    Ok(())
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> DomainResult<Option<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    async fn query(&self, collection: &str, filter: Filter) -> DomainResult<Vec<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.values()
                    .filter(|doc| filter.matches(doc))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn insert(&self, collection: &str, doc: Document) -> DomainResult<()> {
        let id = doc_id(&doc)?;
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();

        if docs.contains_key(&id) {
            return Err(DomainError::InvalidState(format!(
                "{} {id} already exists",
                entity_label(collection)
            )));
        }

        docs.insert(id, doc);
        Ok(())
    }

    async fn update(&self, collection: &str, id: &str, patch: Document) -> DomainResult<()> {
        let mut collections = self.collections.write().await;
        let doc = collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| DomainError::NotFound {
                entity: entity_label(collection),
                id: id.to_string(),
            })?;

        merge(doc, patch)
    }

    async fn update_guarded(
        &self,
        collection: &str,
        id: &str,
        guard_field: &str,
        guard_value: Value,
        patch: Document,
    ) -> DomainResult<bool> {
        let mut collections = self.collections.write().await;
        let doc = collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| DomainError::NotFound {
                entity: entity_label(collection),
                id: id.to_string(),
            })?;

        if doc.get(guard_field) != Some(&guard_value) {
            return Ok(false);
        }

        merge(doc, patch)?;
        Ok(true)
    }

    async fn delete(&self, collection: &str, id: &str) -> DomainResult<()> {
        let mut collections = self.collections.write().await;
        let removed = collections
            .get_mut(collection)
            .and_then(|docs| docs.remove(id));

        match removed {
            Some(_) => Ok(()),
            None => Err(DomainError::NotFound {
                entity: entity_label(collection),
                id: id.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn insert_then_get_roundtrips() {
        let store = InMemoryDocumentStore::new();
        store
            .insert("clients", json!({ "id": "c1", "name": "Ana" }))
            .await
            .unwrap();

        let doc = store.get("clients", "c1").await.unwrap();
        assert_eq!(doc, Some(json!({ "id": "c1", "name": "Ana" })));
        assert_eq!(store.get("clients", "c2").await.unwrap(), None);
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_ids_and_missing_ids() {
        let store = InMemoryDocumentStore::new();
        store.insert("plans", json!({ "id": "p1" })).await.unwrap();

        let duplicate = store.insert("plans", json!({ "id": "p1" })).await;
        assert!(matches!(duplicate, Err(DomainError::InvalidState(_))));

        let missing_id = store.insert("plans", json!({ "name": "x" })).await;
        assert!(matches!(missing_id, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn update_merges_patch_and_fails_on_missing_doc() {
        let store = InMemoryDocumentStore::new();
        store
            .insert("clients", json!({ "id": "c1", "is_active": true, "phone": null }))
            .await
            .unwrap();

        store
            .update("clients", "c1", json!({ "is_active": false }))
            .await
            .unwrap();

        let doc = store.get("clients", "c1").await.unwrap().unwrap();
        assert_eq!(doc["is_active"], json!(false));
        assert_eq!(doc["phone"], json!(null));

        let gone = store.update("clients", "nope", json!({})).await;
        assert!(matches!(gone, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn guarded_update_writes_only_when_guard_matches() {
        let store = InMemoryDocumentStore::new();
        store
            .insert("subscriptions", json!({ "id": "s1", "version": 3, "end_date": "2025-01-10" }))
            .await
            .unwrap();

        let stale = store
            .update_guarded(
                "subscriptions",
                "s1",
                "version",
                json!(2),
                json!({ "end_date": "2025-02-09", "version": 3 }),
            )
            .await
            .unwrap();
        assert!(!stale);
        let doc = store.get("subscriptions", "s1").await.unwrap().unwrap();
        assert_eq!(doc["end_date"], json!("2025-01-10"));

        let applied = store
            .update_guarded(
                "subscriptions",
                "s1",
                "version",
                json!(3),
                json!({ "end_date": "2025-02-09", "version": 4 }),
            )
            .await
            .unwrap();
        assert!(applied);
        let doc = store.get("subscriptions", "s1").await.unwrap().unwrap();
        assert_eq!(doc["end_date"], json!("2025-02-09"));
        assert_eq!(doc["version"], json!(4));
    }

    #[tokio::test]
    async fn query_filters_on_field_equality() {
        let store = InMemoryDocumentStore::new();
        store
            .insert("payments", json!({ "id": "p1", "client_id": "c1" }))
            .await
            .unwrap();
        store
            .insert("payments", json!({ "id": "p2", "client_id": "c2" }))
            .await
            .unwrap();
        store
            .insert("payments", json!({ "id": "p3", "client_id": "c1" }))
            .await
            .unwrap();

        let docs = store
            .query("payments", Filter::new().eq("client_id", "c1"))
            .await
            .unwrap();
        assert_eq!(docs.len(), 2);

        let all = store.query("payments", Filter::new()).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn delete_removes_the_document() {
        let store = InMemoryDocumentStore::new();
        store.insert("payments", json!({ "id": "p1" })).await.unwrap();

        store.delete("payments", "p1").await.unwrap();
        assert_eq!(store.get("payments", "p1").await.unwrap(), None);

        let gone = store.delete("payments", "p1").await;
        assert!(matches!(gone, Err(DomainError::NotFound { .. })));
    }
}

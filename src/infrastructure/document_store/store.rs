use async_trait::async_trait;
use mockall::automock;
use serde_json::Value;

use crate::domain::errors::DomainResult;

/// A persisted document: a JSON object carrying at least a string `id`.
pub type Document = Value;

/// Conjunction of field-equality clauses, the only filtering the backing
/// stores are assumed to support. Anything richer is done repo-side.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    clauses: Vec<(String, Value)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.clauses.push((field.to_string(), value.into()));
        self
    }

    pub fn matches(&self, doc: &Document) -> bool {
        self.clauses
            .iter()
            .all(|(field, value)| doc.get(field) == Some(value))
    }
}

/// Generic CRUD collaborator over a remote document store. Reads are
/// eventually consistent and plain updates are last-write-wins;
/// `update_guarded` is the one compare-and-swap primitive, used to serialize
/// renewals per subscription.
#[async_trait]
#[automock]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, collection: &str, id: &str) -> DomainResult<Option<Document>>;

    async fn query(&self, collection: &str, filter: Filter) -> DomainResult<Vec<Document>>;

    /// The document must already carry its `id` field.
    async fn insert(&self, collection: &str, doc: Document) -> DomainResult<()>;

    /// Shallow-merges `patch` into the stored document. `NotFound` when the
    /// document is gone.
    async fn update(&self, collection: &str, id: &str, patch: Document) -> DomainResult<()>;

    /// Like `update`, but only writes when the stored document's
    /// `guard_field` still equals `guard_value`. `Ok(false)` reports a
    /// stale guard without writing; a missing document is `NotFound`.
    async fn update_guarded(
        &self,
        collection: &str,
        id: &str,
        guard_field: &str,
        guard_value: Value,
        patch: Document,
    ) -> DomainResult<bool>;

    async fn delete(&self, collection: &str, id: &str) -> DomainResult<()>;
}

/// Collection names used by the repositories in this crate.
pub mod collections {
    pub const CLIENTS: &str = "clients";
    pub const PLANS: &str = "plans";
    pub const SUBSCRIPTIONS: &str = "subscriptions";
    pub const PAYMENTS: &str = "payments";
}

pub(crate) fn entity_label(collection: &str) -> &'static str {
    match collection {
        collections::CLIENTS => "client",
        collections::PLANS => "plan",
        collections::SUBSCRIPTIONS => "subscription",
        collections::PAYMENTS => "payment",
        _ => "document",
    }
}

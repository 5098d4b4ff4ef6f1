use anyhow::Context;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::errors::{DomainError, DomainResult};

use super::store::Document;

pub mod clients;
pub mod payments;
pub mod plans;
pub mod subscriptions;

pub(crate) fn encode<T: Serialize>(entity: &T) -> DomainResult<Document> {
    serde_json::to_value(entity)
        .context("failed to encode entity as a document")
        .map_err(DomainError::Transport)
}

pub(crate) fn decode<T: DeserializeOwned>(doc: Document) -> DomainResult<T> {
    serde_json::from_value(doc)
        .context("store returned a corrupt document")
        .map_err(DomainError::Transport)
}

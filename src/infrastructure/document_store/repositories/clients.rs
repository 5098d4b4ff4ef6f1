use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;

use crate::domain::entities::clients::ClientEntity;
use crate::domain::errors::DomainResult;
use crate::domain::repositories::clients::ClientRepository;
use crate::infrastructure::document_store::store::{
    DocumentStore, Filter, collections::CLIENTS,
};

use super::{decode, encode};

pub struct ClientDocuments<S>
where
    S: DocumentStore + 'static,
{
    store: Arc<S>,
}

impl<S> ClientDocuments<S>
where
    S: DocumentStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S> ClientRepository for ClientDocuments<S>
where
    S: DocumentStore + 'static,
{
    async fn find_by_id(&self, client_id: Uuid) -> DomainResult<Option<ClientEntity>> {
        self.store
            .get(CLIENTS, &client_id.to_string())
            .await?
            .map(decode)
            .transpose()
    }

    async fn list(&self) -> DomainResult<Vec<ClientEntity>> {
        let docs = self.store.query(CLIENTS, Filter::new()).await?;
        let mut clients = docs
            .into_iter()
            .map(decode::<ClientEntity>)
            .collect::<DomainResult<Vec<_>>>()?;

        clients.sort_by(|a, b| {
            (a.last_name.as_str(), a.first_name.as_str())
                .cmp(&(b.last_name.as_str(), b.first_name.as_str()))
        });
        Ok(clients)
    }

    async fn insert(&self, client: ClientEntity) -> DomainResult<Uuid> {
        self.store.insert(CLIENTS, encode(&client)?).await?;
        Ok(client.id)
    }

    async fn set_active(&self, client_id: Uuid, is_active: bool) -> DomainResult<()> {
        self.store
            .update(
                CLIENTS,
                &client_id.to_string(),
                json!({ "is_active": is_active }),
            )
            .await
    }

    async fn delete(&self, client_id: Uuid) -> DomainResult<()> {
        self.store.delete(CLIENTS, &client_id.to_string()).await
    }
}

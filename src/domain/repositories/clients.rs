use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::clients::ClientEntity;
use crate::domain::errors::DomainResult;

#[async_trait]
#[automock]
pub trait ClientRepository {
    async fn find_by_id(&self, client_id: Uuid) -> DomainResult<Option<ClientEntity>>;
    async fn list(&self) -> DomainResult<Vec<ClientEntity>>;
    async fn insert(&self, client: ClientEntity) -> DomainResult<Uuid>;
    /// Baja / reactivation. Administrative; does not touch subscriptions.
    async fn set_active(&self, client_id: Uuid, is_active: bool) -> DomainResult<()>;
    /// Hard delete, administrative escape hatch only.
    async fn delete(&self, client_id: Uuid) -> DomainResult<()>;
}

use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::plans::PlanEntity;
use crate::domain::errors::DomainResult;

#[async_trait]
#[automock]
pub trait PlanRepository {
    async fn find_by_id(&self, plan_id: Uuid) -> DomainResult<Option<PlanEntity>>;
    async fn list_active(&self) -> DomainResult<Vec<PlanEntity>>;
    async fn insert(&self, plan: PlanEntity) -> DomainResult<Uuid>;
    async fn set_active(&self, plan_id: Uuid, is_active: bool) -> DomainResult<()>;
}

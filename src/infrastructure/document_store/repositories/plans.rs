use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;

use crate::domain::entities::plans::PlanEntity;
use crate::domain::errors::DomainResult;
use crate::domain::repositories::plans::PlanRepository;
use crate::infrastructure::document_store::store::{DocumentStore, Filter, collections::PLANS};

use super::{decode, encode};

pub struct PlanDocuments<S>
where
    S: DocumentStore + 'static,
{
    store: Arc<S>,
}

impl<S> PlanDocuments<S>
where
    S: DocumentStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S> PlanRepository for PlanDocuments<S>
where
    S: DocumentStore + 'static,
{
    async fn find_by_id(&self, plan_id: Uuid) -> DomainResult<Option<PlanEntity>> {
        self.store
            .get(PLANS, &plan_id.to_string())
            .await?
            .map(decode)
            .transpose()
    }

    async fn list_active(&self) -> DomainResult<Vec<PlanEntity>> {
        let docs = self
            .store
            .query(PLANS, Filter::new().eq("is_active", true))
            .await?;
        let mut plans = docs
            .into_iter()
            .map(decode::<PlanEntity>)
            .collect::<DomainResult<Vec<_>>>()?;

        plans.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(plans)
    }

    async fn insert(&self, plan: PlanEntity) -> DomainResult<Uuid> {
        self.store.insert(PLANS, encode(&plan)?).await?;
        Ok(plan.id)
    }

    async fn set_active(&self, plan_id: Uuid, is_active: bool) -> DomainResult<()> {
        self.store
            .update(PLANS, &plan_id.to_string(), json!({ "is_active": is_active }))
            .await
    }
}

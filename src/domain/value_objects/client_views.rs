use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::{
    clients::ClientEntity, plans::PlanEntity, subscriptions::SubscriptionEntity,
};
use crate::domain::value_objects::enums::expiry_buckets::ExpiryBucket;

/// Per-client composite read model behind the member list. Computed on every
/// read, never persisted.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ClientWithSubscription {
    pub client: ClientEntity,
    pub view: SubscriptionView,
}

/// Tagged view so consumers must handle the client-without-subscription case
/// instead of poking at a bag of optional fields.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SubscriptionView {
    NoSubscription,
    Active {
        /// Snapshot of the row with its payment status recomputed against
        /// today (a stored `Paid` past its window reads back as `Overdue`).
        subscription: SubscriptionEntity,
        plan: PlanRef,
        days_until_expiration: i64,
        bucket: ExpiryBucket,
        next_payment_date: NaiveDate,
    },
}

/// Per-item degrade for list views: a failed plan lookup yields a
/// placeholder instead of failing the whole batch.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlanRef {
    Resolved(PlanEntity),
    Unavailable { plan_id: Uuid },
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardStats {
    pub total_clients: usize,
    pub active_clients: usize,
    /// Distinct clients whose single active subscription falls in the
    /// expiring bucket. Counted per client, never per subscription row.
    pub expiring_this_week: usize,
    /// Payments recorded between the first of the current month and today,
    /// both inclusive, in minor currency units.
    pub monthly_income_minor: i64,
}

use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::subscriptions::SubscriptionEntity;
use crate::domain::errors::DomainResult;
use crate::domain::value_objects::enums::payment_statuses::PaymentStatus;

/// The three fields a renewal rewrites, applied as one guarded update.
#[derive(Debug, Clone, PartialEq)]
pub struct RenewalUpdate {
    pub end_date: NaiveDate,
    pub payment_status: PaymentStatus,
    pub late_fee_minor: i64,
}

#[async_trait]
#[automock]
pub trait SubscriptionRepository {
    async fn find_by_id(
        &self,
        subscription_id: Uuid,
    ) -> DomainResult<Option<SubscriptionEntity>>;

    /// The client's active subscription: the row with the latest end date.
    /// In the intended flow there is exactly one row per client; this is the
    /// only place that resolves the convention when there are more.
    async fn find_active_for_client(
        &self,
        client_id: Uuid,
    ) -> DomainResult<Option<SubscriptionEntity>>;

    async fn insert(&self, subscription: SubscriptionEntity) -> DomainResult<Uuid>;

    /// Writes `update` plus a version bump, guarded on `expected_version`.
    /// `Ok(false)` means the guard failed (a concurrent renewal landed
    /// first); a vanished row is a `NotFound` error.
    async fn apply_renewal(
        &self,
        subscription_id: Uuid,
        expected_version: u64,
        update: RenewalUpdate,
    ) -> DomainResult<bool>;

    /// Bulk-sets every row of the client to `Overdue`, leaving end dates and
    /// late fees untouched. Returns the number of rows written.
    async fn mark_all_overdue_for_client(&self, client_id: Uuid) -> DomainResult<u64>;
}

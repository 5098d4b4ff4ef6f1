use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::enums::payment_statuses::PaymentStatus;

/// Persisted shape of the `subscriptions` collection: one evolving row per
/// client holding its current membership window.
///
/// The row is created once, in `Pending` state with a zero-length window,
/// and mutated in place by every renewal. `version` backs the optimistic
/// guard that serializes concurrent renewals of the same row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubscriptionEntity {
    pub id: Uuid,
    pub client_id: Uuid,
    pub plan_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub payment_status: PaymentStatus,
    /// Accumulated late fee of the latest renewal, minor currency units.
    pub late_fee_minor: i64,
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

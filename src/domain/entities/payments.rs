use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::enums::payment_methods::PaymentMethod;

/// Persisted shape of the `payments` collection. Immutable once written;
/// the only sanctioned delete is the recorder's compensating action when a
/// renewal fails after the payment was already stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentEntity {
    pub id: Uuid,
    pub client_id: Uuid,
    pub subscription_id: Uuid,
    /// Amount in minor currency units. Always > 0.
    pub amount_minor: i64,
    /// Local calendar day the payment was made, already midnight-normalized.
    pub payment_date: NaiveDate,
    pub method: PaymentMethod,
    pub recorded_at: DateTime<Utc>,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Persisted shape of the `plans` collection. Administrative edits to price,
/// duration or the active flag never retroactively alter subscriptions that
/// already reference the plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanEntity {
    pub id: Uuid,
    pub name: String,
    /// Whole days the plan covers per renewal. Always >= 1.
    pub duration_days: i64,
    /// Price in minor currency units.
    pub price_minor: i64,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

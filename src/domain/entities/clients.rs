use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::enums::genders::Gender;

/// Persisted shape of the `clients` collection. The active flag gates
/// whether a subscription may be created or renewed for this client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientEntity {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub phone: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl ClientEntity {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

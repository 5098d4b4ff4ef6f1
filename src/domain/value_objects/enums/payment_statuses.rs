use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Payment state of a subscription window. `Pending` marks a freshly created
/// subscription that is still waiting for its first payment.
#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    #[default]
    Pending,
    Overdue,
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Pending => "pending",
            PaymentStatus::Overdue => "overdue",
        };
        write!(f, "{}", status)
    }
}

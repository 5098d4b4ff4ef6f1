use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Read-only classification of a subscription window against today. Never
/// persisted; recomputed on every read.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryBucket {
    Overdue,
    Expiring,
    Ok,
}

impl ExpiryBucket {
    /// Canonical bucketing rule. `days_until_expiration` comes from
    /// [`crate::application::renewal::expiration_days`]; the threshold is the
    /// single configured value shared by list badges and the dashboard.
    pub fn classify(days_until_expiration: i64, expiring_threshold_days: i64) -> Self {
        if days_until_expiration < 0 {
            ExpiryBucket::Overdue
        } else if days_until_expiration <= expiring_threshold_days {
            ExpiryBucket::Expiring
        } else {
            ExpiryBucket::Ok
        }
    }
}

impl Display for ExpiryBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bucket = match self {
            ExpiryBucket::Overdue => "overdue",
            ExpiryBucket::Expiring => "expiring",
            ExpiryBucket::Ok => "ok",
        };
        write!(f, "{}", bucket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_days_are_overdue() {
        assert_eq!(ExpiryBucket::classify(-1, 7), ExpiryBucket::Overdue);
        assert_eq!(ExpiryBucket::classify(-30, 7), ExpiryBucket::Overdue);
    }

    #[test]
    fn zero_to_threshold_is_expiring() {
        assert_eq!(ExpiryBucket::classify(0, 7), ExpiryBucket::Expiring);
        assert_eq!(ExpiryBucket::classify(7, 7), ExpiryBucket::Expiring);
        assert_eq!(ExpiryBucket::classify(5, 5), ExpiryBucket::Expiring);
    }

    #[test]
    fn beyond_threshold_is_ok() {
        assert_eq!(ExpiryBucket::classify(8, 7), ExpiryBucket::Ok);
        assert_eq!(ExpiryBucket::classify(6, 5), ExpiryBucket::Ok);
    }
}

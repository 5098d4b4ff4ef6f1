#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub renewal: RenewalConfig,
    pub status: StatusConfig,
}

/// Renewal policy knobs. The late fee is a per-day penalty in minor currency
/// units, never hard-coded in the algorithm.
#[derive(Debug, Clone)]
pub struct RenewalConfig {
    pub late_fee_per_day_minor: i64,
    /// Used when a subscription's plan no longer resolves at payment time.
    pub default_plan_duration_days: i64,
    /// How many times a renewal re-reads and recomputes after losing a
    /// version race before giving up.
    pub retry_limit: u32,
}

impl Default for RenewalConfig {
    fn default() -> Self {
        Self {
            late_fee_per_day_minor: 500,
            default_plan_duration_days: 30,
            retry_limit: 3,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StatusConfig {
    /// Days-until-expiration at or below which a subscription counts as
    /// expiring. One value for every call site.
    pub expiring_threshold_days: i64,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            expiring_threshold_days: 7,
        }
    }
}

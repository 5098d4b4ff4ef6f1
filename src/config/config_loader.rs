use std::str::FromStr;

use anyhow::{Context, Result};

use super::config_model::{AppConfig, RenewalConfig, StatusConfig};

pub fn load() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let defaults = RenewalConfig::default();
    let renewal = RenewalConfig {
        late_fee_per_day_minor: env_or("LATE_FEE_PER_DAY_MINOR", defaults.late_fee_per_day_minor)?,
        default_plan_duration_days: env_or(
            "DEFAULT_PLAN_DURATION_DAYS",
            defaults.default_plan_duration_days,
        )?,
        retry_limit: env_or("RENEWAL_RETRY_LIMIT", defaults.retry_limit)?,
    };

    let status = StatusConfig {
        expiring_threshold_days: env_or(
            "EXPIRING_THRESHOLD_DAYS",
            StatusConfig::default().expiring_threshold_days,
        )?,
    };

    Ok(AppConfig { renewal, status })
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("{key} is invalid: {raw}")),
        Err(_) => Ok(default),
    }
}

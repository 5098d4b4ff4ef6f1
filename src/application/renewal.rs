//! Pure renewal and expiration arithmetic. Everything here works on
//! `NaiveDate` (whole local calendar days, already midnight-normalized at
//! the boundary) and is deterministic given explicit dates; all I/O stays in
//! the use cases.

use chrono::{Duration, NaiveDate};

use crate::domain::value_objects::enums::payment_statuses::PaymentStatus;

#[derive(Debug, Clone, PartialEq)]
pub struct RenewalOutcome {
    pub new_end_date: NaiveDate,
    pub late_fee_minor: i64,
    pub days_overdue: i64,
}

/// Moves a membership window forward for one payment.
///
/// A payment is overdue only when it lands strictly after the current end
/// date; paying on the expiration day itself is on time. The new window is
/// anchored to the payment date in both branches, so an early payer forfeits
/// whatever days were left on the old window and a late payer is not
/// backdated.
pub fn compute_renewal(
    current_end_date: NaiveDate,
    payment_date: NaiveDate,
    duration_days: i64,
    late_fee_per_day_minor: i64,
) -> RenewalOutcome {
    let days_overdue = (payment_date - current_end_date).num_days().max(0);

    RenewalOutcome {
        new_end_date: payment_date + Duration::days(duration_days),
        late_fee_minor: days_overdue * late_fee_per_day_minor,
        days_overdue,
    }
}

/// Signed whole-day gap between an end date and today: `0` means "expires
/// today", negative values are the overdue magnitude.
///
/// This is the one canonical definition; dashboard counts, list badges and
/// status colors all derive from it.
pub fn expiration_days(end_date: NaiveDate, today: NaiveDate) -> i64 {
    (end_date - today).num_days()
}

/// Status the UI should show for a subscription snapshot: a stored `Paid`
/// whose window has already elapsed reads back as `Overdue`.
pub fn effective_payment_status(
    stored: PaymentStatus,
    days_until_expiration: i64,
) -> PaymentStatus {
    match stored {
        PaymentStatus::Paid if days_until_expiration < 0 => PaymentStatus::Overdue,
        other => other,
    }
}

use chrono::{DateTime, Local, NaiveDate, Utc};
use mockall::automock;

/// Injectable wall clock. The renewal arithmetic is pure given explicit
/// dates; this trait is the only place "now" enters the system.
#[automock]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
    /// Current calendar day in the ambient local timezone, used for every
    /// whole-day comparison.
    fn today(&self) -> NaiveDate;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Deterministic clock for tests: `today` is the date of the fixed instant.
#[derive(Debug, Clone)]
pub struct FixedClock {
    pub now: DateTime<Utc>,
}

impl FixedClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }
}

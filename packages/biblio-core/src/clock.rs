//! Date source for loan stamping.

use chrono::{Local, NaiveDate};

/// Source of the current date.
///
/// Checkout stamps each loan with a single instantaneous sample from the
/// injected clock, which keeps ledger behavior deterministic under test.
pub trait Clock {
    /// Returns today's date.
    fn today(&self) -> NaiveDate;
}

/// System clock reading the local date.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a fixed date, for tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

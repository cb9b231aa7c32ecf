//! Injectable time source.
//!
//! The caches and the consolidation pass take an explicit clock instead of
//! calling `Utc::now()` directly, so freshness rules can be exercised in
//! tests without sleeping.

use chrono::{DateTime, Utc};

/// A source of "now".
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

//! Daily Extremes Store
//!
//! Holds the single live `DailyExtremes` record for 24K gold per gram and
//! folds every fetched price into it.
//!
//! The read-compare-write sequence, including the clock read, runs under one
//! mutex so concurrent requests that straddle midnight or race on a new high
//! serialize. Callers fetch upstream before calling `update`; nothing inside
//! the critical section does I/O.
//!
//! Day boundaries are computed in a configured UTC offset, not the host
//! timezone. Records for past days are dropped, not archived.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use types::extremes::DailyExtremes;
use types::numeric::Price;

use crate::clock::{Clock, SystemClock};

/// Anything handlers can feed observed prices into.
pub trait ExtremesTracker: Send + Sync {
    /// Fold `price` into today's record and return the updated record.
    fn update(&self, price: Price) -> DailyExtremes;
}

/// Configuration for the extremes store.
#[derive(Debug, Clone, Copy)]
pub struct ExtremesConfig {
    /// Offset whose local midnight starts a new record.
    pub day_offset: FixedOffset,
}

impl Default for ExtremesConfig {
    fn default() -> Self {
        Self {
            day_offset: Utc.fix(),
        }
    }
}

pub struct ExtremesStore {
    clock: Arc<dyn Clock>,
    config: ExtremesConfig,
    live: Mutex<Option<DailyExtremes>>,
}

impl ExtremesStore {
    pub fn new(config: ExtremesConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            config,
            live: Mutex::new(None),
        }
    }

    pub fn with_system_clock(config: ExtremesConfig) -> Self {
        Self::new(config, Arc::new(SystemClock))
    }

    /// Fold one observed price into today's record.
    ///
    /// Starts a fresh record when none exists or the live one belongs to an
    /// earlier day; otherwise moves high/low on strict improvement only. A
    /// record dated after the clock's day (the clock stepped back over
    /// midnight) stays live.
    pub fn update(&self, price: Price) -> DailyExtremes {
        let mut live = self.lock();
        let now = self.clock.now();
        let today = self.date_of(now);

        match live.as_mut() {
            Some(record) if record.date >= today => {
                let movement = record.observe(price, now);
                if movement.new_high {
                    tracing::debug!(%price, "new daily high");
                }
                if movement.new_low {
                    tracing::debug!(%price, "new daily low");
                }
                record.clone()
            }
            _ => {
                tracing::debug!(date = %today, open = %price, "opening daily extremes record");
                let record = DailyExtremes::open_day(today, price, now);
                *live = Some(record.clone());
                record
            }
        }
    }

    /// Today's record, if any price has been observed today.
    pub fn current(&self) -> Option<DailyExtremes> {
        let live = self.lock();
        let today = self.date_of(self.clock.now());
        live.as_ref().filter(|r| r.date == today).cloned()
    }

    fn date_of(&self, at: DateTime<Utc>) -> NaiveDate {
        at.with_timezone(&self.config.day_offset).date_naive()
    }

    // Every write leaves the record consistent, so a panic elsewhere while
    // holding the lock does not invalidate it.
    fn lock(&self) -> MutexGuard<'_, Option<DailyExtremes>> {
        self.live.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ExtremesTracker for ExtremesStore {
    fn update(&self, price: Price) -> DailyExtremes {
        ExtremesStore::update(self, price)
    }
}

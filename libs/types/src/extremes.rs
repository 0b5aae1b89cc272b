//! Daily extremes record
//!
//! Open, running high and running low for one price series on one calendar
//! day. The record is keyed by `date`; a new day starts a new record.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::numeric::Price;

/// Today's open/high/low for a single series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyExtremes {
    pub date: NaiveDate,
    /// First price observed on `date`. Never overwritten.
    pub open: Price,
    pub high: Price,
    pub high_time: DateTime<Utc>,
    pub low: Price,
    pub low_time: DateTime<Utc>,
}

/// Which sides of the record an observation moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Movement {
    pub new_high: bool,
    pub new_low: bool,
}

impl DailyExtremes {
    /// Start a record from the first observation of the day.
    pub fn open_day(date: NaiveDate, price: Price, at: DateTime<Utc>) -> Self {
        Self {
            date,
            open: price,
            high: price,
            high_time: at,
            low: price,
            low_time: at,
        }
    }

    /// Fold one observation into the record.
    ///
    /// Strict comparisons: a price equal to the current high or low leaves
    /// the corresponding timestamp untouched. Timestamps never move backwards,
    /// so an `at` earlier than the recorded time keeps the recorded time.
    pub fn observe(&mut self, price: Price, at: DateTime<Utc>) -> Movement {
        let mut movement = Movement::default();
        if price > self.high {
            self.high = price;
            self.high_time = at.max(self.high_time);
            movement.new_high = true;
        }
        if price < self.low {
            self.low = price;
            self.low_time = at.max(self.low_time);
            movement.new_low = true;
        }
        movement
    }

    /// Validate record integrity (low <= open <= high).
    pub fn is_valid(&self) -> bool {
        self.low <= self.high && self.low <= self.open && self.open <= self.high
    }
}

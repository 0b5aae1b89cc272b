use chrono::{DateTime, Utc};
use serde::Serialize;
use types::extremes::DailyExtremes;
use types::numeric::Price;
use types::snapshot::GoldPriceSnapshot;

/// Gold quote merged with today's extremes for the 24K per-gram series.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoldPriceResponse {
    #[serde(flatten)]
    pub price: GoldPriceSnapshot,
    pub today_high: Price,
    pub today_high_time: DateTime<Utc>,
    pub today_low: Price,
    pub today_low_time: DateTime<Utc>,
    pub today_open: Price,
}

impl GoldPriceResponse {
    pub fn new(price: GoldPriceSnapshot, extremes: DailyExtremes) -> Self {
        Self {
            price,
            today_high: extremes.high,
            today_high_time: extremes.high_time,
            today_low: extremes.low,
            today_low_time: extremes.low_time,
            today_open: extremes.open,
        }
    }
}

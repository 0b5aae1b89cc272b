//! Price snapshots returned by upstream fetchers
//!
//! Snapshots are immutable once built and serialize directly into the
//! gateway's JSON payloads (camelCase field names).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::numeric::Price;

/// Troy ounces in one kilogram.
pub const TROY_OUNCES_PER_KG: Decimal = Decimal::from_parts(321_507_466, 0, 0, false, 7);

/// Grams in one troy ounce.
pub const GRAMS_PER_TROY_OUNCE: Decimal = Decimal::from_parts(311_034_768, 0, 0, false, 7);

/// Gold quote in the regional currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoldPriceSnapshot {
    /// ISO 4217 code, e.g. "INR".
    pub currency: String,
    pub price_per_ounce: Price,
    /// 24 karat, per gram.
    #[serde(rename = "price24k")]
    pub price_24k: Price,
    #[serde(rename = "price22k")]
    pub price_22k: Price,
    #[serde(rename = "price18k")]
    pub price_18k: Price,
    /// Change per ounce since the previous close.
    pub change: Price,
    pub change_percent: Price,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_close: Option<Price>,
    pub timestamp: DateTime<Utc>,
}

/// Market reading attached to a gold-silver ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatioSignal {
    SilverUndervalued,
    Neutral,
    GoldUndervalued,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatioInterpretation {
    pub signal: RatioSignal,
    pub description: String,
}

/// Gold price divided by silver price, both per troy ounce in USD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatioSnapshot {
    pub ratio: Price,
    pub gold_price_usd: Price,
    pub silver_price_usd: Price,
    pub interpretation: RatioInterpretation,
    pub timestamp: DateTime<Utc>,
}

/// Trading session of the Shanghai Gold Exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Session {
    Day,
    Night,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketStatus {
    pub is_open: bool,
    pub session: Session,
    /// Wall-clock time in Beijing, "HH:MM".
    pub beijing_time: String,
}

/// Shanghai silver benchmark compared with the international spot price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShanghaiSilverSnapshot {
    pub currency: String,
    pub shanghai_price_cny_per_kg: Price,
    pub shanghai_price_usd_per_oz: Price,
    /// Shanghai price converted to `currency`, per kilogram.
    pub shanghai_price_local_per_kg: Price,
    pub international_price_usd_per_oz: Price,
    pub premium_usd_per_oz: Price,
    pub premium_percent: Price,
    pub usd_cny_rate: Price,
    pub usd_local_rate: Price,
    pub market_status: MarketStatus,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gold_snapshot_field_names() {
        let snapshot = GoldPriceSnapshot {
            currency: "INR".to_string(),
            price_per_ounce: Price::new(Decimal::from(233_000)),
            price_24k: Price::new(Decimal::from(7491)),
            price_22k: Price::new(Decimal::from(6867)),
            price_18k: Price::new(Decimal::from(5618)),
            change: Price::new(Decimal::from(-120)),
            change_percent: Price::new(Decimal::new(-5, 2)),
            previous_close: None,
            timestamp: DateTime::from_timestamp(0, 0).unwrap(),
        };

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["price24k"], serde_json::json!(7491.0));
        assert_eq!(json["pricePerOunce"], serde_json::json!(233000.0));
        assert_eq!(json["changePercent"], serde_json::json!(-0.05));
        assert!(json.get("previousClose").is_none());
    }

    #[test]
    fn test_unit_constants() {
        assert_eq!(TROY_OUNCES_PER_KG.to_string(), "32.1507466");
        assert_eq!(GRAMS_PER_TROY_OUNCE.to_string(), "31.1034768");
    }

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(
            serde_json::to_value(RatioSignal::SilverUndervalued).unwrap(),
            serde_json::json!("silver_undervalued")
        );
        assert_eq!(
            serde_json::to_value(Session::Night).unwrap(),
            serde_json::json!("night")
        );
    }
}

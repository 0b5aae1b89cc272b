//! Upstream price providers.
//!
//! `UpstreamClient` implements `PriceSource` over three HTTP feeds:
//! - a metals quote API (`{base}/{metal}/{currency}`, `x-access-token` auth)
//! - a USD-based FX table (`{ "rates": { "CNY": .., "INR": .. } }`)
//! - a Shanghai silver benchmark quote in CNY per kilogram
//!
//! Each call makes exactly one attempt per feed. A non-success HTTP status
//! or a non-positive quote is reported as `Unavailable`; transport, decode
//! and conversion overflow failures as `Failed`.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use types::numeric::Price;
use types::snapshot::{
    GoldPriceSnapshot, RatioSnapshot, ShanghaiSilverSnapshot, GRAMS_PER_TROY_OUNCE,
    TROY_OUNCES_PER_KG,
};

use crate::clock::Clock;
use crate::fetch::{FetchError, FetchOutcome, PriceSource};
use crate::{ratio, sessions};

/// Configuration for the upstream feeds.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Metals quote API base, without trailing slash.
    pub metals_api_url: String,
    pub metals_api_key: Option<String>,
    pub fx_api_url: String,
    /// Shanghai silver benchmark endpoint. Unset disables the feed.
    pub shanghai_silver_url: Option<String>,
    /// Regional currency, ISO 4217.
    pub currency: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            metals_api_url: "https://www.goldapi.io/api".to_string(),
            metals_api_key: None,
            fx_api_url: "https://open.er-api.com/v6/latest/USD".to_string(),
            shanghai_silver_url: None,
            currency: "INR".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

// ── Wire types ───────────────────────────────────────────────────────────

/// Metals API quote, per troy ounce in the requested currency.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct MetalQuote {
    pub price: f64,
    #[serde(default)]
    pub price_gram_24k: Option<f64>,
    #[serde(default)]
    pub price_gram_22k: Option<f64>,
    #[serde(default)]
    pub price_gram_18k: Option<f64>,
    #[serde(default)]
    pub ch: f64,
    #[serde(default)]
    pub chp: f64,
    #[serde(default)]
    pub prev_close_price: Option<f64>,
    /// Unix seconds.
    #[serde(default)]
    pub timestamp: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct FxTable {
    pub rates: HashMap<String, f64>,
}

/// Shanghai benchmark, CNY per kilogram.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ShanghaiQuote {
    pub price: f64,
    #[serde(default)]
    pub timestamp: Option<i64>,
}

// ── Conversions ──────────────────────────────────────────────────────────

fn quote_time(timestamp: Option<i64>, fallback: DateTime<Utc>) -> DateTime<Utc> {
    timestamp
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .unwrap_or(fallback)
}

fn per_gram_or(value: Option<f64>, fallback: Decimal) -> Result<Price, FetchError> {
    match value {
        Some(v) => Ok(Price::from_f64(v)?),
        None => Ok(Price::new(fallback)),
    }
}

/// Unwrap a checked `Decimal` operation, naming the quantity that overflowed.
fn checked(value: Option<Decimal>, what: &'static str) -> Result<Decimal, FetchError> {
    value.ok_or(FetchError::Overflow { what })
}

/// Build a gold snapshot. `None` when the quote carries no positive price.
pub(crate) fn gold_snapshot(
    quote: &MetalQuote,
    currency: &str,
    now: DateTime<Utc>,
) -> Result<Option<GoldPriceSnapshot>, FetchError> {
    let per_ounce = Price::from_f64(quote.price)?;
    let derived_24k = checked(
        per_ounce.as_decimal().checked_div(GRAMS_PER_TROY_OUNCE),
        "24K price per gram",
    )?;
    let price_24k = per_gram_or(quote.price_gram_24k, derived_24k)?;
    if !price_24k.is_positive() {
        return Ok(None);
    }

    let karat = |k: i64, what: &'static str| {
        let scaled = price_24k
            .as_decimal()
            .checked_mul(Decimal::from(k))
            .and_then(|v| v.checked_div(Decimal::from(24)));
        checked(scaled, what)
    };
    let price_22k = per_gram_or(quote.price_gram_22k, karat(22, "22K price per gram")?)?;
    let price_18k = per_gram_or(quote.price_gram_18k, karat(18, "18K price per gram")?)?;
    let previous_close = quote
        .prev_close_price
        .map(Price::from_f64)
        .transpose()?
        .map(|p| p.round_dp(2));

    Ok(Some(GoldPriceSnapshot {
        currency: currency.to_string(),
        price_per_ounce: per_ounce.round_dp(2),
        price_24k: price_24k.round_dp(2),
        price_22k: price_22k.round_dp(2),
        price_18k: price_18k.round_dp(2),
        change: Price::from_f64(quote.ch)?.round_dp(2),
        change_percent: Price::from_f64(quote.chp)?.round_dp(2),
        previous_close,
        timestamp: quote_time(quote.timestamp, now),
    }))
}

/// Build a ratio snapshot. `None` when either price is not positive.
pub(crate) fn ratio_snapshot(
    gold: &MetalQuote,
    silver: &MetalQuote,
    now: DateTime<Utc>,
) -> Result<Option<RatioSnapshot>, FetchError> {
    let gold_usd = Price::from_f64(gold.price)?;
    let silver_usd = Price::from_f64(silver.price)?;
    if !gold_usd.is_positive() {
        return Ok(None);
    }
    let Some(value) = ratio::calculate(gold_usd, silver_usd) else {
        return Ok(None);
    };

    Ok(Some(RatioSnapshot {
        ratio: value,
        gold_price_usd: gold_usd.round_dp(2),
        silver_price_usd: silver_usd.round_dp(2),
        interpretation: ratio::interpret(value),
        timestamp: quote_time(gold.timestamp, now),
    }))
}

fn rate(fx: &FxTable, currency: &str) -> Result<Decimal, FetchError> {
    if currency.eq_ignore_ascii_case("USD") {
        return Ok(Decimal::ONE);
    }
    let raw = fx
        .rates
        .get(currency)
        .copied()
        .ok_or_else(|| FetchError::MissingRate {
            currency: currency.to_string(),
        })?;
    let value = Price::from_f64(raw)?;
    if !value.is_positive() {
        return Err(FetchError::MissingRate {
            currency: currency.to_string(),
        });
    }
    Ok(value.as_decimal())
}

/// Build a Shanghai silver snapshot with cross-market premium.
/// `None` when either benchmark is not positive.
pub(crate) fn shanghai_snapshot(
    shanghai: &ShanghaiQuote,
    international: &MetalQuote,
    fx: &FxTable,
    currency: &str,
    now: DateTime<Utc>,
) -> Result<Option<ShanghaiSilverSnapshot>, FetchError> {
    let cny_per_kg = Price::from_f64(shanghai.price)?;
    let intl_usd_oz = Price::from_f64(international.price)?;
    if !cny_per_kg.is_positive() || !intl_usd_oz.is_positive() {
        return Ok(None);
    }

    let usd_cny = rate(fx, "CNY")?;
    let usd_local = rate(fx, currency)?;

    let usd_per_kg = checked(cny_per_kg.as_decimal().checked_div(usd_cny), "USD per kg")?;
    let shanghai_usd_oz = checked(usd_per_kg.checked_div(TROY_OUNCES_PER_KG), "USD per ounce")?;
    let premium = checked(
        shanghai_usd_oz.checked_sub(intl_usd_oz.as_decimal()),
        "premium",
    )?;
    let premium_percent = checked(
        premium
            .checked_div(intl_usd_oz.as_decimal())
            .and_then(|v| v.checked_mul(Decimal::ONE_HUNDRED)),
        "premium percent",
    )?;
    let local_per_kg = checked(usd_per_kg.checked_mul(usd_local), "local price per kg")?;

    Ok(Some(ShanghaiSilverSnapshot {
        currency: currency.to_string(),
        shanghai_price_cny_per_kg: cny_per_kg.round_dp(2),
        shanghai_price_usd_per_oz: Price::new(shanghai_usd_oz).round_dp(2),
        shanghai_price_local_per_kg: Price::new(local_per_kg).round_dp(2),
        international_price_usd_per_oz: intl_usd_oz.round_dp(2),
        premium_usd_per_oz: Price::new(premium).round_dp(2),
        premium_percent: Price::new(premium_percent).round_dp(2),
        usd_cny_rate: Price::new(usd_cny).round_dp(4),
        usd_local_rate: Price::new(usd_local).round_dp(4),
        market_status: sessions::market_status(now),
        timestamp: quote_time(shanghai.timestamp, now),
    }))
}

/// Collapse a fetch into the three-way outcome.
fn settle<T>(result: Result<Option<T>, FetchError>, what: &str) -> FetchOutcome<T> {
    match result {
        Ok(Some(value)) => FetchOutcome::Value(value),
        Ok(None) => FetchOutcome::unavailable(format!("{} quote was not positive", what)),
        Err(FetchError::Status { status, .. }) => {
            FetchOutcome::unavailable(format!("{} provider returned status {}", what, status))
        }
        Err(e) => FetchOutcome::Failed(e),
    }
}

// ── Client ───────────────────────────────────────────────────────────────

/// HTTP-backed price source.
pub struct UpstreamClient {
    config: UpstreamConfig,
    client: Client,
    clock: Arc<dyn Clock>,
}

impl UpstreamClient {
    pub fn new(config: UpstreamConfig, clock: Arc<dyn Clock>) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            config: UpstreamConfig {
                metals_api_url: config.metals_api_url.trim_end_matches('/').to_string(),
                ..config
            },
            client,
            clock,
        })
    }

    fn quote_url(&self, metal: &str, currency: &str) -> String {
        format!("{}/{}/{}", self.config.metals_api_url, metal, currency)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        token: Option<&str>,
    ) -> Result<T, FetchError> {
        let mut request = self.client.get(url);
        if let Some(token) = token {
            request = request.header("x-access-token", token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn quote(&self, metal: &str, currency: &str, key: &str) -> Result<MetalQuote, FetchError> {
        let url = self.quote_url(metal, currency);
        tracing::debug!(%url, "fetching metal quote");
        self.get_json(&url, Some(key)).await
    }

    async fn fetch_gold(&self, key: &str) -> Result<Option<GoldPriceSnapshot>, FetchError> {
        let quote = self.quote("XAU", &self.config.currency, key).await?;
        gold_snapshot(&quote, &self.config.currency, self.clock.now())
    }

    async fn fetch_ratio(&self, key: &str) -> Result<Option<RatioSnapshot>, FetchError> {
        let (gold, silver) =
            tokio::try_join!(self.quote("XAU", "USD", key), self.quote("XAG", "USD", key))?;
        ratio_snapshot(&gold, &silver, self.clock.now())
    }

    async fn fetch_shanghai(
        &self,
        key: &str,
        shanghai_url: &str,
    ) -> Result<Option<ShanghaiSilverSnapshot>, FetchError> {
        let (shanghai, international, fx) = tokio::try_join!(
            self.get_json::<ShanghaiQuote>(shanghai_url, None),
            self.quote("XAG", "USD", key),
            self.get_json::<FxTable>(&self.config.fx_api_url, None),
        )?;
        shanghai_snapshot(
            &shanghai,
            &international,
            &fx,
            &self.config.currency,
            self.clock.now(),
        )
    }
}

#[async_trait]
impl PriceSource for UpstreamClient {
    async fn gold_price(&self) -> FetchOutcome<GoldPriceSnapshot> {
        let Some(key) = self.config.metals_api_key.as_deref() else {
            return FetchOutcome::unavailable("metals API key not configured");
        };
        settle(self.fetch_gold(key).await, "gold")
    }

    async fn shanghai_silver_price(&self) -> FetchOutcome<ShanghaiSilverSnapshot> {
        let Some(key) = self.config.metals_api_key.as_deref() else {
            return FetchOutcome::unavailable("metals API key not configured");
        };
        let Some(url) = self.config.shanghai_silver_url.as_deref() else {
            return FetchOutcome::unavailable("Shanghai silver feed not configured");
        };
        settle(self.fetch_shanghai(key, url).await, "Shanghai silver")
    }

    async fn gold_silver_ratio(&self) -> FetchOutcome<RatioSnapshot> {
        let Some(key) = self.config.metals_api_key.as_deref() else {
            return FetchOutcome::unavailable("metals API key not configured");
        };
        settle(self.fetch_ratio(key).await, "gold-silver ratio")
    }
}

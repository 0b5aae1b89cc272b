//! Fetch outcomes and the price source seam.
//!
//! Upstream calls have three results that callers must tell apart: a value,
//! an upstream that answered but had nothing usable, and a call that failed.

use async_trait::async_trait;
use thiserror::Error;
use types::errors::PriceError;
use types::snapshot::{GoldPriceSnapshot, RatioSnapshot, ShanghaiSilverSnapshot};

/// Result of one upstream fetch.
#[derive(Debug)]
pub enum FetchOutcome<T> {
    Value(T),
    /// Upstream reachable but produced nothing usable. Worth retrying later.
    Unavailable { reason: String },
    /// The call itself failed.
    Failed(FetchError),
}

impl<T> FetchOutcome<T> {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        FetchOutcome::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn is_value(&self) -> bool {
        matches!(self, FetchOutcome::Value(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchOutcome<U> {
        match self {
            FetchOutcome::Value(v) => FetchOutcome::Value(f(v)),
            FetchOutcome::Unavailable { reason } => FetchOutcome::Unavailable { reason },
            FetchOutcome::Failed(e) => FetchOutcome::Failed(e),
        }
    }
}

impl<T> From<Result<T, FetchError>> for FetchOutcome<T> {
    fn from(result: Result<T, FetchError>) -> Self {
        match result {
            Ok(v) => FetchOutcome::Value(v),
            Err(e) => FetchOutcome::Failed(e),
        }
    }
}

/// Upstream call failures
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Upstream {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Missing exchange rate for {currency}")]
    MissingRate { currency: String },

    #[error("Invalid upstream value: {0}")]
    InvalidValue(#[from] PriceError),

    #[error("Arithmetic overflow computing {what}")]
    Overflow { what: &'static str },
}

/// Source of live price snapshots.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Gold in the regional currency with change since previous close.
    async fn gold_price(&self) -> FetchOutcome<GoldPriceSnapshot>;

    /// Shanghai silver benchmark with cross-market premium.
    async fn shanghai_silver_price(&self) -> FetchOutcome<ShanghaiSilverSnapshot>;

    /// Gold-silver ratio in USD per troy ounce.
    async fn gold_silver_ratio(&self) -> FetchOutcome<RatioSnapshot>;
}

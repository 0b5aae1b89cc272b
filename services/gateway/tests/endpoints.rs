//! Endpoint tests for the price gateway
//!
//! Drives the real router with a stub price source and a counting extremes
//! tracker wrapped around the real store.
//!
//! Tests include:
//! - Success payloads and cache headers for each endpoint
//! - Unavailable upstream → 503 (gold, ratio) or 500 (Shanghai silver)
//! - Failed upstream → generic 500 with no internal detail
//! - Extremes store untouched on failure

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use chrono::{DateTime, TimeZone, Utc};
use gateway::router::create_router;
use gateway::state::AppState;
use market_data::clock::ManualClock;
use market_data::extremes::{ExtremesConfig, ExtremesStore, ExtremesTracker};
use market_data::fetch::{FetchError, FetchOutcome, PriceSource};
use market_data::{ratio, sessions};
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;
use types::extremes::DailyExtremes;
use types::numeric::Price;
use types::snapshot::{GoldPriceSnapshot, RatioSnapshot, ShanghaiSilverSnapshot};

#[derive(Clone, Copy)]
enum Behavior {
    Value,
    Unavailable,
    Fail,
}

struct StubPrices {
    behavior: Behavior,
    gold_24k: Price,
    now: DateTime<Utc>,
}

impl StubPrices {
    fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            gold_24k: price("5000.00"),
            now: Utc.with_ymd_and_hms(2026, 3, 2, 6, 15, 0).unwrap(),
        }
    }

    fn outcome<T>(&self, value: impl FnOnce() -> T) -> FetchOutcome<T> {
        match self.behavior {
            Behavior::Value => FetchOutcome::Value(value()),
            Behavior::Unavailable => FetchOutcome::unavailable("all providers down"),
            Behavior::Fail => FetchOutcome::Failed(FetchError::Decode(
                serde_json::from_str::<Value>("{\"secret-upstream-detail\"").unwrap_err(),
            )),
        }
    }
}

#[async_trait]
impl PriceSource for StubPrices {
    async fn gold_price(&self) -> FetchOutcome<GoldPriceSnapshot> {
        self.outcome(|| GoldPriceSnapshot {
            currency: "INR".to_string(),
            price_per_ounce: price("155517.38"),
            price_24k: self.gold_24k,
            price_22k: price("4583.33"),
            price_18k: price("3750.00"),
            change: price("120.00"),
            change_percent: price("0.08"),
            previous_close: Some(price("155397.38")),
            timestamp: self.now,
        })
    }

    async fn shanghai_silver_price(&self) -> FetchOutcome<ShanghaiSilverSnapshot> {
        self.outcome(|| ShanghaiSilverSnapshot {
            currency: "INR".to_string(),
            shanghai_price_cny_per_kg: price("7800.00"),
            shanghai_price_usd_per_oz: price("33.70"),
            shanghai_price_local_per_kg: price("89916.67"),
            international_price_usd_per_oz: price("32.50"),
            premium_usd_per_oz: price("1.20"),
            premium_percent: price("3.68"),
            usd_cny_rate: price("7.2"),
            usd_local_rate: price("83"),
            market_status: sessions::market_status(self.now),
            timestamp: self.now,
        })
    }

    async fn gold_silver_ratio(&self) -> FetchOutcome<RatioSnapshot> {
        self.outcome(|| {
            let value = ratio::calculate(price("2650.40"), price("31.17")).unwrap();
            RatioSnapshot {
                ratio: value,
                gold_price_usd: price("2650.40"),
                silver_price_usd: price("31.17"),
                interpretation: ratio::interpret(value),
                timestamp: self.now,
            }
        })
    }
}

/// Real store plus a call counter.
struct CountingTracker {
    store: ExtremesStore,
    calls: AtomicUsize,
}

impl ExtremesTracker for CountingTracker {
    fn update(&self, price: Price) -> DailyExtremes {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.store.update(price)
    }
}

fn price(v: &str) -> Price {
    Price::new(v.parse::<Decimal>().unwrap())
}

fn setup(behavior: Behavior) -> (axum::Router, Arc<CountingTracker>) {
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2026, 3, 2, 6, 15, 0).unwrap(),
    ));
    let tracker = Arc::new(CountingTracker {
        store: ExtremesStore::new(ExtremesConfig::default(), clock),
        calls: AtomicUsize::new(0),
    });
    let state = AppState::new(Arc::new(StubPrices::new(behavior)), tracker.clone());
    (create_router(state), tracker)
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Option<String>, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let cache = response
        .headers()
        .get(header::CACHE_CONTROL)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, cache, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn gold_price_merges_today_extremes() {
    let (app, tracker) = setup(Behavior::Value);

    let (status, cache, body) = get(app, "/api/gold-price").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        cache.as_deref(),
        Some("public, s-maxage=60, stale-while-revalidate=120")
    );
    assert_eq!(tracker.calls.load(Ordering::SeqCst), 1);

    assert_eq!(body["price24k"], 5000.0);
    assert!(body["todayHigh"].as_f64().unwrap() >= 5000.0);
    assert!(body["todayLow"].as_f64().unwrap() <= 5000.0);
    assert_eq!(body["todayOpen"], 5000.0);
    assert_eq!(body["todayHighTime"], "2026-03-02T06:15:00Z");
    assert_eq!(body["todayLowTime"], "2026-03-02T06:15:00Z");
}

#[tokio::test]
async fn gold_price_extremes_accumulate_across_requests() {
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2026, 3, 2, 6, 15, 0).unwrap(),
    ));
    let tracker = Arc::new(CountingTracker {
        store: ExtremesStore::new(ExtremesConfig::default(), clock),
        calls: AtomicUsize::new(0),
    });
    // An earlier, higher observation the same day.
    tracker.update(price("5100.00"));

    let state = AppState::new(Arc::new(StubPrices::new(Behavior::Value)), tracker.clone());
    let (status, _, body) = get(create_router(state), "/api/gold-price").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["todayOpen"], 5100.0);
    assert_eq!(body["todayHigh"], 5100.0);
    assert_eq!(body["todayLow"], 5000.0);
    assert_eq!(tracker.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn gold_price_unavailable_returns_503_without_touching_store() {
    let (app, tracker) = setup(Behavior::Unavailable);

    let (status, cache, body) = get(app, "/api/gold-price").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(cache.is_none());
    assert!(body["error"].is_string());
    assert!(body["message"].is_string());
    assert_eq!(tracker.calls.load(Ordering::SeqCst), 0);
    assert!(tracker.store.current().is_none());
}

#[tokio::test]
async fn gold_price_failure_returns_generic_500() {
    let (app, tracker) = setup(Behavior::Fail);

    let (status, cache, body) = get(app, "/api/gold-price").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(cache.is_none());
    assert_eq!(body, serde_json::json!({ "error": "Failed to fetch gold price" }));
    assert!(!body.to_string().contains("secret-upstream-detail"));
    assert_eq!(tracker.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn ratio_success_and_failures() {
    let (app, tracker) = setup(Behavior::Value);
    let (status, cache, body) = get(app, "/api/gold-silver-ratio").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        cache.as_deref(),
        Some("public, s-maxage=3600, stale-while-revalidate=7200")
    );
    assert_eq!(body["ratio"], 85.03);
    assert_eq!(body["interpretation"]["signal"], "silver_undervalued");
    assert_eq!(tracker.calls.load(Ordering::SeqCst), 0);

    let (app, _) = setup(Behavior::Unavailable);
    let (status, _, body) = get(app, "/api/gold-silver-ratio").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["message"].is_string());

    let (app, _) = setup(Behavior::Fail);
    let (status, _, body) = get(app, "/api/gold-silver-ratio").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.get("message").is_none());
}

#[tokio::test]
async fn shanghai_silver_reports_every_failure_as_500() {
    let (app, _) = setup(Behavior::Value);
    let (status, cache, body) = get(app, "/api/shanghai-silver-price").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        cache.as_deref(),
        Some("public, s-maxage=3600, stale-while-revalidate=7200")
    );
    assert_eq!(body["premiumPercent"], 3.68);
    assert_eq!(body["marketStatus"]["isOpen"], true);
    assert_eq!(body["marketStatus"]["session"], "day");

    for behavior in [Behavior::Unavailable, Behavior::Fail] {
        let (app, _) = setup(behavior);
        let (status, cache, body) = get(app, "/api/shanghai-silver-price").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(cache.is_none());
        assert_eq!(
            body,
            serde_json::json!({ "error": "Failed to fetch Shanghai silver price" })
        );
    }
}

#[tokio::test]
async fn concurrent_gold_requests_keep_extremes_consistent() {
    let (app, tracker) = setup(Behavior::Value);

    let requests: Vec<_> = (0..32)
        .map(|_| {
            let app = app.clone();
            tokio::spawn(async move { get(app, "/api/gold-price").await })
        })
        .collect();
    for request in requests {
        let (status, _, body) = request.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        assert!(body["todayLow"].as_f64().unwrap() <= body["todayHigh"].as_f64().unwrap());
    }

    assert_eq!(tracker.calls.load(Ordering::SeqCst), 32);
    assert!(tracker.store.current().unwrap().is_valid());
}

use crate::cache::CachePolicy;
use crate::error::AppError;
use crate::state::AppState;
use axum::{Json, extract::State, response::Response};
use market_data::fetch::FetchOutcome;

const FAILED: &str = "Failed to fetch Shanghai silver price";

/// Shanghai silver has no 503 path: missing data and failures both return 500.
pub async fn shanghai_silver_price(State(state): State<AppState>) -> Result<Response, AppError> {
    match state.prices.shanghai_silver_price().await {
        FetchOutcome::Value(snapshot) => Ok(CachePolicy::SHANGHAI_SILVER.apply(Json(snapshot))),
        FetchOutcome::Unavailable { reason } => Err(AppError::NoData {
            error: FAILED.into(),
            reason,
        }),
        FetchOutcome::Failed(source) => Err(AppError::Failed {
            error: FAILED.into(),
            source: source.into(),
        }),
    }
}

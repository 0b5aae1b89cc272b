use crate::cache::CachePolicy;
use crate::error::AppError;
use crate::models::GoldPriceResponse;
use crate::state::AppState;
use axum::{Json, extract::State, response::Response};
use market_data::fetch::FetchOutcome;

pub async fn gold_price(State(state): State<AppState>) -> Result<Response, AppError> {
    // 1. Fetch before touching the extremes store
    let snapshot = match state.prices.gold_price().await {
        FetchOutcome::Value(snapshot) => snapshot,
        FetchOutcome::Unavailable { reason } => {
            tracing::warn!(%reason, "gold price unavailable");
            return Err(AppError::ServiceUnavailable {
                error: "Gold price unavailable".into(),
                message: "Unable to fetch live gold prices right now. Please try again shortly."
                    .into(),
            });
        }
        FetchOutcome::Failed(source) => {
            return Err(AppError::Failed {
                error: "Failed to fetch gold price".into(),
                source: source.into(),
            });
        }
    };

    // 2. Fold the 24K per-gram price into today's extremes
    let extremes = state.extremes.update(snapshot.price_24k);

    Ok(CachePolicy::GOLD.apply(Json(GoldPriceResponse::new(snapshot, extremes))))
}

use crate::cache::CachePolicy;
use crate::error::AppError;
use crate::state::AppState;
use axum::{Json, extract::State, response::Response};
use market_data::fetch::FetchOutcome;

pub async fn gold_silver_ratio(State(state): State<AppState>) -> Result<Response, AppError> {
    match state.prices.gold_silver_ratio().await {
        FetchOutcome::Value(snapshot) => Ok(CachePolicy::RATIO.apply(Json(snapshot))),
        FetchOutcome::Unavailable { reason } => {
            tracing::warn!(%reason, "gold-silver ratio unavailable");
            Err(AppError::ServiceUnavailable {
                error: "Gold-silver ratio unavailable".into(),
                message: "Unable to calculate the gold-silver ratio right now. Please try again later."
                    .into(),
            })
        }
        FetchOutcome::Failed(source) => Err(AppError::Failed {
            error: "Failed to fetch gold-silver ratio".into(),
            source: source.into(),
        }),
    }
}

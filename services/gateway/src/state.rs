use market_data::extremes::ExtremesTracker;
use market_data::fetch::PriceSource;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub prices: Arc<dyn PriceSource>,
    /// Today's extremes for 24K gold per gram. Only the gold handler writes.
    pub extremes: Arc<dyn ExtremesTracker>,
}

impl AppState {
    pub fn new(prices: Arc<dyn PriceSource>, extremes: Arc<dyn ExtremesTracker>) -> Self {
        Self { prices, extremes }
    }
}

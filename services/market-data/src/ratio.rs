//! Gold-silver ratio calculation and interpretation.

use rust_decimal::Decimal;
use types::numeric::Price;
use types::snapshot::{RatioInterpretation, RatioSignal};

/// Above this, silver is historically cheap relative to gold.
pub const SILVER_UNDERVALUED_ABOVE: Decimal = Decimal::from_parts(80, 0, 0, false, 0);

/// Below this, gold is historically cheap relative to silver.
pub const GOLD_UNDERVALUED_BELOW: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// `gold / silver` rounded to two places. `None` when silver is not positive.
pub fn calculate(gold: Price, silver: Price) -> Option<Price> {
    if !silver.is_positive() {
        return None;
    }
    gold.as_decimal()
        .checked_div(silver.as_decimal())
        .map(|r| Price::new(r).round_dp(2))
}

pub fn interpret(ratio: Price) -> RatioInterpretation {
    let r = ratio.as_decimal();
    let (signal, description) = if r > SILVER_UNDERVALUED_ABOVE {
        (
            RatioSignal::SilverUndervalued,
            "Silver is cheap relative to gold by historical standards",
        )
    } else if r < GOLD_UNDERVALUED_BELOW {
        (
            RatioSignal::GoldUndervalued,
            "Gold is cheap relative to silver by historical standards",
        )
    } else {
        (
            RatioSignal::Neutral,
            "Ratio is within its historical range",
        )
    };
    RatioInterpretation {
        signal,
        description: description.to_string(),
    }
}

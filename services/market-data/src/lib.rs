//! Market Data Service
//!
//! Fetches live precious-metal prices and tracks today's extremes:
//! - Daily open/high/low for 24K gold per gram
//! - Gold-silver ratio with a market reading
//! - Shanghai silver benchmark with cross-market premium and session status
//!
//! # Architecture
//!
//! ```text
//!  Metals API   FX table   Shanghai feed
//!       │           │            │
//!   ┌───▼───────────▼────────────▼───┐
//!   │         UpstreamClient         │  ← one attempt per feed
//!   └───────────────┬────────────────┘
//!                   │ FetchOutcome { Value | Unavailable | Failed }
//!             ┌─────▼─────┐
//!             │  Handler  │ (gateway)
//!             └─────┬─────┘
//!                   │ 24K price/gram, gold only
//!           ┌───────▼────────┐
//!           │ ExtremesStore  │  ← mutex-guarded, clock injected
//!           └────────────────┘
//! ```

pub mod clock;
pub mod extremes;
pub mod fetch;
pub mod ratio;
pub mod sessions;
pub mod upstream;

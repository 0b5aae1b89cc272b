//! HTTP gateway for live precious-metal prices
//!
//! Three read-only JSON endpoints under `/api`:
//! - `GET /api/gold-price`: gold in the regional currency plus today's extremes
//! - `GET /api/gold-silver-ratio`: ratio with a market reading
//! - `GET /api/shanghai-silver-price`: Shanghai benchmark vs international spot

pub mod cache;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod router;
pub mod state;

//! Types library for the precious-metal price service
//!
//! Value types shared between the market-data layer and the HTTP gateway.
//! Everything here is plain data: no I/O, no clocks, no locks.
//!
//! # Modules
//! - `numeric`: Decimal price type
//! - `snapshot`: Read-only price snapshots produced by upstream fetchers
//! - `extremes`: Today's open/high/low record
//! - `errors`: Error taxonomy for value construction

// Public modules
pub mod numeric;
pub mod snapshot;
pub mod extremes;
pub mod errors;

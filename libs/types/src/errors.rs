//! Error types for value construction
//!
//! Comprehensive error taxonomy using thiserror

use thiserror::Error;

/// Errors raised while turning upstream numbers into domain values
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PriceError {
    #[error("Non-finite price: {value}")]
    NonFinite { value: f64 },

    #[error("Price out of range: {value}")]
    OutOfRange { value: f64 },
}

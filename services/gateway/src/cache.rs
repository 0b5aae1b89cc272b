//! Response caching policy.
//!
//! Every successful price response carries a `Cache-Control` header with a
//! fresh window (shared caches serve without revalidating) followed by a
//! stale-while-revalidate window.

use std::fmt;

use axum::{
    http::header,
    response::{IntoResponse, Response},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    pub fresh_secs: u32,
    pub stale_while_revalidate_secs: u32,
}

impl CachePolicy {
    pub const GOLD: CachePolicy = CachePolicy {
        fresh_secs: 60,
        stale_while_revalidate_secs: 120,
    };

    pub const RATIO: CachePolicy = CachePolicy {
        fresh_secs: 3600,
        stale_while_revalidate_secs: 7200,
    };

    pub const SHANGHAI_SILVER: CachePolicy = CachePolicy {
        fresh_secs: 3600,
        stale_while_revalidate_secs: 7200,
    };

    /// Attach this policy to a response.
    pub fn apply(self, body: impl IntoResponse) -> Response {
        ([(header::CACHE_CONTROL, self.to_string())], body).into_response()
    }
}

impl fmt::Display for CachePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "public, s-maxage={}, stale-while-revalidate={}",
            self.fresh_secs, self.stale_while_revalidate_secs
        )
    }
}

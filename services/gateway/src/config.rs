//! Command-line and environment configuration.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use chrono::FixedOffset;
use clap::Parser;
use market_data::extremes::ExtremesConfig;
use market_data::upstream::UpstreamConfig;

#[derive(Debug, Clone, Parser)]
#[command(name = "gateway", about = "Live gold and silver price API")]
pub struct Config {
    /// Address to listen on.
    #[arg(long = "bind", env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,

    /// Regional currency for gold prices (ISO 4217).
    #[arg(long, env = "PRICE_CURRENCY", default_value = "INR")]
    pub currency: String,

    #[arg(long, env = "METALS_API_URL", default_value = "https://www.goldapi.io/api")]
    pub metals_api_url: String,

    #[arg(long, env = "METALS_API_KEY", hide_env_values = true)]
    pub metals_api_key: Option<String>,

    #[arg(long, env = "FX_API_URL", default_value = "https://open.er-api.com/v6/latest/USD")]
    pub fx_api_url: String,

    /// Shanghai silver benchmark endpoint (CNY per kg).
    #[arg(long, env = "SHANGHAI_SILVER_URL")]
    pub shanghai_silver_url: Option<String>,

    #[arg(long, env = "UPSTREAM_TIMEOUT_SECS", default_value_t = 10)]
    pub upstream_timeout_secs: u64,

    /// UTC offset, in minutes, whose midnight resets today's high/low.
    #[arg(
        long = "day-offset-minutes",
        env = "EXTREMES_UTC_OFFSET_MINUTES",
        default_value_t = 330,
        allow_negative_numbers = true
    )]
    pub day_offset_minutes: i32,
}

impl Config {
    pub fn upstream(&self) -> UpstreamConfig {
        UpstreamConfig {
            metals_api_url: self.metals_api_url.clone(),
            metals_api_key: self.metals_api_key.clone().filter(|k| !k.is_empty()),
            fx_api_url: self.fx_api_url.clone(),
            shanghai_silver_url: self.shanghai_silver_url.clone().filter(|u| !u.is_empty()),
            currency: self.currency.to_ascii_uppercase(),
            timeout: Duration::from_secs(self.upstream_timeout_secs),
        }
    }

    pub fn extremes(&self) -> anyhow::Result<ExtremesConfig> {
        let day_offset = self
            .day_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .with_context(|| format!("invalid day offset: {} minutes", self.day_offset_minutes))?;
        Ok(ExtremesConfig { day_offset })
    }
}

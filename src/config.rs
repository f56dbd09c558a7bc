use std::env;
use std::str::FromStr;
use std::time::Duration;

use bigdecimal::BigDecimal;
use thiserror::Error;
use url::Url;

use crate::domain::credentials::Credentials;
use crate::domain::discount::DiscountTable;
use crate::infrastructure::square::SquareEnvironment;

pub const DEFAULT_THANK_YOU_URL: &str = "https://organicglowskinstudio.com/thank-you";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PORT must be a valid number, got '{0}'")]
    InvalidPort(String),

    #[error("SQUARE_ENVIRONMENT must be 'sandbox' or 'production', got '{0}'")]
    UnknownEnvironment(String),

    #[error("THANK_YOU_URL must be an absolute URL, got '{url}': {source}")]
    InvalidLandingUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Invalid CHECKOUT_COUPONS entry '{0}': expected CODE=PERCENT with 0 < PERCENT <= 100")]
    InvalidCoupon(String),

    #[error("PROVIDER_TIMEOUT_SECS must be a positive number of seconds, got '{0}'")]
    InvalidTimeout(String),
}

/// Process configuration, read once at start-up.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// `None` when the access token or location id is missing; the checkout
    /// endpoint then answers every request with a configuration error.
    pub credentials: Option<Credentials>,
    pub environment: SquareEnvironment,
    pub square_base_url: Option<String>,
    pub thank_you_url: String,
    pub coupons: DiscountTable,
    pub provider_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => 8080,
        };

        let credentials = Credentials::from_parts(
            var("SQUARE_ACCESS_TOKEN"),
            var("SQUARE_LOCATION_ID"),
        );

        let environment = match var("SQUARE_ENVIRONMENT") {
            Some(raw) => raw
                .parse::<SquareEnvironment>()
                .map_err(ConfigError::UnknownEnvironment)?,
            None => {
                log::warn!("SQUARE_ENVIRONMENT not set, defaulting to sandbox");
                SquareEnvironment::Sandbox
            }
        };

        let thank_you_url = var("THANK_YOU_URL")
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|| DEFAULT_THANK_YOU_URL.to_string());
        Url::parse(&thank_you_url).map_err(|source| ConfigError::InvalidLandingUrl {
            url: thank_you_url.clone(),
            source,
        })?;

        let coupons = match lookup("CHECKOUT_COUPONS") {
            Some(raw) => parse_coupons(&raw)?,
            None => DiscountTable::default(),
        };

        let provider_timeout = match var("PROVIDER_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            },
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            host,
            port,
            credentials,
            environment,
            square_base_url: var("SQUARE_BASE_URL"),
            thank_you_url,
            coupons,
            provider_timeout,
        })
    }
}

/// Parse `GLOW15=15,WELCOME10=10`. An empty string yields an empty table,
/// which disables coupons.
pub fn parse_coupons(raw: &str) -> Result<DiscountTable, ConfigError> {
    let hundred = BigDecimal::from(100);
    let mut entries = Vec::new();

    for entry in raw.split(',').filter(|e| !e.trim().is_empty()) {
        let invalid = || ConfigError::InvalidCoupon(entry.trim().to_string());
        let (code, pct) = entry.split_once('=').ok_or_else(invalid)?;
        let (code, pct) = (code.trim(), pct.trim());
        if code.is_empty() {
            return Err(invalid());
        }
        let value = BigDecimal::from_str(pct).map_err(|_| invalid())?;
        if value <= BigDecimal::from(0) || value > hundred {
            return Err(invalid());
        }
        entries.push((code.to_string(), pct.to_string()));
    }

    Ok(DiscountTable::new(entries))
}

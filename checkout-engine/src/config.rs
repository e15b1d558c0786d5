//! Engine configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | POS_TAX_RATE_PERCENT | 10 | Tax rate applied to the cart subtotal |
//! | POS_GATEWAY_URL | http://localhost:3000 | Base URL of the transaction backend |
//! | POS_GATEWAY_API_KEY | (empty) | API key sent with every gateway request |
//! | POS_SUBMIT_TIMEOUT_MS | 30000 | HTTP client timeout for submission calls |

use rust_decimal::Decimal;

/// Checkout engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Tax rate in whole percent (10 = 10%)
    pub tax_rate_percent: u32,
    /// Base URL of the REST transaction backend
    pub gateway_url: String,
    /// API key for the REST transaction backend
    pub gateway_api_key: String,
    /// Submission timeout in milliseconds
    pub submit_timeout_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tax_rate_percent: 10,
            gateway_url: "http://localhost:3000".into(),
            gateway_api_key: String::new(),
            submit_timeout_ms: 30_000,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables, falling back to the
    /// documented defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            tax_rate_percent: std::env::var("POS_TAX_RATE_PERCENT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.tax_rate_percent),
            gateway_url: std::env::var("POS_GATEWAY_URL").unwrap_or(defaults.gateway_url),
            gateway_api_key: std::env::var("POS_GATEWAY_API_KEY")
                .unwrap_or(defaults.gateway_api_key),
            submit_timeout_ms: std::env::var("POS_SUBMIT_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.submit_timeout_ms),
        }
    }

    /// Tax rate as a decimal fraction (10 -> 0.10)
    pub fn tax_rate(&self) -> Decimal {
        Decimal::from(self.tax_rate_percent) / Decimal::ONE_HUNDRED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tax_rate_is_ten_percent() {
        let config = EngineConfig::default();
        assert_eq!(config.tax_rate(), Decimal::new(1, 1)); // 0.1
    }

    #[test]
    fn test_from_env_falls_back_to_defaults() {
        let config = EngineConfig::from_env();
        assert_eq!(config.tax_rate_percent, 10);
        assert_eq!(config.submit_timeout_ms, 30_000);
    }
}

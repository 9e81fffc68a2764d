//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREFRONT_SHOP_URL` - Shop root the cart endpoints hang off
//!   (e.g., `https://your-store.myshopify.com/` or a locale root such as
//!   `https://shop.example/fr/`)
//!
//! ## Optional
//! - `STOREFRONT_CART_TIMEOUT_SECS` - Cart request timeout (default: 30)

use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_CART_TIMEOUT_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Shop root, always ending in `/`.
    pub shop_url: Url,
    /// Timeout for cart requests.
    pub cart_timeout: Duration,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the shop URL is missing or not an http(s)
    /// URL, or the timeout is not a number of seconds.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let shop_url = parse_shop_url(&get_required_env("STOREFRONT_SHOP_URL")?)?;
        let cart_timeout = get_optional_env("STOREFRONT_CART_TIMEOUT_SECS")
            .map(|raw| {
                raw.parse::<u64>().map_err(|e| {
                    ConfigError::InvalidEnvVar(
                        "STOREFRONT_CART_TIMEOUT_SECS".to_string(),
                        e.to_string(),
                    )
                })
            })
            .transpose()?
            .unwrap_or(DEFAULT_CART_TIMEOUT_SECS);

        Ok(Self {
            shop_url,
            cart_timeout: Duration::from_secs(cart_timeout),
        })
    }
}

/// Parse a shop root, adding the trailing `/` that `Url::join` needs to
/// keep a locale prefix.
///
/// # Errors
///
/// Returns `InvalidEnvVar` for anything that is not an absolute http(s) URL.
pub fn parse_shop_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar("STOREFRONT_SHOP_URL".to_string(), reason);

    let mut url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", url.scheme())));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

// =============================================================================
// Helper Functions
// =============================================================================

fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shop_url_adds_trailing_slash() {
        let url = parse_shop_url("https://shop.example/fr").unwrap();
        assert_eq!(url.as_str(), "https://shop.example/fr/");
        assert_eq!(
            url.join("cart/add.js").unwrap().as_str(),
            "https://shop.example/fr/cart/add.js"
        );
    }

    #[test]
    fn test_parse_shop_url_root() {
        let url = parse_shop_url("https://your-store.myshopify.com").unwrap();
        assert_eq!(url.as_str(), "https://your-store.myshopify.com/");
    }

    #[test]
    fn test_parse_shop_url_drops_query() {
        let url = parse_shop_url("https://shop.example/?ref=abc#top").unwrap();
        assert_eq!(url.as_str(), "https://shop.example/");
    }

    #[test]
    fn test_parse_shop_url_rejects_other_schemes() {
        assert!(matches!(
            parse_shop_url("ftp://shop.example/"),
            Err(ConfigError::InvalidEnvVar(..))
        ));
        assert!(matches!(
            parse_shop_url("shop.example"),
            Err(ConfigError::InvalidEnvVar(..))
        ));
    }
}

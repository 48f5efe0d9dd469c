//! Configuration types for the Shopify bulk client.
//!
//! # Overview
//!
//! - [`ShopifyConfig`]: settings shared by every client built from it
//! - [`ShopifyConfigBuilder`]: a builder for [`ShopifyConfig`]
//! - [`ShopDomain`]: a validated Shopify shop domain
//! - [`HostUrl`]: a validated API host override
//! - [`ApiVersion`]: the Admin API version to target
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use shopify_bulk::{ApiVersion, ShopifyConfig};
//!
//! let config = ShopifyConfig::builder()
//!     .api_version(ApiVersion::V2025_07)
//!     .bulk_poll_interval(Duration::from_secs(2))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.bulk_poll_interval(), Duration::from_secs(2));
//! ```

mod newtypes;
mod version;

use std::time::Duration;

pub use newtypes::{HostUrl, ShopDomain};
pub use version::ApiVersion;

use crate::error::ConfigError;

/// Default interval between two bulk operation status reads.
pub const DEFAULT_BULK_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Default bound on connection nesting when reconstructing bulk results.
pub const DEFAULT_BULK_MAX_NESTING_DEPTH: usize = 32;

/// Configuration for the Shopify bulk client.
///
/// `ShopifyConfig` is `Clone + Send + Sync` and is passed explicitly to the
/// clients that need it; there is no global configuration.
#[derive(Clone, Debug)]
pub struct ShopifyConfig {
    host: Option<HostUrl>,
    api_version: ApiVersion,
    user_agent_prefix: Option<String>,
    bulk_poll_interval: Duration,
    bulk_max_nesting_depth: usize,
}

impl ShopifyConfig {
    /// Creates a new builder for constructing a `ShopifyConfig`.
    #[must_use]
    pub fn builder() -> ShopifyConfigBuilder {
        ShopifyConfigBuilder::new()
    }

    /// Returns the API host override, if configured.
    #[must_use]
    pub const fn host(&self) -> Option<&HostUrl> {
        self.host.as_ref()
    }

    /// Returns the API version.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the fixed delay between bulk operation status reads.
    #[must_use]
    pub const fn bulk_poll_interval(&self) -> Duration {
        self.bulk_poll_interval
    }

    /// Returns the maximum connection depth accepted when reconstructing
    /// bulk results.
    #[must_use]
    pub const fn bulk_max_nesting_depth(&self) -> usize {
        self.bulk_max_nesting_depth
    }
}

impl Default for ShopifyConfig {
    fn default() -> Self {
        Self {
            host: None,
            api_version: ApiVersion::latest(),
            user_agent_prefix: None,
            bulk_poll_interval: DEFAULT_BULK_POLL_INTERVAL,
            bulk_max_nesting_depth: DEFAULT_BULK_MAX_NESTING_DEPTH,
        }
    }
}

// Verify ShopifyConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ShopifyConfig>();
};

/// Builder for constructing [`ShopifyConfig`] instances.
///
/// # Defaults
///
/// - `api_version`: latest stable version
/// - `host`: `None`
/// - `user_agent_prefix`: `None`
/// - `bulk_poll_interval`: 1 second
/// - `bulk_max_nesting_depth`: 32
#[derive(Debug, Default)]
pub struct ShopifyConfigBuilder {
    host: Option<HostUrl>,
    api_version: Option<ApiVersion>,
    user_agent_prefix: Option<String>,
    bulk_poll_interval: Option<Duration>,
    bulk_max_nesting_depth: Option<usize>,
}

impl ShopifyConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API host override.
    #[must_use]
    pub fn host(mut self, host: HostUrl) -> Self {
        self.host = Some(host);
        self
    }

    /// Sets the API version.
    #[must_use]
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the delay between two bulk operation status reads.
    ///
    /// The delay is fixed: how long a bulk operation runs depends on the
    /// amount of exported data, not on contention.
    #[must_use]
    pub const fn bulk_poll_interval(mut self, interval: Duration) -> Self {
        self.bulk_poll_interval = Some(interval);
        self
    }

    /// Sets the maximum connection depth accepted when reconstructing bulk
    /// results.
    #[must_use]
    pub const fn bulk_max_nesting_depth(mut self, depth: usize) -> Self {
        self.bulk_max_nesting_depth = Some(depth);
        self
    }

    /// Builds the [`ShopifyConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBulkSetting`] if the poll interval or
    /// the nesting depth is zero.
    pub fn build(self) -> Result<ShopifyConfig, ConfigError> {
        let bulk_poll_interval = self
            .bulk_poll_interval
            .unwrap_or(DEFAULT_BULK_POLL_INTERVAL);
        if bulk_poll_interval.is_zero() {
            return Err(ConfigError::InvalidBulkSetting {
                field: "bulk_poll_interval",
                reason: "must be greater than zero",
            });
        }

        let bulk_max_nesting_depth = self
            .bulk_max_nesting_depth
            .unwrap_or(DEFAULT_BULK_MAX_NESTING_DEPTH);
        if bulk_max_nesting_depth == 0 {
            return Err(ConfigError::InvalidBulkSetting {
                field: "bulk_max_nesting_depth",
                reason: "must allow at least one level of nesting",
            });
        }

        Ok(ShopifyConfig {
            host: self.host,
            api_version: self.api_version.unwrap_or_else(ApiVersion::latest),
            user_agent_prefix: self.user_agent_prefix,
            bulk_poll_interval,
            bulk_max_nesting_depth,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = ShopifyConfig::builder().build().unwrap();

        assert_eq!(config.api_version(), &ApiVersion::latest());
        assert!(config.host().is_none());
        assert!(config.user_agent_prefix().is_none());
        assert_eq!(config.bulk_poll_interval(), DEFAULT_BULK_POLL_INTERVAL);
        assert_eq!(
            config.bulk_max_nesting_depth(),
            DEFAULT_BULK_MAX_NESTING_DEPTH
        );
    }

    #[test]
    fn test_builder_rejects_zero_poll_interval() {
        let result = ShopifyConfig::builder()
            .bulk_poll_interval(Duration::ZERO)
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::InvalidBulkSetting {
                field: "bulk_poll_interval",
                ..
            })
        ));
    }

    #[test]
    fn test_builder_rejects_zero_nesting_depth() {
        let result = ShopifyConfig::builder().bulk_max_nesting_depth(0).build();

        assert!(matches!(
            result,
            Err(ConfigError::InvalidBulkSetting {
                field: "bulk_max_nesting_depth",
                ..
            })
        ));
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let host = HostUrl::new("https://proxy.example.com").unwrap();

        let config = ShopifyConfig::builder()
            .host(host.clone())
            .api_version(ApiVersion::V2025_04)
            .user_agent_prefix("MyApp/1.0")
            .bulk_poll_interval(Duration::from_millis(250))
            .bulk_max_nesting_depth(4)
            .build()
            .unwrap();

        assert_eq!(config.host(), Some(&host));
        assert_eq!(config.api_version(), &ApiVersion::V2025_04);
        assert_eq!(config.user_agent_prefix(), Some("MyApp/1.0"));
        assert_eq!(config.bulk_poll_interval(), Duration::from_millis(250));
        assert_eq!(config.bulk_max_nesting_depth(), 4);
    }

    #[test]
    fn test_default_matches_builder_defaults() {
        let built = ShopifyConfig::builder().build().unwrap();
        let default = ShopifyConfig::default();

        assert_eq!(built.api_version(), default.api_version());
        assert_eq!(built.bulk_poll_interval(), default.bulk_poll_interval());
    }
}

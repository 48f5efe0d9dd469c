//! Integration tests for the configuration system.

use std::time::Duration;

use shopify_bulk::config::{DEFAULT_BULK_MAX_NESTING_DEPTH, DEFAULT_BULK_POLL_INTERVAL};
use shopify_bulk::{ApiVersion, ConfigError, HostUrl, ShopDomain, ShopifyConfig};

#[test]
fn test_full_workflow_create_newtypes_build_config_access_fields() {
    let host = HostUrl::new("https://proxy.example.com").unwrap();

    let config = ShopifyConfig::builder()
        .host(host)
        .api_version(ApiVersion::V2025_07)
        .user_agent_prefix("TestApp/1.0")
        .bulk_poll_interval(Duration::from_millis(500))
        .bulk_max_nesting_depth(8)
        .build()
        .unwrap();

    assert_eq!(config.api_version(), &ApiVersion::V2025_07);
    assert_eq!(config.host().unwrap().as_ref(), "https://proxy.example.com");
    assert_eq!(config.user_agent_prefix(), Some("TestApp/1.0"));
    assert_eq!(config.bulk_poll_interval(), Duration::from_millis(500));
    assert_eq!(config.bulk_max_nesting_depth(), 8);
}

#[test]
fn test_default_config_uses_latest_version_and_bulk_defaults() {
    let config = ShopifyConfig::builder().build().unwrap();

    assert_eq!(config.api_version(), &ApiVersion::latest());
    assert!(config.host().is_none());
    assert_eq!(config.bulk_poll_interval(), DEFAULT_BULK_POLL_INTERVAL);
    assert_eq!(config.bulk_max_nesting_depth(), DEFAULT_BULK_MAX_NESTING_DEPTH);
}

#[test]
fn test_error_handling_invalid_inputs_produce_correct_errors() {
    let result = ShopDomain::new("invalid domain with spaces");
    assert!(matches!(result, Err(ConfigError::InvalidShopDomain { .. })));

    let result = HostUrl::new("not-a-valid-url");
    assert!(matches!(result, Err(ConfigError::InvalidHostUrl { .. })));

    let result: Result<ApiVersion, _> = "invalid".parse();
    assert!(matches!(result, Err(ConfigError::InvalidApiVersion { .. })));

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
fn test_config_can_be_cloned_and_shared() {
    let config = ShopifyConfig::builder()
        .api_version(ApiVersion::V2025_01)
        .build()
        .unwrap();

    let config_clone = config.clone();
    assert_eq!(config.api_version(), config_clone.api_version());

    let handle = std::thread::spawn(move || config_clone.bulk_poll_interval());
    assert_eq!(handle.join().unwrap(), config.bulk_poll_interval());
}

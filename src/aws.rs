//! Shared AWS SDK configuration

use aws_config::{BehaviorVersion, Region, SdkConfig};

/// Load SDK configuration from the default credential chain.
///
/// `region` overrides the region the chain would otherwise pick.
pub async fn load_sdk_config(region: Option<String>) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = region {
        loader = loader.region(Region::new(region));
    }
    let sdk_config = loader.load().await;

    tracing::debug!(
        region = ?sdk_config.region().map(|r| r.to_string()),
        "AWS SDK configuration loaded"
    );

    sdk_config
}

/**
 * Server Configuration
 *
 * Loads `RelayConfig` from environment variables. Every variable is
 * optional; an unset variable falls back to the builder default, while a
 * variable that is set but unparseable is an error rather than a silent
 * fallback.
 *
 * # Variables
 *
 * | Variable                     | Default                                  |
 * |------------------------------|------------------------------------------|
 * | `SERVER_PORT`                | `5000`                                   |
 * | `ANALYTICS_BASE_URL`         | `https://us-west-2b.online.tableau.com`  |
 * | `ANALYTICS_API_VERSION`      | `3.22`                                   |
 * | `ANALYTICS_SITE_CONTENT_URL` | empty (default site)                     |
 * | `CORS_ALLOWED_ORIGIN`        | `http://localhost:3000`                  |
 * | `REQUEST_TIMEOUT_SECS`       | `30`                                     |
 * | `PREVIEW_BATCH_TIMEOUT_SECS` | `60`                                     |
 * | `PREVIEW_CONCURRENCY`        | `8`                                      |
 * | `TREE_MAX_DEPTH`             | `32`                                     |
 * | `PAGE_SIZE`                  | `100`                                    |
 */

use std::str::FromStr;
use std::time::Duration;

use crate::shared::{ConfigError, RelayConfig};

fn env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn env_parse<T: FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env_string(name) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { name, value: raw }),
        None => Ok(None),
    }
}

/// Load relay configuration from the environment
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` when a numeric variable does not
/// parse, and whatever `RelayConfigBuilder::build` rejects otherwise.
pub fn load_config() -> Result<RelayConfig, ConfigError> {
    let mut builder = RelayConfig::builder();

    if let Some(port) = env_parse::<u16>("SERVER_PORT")? {
        builder = builder.port(port);
    }
    if let Some(url) = env_string("ANALYTICS_BASE_URL") {
        builder = builder.base_url(url);
    }
    if let Some(version) = env_string("ANALYTICS_API_VERSION") {
        builder = builder.api_version(version);
    }
    if let Ok(content_url) = std::env::var("ANALYTICS_SITE_CONTENT_URL") {
        builder = builder.site_content_url(content_url.trim());
    }
    if let Some(origin) = env_string("CORS_ALLOWED_ORIGIN") {
        builder = builder.cors_allowed_origin(origin);
    }
    if let Some(secs) = env_parse::<u64>("REQUEST_TIMEOUT_SECS")? {
        builder = builder.request_timeout(Duration::from_secs(secs));
    }
    if let Some(secs) = env_parse::<u64>("PREVIEW_BATCH_TIMEOUT_SECS")? {
        builder = builder.preview_batch_timeout(Duration::from_secs(secs));
    }
    if let Some(limit) = env_parse::<usize>("PREVIEW_CONCURRENCY")? {
        builder = builder.preview_concurrency(limit);
    }
    if let Some(depth) = env_parse::<usize>("TREE_MAX_DEPTH")? {
        builder = builder.tree_max_depth(depth);
    }
    if let Some(size) = env_parse::<u32>("PAGE_SIZE")? {
        builder = builder.page_size(size);
    }

    let config = builder.build()?;
    tracing::info!(
        "Relay configured for {} (API {}), CORS origin {}",
        config.base_url,
        config.api_version,
        config.cors_allowed_origin
    );
    Ok(config)
}

//! Builds the configured provider from `config.toml`.

use crate::error::SourceError;
use crate::tmdb::TmdbClient;
use crate::traits::MovieProvider;
use nebulix_config::{Config, API_KEY_ENV};
use std::time::Duration;

pub fn provider_from_config(config: &Config) -> Result<Box<dyn MovieProvider>, SourceError> {
    let api_key = config.api_key().ok_or_else(|| {
        SourceError::NotConfigured(format!(
            "no API key; run `nebulix config init --api-key <KEY>` or set {}",
            API_KEY_ENV
        ))
    })?;

    let client = TmdbClient::new(
        api_key,
        &config.provider.base_url,
        Duration::from_secs(config.provider.timeout_secs),
    )?;
    Ok(Box::new(client))
}

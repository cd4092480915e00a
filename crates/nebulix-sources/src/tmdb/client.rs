use crate::error::SourceError;
use crate::tmdb::api;
use crate::traits::MovieProvider;
use async_trait::async_trait;
use nebulix_models::{Language, MovieRecord, ResultPage};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Clone)]
pub struct TmdbClient {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    pub fn new(api_key: String, base_url: &str, timeout: Duration) -> Result<Self, SourceError> {
        if api_key.trim().is_empty() {
            return Err(SourceError::NotConfigured("missing TMDB API key".to_string()));
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("nebulix/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let base_url = base_url.trim_end_matches('/').to_string();
        info!(base_url = %base_url, "Created TMDB client");

        Ok(Self {
            client: Arc::new(client),
            base_url,
            api_key,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl MovieProvider for TmdbClient {
    fn provider_name(&self) -> &str {
        "tmdb"
    }

    async fn discover(&self, page: u32) -> Result<ResultPage, SourceError> {
        api::discover(&self.client, &self.base_url, &self.api_key, page).await
    }

    async fn search(&self, query: &str, page: u32) -> Result<ResultPage, SourceError> {
        api::search(&self.client, &self.base_url, &self.api_key, query, page).await
    }

    async fn movie_details(&self, id: u64) -> Result<MovieRecord, SourceError> {
        api::movie_details(&self.client, &self.base_url, &self.api_key, id).await
    }

    async fn languages(&self) -> Result<Vec<Language>, SourceError> {
        api::languages(&self.client, &self.base_url, &self.api_key).await
    }
}

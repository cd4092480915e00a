use async_trait::async_trait;
use nebulix_models::{Language, MovieRecord, ResultPage};
use crate::error::SourceError;

/// Read-only movie database.
///
/// Pages are 1-based. An empty `results` page is a valid answer meaning the
/// query has no more pages; it is not an error.
#[async_trait]
pub trait MovieProvider: Send + Sync {
    fn provider_name(&self) -> &str;

    /// Movies sorted by popularity, most popular first
    async fn discover(&self, page: u32) -> Result<ResultPage, SourceError>;

    /// Title search
    async fn search(&self, query: &str, page: u32) -> Result<ResultPage, SourceError>;

    /// Full record for one movie, including videos and credits
    async fn movie_details(&self, id: u64) -> Result<MovieRecord, SourceError>;

    /// Language code lookup table
    async fn languages(&self) -> Result<Vec<Language>, SourceError>;
}

//! Shared fixtures for unit tests.

use async_trait::async_trait;
use nebulix_models::{Language, MovieRecord, ResultPage};
use nebulix_sources::{MovieProvider, SourceError};
use std::collections::HashMap;
use std::sync::Mutex;

pub fn movie(id: u64) -> MovieRecord {
    MovieRecord::new(id).with_title(format!("Movie {}", id))
}

pub fn page(number: u32, movie_ids: &[u64]) -> ResultPage {
    ResultPage::new(number, movie_ids.iter().copied().map(movie).collect())
}

pub fn ids(movies: &[MovieRecord]) -> Vec<u64> {
    movies.iter().map(|m| m.id).collect()
}

/// Scripted provider: pages keyed by query (empty string for discovery).
/// Unscripted pages come back empty; `fail_on` pages return a decode error.
#[derive(Default)]
pub struct FakeProvider {
    pages: HashMap<(String, u32), Vec<MovieRecord>>,
    details: HashMap<u64, MovieRecord>,
    failing: Vec<(String, u32)>,
    languages: Option<Vec<Language>>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, query: &str, number: u32, movies: Vec<MovieRecord>) -> Self {
        self.pages.insert((query.to_string(), number), movies);
        self
    }

    pub fn with_detail(mut self, record: MovieRecord) -> Self {
        self.details.insert(record.id, record);
        self
    }

    pub fn fail_on(mut self, query: &str, number: u32) -> Self {
        self.failing.push((query.to_string(), number));
        self
    }

    pub fn with_languages(mut self, languages: Vec<Language>) -> Self {
        self.languages = Some(languages);
        self
    }

    pub fn call_log(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn lookup(&self, query: &str, number: u32) -> Result<ResultPage, SourceError> {
        let key = (query.to_string(), number);
        if self.failing.contains(&key) {
            return Err(SourceError::decode("scripted failure"));
        }
        let results = self.pages.get(&key).cloned().unwrap_or_default();
        Ok(ResultPage::new(number, results))
    }
}

#[async_trait]
impl MovieProvider for FakeProvider {
    fn provider_name(&self) -> &str {
        "fake"
    }

    async fn discover(&self, page: u32) -> Result<ResultPage, SourceError> {
        self.calls.lock().unwrap().push(format!("discover:{}", page));
        self.lookup("", page)
    }

    async fn search(&self, query: &str, page: u32) -> Result<ResultPage, SourceError> {
        self.calls.lock().unwrap().push(format!("search:{}:{}", query, page));
        self.lookup(query, page)
    }

    async fn movie_details(&self, id: u64) -> Result<MovieRecord, SourceError> {
        self.calls.lock().unwrap().push(format!("details:{}", id));
        self.details
            .get(&id)
            .cloned()
            .ok_or(SourceError::Status { status: 404, message: "not found".to_string() })
    }

    async fn languages(&self) -> Result<Vec<Language>, SourceError> {
        self.languages
            .clone()
            .ok_or_else(|| SourceError::decode("languages unavailable"))
    }
}

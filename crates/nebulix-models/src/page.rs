use serde::{Deserialize, Serialize};
use crate::movie::MovieRecord;

/// One page of discovery or search results, as produced by a single fetch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultPage {
    pub page: u32,
    pub results: Vec<MovieRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u32>,
}

impl ResultPage {
    pub fn new(page: u32, results: Vec<MovieRecord>) -> Self {
        Self { page, results, total_pages: None }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

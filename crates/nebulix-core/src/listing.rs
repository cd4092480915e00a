//! The listing view: current query, displayed movies and "load more".
//!
//! Requests are issued and applied in two steps so that responses can be
//! applied in whatever order they arrive. Each [`PageRequest`] carries the
//! ticket of the query generation it belongs to, and [`Listing::apply`]
//! discards it if a newer query has begun since.

use crate::accumulator::ResultAccumulator;
use crate::query::{debounce, QueryGeneration, QueryTicket};
use nebulix_models::{MovieRecord, ResultPage};
use nebulix_sources::{MovieProvider, SourceError};
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Popularity-sorted discovery
    Discover,
    Search(String),
}

impl Query {
    /// Blank search text means discovery
    pub fn from_text(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            Query::Discover
        } else {
            Query::Search(trimmed.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Query::Discover => "popular",
            Query::Search(text) => text,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PageRequest {
    pub query: Query,
    pub page: u32,
    ticket: QueryTicket,
}

impl PageRequest {
    pub fn is_first_page(&self) -> bool {
        self.page <= 1
    }

    pub fn ticket(&self) -> &QueryTicket {
        &self.ticket
    }

    pub fn is_stale(&self) -> bool {
        self.ticket.is_cancelled()
    }
}

/// What applying a response did to the listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    Merged { added: usize, exhausted: bool },
    /// Fetch failed; listing unchanged
    Failed,
    /// Response belonged to a superseded query
    Discarded,
}

#[derive(Debug, Default)]
pub struct Listing {
    accumulator: ResultAccumulator,
    query: Option<Query>,
    generation: QueryGeneration,
    loading: bool,
    /// Generation whose first page the accumulator currently holds
    shown_generation: Option<u64>,
    first_page_pending: bool,
}

impl Listing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn movies(&self) -> &[MovieRecord] {
        self.accumulator.movies()
    }

    pub fn query(&self) -> Option<&Query> {
        self.query.as_ref()
    }

    pub fn page(&self) -> u32 {
        self.accumulator.page()
    }

    pub fn has_more(&self) -> bool {
        self.accumulator.has_more()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Switch to a new query and ask for its first page.
    ///
    /// Begins a new generation, so every request issued before this one is
    /// now stale.
    pub fn request_query(&mut self, text: &str) -> PageRequest {
        let query = Query::from_text(text);
        let ticket = self.generation.begin();
        debug!(query = query.label(), generation = ticket.generation(), "New listing query");
        self.query = Some(query.clone());
        self.loading = true;
        self.first_page_pending = true;
        PageRequest { query, page: 1, ticket }
    }

    /// Next page of the current query.
    ///
    /// `None` while the query's first page is in flight, or once the query is
    /// exhausted. If the displayed movies still belong to an earlier query
    /// (its first page never arrived), page 1 of the current query is asked
    /// for again instead, so nothing is appended across queries.
    pub fn request_more(&mut self) -> Option<PageRequest> {
        if self.first_page_pending {
            debug!("First page still loading, not requesting more");
            return None;
        }

        let query = self.query.clone().unwrap_or(Query::Discover);
        let ticket = self.generation.current();

        if self.shown_generation != Some(ticket.generation()) {
            debug!(
                query = query.label(),
                generation = ticket.generation(),
                "Displayed movies belong to another query, requesting its first page"
            );
            self.query = Some(query.clone());
            self.loading = true;
            self.first_page_pending = true;
            return Some(PageRequest { query, page: 1, ticket });
        }

        if self.accumulator.is_exhausted() {
            debug!("Listing exhausted, not requesting more");
            return None;
        }
        self.loading = true;
        Some(PageRequest {
            query,
            page: self.accumulator.next_page(),
            ticket,
        })
    }

    /// Apply a response to the request that produced it
    pub fn apply(&mut self, request: &PageRequest, outcome: Result<ResultPage, SourceError>) -> Applied {
        if request.is_stale() {
            debug!(
                query = request.query.label(),
                page = request.page,
                generation = request.ticket.generation(),
                "Discarding response for superseded query"
            );
            return Applied::Discarded;
        }

        self.loading = false;
        if request.is_first_page() {
            self.first_page_pending = false;
        }
        match outcome {
            Ok(page) => {
                let added = self.accumulator.apply_page(page, request.is_first_page());
                if request.is_first_page() {
                    self.shown_generation = Some(request.ticket.generation());
                }
                let exhausted = self.accumulator.is_exhausted();
                info!(
                    query = request.query.label(),
                    page = request.page,
                    added,
                    total = self.accumulator.movies().len(),
                    "Merged results"
                );
                Applied::Merged { added, exhausted }
            }
            Err(e) => {
                warn!(query = request.query.label(), page = request.page, error = %e, "Failed to fetch movies");
                self.accumulator.apply_failure(request.page);
                Applied::Failed
            }
        }
    }

    /// Fetch and apply in one step
    pub async fn load<P: MovieProvider + ?Sized>(&mut self, provider: &P, request: &PageRequest) -> Applied {
        let outcome = fetch_page(provider, request).await;
        self.apply(request, outcome)
    }

    /// Start a query, wait out the debounce window, then load its first page
    pub async fn search<P: MovieProvider + ?Sized>(&mut self, provider: &P, text: &str, delay: Duration) -> Applied {
        let request = self.request_query(text);
        if !debounce(request.ticket(), delay).await {
            return Applied::Discarded;
        }
        self.load(provider, &request).await
    }

    /// Load the next page if there is one. `None` means no request was made.
    pub async fn load_more<P: MovieProvider + ?Sized>(&mut self, provider: &P) -> Option<Applied> {
        let request = self.request_more()?;
        Some(self.load(provider, &request).await)
    }
}

/// Issue the provider call a request stands for
pub async fn fetch_page<P: MovieProvider + ?Sized>(provider: &P, request: &PageRequest) -> Result<ResultPage, SourceError> {
    match &request.query {
        Query::Discover => provider.discover(request.page).await,
        Query::Search(text) => provider.search(text, request.page).await,
    }
}

use nebulix_models::{MovieRecord, ResultPage};
use std::collections::HashSet;
use tracing::{debug, info};

/// Combine the displayed movies with a freshly fetched page.
///
/// A first page replaces the list outright. Any later page is appended, and
/// only the first occurrence of each id survives, in order of first
/// appearance. Pure: `merge(a, &[], false) == a`.
pub fn merge(existing: &[MovieRecord], incoming: &[MovieRecord], is_first_page: bool) -> Vec<MovieRecord> {
    if is_first_page {
        return incoming.to_vec();
    }

    let mut seen = HashSet::with_capacity(existing.len() + incoming.len());
    existing
        .iter()
        .chain(incoming.iter())
        .filter(|movie| seen.insert(movie.id))
        .cloned()
        .collect()
}

/// Displayed listing plus its pagination state.
#[derive(Debug, Clone, Default)]
pub struct ResultAccumulator {
    movies: Vec<MovieRecord>,
    page: u32,
    exhausted: bool,
}

impl ResultAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn movies(&self) -> &[MovieRecord] {
        &self.movies
    }

    /// Last page that contributed results (0 before anything loaded)
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn next_page(&self) -> u32 {
        self.page + 1
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn has_more(&self) -> bool {
        !self.exhausted
    }

    /// Merge a successfully fetched page. Returns how many movies were added.
    ///
    /// An empty page sets the exhaustion flag and leaves the page index where
    /// it was. A first page clears a previous query's exhaustion first.
    pub fn apply_page(&mut self, page: ResultPage, is_first_page: bool) -> usize {
        if is_first_page {
            self.exhausted = false;
        }

        if page.results.is_empty() {
            self.exhausted = true;
            if is_first_page {
                self.movies.clear();
                self.page = 0;
            }
            info!(page = page.page, "No more results");
            return 0;
        }

        let before = if is_first_page { 0 } else { self.movies.len() };
        self.movies = merge(&self.movies, &page.results, is_first_page);
        self.page = page.page;

        if let Some(total) = page.total_pages {
            if page.page >= total {
                debug!(page = page.page, total_pages = total, "Reached provider's last page");
            }
        }

        self.movies.len() - before
    }

    /// A failed fetch is transient: nothing changes, not even the exhaustion flag
    pub fn apply_failure(&self, page: u32) {
        debug!(page, displayed = self.movies.len(), "Keeping listing unchanged after failed fetch");
    }
}

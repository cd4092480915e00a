//! Logical navigation surface: the listing, a movie's detail page and the
//! watchlist.

use nebulix_models::MovieRecord;

pub use nebulix_models::slugify;

/// How a detail page names its movie
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailRoute {
    /// Title slug; resolved by searching the provider and taking the top match
    Slug(String),
    /// Exact provider id
    Id(u64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Listing,
    Detail(DetailRoute),
    Watchlist,
}

/// Turn a slug back into search text: percent-decode, then hyphens to spaces.
///
/// Best effort only. Punctuation stripped by `slugify` is gone, and titles
/// that already contained hyphens come back with spaces.
pub fn slug_to_query(slug: &str) -> String {
    let decoded = urlencoding::decode(slug)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| slug.to_string());
    decoded.replace('-', " ")
}

impl Route {
    /// Slug route for a titled movie, id route when the title slugifies to nothing
    pub fn detail_for(movie: &MovieRecord) -> Self {
        let slug = movie.slug();
        if slug.is_empty() {
            Route::Detail(DetailRoute::Id(movie.id))
        } else {
            Route::Detail(DetailRoute::Slug(slug))
        }
    }

    /// Parse a route path. Unknown paths yield `None`.
    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = path.trim().trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Some(Route::Listing),
            ["watchlist"] => Some(Route::Watchlist),
            ["m", "id", id] => id.parse().ok().map(|id| Route::Detail(DetailRoute::Id(id))),
            ["m", slug] => Some(Route::Detail(DetailRoute::Slug((*slug).to_string()))),
            _ => None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Listing => "/".to_string(),
            Route::Watchlist => "/watchlist".to_string(),
            Route::Detail(DetailRoute::Slug(slug)) => format!("/m/{}", slug),
            Route::Detail(DetailRoute::Id(id)) => format!("/m/id/{}", id),
        }
    }
}

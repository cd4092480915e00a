//! Detail view: resolve a route to one movie and shape it for display.

use crate::languages::LanguageTable;
use crate::routes::{slug_to_query, DetailRoute};
use nebulix_models::{MovieRecord, PLACEHOLDER};
use nebulix_sources::{image_url, MovieProvider};
use serde::Serialize;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum DetailLookup {
    Found(MovieRecord),
    NotFound,
}

/// Resolve a detail route to a fully populated record.
///
/// Slug routes search the provider for the de-slugged title and take the top
/// match, so two films with the same title resolve to whichever the provider
/// ranks first. Id routes are exact. Any provider failure is `NotFound`.
pub async fn resolve<P: MovieProvider + ?Sized>(provider: &P, route: &DetailRoute) -> DetailLookup {
    let id = match route {
        DetailRoute::Id(id) => *id,
        DetailRoute::Slug(slug) => {
            let query = slug_to_query(slug);
            if query.trim().is_empty() {
                return DetailLookup::NotFound;
            }
            match provider.search(query.trim(), 1).await {
                Ok(page) => match page.results.first() {
                    Some(top) => {
                        debug!(slug = %slug, id = top.id, candidates = page.results.len(), "Resolved slug to top match");
                        top.id
                    }
                    None => {
                        debug!(slug = %slug, "No movie matches slug");
                        return DetailLookup::NotFound;
                    }
                },
                Err(e) => {
                    warn!(slug = %slug, error = %e, "Failed to search for detail slug");
                    return DetailLookup::NotFound;
                }
            }
        }
    };

    match provider.movie_details(id).await {
        Ok(movie) => DetailLookup::Found(movie),
        Err(e) => {
            warn!(id, error = %e, "Failed to fetch movie details");
            DetailLookup::NotFound
        }
    }
}

/// Image settings for rendering
#[derive(Debug, Clone)]
pub struct ImageOptions<'a> {
    pub base_url: &'a str,
    pub size: &'a str,
}

/// Everything the detail page shows, with placeholders already applied
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DetailView {
    pub id: u64,
    pub title: String,
    pub slug: String,
    pub vote_average: f64,
    pub overview: String,
    pub language: String,
    pub release_date: String,
    pub genres: Vec<String>,
    /// "Name as Character"
    pub cast: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailer_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backdrop_url: Option<String>,
}

impl DetailView {
    pub fn build(movie: &MovieRecord, languages: &LanguageTable, images: &ImageOptions<'_>, cast_limit: usize) -> Self {
        let language = movie
            .original_language
            .as_deref()
            .map(|code| languages.display_name(code))
            .unwrap_or_else(|| PLACEHOLDER.to_string());

        Self {
            id: movie.id,
            title: movie.display_title().to_string(),
            slug: movie.slug(),
            vote_average: movie.vote_average,
            overview: movie.overview.clone(),
            language,
            release_date: movie.release_date_or_placeholder().to_string(),
            genres: movie.genres.iter().map(|g| g.name.clone()).collect(),
            cast: movie
                .top_cast(cast_limit)
                .iter()
                .map(|c| format!("{} as {}", c.name, c.character))
                .collect(),
            trailer_url: movie.trailer_url(),
            poster_url: image_url(images.base_url, images.size, movie.poster_path.as_deref()),
            backdrop_url: image_url(images.base_url, images.size, movie.backdrop_path.as_deref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{movie, FakeProvider};
    use nebulix_models::{CastMember, Credits, Video};

    const IMAGES: ImageOptions<'static> = ImageOptions { base_url: "https://image.tmdb.org/t/p", size: "original" };

    fn detailed(id: u64, title: &str) -> MovieRecord {
        let mut record = movie(id).with_title(title);
        record.original_language = Some("en".to_string());
        record.release_date = Some("1999-03-31".to_string());
        record.poster_path = Some("/p.jpg".to_string());
        record.credits = Some(Credits {
            cast: vec![CastMember { id: 6384, name: "Keanu Reeves".to_string(), character: "Neo".to_string() }],
        });
        record.videos = vec![Video { key: "vKQi3bBA1y8".to_string(), site: "YouTube".to_string(), kind: "Trailer".to_string() }];
        record
    }

    #[tokio::test]
    async fn test_resolve_slug_takes_top_match() {
        let provider = FakeProvider::new()
            .with_page("the matrix", 1, vec![movie(603), movie(604)])
            .with_detail(detailed(603, "The Matrix"));

        let lookup = resolve(&provider, &DetailRoute::Slug("the-matrix".to_string())).await;
        match lookup {
            DetailLookup::Found(record) => assert_eq!(record.id, 603),
            DetailLookup::NotFound => panic!("expected a match"),
        }
        assert_eq!(provider.call_log(), vec!["search:the matrix:1", "details:603"]);
    }

    #[tokio::test]
    async fn test_resolve_slug_without_match() {
        let provider = FakeProvider::new();
        let lookup = resolve(&provider, &DetailRoute::Slug("nothing-here".to_string())).await;
        assert_eq!(lookup, DetailLookup::NotFound);
        assert_eq!(provider.call_log(), vec!["search:nothing here:1"]);
    }

    #[tokio::test]
    async fn test_resolve_search_failure_is_not_found() {
        let provider = FakeProvider::new().fail_on("heat", 1);
        let lookup = resolve(&provider, &DetailRoute::Slug("heat".to_string())).await;
        assert_eq!(lookup, DetailLookup::NotFound);
    }

    #[tokio::test]
    async fn test_resolve_by_id_skips_search() {
        let provider = FakeProvider::new().with_detail(detailed(603, "The Matrix"));
        let lookup = resolve(&provider, &DetailRoute::Id(603)).await;
        assert!(matches!(lookup, DetailLookup::Found(_)));
        assert_eq!(provider.call_log(), vec!["details:603"]);

        let missing = resolve(&provider, &DetailRoute::Id(1)).await;
        assert_eq!(missing, DetailLookup::NotFound);
    }

    #[tokio::test]
    async fn test_resolve_empty_slug() {
        let provider = FakeProvider::new();
        assert_eq!(resolve(&provider, &DetailRoute::Slug("--".to_string())).await, DetailLookup::NotFound);
        assert!(provider.call_log().is_empty());
    }

    #[test]
    fn test_build_view() {
        let view = DetailView::build(&detailed(603, "The Matrix"), &LanguageTable::builtin(), &IMAGES, 5);
        assert_eq!(view.title, "The Matrix");
        assert_eq!(view.slug, "the-matrix");
        assert_eq!(view.language, "English");
        assert_eq!(view.release_date, "1999-03-31");
        assert_eq!(view.cast, vec!["Keanu Reeves as Neo".to_string()]);
        assert_eq!(view.trailer_url.as_deref(), Some("https://www.youtube.com/watch?v=vKQi3bBA1y8"));
        assert_eq!(view.poster_url.as_deref(), Some("https://image.tmdb.org/t/p/original/p.jpg"));
        assert_eq!(view.backdrop_url, None);
    }

    #[test]
    fn test_build_view_placeholders() {
        let mut bare = movie(1);
        bare.original_language = Some("xx".to_string());
        let view = DetailView::build(&bare, &LanguageTable::builtin(), &IMAGES, 5);
        assert_eq!(view.language, "XX");
        assert_eq!(view.release_date, "N/A");
        assert!(view.cast.is_empty());
        assert!(view.trailer_url.is_none());

        let view = DetailView::build(&MovieRecord::new(2), &LanguageTable::builtin(), &IMAGES, 5);
        assert_eq!(view.language, "N/A");
        assert_eq!(view.title, "N/A");
    }
}

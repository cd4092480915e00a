use nebulix_models::{CastMember, Credits, Genre, Language, MovieRecord, ResultPage, Video};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};
use crate::error::SourceError;

// Wire shapes. Every field is optional here; `decode_movie` decides what is
// required so that a record is either fully typed or rejected.

#[derive(Debug, Default, Deserialize)]
struct TmdbMovie {
    #[serde(default)]
    id: Option<i64>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    poster_path: Option<String>,
    #[serde(default)]
    backdrop_path: Option<String>,
    #[serde(default)]
    vote_average: Option<f64>,
    #[serde(default)]
    overview: Option<String>,
    #[serde(default)]
    release_date: Option<String>,
    #[serde(default)]
    genres: Option<Vec<TmdbGenre>>,
    #[serde(default)]
    original_language: Option<String>,
    #[serde(default)]
    credits: Option<TmdbCredits>,
    #[serde(default)]
    videos: Option<TmdbVideos>,
}

#[derive(Debug, Deserialize)]
struct TmdbGenre {
    id: Option<u64>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TmdbCredits {
    #[serde(default)]
    cast: Option<Vec<TmdbCastMember>>,
}

#[derive(Debug, Deserialize)]
struct TmdbCastMember {
    #[serde(default)]
    id: Option<u64>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    character: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TmdbVideos {
    #[serde(default)]
    results: Option<Vec<TmdbVideo>>,
}

#[derive(Debug, Deserialize)]
struct TmdbVideo {
    key: Option<String>,
    site: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TmdbPage {
    #[serde(default)]
    page: Option<u32>,
    #[serde(default)]
    results: Option<Vec<Value>>,
    #[serde(default)]
    total_pages: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct TmdbLanguage {
    iso_639_1: Option<String>,
    english_name: Option<String>,
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|v| !v.trim().is_empty())
}

/// Validate one provider movie object into a `MovieRecord`.
///
/// `id` must be a positive integer; everything else is defaulted. `title`
/// falls back to `name` (used by some listing endpoints).
pub fn decode_movie(value: Value) -> Result<MovieRecord, SourceError> {
    let raw: TmdbMovie = serde_json::from_value(value)?;

    let id = match raw.id {
        Some(id) if id > 0 => id as u64,
        Some(id) => return Err(SourceError::decode(format!("invalid movie id {}", id))),
        None => return Err(SourceError::decode("movie is missing an id")),
    };

    let genres = raw
        .genres
        .unwrap_or_default()
        .into_iter()
        .filter_map(|g| Some(Genre { id: g.id?, name: g.name? }))
        .collect();

    let credits = raw.credits.map(|c| Credits {
        cast: c
            .cast
            .unwrap_or_default()
            .into_iter()
            .filter_map(|m| {
                Some(CastMember {
                    id: m.id.unwrap_or_default(),
                    name: non_empty(m.name)?,
                    character: m.character.unwrap_or_default(),
                })
            })
            .collect(),
    });

    let videos = raw
        .videos
        .and_then(|v| v.results)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|v| Some(Video { key: v.key?, site: v.site?, kind: v.kind? }))
        .collect();

    Ok(MovieRecord {
        id,
        title: non_empty(raw.title).or_else(|| non_empty(raw.name)),
        poster_path: non_empty(raw.poster_path),
        backdrop_path: non_empty(raw.backdrop_path),
        vote_average: raw.vote_average.unwrap_or_default(),
        overview: raw.overview.unwrap_or_default(),
        release_date: non_empty(raw.release_date),
        genres,
        original_language: non_empty(raw.original_language),
        credits,
        videos,
    })
}

/// Decode a paginated result body.
///
/// A body without a `results` array is malformed, and so is one where every
/// entry fails `decode_movie`; only a genuinely empty array means "no more
/// pages". Entries that fail are otherwise dropped from the page.
pub fn decode_page(value: Value, requested_page: u32) -> Result<ResultPage, SourceError> {
    let raw: TmdbPage = serde_json::from_value(value)?;
    let entries = raw
        .results
        .ok_or_else(|| SourceError::decode("response has no results array"))?;

    let total = entries.len();
    let mut results = Vec::with_capacity(total);
    for entry in entries {
        match decode_movie(entry) {
            Ok(movie) => results.push(movie),
            Err(e) => warn!(page = requested_page, error = %e, "Dropping undecodable movie entry"),
        }
    }
    if total > 0 && results.is_empty() {
        return Err(SourceError::decode(format!("none of {} results could be decoded", total)));
    }
    if results.len() < total {
        debug!(page = requested_page, kept = results.len(), total, "Decoded page with dropped entries");
    }

    Ok(ResultPage {
        page: raw.page.unwrap_or(requested_page),
        results,
        total_pages: raw.total_pages,
    })
}

pub fn decode_languages(value: Value) -> Result<Vec<Language>, SourceError> {
    let raw: Vec<TmdbLanguage> = serde_json::from_value(value)?;
    Ok(raw
        .into_iter()
        .filter_map(|l| {
            Some(Language {
                iso_639_1: non_empty(l.iso_639_1)?,
                english_name: non_empty(l.english_name)?,
            })
        })
        .collect())
}

/// GET a provider endpoint and return its JSON body
async fn get_json(
    client: &Client,
    url: &str,
    api_key: &str,
    params: &[(&str, String)],
) -> Result<Value, SourceError> {
    debug!(url = url, "Provider request");

    let response = client
        .get(url)
        .query(&[("api_key", api_key)])
        .query(params)
        .header("Accept", "application/json")
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        // provider errors carry a `status_message`; fall back to the raw body
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| v["status_message"].as_str().map(str::to_string))
            .unwrap_or(body);
        return Err(SourceError::Status { status: status.as_u16(), message });
    }

    let text = response.text().await?;
    Ok(serde_json::from_str(&text)?)
}

pub async fn discover(client: &Client, base_url: &str, api_key: &str, page: u32) -> Result<ResultPage, SourceError> {
    let url = format!("{}/discover/movie", base_url);
    let params = [
        ("sort_by", "popularity.desc".to_string()),
        ("page", page.to_string()),
    ];
    let body = get_json(client, &url, api_key, &params).await?;
    decode_page(body, page)
}

pub async fn search(
    client: &Client,
    base_url: &str,
    api_key: &str,
    query: &str,
    page: u32,
) -> Result<ResultPage, SourceError> {
    let url = format!("{}/search/movie", base_url);
    let params = [("query", query.to_string()), ("page", page.to_string())];
    let body = get_json(client, &url, api_key, &params).await?;
    decode_page(body, page)
}

pub async fn movie_details(client: &Client, base_url: &str, api_key: &str, id: u64) -> Result<MovieRecord, SourceError> {
    let url = format!("{}/movie/{}", base_url, id);
    let params = [("append_to_response", "videos,credits".to_string())];
    let body = get_json(client, &url, api_key, &params).await?;
    decode_movie(body)
}

pub async fn languages(client: &Client, base_url: &str, api_key: &str) -> Result<Vec<Language>, SourceError> {
    let url = format!("{}/configuration/languages", base_url);
    let body = get_json(client, &url, api_key, &[]).await?;
    decode_languages(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_movie_listing_shape() {
        let movie = decode_movie(json!({
            "id": 603,
            "title": "The Matrix",
            "poster_path": "/matrix.jpg",
            "vote_average": 8.2,
            "overview": "A hacker learns the truth."
        }))
        .unwrap();

        assert_eq!(movie.id, 603);
        assert_eq!(movie.display_title(), "The Matrix");
        assert_eq!(movie.vote_average, 8.2);
        assert!(movie.credits.is_none());
        assert!(movie.videos.is_empty());
    }

    #[test]
    fn test_decode_movie_defaults_nulls() {
        let movie = decode_movie(json!({
            "id": 5,
            "title": null,
            "name": "Fallback Name",
            "poster_path": null,
            "vote_average": null,
            "release_date": ""
        }))
        .unwrap();

        assert_eq!(movie.title.as_deref(), Some("Fallback Name"));
        assert_eq!(movie.poster_path, None);
        assert_eq!(movie.vote_average, 0.0);
        assert_eq!(movie.overview, "");
        assert_eq!(movie.release_date, None);
    }

    #[test]
    fn test_decode_movie_rejects_missing_or_bad_id() {
        assert!(matches!(decode_movie(json!({"title": "x"})), Err(SourceError::Decode(_))));
        assert!(matches!(decode_movie(json!({"id": 0})), Err(SourceError::Decode(_))));
        assert!(matches!(decode_movie(json!({"id": "603"})), Err(SourceError::Decode(_))));
        assert!(matches!(decode_movie(json!("not an object")), Err(SourceError::Decode(_))));
    }

    #[test]
    fn test_decode_movie_detail_shape() {
        let movie = decode_movie(json!({
            "id": 438631,
            "title": "Dune",
            "release_date": "2021-09-15",
            "original_language": "en",
            "genres": [{"id": 878, "name": "Science Fiction"}, {"id": 12}],
            "credits": {"cast": [
                {"id": 1, "name": "Timothée Chalamet", "character": "Paul Atreides"},
                {"id": 2, "name": null, "character": "Nobody"}
            ]},
            "videos": {"results": [
                {"key": "n9xhJrPXop4", "site": "YouTube", "type": "Trailer"},
                {"key": "broken"}
            ]}
        }))
        .unwrap();

        assert_eq!(movie.genres.len(), 1);
        assert_eq!(movie.top_cast(5).len(), 1);
        assert_eq!(movie.top_cast(5)[0].character, "Paul Atreides");
        assert_eq!(movie.videos.len(), 1);
        assert_eq!(movie.release_year(), Some(2021));
    }

    #[test]
    fn test_decode_page_drops_bad_entries() {
        let page = decode_page(
            json!({
                "page": 2,
                "total_pages": 9,
                "results": [{"id": 1, "title": "A"}, {"title": "no id"}, {"id": 3, "title": "C"}]
            }),
            2,
        )
        .unwrap();

        assert_eq!(page.page, 2);
        assert_eq!(page.total_pages, Some(9));
        let ids: Vec<u64> = page.results.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_decode_page_all_entries_bad_is_malformed() {
        let err = decode_page(json!({"page": 2, "results": [{"title": "a"}, {"id": "x"}]}), 2).unwrap_err();
        assert!(matches!(err, SourceError::Decode(_)));
    }

    #[test]
    fn test_decode_page_without_results_is_malformed() {
        let err = decode_page(json!({"status_message": "Invalid API key"}), 1).unwrap_err();
        assert!(matches!(err, SourceError::Decode(_)));
    }

    #[test]
    fn test_decode_page_empty_results_is_valid() {
        let page = decode_page(json!({"results": []}), 3).unwrap();
        assert_eq!(page.page, 3);
        assert!(page.is_empty());
    }

    #[test]
    fn test_decode_languages_skips_incomplete_rows() {
        let langs = decode_languages(json!([
            {"iso_639_1": "en", "english_name": "English", "name": "English"},
            {"iso_639_1": "xx", "english_name": ""},
            {"iso_639_1": "fr", "english_name": "French"}
        ]))
        .unwrap();
        assert_eq!(langs.len(), 2);
        assert_eq!(langs[1].iso_639_1, "fr");
    }
}

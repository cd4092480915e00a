use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use crate::credits::{CastMember, Credits, Genre, Video};

/// Shown wherever an optional field has no value
pub const PLACEHOLDER: &str = "N/A";

/// One movie as returned by the provider.
///
/// `id` is the only required field. Listing results carry the short form
/// (title, poster, vote, overview); the extended fields are populated only by
/// detail lookups. Records are never mutated after decoding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieRecord {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub overview: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub genres: Vec<Genre>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits: Option<Credits>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub videos: Vec<Video>,
}

impl MovieRecord {
    /// Create a record with only the required id set
    pub fn new(id: u64) -> Self {
        Self {
            id,
            title: None,
            poster_path: None,
            backdrop_path: None,
            vote_average: 0.0,
            overview: String::new(),
            release_date: None,
            genres: Vec::new(),
            original_language: None,
            credits: None,
            videos: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().filter(|t| !t.is_empty()).unwrap_or(PLACEHOLDER)
    }

    pub fn release_date_or_placeholder(&self) -> &str {
        self.release_date.as_deref().filter(|d| !d.is_empty()).unwrap_or(PLACEHOLDER)
    }

    /// Year of a `YYYY-MM-DD` release date, if one is present and well formed
    pub fn release_year(&self) -> Option<i32> {
        let date = self.release_date.as_deref()?;
        NaiveDate::parse_from_str(date, "%Y-%m-%d").ok().map(|d| d.year())
    }

    /// First YouTube trailer among the attached videos
    pub fn trailer(&self) -> Option<&Video> {
        self.videos.iter().find(|v| v.is_youtube_trailer())
    }

    pub fn trailer_url(&self) -> Option<String> {
        self.trailer().map(|v| format!("https://www.youtube.com/watch?v={}", v.key))
    }

    pub fn top_cast(&self, limit: usize) -> &[CastMember] {
        match &self.credits {
            Some(credits) => &credits.cast[..credits.cast.len().min(limit)],
            None => &[],
        }
    }

    /// Card-sized copy without genres, credits or videos
    pub fn to_summary(&self) -> MovieRecord {
        MovieRecord {
            genres: Vec::new(),
            credits: None,
            videos: Vec::new(),
            ..self.clone()
        }
    }

    /// Route slug derived from the title; empty when the record has no title
    pub fn slug(&self) -> String {
        self.title.as_deref().map(crate::slug::slugify).unwrap_or_default()
    }
}

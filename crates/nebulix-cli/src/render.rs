//! Human and JSON renderings of cards and detail pages.

use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Attribute, Cell, Color, Table};
use nebulix_core::{DetailView, ImageOptions, Route, WatchlistCollection};
use nebulix_models::{MovieRecord, PLACEHOLDER};
use nebulix_sources::image_url;
use owo_colors::OwoColorize;
use serde_json::{json, Value};

pub fn detail_path(movie: &MovieRecord) -> String {
    Route::detail_for(movie).path()
}

pub fn card_table(movies: &[MovieRecord], watchlist: &WatchlistCollection) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.apply_modifier(UTF8_ROUND_CORNERS);
    table.set_header(vec![
        Cell::new("ID").add_attribute(Attribute::Bold),
        Cell::new("Title").add_attribute(Attribute::Bold),
        Cell::new("★").add_attribute(Attribute::Bold),
        Cell::new("Year").add_attribute(Attribute::Bold),
        Cell::new("Saved").add_attribute(Attribute::Bold),
        Cell::new("Path").add_attribute(Attribute::Bold),
    ]);

    for movie in movies {
        let saved = if watchlist.contains(movie.id) {
            Cell::new("●").fg(Color::Green)
        } else {
            Cell::new("")
        };
        let year = movie
            .release_year()
            .map(|y| y.to_string())
            .unwrap_or_else(|| PLACEHOLDER.to_string());

        table.add_row(vec![
            Cell::new(movie.id),
            Cell::new(movie.display_title()),
            Cell::new(format!("{:.1}", movie.vote_average)),
            Cell::new(year),
            saved,
            Cell::new(detail_path(movie)),
        ]);
    }
    table
}

pub fn card_json(movie: &MovieRecord, watchlist: &WatchlistCollection, images: &ImageOptions<'_>) -> Value {
    json!({
        "id": movie.id,
        "title": movie.display_title(),
        "vote_average": movie.vote_average,
        "overview": movie.overview,
        "release_date": movie.release_date_or_placeholder(),
        "poster_url": image_url(images.base_url, images.size, movie.poster_path.as_deref()),
        "bookmarked": watchlist.contains(movie.id),
        "path": detail_path(movie),
    })
}

pub fn cards_json(movies: &[MovieRecord], watchlist: &WatchlistCollection, images: &ImageOptions<'_>) -> Vec<Value> {
    movies.iter().map(|m| card_json(m, watchlist, images)).collect()
}

pub fn detail_text(view: &DetailView, bookmarked: bool) -> String {
    let mut lines = Vec::new();

    let marker = if bookmarked { " ●".green().to_string() } else { String::new() };
    lines.push(format!("{}{}", view.title.bright_cyan().bold(), marker));
    lines.push(format!("{} {:.1}", "★".yellow(), view.vote_average));
    lines.push(String::new());

    if !view.overview.is_empty() {
        lines.push(view.overview.clone());
        lines.push(String::new());
    }

    lines.push(format!("{} {}", "Original language:".bold(), view.language));
    lines.push(format!("{} {}", "Release date:".bold(), view.release_date));
    if !view.genres.is_empty() {
        lines.push(format!("{} {}", "Genres:".bold(), view.genres.join(", ")));
    }
    if !view.cast.is_empty() {
        lines.push(format!("{}", "Cast:".bold()));
        for member in &view.cast {
            lines.push(format!("  {}", member));
        }
    }
    if let Some(url) = &view.trailer_url {
        lines.push(format!("{} {}", "Trailer:".bold(), url));
    }
    if let Some(url) = &view.poster_url {
        lines.push(format!("{} {}", "Poster:".bold(), url.dimmed()));
    }

    lines.join("\n")
}

pub fn detail_json(view: &DetailView, bookmarked: bool) -> Value {
    let mut value = serde_json::to_value(view).unwrap_or_else(|_| json!({ "id": view.id }));
    if let Value::Object(map) = &mut value {
        map.insert("bookmarked".to_string(), Value::Bool(bookmarked));
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use nebulix_core::LanguageTable;

    const IMAGES: ImageOptions<'static> = ImageOptions { base_url: "https://image.tmdb.org/t/p", size: "w500" };

    fn titled(id: u64, title: &str) -> MovieRecord {
        MovieRecord::new(id).with_title(title)
    }

    #[test]
    fn test_detail_path_uses_slug_or_id() {
        assert_eq!(detail_path(&titled(603, "The Matrix")), "/m/the-matrix");
        assert_eq!(detail_path(&MovieRecord::new(77)), "/m/id/77");
    }

    #[test]
    fn test_card_table_has_row_per_movie() {
        let movies = vec![titled(1, "Alien"), titled(2, "Aliens")];
        let table = card_table(&movies, &WatchlistCollection::new());
        assert_eq!(table.row_iter().count(), 2);
    }

    #[test]
    fn test_card_json_marks_bookmarks() {
        let saved = WatchlistCollection::from_records(vec![titled(2, "Aliens")]);
        let mut poster = titled(2, "Aliens");
        poster.poster_path = Some("/a.jpg".to_string());

        let cards = cards_json(&[titled(1, "Alien"), poster], &saved, &IMAGES);
        assert_eq!(cards[0]["bookmarked"], json!(false));
        assert_eq!(cards[0]["poster_url"], Value::Null);
        assert_eq!(cards[1]["bookmarked"], json!(true));
        assert_eq!(cards[1]["poster_url"], json!("https://image.tmdb.org/t/p/w500/a.jpg"));
    }

    #[test]
    fn test_detail_json_adds_bookmarked_flag() {
        let view = DetailView::build(&titled(9, "Heat"), &LanguageTable::builtin(), &IMAGES, 5);
        let value = detail_json(&view, true);
        assert_eq!(value["title"], json!("Heat"));
        assert_eq!(value["language"], json!("N/A"));
        assert_eq!(value["bookmarked"], json!(true));
    }

    #[test]
    fn test_detail_text_shows_placeholders() {
        let view = DetailView::build(&titled(9, "Heat"), &LanguageTable::builtin(), &IMAGES, 5);
        let text = detail_text(&view, false);
        assert!(text.contains("Heat"));
        assert!(text.contains("N/A"));
        assert!(!text.contains("Trailer"));
    }
}

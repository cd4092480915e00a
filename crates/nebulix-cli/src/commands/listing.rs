use super::Context;
use crate::output::Output;
use crate::render;
use crate::ui::Spinner;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use nebulix_core::{Applied, Listing, Query, WatchlistCollection};
use serde_json::json;
use std::time::Duration;

/// `discover` and `search`: first page, then up to `pages - 1` load-mores
pub async fn run_listing(ctx: &Context, text: &str, pages: u32, output: &Output) -> Result<()> {
    let provider = ctx.provider()?;
    let store = ctx.watchlist();
    let mut listing = Listing::new();

    let spinner = Spinner::start(output.is_human(), format!("Loading {} movies...", Query::from_text(text).label()));

    // One-shot commands have nothing to debounce against
    if listing.search(provider.as_ref(), text, Duration::ZERO).await == Applied::Failed {
        drop(spinner);
        return Err(eyre!("Could not load movies from {}", provider.provider_name()));
    }

    for _ in 1..pages.max(1) {
        match listing.load_more(provider.as_ref()).await {
            None | Some(Applied::Merged { exhausted: true, .. }) => break,
            Some(Applied::Failed) => {
                output.warn(format!("Could not load page {}; showing what was loaded.", listing.page() + 1));
                break;
            }
            Some(_) => {}
        }
    }
    drop(spinner);

    print_listing(ctx, output, &listing, store.collection());
    if output.is_human() {
        if listing.has_more() {
            output.info(format!("Page {}. Use --pages {} to load more.", listing.page(), listing.page() + 1));
        } else if !listing.movies().is_empty() {
            output.info("No more results.");
        }
    }
    Ok(())
}

pub fn print_listing(ctx: &Context, output: &Output, listing: &Listing, watchlist: &WatchlistCollection) {
    let label = listing.query().map(|q| q.label().to_string()).unwrap_or_default();
    let data = json!({
        "query": label,
        "page": listing.page(),
        "has_more": listing.has_more(),
        "movies": render::cards_json(listing.movies(), watchlist, &ctx.card_images()),
    });

    output.emit(
        || {
            if listing.movies().is_empty() {
                "No movies found.".to_string()
            } else {
                render::card_table(listing.movies(), watchlist).to_string()
            }
        },
        &data,
    );
}

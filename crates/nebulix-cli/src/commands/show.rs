use super::Context;
use crate::output::Output;
use crate::render;
use crate::ui::Spinner;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use nebulix_core::routes::slugify;
use nebulix_core::{resolve, DetailLookup, DetailRoute, DetailView, FileSlot, LanguageTable, Route, WatchlistStore};
use nebulix_sources::MovieProvider;

pub async fn run_show(ctx: &Context, slug: Option<String>, id: Option<u64>, output: &Output) -> Result<()> {
    let route = match (id, slug) {
        (Some(id), _) => DetailRoute::Id(id),
        (None, Some(text)) => route_from_arg(&text),
        (None, None) => return Err(eyre!("Either a slug or --id is required")),
    };

    let provider = ctx.provider()?;
    let store = ctx.watchlist();
    show_detail(ctx, provider.as_ref(), &store, &route, output).await
}

/// Accept a `/m/...` route, a bare slug or a plain title
pub fn route_from_arg(text: &str) -> DetailRoute {
    match Route::parse(text) {
        Some(Route::Detail(route)) if text.trim_start().starts_with('/') => route,
        _ => DetailRoute::Slug(slugify(text)),
    }
}

pub async fn show_detail(
    ctx: &Context,
    provider: &dyn MovieProvider,
    store: &WatchlistStore<FileSlot>,
    route: &DetailRoute,
    output: &Output,
) -> Result<()> {
    let spinner = Spinner::start(output.is_human(), "Loading movie...");
    let (lookup, languages) = tokio::join!(resolve(provider, route), LanguageTable::fetch(provider));
    drop(spinner);

    match lookup {
        DetailLookup::NotFound => {
            output.warn("Movie not found.");
        }
        DetailLookup::Found(movie) => {
            let view = DetailView::build(&movie, &languages, &ctx.detail_images(), ctx.config.browse.cast_limit);
            let bookmarked = store.contains(movie.id);
            output.emit(
                || render::detail_text(&view, bookmarked),
                &render::detail_json(&view, bookmarked),
            );
        }
    }
    Ok(())
}

use super::Context;
use crate::output::Output;
use crate::render;
use crate::ui::Spinner;
use crate::WatchlistCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use nebulix_core::{resolve, DetailLookup, DetailRoute, FileSlot, WatchlistStore};
use serde_json::json;

type Store = WatchlistStore<FileSlot>;

pub async fn run_watchlist(ctx: &Context, cmd: WatchlistCommands, output: &Output) -> Result<()> {
    let mut store = ctx.watchlist();

    match cmd {
        WatchlistCommands::List => {
            print_watchlist(ctx, &store, output);
            Ok(())
        }
        WatchlistCommands::Add { id } => {
            if let Some(movie) = store.collection().get(id) {
                output.info(format!("{} is already on your watchlist.", movie.display_title()));
                return Ok(());
            }
            add(ctx, &mut store, id, output).await
        }
        WatchlistCommands::Remove { id } => {
            remove(&mut store, id, output);
            Ok(())
        }
        WatchlistCommands::Toggle { id } => {
            if store.contains(id) {
                remove(&mut store, id, output);
                Ok(())
            } else {
                add(ctx, &mut store, id, output).await
            }
        }
    }
}

/// Look the movie up so the stored card has a title and poster
async fn add(ctx: &Context, store: &mut Store, id: u64, output: &Output) -> Result<()> {
    let provider = ctx.provider()?;
    let spinner = Spinner::start(output.is_human(), format!("Looking up movie {}...", id));
    let lookup = resolve(provider.as_ref(), &DetailRoute::Id(id)).await;
    drop(spinner);

    match lookup {
        DetailLookup::Found(movie) => {
            store.toggle(&movie.to_summary());
            output.success(format!("Added {} to your watchlist.", movie.display_title()));
            Ok(())
        }
        DetailLookup::NotFound => Err(eyre!("Movie {} not found", id)),
    }
}

fn remove(store: &mut Store, id: u64, output: &Output) {
    let title = store.collection().get(id).map(|m| m.display_title().to_string());
    if store.remove(id) {
        output.success(format!(
            "Removed {} from your watchlist.",
            title.unwrap_or_else(|| id.to_string())
        ));
    } else {
        output.warn(format!("Movie {} is not on your watchlist.", id));
    }
}

pub fn print_watchlist(ctx: &Context, store: &Store, output: &Output) {
    let collection = store.collection();
    let data = json!({
        "count": collection.len(),
        "movies": render::cards_json(collection.movies(), collection, &ctx.card_images()),
    });

    output.emit(
        || {
            if collection.is_empty() {
                "Your watchlist is empty.".to_string()
            } else {
                render::card_table(collection.movies(), collection).to_string()
            }
        },
        &data,
    );
}

//! Interactive session over the listing, detail and watchlist views.
//!
//! One [`Listing`] lives for the whole session. The watchlist store is
//! reloaded every time the listing is redrawn so bookmarks made by another
//! process show up.

use super::{listing, prompts, show, watchlist, Context};
use crate::output::Output;
use crate::ui::{is_interactive, Spinner};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use nebulix_core::{Applied, DetailRoute, Listing, Query};
use nebulix_sources::MovieProvider;
use std::time::Duration;

const PROMPT: &str = "Search (empty for popular; more, mark <id>, show <id|slug>, list, quit)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Search(String),
    More,
    Mark(u64),
    Show(DetailRoute),
    List,
    Quit,
    Invalid(String),
}

/// Anything that is not a command word is search text
pub fn parse_command(line: &str) -> BrowseCommand {
    let trimmed = line.trim();
    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let head = parts.next().unwrap_or_default();
    let arg = parts.next().map(str::trim).filter(|a| !a.is_empty());

    match (head, arg) {
        ("more", None) => BrowseCommand::More,
        ("list", None) => BrowseCommand::List,
        ("quit" | "exit", None) => BrowseCommand::Quit,
        ("mark", Some(arg)) => match arg.parse() {
            Ok(id) => BrowseCommand::Mark(id),
            Err(_) => BrowseCommand::Invalid(format!("'{}' is not a movie id", arg)),
        },
        ("show", Some(arg)) => match arg.parse() {
            Ok(id) => BrowseCommand::Show(DetailRoute::Id(id)),
            Err(_) => BrowseCommand::Show(show::route_from_arg(arg)),
        },
        _ => BrowseCommand::Search(trimmed.to_string()),
    }
}

pub async fn run_browse(ctx: &Context, output: &Output) -> Result<()> {
    if !is_interactive() {
        return Err(eyre!("browse needs an interactive terminal; use discover or search instead"));
    }

    let provider = ctx.provider()?;
    let mut store = ctx.watchlist();
    let mut listing = Listing::new();

    run_search(&mut listing, provider.as_ref(), "", Duration::ZERO, output).await;

    loop {
        store.reload();
        listing::print_listing(ctx, output, &listing, store.collection());

        let line = prompts::prompt_string(PROMPT, None)?;
        match parse_command(&line) {
            BrowseCommand::Search(text) => {
                run_search(&mut listing, provider.as_ref(), &text, ctx.debounce(), output).await;
            }
            BrowseCommand::More => {
                let spinner = Spinner::start(output.is_human(), "Loading more...");
                let applied = listing.load_more(provider.as_ref()).await;
                drop(spinner);
                match applied {
                    None | Some(Applied::Merged { added: 0, exhausted: true }) => output.info("No more movies to load."),
                    Some(Applied::Failed) => output.warn("Could not load more movies. Try again."),
                    Some(_) => {}
                }
            }
            BrowseCommand::Mark(id) => {
                let record = listing
                    .movies()
                    .iter()
                    .find(|m| m.id == id)
                    .or_else(|| store.collection().get(id))
                    .map(|m| m.to_summary());
                match record {
                    Some(record) => {
                        if store.toggle(&record) {
                            output.success(format!("Added {} to your watchlist.", record.display_title()));
                        } else {
                            output.success(format!("Removed {} from your watchlist.", record.display_title()));
                        }
                    }
                    None => output.warn(format!("Movie {} is not in the current listing.", id)),
                }
            }
            BrowseCommand::Show(route) => {
                show::show_detail(ctx, provider.as_ref(), &store, &route, output).await?;
                prompts::pause()?;
            }
            BrowseCommand::List => {
                store.reload();
                watchlist::print_watchlist(ctx, &store, output);
                prompts::pause()?;
            }
            BrowseCommand::Invalid(message) => output.warn(message),
            BrowseCommand::Quit => break,
        }
    }

    Ok(())
}

async fn run_search(listing: &mut Listing, provider: &dyn MovieProvider, text: &str, delay: Duration, output: &Output) {
    let spinner = Spinner::start(output.is_human(), format!("Loading {} movies...", Query::from_text(text).label()));
    let applied = listing.search(provider, text, delay).await;
    drop(spinner);

    if applied == Applied::Failed {
        output.warn("Could not load movies. Check your connection and try again.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_words() {
        assert_eq!(parse_command("more"), BrowseCommand::More);
        assert_eq!(parse_command("  list "), BrowseCommand::List);
        assert_eq!(parse_command("quit"), BrowseCommand::Quit);
        assert_eq!(parse_command("mark 42"), BrowseCommand::Mark(42));
        assert_eq!(parse_command("show 603"), BrowseCommand::Show(DetailRoute::Id(603)));
        assert_eq!(
            parse_command("show the-matrix"),
            BrowseCommand::Show(DetailRoute::Slug("the-matrix".to_string()))
        );
    }

    #[test]
    fn test_everything_else_is_search_text() {
        assert_eq!(parse_command(""), BrowseCommand::Search(String::new()));
        assert_eq!(parse_command("dune"), BrowseCommand::Search("dune".to_string()));
        assert_eq!(parse_command("more cowbell"), BrowseCommand::Search("more cowbell".to_string()));
        // a lone command word that needs an argument is a title
        assert_eq!(parse_command("mark"), BrowseCommand::Search("mark".to_string()));
    }

    #[test]
    fn test_mark_needs_numeric_id() {
        assert!(matches!(parse_command("mark heat"), BrowseCommand::Invalid(_)));
    }
}

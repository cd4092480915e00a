pub mod accumulator;
pub mod detail;
pub mod languages;
pub mod listing;
pub mod query;
pub mod routes;
pub mod watchlist;
pub mod watchlist_slot;

pub use accumulator::{merge, ResultAccumulator};
pub use detail::{resolve, DetailLookup, DetailView, ImageOptions};
pub use languages::LanguageTable;
pub use listing::{fetch_page, Applied, Listing, PageRequest, Query};
pub use query::{debounce, QueryGeneration, QueryTicket};
pub use routes::{slug_to_query, DetailRoute, Route};
pub use watchlist::{load_collection, persist_collection, WatchlistCollection, WatchlistStore};
pub use watchlist_slot::{FileSlot, MemorySlot, StorageError, WatchlistSlot};

#[cfg(test)]
pub(crate) mod testing;

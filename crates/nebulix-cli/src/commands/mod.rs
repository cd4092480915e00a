pub mod browse;
pub mod config;
pub mod listing;
pub mod prompts;
pub mod show;
pub mod watchlist;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use nebulix_config::{Config, PathManager};
use nebulix_core::{FileSlot, ImageOptions, WatchlistStore};
use nebulix_sources::{provider_from_config, MovieProvider};
use std::time::Duration;

/// Loaded configuration plus the paths it was resolved against
pub struct Context {
    pub config: Config,
    pub paths: PathManager,
}

impl Context {
    pub fn new(config: Config, paths: PathManager) -> Self {
        Self { config, paths }
    }

    pub fn provider(&self) -> Result<Box<dyn MovieProvider>> {
        let provider = provider_from_config(&self.config)?;
        self.config.validate().map_err(|e| eyre!("{}", e))?;
        Ok(provider)
    }

    /// Fresh store over the watchlist file; callers reload it when redrawing
    pub fn watchlist(&self) -> WatchlistStore<FileSlot> {
        let path = self.config.watchlist_file(&self.paths);
        tracing::debug!(path = %path.display(), "Opening watchlist");
        WatchlistStore::open(FileSlot::new(path))
    }

    pub fn card_images(&self) -> ImageOptions<'_> {
        ImageOptions {
            base_url: &self.config.provider.image_base_url,
            size: &self.config.browse.card_poster_size,
        }
    }

    pub fn detail_images(&self) -> ImageOptions<'_> {
        ImageOptions {
            base_url: &self.config.provider.image_base_url,
            size: &self.config.browse.detail_image_size,
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.config.browse.debounce_ms)
    }
}

pub mod error;
pub mod factory;
pub mod images;
pub mod tmdb;
pub mod traits;

pub use error::SourceError;
pub use factory::provider_from_config;
pub use images::image_url;
pub use tmdb::TmdbClient;
pub use traits::MovieProvider;

pub mod credits;
pub mod language;
pub mod movie;
pub mod page;
pub mod slug;

pub use credits::{CastMember, Credits, Genre, Video};
pub use language::Language;
pub use movie::{MovieRecord, PLACEHOLDER};
pub use page::ResultPage;
pub use slug::slugify;

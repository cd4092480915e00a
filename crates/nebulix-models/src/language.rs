use serde::{Deserialize, Serialize};

/// One row of the provider's language lookup table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Language {
    pub iso_639_1: String,
    pub english_name: String,
}

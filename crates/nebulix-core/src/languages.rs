use nebulix_models::Language;
use nebulix_sources::MovieProvider;
use std::collections::HashMap;
use tracing::{info, warn};

const BUILTIN_LANGUAGES: &[(&str, &str)] = &[
    ("en", "English"),
    ("fr", "French"),
    ("es", "Spanish"),
    ("de", "German"),
    ("it", "Italian"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("zh", "Chinese"),
    ("hi", "Hindi"),
    ("ru", "Russian"),
    ("pt", "Portuguese"),
    ("ar", "Arabic"),
    ("nl", "Dutch"),
    ("tr", "Turkish"),
    ("sv", "Swedish"),
    ("pl", "Polish"),
    ("da", "Danish"),
    ("fi", "Finnish"),
    ("he", "Hebrew"),
    ("id", "Indonesian"),
    ("no", "Norwegian"),
    ("th", "Thai"),
    ("vi", "Vietnamese"),
];

/// ISO-639-1 code to English language name
#[derive(Debug, Clone)]
pub struct LanguageTable {
    names: HashMap<String, String>,
}

impl LanguageTable {
    pub fn builtin() -> Self {
        Self {
            names: BUILTIN_LANGUAGES
                .iter()
                .map(|(code, name)| (code.to_string(), name.to_string()))
                .collect(),
        }
    }

    pub fn from_languages(languages: Vec<Language>) -> Self {
        Self {
            names: languages
                .into_iter()
                .map(|l| (l.iso_639_1, l.english_name))
                .collect(),
        }
    }

    /// Provider's table, or the built-in one if the lookup fails or is empty
    pub async fn fetch<P: MovieProvider + ?Sized>(provider: &P) -> Self {
        match provider.languages().await {
            Ok(languages) if !languages.is_empty() => {
                info!(count = languages.len(), "Loaded language table from provider");
                Self::from_languages(languages)
            }
            Ok(_) => {
                warn!("Provider returned an empty language table, using built-in names");
                Self::builtin()
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch language table, using built-in names");
                Self::builtin()
            }
        }
    }

    /// Mapped name, otherwise the code upper-cased
    pub fn display_name(&self, code: &str) -> String {
        self.names
            .get(code)
            .cloned()
            .unwrap_or_else(|| code.to_uppercase())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for LanguageTable {
    fn default() -> Self {
        Self::builtin()
    }
}

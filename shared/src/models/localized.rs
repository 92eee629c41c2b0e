//! Localized text

use serde::{Deserialize, Serialize};

/// Text shown in both site languages.
///
/// Stored as a JSON column (`{"ru": "...", "en": "..."}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub ru: String,
    pub en: String,
}

impl LocalizedText {
    pub fn new(ru: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            ru: ru.into(),
            en: en.into(),
        }
    }

    /// Same text for both languages
    pub fn both(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            ru: text.clone(),
            en: text,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.ru.trim().is_empty() && self.en.trim().is_empty()
    }
}

//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// Media reference for photos and documents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaReference {
    pub id: uuid::Uuid,
    pub file_type: MediaType,
    pub url: String,
    pub original_filename: Option<String>,
}

impl MediaReference {
    /// Reference for a freshly uploaded photo
    pub fn photo(url: String, original_filename: Option<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            file_type: MediaType::Image,
            url,
            original_filename,
        }
    }
}

/// Types of media files
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Image,
    Document,
}

/// Supported languages for user-facing messages
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Indonesian,
    English,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::Indonesian => "id",
            Language::English => "en",
        }
    }
}

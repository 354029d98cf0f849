//! Data loading errors with suggestions.
//!
//! Only decoding provider and title data can fail. Grouping, search,
//! pinning and index generation substitute fallback values instead.

use thiserror::Error;

/// An error raised while loading region or title data.
#[derive(Debug, Error)]
pub enum DataError {
    /// The input was not valid JSON for the expected shape.
    #[error("malformed {what} data: {source}")]
    Malformed {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A region record had an empty code.
    #[error("region record #{index} has an empty code")]
    EmptyCode { index: usize },

    /// A title table had no locale identifier.
    #[error("title table has an empty locale identifier")]
    EmptyLocale,
}

impl DataError {
    pub fn malformed_regions(source: serde_json::Error) -> Self {
        Self::Malformed {
            what: "region",
            source,
        }
    }

    pub fn malformed_titles(source: serde_json::Error) -> Self {
        Self::Malformed {
            what: "title",
            source,
        }
    }

    /// A hint on how to fix the input.
    pub fn suggestion(&self) -> &'static str {
        match self {
            DataError::Malformed { what: "region", .. } => {
                "Region data must be a JSON array of {\"code\", \"continent\", \"children\"} objects"
            }
            DataError::Malformed { .. } => {
                "Title data must be a JSON object like {\"locale\": \"en\", \"titles\": {\"FR\": \"France\"}}"
            }
            DataError::EmptyCode { .. } => "Every region record needs a non-empty \"code\"",
            DataError::EmptyLocale => "Set \"locale\" to an identifier such as \"en\" or \"fr\"",
        }
    }
}

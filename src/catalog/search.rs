//! Search attributes

use std::fmt;
use std::str::FromStr;

use super::errors::StoreError;

/// Attribute a search can be dispatched on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchAttribute {
    Id,
    Title,
    Author,
    Genre,
}

impl SearchAttribute {
    pub const ALL: [SearchAttribute; 4] = [
        SearchAttribute::Id,
        SearchAttribute::Title,
        SearchAttribute::Author,
        SearchAttribute::Genre,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchAttribute::Id => "id",
            SearchAttribute::Title => "title",
            SearchAttribute::Author => "author",
            SearchAttribute::Genre => "genre",
        }
    }
}

impl fmt::Display for SearchAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchAttribute {
    type Err = StoreError;

    /// Exact, case-sensitive match on the attribute name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|attr| attr.as_str() == s)
            .ok_or_else(|| StoreError::InvalidAttribute(s.to_string()))
    }
}

use catalog_db::RecordId;
use serde::{Deserialize, Serialize};

use crate::modules::CATALOG_PREFIX;

pub const NAME_MIN_CHARS: usize = 3;
pub const NAME_MAX_CHARS: usize = 100;

/// A named category books are filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: RecordId,
    pub name: String,
}

impl Genre {
    /// Canonical location of the genre's detail page
    pub fn url(&self) -> String {
        genre_url(&self.id)
    }
}

pub fn genre_url(id: &RecordId) -> String {
    format!("{CATALOG_PREFIX}/genre/{id}")
}

/// Validated, sanitized data for a genre about to be inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGenre {
    pub name: String,
}

/// Raw genre form submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreForm {
    #[serde(default)]
    pub name: String,
}

use catalog_db::RecordId;
use serde::{Deserialize, Serialize};

/// A title held by the library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: RecordId,
    pub title: String,
    pub summary: String,
    pub isbn: String,
    /// Author of the book
    pub author: RecordId,
    /// Genres the book is filed under
    pub genres: Vec<RecordId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub author: RecordId,
    pub genres: Vec<RecordId>,
}

/// Projection shown on genre and author detail pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct BookSummary {
    pub title: String,
    pub summary: String,
}

impl From<&Book> for BookSummary {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            summary: book.summary.clone(),
        }
    }
}

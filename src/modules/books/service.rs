use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::instrument;

use super::store::BookStore;
use crate::error::CatalogResult;
use crate::modules::authors::models::{self, Author};
use crate::modules::authors::store::AuthorStore;

/// Author reference shown next to a book
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuthorLink {
    pub name: String,
    pub url: String,
}

impl From<&Author> for AuthorLink {
    fn from(author: &Author) -> Self {
        Self {
            name: models::name(author),
            url: models::url(author),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookListEntry {
    pub title: String,
    pub author: AuthorLink,
}

pub struct BookService {
    books: Arc<dyn BookStore>,
    authors: Arc<dyn AuthorStore>,
}

impl BookService {
    pub fn new(books: Arc<dyn BookStore>, authors: Arc<dyn AuthorStore>) -> Self {
        Self { books, authors }
    }

    /// Every book by title, with its author's name and location. A book
    /// whose author record is gone gets an empty link.
    #[instrument(skip(self))]
    pub async fn list(&self) -> CatalogResult<Vec<BookListEntry>> {
        let (books, authors) = tokio::try_join!(
            self.books.list_by_title(),
            self.authors.list_by_family_name()
        )?;

        let authors: HashMap<_, _> = authors.iter().map(|author| (author.id, author)).collect();
        Ok(books
            .into_iter()
            .map(|book| BookListEntry {
                author: authors
                    .get(&book.author)
                    .map(|&author| AuthorLink::from(author))
                    .unwrap_or_default(),
                title: book.title,
            })
            .collect())
    }
}

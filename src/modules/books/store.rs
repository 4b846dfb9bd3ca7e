//! Book persistence

use std::collections::HashMap;

use async_trait::async_trait;
use catalog_db::{RecordId, StoreError, StoreResult};
use sqlx::SqlitePool;
use tokio::sync::RwLock;

use super::models::{Book, BookSummary, NewBook};

const ENTITY: &str = "book";

/// Book repository interface
#[async_trait]
pub trait BookStore: Send + Sync {
    /// All books ordered by title
    async fn list_by_title(&self) -> StoreResult<Vec<Book>>;

    /// `{title, summary}` of every book filed under `genre`, ordered by title
    async fn summaries_by_genre(&self, genre: RecordId) -> StoreResult<Vec<BookSummary>>;

    /// `{title, summary}` of every book written by `author`, ordered by title
    async fn summaries_by_author(&self, author: RecordId) -> StoreResult<Vec<BookSummary>>;

    async fn insert(&self, book: NewBook) -> StoreResult<Book>;
}

/// In-process book store
#[derive(Debug, Default)]
pub struct MemoryBookStore {
    books: RwLock<Vec<Book>>,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn summaries_where(&self, keep: impl Fn(&Book) -> bool) -> Vec<BookSummary> {
        let books = self.books.read().await;
        let mut summaries: Vec<_> = books
            .iter()
            .filter(|&book| keep(book))
            .map(BookSummary::from)
            .collect();
        summaries.sort_by(|a, b| a.title.cmp(&b.title));
        summaries
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn list_by_title(&self) -> StoreResult<Vec<Book>> {
        let mut books = self.books.read().await.clone();
        books.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(books)
    }

    async fn summaries_by_genre(&self, genre: RecordId) -> StoreResult<Vec<BookSummary>> {
        Ok(self.summaries_where(|book| book.genres.contains(&genre)).await)
    }

    async fn summaries_by_author(&self, author: RecordId) -> StoreResult<Vec<BookSummary>> {
        Ok(self.summaries_where(|book| book.author == author).await)
    }

    async fn insert(&self, book: NewBook) -> StoreResult<Book> {
        let book = Book {
            id: RecordId::generate(),
            title: book.title,
            summary: book.summary,
            isbn: book.isbn,
            author: book.author,
            genres: book.genres,
        };
        self.books.write().await.push(book.clone());
        Ok(book)
    }
}

#[derive(sqlx::FromRow)]
struct BookRow {
    id: String,
    title: String,
    summary: String,
    isbn: String,
    author_id: String,
}

fn parse_id(raw: &str) -> StoreResult<RecordId> {
    RecordId::parse(raw).ok_or_else(|| StoreError::corrupt(ENTITY, format!("invalid id '{raw}'")))
}

/// SQLite implementation of [`BookStore`]. Genre links live in the
/// `book_genres` join table.
pub struct SqliteBookStore {
    pool: SqlitePool,
}

impl SqliteBookStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for SqliteBookStore {
    async fn list_by_title(&self) -> StoreResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, BookRow>(
            "SELECT id, title, summary, isbn, author_id FROM books ORDER BY title ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        let links: Vec<(String, String)> =
            sqlx::query_as("SELECT book_id, genre_id FROM book_genres ORDER BY rowid")
                .fetch_all(&self.pool)
                .await?;
        let mut genres_by_book: HashMap<String, Vec<RecordId>> = HashMap::new();
        for (book_id, genre_id) in links {
            genres_by_book
                .entry(book_id)
                .or_default()
                .push(parse_id(&genre_id)?);
        }

        rows.into_iter()
            .map(|row| -> StoreResult<Book> {
                Ok(Book {
                    id: parse_id(&row.id)?,
                    author: parse_id(&row.author_id)?,
                    genres: genres_by_book.remove(&row.id).unwrap_or_default(),
                    title: row.title,
                    summary: row.summary,
                    isbn: row.isbn,
                })
            })
            .collect()
    }

    async fn summaries_by_genre(&self, genre: RecordId) -> StoreResult<Vec<BookSummary>> {
        let summaries = sqlx::query_as::<_, BookSummary>(
            r#"
            SELECT b.title, b.summary FROM books b
            INNER JOIN book_genres bg ON bg.book_id = b.id
            WHERE bg.genre_id = ?
            ORDER BY b.title ASC
            "#,
        )
        .bind(genre.to_string())
        .fetch_all(&self.pool)
        .await?;

        Ok(summaries)
    }

    async fn summaries_by_author(&self, author: RecordId) -> StoreResult<Vec<BookSummary>> {
        let summaries = sqlx::query_as::<_, BookSummary>(
            "SELECT title, summary FROM books WHERE author_id = ? ORDER BY title ASC",
        )
        .bind(author.to_string())
        .fetch_all(&self.pool)
        .await?;

        Ok(summaries)
    }

    async fn insert(&self, book: NewBook) -> StoreResult<Book> {
        let id = RecordId::generate();
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO books (id, title, summary, isbn, author_id) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(id.to_string())
        .bind(&book.title)
        .bind(&book.summary)
        .bind(&book.isbn)
        .bind(book.author.to_string())
        .execute(&mut *tx)
        .await?;

        for genre in &book.genres {
            sqlx::query("INSERT INTO book_genres (book_id, genre_id) VALUES (?, ?)")
                .bind(id.to_string())
                .bind(genre.to_string())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(Book {
            id,
            title: book.title,
            summary: book.summary,
            isbn: book.isbn,
            author: book.author,
            genres: book.genres,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::authors::models::NewAuthor;
    use crate::modules::authors::store::{AuthorStore, SqliteAuthorStore};
    use crate::modules::genres::models::NewGenre;
    use crate::modules::genres::store::{GenreStore, SqliteGenreStore};
    use crate::modules::testing::migrated_pool;

    fn new_book(title: &str, author: RecordId, genres: Vec<RecordId>) -> NewBook {
        NewBook {
            title: title.to_string(),
            summary: format!("About {title}"),
            isbn: "9780000000000".to_string(),
            author,
            genres,
        }
    }

    async fn exercise(store: &dyn BookStore, author: RecordId, other_author: RecordId, genre: RecordId) {
        store
            .insert(new_book("The Wise Man's Fear", author, vec![genre]))
            .await
            .unwrap();
        store
            .insert(new_book("Apes and Angels", other_author, vec![]))
            .await
            .unwrap();
        store
            .insert(new_book("The Name of the Wind", author, vec![genre]))
            .await
            .unwrap();

        let titles: Vec<_> = store
            .summaries_by_genre(genre)
            .await
            .unwrap()
            .into_iter()
            .map(|summary| summary.title)
            .collect();
        assert_eq!(titles, ["The Name of the Wind", "The Wise Man's Fear"]);

        let by_other = store.summaries_by_author(other_author).await.unwrap();
        assert_eq!(
            by_other,
            vec![BookSummary {
                title: "Apes and Angels".to_string(),
                summary: "About Apes and Angels".to_string()
            }]
        );

        let all = store.list_by_title().await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].title, "Apes and Angels");
        assert!(all[0].genres.is_empty());
        assert_eq!(all[1].genres, vec![genre]);
        assert!(store.summaries_by_genre(RecordId::generate()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn memory_store_projects_by_genre_and_author() {
        exercise(
            &MemoryBookStore::new(),
            RecordId::generate(),
            RecordId::generate(),
            RecordId::generate(),
        )
        .await;
    }

    #[tokio::test]
    async fn sqlite_store_projects_by_genre_and_author() {
        let pool = migrated_pool().await;
        let authors = SqliteAuthorStore::new(pool.clone());
        let genres = SqliteGenreStore::new(pool.clone());

        let author = authors
            .insert(NewAuthor::named("Patrick", "Rothfuss"))
            .await
            .unwrap();
        let other = authors.insert(NewAuthor::named("Ben", "Bova")).await.unwrap();
        let genre = genres
            .insert(NewGenre {
                name: "Fantasy".to_string(),
            })
            .await
            .unwrap();

        exercise(&SqliteBookStore::new(pool), author.id, other.id, genre.id).await;
    }
}

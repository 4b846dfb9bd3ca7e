//! Author persistence

use async_trait::async_trait;
use catalog_db::{RecordId, StoreError, StoreResult};
use sqlx::SqlitePool;
use time::Date;
use tokio::sync::RwLock;

use super::models::{iso_date, Author, NewAuthor};
use crate::validation::parse_iso_date;

const ENTITY: &str = "author";

/// Author repository interface
#[async_trait]
pub trait AuthorStore: Send + Sync {
    /// All authors ordered by family name
    async fn list_by_family_name(&self) -> StoreResult<Vec<Author>>;

    async fn find_by_id(&self, id: RecordId) -> StoreResult<Option<Author>>;

    async fn insert(&self, author: NewAuthor) -> StoreResult<Author>;
}

fn from_new(id: RecordId, author: NewAuthor) -> Author {
    Author {
        id,
        first_name: author.first_name,
        family_name: author.family_name,
        date_of_birth: author.date_of_birth,
        date_of_death: author.date_of_death,
    }
}

/// In-process author store
#[derive(Debug, Default)]
pub struct MemoryAuthorStore {
    authors: RwLock<Vec<Author>>,
}

impl MemoryAuthorStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuthorStore for MemoryAuthorStore {
    async fn list_by_family_name(&self) -> StoreResult<Vec<Author>> {
        let mut authors = self.authors.read().await.clone();
        authors.sort_by(|a, b| a.family_name.cmp(&b.family_name));
        Ok(authors)
    }

    async fn find_by_id(&self, id: RecordId) -> StoreResult<Option<Author>> {
        let authors = self.authors.read().await;
        Ok(authors.iter().find(|author| author.id == id).cloned())
    }

    async fn insert(&self, author: NewAuthor) -> StoreResult<Author> {
        let author = from_new(RecordId::generate(), author);
        self.authors.write().await.push(author.clone());
        Ok(author)
    }
}

#[derive(sqlx::FromRow)]
struct AuthorRow {
    id: String,
    first_name: String,
    family_name: String,
    date_of_birth: Option<String>,
    date_of_death: Option<String>,
}

fn parse_date(raw: Option<String>) -> StoreResult<Option<Date>> {
    raw.map(|raw| {
        parse_iso_date(&raw)
            .ok_or_else(|| StoreError::corrupt(ENTITY, format!("invalid date '{raw}'")))
    })
    .transpose()
}

impl TryFrom<AuthorRow> for Author {
    type Error = StoreError;

    fn try_from(row: AuthorRow) -> Result<Self, Self::Error> {
        let id = RecordId::parse(&row.id)
            .ok_or_else(|| StoreError::corrupt(ENTITY, format!("invalid id '{}'", row.id)))?;
        Ok(Author {
            id,
            first_name: row.first_name,
            family_name: row.family_name,
            date_of_birth: parse_date(row.date_of_birth)?,
            date_of_death: parse_date(row.date_of_death)?,
        })
    }
}

/// SQLite implementation of [`AuthorStore`]
pub struct SqliteAuthorStore {
    pool: SqlitePool,
}

impl SqliteAuthorStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

const SELECT_AUTHOR: &str =
    "SELECT id, first_name, family_name, date_of_birth, date_of_death FROM authors";

#[async_trait]
impl AuthorStore for SqliteAuthorStore {
    async fn list_by_family_name(&self) -> StoreResult<Vec<Author>> {
        let rows = sqlx::query_as::<_, AuthorRow>(&format!(
            "{SELECT_AUTHOR} ORDER BY family_name ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Author::try_from).collect()
    }

    async fn find_by_id(&self, id: RecordId) -> StoreResult<Option<Author>> {
        let row = sqlx::query_as::<_, AuthorRow>(&format!("{SELECT_AUTHOR} WHERE id = ?"))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(Author::try_from).transpose()
    }

    async fn insert(&self, author: NewAuthor) -> StoreResult<Author> {
        let id = RecordId::generate();

        sqlx::query(
            r#"
            INSERT INTO authors (id, first_name, family_name, date_of_birth, date_of_death)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(id.to_string())
        .bind(&author.first_name)
        .bind(&author.family_name)
        .bind(author.date_of_birth.map(iso_date))
        .bind(author.date_of_death.map(iso_date))
        .execute(&self.pool)
        .await?;

        Ok(from_new(id, author))
    }
}

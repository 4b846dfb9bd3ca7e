//! Genre persistence

use async_trait::async_trait;
use catalog_db::{Collation, RecordId, StoreError, StoreResult};
use sqlx::SqlitePool;
use tokio::sync::RwLock;

use super::models::{Genre, NewGenre};

const ENTITY: &str = "genre";

/// Genre repository interface
#[async_trait]
pub trait GenreStore: Send + Sync {
    /// All genres ordered by name, case-sensitively
    async fn list_by_name(&self) -> StoreResult<Vec<Genre>>;

    async fn find_by_id(&self, id: RecordId) -> StoreResult<Option<Genre>>;

    /// First genre whose name equals `name` under `collation`
    async fn find_by_name(&self, name: &str, collation: Collation) -> StoreResult<Option<Genre>>;

    /// Insert a new genre.
    ///
    /// # Errors
    /// [`StoreError::Duplicate`] when a genre with the same case-insensitive
    /// name already exists.
    async fn insert(&self, genre: NewGenre) -> StoreResult<Genre>;
}

/// In-process genre store
#[derive(Debug, Default)]
pub struct MemoryGenreStore {
    genres: RwLock<Vec<Genre>>,
}

impl MemoryGenreStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GenreStore for MemoryGenreStore {
    async fn list_by_name(&self) -> StoreResult<Vec<Genre>> {
        let mut genres = self.genres.read().await.clone();
        genres.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(genres)
    }

    async fn find_by_id(&self, id: RecordId) -> StoreResult<Option<Genre>> {
        let genres = self.genres.read().await;
        Ok(genres.iter().find(|genre| genre.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str, collation: Collation) -> StoreResult<Option<Genre>> {
        let genres = self.genres.read().await;
        Ok(genres
            .iter()
            .find(|genre| collation.matches(&genre.name, name))
            .cloned())
    }

    async fn insert(&self, genre: NewGenre) -> StoreResult<Genre> {
        let mut genres = self.genres.write().await;
        // same rule as the unique index on the SQLite table
        if genres
            .iter()
            .any(|existing| Collation::CaseInsensitive.matches(&existing.name, &genre.name))
        {
            return Err(StoreError::Duplicate {
                entity: ENTITY,
                key: Collation::CaseInsensitive.key(&genre.name),
            });
        }

        let genre = Genre {
            id: RecordId::generate(),
            name: genre.name,
        };
        genres.push(genre.clone());
        Ok(genre)
    }
}

#[derive(sqlx::FromRow)]
struct GenreRow {
    id: String,
    name: String,
}

impl TryFrom<GenreRow> for Genre {
    type Error = StoreError;

    fn try_from(row: GenreRow) -> Result<Self, Self::Error> {
        let id = RecordId::parse(&row.id)
            .ok_or_else(|| StoreError::corrupt(ENTITY, format!("invalid id '{}'", row.id)))?;
        Ok(Genre { id, name: row.name })
    }
}

/// SQLite implementation of [`GenreStore`]
pub struct SqliteGenreStore {
    pool: SqlitePool,
}

impl SqliteGenreStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GenreStore for SqliteGenreStore {
    async fn list_by_name(&self) -> StoreResult<Vec<Genre>> {
        let rows = sqlx::query_as::<_, GenreRow>("SELECT id, name FROM genres ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Genre::try_from).collect()
    }

    async fn find_by_id(&self, id: RecordId) -> StoreResult<Option<Genre>> {
        let row = sqlx::query_as::<_, GenreRow>("SELECT id, name FROM genres WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(Genre::try_from).transpose()
    }

    async fn find_by_name(&self, name: &str, collation: Collation) -> StoreResult<Option<Genre>> {
        let query = match collation {
            Collation::Exact => "SELECT id, name FROM genres WHERE name = ? LIMIT 1",
            Collation::CaseInsensitive => "SELECT id, name FROM genres WHERE name_key = ? LIMIT 1",
        };

        let row = sqlx::query_as::<_, GenreRow>(query)
            .bind(collation.key(name))
            .fetch_optional(&self.pool)
            .await?;

        row.map(Genre::try_from).transpose()
    }

    async fn insert(&self, genre: NewGenre) -> StoreResult<Genre> {
        let id = RecordId::generate();
        let key = Collation::CaseInsensitive.key(&genre.name);

        sqlx::query("INSERT INTO genres (id, name, name_key) VALUES (?, ?, ?)")
            .bind(id.to_string())
            .bind(&genre.name)
            .bind(&key)
            .execute(&self.pool)
            .await
            .map_err(|err| StoreError::from_insert(err, ENTITY, key.clone()))?;

        Ok(Genre {
            id,
            name: genre.name,
        })
    }
}

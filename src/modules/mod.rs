pub mod authors;
pub mod books;
pub mod genres;

use std::sync::Arc;

use catalog_db::SqlitePool;
use catalog_kernel::ModuleRegistry;

use crate::views::Renderer;
use authors::store::{AuthorStore, MemoryAuthorStore, SqliteAuthorStore};
use books::store::{BookStore, MemoryBookStore, SqliteBookStore};
use genres::store::{GenreStore, MemoryGenreStore, SqliteGenreStore};

/// Path every catalog route is nested under
pub const CATALOG_PREFIX: &str = "/catalog";

/// Stores and renderer shared by the catalog modules
#[derive(Clone)]
pub struct Catalog {
    pub genres: Arc<dyn GenreStore>,
    pub authors: Arc<dyn AuthorStore>,
    pub books: Arc<dyn BookStore>,
    pub renderer: Arc<dyn Renderer>,
}

impl Catalog {
    /// Catalog kept entirely in process memory
    pub fn in_memory(renderer: Arc<dyn Renderer>) -> Self {
        Self {
            genres: Arc::new(MemoryGenreStore::new()),
            authors: Arc::new(MemoryAuthorStore::new()),
            books: Arc::new(MemoryBookStore::new()),
            renderer,
        }
    }

    /// Catalog backed by a SQLite pool; migrations must already be applied
    pub fn sqlite(pool: SqlitePool, renderer: Arc<dyn Renderer>) -> Self {
        Self {
            genres: Arc::new(SqliteGenreStore::new(pool.clone())),
            authors: Arc::new(SqliteAuthorStore::new(pool.clone())),
            books: Arc::new(SqliteBookStore::new(pool)),
            renderer,
        }
    }
}

/// Register the catalog modules. Books come last because their tables
/// reference genres and authors.
pub fn register_all(registry: &mut ModuleRegistry, catalog: &Catalog) -> anyhow::Result<()> {
    registry.register(genres::create_module(catalog))?;
    registry.register(authors::create_module(catalog))?;
    registry.register(books::create_module(catalog))?;
    Ok(())
}

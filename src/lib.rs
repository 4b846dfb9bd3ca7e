//! Local library catalog: genres, authors and books served as HTML pages
//! under `/catalog`.

pub mod bootstrap;
pub mod error;
pub mod modules;
pub mod seed;
pub mod validation;
pub mod views;

pub use bootstrap::Application;
pub use error::{CatalogError, CatalogResult};
pub use modules::{Catalog, CATALOG_PREFIX};

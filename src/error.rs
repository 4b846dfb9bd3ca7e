use catalog_db::StoreError;
use catalog_http::AppError;
use thiserror::Error;

use crate::views::RenderError;

/// Failure of a catalog service operation.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The identifier was malformed or no record carries it
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

impl CatalogError {
    pub fn not_found(entity: &'static str) -> Self {
        Self::NotFound { entity }
    }
}

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound { .. } => AppError::not_found(err.to_string()),
            CatalogError::Store(err) => AppError::Internal(err.into()),
            CatalogError::Render(err) => AppError::Internal(err.into()),
        }
    }
}

impl From<RenderError> for AppError {
    fn from(err: RenderError) -> Self {
        AppError::Internal(err.into())
    }
}

use thiserror::Error;

/// Failure raised by a catalog store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A unique constraint rejected the write
    #[error("duplicate {entity} for key '{key}'")]
    Duplicate { entity: &'static str, key: String },

    /// A stored row could not be decoded into its entity
    #[error("corrupt {entity} record: {message}")]
    Corrupt {
        entity: &'static str,
        message: String,
    },

    #[error("migration {module}/{id} failed: {source}")]
    Migration {
        module: String,
        id: &'static str,
        source: sqlx::Error,
    },
}

impl StoreError {
    /// Translate an insert failure, surfacing unique-index violations as
    /// [`StoreError::Duplicate`].
    pub fn from_insert(err: sqlx::Error, entity: &'static str, key: impl Into<String>) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if db.is_unique_violation() {
                return StoreError::Duplicate {
                    entity,
                    key: key.into(),
                };
            }
        }
        StoreError::Database(err)
    }

    pub fn corrupt(entity: &'static str, message: impl Into<String>) -> Self {
        StoreError::Corrupt {
            entity,
            message: message.into(),
        }
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, StoreError::Duplicate { .. })
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

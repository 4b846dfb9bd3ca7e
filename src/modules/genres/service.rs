//! Genre use cases: list, detail and the validated, de-duplicating create.

use std::sync::Arc;

use catalog_db::{Collation, RecordId};
use tracing::{debug, instrument};

use super::models::{Genre, GenreForm, NewGenre, NAME_MAX_CHARS, NAME_MIN_CHARS};
use super::store::GenreStore;
use crate::error::{CatalogError, CatalogResult};
use crate::modules::books::models::BookSummary;
use crate::modules::books::store::BookStore;
use crate::validation::{FieldError, FieldRules, Report, Validated};

/// A genre with the books filed under it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreDetail {
    pub genre: Genre,
    pub books: Vec<BookSummary>,
}

/// Where a create submission ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// Show the form again with the sanitized attempt and what was wrong
    Invalid {
        attempt: GenreForm,
        errors: Vec<FieldError>,
    },
    /// A genre with that name (ignoring case) was already stored
    Existing(Genre),
    Created(Genre),
}

pub struct GenreService {
    genres: Arc<dyn GenreStore>,
    books: Arc<dyn BookStore>,
}

impl GenreService {
    pub fn new(genres: Arc<dyn GenreStore>, books: Arc<dyn BookStore>) -> Self {
        Self { genres, books }
    }

    fn name_rules() -> FieldRules {
        FieldRules::new("name")
            .trim()
            .min_chars(
                NAME_MIN_CHARS,
                "Genre name must contain at least 3 characters",
            )
            .max_chars(
                NAME_MAX_CHARS,
                "Genre name must contain at most 100 characters",
            )
            .escape()
    }

    /// Trim, length-check and escape a submission
    pub fn validate(form: &GenreForm) -> Validated<GenreForm> {
        let mut report = Report::new();
        let name = report.field(&Self::name_rules(), &form.name);
        report.finish(GenreForm { name })
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> CatalogResult<Vec<Genre>> {
        Ok(self.genres.list_by_name().await?)
    }

    /// Genre plus its books. Malformed ids fail before any store is queried.
    #[instrument(skip(self))]
    pub async fn detail(&self, raw_id: &str) -> CatalogResult<GenreDetail> {
        let id = RecordId::parse(raw_id).ok_or_else(|| CatalogError::not_found("Genre"))?;

        let (genre, books) = tokio::try_join!(
            self.genres.find_by_id(id),
            self.books.summaries_by_genre(id)
        )?;

        let genre = genre.ok_or_else(|| CatalogError::not_found("Genre"))?;
        debug!(genre = %genre.id, books = books.len(), "loaded genre detail");
        Ok(GenreDetail { genre, books })
    }

    #[instrument(skip(self, form), fields(name = %form.name))]
    pub async fn create(&self, form: GenreForm) -> CatalogResult<CreateOutcome> {
        let name = match Self::validate(&form) {
            Validated::Valid(valid) => valid.name,
            Validated::Invalid { attempt, errors } => {
                debug!(errors = errors.len(), "genre submission rejected");
                return Ok(CreateOutcome::Invalid { attempt, errors });
            }
        };

        if let Some(existing) = self
            .genres
            .find_by_name(&name, Collation::CaseInsensitive)
            .await?
        {
            debug!(genre = %existing.id, "genre already exists");
            return Ok(CreateOutcome::Existing(existing));
        }

        match self.genres.insert(NewGenre { name: name.clone() }).await {
            Ok(genre) => {
                tracing::info!(genre = %genre.id, name = %genre.name, "genre created");
                Ok(CreateOutcome::Created(genre))
            }
            // lost a race with a concurrent create of the same name
            Err(err) if err.is_duplicate() => {
                let existing = self
                    .genres
                    .find_by_name(&name, Collation::CaseInsensitive)
                    .await?;
                existing
                    .map(CreateOutcome::Existing)
                    .ok_or_else(|| CatalogError::Store(err))
            }
            Err(err) => Err(err.into()),
        }
    }
}

use std::sync::Arc;

use catalog_db::RecordId;
use tracing::{debug, info, instrument};

use super::models::{Author, AuthorForm, NewAuthor, NAME_MAX_CHARS};
use super::store::AuthorStore;
use crate::error::{CatalogError, CatalogResult};
use crate::modules::books::models::BookSummary;
use crate::modules::books::store::BookStore;
use crate::validation::{FieldError, FieldRules, Report, Validated};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorDetail {
    pub author: Author,
    pub books: Vec<BookSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    Invalid {
        attempt: AuthorForm,
        errors: Vec<FieldError>,
    },
    Created(Author),
}

/// Author use cases. Unlike genres, two authors may share a name.
pub struct AuthorService {
    authors: Arc<dyn AuthorStore>,
    books: Arc<dyn BookStore>,
}

fn name_rules(field: &'static str, label: &str) -> FieldRules {
    FieldRules::new(field)
        .trim()
        .min_chars(1, format!("{label} must be specified."))
        .max_chars(
            NAME_MAX_CHARS,
            format!("{label} must contain at most 100 characters"),
        )
        .escape()
}

impl AuthorService {
    pub fn new(authors: Arc<dyn AuthorStore>, books: Arc<dyn BookStore>) -> Self {
        Self { authors, books }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> CatalogResult<Vec<Author>> {
        Ok(self.authors.list_by_family_name().await?)
    }

    #[instrument(skip(self))]
    pub async fn detail(&self, raw_id: &str) -> CatalogResult<AuthorDetail> {
        let id = RecordId::parse(raw_id).ok_or_else(|| CatalogError::not_found("Author"))?;

        let (author, books) = tokio::try_join!(
            self.authors.find_by_id(id),
            self.books.summaries_by_author(id)
        )?;

        let author = author.ok_or_else(|| CatalogError::not_found("Author"))?;
        Ok(AuthorDetail { author, books })
    }

    #[instrument(skip_all)]
    pub async fn create(&self, form: AuthorForm) -> CatalogResult<CreateOutcome> {
        let mut report = Report::new();
        let first_name = report.field(&name_rules("first_name", "First name"), &form.first_name);
        let family_name = report.field(&name_rules("family_name", "Family name"), &form.family_name);
        let date_of_birth = report.optional_date(
            "date_of_birth",
            &form.date_of_birth,
            "Invalid date of birth",
        );
        let date_of_death = report.optional_date(
            "date_of_death",
            &form.date_of_death,
            "Invalid date of death",
        );

        let attempt = AuthorForm {
            first_name: first_name.clone(),
            family_name: family_name.clone(),
            date_of_birth: form.date_of_birth.trim().to_string(),
            date_of_death: form.date_of_death.trim().to_string(),
        };
        if let Validated::Invalid { attempt, errors } = report.finish(attempt) {
            debug!(errors = errors.len(), "author submission rejected");
            return Ok(CreateOutcome::Invalid { attempt, errors });
        }

        let author = self
            .authors
            .insert(NewAuthor {
                first_name,
                family_name,
                date_of_birth,
                date_of_death,
            })
            .await?;
        info!(author = %author.id, "author created");
        Ok(CreateOutcome::Created(author))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::authors::store::MemoryAuthorStore;
    use crate::modules::books::models::NewBook;
    use crate::modules::books::store::MemoryBookStore;
    use time::macros::date;

    fn service() -> (AuthorService, Arc<MemoryAuthorStore>, Arc<MemoryBookStore>) {
        let authors = Arc::new(MemoryAuthorStore::new());
        let books = Arc::new(MemoryBookStore::new());
        (
            AuthorService::new(authors.clone(), books.clone()),
            authors,
            books,
        )
    }

    fn form(first: &str, family: &str, birth: &str, death: &str) -> AuthorForm {
        AuthorForm {
            first_name: first.to_string(),
            family_name: family.to_string(),
            date_of_birth: birth.to_string(),
            date_of_death: death.to_string(),
        }
    }

    #[tokio::test]
    async fn create_stores_trimmed_names_and_parsed_dates() {
        let (service, authors, _) = service();

        let outcome = service
            .create(form(" Jane ", "Austen", "1775-12-16", ""))
            .await
            .unwrap();

        let created = match outcome {
            CreateOutcome::Created(author) => author,
            other => panic!("expected a new author, got {other:?}"),
        };
        assert_eq!(created.first_name, "Jane");
        assert_eq!(created.date_of_birth, Some(date!(1775 - 12 - 16)));
        assert_eq!(created.date_of_death, None);
        assert_eq!(authors.list_by_family_name().await.unwrap(), vec![created]);
    }

    #[tokio::test]
    async fn create_collects_every_failure() {
        let (service, authors, _) = service();

        let outcome = service
            .create(form("  ", "", "16/12/1775", "not a date"))
            .await
            .unwrap();

        match outcome {
            CreateOutcome::Invalid { attempt, errors } => {
                let messages: Vec<_> = errors.iter().map(|e| e.message.as_str()).collect();
                assert_eq!(
                    messages,
                    [
                        "First name must be specified.",
                        "Family name must be specified.",
                        "Invalid date of birth",
                        "Invalid date of death",
                    ]
                );
                assert_eq!(attempt.date_of_birth, "16/12/1775");
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
        assert!(authors.list_by_family_name().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn authors_with_the_same_name_are_both_kept() {
        let (service, authors, _) = service();

        service.create(form("John", "Smith", "", "")).await.unwrap();
        service.create(form("John", "Smith", "", "")).await.unwrap();

        assert_eq!(authors.list_by_family_name().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn detail_of_malformed_or_absent_id_is_not_found() {
        let (service, _, _) = service();

        for id in ["nope".to_string(), RecordId::generate().to_string()] {
            let err = service.detail(&id).await.unwrap_err();
            assert!(matches!(err, CatalogError::NotFound { entity: "Author" }));
        }
    }

    #[tokio::test]
    async fn detail_lists_the_author_books() {
        let (service, authors, books) = service();
        let author = authors
            .insert(NewAuthor::named("Isaac", "Asimov"))
            .await
            .unwrap();
        books
            .insert(NewBook {
                title: "Foundation".to_string(),
                summary: "Psychohistory".to_string(),
                isbn: "9780553293357".to_string(),
                author: author.id,
                genres: vec![],
            })
            .await
            .unwrap();

        let detail = service.detail(&author.id.to_string()).await.unwrap();

        assert_eq!(detail.author, author);
        assert_eq!(detail.books.len(), 1);
        assert_eq!(detail.books[0].title, "Foundation");
    }
}

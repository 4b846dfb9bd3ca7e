use catalog_db::RecordId;
use serde::{Deserialize, Serialize};
use time::{format_description::BorrowedFormatItem, macros::format_description, Date};

use crate::modules::CATALOG_PREFIX;

pub const NAME_MAX_CHARS: usize = 100;

/// Medium date style, e.g. "Jun 6, 1944"
const MEDIUM_DATE: &[BorrowedFormatItem<'static>] =
    format_description!("[month repr:short] [day padding:none], [year]");

const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// A writer of one or more books, as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: RecordId,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<Date>,
    pub date_of_death: Option<Date>,
}

/// Full name as `"family, first"`; empty unless both parts are present.
pub fn name(author: &Author) -> String {
    if author.first_name.is_empty() || author.family_name.is_empty() {
        return String::new();
    }
    format!("{}, {}", author.family_name, author.first_name)
}

/// Canonical location of the author's detail page
pub fn url(author: &Author) -> String {
    author_url(&author.id)
}

pub fn author_url(id: &RecordId) -> String {
    format!("{CATALOG_PREFIX}/author/{id}")
}

pub fn date_of_birth_formatted(author: &Author) -> String {
    author.date_of_birth.map(format_medium).unwrap_or_default()
}

pub fn date_of_death_formatted(author: &Author) -> String {
    author.date_of_death.map(format_medium).unwrap_or_default()
}

/// `"birth - death"`, whichever single date is known, or empty.
pub fn lifespan(author: &Author) -> String {
    match (author.date_of_birth, author.date_of_death) {
        (Some(birth), Some(death)) => format!("{} - {}", format_medium(birth), format_medium(death)),
        (Some(birth), None) => format_medium(birth),
        (None, Some(death)) => format_medium(death),
        (None, None) => String::new(),
    }
}

fn format_medium(date: Date) -> String {
    date.format(MEDIUM_DATE).unwrap_or_default()
}

/// `YYYY-MM-DD`, the storage and date-input form
pub fn iso_date(date: Date) -> String {
    date.format(ISO_DATE).unwrap_or_default()
}

fn format_iso(date: Option<Date>) -> String {
    date.map(iso_date).unwrap_or_default()
}

/// An author together with every derived display value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorView {
    pub id: RecordId,
    pub first_name: String,
    pub family_name: String,
    pub name: String,
    pub url: String,
    /// ISO form, suitable for a date input
    pub date_of_birth: String,
    pub date_of_death: String,
    pub date_of_birth_formatted: String,
    pub date_of_death_formatted: String,
    pub lifespan: String,
}

impl From<&Author> for AuthorView {
    fn from(author: &Author) -> Self {
        Self {
            id: author.id,
            first_name: author.first_name.clone(),
            family_name: author.family_name.clone(),
            name: name(author),
            url: url(author),
            date_of_birth: format_iso(author.date_of_birth),
            date_of_death: format_iso(author.date_of_death),
            date_of_birth_formatted: date_of_birth_formatted(author),
            date_of_death_formatted: date_of_death_formatted(author),
            lifespan: lifespan(author),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuthor {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<Date>,
    pub date_of_death: Option<Date>,
}

impl NewAuthor {
    pub fn named(first_name: impl Into<String>, family_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            family_name: family_name.into(),
            date_of_birth: None,
            date_of_death: None,
        }
    }
}

/// Raw author form submission; dates arrive as `YYYY-MM-DD` or blank
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub family_name: String,
    #[serde(default)]
    pub date_of_birth: String,
    #[serde(default)]
    pub date_of_death: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn author(first: &str, family: &str, birth: Option<Date>, death: Option<Date>) -> Author {
        Author {
            id: RecordId::generate(),
            first_name: first.to_string(),
            family_name: family.to_string(),
            date_of_birth: birth,
            date_of_death: death,
        }
    }

    #[test]
    fn name_is_family_comma_first() {
        assert_eq!(name(&author("Jane", "Austen", None, None)), "Austen, Jane");
    }

    #[test]
    fn name_is_empty_when_a_part_is_missing() {
        assert_eq!(name(&author("", "Austen", None, None)), "");
        assert_eq!(name(&author("Jane", "", None, None)), "");
        assert_eq!(name(&author("", "", None, None)), "");
    }

    #[test]
    fn dates_use_medium_format() {
        let a = author("Jane", "Austen", Some(date!(1944 - 06 - 06)), None);
        assert_eq!(date_of_birth_formatted(&a), "Jun 6, 1944");
        assert_eq!(date_of_death_formatted(&a), "");
    }

    #[test]
    fn lifespan_covers_every_date_combination() {
        let birth = Some(date!(1775 - 12 - 16));
        let death = Some(date!(1817 - 07 - 18));

        assert_eq!(
            lifespan(&author("Jane", "Austen", birth, death)),
            "Dec 16, 1775 - Jul 18, 1817"
        );
        assert_eq!(lifespan(&author("Jane", "Austen", birth, None)), "Dec 16, 1775");
        assert_eq!(lifespan(&author("Jane", "Austen", None, death)), "Jul 18, 1817");
        assert_eq!(lifespan(&author("Jane", "Austen", None, None)), "");
    }

    #[test]
    fn derived_values_leave_the_record_untouched() {
        let a = author("Isaac", "Asimov", Some(date!(1920 - 01 - 02)), Some(date!(1992 - 04 - 06)));
        let before = a.clone();

        let view = AuthorView::from(&a);

        assert_eq!(a, before);
        assert_eq!(view.name, "Asimov, Isaac");
        assert_eq!(view.url, format!("/catalog/author/{}", a.id));
        assert_eq!(view.date_of_birth, "1920-01-02");
        assert_eq!(view.lifespan, "Jan 2, 1920 - Apr 6, 1992");
    }
}

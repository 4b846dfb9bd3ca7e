//! Sample data for trying the catalog out.

use std::collections::HashMap;

use catalog_db::{Collation, RecordId};
use time::{macros::date, Date};

use crate::error::CatalogResult;
use crate::modules::authors::models::NewAuthor;
use crate::modules::books::models::NewBook;
use crate::modules::genres::models::NewGenre;
use crate::modules::Catalog;

const GENRES: &[&str] = &["Fantasy", "Science Fiction", "French Poetry"];

struct SampleAuthor {
    first_name: &'static str,
    family_name: &'static str,
    born: Option<Date>,
    died: Option<Date>,
}

const AUTHORS: &[SampleAuthor] = &[
    SampleAuthor {
        first_name: "Patrick",
        family_name: "Rothfuss",
        born: Some(date!(1973 - 06 - 06)),
        died: None,
    },
    SampleAuthor {
        first_name: "Ben",
        family_name: "Bova",
        born: Some(date!(1932 - 11 - 08)),
        died: None,
    },
    SampleAuthor {
        first_name: "Isaac",
        family_name: "Asimov",
        born: Some(date!(1920 - 01 - 02)),
        died: Some(date!(1992 - 04 - 06)),
    },
    SampleAuthor {
        first_name: "Bob",
        family_name: "Billings",
        born: None,
        died: None,
    },
];

/// `(title, summary, isbn, author family name, genres)`
const BOOKS: &[(&str, &str, &str, &str, &[&str])] = &[
    (
        "The Name of the Wind",
        "The tale of Kvothe, from his childhood in a troupe of traveling players to his years at the University.",
        "9781473211896",
        "Rothfuss",
        &["Fantasy"],
    ),
    (
        "The Wise Man's Fear",
        "Kvothe's search for answers takes him across the Four Corners.",
        "9788401352836",
        "Rothfuss",
        &["Fantasy"],
    ),
    (
        "Apes and Angels",
        "Humankind's first expedition to a neighboring star system meets a wave of deadly radiation.",
        "9780765379528",
        "Bova",
        &["Science Fiction"],
    ),
    (
        "Foundation",
        "A mathematician foresees the fall of the Galactic Empire and plans for what follows.",
        "9780553293357",
        "Asimov",
        &["Science Fiction"],
    ),
    (
        "Test Book 1",
        "Summary of test book 1",
        "ISBN111111",
        "Billings",
        &["French Poetry", "Fantasy"],
    ),
];

/// What a seeding run added
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub genres: usize,
    pub authors: usize,
    pub books: usize,
}

/// Populate the catalog with sample records.
///
/// Genres are looked up case-insensitively first, so reruns never duplicate
/// them. Authors and books are only added when no author exists yet.
pub async fn seed(catalog: &Catalog) -> CatalogResult<SeedReport> {
    let mut report = SeedReport::default();

    let mut genre_ids: HashMap<&str, RecordId> = HashMap::new();
    for &name in GENRES {
        let genre = match catalog
            .genres
            .find_by_name(name, Collation::CaseInsensitive)
            .await?
        {
            Some(existing) => existing,
            None => {
                report.genres += 1;
                catalog
                    .genres
                    .insert(NewGenre {
                        name: name.to_string(),
                    })
                    .await?
            }
        };
        genre_ids.insert(name, genre.id);
    }

    if !catalog.authors.list_by_family_name().await?.is_empty() {
        tracing::info!("authors already present, skipping sample authors and books");
        return Ok(report);
    }

    let mut author_ids: HashMap<&str, RecordId> = HashMap::new();
    for sample in AUTHORS {
        let author = catalog
            .authors
            .insert(NewAuthor {
                date_of_birth: sample.born,
                date_of_death: sample.died,
                ..NewAuthor::named(sample.first_name, sample.family_name)
            })
            .await?;
        author_ids.insert(sample.family_name, author.id);
        report.authors += 1;
    }

    for &(title, summary, isbn, family_name, genres) in BOOKS {
        let Some(&author) = author_ids.get(family_name) else {
            continue;
        };
        catalog
            .books
            .insert(NewBook {
                title: title.to_string(),
                summary: summary.to_string(),
                isbn: isbn.to_string(),
                author,
                genres: genres
                    .iter()
                    .filter_map(|name| genre_ids.get(name).copied())
                    .collect(),
            })
            .await?;
        report.books += 1;
    }

    tracing::info!(
        genres = report.genres,
        authors = report.authors,
        books = report.books,
        "catalog seeded"
    );
    Ok(report)
}

//! The built-in video-lesson catalog.
//!
//! The catalog is fixed configuration: it is defined in `catalog.toml`,
//! embedded in the binary at compile time, and seeded into the database
//! with `plansmith lessons seed`. It never changes at runtime.

use serde::Deserialize;

/// A single lesson from the embedded catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogLesson {
    /// Stable identifier (e.g. `exec-summary`), unique within the catalog.
    pub slug: String,
    /// Display title.
    pub title: String,
    /// One-line description.
    pub description: String,
    /// Video URL.
    pub url: String,
    /// Running time in minutes.
    pub duration_minutes: i32,
    /// Category grouping (e.g. `writing`, `finance`).
    pub category: String,
}

/// Container for deserializing the embedded TOML file.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    lessons: Vec<CatalogLesson>,
}

/// The embedded lesson catalog TOML.
static CATALOG_TOML: &str = include_str!("catalog.toml");

/// Load the built-in lesson catalog, in display order.
///
/// # Panics
///
/// Panics if the embedded TOML is malformed. This is a compile-time
/// invariant -- if the binary was built, the TOML is valid.
pub fn builtin_catalog() -> Vec<CatalogLesson> {
    let file: CatalogFile =
        toml::from_str(CATALOG_TOML).expect("embedded catalog.toml is invalid");
    file.lessons
}

/// Return the distinct categories in the catalog, sorted.
pub fn categories() -> Vec<String> {
    let mut categories: Vec<String> = builtin_catalog()
        .into_iter()
        .map(|l| l.category)
        .collect();
    categories.sort();
    categories.dedup();
    categories
}

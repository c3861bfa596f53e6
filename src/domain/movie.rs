//! Movie catalog record.
//!
//! [`MovieRecord`] mirrors the backend's movie document. Records are immutable once
//! fetched: a new search or trending fetch replaces the whole list rather than
//! patching individual entries.

use super::lenient;
use serde::{Deserialize, Serialize};

/// A single catalog entry with descriptive and rating metadata.
///
/// Field names on the wire follow the backend (`imdbID`, `genre`, `imdbRating`,
/// ...). Every field is optional on input; see [`lenient`](super::lenient) for how
/// malformed values are handled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieRecord {
    /// Opaque catalog identifier.
    #[serde(rename = "imdbID", default, deserialize_with = "lenient::text")]
    pub id: String,

    #[serde(default, deserialize_with = "lenient::text")]
    pub title: String,

    /// Release year, absent when the backend had none or sent garbage.
    #[serde(default, deserialize_with = "lenient::integer")]
    pub year: Option<i64>,

    /// Ordered genre labels.
    #[serde(rename = "genre", default, deserialize_with = "lenient::string_list")]
    pub genres: Vec<String>,

    #[serde(default, deserialize_with = "lenient::text")]
    pub director: String,

    #[serde(default, deserialize_with = "lenient::string_list")]
    pub actors: Vec<String>,

    /// Rating on the backend's own scale.
    #[serde(default, deserialize_with = "lenient::number")]
    pub rating: Option<f64>,

    /// Runtime in minutes.
    #[serde(default, deserialize_with = "lenient::integer")]
    pub runtime: Option<i64>,

    /// Synopsis.
    #[serde(default, deserialize_with = "lenient::text")]
    pub plot: String,

    /// Poster URL.
    #[serde(default, deserialize_with = "lenient::text")]
    pub poster: String,

    #[serde(default, deserialize_with = "lenient::text")]
    pub language: String,

    #[serde(default, deserialize_with = "lenient::text")]
    pub country: String,

    #[serde(default, deserialize_with = "lenient::text")]
    pub awards: String,

    /// Critic score.
    #[serde(default, deserialize_with = "lenient::number")]
    pub metascore: Option<f64>,

    /// External rating value used for sorting and export.
    #[serde(default, deserialize_with = "lenient::number")]
    pub imdb_rating: Option<f64>,

    /// Vote count as reported upstream (e.g. `"2,345,678"`).
    #[serde(default, deserialize_with = "lenient::text")]
    pub imdb_votes: String,

    #[serde(default, deserialize_with = "lenient::text")]
    pub box_office: String,
}

impl MovieRecord {
    /// Creates a record with only an identifier and a title set.
    ///
    /// # Examples
    ///
    /// ```
    /// use movieflix::MovieRecord;
    ///
    /// let movie = MovieRecord::new("tt1375666", "Inception")
    ///     .with_year(2010)
    ///     .with_genres(["Action", "Sci-Fi"])
    ///     .with_imdb_rating(8.8);
    /// assert_eq!(movie.sort_rating(), 8.8);
    /// ```
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_year(mut self, year: i64) -> Self {
        self.year = Some(year);
        self
    }

    #[must_use]
    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genres = genres.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub const fn with_imdb_rating(mut self, rating: f64) -> Self {
        self.imdb_rating = Some(rating);
        self
    }

    /// External rating used for ordering; missing ratings count as zero.
    #[must_use]
    pub fn sort_rating(&self) -> f64 {
        self.imdb_rating.unwrap_or(0.0)
    }

    /// Release year used for ordering; missing years count as zero.
    #[must_use]
    pub fn sort_year(&self) -> i64 {
        self.year.unwrap_or(0)
    }
}

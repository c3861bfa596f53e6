//! Aggregate statistics served by the analytics dashboard endpoint.
//!
//! The client only reshapes these numbers for display; all aggregation happens on
//! the backend.

use super::lenient;
use serde::{Deserialize, Serialize};

/// Dashboard payload. Every section defaults to empty when missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    #[serde(default)]
    pub overview: Overview,
    #[serde(default, deserialize_with = "lenient::records")]
    pub genres: Vec<GenreStat>,
    #[serde(default, deserialize_with = "lenient::records")]
    pub yearly: Vec<YearStat>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    #[serde(default)]
    pub total_movies: u64,
    #[serde(default)]
    pub total_users: Option<u64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub avg_rating: Option<f64>,
}

/// Movie count and mean rating for one genre.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenreStat {
    pub genre: String,
    #[serde(default)]
    pub count: u64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub avg_rating: Option<f64>,
}

/// Mean runtime for one release year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearStat {
    #[serde(deserialize_with = "lenient::text")]
    pub year: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub avg_runtime: Option<f64>,
}

/// A genre's share of the whole catalog, rounded to a whole percent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreShare {
    pub genre: String,
    pub percentage: u64,
}

impl DashboardData {
    /// Share of the catalog held by each genre, in payload order.
    ///
    /// Returns an empty list when the overview reports no movies.
    ///
    /// ```
    /// use movieflix::domain::analytics::{DashboardData, GenreStat, Overview};
    ///
    /// let data = DashboardData {
    ///     overview: Overview { total_movies: 3, ..Overview::default() },
    ///     genres: vec![GenreStat { genre: "Drama".into(), count: 2, avg_rating: None }],
    ///     yearly: vec![],
    /// };
    /// assert_eq!(data.genre_shares()[0].percentage, 67);
    /// ```
    #[must_use]
    pub fn genre_shares(&self) -> Vec<GenreShare> {
        let total = self.overview.total_movies;
        if total == 0 {
            return Vec::new();
        }

        self.genres
            .iter()
            .map(|stat| {
                #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let percentage = ((stat.count as f64 / total as f64) * 100.0).round() as u64;
                GenreShare {
                    genre: stat.genre.clone(),
                    percentage,
                }
            })
            .collect()
    }
}

//! Catalog view-model: search text, genre filter and sort over the fetched movies.
//!
//! [`CatalogState`] holds the five inputs of the projection and only changes through
//! its setters. [`project`] derives the visible list from them and has no other
//! input. Every setter bumps a revision counter so callers can cache the projection
//! and recompute it only when something actually changed.

use super::modes::{SortDirection, SortKey};
use crate::domain::MovieRecord;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::cmp::Ordering;

/// Inputs of the catalog projection.
///
/// # Example
///
/// ```rust
/// use movieflix::app::{project, CatalogState, SortKey};
/// use movieflix::MovieRecord;
///
/// let mut catalog = CatalogState::new();
/// catalog.set_movies(vec![
///     MovieRecord::new("1", "Inception").with_year(2010),
///     MovieRecord::new("2", "Amélie").with_year(2001),
/// ]);
/// catalog.click_sort(SortKey::Year);
///
/// let titles: Vec<_> = project(&catalog).into_iter().map(|m| m.title).collect();
/// assert_eq!(titles, ["Inception", "Amélie"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogState {
    movies: Vec<MovieRecord>,
    query: String,
    genres: Vec<String>,
    sort_key: SortKey,
    sort_direction: SortDirection,
    revision: u64,
}

impl CatalogState {
    /// Empty catalog: no movies, no query, no genre filter, sort `none`/`desc`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn movies(&self) -> &[MovieRecord] {
        &self.movies
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Selected genres in selection order.
    #[must_use]
    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    #[must_use]
    pub const fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    #[must_use]
    pub const fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    /// Monotonic counter bumped by every setter.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Replaces the result set wholesale.
    pub fn set_movies(&mut self, movies: Vec<MovieRecord>) {
        self.movies = movies;
        self.bump();
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.bump();
    }

    /// Adds the genre to the selection, or removes it if an equal label (ignoring
    /// case) is already selected.
    pub fn toggle_genre(&mut self, genre: &str) {
        let genre = genre.trim();
        if genre.is_empty() {
            return;
        }

        if let Some(pos) = self.genres.iter().position(|g| eq_ignore_case(g, genre)) {
            self.genres.remove(pos);
        } else {
            self.genres.push(genre.to_string());
        }
        self.bump();
    }

    /// Replaces the selection, dropping blanks and case-insensitive duplicates.
    pub fn set_genres<I, S>(&mut self, genres: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selected: Vec<String> = Vec::new();
        for genre in genres {
            let genre = genre.as_ref().trim();
            if !genre.is_empty() && !selected.iter().any(|g| eq_ignore_case(g, genre)) {
                selected.push(genre.to_string());
            }
        }
        self.genres = selected;
        self.bump();
    }

    pub fn clear_genres(&mut self) {
        self.genres.clear();
        self.bump();
    }

    pub fn set_sort_key(&mut self, key: SortKey) {
        self.sort_key = key;
        self.bump();
    }

    pub fn set_sort_direction(&mut self, direction: SortDirection) {
        self.sort_direction = direction;
        self.bump();
    }

    /// Sort-button semantics: clicking the active key flips the direction, clicking
    /// another key makes it active in descending order.
    pub fn click_sort(&mut self, key: SortKey) {
        if key == SortKey::None {
            self.clear_sort();
            return;
        }

        if self.sort_key == key {
            self.sort_direction = self.sort_direction.toggled();
        } else {
            self.sort_key = key;
            self.sort_direction = SortDirection::Descending;
        }
        self.bump();
    }

    pub fn clear_sort(&mut self) {
        self.sort_key = SortKey::None;
        self.bump();
    }

    /// Back to the initial state. The revision keeps counting.
    pub fn reset(&mut self) {
        let revision = self.revision;
        *self = Self {
            revision,
            ..Self::default()
        };
        self.bump();
    }

    /// Distinct genres across the current movies, in first-seen order.
    #[must_use]
    pub fn available_genres(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for genre in self.movies.iter().flat_map(|m| m.genres.iter()) {
            if !seen.iter().any(|g| eq_ignore_case(g, genre)) {
                seen.push(genre.clone());
            }
        }
        seen
    }

    /// Maps loosely typed input (`"sci"`) onto the best matching available genre
    /// (`"Sci-Fi"`). Falls back to the input itself when nothing matches.
    #[must_use]
    pub fn resolve_genre(&self, input: &str) -> String {
        let input = input.trim();
        let available = self.available_genres();

        if let Some(exact) = available.iter().find(|g| eq_ignore_case(g, input)) {
            return exact.clone();
        }

        let matcher = SkimMatcherV2::default().ignore_case();
        available
            .into_iter()
            .filter_map(|genre| matcher.fuzzy_match(&genre, input).map(|score| (score, genre)))
            .max_by_key(|(score, _)| *score)
            .map_or_else(|| input.to_string(), |(_, genre)| genre)
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

/// Derives the visible list: filter by query and genres, then stable-sort.
///
/// Pure and idempotent: projecting a state whose movies are already a projection
/// with the same parameters returns them unchanged.
#[must_use]
pub fn project(state: &CatalogState) -> Vec<MovieRecord> {
    let _span = tracing::trace_span!("project_catalog",
        total = state.movies.len(),
        query_len = state.query.len(),
        genres = state.genres.len(),
        sort = %state.sort_key
    ).entered();

    let query = state.query.to_lowercase();
    let selected: Vec<String> = state.genres.iter().map(|g| g.to_lowercase()).collect();

    let mut filtered: Vec<MovieRecord> = state
        .movies
        .iter()
        .filter(|movie| matches_query(movie, &query) && matches_genres(movie, &selected))
        .cloned()
        .collect();

    if state.sort_key != SortKey::None {
        let key = state.sort_key;
        let direction = state.sort_direction;
        filtered.sort_by(|a, b| {
            let ordering = compare_by(key, a, b);
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }

    filtered
}

fn matches_query(movie: &MovieRecord, query: &str) -> bool {
    query.is_empty()
        || movie.title.to_lowercase().contains(query)
        || movie.genres.iter().any(|g| g.to_lowercase().contains(query))
}

fn matches_genres(movie: &MovieRecord, selected: &[String]) -> bool {
    selected.is_empty()
        || movie
            .genres
            .iter()
            .any(|g| selected.contains(&g.to_lowercase()))
}

fn compare_by(key: SortKey, a: &MovieRecord, b: &MovieRecord) -> Ordering {
    match key {
        SortKey::None => Ordering::Equal,
        SortKey::Rating => a.sort_rating().total_cmp(&b.sort_rating()),
        SortKey::Year => a.sort_year().cmp(&b.sort_year()),
        SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
    }
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

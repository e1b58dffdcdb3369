//! Movie catalog for flickpick
//!
//! A catalog is a read-only mapping from genre name to the movies filed under
//! that genre. It is loaded once at startup from a JSON or YAML file and never
//! mutated afterwards. Genre membership is positional: a movie belongs to the
//! genre whose bucket it sits in, not to a field on the record itself.

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// One movie record as stored in the catalog file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub title: String,
    pub year: i32,
    pub director: String,
    pub rating: f64,
    /// Keyword tags used by the fallback search; absent in the file means none
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Movie {
    /// Build a movie record in one call (mostly for sample data and tests)
    pub fn new(
        title: impl Into<String>,
        year: i32,
        director: impl Into<String>,
        rating: f64,
        tags: &[&str],
    ) -> Self {
        Self {
            title: title.into(),
            year,
            director: director.into(),
            rating,
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
        }
    }
}

impl fmt::Display for Movie {
    /// Catalog line format: `Title (Year) by Director (Rating: R)`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) by {} (Rating: {:.1})",
            self.title, self.year, self.director, self.rating
        )
    }
}

/// The full movie collection, grouped by genre.
///
/// Genres iterate in the order they appear in the source file (insertion
/// order). The recency filter's "first matching genre" depends on this, so
/// the order is part of the contract, not an accident of the map type.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    genres: IndexMap<String, Vec<Movie>>,
}

impl Catalog {
    /// Load a catalog from a file, picking the parser by extension:
    /// `.yaml`/`.yml` is parsed as YAML, anything else as JSON.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file {}", path.display()))?;

        let catalog: Catalog = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML catalog {}", path.display()))?,
            _ => serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON catalog {}", path.display()))?,
        };

        debug!(
            genres = catalog.genre_count(),
            movies = catalog.movie_count(),
            "catalog loaded"
        );

        Ok(catalog)
    }

    /// Load a catalog, degrading a missing or malformed file to an empty
    /// catalog. The recommender then answers every query with its
    /// "no movies available" message instead of failing.
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(&path) {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!("Failed to load catalog {}: {:#}", path.as_ref().display(), e);
                Self::default()
            }
        }
    }

    /// Built-in demo catalog: a handful of genres with a spread of pre- and
    /// post-2000 years and keyword tags, enough to exercise every query form.
    pub fn sample() -> Self {
        let mut catalog = Self::default();

        catalog.insert(
            "Sci-Fi",
            vec![
                Movie::new("Interstellar", 2014, "Christopher Nolan", 8.7, &["space", "time-travel"]),
                Movie::new("The Matrix", 1999, "Lana Wachowski", 8.7, &["cyberpunk", "action-packed"]),
                Movie::new("Arrival", 2016, "Denis Villeneuve", 7.9, &["aliens", "language"]),
                Movie::new("Blade Runner", 1982, "Ridley Scott", 8.1, &["cyberpunk", "noir"]),
            ],
        );
        catalog.insert(
            "Action",
            vec![
                Movie::new("Mad Max: Fury Road", 2015, "George Miller", 8.1, &["chase", "post-apocalyptic"]),
                Movie::new("Gladiator", 2000, "Ridley Scott", 8.5, &["epic", "revenge"]),
                Movie::new("Die Hard", 1988, "John McTiernan", 8.2, &["heist", "one-man-army"]),
                Movie::new("Rush Hour", 1998, "Brett Ratner", 7.0, &["funny-action", "buddy-cop"]),
            ],
        );
        catalog.insert(
            "War",
            vec![
                Movie::new("Saving Private Ryan", 1998, "Steven Spielberg", 8.6, &["wwii", "epic"]),
                Movie::new("Dunkirk", 2017, "Christopher Nolan", 7.8, &["wwii", "survival"]),
                Movie::new("1917", 2019, "Sam Mendes", 8.2, &["wwi", "single-take"]),
            ],
        );
        catalog.insert(
            "Comedy",
            vec![
                Movie::new("The Grand Budapest Hotel", 2014, "Wes Anderson", 8.1, &["funny", "quirky"]),
                Movie::new("Superbad", 2007, "Greg Mottola", 7.6, &["funny", "teen"]),
                Movie::new("Groundhog Day", 1993, "Harold Ramis", 8.0, &["funny", "time-loop"]),
            ],
        );
        catalog.insert(
            "Romantic-Comedy",
            vec![
                Movie::new("Crazy Rich Asians", 2018, "Jon M. Chu", 6.9, &["funny", "wedding"]),
                Movie::new("Notting Hill", 1999, "Roger Michell", 7.2, &["funny", "london"]),
                Movie::new("10 Things I Hate About You", 1999, "Gil Junger", 7.3, &["teen", "shakespeare"]),
            ],
        );

        catalog
    }

    /// Add a genre bucket. Re-inserting an existing genre replaces its movies
    /// but keeps its original position in the iteration order.
    pub fn insert(&mut self, genre: impl Into<String>, movies: Vec<Movie>) {
        self.genres.insert(genre.into(), movies);
    }

    /// True when the catalog has no genres at all. A present-but-empty genre
    /// bucket still counts as a non-empty catalog.
    pub fn is_empty(&self) -> bool {
        self.genres.is_empty()
    }

    pub fn genre_count(&self) -> usize {
        self.genres.len()
    }

    pub fn movie_count(&self) -> usize {
        self.genres.values().map(Vec::len).sum()
    }

    /// Genre names in catalog (insertion) order
    pub fn genres(&self) -> impl Iterator<Item = &str> {
        self.genres.keys().map(String::as_str)
    }

    /// Movies filed under the given genre, exact name match
    pub fn entries(&self, genre: &str) -> Option<&[Movie]> {
        self.genres.get(genre).map(Vec::as_slice)
    }

    /// Iterate `(genre, movies)` pairs in catalog order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Movie])> {
        self.genres
            .iter()
            .map(|(name, movies)| (name.as_str(), movies.as_slice()))
    }
}

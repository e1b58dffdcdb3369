//! Query resolution for flickpick
//!
//! Turns one free-text query into either a sorted list of movies or a
//! message explaining why there is none. Resolution order, first hit wins:
//! 1. "recent <genre>" prefix: newest-first post-2000 movies from the first
//!    genre whose name contains the remainder
//! 2. fuzzy genre match: genres whose name contains the whole query; a
//!    multi-genre hit asks the injected chooser to disambiguate
//! 3. tag keyword fallback: every movie whose tags contain the query
//!
//! All matching is trimmed, lowercased substring containment; no edit
//! distance, no scoring. Every returned list is sorted by year descending
//! with a stable sort, so equal years keep their catalog order.

use crate::catalog::{Catalog, Movie};
use std::collections::VecDeque;
use std::fmt;
use tracing::debug;

/// Movies from this year on count as "recent".
pub const RECENT_YEAR: i32 = 2000;

const RECENT_PREFIX: &str = "recent";

/// Collaborator that settles an ambiguous genre match.
///
/// Gets the matching genre names (to present 1-indexed) and returns the raw
/// reply, `None` when no reply could be read. The recommender interprets the
/// reply; implementations only move text. The CLI backs this with stdin,
/// tests use [`ScriptedChooser`].
pub trait GenreChooser {
    fn choose(&mut self, genres: &[String]) -> Option<String>;
}

/// Chooser that replays canned replies in order, recording what it was
/// shown. For tests and non-interactive callers.
#[derive(Debug, Default)]
pub struct ScriptedChooser {
    replies: VecDeque<String>,
    /// Genre lists presented so far, newest last
    pub presented: Vec<Vec<String>>,
}

impl ScriptedChooser {
    pub fn new(replies: &[&str]) -> Self {
        Self {
            replies: replies.iter().map(|r| (*r).to_string()).collect(),
            presented: Vec::new(),
        }
    }
}

impl GenreChooser for ScriptedChooser {
    fn choose(&mut self, genres: &[String]) -> Option<String> {
        self.presented.push(genres.to_vec());
        self.replies.pop_front()
    }
}

/// Why a query produced no movie list. Not a failure: `Display` is the exact
/// message shown to the user, and every resolution path ends in either a
/// list or one of these.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NoMatch {
    /// The catalog has no genres at all
    EmptyCatalog,
    /// "recent <genre>" named a genre no catalog genre name contains
    NoRecentGenre,
    /// The matched genre has no movie from `RECENT_YEAR` on
    NoRecentMovies,
    /// Neither a genre name nor any tag contains the query
    NoMatches,
}

impl fmt::Display for NoMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            NoMatch::EmptyCatalog => "No movies available for recommendation.",
            NoMatch::NoRecentGenre => "No matching genres found for recent movies.",
            NoMatch::NoRecentMovies => "No recent movies found in this genre.",
            NoMatch::NoMatches => "No matches found for genre or keyword.",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for NoMatch {}

/// Resolve one query against the catalog.
///
/// Pure except for the single chooser round-trip on an ambiguous genre
/// match; nothing persists between calls. Never panics: the result is
/// always either a sorted list or a [`NoMatch`] message.
pub fn recommend(
    catalog: &Catalog,
    raw_query: &str,
    chooser: &mut dyn GenreChooser,
) -> Result<Vec<Movie>, NoMatch> {
    if catalog.is_empty() {
        return Err(NoMatch::EmptyCatalog);
    }

    let query = raw_query.trim().to_lowercase();

    if let Some(rest) = query.strip_prefix(RECENT_PREFIX) {
        return recent_in_genre(catalog, rest.trim());
    }

    let matches = matching_genres(catalog, &query);
    match matches.len() {
        0 => tag_fallback(catalog, &query),
        1 => {
            debug!(genre = %matches[0], "single genre match");
            Ok(sorted_by_year(genre_movies(catalog, &matches[0])))
        }
        _ => {
            debug!(candidates = matches.len(), "ambiguous genre match");
            Ok(disambiguate(catalog, &matches, chooser))
        }
    }
}

/// Genre names whose lowercased form contains `needle`, in catalog order.
/// An empty needle matches every genre.
fn matching_genres(catalog: &Catalog, needle: &str) -> Vec<String> {
    catalog
        .genres()
        .filter(|name| name.to_lowercase().contains(needle))
        .map(str::to_string)
        .collect()
}

fn genre_movies(catalog: &Catalog, genre: &str) -> Vec<Movie> {
    catalog.entries(genre).unwrap_or(&[]).to_vec()
}

/// Rule 1: post-`RECENT_YEAR` movies from the first genre containing the
/// remainder of the query. "First" is catalog (file insertion) order.
fn recent_in_genre(catalog: &Catalog, genre_needle: &str) -> Result<Vec<Movie>, NoMatch> {
    let matches = matching_genres(catalog, genre_needle);
    let genre = match matches.first() {
        Some(genre) => genre,
        None => return Err(NoMatch::NoRecentGenre),
    };
    debug!(genre = %genre, "recency filter");

    let recent: Vec<Movie> = genre_movies(catalog, genre)
        .into_iter()
        .filter(|m| m.year >= RECENT_YEAR)
        .collect();

    if recent.is_empty() {
        return Err(NoMatch::NoRecentMovies);
    }
    Ok(sorted_by_year(recent))
}

/// Rule 2, multi-match arm: ask the chooser, then interpret the reply.
///
/// A number from 1 to n picks that genre. Everything else -- 0, an
/// out-of-range number, non-numeric text, or no reply at all -- merges every
/// matching genre into one list. Malformed input must never surface as an
/// error, only as the broadest reasonable result.
fn disambiguate(
    catalog: &Catalog,
    genres: &[String],
    chooser: &mut dyn GenreChooser,
) -> Vec<Movie> {
    let reply = chooser.choose(genres);
    let pick = reply
        .as_deref()
        .map(str::trim)
        .and_then(|r| r.parse::<usize>().ok());

    match pick {
        Some(i) if (1..=genres.len()).contains(&i) => {
            debug!(genre = %genres[i - 1], "chooser picked one genre");
            sorted_by_year(genre_movies(catalog, &genres[i - 1]))
        }
        _ => {
            debug!(merged = genres.len(), "merging all matching genres");
            let mut merged = Vec::new();
            for genre in genres {
                merged.extend(genre_movies(catalog, genre));
            }
            sorted_by_year(merged)
        }
    }
}

/// Rule 3: every movie, any genre, with a tag containing the query.
fn tag_fallback(catalog: &Catalog, needle: &str) -> Result<Vec<Movie>, NoMatch> {
    let mut found = Vec::new();
    for (_, movies) in catalog.iter() {
        for movie in movies {
            if movie.tags.iter().any(|t| t.to_lowercase().contains(needle)) {
                found.push(movie.clone());
            }
        }
    }

    if found.is_empty() {
        return Err(NoMatch::NoMatches);
    }
    debug!(matched = found.len(), "tag keyword fallback");
    Ok(sorted_by_year(found))
}

/// Newest first. `sort_by` is stable, so equal years keep their input order.
fn sorted_by_year(mut movies: Vec<Movie>) -> Vec<Movie> {
    movies.sort_by(|a, b| b.year.cmp(&a.year));
    movies
}

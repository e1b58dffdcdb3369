//! flickpick - movie recommendations from a static, genre-bucketed catalog
//!
//! Modules:
//! - catalog: the movie data model, JSON/YAML loading, built-in sample data
//! - recommend: query resolution (recency prefix, fuzzy genre match with
//!   interactive disambiguation, tag keyword fallback)
//!
//! The resolver takes the catalog by reference and a chooser collaborator
//! for the one interactive step, so the whole pipeline runs without a
//! console in tests and embeddings.

pub mod catalog;
pub mod recommend;

// Re-export key types for convenience
pub use catalog::{Catalog, Movie};

pub use recommend::{recommend, GenreChooser, NoMatch, ScriptedChooser, RECENT_YEAR};

//! The movie record and the fixed CSV column layout that feeds it.

use serde::Serialize;

/// Column holding the source row id. Read but never stored.
pub const ID_COLUMN: usize = 0;
pub const TITLE_COLUMN: usize = 1;
pub const TYPE_COLUMN: usize = 2;
pub const GENRES_COLUMN: usize = 3;
pub const RATING_COLUMN: usize = 4;
pub const VOTES_COLUMN: usize = 5;
pub const YEAR_COLUMN: usize = 6;

/// One row of the `movies` table.
///
/// `num_votes` and `release_year` are 8-bit; see [`crate::coerce`] for how
/// wider source values are truncated into them.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MovieRecord {
    pub title: String,
    pub movie_type: String,
    /// Delimited genre list, kept as one string
    pub genres: String,
    pub average_rate: f64,
    pub num_votes: i8,
    pub release_year: i8,
}

impl std::fmt::Display for MovieRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}, {}, {}",
            self.title,
            self.movie_type,
            self.genres,
            self.average_rate,
            self.num_votes,
            self.release_year
        )
    }
}

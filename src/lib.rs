//! Movie Loader
//!
//! A Rust library and CLI tool for loading movie records from a CSV file
//! into a PostgreSQL `movies` table.
//!
//! The CSV has a header row followed by data rows. Column 0 is ignored and
//! columns 1 through 6 become title, type, genres, rating, votes and year.
//! Unparseable numbers are logged and stored as zero; I/O, CSV and database
//! errors abort the load.
//!
//! # Example
//!
//! ```rust
//! use movie_loader::{map_rows, read_csv_from};
//! use std::io::Cursor;
//!
//! let input = "id,title,type,genres,rating,votes,year\n1,Movie A,movie,Drama,7.5,100,99\n";
//! let rows = read_csv_from(Cursor::new(input)).unwrap();
//! let mapped = map_rows(&rows);
//!
//! assert_eq!(mapped.records.len(), 1);
//! assert_eq!(mapped.records[0].title, "Movie A");
//! ```

pub mod coerce;
pub mod config;
pub mod db;
pub mod error;
pub mod input;
pub mod movie;

// Re-export commonly used types
pub use coerce::{map_row, map_rows, MappedRows};
pub use config::{load_env_file, DbConfig};
pub use db::{MovieSink, PgMovieStore};
pub use error::{CoercionWarning, Error, Result};
pub use input::{read_csv_from, read_csv_rows};
pub use movie::MovieRecord;

use tracing::{debug, info};

/// What a completed load did.
#[derive(Debug, Clone, Default)]
pub struct LoadSummary {
    /// Data rows read, header excluded
    pub records_read: usize,
    pub records_inserted: usize,
    pub warnings: Vec<CoercionWarning>,
}

/// Insert records in order, stopping at the first failure.
///
/// Records after a failing one are never attempted.
pub async fn insert_all<S: MovieSink + ?Sized>(
    sink: &mut S,
    records: &[MovieRecord],
) -> Result<usize> {
    for (index, record) in records.iter().enumerate() {
        sink.insert(index, record).await?;
        debug!(index, title = %record.title, "Inserted record");
    }
    Ok(records.len())
}

/// Map already-read CSV rows and insert them into `sink`.
///
/// The sink's table is expected to exist already.
pub async fn load_movies<S: MovieSink + ?Sized>(
    rows: &[csv::StringRecord],
    sink: &mut S,
) -> Result<LoadSummary> {
    let MappedRows { records, warnings } = map_rows(rows);
    info!(
        records = records.len(),
        warnings = warnings.len(),
        "Mapped CSV rows"
    );

    let records_inserted = insert_all(sink, &records).await?;

    Ok(LoadSummary {
        records_read: records.len(),
        records_inserted,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::io::Cursor;

    /// Records every insert and fails on the configured index.
    #[derive(Default)]
    struct RecordingSink {
        inserted: Vec<MovieRecord>,
        attempts: usize,
        fail_at: Option<usize>,
    }

    #[async_trait]
    impl MovieSink for RecordingSink {
        async fn create_table(&mut self) -> Result<()> {
            Ok(())
        }

        async fn insert(&mut self, index: usize, record: &MovieRecord) -> Result<()> {
            self.attempts += 1;
            if self.fail_at == Some(index) {
                return Err(Error::Insert {
                    index,
                    record: Box::new(record.clone()),
                    source: sqlx::Error::RowNotFound,
                });
            }
            self.inserted.push(record.clone());
            Ok(())
        }
    }

    fn records(n: usize) -> Vec<MovieRecord> {
        (0..n)
            .map(|i| MovieRecord {
                title: format!("Movie {}", i),
                ..Default::default()
            })
            .collect()
    }

    #[tokio::test]
    async fn test_insert_all_inserts_in_order() {
        let mut sink = RecordingSink::default();
        let count = insert_all(&mut sink, &records(3)).await.unwrap();

        assert_eq!(count, 3);
        let titles: Vec<_> = sink.inserted.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["Movie 0", "Movie 1", "Movie 2"]);
    }

    #[tokio::test]
    async fn test_insert_all_stops_at_first_failure() {
        let mut sink = RecordingSink {
            fail_at: Some(1),
            ..Default::default()
        };
        let result = insert_all(&mut sink, &records(4)).await;

        match result {
            Err(Error::Insert { index, record, .. }) => {
                assert_eq!(index, 1);
                assert_eq!(record.title, "Movie 1");
            }
            other => panic!("expected Insert error, got {:?}", other),
        }
        assert_eq!(sink.attempts, 2);
        assert_eq!(sink.inserted.len(), 1);
    }

    #[tokio::test]
    async fn test_insert_all_empty() {
        let mut sink = RecordingSink::default();
        assert_eq!(insert_all(&mut sink, &[]).await.unwrap(), 0);
        assert_eq!(sink.attempts, 0);
    }

    #[tokio::test]
    async fn test_load_movies_end_to_end() {
        let input = "id,title,type,genres,rating,votes,year\n1,Movie A,movie,Drama,7.5,1000,2001\n";
        let rows = read_csv_from(Cursor::new(input)).unwrap();
        let mut sink = RecordingSink::default();

        let summary = load_movies(&rows, &mut sink).await.unwrap();

        assert_eq!(summary.records_read, 1);
        assert_eq!(summary.records_inserted, 1);
        assert!(summary.warnings.is_empty());
        assert_eq!(
            sink.inserted[0],
            MovieRecord {
                title: "Movie A".to_string(),
                movie_type: "movie".to_string(),
                genres: "Drama".to_string(),
                average_rate: 7.5,
                num_votes: -24,
                release_year: -47,
            }
        );
    }

    #[tokio::test]
    async fn test_load_movies_reports_warnings() {
        let input = "id,title,type,genres,rating,votes,year\n1,X,movie,Drama,bad,1,1\n";
        let rows = read_csv_from(Cursor::new(input)).unwrap();
        let mut sink = RecordingSink::default();

        let summary = load_movies(&rows, &mut sink).await.unwrap();

        assert_eq!(summary.records_inserted, 1);
        assert_eq!(summary.warnings.len(), 1);
        assert_eq!(summary.warnings[0].field, "average_rate");
    }
}

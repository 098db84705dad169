//! PostgreSQL access: connection, table provisioning, inserts.

use async_trait::async_trait;
use sqlx::postgres::PgConnection;
use sqlx::Connection;
use tracing::{debug, info};

use crate::config::DbConfig;
use crate::error::{Error, Result};
use crate::movie::MovieRecord;

/// Idempotent DDL for the target table.
pub const CREATE_TABLE_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS movies (
    id SERIAL PRIMARY KEY,
    title VARCHAR(255),
    type VARCHAR(100),
    genres VARCHAR(100),
    average_rating NUMERIC(10,2),
    num_votes INTEGER,
    release_year INTEGER
);"#;

pub const INSERT_MOVIE_SQL: &str = "INSERT INTO movies (title, type, genres, average_rating, num_votes, release_year) VALUES ($1, $2, $3, $4, $5, $6)";

/// Destination for movie records.
///
/// `insert` is called once per record, in order. An error from either
/// method is fatal to the load.
#[async_trait]
pub trait MovieSink: Send {
    /// Ensure the target table exists.
    async fn create_table(&mut self) -> Result<()>;

    /// Insert one record. `index` is the record's position in the load.
    async fn insert(&mut self, index: usize, record: &MovieRecord) -> Result<()>;
}

/// A single PostgreSQL connection used for every statement.
pub struct PgMovieStore {
    conn: PgConnection,
}

impl PgMovieStore {
    /// Open a connection and verify it with a ping.
    pub async fn connect(config: &DbConfig) -> Result<Self> {
        debug!(?config, "Connecting to PostgreSQL");
        let mut conn = PgConnection::connect_with(&config.connect_options())
            .await
            .map_err(Error::Connect)?;
        conn.ping().await.map_err(Error::Connect)?;
        info!(database = %config.db, "Connected to PostgreSQL");
        Ok(Self { conn })
    }

    /// Close the connection cleanly.
    pub async fn close(self) -> Result<()> {
        self.conn.close().await.map_err(Error::Close)
    }
}

#[async_trait]
impl MovieSink for PgMovieStore {
    async fn create_table(&mut self) -> Result<()> {
        sqlx::query(CREATE_TABLE_SQL)
            .execute(&mut self.conn)
            .await
            .map_err(Error::CreateTable)?;
        info!("Table movies is ready");
        Ok(())
    }

    async fn insert(&mut self, index: usize, record: &MovieRecord) -> Result<()> {
        sqlx::query(INSERT_MOVIE_SQL)
            .bind(&record.title)
            .bind(&record.movie_type)
            .bind(&record.genres)
            .bind(record.average_rate)
            .bind(i32::from(record.num_votes))
            .bind(i32::from(record.release_year))
            .execute(&mut self.conn)
            .await
            .map_err(|source| Error::Insert {
                index,
                record: Box::new(record.clone()),
                source,
            })?;
        Ok(())
    }
}

// Shared CLI definition, included by both `src/cli/mod.rs` and `build.rs`.
// Expects `VERSION` and `clap::Parser` plus `std::path::PathBuf` in scope.

/// Load movie records from a CSV file into PostgreSQL
#[derive(Parser, Debug)]
#[command(
    name = "movie-loader",
    about = "Load movie records from a CSV file into a PostgreSQL table",
    long_about = "Load movie records from a CSV file into a PostgreSQL table.\n\n\
        Credentials are read from DB_N4ME, HOST, SCH3MA_N4ME, US3ER and PASWRO, \
        optionally loaded from a .env file.",
    version = VERSION,
    author
)]
pub struct Cli {
    /// CSV file with a header row and columns id,title,type,genres,rating,votes,year
    #[arg(value_name = "CSV_FILE")]
    pub csv_file: PathBuf,

    /// Load environment variables from this file instead of ./.env
    #[arg(long, value_name = "PATH")]
    pub env_file: Option<PathBuf>,

    /// Database port
    #[arg(long, default_value = "5432")]
    pub port: u16,

    /// Parse and coerce only; print records as JSON lines without touching the database
    #[arg(long)]
    pub dry_run: bool,

    /// Enable debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors and suppress confirmation messages
    #[arg(short, long)]
    pub quiet: bool,
}

//! CLI module for the movie loader.
//!
//! Parses arguments, sets up logging, runs the load and decides the exit
//! status. Library code only returns errors; exiting happens here.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use movie_loader::{
    load_env_file, load_movies, map_rows, read_csv_rows, DbConfig, Error, MovieSink,
    PgMovieStore,
};

/// Version string with git hash
const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")");

include!("definition.rs");

/// Run the CLI application
pub async fn run() {
    let cli = Cli::parse();
    init_logging(&cli);

    let result = if cli.dry_run {
        dry_run(&cli)
    } else {
        load(&cli).await
    };

    if let Err(e) = result {
        report_error(&e);
        std::process::exit(1);
    }
}

fn init_logging(cli: &Cli) {
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Connect, provision, read, insert. Stops at the first fatal error.
async fn load(cli: &Cli) -> Result<(), Error> {
    load_env_file(cli.env_file.as_deref())?;
    let config = DbConfig::from_env().with_port(cli.port);

    let mut store = PgMovieStore::connect(&config).await?;
    confirm(cli, "Connected to PostgreSQL successfully!");

    store.create_table().await?;
    confirm(cli, "Table created successfully.");

    let rows = read_csv_rows(&cli.csv_file)?;
    info!(path = %cli.csv_file.display(), rows = rows.len(), "Read CSV file");

    let summary = load_movies(&rows, &mut store).await?;
    store.close().await?;

    if !summary.warnings.is_empty() {
        warn!(
            "{} field(s) could not be parsed and were stored as 0",
            summary.warnings.len()
        );
    }
    info!(inserted = summary.records_inserted, "Load complete");
    confirm(cli, "Successfully inserted all values");
    Ok(())
}

/// Print each mapped record as a JSON line on stdout.
fn dry_run(cli: &Cli) -> Result<(), Error> {
    let rows = read_csv_rows(&cli.csv_file)?;
    let mapped = map_rows(&rows);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for record in &mapped.records {
        let line = serde_json::to_string(record).map_err(|e| Error::Io(io::Error::other(e)))?;
        writeln!(out, "{}", line)?;
    }

    info!(
        records = mapped.records.len(),
        warnings = mapped.warnings.len(),
        "Dry run complete"
    );
    Ok(())
}

fn confirm(cli: &Cli, msg: &str) {
    if !cli.quiet {
        println!("{}", msg.green());
    }
}

fn report_error(e: &Error) {
    for line in error_report(e) {
        error!("{}", line);
    }
}

/// Lines logged for a fatal error.
fn error_report(e: &Error) -> Vec<String> {
    match e {
        Error::Insert { record, source, .. } => vec![
            format!("Values to insert: {}", record),
            format!("Failed to insert values: {}", source),
        ],
        other => vec![other.to_string()],
    }
}

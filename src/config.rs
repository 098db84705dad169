//! Database settings read from the process environment.

use std::path::Path;

use sqlx::postgres::{PgConnectOptions, PgSslMode};
use tracing::debug;

use crate::error::{Error, Result};

/// Environment variable holding the database name.
pub const DB_NAME_VAR: &str = "DB_N4ME";
/// Environment variable holding the server host.
pub const HOST_VAR: &str = "HOST";
/// Environment variable holding the schema placed on the search path.
pub const SCHEMA_VAR: &str = "SCH3MA_N4ME";
/// Environment variable holding the user name.
pub const USER_VAR: &str = "US3ER";
/// Environment variable holding the password.
pub const PASSWORD_VAR: &str = "PASWRO";

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 5432;

/// Connection settings. Unset variables read as empty strings.
#[derive(Clone, Default, PartialEq)]
pub struct DbConfig {
    pub db: String,
    pub host: String,
    pub schema: String,
    pub user: String,
    pub pass: String,
    pub port: u16,
}

// Keeps the password out of logs.
impl std::fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbConfig")
            .field("db", &self.db)
            .field("host", &self.host)
            .field("schema", &self.schema)
            .field("user", &self.user)
            .field("pass", &"***")
            .field("port", &self.port)
            .finish()
    }
}

impl DbConfig {
    /// Read the five variables from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Missing keys become empty strings.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).unwrap_or_default();
        Self {
            db: get(DB_NAME_VAR),
            host: get(HOST_VAR),
            schema: get(SCHEMA_VAR),
            user: get(USER_VAR),
            pass: get(PASSWORD_VAR),
            port: DEFAULT_PORT,
        }
    }

    /// Override the port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Connection options: password auth, TLS disabled.
    ///
    /// An empty host falls back to [`DEFAULT_HOST`]; a non-empty schema is
    /// set as the session `search_path`.
    pub fn connect_options(&self) -> PgConnectOptions {
        let host = if self.host.is_empty() {
            DEFAULT_HOST
        } else {
            self.host.as_str()
        };

        let mut options = PgConnectOptions::new()
            .host(host)
            .port(self.port)
            .username(&self.user)
            .password(&self.pass)
            .database(&self.db)
            .ssl_mode(PgSslMode::Disable);

        if !self.schema.is_empty() {
            options = options.options([("search_path", search_path_value(&self.schema))]);
        }

        options
    }
}

/// Render a schema name as a `search_path` startup option value.
///
/// Names that are not plain lowercase identifiers are double-quoted, and
/// whitespace and backslashes are backslash-escaped so the server does not
/// split the startup options string.
pub fn search_path_value(schema: &str) -> String {
    let plain = schema
        .chars()
        .next()
        .map_or(false, |c| c.is_ascii_lowercase() || c == '_')
        && schema
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');

    let quoted = if plain {
        schema.to_string()
    } else {
        format!("\"{}\"", schema.replace('"', "\"\""))
    };

    let mut escaped = String::with_capacity(quoted.len());
    for c in quoted.chars() {
        if c.is_ascii_whitespace() || c == '\\' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Load a dotenv file into the process environment.
///
/// Variables already set keep their values. With no explicit path a
/// missing `./.env` is not an error.
pub fn load_env_file(path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            dotenvy::from_path(path).map_err(Error::EnvFile)?;
            debug!(path = %path.display(), "Loaded environment file");
        }
        None => match dotenvy::dotenv() {
            Ok(path) => debug!(path = %path.display(), "Loaded environment file"),
            Err(e) if e.not_found() => debug!("No .env file found"),
            Err(e) => return Err(Error::EnvFile(e)),
        },
    }
    Ok(())
}

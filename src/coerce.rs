//! Row mapping and numeric coercion.
//!
//! Maps the fixed CSV column layout in [`crate::movie`] onto
//! [`MovieRecord`]s. Numeric parse failures never stop the mapping: they are
//! recorded as [`CoercionWarning`]s and the field falls back to zero.
//!
//! # Integer truncation
//!
//! Vote counts and years are parsed as signed 64-bit decimals, clamped to
//! the `i64` range on overflow, then truncated to their low byte and read
//! back as two's complement. `1000` becomes `-24`, `2001` becomes `-47`,
//! `256` becomes `0`.

use std::num::IntErrorKind;

use tracing::warn;

use crate::error::CoercionWarning;
use crate::movie::{
    MovieRecord, GENRES_COLUMN, ID_COLUMN, RATING_COLUMN, TITLE_COLUMN, TYPE_COLUMN,
    VOTES_COLUMN, YEAR_COLUMN,
};

/// Outcome of mapping a whole CSV.
#[derive(Debug, Clone, Default)]
pub struct MappedRows {
    pub records: Vec<MovieRecord>,
    pub warnings: Vec<CoercionWarning>,
}

/// Map every row after the header into a record.
///
/// Row 0 is always treated as the header. Each warning is logged as it is
/// found and also returned.
pub fn map_rows(rows: &[csv::StringRecord]) -> MappedRows {
    let mut mapped = MappedRows::default();

    for (i, row) in rows.iter().enumerate().skip(1) {
        // The header is line 1.
        let line_number = i + 1;
        let record = map_row(row, line_number, &mut mapped.warnings);
        mapped.records.push(record);
    }

    mapped
}

/// Map a single data row. Missing columns keep their defaults.
pub fn map_row(
    row: &csv::StringRecord,
    line_number: usize,
    warnings: &mut Vec<CoercionWarning>,
) -> MovieRecord {
    let mut rec = MovieRecord::default();

    for (column, field) in row.iter().enumerate() {
        match column {
            ID_COLUMN => {}
            TITLE_COLUMN => rec.title = field.to_string(),
            TYPE_COLUMN => rec.movie_type = field.to_string(),
            GENRES_COLUMN => rec.genres = field.to_string(),
            RATING_COLUMN => {
                rec.average_rate = coerce_float(field).unwrap_or_else(|msg| {
                    record_warning(warnings, line_number, column, "average_rate", field, msg);
                    0.0
                });
            }
            VOTES_COLUMN => {
                rec.num_votes = coerce_small_int(field).unwrap_or_else(|(fallback, msg)| {
                    record_warning(warnings, line_number, column, "num_votes", field, msg);
                    fallback
                });
            }
            YEAR_COLUMN => {
                rec.release_year = coerce_small_int(field).unwrap_or_else(|(fallback, msg)| {
                    record_warning(warnings, line_number, column, "release_year", field, msg);
                    fallback
                });
            }
            _ => {}
        }
    }

    rec
}

/// Parse a rating. Empty text is `0.0`.
///
/// Literal `inf`/`infinity`/`nan` are accepted; a numeric literal too large
/// for `f64` is an error ("value out of range").
pub fn coerce_float(field: &str) -> Result<f64, String> {
    if field.is_empty() {
        return Ok(0.0);
    }
    let value = field.parse::<f64>().map_err(|e| e.to_string())?;
    if value.is_infinite() && !is_infinity_literal(field) {
        return Err("value out of range".to_string());
    }
    Ok(value)
}

fn is_infinity_literal(field: &str) -> bool {
    let unsigned = field.trim_start_matches(|c| c == '+' || c == '-');
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

/// Parse an integer and truncate it to 8 bits. Empty text is `0`.
///
/// On failure the error carries the value to use anyway: `0` for syntax
/// errors, the truncated clamp bound for overflow.
pub fn coerce_small_int(field: &str) -> Result<i8, (i8, String)> {
    if field.is_empty() {
        return Ok(0);
    }
    match field.parse::<i64>() {
        Ok(value) => Ok(truncate_to_i8(value)),
        Err(e) => {
            let clamped = match e.kind() {
                IntErrorKind::PosOverflow => i64::MAX,
                IntErrorKind::NegOverflow => i64::MIN,
                _ => 0,
            };
            Err((truncate_to_i8(clamped), e.to_string()))
        }
    }
}

/// Keep the low byte, read as two's complement.
pub fn truncate_to_i8(value: i64) -> i8 {
    value as i8
}

fn record_warning(
    warnings: &mut Vec<CoercionWarning>,
    line_number: usize,
    column: usize,
    field: &'static str,
    value: &str,
    msg: String,
) {
    let warning = CoercionWarning {
        line_number,
        column,
        field,
        value: value.to_string(),
        msg,
    };
    warn!(value = %warning.value, "{}", warning);
    warnings.push(warning);
}

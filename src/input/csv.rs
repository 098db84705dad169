//! CSV input reader.
//!
//! Rows are read eagerly and the header is kept as row 0; skipping it is
//! the mapper's job.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};

/// Open `path` and read every row into memory.
pub fn read_csv_rows<P: AsRef<Path>>(path: P) -> Result<Vec<csv::StringRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_csv_from(file)
}

/// Read every row from `reader`, header included.
///
/// Every row must have as many fields as the first one.
pub fn read_csv_from<R: Read>(reader: R) -> Result<Vec<csv::StringRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(false)
        .from_reader(reader);

    csv_reader
        .records()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(csv_error)
}

fn csv_error(e: csv::Error) -> Error {
    if e.is_io_error() {
        match e.into_kind() {
            csv::ErrorKind::Io(io) => Error::Io(io),
            other => Error::CsvParse(format!("{:?}", other)),
        }
    } else {
        Error::CsvParse(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    use tempfile::NamedTempFile;

    #[test]
    fn test_read_keeps_header_as_first_row() {
        let input = "id,title\n1,Movie A\n2,Movie B";
        let rows = read_csv_from(Cursor::new(input)).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[0][1], "title");
        assert_eq!(&rows[2][1], "Movie B");
    }

    #[test]
    fn test_read_empty_input() {
        let rows = read_csv_from(Cursor::new("")).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_read_preserves_empty_fields() {
        let input = "a,b,c\n1,,\n";
        let rows = read_csv_from(Cursor::new(input)).unwrap();

        assert_eq!(rows[1].len(), 3);
        assert_eq!(&rows[1][1], "");
        assert_eq!(&rows[1][2], "");
    }

    #[test]
    fn test_read_quoted_fields() {
        let input = r#"id,title
1,"Crouching Tiger, Hidden Dragon"
2,"The ""Best"" Movie""#;
        let rows = read_csv_from(Cursor::new(input)).unwrap();

        assert_eq!(&rows[1][1], "Crouching Tiger, Hidden Dragon");
        assert_eq!(&rows[2][1], "The \"Best\" Movie");
    }

    #[test]
    fn test_read_does_not_trim_whitespace() {
        let input = "a,b\n  left,right  ";
        let rows = read_csv_from(Cursor::new(input)).unwrap();

        assert_eq!(&rows[1][0], "  left");
        assert_eq!(&rows[1][1], "right  ");
    }

    #[test]
    fn test_read_unequal_row_width_is_error() {
        let input = "a,b,c\n1,2\n";
        let result = read_csv_from(Cursor::new(input));

        assert!(matches!(result, Err(Error::CsvParse(_))));
    }

    #[test]
    fn test_read_rows_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "id,title\n1,Movie A\n").unwrap();

        let rows = read_csv_rows(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_read_rows_missing_file() {
        let result = read_csv_rows("/nonexistent/movies.csv");

        match result {
            Err(Error::Open { path, .. }) => {
                assert_eq!(path, Path::new("/nonexistent/movies.csv"));
            }
            other => panic!("expected Open error, got {:?}", other),
        }
    }
}

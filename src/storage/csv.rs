//! Delimited-file reader backing the LOAD statement
//!
//! The first line is a comma-separated header; every following line is
//! mapped positionally onto those headers. Cells are stored as raw text
//! with no type coercion. Rows shorter than the header are padded with
//! Null, longer rows are truncated to the header width, and blank lines
//! are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};

use crate::error::{Error, Result};
use crate::sql::types::{Row, Value};

/// Reads a whole file into rows keyed by the header line
pub fn read_file(path: &str) -> Result<Vec<Row>> {
    let file = File::open(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => Error::FileNotFound(path.to_string()),
        _ => Error::Internal(err.to_string()),
    })?;
    let reader = BufReader::new(file);
    let mut lines = reader.lines();

    let headers = match lines.next() {
        Some(line) => split(&line?),
        None => return Ok(Vec::new()),
    };

    let mut rows = Vec::new();
    for line in lines {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        let fields = split(&line);
        let mut row = Row::new();
        for (i, header) in headers.iter().enumerate() {
            let value = match fields.get(i) {
                Some(field) => Value::Text(field.clone()),
                None => Value::Null,
            };
            row.set(header.clone(), value);
        }
        rows.push(row);
    }
    Ok(rows)
}

fn split(line: &str) -> Vec<String> {
    line.split(',').map(str::to_string).collect()
}

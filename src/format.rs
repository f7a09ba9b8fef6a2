//! Aligned-text formatting of execution results
//!
//! Turns a header list and row list into columns padded to the widest
//! cell, separated by ` | `, with a dashed rule under the header. Null
//! renders through `Value::Display` as `NULL`.

use crate::sql::engine::ResultSet;
use crate::sql::types::Value;

/// Renders a result set as the interactive loop prints it
pub fn format_result(result: &ResultSet) -> String {
    match result {
        ResultSet::Load { table, count } => format!("Loaded '{}' ({} rows)", table, count),
        ResultSet::Insert { count } => format!("OK: inserted {} row(s)", count),
        ResultSet::Query { columns, rows } => format_table(columns, rows),
    }
}

/// Renders headers and rows as an aligned table
pub fn format_table(headers: &[String], rows: &[Vec<Value>]) -> String {
    if rows.is_empty() {
        return "No results".to_string();
    }

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|v| v.to_string()).collect())
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in &cells {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() && cell.len() > widths[i] {
                widths[i] = cell.len();
            }
        }
    }

    let mut out = String::new();
    out.push_str(&pad_line(headers.iter().map(String::as_str), &widths));
    out.push('\n');
    let rule = widths.iter().sum::<usize>() + 3 * headers.len().saturating_sub(1);
    out.push_str(&"-".repeat(rule));
    for row in &cells {
        out.push('\n');
        out.push_str(&pad_line(row.iter().map(String::as_str), &widths));
    }
    out
}

fn pad_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .enumerate()
        .map(|(i, cell)| {
            let width = widths.get(i).copied().unwrap_or(cell.len());
            format!("{:<width$}", cell)
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

use std::collections::HashMap;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sql::parser::Parser;
use crate::sql::parser::ast::{Operator, Predicate, Projection, Statement};
use crate::sql::types::{Row, Value};
use crate::storage::csv;

/// Execution result set
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub enum ResultSet {
    /// Table registered by LOAD, with the loaded row count
    Load { table: String, count: usize },
    /// Rows appended by INSERT
    Insert { count: usize },
    /// Headers and rows produced by SELECT
    Query {
        columns: Vec<String>,
        rows: Vec<Vec<Value>>,
    },
}

/// In-memory table engine
///
/// Owns the table store and executes one statement at a time. Each
/// statement runs to completion before the next is accepted; a failed
/// statement leaves the store unchanged.
pub struct Engine {
    tables: HashMap<String, Vec<Row>>,
}

impl Engine {
    pub fn new() -> Self {
        Self {
            tables: HashMap::new(),
        }
    }

    /// Starts a session that parses and executes raw statement text
    pub fn session(&mut self) -> Session<'_> {
        Session { engine: self }
    }

    /// Executes a parsed statement against the table store
    pub fn execute(&mut self, stmt: Statement) -> Result<ResultSet> {
        match stmt {
            Statement::Load { path, name } => self.load(&path, name),
            Statement::Insert {
                table,
                columns,
                values,
            } => self.insert(&table, columns, values),
            Statement::Select {
                table,
                projection,
                predicate,
            } => self.select(&table, &projection, predicate.as_ref()),
        }
    }

    /// Reads a CSV file and registers (or overwrites) the table under `name`
    fn load(&mut self, path: &str, name: String) -> Result<ResultSet> {
        let rows = csv::read_file(path)?;
        let count = rows.len();
        info!("loaded {} rows from {} into table {}", count, path, name);
        self.tables.insert(name.clone(), rows);
        Ok(ResultSet::Load { table: name, count })
    }

    /// Appends one row, restoring the schema-evolution invariant.
    ///
    /// Any column present in the table's first row but absent from the new
    /// row is added as Null; any column the new row introduces is
    /// back-filled as Null into every existing row. This keeps SELECT *
    /// well-defined and column lookups uniform.
    fn insert(&mut self, table: &str, columns: Vec<String>, values: Vec<Value>) -> Result<ResultSet> {
        let rows = self
            .tables
            .get_mut(table)
            .ok_or_else(|| Error::TableNotLoaded(table.to_string()))?;
        // The parser already guarantees this; re-validate at the boundary
        if columns.len() != values.len() {
            return Err(Error::ColumnValueCountMismatch {
                columns: columns.len(),
                values: values.len(),
            });
        }

        let mut row = Row::new();
        for (column, value) in columns.into_iter().zip(values) {
            row.set(column, value);
        }

        if let Some(first) = rows.first() {
            let existing: Vec<String> = first.columns().map(str::to_string).collect();
            let introduced: Vec<String> = row
                .columns()
                .filter(|c| !existing.iter().any(|e| e == c))
                .map(str::to_string)
                .collect();
            for column in &existing {
                if !row.contains(column) {
                    row.set(column.clone(), Value::Null);
                }
            }
            for existing_row in rows.iter_mut() {
                for column in &introduced {
                    if !existing_row.contains(column) {
                        existing_row.set(column.clone(), Value::Null);
                    }
                }
            }
        }

        debug!("inserted row into table {}", table);
        rows.push(row);
        Ok(ResultSet::Insert { count: 1 })
    }

    /// Filters, aggregates, and projects rows from one table
    fn select(
        &self,
        table: &str,
        projection: &Projection,
        predicate: Option<&Predicate>,
    ) -> Result<ResultSet> {
        let all = self
            .tables
            .get(table)
            .ok_or_else(|| Error::TableNotLoaded(table.to_string()))?;

        // Filter. An empty table short-circuits to zero rows without a
        // column-existence check, mirroring the insert-before-rows case.
        let filtered: Vec<&Row> = match predicate {
            Some(_) if all.is_empty() => Vec::new(),
            Some(pred) => {
                if !all[0].contains(&pred.column) {
                    return Err(Error::UnknownColumn(pred.column.clone()));
                }
                all.iter()
                    .filter(|row| {
                        predicate_matches(row.get(&pred.column).unwrap_or(&Value::Null), pred)
                    })
                    .collect()
            }
            None => all.iter().collect(),
        };

        match projection {
            Projection::CountAll => Ok(ResultSet::Query {
                columns: vec!["count".to_string()],
                rows: vec![vec![Value::Integer(filtered.len() as i64)]],
            }),
            Projection::CountColumn(column) => {
                if !all.is_empty() && !all[0].contains(column) {
                    return Err(Error::UnknownColumn(column.clone()));
                }
                let count = filtered
                    .iter()
                    .filter(|row| match row.get(column) {
                        None | Some(Value::Null) => false,
                        Some(Value::Text(s)) => !s.is_empty() && s != "NULL",
                        Some(_) => true,
                    })
                    .count();
                Ok(ResultSet::Query {
                    columns: vec!["count".to_string()],
                    rows: vec![vec![Value::Integer(count as i64)]],
                })
            }
            Projection::All => {
                let Some(first) = filtered.first() else {
                    return Ok(ResultSet::Query {
                        columns: Vec::new(),
                        rows: Vec::new(),
                    });
                };
                let columns: Vec<String> = first.columns().map(str::to_string).collect();
                let rows = project(&filtered, &columns);
                Ok(ResultSet::Query { columns, rows })
            }
            Projection::Columns(columns) => {
                // When no rows exist the existence check is skipped, so
                // insert-only columns can still be selected by name
                if let Some(first) = filtered.first() {
                    for column in columns {
                        if !first.contains(column) {
                            return Err(Error::UnknownColumn(column.clone()));
                        }
                    }
                }
                let rows = project(&filtered, columns);
                Ok(ResultSet::Query {
                    columns: columns.clone(),
                    rows,
                })
            }
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps each row through the headers via a Null-defaulting lookup
fn project(rows: &[&Row], columns: &[String]) -> Vec<Vec<Value>> {
    rows.iter()
        .map(|row| {
            columns
                .iter()
                .map(|column| row.get(column).cloned().unwrap_or(Value::Null))
                .collect()
        })
        .collect()
}

/// Evaluates one predicate against a stored cell.
///
/// A numeric literal coerces the stored value to a float for the
/// comparison; a cell that cannot be coerced is a non-match rather than
/// an error (this mirrors the source system and may hide bad data, see
/// DESIGN.md). A text literal compares against the raw stored text, and
/// never matches an ordering comparison with a non-text cell.
fn predicate_matches(stored: &Value, pred: &Predicate) -> bool {
    if pred.value.is_numeric() {
        let rhs = match pred.value.as_f64() {
            Some(rhs) => rhs,
            None => return false,
        };
        return match stored.as_f64() {
            Some(lhs) => compare_f64(lhs, pred.op, rhs),
            None => false,
        };
    }
    match (stored, &pred.value) {
        (Value::Text(lhs), Value::Text(rhs)) => match pred.op {
            Operator::Eq => lhs == rhs,
            Operator::NotEq => lhs != rhs,
            Operator::Lt => lhs < rhs,
            Operator::Gt => lhs > rhs,
            Operator::LtEq => lhs <= rhs,
            Operator::GtEq => lhs >= rhs,
        },
        (_, Value::Text(_)) => matches!(pred.op, Operator::NotEq),
        (_, _) => false,
    }
}

fn compare_f64(lhs: f64, op: Operator, rhs: f64) -> bool {
    match op {
        Operator::Eq => lhs == rhs,
        Operator::NotEq => lhs != rhs,
        Operator::Lt => lhs < rhs,
        Operator::Gt => lhs > rhs,
        Operator::LtEq => lhs <= rhs,
        Operator::GtEq => lhs >= rhs,
    }
}

/// Session pairing the parser with the engine
pub struct Session<'a> {
    engine: &'a mut Engine,
}

impl Session<'_> {
    /// Parses and executes one statement
    pub fn execute(&mut self, statement: &str) -> Result<ResultSet> {
        let stmt = Parser::new(statement).parse()?;
        self.engine.execute(stmt)
    }
}

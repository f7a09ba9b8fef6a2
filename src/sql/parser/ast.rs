use std::fmt::Display;

use crate::sql::types::Value;

/// A parsed statement with all literals already coerced to typed values
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// LOAD <path> AS <name>
    Load { path: String, name: String },
    /// INSERT INTO <table> (<columns>) VALUES (<values>)
    Insert {
        table: String,
        columns: Vec<String>,
        values: Vec<Value>,
    },
    /// SELECT <projection> FROM <table> [WHERE <predicate>]
    Select {
        table: String,
        projection: Projection,
        predicate: Option<Predicate>,
    },
}

/// The shape of a SELECT's output columns
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    /// SELECT *
    All,
    /// SELECT a, b, c
    Columns(Vec<String>),
    /// SELECT COUNT(*)
    CountAll,
    /// SELECT COUNT(col)
    CountColumn(String),
}

/// A single column/operator/literal filter applied to SELECT
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub column: String,
    pub op: Operator,
    pub value: Value,
}

/// Comparison operators supported in WHERE clauses
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operator {
    Eq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Operator::Eq => "=",
            Operator::NotEq => "!=",
            Operator::Lt => "<",
            Operator::Gt => ">",
            Operator::LtEq => "<=",
            Operator::GtEq => ">=",
        })
    }
}

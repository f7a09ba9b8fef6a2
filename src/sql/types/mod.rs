use std::{cmp::Ordering, fmt::Display};

use serde::{Deserialize, Serialize};

/// Runtime value type for table cells and statement literals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Coerces a bare statement token into a typed value.
    ///
    /// Tries integer first, then float, and otherwise keeps the raw token
    /// as text. An un-coercible token is never an error.
    pub fn coerce(token: String) -> Self {
        if let Ok(i) = token.parse::<i64>() {
            return Self::Integer(i);
        }
        if let Ok(f) = token.parse::<f64>() {
            return Self::Float(f);
        }
        Self::Text(token)
    }

    /// Returns true for Integer and Float values
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Float(_))
    }

    /// Widens the value to a float for numeric comparison.
    ///
    /// Text is parsed on the fly; Null and non-numeric text yield None.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Null => None,
            Self::Integer(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            Self::Text(s) => s.parse::<f64>().ok(),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "{}", "NULL"),
            Value::Integer(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Text(v) => write!(f, "{}", v),
        }
    }
}

/// Implements partial ordering for Value comparison with numeric widening
impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Value::Null, Value::Null) => Some(Ordering::Equal),
            (Value::Null, _) => Some(Ordering::Less),
            (_, Value::Null) => Some(Ordering::Greater),
            (Value::Integer(a), Value::Integer(b)) => a.partial_cmp(b),
            (Value::Integer(a), Value::Float(b)) => (*a as f64).partial_cmp(b),
            (Value::Float(a), Value::Integer(b)) => a.partial_cmp(&(*b as f64)),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
            (Value::Text(a), Value::Text(b)) => a.partial_cmp(b),
            (_, _) => None,
        }
    }
}

/// An ordered mapping from column name to value.
///
/// Column order reflects insertion order and is what SELECT * displays.
/// Keys are unique within a row; `set` replaces an existing entry in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    entries: Vec<(String, Value)>,
}

impl Row {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Returns the value stored under the column, if any
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.entries.iter().any(|(name, _)| name == column)
    }

    /// Sets the column to the value, appending it if not yet present
    pub fn set(&mut self, column: String, value: Value) {
        match self.entries.iter_mut().find(|(name, _)| *name == column) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((column, value)),
        }
    }

    /// Column names in stored order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{Row, Value};

    #[test]
    fn test_value_coerce() {
        assert_eq!(Value::coerce("1".to_string()), Value::Integer(1));
        assert_eq!(Value::coerce("-5".to_string()), Value::Integer(-5));
        assert_eq!(Value::coerce("4.55".to_string()), Value::Float(4.55));
        assert_eq!(
            Value::coerce("3.5.7".to_string()),
            Value::Text("3.5.7".to_string())
        );
        assert_eq!(
            Value::coerce("hello".to_string()),
            Value::Text("hello".to_string())
        );
    }

    #[test]
    fn test_value_display_round_trip() {
        // A value coerced from its own display form stays equivalent
        assert_eq!(Value::coerce(Value::Integer(42).to_string()), Value::Integer(42));
        assert_eq!(Value::coerce(Value::Float(1.5).to_string()), Value::Float(1.5));
        assert_eq!(
            Value::coerce(Value::Text("abc".to_string()).to_string()),
            Value::Text("abc".to_string())
        );
    }

    #[test]
    fn test_value_numeric_widening() {
        assert!(Value::Integer(3) < Value::Float(3.5));
        assert!(Value::Float(4.0) > Value::Integer(3));
        assert_eq!(
            Value::Integer(3).partial_cmp(&Value::Float(3.0)),
            Some(std::cmp::Ordering::Equal)
        );
        assert_eq!(Value::Text("a".to_string()).partial_cmp(&Value::Integer(1)), None);
    }

    #[test]
    fn test_row_order_and_lookup() {
        let mut row = Row::new();
        row.set("b".to_string(), Value::Integer(2));
        row.set("a".to_string(), Value::Integer(1));
        assert_eq!(row.columns().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(row.get("a"), Some(&Value::Integer(1)));
        assert_eq!(row.get("c"), None);

        // set replaces in place without reordering
        row.set("b".to_string(), Value::Null);
        assert_eq!(row.columns().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(row.get("b"), Some(&Value::Null));
        assert_eq!(row.len(), 2);
    }
}

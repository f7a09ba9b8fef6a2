use std::iter::Peekable;

use crate::error::{Error, Result};
use crate::sql::parser::ast::{Operator, Predicate, Projection, Statement};
use crate::sql::parser::lexer::{Keyword, Lexer, Token};
use crate::sql::types::Value;

pub mod ast;
mod lexer;

/// Statement parser - converts tokens into a typed command
///
/// Exactly one of three statement shapes is recognized (INSERT, LOAD,
/// SELECT), dispatched on the leading keyword. A statement that starts
/// with anything else fails with UnrecognizedStatement; empty input
/// fails with EmptyStatement. Parsing has no side effects.
pub struct Parser<'a> {
    lexer: Peekable<Lexer<'a>>,
}

/// Checks the identifier grammar `[A-Za-z_][A-Za-z0-9_]*`
fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given statement text
    pub fn new(input: &'a str) -> Self {
        Parser {
            lexer: Lexer::new(input).peekable(),
        }
    }

    /// Parses the input into a statement
    pub fn parse(&mut self) -> Result<Statement> {
        // A lone semicolon is the same as an empty statement
        if self.next_if_token(Token::Semicolon).is_some() && self.peek()?.is_none() {
            return Err(Error::EmptyStatement);
        }
        let stmt = self.parse_statement()?;
        self.next_if_token(Token::Semicolon);
        // No tokens allowed after the optional semicolon
        if let Some(token) = self.peek()? {
            return Err(Error::UnrecognizedStatement(format!(
                "unexpected token {} after statement",
                token
            )));
        }
        Ok(stmt)
    }

    /// Dispatches on the leading keyword
    fn parse_statement(&mut self) -> Result<Statement> {
        match self.peek()? {
            Some(Token::Keyword(Keyword::Insert)) => self.parse_insert(),
            Some(Token::Keyword(Keyword::Load)) => self.parse_load(),
            Some(Token::Keyword(Keyword::Select)) => self.parse_select(),
            Some(token) => Err(Error::UnrecognizedStatement(format!(
                "unexpected token {}",
                token
            ))),
            None => Err(Error::EmptyStatement),
        }
    }

    /// Parses INSERT INTO <table> (<columns>) VALUES (<values>)
    fn parse_insert(&mut self) -> Result<Statement> {
        self.next_expect(Token::Keyword(Keyword::Insert))?;
        self.next_expect(Token::Keyword(Keyword::Into))?;
        let table = self.next_ident()?;

        self.next_expect(Token::OpenParen)?;
        let mut columns = Vec::new();
        loop {
            columns.push(self.next_ident()?);
            match self.next()? {
                Token::CloseParen => break,
                Token::Comma => {}
                token => {
                    return Err(Error::UnrecognizedStatement(format!(
                        "unexpected token {} in column list",
                        token
                    )));
                }
            }
        }

        self.next_expect(Token::Keyword(Keyword::Values))?;
        self.next_expect(Token::OpenParen)?;
        let mut values = Vec::new();
        loop {
            values.push(self.parse_value()?);
            match self.next()? {
                Token::CloseParen => break,
                Token::Comma => {}
                token => {
                    return Err(Error::UnrecognizedStatement(format!(
                        "unexpected token {} in value list",
                        token
                    )));
                }
            }
        }

        if columns.len() != values.len() {
            return Err(Error::ColumnValueCountMismatch {
                columns: columns.len(),
                values: values.len(),
            });
        }
        Ok(Statement::Insert {
            table,
            columns,
            values,
        })
    }

    /// Parses LOAD <path> AS <name>
    ///
    /// The path is a single whitespace-delimited token, optionally quoted.
    fn parse_load(&mut self) -> Result<Statement> {
        self.next_expect(Token::Keyword(Keyword::Load))?;
        let path = match self.next()? {
            Token::Atom(path) => path,
            Token::String(path) => path,
            token => {
                return Err(Error::UnrecognizedStatement(format!(
                    "expected file path, got {}",
                    token
                )));
            }
        };
        self.next_expect(Token::Keyword(Keyword::As))?;
        let name = self.next_ident()?;
        Ok(Statement::Load { path, name })
    }

    /// Parses SELECT <projection> FROM <table> [WHERE <predicate>]
    fn parse_select(&mut self) -> Result<Statement> {
        self.next_expect(Token::Keyword(Keyword::Select))?;
        let projection = self.parse_projection()?;
        self.next_expect(Token::Keyword(Keyword::From))?;
        let table = self.next_ident()?;
        let predicate = self.parse_predicate()?;
        Ok(Statement::Select {
            table,
            projection,
            predicate,
        })
    }

    /// Classifies the projection: COUNT(*) / COUNT(col) / * / column list
    fn parse_projection(&mut self) -> Result<Projection> {
        if self.next_if_token(Token::Asterisk).is_some() {
            return Ok(Projection::All);
        }
        if self.next_if_token(Token::Keyword(Keyword::Count)).is_some() {
            if self.next_if_token(Token::OpenParen).is_some() {
                let projection = match self.next()? {
                    Token::Asterisk => Projection::CountAll,
                    Token::Atom(column) if is_identifier(&column) => {
                        Projection::CountColumn(column)
                    }
                    token => {
                        return Err(Error::UnrecognizedStatement(format!(
                            "unexpected token {} in COUNT",
                            token
                        )));
                    }
                };
                self.next_expect(Token::CloseParen)?;
                return Ok(projection);
            }
            // COUNT without parentheses is just a column named count
            return Ok(Projection::Columns(
                self.parse_column_list("count".to_string())?,
            ));
        }
        let first = self.next_ident()?;
        Ok(Projection::Columns(self.parse_column_list(first)?))
    }

    /// Parses the tail of a comma-separated identifier list
    fn parse_column_list(&mut self, first: String) -> Result<Vec<String>> {
        let mut columns = vec![first];
        while self.next_if_token(Token::Comma).is_some() {
            columns.push(self.next_ident()?);
        }
        Ok(columns)
    }

    /// Parses the optional WHERE clause: <identifier> <op> <literal>
    fn parse_predicate(&mut self) -> Result<Option<Predicate>> {
        if self.next_if_token(Token::Keyword(Keyword::Where)).is_none() {
            return Ok(None);
        }
        let column = match self.next()? {
            Token::Atom(column) if is_identifier(&column) => column,
            token => {
                return Err(Error::InvalidPredicate(format!(
                    "expected column name, got {}",
                    token
                )));
            }
        };
        let op = match self.next()? {
            Token::Equal => Operator::Eq,
            Token::NotEqual => Operator::NotEq,
            Token::LessThanOrEqual => Operator::LtEq,
            Token::GreaterThanOrEqual => Operator::GtEq,
            Token::LessThan => Operator::Lt,
            Token::GreaterThan => Operator::Gt,
            token => {
                return Err(Error::InvalidPredicate(format!(
                    "expected comparison operator, got {}",
                    token
                )));
            }
        };
        let value = self.parse_predicate_value()?;
        Ok(Some(Predicate { column, op, value }))
    }

    /// Parses the right-hand side of a predicate.
    ///
    /// The comparison value runs to the end of the statement. A single
    /// quoted token is text, a single bare token is coerced, and a
    /// multi-token tail is joined with spaces and kept as raw text.
    fn parse_predicate_value(&mut self) -> Result<Value> {
        let mut parts = Vec::new();
        while let Some(token) = self.peek()? {
            if token == Token::Semicolon {
                break;
            }
            parts.push(self.next()?);
        }
        if parts.is_empty() {
            return Err(Error::InvalidPredicate(
                "missing comparison value".to_string(),
            ));
        }
        if parts.len() == 1 {
            return Ok(match parts.remove(0) {
                Token::String(s) => Value::Text(s),
                Token::Atom(a) => Value::coerce(a),
                token => Value::Text(token.to_string()),
            });
        }
        Ok(Value::Text(
            parts
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" "),
        ))
    }

    /// Parses a single INSERT value literal
    fn parse_value(&mut self) -> Result<Value> {
        Ok(match self.next()? {
            Token::String(s) => Value::Text(s),
            Token::Atom(a) => Value::coerce(a),
            token => {
                return Err(Error::UnrecognizedStatement(format!(
                    "unexpected value token {}",
                    token
                )));
            }
        })
    }

    /// Peeks at the next token
    fn peek(&mut self) -> Result<Option<Token>> {
        self.lexer.peek().cloned().transpose()
    }

    /// Consumes and returns the next token
    fn next(&mut self) -> Result<Token> {
        self.lexer.next().unwrap_or_else(|| {
            Err(Error::UnrecognizedStatement(
                "unexpected end of input".to_string(),
            ))
        })
    }

    /// Expects and consumes an identifier
    fn next_ident(&mut self) -> Result<String> {
        match self.next()? {
            Token::Atom(ident) if is_identifier(&ident) => Ok(ident),
            token => Err(Error::UnrecognizedStatement(format!(
                "expected identifier, got {}",
                token
            ))),
        }
    }

    /// Expects a specific token, returns error if different
    fn next_expect(&mut self, expect: Token) -> Result<()> {
        let token = self.next()?;
        if token != expect {
            return Err(Error::UnrecognizedStatement(format!(
                "expected token {}, got {}",
                expect, token
            )));
        }
        Ok(())
    }

    /// Consumes next token if it matches the given token
    fn next_if_token(&mut self, token: Token) -> Option<Token> {
        let matched = self.peek().unwrap_or(None).filter(|t| t == &token)?;
        self.next().ok().map(|_| matched)
    }
}

#[cfg(test)]
mod tests {
    use super::Parser;
    use crate::error::Error;
    use crate::error::Result;
    use crate::sql::parser::ast::{Operator, Predicate, Projection, Statement};
    use crate::sql::types::Value;

    #[test]
    fn test_parser_insert() -> Result<()> {
        let stmt = Parser::new("INSERT INTO t (a,b) VALUES (1, 'x')").parse()?;
        assert_eq!(
            stmt,
            Statement::Insert {
                table: "t".to_string(),
                columns: vec!["a".to_string(), "b".to_string()],
                values: vec![Value::Integer(1), Value::Text("x".to_string())],
            }
        );

        // quote-aware splitting: comma inside quotes does not split
        let stmt = Parser::new("insert into t (name, score) values ('a, b', 4.5);").parse()?;
        assert_eq!(
            stmt,
            Statement::Insert {
                table: "t".to_string(),
                columns: vec!["name".to_string(), "score".to_string()],
                values: vec![Value::Text("a, b".to_string()), Value::Float(4.5)],
            }
        );

        // un-coercible unquoted token becomes text, not an error
        let stmt = Parser::new("INSERT INTO t (v) VALUES (3.5.7)").parse()?;
        assert_eq!(
            stmt,
            Statement::Insert {
                table: "t".to_string(),
                columns: vec!["v".to_string()],
                values: vec![Value::Text("3.5.7".to_string())],
            }
        );
        Ok(())
    }

    #[test]
    fn test_parser_insert_count_mismatch() {
        let result = Parser::new("INSERT INTO t (a, b) VALUES (1)").parse();
        assert_eq!(
            result,
            Err(Error::ColumnValueCountMismatch {
                columns: 2,
                values: 1
            })
        );
    }

    #[test]
    fn test_parser_load() -> Result<()> {
        let stmt = Parser::new("LOAD data/people.csv AS people;").parse()?;
        assert_eq!(
            stmt,
            Statement::Load {
                path: "data/people.csv".to_string(),
                name: "people".to_string(),
            }
        );

        // surrounding double quotes on the path are stripped
        let stmt = Parser::new("load \"data/people.csv\" as people").parse()?;
        assert_eq!(
            stmt,
            Statement::Load {
                path: "data/people.csv".to_string(),
                name: "people".to_string(),
            }
        );
        Ok(())
    }

    #[test]
    fn test_parser_select_projections() -> Result<()> {
        let stmt = Parser::new("SELECT COUNT(*) FROM t").parse()?;
        assert_eq!(
            stmt,
            Statement::Select {
                table: "t".to_string(),
                projection: Projection::CountAll,
                predicate: None,
            }
        );

        let stmt = Parser::new("SELECT COUNT(age) FROM t").parse()?;
        assert_eq!(
            stmt,
            Statement::Select {
                table: "t".to_string(),
                projection: Projection::CountColumn("age".to_string()),
                predicate: None,
            }
        );

        let stmt = Parser::new("select * from t;").parse()?;
        assert_eq!(
            stmt,
            Statement::Select {
                table: "t".to_string(),
                projection: Projection::All,
                predicate: None,
            }
        );

        let stmt = Parser::new("SELECT name, age FROM t").parse()?;
        assert_eq!(
            stmt,
            Statement::Select {
                table: "t".to_string(),
                projection: Projection::Columns(vec!["name".to_string(), "age".to_string()]),
                predicate: None,
            }
        );
        Ok(())
    }

    #[test]
    fn test_parser_select_where() -> Result<()> {
        let stmt = Parser::new("SELECT * FROM t WHERE age > 30").parse()?;
        assert_eq!(
            stmt,
            Statement::Select {
                table: "t".to_string(),
                projection: Projection::All,
                predicate: Some(Predicate {
                    column: "age".to_string(),
                    op: Operator::Gt,
                    value: Value::Integer(30),
                }),
            }
        );

        let stmt = Parser::new("SELECT name FROM t WHERE dept = 'Engineering';").parse()?;
        assert_eq!(
            stmt,
            Statement::Select {
                table: "t".to_string(),
                projection: Projection::Columns(vec!["name".to_string()]),
                predicate: Some(Predicate {
                    column: "dept".to_string(),
                    op: Operator::Eq,
                    value: Value::Text("Engineering".to_string()),
                }),
            }
        );

        // <= must not be truncated to <
        let stmt = Parser::new("SELECT * FROM t WHERE score <= 4.5").parse()?;
        assert_eq!(
            stmt,
            Statement::Select {
                table: "t".to_string(),
                projection: Projection::All,
                predicate: Some(Predicate {
                    column: "score".to_string(),
                    op: Operator::LtEq,
                    value: Value::Float(4.5),
                }),
            }
        );
        Ok(())
    }

    #[test]
    fn test_parser_where_raw_text_rhs() -> Result<()> {
        // multi-token unquoted right-hand side stays raw text
        let stmt = Parser::new("SELECT * FROM t WHERE name = John Smith").parse()?;
        assert_eq!(
            stmt,
            Statement::Select {
                table: "t".to_string(),
                projection: Projection::All,
                predicate: Some(Predicate {
                    column: "name".to_string(),
                    op: Operator::Eq,
                    value: Value::Text("John Smith".to_string()),
                }),
            }
        );
        Ok(())
    }

    #[test]
    fn test_parser_invalid_predicate() {
        assert!(matches!(
            Parser::new("SELECT * FROM t WHERE age >").parse(),
            Err(Error::InvalidPredicate(_))
        ));
        assert!(matches!(
            Parser::new("SELECT * FROM t WHERE = 1").parse(),
            Err(Error::InvalidPredicate(_))
        ));
    }

    #[test]
    fn test_parser_empty_statement() {
        assert_eq!(Parser::new("").parse(), Err(Error::EmptyStatement));
        assert_eq!(Parser::new("   ").parse(), Err(Error::EmptyStatement));
        assert_eq!(Parser::new(" ; ").parse(), Err(Error::EmptyStatement));
    }

    #[test]
    fn test_parser_unrecognized_statement() {
        assert!(matches!(
            Parser::new("DELETE FROM t").parse(),
            Err(Error::UnrecognizedStatement(_))
        ));
        assert!(matches!(
            Parser::new("SELECT * FROM t extra").parse(),
            Err(Error::UnrecognizedStatement(_))
        ));
    }
}

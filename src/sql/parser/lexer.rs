//! Statement lexer - tokenizes a statement string into a stream of tokens

use std::{fmt::Display, iter::Peekable, str::Chars};

use crate::error::{Error, Result};

/// Represents a single lexical token in a statement
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Reserved keyword
    Keyword(Keyword),
    /// Bare token: identifier, number, or an arbitrary unquoted literal
    Atom(String),
    /// Quoted string literal (single or double quotes, quotes stripped)
    String(String),
    /// Punctuation
    OpenParen,
    CloseParen,
    Comma,
    Semicolon,
    Asterisk,
    /// Comparison operators
    Equal,
    NotEqual,
    LessThan,
    GreaterThan,
    LessThanOrEqual,
    GreaterThanOrEqual,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Token::Keyword(keyword) => keyword.to_str(),
            Token::Atom(v) => v,
            Token::String(v) => v,
            Token::OpenParen => "(",
            Token::CloseParen => ")",
            Token::Comma => ",",
            Token::Semicolon => ";",
            Token::Asterisk => "*",
            Token::Equal => "=",
            Token::NotEqual => "!=",
            Token::LessThan => "<",
            Token::GreaterThan => ">",
            Token::LessThanOrEqual => "<=",
            Token::GreaterThanOrEqual => ">=",
        })
    }
}

/// Reserved keywords (matched case-insensitively)
#[derive(Debug, Clone, PartialEq)]
pub enum Keyword {
    Select,
    From,
    Where,
    Insert,
    Into,
    Values,
    Load,
    As,
    Count,
}

impl Keyword {
    /// Attempts to parse a string as a keyword (case-insensitive)
    pub fn from_str(ident: &str) -> Option<Keyword> {
        Some(match ident.to_uppercase().as_ref() {
            "SELECT" => Keyword::Select,
            "FROM" => Keyword::From,
            "WHERE" => Keyword::Where,
            "INSERT" => Keyword::Insert,
            "INTO" => Keyword::Into,
            "VALUES" => Keyword::Values,
            "LOAD" => Keyword::Load,
            "AS" => Keyword::As,
            "COUNT" => Keyword::Count,
            _ => return None,
        })
    }

    /// Returns the uppercase string representation of the keyword
    pub fn to_str(&self) -> &str {
        match self {
            Keyword::Select => "SELECT",
            Keyword::From => "FROM",
            Keyword::Where => "WHERE",
            Keyword::Insert => "INSERT",
            Keyword::Into => "INTO",
            Keyword::Values => "VALUES",
            Keyword::Load => "LOAD",
            Keyword::As => "AS",
            Keyword::Count => "COUNT",
        }
    }
}

impl Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_str())
    }
}

/// Characters that terminate a bare atom
fn is_delimiter(c: char) -> bool {
    matches!(
        c,
        '\'' | '"' | '(' | ')' | ',' | ';' | '*' | '=' | '<' | '>' | '!'
    )
}

/// Statement lexical analyzer
///
/// Atoms are scanned generously: any run of characters that is not
/// whitespace, punctuation, or an operator forms one token. This lets
/// LOAD paths, numbers (including negatives), and arbitrary unquoted
/// literals all pass through, with coercion deferred to the parser.
pub struct Lexer<'a> {
    iter: Peekable<Chars<'a>>,
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.scan() {
            Ok(Some(token)) => Some(Ok(token)),
            Ok(None) => self.iter.peek().map(|c| {
                Err(Error::UnrecognizedStatement(format!(
                    "unexpected character {}",
                    c
                )))
            }),
            Err(err) => Some(Err(err)),
        }
    }
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given statement text
    pub fn new(text: &'a str) -> Self {
        Self {
            iter: text.chars().peekable(),
        }
    }

    /// Consumes the next character if it satisfies the predicate
    fn next_if<F: Fn(char) -> bool>(&mut self, predicate: F) -> Option<char> {
        self.iter.peek().filter(|&c| predicate(*c))?;
        self.iter.next()
    }

    /// Consumes consecutive characters while they satisfy the predicate
    fn next_while<F: Fn(char) -> bool>(&mut self, predicate: F) -> Option<String> {
        let mut value = String::new();
        while let Some(c) = self.next_if(&predicate) {
            value.push(c);
        }
        Some(value).filter(|v| !v.is_empty())
    }

    /// Removes whitespace from the input stream
    fn erase_whitespace(&mut self) {
        self.next_while(|c| c.is_whitespace());
    }

    /// Scans and returns the next token
    fn scan(&mut self) -> Result<Option<Token>> {
        self.erase_whitespace();
        match self.iter.peek() {
            Some('\'' | '"') => self.scan_string(),
            Some('(' | ')' | ',' | ';' | '*') => Ok(self.scan_punct()),
            Some('=' | '<' | '>' | '!') => self.scan_operator().map(Some),
            Some(_) => Ok(self.scan_atom()),
            None => Ok(None),
        }
    }

    /// Scans a string literal enclosed in single or double quotes
    fn scan_string(&mut self) -> Result<Option<Token>> {
        let quote = match self.next_if(|c| c == '\'' || c == '"') {
            Some(q) => q,
            None => return Ok(None),
        };
        let mut value = String::new();
        loop {
            match self.iter.next() {
                Some(c) if c == quote => break,
                Some(c) => value.push(c),
                None => {
                    return Err(Error::UnrecognizedStatement(
                        "unterminated string literal".to_string(),
                    ));
                }
            }
        }
        Ok(Some(Token::String(value)))
    }

    /// Scans a single-character punctuation token
    fn scan_punct(&mut self) -> Option<Token> {
        let token = match self.iter.peek()? {
            '(' => Token::OpenParen,
            ')' => Token::CloseParen,
            ',' => Token::Comma,
            ';' => Token::Semicolon,
            '*' => Token::Asterisk,
            _ => return None,
        };
        self.iter.next();
        Some(token)
    }

    /// Scans a comparison operator; `<=` and `>=` win over `<` and `>`
    fn scan_operator(&mut self) -> Result<Token> {
        match self.iter.next() {
            Some('=') => Ok(Token::Equal),
            Some('<') => Ok(if self.next_if(|c| c == '=').is_some() {
                Token::LessThanOrEqual
            } else {
                Token::LessThan
            }),
            Some('>') => Ok(if self.next_if(|c| c == '=').is_some() {
                Token::GreaterThanOrEqual
            } else {
                Token::GreaterThan
            }),
            Some('!') => {
                if self.next_if(|c| c == '=').is_some() {
                    Ok(Token::NotEqual)
                } else {
                    Err(Error::UnrecognizedStatement(
                        "expected = after !".to_string(),
                    ))
                }
            }
            _ => Err(Error::UnrecognizedStatement(
                "expected an operator".to_string(),
            )),
        }
    }

    /// Scans a bare atom, mapping it to a keyword when it matches one
    fn scan_atom(&mut self) -> Option<Token> {
        let value = self.next_while(|c| !c.is_whitespace() && !is_delimiter(c))?;
        Some(Keyword::from_str(&value).map_or(Token::Atom(value), Token::Keyword))
    }
}

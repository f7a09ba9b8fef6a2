//! MiniSQL - A minimal interactive SQL-like engine
//!
//! This crate provides:
//! - Statement parsing (lexer, parser, command AST)
//! - An in-memory table engine with schema-evolving inserts
//! - CSV loading into named tables
//! - Aligned-text result formatting for interactive use

pub mod error;
pub mod format;
pub mod sql;
pub mod storage;

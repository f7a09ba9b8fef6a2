//! SQL processing module
//!
//! This module provides:
//! - `parser`: statement lexer and parser
//! - `types`: runtime values and rows
//! - `engine`: in-memory table store and statement execution

pub mod engine;
pub mod parser;
pub mod types;

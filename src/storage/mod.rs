//! Storage module
//!
//! Tables live entirely in memory; the only on-disk concern is reading
//! delimited files for LOAD.

pub mod csv;

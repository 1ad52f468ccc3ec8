//! Raw SQL fragments that can't be expressed in Diesel's type-safe DSL.
//!
//! # Safety
//!
//! All SQL in this module has been reviewed for SQL injection safety:
//! - No user input reaches these strings
//! - No string concatenation or interpolation at runtime
//!
//! When adding new SQL here, document why Diesel DSL can't be used.

/// Pragmas applied to every pooled SQLite connection.
///
/// SQLite keeps foreign key enforcement off unless each connection asks for
/// it, and Diesel has no DSL for `PRAGMA`.
///
/// # Safety
/// Static SQL string with no user input.
pub const CONNECTION_PRAGMAS: &str = "PRAGMA foreign_keys = ON; \
    PRAGMA busy_timeout = 5000; \
    PRAGMA journal_mode = WAL;";

//! Typed errors for table loading and table operations.

use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to produce a typed table from the record file. Always fatal.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: expected 4 fields (name,capital,population,flower), found {found}")]
    FieldCount { line: usize, found: usize },
    #[error("line {line}: state name is empty")]
    EmptyName { line: usize },
    #[error("line {line}: population '{value}' is not a non-negative integer")]
    Population {
        line: usize,
        value: String,
        #[source]
        source: ParseIntError,
    },
}

/// Recoverable errors from queries and population updates.
///
/// None of these leave the table modified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// Lookup by name missed.
    #[error("no state named '{0}'")]
    NotFound(String),
    /// Update targeted a name that is not in the table.
    #[error("state '{0}' does not exist")]
    UnknownState(String),
    /// Population input was negative or not an integer.
    #[error("invalid population '{value}': {reason}")]
    InvalidPopulation { value: String, reason: &'static str },
}

/// Flower image lookup failures. These degrade the image feature only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    /// Positional strategy: fewer images than records.
    #[error("no image at position {position} for '{name}' ({available} images available)")]
    OutOfRange {
        name: String,
        position: usize,
        available: usize,
    },
    /// By-name strategy: no file matched the state name.
    #[error("no image found for '{name}'")]
    Unmapped { name: String },
}

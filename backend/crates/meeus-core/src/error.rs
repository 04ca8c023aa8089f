//! Error types for meeus-core
//!
//! The algorithms themselves are total; errors only come from parsing the
//! textual forms of the crate's enums.

use thiserror::Error;

/// Result type for meeus-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when parsing meeus-core values from text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Unrecognised calendar reform policy name
    #[error("Unknown calendar reform: {0} (expected 'gregorian_1582' or 'proleptic_gregorian')")]
    UnknownReform(String),

    /// Unrecognised weekday name
    #[error("Unknown weekday: {0}")]
    UnknownWeekday(String),
}

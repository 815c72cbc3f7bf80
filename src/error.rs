//src/error.rs

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TaxoError>;

/// Errors surfaced by the cluster filtering pipeline.
///
/// Malformed cluster lines are not errors: they are dropped while parsing.
#[derive(Error, Debug)]
pub enum TaxoError {
    /// A user supplied include/exclude keyword occurs in no observed taxonomy.
    #[error("Your word: {0} was not found in the taxonomy. Please correct the spelling.")]
    KeywordNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

//! Error types for the NC1 import boundary.
//!
//! The lexer and the block decoders never fail; anomalies inside a file are
//! absorbed as missing records or reported as warnings. Only the outer entry
//! points reject input.

use thiserror::Error;

/// Errors that can occur when an NC1 buffer is handed to the importer.
#[derive(Debug, Error, PartialEq)]
pub enum Nc1Error {
    /// The input buffer contained no bytes.
    #[error("empty input")]
    EmptyInput,

    /// The caller-supplied profile context is unusable.
    #[error("invalid profile context: {0}")]
    InvalidProfile(String),
}

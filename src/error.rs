//! Fatal packing errors.
//!
//! Every variant aborts the run: the binary reports it once on stderr and
//! exits with the variant's status code. Advisory conditions (oversized
//! program, padding applied, board limits) are printed as warnings and never
//! reach this type.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a packing run.
///
/// The open failures carry the offending path; the underlying
/// [`io::Error`] display includes the OS error code.
#[derive(Debug, Error)]
pub enum PackError {
    #[error("failed to open output file '{}': {source}", .path.display())]
    OutputOpen { path: PathBuf, source: io::Error },

    #[error("failed to open program file '{}': {source}", .path.display())]
    ProgramOpen { path: PathBuf, source: io::Error },

    #[error("failed to open data file '{}': {source}", .path.display())]
    DataOpen { path: PathBuf, source: io::Error },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl PackError {
    /// Process exit status for this error. Usage errors exit with clap's own
    /// status (2); these sit above it so every fatal class stays distinct.
    pub fn exit_code(&self) -> i32 {
        match self {
            PackError::OutputOpen { .. } => 3,
            PackError::ProgramOpen { .. } => 4,
            PackError::DataOpen { .. } => 5,
            PackError::Io(_) => 6,
        }
    }
}

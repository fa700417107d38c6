//! Error handling for cpf.
//! Defines the error type and result alias used throughout the application.

use indexmap::IndexMap;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Custom error types for cpf operations.
///
/// The first four variants are the user-correctable failures of a creation run. They are
/// all raised before the filesystem is touched. `UnsupportedSource` is fatal: the template
/// has a shape the engine cannot materialize.
#[derive(Error, Debug)]
pub enum Error {
    /// Templates folder, template source or config file missing, or the template folder is empty
    #[error("{message}")]
    NotFound { path: PathBuf, message: String },

    /// The destination (or the config file written by `init`) already exists
    #[error("{message}")]
    AlreadyExists { path: PathBuf, message: String },

    /// Malformed `key=value` replacement tokens
    #[error("{message}")]
    SyntaxError { message: String, expected: String, received: String },

    /// Options that cannot be combined, with the values that caused the conflict
    #[error("{message}")]
    MisusedOptions { message: String, options: IndexMap<String, String> },

    /// The template resolved to something that is neither a file nor a folder
    #[error("The source can only be a file or a folder: '{}'.", .path.display())]
    UnsupportedSource { path: PathBuf },

    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// Represents errors that occur while walking a template folder
    #[error("Directory traversal error: {0}.")]
    WalkDirError(#[from] walkdir::Error),

    /// Replacement pattern could not be compiled
    #[error("Regex error: {0}.")]
    RegexError(#[from] regex::Error),

    /// Represents errors that occur while reading or writing JSON
    #[error("JSON error: {0}.")]
    JsonError(#[from] serde_json::Error),

    /// Represents errors in the config file or in the command selected from it
    #[error("Configuration error: {0}.")]
    ConfigError(String),
}

impl Error {
    /// Whether the error is caused by the caller's input and can be fixed by them.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Error::NotFound { .. }
                | Error::AlreadyExists { .. }
                | Error::SyntaxError { .. }
                | Error::MisusedOptions { .. }
                | Error::ConfigError(_)
        )
    }
}

/// Convenience type alias for Results with cpf's Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// Syntax errors are followed by the expected and the received form of the tokens.
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    if let Error::SyntaxError { expected, received, .. } = &err {
        eprintln!();
        eprintln!("Expected:");
        eprintln!("{expected}");
        eprintln!();
        eprintln!("Received:");
        eprintln!("{received}");
    }
    std::process::exit(1);
}

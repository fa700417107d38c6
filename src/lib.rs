//! cpf creates files and folders from templates.
//! A template is a file or a folder tree inside a templates folder. Creating from it copies
//! it to a destination while replacing parts of names and contents.

/// Command-line interface module for the cpf application
pub mod cli;

/// Default values and reserved names
pub mod constants;

/// Template instantiation: validation, folder walk and creation results
pub mod creator;

/// Encodings of created file contents
pub mod encoding;

/// Error types and handling for the cpf application
pub mod error;

/// Starter config file creation
pub mod init;

/// Logger initialisation for the binary
pub mod logger;

/// Creation options, their defaults and `key=value` token parsing
pub mod options;

/// Literal multi-key text replacement
pub mod replace;

/// Result printing
pub mod report;

/// Templates folder, source and destination resolution
pub mod resolver;

/// Config file driven named commands
pub mod runner;

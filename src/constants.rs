//! Common constants used throughout cpf.

/// Folder, relative to the working directory, where templates are looked up by default
pub const DEFAULT_TEMPLATES_FOLDER: &str = "__file-templates__";

/// Separator between key and value in `key=value` replacement tokens
pub const DEFAULT_KEY_VALUE_SEPARATOR: &str = "=";

/// Reserved name token replaced with the Unix epoch milliseconds captured when a run starts
pub const TIMESTAMP_TOKEN: &str = "[timestamp]";

/// Name of the declarative command file read by `cpf run` and written by `cpf init`
pub const CONFIG_FILE: &str = "cpf.config.json";

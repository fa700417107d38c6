//! Options of a creation run.
//! Callers supply a `PartialCreateOptions`; every field left as `None` falls back to the
//! value of `CreateOptions::default()`.

use indexmap::IndexMap;

use crate::constants::{DEFAULT_KEY_VALUE_SEPARATOR, DEFAULT_TEMPLATES_FOLDER};
use crate::encoding::ContentEncoding;
use crate::error::{Error, Result};

/// Fully resolved options. Read-only for the duration of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOptions {
    /// Forces the top-level destination name. Empty means "derive it from the source".
    pub name: String,
    /// Folder, relative to the working directory, the source is resolved in
    pub templates_folder: String,
    pub encoding: ContentEncoding,
    /// `key=value` tokens applied to every created file and folder name
    pub replace_names: Option<Vec<String>>,
    /// `key=value` tokens applied to the content of every created file
    pub replace_content: Option<Vec<String>>,
    /// Whether name keys must be written as `[key]` to be replaced
    pub brackets: bool,
    pub key_value_separator: String,
}

impl Default for CreateOptions {
    fn default() -> Self {
        Self {
            name: String::new(),
            templates_folder: DEFAULT_TEMPLATES_FOLDER.to_string(),
            encoding: ContentEncoding::default(),
            replace_names: None,
            replace_content: None,
            brackets: true,
            key_value_separator: DEFAULT_KEY_VALUE_SEPARATOR.to_string(),
        }
    }
}

/// Caller supplied overrides. `Some(false)` and `Some(String::new())` are honoured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialCreateOptions {
    pub name: Option<String>,
    pub templates_folder: Option<String>,
    pub encoding: Option<ContentEncoding>,
    pub replace_names: Option<Vec<String>>,
    pub replace_content: Option<Vec<String>>,
    pub brackets: Option<bool>,
    pub key_value_separator: Option<String>,
}

/// A `key=value` token split on the separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub key: String,
    pub value: String,
}

impl Replacement {
    /// Splits `token` on the first occurrence of `separator`.
    /// A token without the separator yields an empty value.
    pub fn parse(token: &str, separator: &str) -> Self {
        match token.split_once(separator) {
            Some((key, value)) => Self { key: key.to_string(), value: value.to_string() },
            None => Self { key: token.to_string(), value: String::new() },
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.key.is_empty() && !self.value.is_empty()
    }
}

impl CreateOptions {
    /// Merges `overrides` over the defaults.
    pub fn resolve(overrides: PartialCreateOptions) -> Self {
        Self::default().merge(overrides)
    }

    /// Field by field override of `self` with every field set in `overrides`.
    pub fn merge(self, overrides: PartialCreateOptions) -> Self {
        Self {
            name: overrides.name.unwrap_or(self.name),
            templates_folder: overrides.templates_folder.unwrap_or(self.templates_folder),
            encoding: overrides.encoding.unwrap_or(self.encoding),
            replace_names: overrides.replace_names.or(self.replace_names),
            replace_content: overrides.replace_content.or(self.replace_content),
            brackets: overrides.brackets.unwrap_or(self.brackets),
            key_value_separator: overrides
                .key_value_separator
                .unwrap_or(self.key_value_separator),
        }
    }

    pub fn has_name(&self) -> bool {
        !self.name.is_empty()
    }

    /// Rejects `name` combined with `replace_names`.
    ///
    /// # Errors
    /// * `Error::MisusedOptions` naming both values
    pub fn check_misused(&self) -> Result<()> {
        if let (true, Some(replace_names)) = (self.has_name(), &self.replace_names) {
            let mut options = IndexMap::new();
            options.insert("name".to_string(), self.name.clone());
            options.insert("replaceNames".to_string(), replace_names.join(" "));
            return Err(Error::MisusedOptions {
                message: "The --name option cannot be used together with the --replace-names \
                          option to prevent unexpected results"
                    .to_string(),
                options,
            });
        }
        Ok(())
    }

    /// Parses `replace_names`. `None` when the option is absent.
    ///
    /// # Errors
    /// * `Error::SyntaxError` if any token has an empty key or value
    pub fn parsed_replace_names(&self) -> Result<Option<Vec<Replacement>>> {
        self.replace_names
            .as_deref()
            .map(|tokens| {
                self.parse_tokens(
                    tokens,
                    "The --replace-names option is incorrectly formatted",
                    "name",
                )
            })
            .transpose()
    }

    /// Parses `replace_content`. Empty when the option is absent.
    ///
    /// # Errors
    /// * `Error::SyntaxError` if any token has an empty key or value
    pub fn parsed_replace_content(&self) -> Result<Vec<Replacement>> {
        match self.replace_content.as_deref() {
            Some(tokens) => self.parse_tokens(
                tokens,
                "The --replace-content option is incorrectly formatted",
                "text",
            ),
            None => Ok(Vec::new()),
        }
    }

    fn parse_tokens(
        &self,
        tokens: &[String],
        message: &str,
        value_hint: &str,
    ) -> Result<Vec<Replacement>> {
        let separator = &self.key_value_separator;
        let parsed: Vec<Replacement> =
            tokens.iter().map(|token| Replacement::parse(token, separator)).collect();

        if parsed.iter().any(|replacement| !replacement.is_valid()) {
            return Err(Error::SyntaxError {
                message: message.to_string(),
                expected: format!("key1{separator}{value_hint}1 key2{separator}{value_hint}2"),
                received: tokens.join(" "),
            });
        }
        Ok(parsed)
    }
}

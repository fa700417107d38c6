//! Named commands declared in the config file.
//! A command is a list of creation steps whose `{param}` placeholders are filled with the
//! positional parameters given on the command line.

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::PathBuf;

use crate::constants::{CONFIG_FILE, DEFAULT_KEY_VALUE_SEPARATOR};
use crate::creator::{CreateCommand, CreationResult};
use crate::encoding::ContentEncoding;
use crate::error::{Error, Result};
use crate::options::PartialCreateOptions;
use crate::replace::{replace_text_pieces, Pieces};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDefaults {
    pub templates_path: Option<String>,
}

/// Top level of `cpf.config.json`. Commands stay raw JSON until one is selected.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub defaults: Option<ConfigDefaults>,
    #[serde(default)]
    pub commands: IndexMap<String, serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigCommand {
    pub templates_path: Option<String>,
    /// Parameter name to its description, in the order parameters are given
    #[serde(default)]
    pub params: IndexMap<String, String>,
    #[serde(default)]
    pub create: Vec<CreationStep>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreationStep {
    #[serde(default)]
    pub source_path: String,
    #[serde(default)]
    pub destination_path: String,
    pub templates_path: Option<String>,
    pub name: Option<String>,
    pub encoding: Option<ContentEncoding>,
    pub brackets: Option<bool>,
    #[serde(default, deserialize_with = "lenient_map")]
    pub replace_names: Option<IndexMap<String, String>>,
    #[serde(default, deserialize_with = "lenient_map")]
    pub replace_content: Option<IndexMap<String, String>>,
}

/// Accepts an object of replacements. Any other value counts as no replacements.
fn lenient_map<'de, D>(deserializer: D) -> std::result::Result<Option<IndexMap<String, String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Object(map) => Some(
            map.into_iter()
                .map(|(key, value)| match value {
                    serde_json::Value::String(text) => (key, text),
                    other => (key, other.to_string()),
                })
                .collect(),
        ),
        _ => None,
    })
}

fn flatten(map: Option<IndexMap<String, String>>) -> Option<Vec<String>> {
    map.map(|map| {
        map.into_iter()
            .map(|(key, value)| format!("{key}{DEFAULT_KEY_VALUE_SEPARATOR}{value}"))
            .collect()
    })
}

impl CreationStep {
    /// Templates folder precedence: step, then command, then config defaults.
    fn options(
        self,
        command_templates_path: Option<&str>,
        defaults: Option<&ConfigDefaults>,
    ) -> PartialCreateOptions {
        let templates_folder = [
            self.templates_path,
            command_templates_path.map(str::to_string),
            defaults.and_then(|d| d.templates_path.clone()),
        ]
        .into_iter()
        .flatten()
        .find(|path| !path.is_empty());

        PartialCreateOptions {
            name: self.name,
            templates_folder,
            encoding: self.encoding,
            replace_names: flatten(self.replace_names),
            replace_content: flatten(self.replace_content),
            brackets: self.brackets,
            key_value_separator: None,
        }
    }
}

/// Runs one named command of the config file in the working directory.
#[derive(Debug)]
pub struct RunCommand {
    command: String,
    params: Vec<String>,
    working_dir: PathBuf,
}

impl RunCommand {
    pub fn new<S: Into<String>>(command: S, params: Vec<String>) -> Self {
        Self {
            command: command.into(),
            params,
            working_dir: std::env::current_dir().unwrap_or_default(),
        }
    }

    pub fn with_working_dir<P: Into<PathBuf>>(mut self, working_dir: P) -> Self {
        self.working_dir = working_dir.into();
        self
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn config_path(&self) -> PathBuf {
        self.working_dir.join(CONFIG_FILE)
    }

    /// Runs every creation step of the command, in order.
    ///
    /// # Returns
    /// * `Result<Vec<CreationResult>>` - Results of all steps, in creation order
    ///
    /// # Errors
    /// * `Error::NotFound` if the config file does not exist
    /// * `Error::ConfigError` if the config file is invalid, the command is not declared,
    ///   the parameter count is wrong or the parameters break the command definition
    /// * Any error of the creation steps, unchanged
    pub fn run(&self) -> Result<Vec<CreationResult>> {
        let config = self.read_config()?;

        let raw_command = config.commands.get(&self.command).ok_or_else(|| {
            Error::ConfigError(format!(
                "The command '{}' was not found in the config file",
                self.command
            ))
        })?;
        let declared = command_params(raw_command)?;

        if declared.len() != self.params.len() {
            return Err(Error::ConfigError(format!(
                "The command '{}' expects {} params ({}) but {} were given",
                self.command,
                declared.len(),
                declared.keys().cloned().collect::<Vec<_>>().join(", "),
                self.params.len()
            )));
        }

        let ConfigCommand { templates_path, create, .. } =
            parse_command(self.apply_params(raw_command, &declared)?)?;

        let mut results = Vec::new();
        for (index, step) in create.into_iter().enumerate() {
            debug!(
                "Running step {} of '{}': '{}' -> '{}'",
                index + 1,
                self.command,
                step.source_path,
                step.destination_path
            );
            let source = step.source_path.clone();
            let destination = step.destination_path.clone();
            let options = step.options(templates_path.as_deref(), config.defaults.as_ref());

            let mut create = CreateCommand::new(source, destination, options)
                .with_working_dir(&self.working_dir);
            results.extend(create.run()?);
        }

        Ok(results)
    }

    fn read_config(&self) -> Result<ConfigFile> {
        let config_path = self.config_path();
        if !config_path.exists() {
            return Err(Error::NotFound {
                message: "The config file was not found".to_string(),
                path: config_path,
            });
        }

        debug!("Loading configuration from {}", config_path.display());
        let content = fs::read_to_string(&config_path)?;
        serde_json::from_str(&content).map_err(|e| {
            Error::ConfigError(format!(
                "Cannot parse the config file, make sure it contains valid JSON: {e}"
            ))
        })
    }

    /// Substitutes every `{param}` in the command definition with its positional value.
    /// The definition stays raw JSON so typed fields can hold placeholders too.
    fn apply_params(
        &self,
        raw_command: &serde_json::Value,
        declared: &IndexMap<String, String>,
    ) -> Result<serde_json::Value> {
        let pieces: Pieces = declared
            .keys()
            .zip(&self.params)
            .map(|(key, value)| (format!("{{{key}}}"), value.clone()))
            .collect();

        if pieces.is_empty() {
            return Ok(raw_command.clone());
        }

        debug!("Substituting params: {:?}", pieces);
        let definition = serde_json::to_string(raw_command)?;
        let definition = replace_text_pieces(&definition, &pieces)?;

        serde_json::from_str(&definition).map_err(|e| {
            Error::ConfigError(format!(
                "An error occurred when trying to parse the given params: {e}"
            ))
        })
    }
}

/// Parameter names declared by a command, in positional order.
fn command_params(raw_command: &serde_json::Value) -> Result<IndexMap<String, String>> {
    match raw_command.get("params") {
        None | Some(serde_json::Value::Null) => Ok(IndexMap::new()),
        Some(params) => IndexMap::deserialize(params)
            .map_err(|e| Error::ConfigError(format!("Invalid command params: {e}"))),
    }
}

fn parse_command(value: serde_json::Value) -> Result<ConfigCommand> {
    serde_json::from_value(value)
        .map_err(|e| Error::ConfigError(format!("Invalid command definition: {e}")))
}

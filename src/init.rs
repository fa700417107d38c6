//! Creation of a starter `cpf.config.json`.

use log::debug;
use serde_json::json;
use std::fs;
use std::path::PathBuf;

use crate::constants::CONFIG_FILE;
use crate::error::{Error, Result};

/// Sample config with one `example` command renaming `text.txt` after its `name` param.
pub fn default_config() -> serde_json::Value {
    json!({
        "commands": {
            "example": {
                "params": {
                    "name": "Whats the name of the file (without extension)?"
                },
                "create": [
                    {
                        "sourcePath": "text.txt",
                        "destinationPath": ".",
                        "brackets": false,
                        "replaceNames": {
                            "text": "{name}"
                        }
                    }
                ]
            }
        }
    })
}

/// Writes the default config file into the working directory.
#[derive(Debug)]
pub struct InitCommand {
    working_dir: PathBuf,
}

impl Default for InitCommand {
    fn default() -> Self {
        InitCommand::new()
    }
}

impl InitCommand {
    pub fn new() -> Self {
        Self { working_dir: std::env::current_dir().unwrap_or_default() }
    }

    pub fn with_working_dir<P: Into<PathBuf>>(mut self, working_dir: P) -> Self {
        self.working_dir = working_dir.into();
        self
    }

    pub fn config_path(&self) -> PathBuf {
        self.working_dir.join(CONFIG_FILE)
    }

    /// # Returns
    /// * `Result<PathBuf>` - Path of the written config file
    ///
    /// # Errors
    /// * `Error::AlreadyExists` if the config file already exists
    pub fn run(&self) -> Result<PathBuf> {
        let config_path = self.config_path();
        if config_path.exists() {
            return Err(Error::AlreadyExists {
                message: "The config file already exists".to_string(),
                path: config_path,
            });
        }

        debug!("Writing default configuration to {}", config_path.display());
        fs::write(&config_path, serde_json::to_string_pretty(&default_config())?)?;
        Ok(config_path)
    }
}

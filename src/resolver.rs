//! Resolution of the templates folder, the template source and the destination of a run.
//! Every check here happens before anything is written.

use indexmap::IndexMap;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use crate::constants::TIMESTAMP_TOKEN;
use crate::error::{Error, Result};
use crate::options::{CreateOptions, Replacement};
use crate::replace::{Pieces, TextReplacer};

/// Absolute paths computed for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub templates_folder: PathBuf,
    pub source: PathBuf,
    pub destination: PathBuf,
}

/// Everything a run needs once validation succeeded.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub paths: ResolvedPaths,
    pub names: NameRewriter,
    pub content: TextReplacer,
}

/// Computes new names for the items of a template.
///
/// The timestamp token is substituted first, then the user supplied name replacements.
#[derive(Debug, Clone)]
pub struct NameRewriter {
    timestamp: TextReplacer,
    names: TextReplacer,
}

impl NameRewriter {
    pub fn new(timestamp: u128, replace_names: &[Replacement], brackets: bool) -> Result<Self> {
        let mut timestamp_pieces = Pieces::new();
        timestamp_pieces.insert(TIMESTAMP_TOKEN.to_string(), timestamp.to_string());

        Ok(Self {
            timestamp: TextReplacer::new(timestamp_pieces)?,
            names: TextReplacer::from_pairs(
                replace_names.iter().map(|r| (r.key.as_str(), r.value.as_str())),
                brackets,
            )?,
        })
    }

    pub fn rename(&self, name: &str) -> String {
        self.names.replace(&self.timestamp.replace(name))
    }
}

/// Resolves source and destination of a run relative to a working directory.
pub struct PathResolver<'a> {
    working_dir: &'a Path,
    source: &'a str,
    destination: &'a str,
    options: &'a CreateOptions,
}

impl<'a> PathResolver<'a> {
    pub fn new(
        working_dir: &'a Path,
        source: &'a str,
        destination: &'a str,
        options: &'a CreateOptions,
    ) -> Self {
        Self { working_dir, source, destination, options }
    }

    /// Runs every check of a creation run except the misused options one, in order:
    /// templates folder, source, replacement syntax, timestamp conflicts, destination.
    ///
    /// # Errors
    /// * `Error::NotFound` if the templates folder or the source does not exist
    /// * `Error::SyntaxError` if replacement tokens are malformed
    /// * `Error::MisusedOptions` if `name` is set and the template uses the timestamp token
    /// * `Error::AlreadyExists` if the destination exists
    pub fn resolve(&self, timestamp: u128) -> Result<Resolution> {
        let templates_folder = self.templates_folder_path()?;
        let source = self.source_path(&templates_folder)?;

        let replace_names = self.options.parsed_replace_names()?.unwrap_or_default();
        let replace_content = self.options.parsed_replace_content()?;

        let base_name = base_name(self.source);
        self.check_timestamp_conflict(&base_name, &source)?;

        let names = NameRewriter::new(timestamp, &replace_names, self.options.brackets)?;
        let final_name = if self.options.has_name() {
            self.options.name.clone()
        } else {
            names.rename(&base_name)
        };
        let destination = self.destination_path(&final_name)?;

        // Brackets are only ever required around name keys.
        let content = TextReplacer::from_pairs(
            replace_content.iter().map(|r| (r.key.as_str(), r.value.as_str())),
            false,
        )?;

        Ok(Resolution {
            paths: ResolvedPaths { templates_folder, source, destination },
            names,
            content,
        })
    }

    fn templates_folder_path(&self) -> Result<PathBuf> {
        let path = normalize_path(self.working_dir.join(&self.options.templates_folder));
        if !path.exists() {
            return Err(Error::NotFound {
                message: format!("The {} folder does not exist", path.display()),
                path,
            });
        }
        Ok(path)
    }

    fn source_path(&self, templates_folder: &Path) -> Result<PathBuf> {
        let path = normalize_path(templates_folder.join(self.source));
        if !path.exists() {
            return Err(Error::NotFound { message: format!("{} not found", path.display()), path });
        }
        Ok(path)
    }

    fn check_timestamp_conflict(&self, base_name: &str, source: &Path) -> Result<()> {
        if !self.options.has_name() {
            return Ok(());
        }

        let mut uses_timestamp = base_name.contains(TIMESTAMP_TOKEN);
        if !uses_timestamp && source.is_dir() {
            for entry in WalkDir::new(source).min_depth(1) {
                if entry?.file_name().to_string_lossy().contains(TIMESTAMP_TOKEN) {
                    uses_timestamp = true;
                    break;
                }
            }
        }

        if uses_timestamp {
            let mut options = IndexMap::new();
            options.insert("name".to_string(), self.options.name.clone());
            options.insert("source".to_string(), self.source.to_string());
            return Err(Error::MisusedOptions {
                message: format!(
                    "The --name option cannot be used with a template whose names contain \
                     the {TIMESTAMP_TOKEN} token"
                ),
                options,
            });
        }
        Ok(())
    }

    fn destination_path(&self, final_name: &str) -> Result<PathBuf> {
        let path = normalize_path(self.working_dir.join(self.destination).join(final_name));
        if path.exists() {
            return Err(Error::AlreadyExists {
                message: format!("Cannot create {} because it already exists", path.display()),
                path,
            });
        }
        Ok(path)
    }
}

/// Last segment of a template source, e.g. `docs` for `nested/docs`.
pub fn base_name(source: &str) -> String {
    Path::new(source)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.to_string())
}

/// Lexically removes `.` and `..` components.
pub fn normalize_path<P: AsRef<Path>>(path: P) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.as_ref().components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }

    normalized
}

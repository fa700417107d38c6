//! Creation of files and folders from a template.
//! A `CreateCommand` validates its options and paths, then materializes a single file or
//! a whole folder tree and records every created entity in creation order.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use walkdir::WalkDir;

use crate::encoding::ContentEncoding;
use crate::error::{Error, Result};
use crate::options::{CreateOptions, PartialCreateOptions};
use crate::replace::TextReplacer;
use crate::resolver::{NameRewriter, PathResolver, Resolution};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreationKind {
    File,
    Folder,
}

impl fmt::Display for CreationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreationKind::File => write!(f, "File"),
            CreationKind::Folder => write!(f, "Folder"),
        }
    }
}

/// One created file or folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationResult {
    pub kind: CreationKind,
    pub source_path: PathBuf,
    pub destination_path: PathBuf,
}

impl CreationResult {
    pub fn file<S: Into<PathBuf>, D: Into<PathBuf>>(source_path: S, destination_path: D) -> Self {
        Self {
            kind: CreationKind::File,
            source_path: source_path.into(),
            destination_path: destination_path.into(),
        }
    }

    pub fn folder<S: Into<PathBuf>, D: Into<PathBuf>>(source_path: S, destination_path: D) -> Self {
        Self {
            kind: CreationKind::Folder,
            source_path: source_path.into(),
            destination_path: destination_path.into(),
        }
    }
}

/// Creates `destination/<name>` from `<templates folder>/source`.
#[derive(Debug)]
pub struct CreateCommand {
    source: String,
    destination: String,
    options: CreateOptions,
    working_dir: PathBuf,
    results: Vec<CreationResult>,
}

impl CreateCommand {
    /// Creates a command resolving paths against the process working directory.
    pub fn new<S: Into<String>, D: Into<String>>(
        source: S,
        destination: D,
        options: PartialCreateOptions,
    ) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            options: CreateOptions::resolve(options),
            working_dir: std::env::current_dir().unwrap_or_default(),
            results: Vec::new(),
        }
    }

    /// Resolves the templates folder and the destination against `working_dir` instead.
    pub fn with_working_dir<P: Into<PathBuf>>(mut self, working_dir: P) -> Self {
        self.working_dir = working_dir.into();
        self
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn options(&self) -> &CreateOptions {
        &self.options
    }

    pub fn change_options(&mut self, options: PartialCreateOptions) {
        self.options = self.options.clone().merge(options);
    }

    pub fn reset_options(&mut self) {
        self.options = CreateOptions::default();
    }

    /// Runs the command with the current time as the value of the timestamp token.
    ///
    /// # Errors
    /// See [`CreateCommand::run_at`].
    pub fn run(&mut self) -> Result<Vec<CreationResult>> {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis())
            .unwrap_or_default();
        self.run_at(timestamp)
    }

    /// Runs the command, substituting the timestamp token with `timestamp`.
    ///
    /// Results of earlier runs are discarded. Nothing is written unless every check
    /// passes; a failure after the first write leaves what was already created in place.
    ///
    /// # Errors
    /// * `Error::MisusedOptions`, `Error::NotFound`, `Error::SyntaxError`,
    ///   `Error::AlreadyExists` from validation
    /// * `Error::UnsupportedSource` if the source is neither a file nor a folder
    /// * `Error::NotFound` if the source folder is empty
    /// * `Error::IoError` / `Error::WalkDirError` on filesystem failures
    pub fn run_at(&mut self, timestamp: u128) -> Result<Vec<CreationResult>> {
        self.results.clear();
        self.options.check_misused()?;

        let resolution =
            PathResolver::new(&self.working_dir, &self.source, &self.destination, &self.options)
                .resolve(timestamp)?;

        let file_type = fs::symlink_metadata(&resolution.paths.source)?.file_type();
        if file_type.is_dir() {
            self.create_folder(&resolution)?;
        } else if file_type.is_file() {
            let Resolution { paths, content, .. } = &resolution;
            self.create_file(&paths.source, &paths.destination, content)?;
        } else {
            return Err(Error::UnsupportedSource { path: resolution.paths.source });
        }

        Ok(self.results.clone())
    }

    /// Results of the last run.
    pub fn results(&self) -> &[CreationResult] {
        &self.results
    }

    fn create_folder(&mut self, resolution: &Resolution) -> Result<()> {
        let Resolution { paths, names, content } = resolution;

        if fs::read_dir(&paths.source)?.next().is_none() {
            return Err(Error::NotFound {
                message: format!("No files found at {}", paths.source.display()),
                path: paths.source.clone(),
            });
        }

        fs::create_dir(&paths.destination)?;
        self.results.push(CreationResult::folder(&paths.source, &paths.destination));

        // Pre-order walk: a folder is yielded before its children, siblings by file name.
        for entry in WalkDir::new(&paths.source).min_depth(1).sort_by_file_name() {
            let entry = entry?;
            let target = target_path(entry.path(), &paths.source, &paths.destination, names);
            let file_type = entry.file_type();

            if file_type.is_dir() {
                fs::create_dir(&target)?;
                self.results.push(CreationResult::folder(entry.path(), &target));
            } else if file_type.is_file() {
                self.create_file(entry.path(), &target, content)?;
            }
            // Anything else inside a template folder is skipped.
        }
        Ok(())
    }

    fn create_file(&mut self, source: &Path, target: &Path, content: &TextReplacer) -> Result<()> {
        let contents = render_file(source, content, self.options.encoding)?;
        fs::write(target, contents)?;
        self.results.push(CreationResult::file(source, target));
        Ok(())
    }
}

/// Destination of `path`, every component below `source_root` renamed.
fn target_path(path: &Path, source_root: &Path, target_root: &Path, names: &NameRewriter) -> PathBuf {
    let relative = path.strip_prefix(source_root).unwrap_or(path);
    relative.components().fold(target_root.to_path_buf(), |target, component| {
        target.join(names.rename(&component.as_os_str().to_string_lossy()))
    })
}

/// Decodes the file, applies content replacements and renders it in `encoding`.
fn render_file(path: &Path, content: &TextReplacer, encoding: ContentEncoding) -> Result<String> {
    let bytes = fs::read(path)?;
    let text = String::from_utf8_lossy(&bytes);
    let text = if content.is_empty() { text.into_owned() } else { content.replace(&text) };
    Ok(encoding.encode(text.as_bytes()))
}

//! Command-line interface implementation for cpf.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};

use crate::encoding::ContentEncoding;
use crate::options::PartialCreateOptions;

/// Command-line arguments structure for cpf.
#[derive(Parser, Debug)]
#[command(author, version, about = "cpf: create files and folders from templates", long_about = None)]
pub struct Args {
    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Creates a file or folder based on the <SOURCE> at <DESTINATION>
    Create(CreateArgs),

    /// Runs a command defined in the config file
    Run(RunArgs),

    /// Creates a config file with an example command
    Init,
}

#[derive(clap::Args, Debug)]
pub struct CreateArgs {
    /// Template file or folder, relative to the templates folder
    #[arg(value_name = "SOURCE")]
    pub source: String,

    /// Folder the file or folder is created in
    #[arg(value_name = "DESTINATION")]
    pub destination: String,

    /// Changes the name of the created file or folder
    #[arg(short, long)]
    pub name: Option<String>,

    /// Path to the templates folder
    #[arg(short, long, value_name = "PATH")]
    pub templates_folder: Option<String>,

    /// Encoding the content of the created files is written in
    #[arg(short, long)]
    pub encoding: Option<ContentEncoding>,

    /// Replaces parts of the names of the created files and folders
    #[arg(short = 'r', long, num_args = 1.., value_name = "KEY=NAME")]
    pub replace_names: Option<Vec<String>>,

    /// Replaces parts of the content of the created files
    #[arg(short = 'c', long, num_args = 1.., value_name = "KEY=TEXT")]
    pub replace_content: Option<Vec<String>>,

    /// Makes brackets around replacement keys not required
    #[arg(short = 'b', long)]
    pub no_brackets: bool,
}

impl CreateArgs {
    pub fn options(&self) -> PartialCreateOptions {
        PartialCreateOptions {
            name: self.name.clone(),
            templates_folder: self.templates_folder.clone(),
            encoding: self.encoding,
            replace_names: self.replace_names.clone(),
            replace_content: self.replace_content.clone(),
            brackets: self.no_brackets.then_some(false),
            key_value_separator: None,
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct RunArgs {
    /// Command name, as declared in the config file
    #[arg(value_name = "COMMAND")]
    pub command: String,

    /// Values of the params declared for the command, in order
    #[arg(value_name = "PARAMS")]
    pub params: Vec<String>,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 and the help text if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument
                || e.kind() == ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            {
                if let Err(err) = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help()
                {
                    eprintln!("Cannot print help: {err}");
                }
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}

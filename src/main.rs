//! cpf's main application entry point.
//! Parses the command line, dispatches to the create, run or init command and prints
//! what was created.

use cpf::{
    cli::{get_args, Args, Commands},
    creator::CreateCommand,
    error::{default_error_handler, Result},
    init::InitCommand,
    logger::init_logger,
    report::print_results,
    runner::RunCommand,
};
use log::debug;

/// Main application entry point.
fn main() {
    let args = get_args();

    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

fn run(args: Args) -> Result<()> {
    match args.command {
        Commands::Create(create) => {
            let options = create.options();
            debug!("Creating '{}' at '{}' with {:?}", create.source, create.destination, options);

            let results = CreateCommand::new(create.source, create.destination, options).run()?;
            print_results(&results);
        }
        Commands::Run(named) => {
            debug!("Running command '{}' with params {:?}", named.command, named.params);

            let results = RunCommand::new(named.command, named.params).run()?;
            print_results(&results);
        }
        Commands::Init => {
            let config_path = InitCommand::new().run()?;
            println!("Config file created at {}", config_path.display());
        }
    }
    Ok(())
}

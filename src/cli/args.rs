use crate::constants::{exit_codes, scripts, verbosity};
use crate::{creator::CreateOptions, launcher::ServeOptions};
use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};
use log::LevelFilter;

const HELP_TEMPLATE: &str = r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#;

/// CLI arguments for Hydra.
#[derive(Parser, Debug)]
#[command(name = "hydra", author, version, about, long_about = None)]
pub struct Cli {
    /// Increase logging verbosity (`-v`, `-vv`, `-vvv`).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a Hydra App
    Create(CreateArgs),
    /// Start the Hydra server
    Serve(ServeArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct CreateArgs {
    /// Name of the directory to create the app in.
    #[arg(value_name = "NAMESPACE")]
    pub namespace: Option<String>,

    /// Force creation even if directory exists.
    #[arg(short, long)]
    pub force: bool,
}

impl From<CreateArgs> for CreateOptions {
    fn from(args: CreateArgs) -> Self {
        Self { namespace: args.namespace, force: args.force }
    }
}

#[derive(clap::Args, Debug, Clone)]
pub struct ServeArgs {
    /// Specify the npm script to run.
    #[arg(short, long, default_value = scripts::DEFAULT)]
    pub script: String,

    /// Run in development mode.
    #[arg(short, long)]
    pub dev: bool,
}

impl From<ServeArgs> for ServeOptions {
    fn from(args: ServeArgs) -> Self {
        Self { script: args.script, dev: args.dev }
    }
}

/// Parse command line arguments; a missing subcommand prints help and exits 1.
pub fn parse_cli() -> Cli {
    Cli::try_parse().unwrap_or_else(|e| {
        if matches!(
            e.kind(),
            ErrorKind::MissingSubcommand
                | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
        ) {
            let mut command = Cli::command().help_template(HELP_TEMPLATE);
            if let Err(print_err) = command.print_help() {
                eprintln!("Failed to display help information: {print_err}");
            } else {
                println!();
            }
            std::process::exit(exit_codes::FAILURE);
        } else {
            e.exit();
        }
    })
}

/// Map `-v` counts to the appropriate log level.
pub fn get_log_level_from_verbose(verbose_count: u8) -> LevelFilter {
    match verbose_count {
        verbosity::OFF => LevelFilter::Error,
        verbosity::INFO => LevelFilter::Info,
        verbosity::DEBUG => LevelFilter::Debug,
        verbosity::TRACE.. => LevelFilter::Trace,
    }
}

use crate::{
    cli::{Cli, Commands, CreateArgs, ServeArgs},
    config::Settings,
    constants::exit_codes,
    creator::Creator,
    error::Result,
    ioutils::{FileSystem, LocalFileSystem},
    launcher::{CommandLauncher, Launcher, ProcessLauncher},
    loader::{GitCloner, RepositoryCloner},
};
use std::path::PathBuf;

/// Wires the command handlers to their collaborators and the working directory.
pub struct Runner<'a> {
    cwd: PathBuf,
    settings: Settings,
    cloner: &'a dyn RepositoryCloner,
    fs: &'a dyn FileSystem,
    process: &'a dyn ProcessLauncher,
}

impl<'a> Runner<'a> {
    pub fn new(
        cwd: PathBuf,
        settings: Settings,
        cloner: &'a dyn RepositoryCloner,
        fs: &'a dyn FileSystem,
        process: &'a dyn ProcessLauncher,
    ) -> Self {
        Self { cwd, settings, cloner, fs, process }
    }

    /// Executes one command and returns the exit code the process should end with.
    pub fn run(&self, command: Commands) -> Result<i32> {
        match command {
            Commands::Create(args) => self.create(args),
            Commands::Serve(args) => self.serve(args),
        }
    }

    fn create(&self, args: CreateArgs) -> Result<i32> {
        println!("Creating a new Hydra app...");
        let creator = Creator::new(self.cloner, self.fs, &self.settings);
        let layout = creator.create(&self.cwd, &args.into())?;
        println!("Project {} generated successfully.", layout.namespace);
        Ok(exit_codes::SUCCESS)
    }

    fn serve(&self, args: ServeArgs) -> Result<i32> {
        let launcher = Launcher::new(self.process, &self.settings);
        let plan = launcher.prepare(&self.cwd, &args.into())?;
        println!("Application integrity check passed.");
        println!("Running npm script: {}", plan.script);
        let code = launcher.launch(&plan)?;
        println!("npm script exited with code {code}");
        Ok(code)
    }
}

/// Main entry point for CLI execution
pub fn run(cli: Cli) -> Result<i32> {
    let cwd = std::env::current_dir()?;
    let runner = Runner::new(
        cwd,
        Settings::default(),
        &GitCloner,
        &LocalFileSystem,
        &CommandLauncher,
    );
    runner.run(cli.command)
}

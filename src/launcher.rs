//! Runs a script of a generated project through the package-script runner.

use crate::{
    config::Settings,
    constants::{exit_codes, PACKAGE_RUNNER},
    error::{Error, Result},
    manifest::Manifest,
};
use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

/// Spawns a child process and waits for it.
pub trait ProcessLauncher {
    /// Runs `program` in `cwd` with inherited stdio and returns its exit code.
    ///
    /// # Errors
    /// * `Error::LaunchFailed` if the process cannot be started or awaited
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<i32>;
}

/// [`ProcessLauncher`] backed by [`std::process::Command`].
#[derive(Debug, Default, Clone, Copy)]
pub struct CommandLauncher;

impl ProcessLauncher for CommandLauncher {
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<i32> {
        log::debug!("Spawning {program} {args:?} in '{}'", cwd.display());

        let launch_failed = |e: std::io::Error| Error::LaunchFailed {
            program: program.to_string(),
            e,
        };

        let mut child = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(launch_failed)?;

        let status = child.wait().map_err(launch_failed)?;
        Ok(exit_code(status))
    }
}

/// Maps a child's status to the code the parent should exit with.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return exit_codes::SIGNAL_BASE + signal;
        }
    }
    exit_codes::FAILURE
}

/// Options accepted by `serve`.
#[derive(Debug, Clone, PartialEq)]
pub struct ServeOptions {
    /// Script to run when `dev` is unset.
    pub script: String,
    /// Run the dev script instead.
    pub dev: bool,
}

impl Default for ServeOptions {
    fn default() -> Self {
        Self { script: crate::constants::scripts::DEFAULT.to_string(), dev: false }
    }
}

impl ServeOptions {
    pub fn resolved_script<'s>(&'s self, settings: &'s Settings) -> &'s str {
        if self.dev {
            &settings.dev_script
        } else {
            &self.script
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchState {
    Idle,
    Validating,
    Launching,
    Running,
    Terminated,
}

impl std::fmt::Display for LaunchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LaunchState::Idle => "idle",
            LaunchState::Validating => "validating",
            LaunchState::Launching => "launching",
            LaunchState::Running => "running",
            LaunchState::Terminated => "terminated",
        };
        write!(f, "{s}")
    }
}

/// A validated request to run one script.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchPlan {
    pub script: String,
    pub program: String,
    pub args: Vec<String>,
    pub project_dir: PathBuf,
}

/// `serve` command handler.
pub struct Launcher<'a> {
    process: &'a dyn ProcessLauncher,
    settings: &'a Settings,
    state: Cell<LaunchState>,
}

impl<'a> Launcher<'a> {
    pub fn new(process: &'a dyn ProcessLauncher, settings: &'a Settings) -> Self {
        Self { process, settings, state: Cell::new(LaunchState::Idle) }
    }

    pub fn state(&self) -> LaunchState {
        self.state.get()
    }

    fn transition(&self, next: LaunchState) {
        log::debug!("Launcher state: {} -> {next}", self.state.get());
        self.state.set(next);
    }

    /// Checks that `project_dir` holds a runnable Hydra app.
    ///
    /// # Errors
    /// * `Error::NotAProject` if there is no manifest
    /// * `Error::ManifestParseError` if the manifest is malformed
    /// * `Error::ScriptNotFound` if the resolved script is not declared
    /// * `Error::MissingDependency` listing every absent required package
    pub fn prepare(&self, project_dir: &Path, options: &ServeOptions) -> Result<LaunchPlan> {
        self.transition(LaunchState::Validating);

        let manifest_path = project_dir.join(&self.settings.manifest_file);
        let manifest = Manifest::load(&manifest_path)?;
        log::debug!("Loaded manifest for {}", manifest.describe());

        let script = options.resolved_script(self.settings);
        if manifest.script(script).is_none() {
            return Err(Error::ScriptNotFound {
                script: script.to_string(),
                manifest: self.settings.manifest_file.clone(),
            });
        }

        let missing = manifest.missing_dependencies(&self.settings.required_dependencies);
        if !missing.is_empty() {
            return Err(Error::MissingDependency { missing });
        }

        Ok(LaunchPlan {
            script: script.to_string(),
            program: PACKAGE_RUNNER.to_string(),
            args: vec!["run".to_string(), script.to_string()],
            project_dir: project_dir.to_path_buf(),
        })
    }

    /// Runs a prepared plan and returns the child's exit code.
    pub fn launch(&self, plan: &LaunchPlan) -> Result<i32> {
        self.transition(LaunchState::Launching);
        self.transition(LaunchState::Running);
        let code = self.process.run(&plan.program, &plan.args, &plan.project_dir)?;
        self.transition(LaunchState::Terminated);
        log::debug!("{} exited with code {code}", plan.program);
        Ok(code)
    }

    /// Validates `project_dir` and runs the resolved script.
    pub fn serve(&self, project_dir: &Path, options: &ServeOptions) -> Result<i32> {
        let plan = self.prepare(project_dir, options)?;
        self.launch(&plan)
    }
}

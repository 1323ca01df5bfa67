/// Handles argument parsing and command dispatch.
pub mod cli;

/// Fixed configuration shared by the commands.
pub mod config;

/// Constants used throughout the crate.
pub mod constants;

/// Project materialization for `hydra create`.
pub mod creator;

/// Defines custom error types.
pub mod error;

/// A set of helpers for working with the file system.
pub mod ioutils;

/// Script launching for `hydra serve`.
pub mod launcher;

/// Clones template repositories.
pub mod loader;

/// Reads the generated project's `package.json`.
pub mod manifest;

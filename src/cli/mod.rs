//! Command-line interface

pub mod commands;
pub mod output;

use clap::builder::BoolValueParser;
use clap::{Parser, Subcommand};
use commands::{RunCommand, ValidateCommand};
use std::ffi::OsString;
use std::path::PathBuf;

/// Release branch automation for CI
#[derive(Debug, Parser, Clone)]
#[command(name = "release-pipeline")]
#[command(author = "Release Pipeline Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Cut a release branch, bump the version and generate the changelog", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbose logging; also passed to branch creation as --verbose
    ///
    /// From the environment only the exact values `true` and `false` are accepted.
    #[arg(short, long, global = true, env = "INPUT_VERBOSE", value_parser = BoolValueParser::new())]
    pub verbose: bool,

    /// Path to a YAML settings file
    #[arg(short, long, value_name = "FILE", global = true, env = "INPUT_SETTINGS")]
    pub settings: Option<PathBuf>,
}

/// Available commands
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run the release pipeline
    Run(RunCommand),

    /// Validate inputs and show what would run
    Validate(ValidateCommand),
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }
}

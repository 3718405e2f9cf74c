//! Core domain models for a release run
//!
//! Configuration, the execution context handed to collaborators, the
//! artifacts they leave behind, and the state of a run.

pub mod artifact;
pub mod config;
pub mod context;
pub mod error;
pub mod release;
pub mod settings;
pub mod state;

pub use artifact::*;
pub use config::*;
pub use context::*;
pub use error::PipelineError;
pub use release::*;
pub use settings::Settings;
pub use state::*;

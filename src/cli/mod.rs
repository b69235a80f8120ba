//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, signal handling,
//! and the server runner.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod presenter;
pub mod signals;

// Re-export commonly used types
pub use app::{
    load_merged_config, resolve_credentials, run_server, ServeOptions, EXIT_ERROR, EXIT_SUCCESS,
};
pub use args::{Cli, Commands, ConfigAction};
pub use presenter::Presenter;

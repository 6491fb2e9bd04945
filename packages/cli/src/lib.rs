//! Katameros CLI - batch tools over a corpus of liturgical YAML files.
//!
//! Each subcommand walks a file or directory, runs one core transformation
//! per document and reports every failure at the end instead of stopping at
//! the first one.
//!
//! # Example
//!
//! ```
//! use katameros_cli::config;
//!
//! let registry = config::parse_registry(config::DEFAULT_LANGUAGES).unwrap();
//! assert_eq!(registry.languages().len(), 4);
//! assert!(config::validate_language_code("co-en").is_ok());
//! ```
//!
//! # Architecture
//!
//! - [`cli`]: Argument parsing, progress display and failure report
//! - [`commands`]: One function per subcommand, operating on a single file
//! - [`config`]: Constants and language code validation
//! - [`paths`]: Language file naming and file discovery
//! - [`yaml`]: YAML/JSON loading and atomic writes
//! - [`error`]: Error types and Result alias

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod paths;
pub mod yaml;

// Re-export commonly used items
pub use config::{parse_registry, validate_language_code};
pub use error::{CliError, Result};

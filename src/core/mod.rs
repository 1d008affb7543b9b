//! Core functionality for the clear-navigator tool.
//!
//! This module provides the version-control metadata layer: process execution, the
//! `describe` fetcher, the TTL cache and the state predicates built on it, plus the
//! configuration, prompting and output building blocks used by the commands.

pub mod cache;
pub mod colors;
pub mod config;
pub mod describe;
pub mod dirs;
pub mod element;
pub mod error;
pub mod executor;
pub mod output;
pub mod panel;
pub mod paths;
pub mod prompt;
pub mod query;

// === Error handling ===
pub use error::{ClearNavigatorError, Result};

// === Process execution ===
// Captured and detached runs of external tools
pub use executor::{command_line, CommandExecutor, CommandOutput, SystemExecutor};

// === Element metadata ===
// One describe query per path, parsed into a record and cached with a TTL
pub use cache::MetadataCache;
pub use describe::{Describer, DescribeField, ElementFetcher};
pub use element::{ElementRecord, ElementState, ReservationKind};
pub use query::StateQuery;

// === Configuration ===
pub use config::Config;

// === Interaction and output ===
pub use panel::OutputPanel;
pub use prompt::{Choice, Prompt, Prompter, Response, ScriptedPrompter, TerminalPrompter};

// === Color system ===
pub use colors::{get_aligned_state, get_colored_path, get_state_color_style};

// === Output formatting ===
pub use output::{print_error, print_info, print_section_header, print_success};

//! Clear Navigator - ClearCase checkout, checkin and diff commands for editor integration.
//!
//! The library keeps a short-lived cache of element state reported by `cleartool describe`
//! so that the many enablement checks an editor makes do not each start a process. Commands
//! (checkout, checkin, undo checkout, add, diff, find checkouts, version tree) read through
//! that cache, collect any user input, and run the tool.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] and [`commands`] modules:
//! - Element records, the metadata cache and state predicates
//! - The command orchestrator and its intent table
//! - Error handling and result types

pub mod commands;
pub mod core;

// Re-export the public API for external users
pub use crate::commands::{CheckoutMode, CommandIntent, CommandState, Orchestrator, PendingCommand};
pub use crate::core::{
    // Error handling
    ClearNavigatorError,
    Result,

    // Metadata layer
    Config,
    ElementRecord,
    ElementState,
    MetadataCache,
    StateQuery,

    // Process execution
    CommandExecutor,
    SystemExecutor,

    // Interaction and output
    OutputPanel,
    Prompter,
    ScriptedPrompter,
    TerminalPrompter,
};

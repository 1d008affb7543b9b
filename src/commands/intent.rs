//! Command intents and their behaviour table.
//!
//! Each [`CommandIntent`] maps to one [`IntentSpec`]: the precondition every target must
//! satisfy, the interaction needed before dispatch, how the process is launched, and how
//! its argument vector is assembled. Checkout variants differ only by [`CheckoutMode`].

use crate::core::{
    config::Config,
    error::{ClearNavigatorError, Result},
    query::StateQuery,
};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckoutMode {
    Reserved,
    Unreserved,
}

impl CheckoutMode {
    pub fn switch(self) -> &'static str {
        match self {
            CheckoutMode::Reserved => "-reserved",
            CheckoutMode::Unreserved => "-unreserved",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandIntent {
    Checkout(CheckoutMode),
    Checkin,
    UndoCheckout,
    Add,
    Diff,
    FindCheckouts,
    VersionTree,
}

/// Per-path precondition evaluated through the state facade
pub type Precondition = fn(&mut StateQuery<'_>, &Path) -> Result<bool>;

/// Builds the argument vector for one launch
pub type ArgvBuilder = fn(&ArgvContext<'_>) -> Vec<String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    None,
    /// Free-text comment, optionally pre-filled with the first target's current comment
    Comment { prefill: bool },
    /// Yes keeps a copy of the changes, no discards them, cancel aborts
    KeepOrDiscard,
    /// Only yes proceeds
    Confirm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// One captured run over all targets, shown in the output panel
    Captured,
    /// One detached viewer per target
    DetachedPerPath { with_predecessor: bool },
    /// One detached viewer for all targets
    DetachedBatch,
}

pub struct IntentSpec {
    pub precondition: Precondition,
    pub interaction: Interaction,
    pub dispatch: Dispatch,
    pub argv: ArgvBuilder,
}

/// Answer collected during the interactive step
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Reply {
    #[default]
    None,
    Comment(String),
    Keep(bool),
}

impl Reply {
    pub fn comment(&self) -> &str {
        match self {
            Reply::Comment(text) => text,
            _ => "",
        }
    }
}

pub struct ArgvContext<'a> {
    pub config: &'a Config,
    pub reply: &'a Reply,
    pub paths: &'a [PathBuf],
    pub predecessor: Option<&'a str>,
}

impl ArgvContext<'_> {
    fn tool(&self, args: &[&str]) -> Vec<String> {
        let mut argv = Vec::with_capacity(1 + args.len() + self.paths.len());
        argv.push(self.config.tool_path.clone());
        argv.extend(args.iter().map(|s| s.to_string()));
        argv.extend(self.paths_as_args());
        argv
    }

    fn paths_as_args(&self) -> impl Iterator<Item = String> + '_ {
        self.paths.iter().map(|p| p.to_string_lossy().into_owned())
    }
}

impl CommandIntent {
    pub const ALL: [CommandIntent; 8] = [
        CommandIntent::Checkout(CheckoutMode::Reserved),
        CommandIntent::Checkout(CheckoutMode::Unreserved),
        CommandIntent::Checkin,
        CommandIntent::UndoCheckout,
        CommandIntent::Add,
        CommandIntent::Diff,
        CommandIntent::FindCheckouts,
        CommandIntent::VersionTree,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CommandIntent::Checkout(CheckoutMode::Reserved) => "checkout",
            CommandIntent::Checkout(CheckoutMode::Unreserved) => "checkout-unreserved",
            CommandIntent::Checkin => "checkin",
            CommandIntent::UndoCheckout => "unco",
            CommandIntent::Add => "add",
            CommandIntent::Diff => "diff",
            CommandIntent::FindCheckouts => "find-checkouts",
            CommandIntent::VersionTree => "vtree",
        }
    }

    pub fn spec(self) -> IntentSpec {
        match self {
            CommandIntent::Checkout(CheckoutMode::Reserved) => IntentSpec {
                precondition: can_check_out,
                interaction: Interaction::Comment { prefill: false },
                dispatch: Dispatch::Captured,
                argv: checkout_reserved_argv,
            },
            CommandIntent::Checkout(CheckoutMode::Unreserved) => IntentSpec {
                precondition: can_check_out,
                interaction: Interaction::Comment { prefill: false },
                dispatch: Dispatch::Captured,
                argv: checkout_unreserved_argv,
            },
            CommandIntent::Checkin => IntentSpec {
                precondition: is_checked_out,
                interaction: Interaction::Comment { prefill: true },
                dispatch: Dispatch::Captured,
                argv: checkin_argv,
            },
            CommandIntent::UndoCheckout => IntentSpec {
                precondition: is_checked_out,
                interaction: Interaction::KeepOrDiscard,
                dispatch: Dispatch::Captured,
                argv: unco_argv,
            },
            CommandIntent::Add => IntentSpec {
                precondition: is_private,
                interaction: Interaction::Confirm,
                dispatch: Dispatch::Captured,
                argv: mkelem_argv,
            },
            CommandIntent::Diff => IntentSpec {
                precondition: is_versioned,
                interaction: Interaction::None,
                dispatch: Dispatch::DetachedPerPath {
                    with_predecessor: true,
                },
                argv: diff_argv,
            },
            CommandIntent::FindCheckouts => IntentSpec {
                precondition: is_directory,
                interaction: Interaction::None,
                dispatch: Dispatch::DetachedBatch,
                argv: find_checkouts_argv,
            },
            CommandIntent::VersionTree => IntentSpec {
                precondition: is_versioned,
                interaction: Interaction::None,
                dispatch: Dispatch::DetachedPerPath {
                    with_predecessor: false,
                },
                argv: vtree_argv,
            },
        }
    }
}

impl fmt::Display for CommandIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CommandIntent {
    type Err = ClearNavigatorError;

    fn from_str(s: &str) -> Result<Self> {
        CommandIntent::ALL
            .into_iter()
            .find(|intent| intent.name() == s)
            .ok_or_else(|| ClearNavigatorError::unknown_command(s))
    }
}

// Preconditions

fn can_check_out(query: &mut StateQuery<'_>, path: &Path) -> Result<bool> {
    Ok(!query.is_private(path)? && !query.is_checked_out(path)?)
}

fn is_checked_out(query: &mut StateQuery<'_>, path: &Path) -> Result<bool> {
    query.is_checked_out(path)
}

fn is_private(query: &mut StateQuery<'_>, path: &Path) -> Result<bool> {
    query.is_private(path)
}

fn is_versioned(query: &mut StateQuery<'_>, path: &Path) -> Result<bool> {
    Ok(!query.is_private(path)?)
}

fn is_directory(query: &mut StateQuery<'_>, path: &Path) -> Result<bool> {
    query.is_directory(path)
}

// Argument vectors

fn checkout_argv(ctx: &ArgvContext<'_>, mode: CheckoutMode) -> Vec<String> {
    ctx.tool(&["co", mode.switch(), "-c", ctx.reply.comment()])
}

fn checkout_reserved_argv(ctx: &ArgvContext<'_>) -> Vec<String> {
    checkout_argv(ctx, CheckoutMode::Reserved)
}

fn checkout_unreserved_argv(ctx: &ArgvContext<'_>) -> Vec<String> {
    checkout_argv(ctx, CheckoutMode::Unreserved)
}

fn checkin_argv(ctx: &ArgvContext<'_>) -> Vec<String> {
    ctx.tool(&["ci", "-c", ctx.reply.comment()])
}

fn unco_argv(ctx: &ArgvContext<'_>) -> Vec<String> {
    let switch = match ctx.reply {
        Reply::Keep(true) => "-keep",
        _ => "-rm",
    };
    ctx.tool(&["unco", switch])
}

fn mkelem_argv(ctx: &ArgvContext<'_>) -> Vec<String> {
    ctx.tool(&["mkelem", "-mkpath", "-nc", "-nco"])
}

fn diff_argv(ctx: &ArgvContext<'_>) -> Vec<String> {
    let mut argv = vec![ctx.config.diff_tool.clone()];
    argv.extend(ctx.paths_as_args());
    argv.push(ctx.predecessor.unwrap_or_default().to_string());
    argv
}

fn find_checkouts_argv(ctx: &ArgvContext<'_>) -> Vec<String> {
    let mut argv = vec![ctx.config.find_checkouts_tool.clone()];
    argv.extend(ctx.paths_as_args());
    argv
}

fn vtree_argv(ctx: &ArgvContext<'_>) -> Vec<String> {
    ctx.tool(&["lsvtree", "-graphical"])
}

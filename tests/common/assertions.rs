//! Predicates for validating clear-navigator output

#![allow(dead_code)]

use predicates::prelude::*;

/// A captured run of the tool was shown in the output panel
pub fn ran(subcommand: &str) -> impl Predicate<str> {
    predicates::str::contains("Running: ").and(predicates::str::contains(format!("cleartool {subcommand}")))
}

/// Nothing was run
pub fn ran_nothing() -> impl Predicate<str> {
    predicates::str::contains("Running: ").not()
}

pub fn has_exit_code(code: i32) -> impl Predicate<str> {
    predicates::str::contains(format!("[exit code: {code}]"))
}

pub fn has_state(state: &str) -> impl Predicate<str> {
    predicates::str::contains(state.to_string())
}

pub fn disabled(command: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("'{command}' is not available"))
}

//! User interaction seam.
//!
//! Commands that need input suspend on a [`Prompt`] and resume with a [`Response`]. The
//! host supplies a [`Prompter`]: [`TerminalPrompter`] reads stdin, and
//! [`ScriptedPrompter`] answers from a queue (command-line flags and tests).

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// What a suspended command is waiting for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    /// Free-text comment, pre-filled with `initial`
    Comment { label: String, initial: String },
    /// Yes / no / cancel question
    Choice { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Yes,
    No,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Text(String),
    Choice(Choice),
    /// Prompt dismissed
    Cancel,
}

pub trait Prompter {
    fn ask(&mut self, prompt: &Prompt) -> Response;
}

/// Interactive prompts on stdin/stdout
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    fn read_line() -> Option<String> {
        io::stdout().flush().ok()?;
        let mut input = String::new();
        match io::stdin().lock().read_line(&mut input) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(input.trim_end_matches(['\r', '\n']).to_string()),
        }
    }
}

impl Prompter for TerminalPrompter {
    fn ask(&mut self, prompt: &Prompt) -> Response {
        match prompt {
            Prompt::Comment { label, initial } => {
                if initial.is_empty() {
                    print!("{label}: ");
                } else {
                    print!("{label} [{initial}]: ");
                }
                match Self::read_line() {
                    None => Response::Cancel,
                    Some(line) if line.is_empty() => Response::Text(initial.clone()),
                    Some(line) => Response::Text(line),
                }
            }
            Prompt::Choice { message } => {
                print!("{message}\n[y]es / [n]o / [c]ancel: ");
                match Self::read_line() {
                    None => Response::Cancel,
                    Some(line) => Response::Choice(parse_choice(&line)),
                }
            }
        }
    }
}

/// Anything that is not a clear yes or no cancels
pub fn parse_choice(input: &str) -> Choice {
    match input.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Choice::Yes,
        "n" | "no" => Choice::No,
        _ => Choice::Cancel,
    }
}

/// Answers prompts from a queue and records what was asked
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    responses: VecDeque<Response>,
    asked: Vec<Prompt>,
}

impl ScriptedPrompter {
    pub fn new(responses: impl IntoIterator<Item = Response>) -> Self {
        Self {
            responses: responses.into_iter().collect(),
            asked: Vec::new(),
        }
    }

    pub fn asked(&self) -> &[Prompt] {
        &self.asked
    }
}

impl Prompter for ScriptedPrompter {
    /// An exhausted queue cancels
    fn ask(&mut self, prompt: &Prompt) -> Response {
        self.asked.push(prompt.clone());
        self.responses.pop_front().unwrap_or(Response::Cancel)
    }
}

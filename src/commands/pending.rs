//! In-flight command state machine.
//!
//! ```text
//! AwaitingInput --answer--> Dispatching --dispatch--> Done
//!       |
//!       +--cancel--> Cancelled
//! ```
//!
//! Commands without an interactive step start in `Dispatching`. While a command waits
//! for input the host may keep running enablement checks against the same cache; nothing
//! here is re-validated before dispatch, and the tool rejects operations that became
//! invalid in the meantime.

use crate::commands::intent::{CommandIntent, Interaction, Reply};
use crate::core::{
    error::{ClearNavigatorError, Result},
    prompt::{Choice, Prompt, Response},
};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandState {
    AwaitingInput(Prompt),
    Dispatching,
    Done,
    Cancelled,
}

#[derive(Debug)]
pub struct PendingCommand {
    intent: CommandIntent,
    targets: Vec<PathBuf>,
    state: CommandState,
    reply: Reply,
}

impl PendingCommand {
    pub(crate) fn new(intent: CommandIntent, targets: Vec<PathBuf>, prompt: Option<Prompt>) -> Self {
        let state = match prompt {
            Some(prompt) => CommandState::AwaitingInput(prompt),
            None => CommandState::Dispatching,
        };
        Self {
            intent,
            targets,
            state,
            reply: Reply::None,
        }
    }

    pub fn intent(&self) -> CommandIntent {
        self.intent
    }

    pub fn targets(&self) -> &[PathBuf] {
        &self.targets
    }

    pub fn state(&self) -> &CommandState {
        &self.state
    }

    pub fn reply(&self) -> &Reply {
        &self.reply
    }

    /// The prompt this command is suspended on, if any
    pub fn prompt(&self) -> Option<&Prompt> {
        match &self.state {
            CommandState::AwaitingInput(prompt) => Some(prompt),
            _ => None,
        }
    }

    /// Deliver the user's answer. Moves to `Dispatching` or `Cancelled`.
    pub fn resume(&mut self, response: Response) -> Result<&CommandState> {
        if self.prompt().is_none() {
            return Err(ClearNavigatorError::InvalidCommandState);
        }

        let next = match (self.intent.spec().interaction, response) {
            (_, Response::Cancel) => None,
            (Interaction::Comment { .. }, Response::Text(text)) => Some(Reply::Comment(text)),
            (Interaction::Comment { .. }, Response::Choice(_)) => {
                return Err(ClearNavigatorError::UnexpectedResponse {
                    expected: "a comment",
                });
            }
            (Interaction::KeepOrDiscard, Response::Choice(Choice::Yes)) => Some(Reply::Keep(true)),
            (Interaction::KeepOrDiscard, Response::Choice(Choice::No)) => Some(Reply::Keep(false)),
            (Interaction::Confirm, Response::Choice(Choice::Yes)) => Some(Reply::None),
            (Interaction::KeepOrDiscard | Interaction::Confirm, Response::Choice(_)) => None,
            (Interaction::KeepOrDiscard | Interaction::Confirm, Response::Text(_)) => {
                return Err(ClearNavigatorError::UnexpectedResponse {
                    expected: "yes, no or cancel",
                });
            }
            (Interaction::None, _) => return Err(ClearNavigatorError::InvalidCommandState),
        };

        match next {
            Some(reply) => {
                self.reply = reply;
                self.state = CommandState::Dispatching;
            }
            None => {
                log::debug!("{} cancelled by user", self.intent);
                self.state = CommandState::Cancelled;
            }
        }
        Ok(&self.state)
    }

    pub(crate) fn finish(&mut self) {
        self.state = CommandState::Done;
    }
}

//! Command orchestration.
//!
//! [`Orchestrator`] owns the process-wide context: configuration, the executor, the
//! metadata cache and the output panel. Every command goes through the same steps:
//!
//! 1. **Targets**: explicit paths, else the active file, else nothing to do
//! 2. **Enablement**: every target is in the managed view and passes the intent's precondition
//! 3. **Interaction**: comment or yes/no/cancel prompt, when the intent needs one
//! 4. **Invocation**: assemble the argument vector and run or launch it
//! 5. **Result surfacing**: captured output goes to the [`OutputPanel`]

use crate::commands::{
    intent::{ArgvContext, CommandIntent, Dispatch, Interaction},
    pending::{CommandState, PendingCommand},
};
use crate::core::{
    cache::MetadataCache,
    config::Config,
    describe::Describer,
    error::{ClearNavigatorError, Result},
    executor::{command_line, CommandExecutor},
    panel::OutputPanel,
    paths::normalize,
    prompt::{Prompt, Prompter},
    query::StateQuery,
};
use std::path::{Path, PathBuf};
use std::rc::Rc;

pub struct Orchestrator {
    config: Config,
    executor: Rc<dyn CommandExecutor>,
    cache: MetadataCache,
    panel: OutputPanel,
    active_file: Option<PathBuf>,
}

impl Orchestrator {
    /// Build an orchestrator whose cache fetches through `describe` on `executor`
    pub fn new(config: Config, executor: Rc<dyn CommandExecutor>) -> Self {
        let describer = Describer::new(
            executor.clone(),
            config.tool_path.clone(),
            config.managed_root.clone(),
        );
        let cache = MetadataCache::with_ttl(Box::new(describer), config.cache_ttl());
        Self::with_cache(config, executor, cache)
    }

    pub fn with_cache(config: Config, executor: Rc<dyn CommandExecutor>, cache: MetadataCache) -> Self {
        Self {
            config,
            executor,
            cache,
            panel: OutputPanel::new(),
            active_file: None,
        }
    }

    pub fn set_active_file(&mut self, path: Option<PathBuf>) {
        self.active_file = path;
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn panel(&self) -> &OutputPanel {
        &self.panel
    }

    pub fn cache(&mut self) -> &mut MetadataCache {
        &mut self.cache
    }

    pub fn query(&mut self) -> StateQuery<'_> {
        StateQuery::new(&mut self.cache)
    }

    /// Explicit paths win; otherwise the active file, if any.
    ///
    /// Targets come back with `.` and `..` resolved, which makes them the cache keys.
    pub fn resolve_targets(&self, explicit: &[PathBuf]) -> Vec<PathBuf> {
        let chosen = if explicit.is_empty() {
            self.active_file.as_slice()
        } else {
            explicit
        };
        chosen.iter().map(|path| normalize(path)).collect()
    }

    /// Whether `intent` may run on the resolved targets.
    ///
    /// Fails closed: no targets, a path outside the managed view, or a path whose state
    /// cannot be determined all disable the command.
    pub fn is_enabled(&mut self, intent: CommandIntent, explicit: &[PathBuf]) -> bool {
        let targets = self.resolve_targets(explicit);
        self.targets_enabled(intent, &targets)
    }

    fn targets_enabled(&mut self, intent: CommandIntent, targets: &[PathBuf]) -> bool {
        if targets.is_empty() {
            return false;
        }

        let precondition = intent.spec().precondition;
        let mut query = StateQuery::new(&mut self.cache);

        targets.iter().all(|path| {
            let verdict = query.is_in_managed_view(path).and_then(|in_view| {
                if in_view {
                    precondition(&mut query, path)
                } else {
                    Ok(false)
                }
            });
            match verdict {
                Ok(enabled) => enabled,
                Err(e) => {
                    log::warn!("{intent} disabled, state unknown: {e}");
                    false
                }
            }
        })
    }

    /// Start a command. Returns `None` when there is nothing to operate on.
    pub fn begin(&mut self, intent: CommandIntent, explicit: &[PathBuf]) -> Result<Option<PendingCommand>> {
        let targets = self.resolve_targets(explicit);
        if targets.is_empty() {
            log::debug!("{intent}: no target files, nothing to do");
            return Ok(None);
        }

        if !self.targets_enabled(intent, &targets) {
            return Err(ClearNavigatorError::command_disabled(intent.name()));
        }

        let prompt = self.prompt_for(intent, &targets);
        Ok(Some(PendingCommand::new(intent, targets, prompt)))
    }

    fn prompt_for(&mut self, intent: CommandIntent, targets: &[PathBuf]) -> Option<Prompt> {
        let listing = targets
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join("\n");

        match intent.spec().interaction {
            Interaction::None => None,
            Interaction::Comment { prefill } => {
                let initial = if prefill {
                    self.query().current_comment(&targets[0]).unwrap_or_else(|e| {
                        log::warn!("Cannot read current comment: {e}");
                        String::new()
                    })
                } else {
                    String::new()
                };
                Some(Prompt::Comment {
                    label: "Comment".to_string(),
                    initial,
                })
            }
            Interaction::KeepOrDiscard => Some(Prompt::Choice {
                message: format!(
                    "You are about to undo checkout of:\n\n{listing}\n\nDo you want to save a .keep file?"
                ),
            }),
            Interaction::Confirm => Some(Prompt::Choice {
                message: format!(
                    "Do you really want to add these file(s) to version control?\n\n{listing}"
                ),
            }),
        }
    }

    /// Launch a command that has all its input. Moves it to `Done`.
    pub fn dispatch(&mut self, command: &mut PendingCommand) -> Result<()> {
        if command.state() != &CommandState::Dispatching {
            return Err(ClearNavigatorError::InvalidCommandState);
        }

        let intent = command.intent();
        let spec = intent.spec();
        let result = match spec.dispatch {
            Dispatch::Captured => {
                let argv = (spec.argv)(&ArgvContext {
                    config: &self.config,
                    reply: command.reply(),
                    paths: command.targets(),
                    predecessor: None,
                });
                self.run_captured(&argv)
            }
            Dispatch::DetachedBatch => {
                let argv = (spec.argv)(&ArgvContext {
                    config: &self.config,
                    reply: command.reply(),
                    paths: command.targets(),
                    predecessor: None,
                });
                self.launch_detached(&argv)
            }
            Dispatch::DetachedPerPath { with_predecessor } => {
                command.targets().iter().try_for_each(|path| {
                    let predecessor = if with_predecessor {
                        Some(self.query().predecessor_path(path)?)
                    } else {
                        None
                    };
                    let argv = (spec.argv)(&ArgvContext {
                        config: &self.config,
                        reply: command.reply(),
                        paths: std::slice::from_ref(path),
                        predecessor: predecessor.as_deref(),
                    });
                    self.launch_detached(&argv)
                })
            }
        };

        command.finish();
        result
    }

    fn run_captured(&mut self, argv: &[String]) -> Result<()> {
        match self.executor.run(argv) {
            Ok(output) => {
                log::info!("{} exited with {}", command_line(argv), output.exit_label());
                self.panel.append_result(argv, &output);
                // The tool just changed element state
                self.cache.flush();
                Ok(())
            }
            Err(e) => {
                self.panel.append(&format!("Running: {}\n\n{e}\n", command_line(argv)));
                Err(e)
            }
        }
    }

    fn launch_detached(&mut self, argv: &[String]) -> Result<()> {
        self.executor.run_detached(argv).map_err(|e| {
            self.panel.append(&format!("Launching: {}\n\n{e}\n", command_line(argv)));
            e
        })
    }

    /// Drive a command to completion, asking `prompter` for any input it needs.
    ///
    /// Returns [`ClearNavigatorError::UserCancelled`] when a prompt is dismissed.
    pub fn run(&mut self, intent: CommandIntent, explicit: &[PathBuf], prompter: &mut dyn Prompter) -> Result<()> {
        let Some(mut command) = self.begin(intent, explicit)? else {
            return Ok(());
        };

        while let Some(prompt) = command.prompt().cloned() {
            let response = prompter.ask(&prompt);
            command.resume(response)?;
        }

        if command.state() == &CommandState::Cancelled {
            return Err(ClearNavigatorError::UserCancelled);
        }

        log::debug!("{intent} on {} file(s)", command.targets().len());
        self.dispatch(&mut command)
    }

    /// Current record for `path`, fetched if needed
    pub fn describe(&mut self, path: &Path) -> Result<crate::core::element::ElementRecord> {
        self.cache.get(path).cloned()
    }
}

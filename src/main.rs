use clap::{Parser, Subcommand};
use clear_navigator::commands::*;
use clear_navigator::core::{
    config::Config,
    error::Result,
    executor::SystemExecutor,
    paths::normalize,
    print_error, print_info, print_success,
    prompt::{Choice, Prompter, Response, ScriptedPrompter, TerminalPrompter},
};
use std::env;
use std::path::{Path, PathBuf};
use std::rc::Rc;

#[derive(Parser)]
#[command(name = "clear-navigator")]
#[command(about = "ClearCase checkout, checkin and diff commands with cached element state")]
#[command(version = "0.1.0")]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Version-control tool to run (overrides the config file)
    #[arg(long, global = true, value_name = "PATH")]
    tool: Option<String>,

    /// Root of the managed view (overrides the config file)
    #[arg(long, global = true, value_name = "DIR")]
    managed_root: Option<PathBuf>,

    /// File the editor has focused, used when no paths are given
    #[arg(long, global = true, value_name = "FILE")]
    active_file: Option<PathBuf>,

    /// Read settings from this file instead of the default location
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check out files (reserved unless --unreserved)
    Checkout {
        /// Take an unreserved checkout
        #[arg(long)]
        unreserved: bool,
        /// Checkout comment (prompted for when omitted)
        #[arg(short = 'c', long)]
        comment: Option<String>,
        paths: Vec<PathBuf>,
    },
    /// Check in checked-out files
    Checkin {
        /// Checkin comment (prompted for, pre-filled with the checkout comment, when omitted)
        #[arg(short = 'c', long)]
        comment: Option<String>,
        paths: Vec<PathBuf>,
    },
    /// Undo a checkout
    Unco {
        /// Save the current contents to a .keep file
        #[arg(long, conflicts_with = "discard")]
        keep: bool,
        /// Discard the current contents
        #[arg(long)]
        discard: bool,
        paths: Vec<PathBuf>,
    },
    /// Put view-private files under version control
    Add {
        /// Do not ask for confirmation
        #[arg(short = 'y', long)]
        yes: bool,
        paths: Vec<PathBuf>,
    },
    /// Compare files against their predecessor versions
    Diff { paths: Vec<PathBuf> },
    /// Open the checkout finder
    FindCheckouts { paths: Vec<PathBuf> },
    /// Open the graphical version tree
    Vtree { paths: Vec<PathBuf> },
    /// Show the state of files
    Status {
        /// Print records as JSON
        #[arg(long)]
        json: bool,
        paths: Vec<PathBuf>,
    },
    /// Print whether a command is available for files (exit status 1 when it is not)
    Enabled {
        /// checkout, checkout-unreserved, checkin, unco, add, diff, find-checkouts or vtree
        command: String,
        paths: Vec<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => Config::load_or_create_at(path),
        None => Config::load_or_create(),
    };

    // Configure logging based on --debug flag
    let debug = cli.debug || loaded.as_ref().is_ok_and(|config| config.debug);
    if debug {
        env::set_var("RUST_LOG", "debug");
    } else {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let mut config = loaded.unwrap_or_else(|e| {
        log::warn!("Cannot load config, using defaults: {e}");
        Config::default()
    });
    if let Some(tool) = cli.tool {
        config.tool_path = tool;
    }
    if let Some(root) = cli.managed_root {
        config.managed_root = root;
    }

    match execute(cli.command, config, cli.active_file) {
        Ok(code) => std::process::exit(code),
        Err(e) if e.is_silent() => {}
        Err(e) => {
            print_error(&e.to_string());
            std::process::exit(1);
        }
    }
}

/// Run one subcommand and return the process exit code
fn execute(command: Commands, config: Config, active_file: Option<PathBuf>) -> Result<i32> {
    let cwd = env::current_dir()?;
    let mut orchestrator = Orchestrator::new(config, Rc::new(SystemExecutor));
    orchestrator.set_active_file(active_file.map(|p| absolutize(&cwd, &p)));

    let (intent, paths, mut prompter): (CommandIntent, Vec<PathBuf>, Box<dyn Prompter>) = match command {
        Commands::Status { json, paths } => {
            execute_status(&mut orchestrator, &absolutize_all(&cwd, &paths), json)?;
            return Ok(0);
        }
        Commands::Enabled { command, paths } => {
            let enabled = execute_enabled(&mut orchestrator, &command, &absolutize_all(&cwd, &paths))?;
            return Ok(if enabled { 0 } else { 1 });
        }
        Commands::Checkout {
            unreserved,
            comment,
            paths,
        } => {
            let mode = if unreserved {
                CheckoutMode::Unreserved
            } else {
                CheckoutMode::Reserved
            };
            (CommandIntent::Checkout(mode), paths, comment_prompter(comment))
        }
        Commands::Checkin { comment, paths } => (CommandIntent::Checkin, paths, comment_prompter(comment)),
        Commands::Unco { keep, discard, paths } => {
            let answer = if keep {
                Some(Choice::Yes)
            } else if discard {
                Some(Choice::No)
            } else {
                None
            };
            (CommandIntent::UndoCheckout, paths, choice_prompter(answer))
        }
        Commands::Add { yes, paths } => {
            let answer = yes.then_some(Choice::Yes);
            (CommandIntent::Add, paths, choice_prompter(answer))
        }
        Commands::Diff { paths } => (CommandIntent::Diff, paths, interactive()),
        Commands::FindCheckouts { paths } => (CommandIntent::FindCheckouts, paths, interactive()),
        Commands::Vtree { paths } => (CommandIntent::VersionTree, paths, interactive()),
    };

    let paths = absolutize_all(&cwd, &paths);
    if orchestrator.resolve_targets(&paths).is_empty() {
        print_info(&format!("No file selected, nothing to {intent}"));
        return Ok(0);
    }
    let result = orchestrator.run(intent, &paths, prompter.as_mut());

    let panel = orchestrator.panel();
    if !panel.is_empty() {
        print!("\n{}", panel.contents());
    }
    result?;

    if intent.spec().dispatch != Dispatch::Captured {
        print_success(&format!("Launched {intent}"));
    }
    Ok(0)
}

fn comment_prompter(comment: Option<String>) -> Box<dyn Prompter> {
    match comment {
        Some(text) => Box::new(ScriptedPrompter::new([Response::Text(text)])),
        None => interactive(),
    }
}

fn choice_prompter(answer: Option<Choice>) -> Box<dyn Prompter> {
    match answer {
        Some(choice) => Box::new(ScriptedPrompter::new([Response::Choice(choice)])),
        None => interactive(),
    }
}

fn interactive() -> Box<dyn Prompter> {
    Box::new(TerminalPrompter)
}

fn absolutize(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&cwd.join(path))
    }
}

fn absolutize_all(cwd: &Path, paths: &[PathBuf]) -> Vec<PathBuf> {
    paths.iter().map(|p| absolutize(cwd, p)).collect()
}

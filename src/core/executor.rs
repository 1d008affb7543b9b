//! External process execution.
//!
//! [`CommandExecutor`] is the seam between the metadata layer and the operating system.
//! Production code uses [`SystemExecutor`]; tests inject fakes that answer from memory.
//!
//! A non-zero exit code is data, not an error: the tool's exit codes carry meaning that
//! only the caller can interpret. Only a failure to start the program is an error.

use crate::core::error::{ClearNavigatorError, Result};
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};

/// Captured result of a finished process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the process was killed by a signal
    pub exit_code: Option<i32>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Exit code formatted for display
    pub fn exit_label(&self) -> String {
        match self.exit_code {
            Some(code) => code.to_string(),
            None => "terminated by signal".to_string(),
        }
    }
}

pub trait CommandExecutor {
    /// Run `argv` to completion and capture its output. Blocks with no timeout.
    fn run(&self, argv: &[String]) -> Result<CommandOutput>;

    /// Launch `argv` and return immediately. Output and exit status are never observed.
    fn run_detached(&self, argv: &[String]) -> Result<()>;
}

/// Executor backed by `std::process::Command`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl SystemExecutor {
    fn build(argv: &[String]) -> Result<Command> {
        let (program, args) = argv.split_first().ok_or(ClearNavigatorError::EmptyCommand)?;
        let mut cmd = Command::new(program);
        cmd.args(args).stdin(Stdio::null());

        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            const CREATE_NO_WINDOW: u32 = 0x0800_0000;
            cmd.creation_flags(CREATE_NO_WINDOW);
        }

        Ok(cmd)
    }
}

impl CommandExecutor for SystemExecutor {
    fn run(&self, argv: &[String]) -> Result<CommandOutput> {
        let mut cmd = Self::build(argv)?;
        log::debug!("Running: {}", command_line(argv));

        let output = cmd
            .output()
            .map_err(|e| ClearNavigatorError::spawn_failed(&argv[0], e))?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code(),
        })
    }

    fn run_detached(&self, argv: &[String]) -> Result<()> {
        let mut cmd = Self::build(argv)?;
        log::debug!("Launching detached: {}", command_line(argv));

        let child = cmd
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| ClearNavigatorError::spawn_failed(&argv[0], e))?;

        log::debug!("Detached process started with pid {}", child.id());
        reap_in_background(child);
        Ok(())
    }
}

/// Wait for a detached child off-thread so a long-lived host does not collect zombies
fn reap_in_background(mut child: Child) -> Option<JoinHandle<()>> {
    let pid = child.id();
    let spawned = thread::Builder::new()
        .name(format!("reap-{pid}"))
        .spawn(move || match child.wait() {
            Ok(status) => log::debug!("Detached process {pid} exited with {status}"),
            Err(e) => log::warn!("Cannot wait for detached process {pid}: {e}"),
        });
    match spawned {
        Ok(handle) => Some(handle),
        Err(e) => {
            log::warn!("Cannot start reaper for detached process {pid}: {e}");
            None
        }
    }
}

/// Render an argument vector as a shell-quoted command line that can be copy-pasted
pub fn command_line(argv: &[String]) -> String {
    shell_words::join(argv)
}

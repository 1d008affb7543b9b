//! Fake view setup for integration tests

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Stands in for `cleartool`.
///
/// `describe` answers by substituting the format directives: `*new.c` is view private,
/// `*co.c` is checked out reserved by alice, `*missing.c` fails, anything else is
/// checked in at `/main/3`. Every other subcommand echoes its arguments.
const FAKE_TOOL: &str = r#"#!/bin/sh
if [ "$1" = "describe" ]; then
    path="$4"
    case "$path" in
        *missing.c)
            echo "cleartool: Error: Unable to access \"$path\"" >&2
            exit 1
            ;;
        *new.c) name=""; version=""; pred=""; flag=""; user="" ;;
        *co.c) name="$path"; version="/main/CHECKEDOUT"; pred="/main/2"; flag="reserved"; user="alice" ;;
        *) name="$path"; version="/main/3"; pred="/main/2"; flag=""; user="" ;;
    esac
    printf '%s\n' "$3" | sed \
        -e "s|%En@@%PVn|$name@@$pred|" \
        -e "s|%En|$name|" \
        -e "s|%Vn|$version|" \
        -e "s|%Nc|old comment|" \
        -e "s|%PVn|$pred|" \
        -e "s|%d|2026-10-01T09:30:00|" \
        -e "s|%u|$user|" \
        -e "s|%Rf|$flag|" \
        -e "s|%m|version|"
    exit 0
fi
echo "cleartool $*"
"#;

pub struct FakeView {
    pub dir: TempDir,
    pub root: PathBuf,
    pub tool: PathBuf,
    pub config: PathBuf,
}

impl FakeView {
    pub fn new() -> anyhow::Result<Self> {
        let dir = TempDir::new()?;
        let root = dir.path().join("view");
        fs::create_dir_all(&root)?;

        let tool = dir.path().join("cleartool");
        fs::write(&tool, FAKE_TOOL)?;
        make_executable(&tool)?;

        let config = dir.path().join("config.json");
        let settings = serde_json::json!({
            "tool_path": tool,
            "managed_root": root,
            "diff_tool": "true",
            "find_checkouts_tool": "true",
        });
        fs::write(&config, serde_json::to_string_pretty(&settings)?)?;

        Ok(Self {
            dir,
            root,
            tool,
            config,
        })
    }

    /// Override one key of the config file
    pub fn set(&self, key: &str, value: serde_json::Value) -> anyhow::Result<()> {
        let mut settings: serde_json::Value = serde_json::from_str(&fs::read_to_string(&self.config)?)?;
        settings[key] = value;
        fs::write(&self.config, serde_json::to_string_pretty(&settings)?)?;
        Ok(())
    }

    /// Path of `name` inside the view, created on disk
    pub fn file(&self, name: &str) -> anyhow::Result<PathBuf> {
        let path = self.root.join(name);
        fs::write(&path, "int main(void) { return 0; }\n")?;
        Ok(path)
    }

    /// Directory `name` inside the view, created on disk
    pub fn directory(&self, name: &str) -> anyhow::Result<PathBuf> {
        let path = self.root.join(name);
        fs::create_dir_all(&path)?;
        Ok(path)
    }

    /// Path of `name` outside the managed root
    pub fn outside(&self, name: &str) -> anyhow::Result<PathBuf> {
        let dir = self.dir.path().join("scratch");
        fs::create_dir_all(&dir)?;
        let path = dir.join(name);
        fs::write(&path, "scratch\n")?;
        Ok(path)
    }

    /// The binary, configured for this view
    pub fn command(&self) -> anyhow::Result<Command> {
        let mut cmd = Command::cargo_bin("clear-navigator")?;
        cmd.env("XDG_CONFIG_HOME", self.dir.path().join("xdg"))
            .env("NO_COLOR", "1")
            .env("CLICOLOR", "0")
            .arg("--config")
            .arg(&self.config)
            .current_dir(&self.root);
        Ok(cmd)
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) -> anyhow::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> anyhow::Result<()> {
    Ok(())
}

//! Append-only output surface for command results.
//!
//! The panel is read-only except for the duration of [`OutputPanel::append`], mirroring an
//! editor output pane that users can read but not type into.

use crate::core::executor::{command_line, CommandOutput};

#[derive(Debug)]
pub struct OutputPanel {
    contents: String,
    read_only: bool,
}

impl Default for OutputPanel {
    fn default() -> Self {
        Self {
            contents: String::new(),
            read_only: true,
        }
    }
}

impl OutputPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, text: &str) {
        self.read_only = false;
        self.contents.push_str(text);
        self.read_only = true;
    }

    /// Append the command line, captured streams and exit code of a finished command
    pub fn append_result(&mut self, argv: &[String], output: &CommandOutput) {
        let mut text = format!("Running: {}\n\n", command_line(argv));
        text.push_str(&output.stdout);
        if !output.stdout.is_empty() && !output.stdout.ends_with('\n') && !output.stderr.is_empty() {
            text.push('\n');
        }
        text.push_str(&output.stderr);
        if !text.ends_with('\n') {
            text.push('\n');
        }
        text.push_str(&format!("[exit code: {}]\n", output.exit_label()));
        self.append(&text);
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_is_read_only_between_appends() {
        let mut panel = OutputPanel::new();
        assert!(panel.is_read_only());
        panel.append("first\n");
        assert!(panel.is_read_only());
        panel.append("second\n");
        assert_eq!(panel.contents(), "first\nsecond\n");
    }

    #[test]
    fn test_append_result_layout() {
        let mut panel = OutputPanel::new();
        let argv: Vec<String> = ["cleartool", "ci", "-c", "done", "/view/a.c"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let output = CommandOutput {
            stdout: "Checked in \"/view/a.c\" version \"/main/4\".\n".to_string(),
            stderr: String::new(),
            exit_code: Some(0),
        };

        panel.append_result(&argv, &output);

        assert_eq!(
            panel.contents(),
            "Running: cleartool ci -c done /view/a.c\n\n\
             Checked in \"/view/a.c\" version \"/main/4\".\n\
             [exit code: 0]\n"
        );
    }

    #[test]
    fn test_append_result_keeps_stderr_and_failure_code() {
        let mut panel = OutputPanel::new();
        let argv = vec!["cleartool".to_string(), "co".to_string()];
        let output = CommandOutput {
            stdout: String::new(),
            stderr: "cleartool: Error: Element is already checked out".to_string(),
            exit_code: Some(1),
        };

        panel.append_result(&argv, &output);

        assert!(panel.contents().contains("already checked out\n"));
        assert!(panel.contents().ends_with("[exit code: 1]\n"));
    }

    #[test]
    fn test_append_result_separates_unterminated_stdout_from_stderr() {
        let mut panel = OutputPanel::new();
        let argv = vec!["cleartool".to_string(), "unco".to_string()];
        let output = CommandOutput {
            stdout: "Private version of \"/view/a.c\" saved".to_string(),
            stderr: "cleartool: Warning: keep file exists\n".to_string(),
            exit_code: Some(0),
        };

        panel.append_result(&argv, &output);

        assert!(panel
            .contents()
            .contains("saved\ncleartool: Warning: keep file exists\n[exit code: 0]\n"));
    }
}

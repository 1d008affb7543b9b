#![cfg(unix)]

use predicates::prelude::*;

mod common;
use common::{assertions, fixtures::FakeView};

#[cfg(test)]
mod status_command_tests {
    use super::*;

    #[test]
    fn test_status_shows_element_states() -> anyhow::Result<()> {
        let view = FakeView::new()?;
        let checked_in = view.file("main.c")?;
        let checked_out = view.file("co.c")?;
        let private = view.file("new.c")?;

        view.command()?
            .arg("status")
            .arg(&checked_in)
            .arg(&checked_out)
            .arg(&private)
            .assert()
            .success()
            .stdout(predicate::str::contains("Element status"))
            .stdout(assertions::has_state("checked in"))
            .stdout(assertions::has_state("checked out (reserved)"))
            .stdout(assertions::has_state("view private"))
            .stdout(predicate::str::contains("checked out by: alice"))
            .stdout(predicate::str::contains("comment:     old comment"));

        Ok(())
    }

    #[test]
    fn test_status_resolves_relative_paths() -> anyhow::Result<()> {
        let view = FakeView::new()?;
        let path = view.file("main.c")?;

        view.command()?
            .args(["status", "main.c"])
            .assert()
            .success()
            .stdout(predicate::str::contains(path.to_string_lossy().into_owned()))
            .stdout(predicate::str::contains("version:     /main/3"));

        Ok(())
    }

    #[test]
    fn test_status_json_output() -> anyhow::Result<()> {
        let view = FakeView::new()?;
        let checked_out = view.file("co.c")?;
        let private = view.file("new.c")?;

        let output = view
            .command()?
            .args(["status", "--json"])
            .arg(&checked_out)
            .arg(&private)
            .output()?;
        assert!(output.status.success());

        let records: serde_json::Value = serde_json::from_slice(&output.stdout)?;
        let records = records.as_array().ok_or_else(|| anyhow::anyhow!("expected an array"))?;
        assert_eq!(records.len(), 2);

        assert_eq!(records[0]["version_id"], "/main/CHECKEDOUT");
        assert_eq!(records[0]["reservation"], "Reserved");
        assert_eq!(records[0]["owning_user"], "alice");
        assert_eq!(records[0]["predecessor_version_id"], "/main/2");
        assert_eq!(records[0]["is_in_managed_view"], true);
        let fetched_at = records[0]["fetched_at"].as_str().unwrap_or_default();
        assert!(chrono::DateTime::parse_from_rfc3339(fetched_at).is_ok(), "fetched_at = {fetched_at:?}");

        assert_eq!(records[1]["is_private"], true);
        assert!(records[1]["owning_user"].is_null());

        Ok(())
    }

    #[test]
    fn test_status_reports_describe_failure() -> anyhow::Result<()> {
        let view = FakeView::new()?;
        let missing = view.file("missing.c")?;

        view.command()?
            .arg("status")
            .arg(&missing)
            .assert()
            .failure()
            .stdout(predicate::str::contains("Cannot describe"))
            .stdout(predicate::str::contains("Unable to access"));

        Ok(())
    }

    #[test]
    fn test_status_skips_failed_paths_when_others_succeed() -> anyhow::Result<()> {
        let view = FakeView::new()?;
        let missing = view.file("missing.c")?;
        let present = view.file("main.c")?;

        view.command()?
            .arg("status")
            .arg(&missing)
            .arg(&present)
            .assert()
            .success()
            .stdout(predicate::str::contains("Cannot describe"))
            .stdout(assertions::has_state("checked in"));

        Ok(())
    }

    #[test]
    fn test_status_marks_files_outside_view() -> anyhow::Result<()> {
        let view = FakeView::new()?;
        let scratch = view.outside("scratch.c")?;

        view.command()?
            .arg("status")
            .arg(&scratch)
            .assert()
            .success()
            .stdout(predicate::str::contains("outside the managed view"));

        Ok(())
    }
}

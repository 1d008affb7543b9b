//! Element metadata fetching through `cleartool describe`.
//!
//! A single `describe -fmt` call asks for every field at once. The fields are joined by a
//! delimiter that is generated fresh for each call, and the output is split on that same
//! delimiter. [`DescribeField`] is the one ordered schema shared by the query builder and
//! the parser; adding or reordering a field changes both sides together.
//!
//! The ninth slot is listed as the reservation kind, but `describe` only reports a
//! reservation through `%Rf`, which already fills the seventh slot. The ninth slot asks
//! for the object kind (`%m`) instead and is kept raw; no state is derived from it.
//!
//! # Public API
//! - [`ElementFetcher`]: the fetch seam used by the cache
//! - [`Describer`]: production fetcher that shells out to the tool
//! - [`DescribeField`]: ordered field schema
//! - [`parse_describe_output`]: positional parser for one `describe` result

use crate::core::{
    element::{ElementRecord, ReservationKind},
    error::{ClearNavigatorError, Result},
    executor::CommandExecutor,
    paths::is_under,
};
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Element name reported when the tool has no committed element for a path
pub const NAME_UNKNOWN: &str = "<name-unknown>";

/// Version identifier suffix of an open checkout
const CHECKEDOUT_SUFFIX: &str = "CHECKEDOUT";

/// Fields requested from `describe`, in query order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescribeField {
    ElementName,
    VersionId,
    Comment,
    PredecessorVersionId,
    VersionDate,
    OwningUser,
    ReservationFlag,
    PredecessorPath,
    /// Requested in the reservation-kind position; see the module docs
    ObjectKind,
}

impl DescribeField {
    pub const ALL: [DescribeField; 9] = [
        DescribeField::ElementName,
        DescribeField::VersionId,
        DescribeField::Comment,
        DescribeField::PredecessorVersionId,
        DescribeField::VersionDate,
        DescribeField::OwningUser,
        DescribeField::ReservationFlag,
        DescribeField::PredecessorPath,
        DescribeField::ObjectKind,
    ];

    /// Format directive understood by `describe -fmt`
    pub fn directive(self) -> &'static str {
        match self {
            DescribeField::ElementName => "%En",
            DescribeField::VersionId => "%Vn",
            DescribeField::Comment => "%Nc",
            DescribeField::PredecessorVersionId => "%PVn",
            DescribeField::VersionDate => "%d",
            DescribeField::OwningUser => "%u",
            DescribeField::ReservationFlag => "%Rf",
            DescribeField::PredecessorPath => "%En@@%PVn",
            DescribeField::ObjectKind => "%m",
        }
    }

    /// Position of this field in the output
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Anything that can produce a fresh [`ElementRecord`] for a path
pub trait ElementFetcher {
    fn fetch(&self, path: &Path) -> Result<ElementRecord>;
}

/// Build the `-fmt` template for a delimiter
pub fn format_template(delimiter: &str) -> String {
    DescribeField::ALL
        .iter()
        .map(|field| field.directive())
        .collect::<Vec<_>>()
        .join(delimiter)
}

/// A delimiter that will not plausibly occur in comments or paths
pub fn random_delimiter() -> String {
    format!("~{:016x}~", rand::random::<u64>())
}

/// Argument vector for a describe query
pub fn describe_argv(tool: &str, delimiter: &str, path: &Path) -> Vec<String> {
    vec![
        tool.to_string(),
        "describe".to_string(),
        "-fmt".to_string(),
        format_template(delimiter),
        path.to_string_lossy().into_owned(),
    ]
}

/// Parse one `describe` result into a record.
///
/// The tool-independent fields (`is_directory`, `is_in_managed_view`) are computed locally.
/// Fails with [`ClearNavigatorError::Describe`] when the field count is wrong.
pub fn parse_describe_output(
    path: &Path,
    stdout: &str,
    delimiter: &str,
    managed_root: &Path,
) -> Result<ElementRecord> {
    let stdout = stdout.trim_end_matches(['\r', '\n']);
    let fields: Vec<&str> = stdout.split(delimiter).collect();

    if fields.len() != DescribeField::ALL.len() {
        return Err(ClearNavigatorError::describe_failed(
            path,
            format!(
                "expected {} fields, got {}",
                DescribeField::ALL.len(),
                fields.len()
            ),
        ));
    }

    let field = |f: DescribeField| fields[f.index()].trim();

    let element_name = field(DescribeField::ElementName);
    let version_id = field(DescribeField::VersionId);
    let is_private = element_name.is_empty() || element_name == NAME_UNKNOWN || version_id.is_empty();

    let reservation = if is_private {
        ReservationKind::None
    } else {
        match ReservationKind::from_flag(field(DescribeField::ReservationFlag)) {
            // Older tool releases leave the flag blank but still mark the version
            ReservationKind::None if version_id.ends_with(CHECKEDOUT_SUFFIX) => {
                ReservationKind::Reserved
            }
            kind => kind,
        }
    };

    let owner = field(DescribeField::OwningUser);
    let owning_user = (reservation != ReservationKind::None && !owner.is_empty())
        .then(|| owner.to_string());

    Ok(ElementRecord {
        path: path.to_path_buf(),
        fetched_at: Utc::now(),
        element_name: element_name.to_string(),
        version_id: version_id.to_string(),
        comment: field(DescribeField::Comment).to_string(),
        is_private,
        reservation,
        predecessor_version_id: field(DescribeField::PredecessorVersionId).to_string(),
        predecessor_path: field(DescribeField::PredecessorPath).to_string(),
        version_date: field(DescribeField::VersionDate).to_string(),
        owning_user,
        object_kind: field(DescribeField::ObjectKind).to_string(),
        is_directory: path.is_dir(),
        is_in_managed_view: is_under(path, managed_root),
    })
}

/// Fetches element metadata by running `<tool> describe`
pub struct Describer {
    executor: Rc<dyn CommandExecutor>,
    tool: String,
    managed_root: PathBuf,
}

impl Describer {
    pub fn new(
        executor: Rc<dyn CommandExecutor>,
        tool: impl Into<String>,
        managed_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            executor,
            tool: tool.into(),
            managed_root: managed_root.into(),
        }
    }
}

impl ElementFetcher for Describer {
    fn fetch(&self, path: &Path) -> Result<ElementRecord> {
        let delimiter = random_delimiter();
        let argv = describe_argv(&self.tool, &delimiter, path);

        let output = self
            .executor
            .run(&argv)
            .map_err(|e| ClearNavigatorError::describe_failed(path, e.to_string()))?;

        if !output.success() {
            return Err(ClearNavigatorError::describe_failed(
                path,
                format!(
                    "{} exited with {}: {}",
                    self.tool,
                    output.exit_label(),
                    output.stderr.trim()
                ),
            ));
        }

        parse_describe_output(path, &output.stdout, &delimiter, &self.managed_root)
    }
}

//! Element records and lifecycle states.
//!
//! An [`ElementRecord`] is the parsed result of one `describe` query for one path. The
//! lifecycle predicates are derived from the stored fields rather than stored alongside
//! them, so private, checked-out and checked-in are always mutually exclusive.
//!
//! # Public API
//! - [`ElementRecord`]: everything known about one path as of the last fetch
//! - [`ReservationKind`]: reserved / unreserved / not checked out
//! - [`ElementState`]: the lifecycle state used for display

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Checkout reservation as reported by the tool's reservation flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReservationKind {
    Reserved,
    Unreserved,
    None,
}

impl ReservationKind {
    /// Parse the raw reservation flag field
    pub fn from_flag(flag: &str) -> Self {
        match flag.trim() {
            "reserved" => ReservationKind::Reserved,
            "unreserved" => ReservationKind::Unreserved,
            _ => ReservationKind::None,
        }
    }
}

/// Lifecycle state of an element, as observed by the last fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementState {
    /// Not under version control yet
    Private,
    /// Checked in, no open checkout
    CheckedIn,
    /// Checked out with an exclusive reservation
    CheckedOutReserved,
    /// Checked out without a reservation
    CheckedOutUnreserved,
}

impl ElementState {
    /// Short status code for aligned list output
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementState::Private => "P",
            ElementState::CheckedIn => "CI",
            ElementState::CheckedOutReserved => "CO",
            ElementState::CheckedOutUnreserved => "CU",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ElementState::Private => "view private",
            ElementState::CheckedIn => "checked in",
            ElementState::CheckedOutReserved => "checked out (reserved)",
            ElementState::CheckedOutUnreserved => "checked out (unreserved)",
        }
    }
}

impl fmt::Display for ElementState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementRecord {
    pub path: PathBuf,
    pub fetched_at: DateTime<Utc>,
    pub element_name: String,
    /// Ends in `CHECKEDOUT` while a checkout is open
    pub version_id: String,
    pub comment: String,
    pub is_private: bool,
    pub reservation: ReservationKind,
    pub predecessor_version_id: String,
    /// Version-extended name of the predecessor, usable as a file path
    pub predecessor_path: String,
    pub version_date: String,
    pub owning_user: Option<String>,
    /// Raw object kind reported by the tool
    pub object_kind: String,
    pub is_directory: bool,
    pub is_in_managed_view: bool,
}

impl ElementRecord {
    pub fn is_checked_out(&self) -> bool {
        self.reservation != ReservationKind::None
    }

    pub fn is_checked_in(&self) -> bool {
        !self.is_private && !self.is_checked_out()
    }

    pub fn state(&self) -> ElementState {
        if self.is_private {
            return ElementState::Private;
        }
        match self.reservation {
            ReservationKind::Reserved => ElementState::CheckedOutReserved,
            ReservationKind::Unreserved => ElementState::CheckedOutUnreserved,
            ReservationKind::None => ElementState::CheckedIn,
        }
    }
}

//! Pure projections over a store snapshot.
//!
//! Every function here is stateless and deterministic: same store in,
//! same view out. The dashboard screens each used to carry their own
//! copy of this logic (filter switches, count loops, threshold maps);
//! this module is the single shared implementation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{MemberStatus, Report, ReportStatus, TeamMember, WorkItem};
use crate::store::Store;

/// Named work-item filters, matching the task screen's filter panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemFilter {
    All,
    Completed,
    Pending,
    Starred,
    /// Items assigned to the named owner.
    Owner(String),
}

impl ItemFilter {
    /// Whether `item` passes this filter.
    #[must_use]
    pub fn matches(&self, item: &WorkItem) -> bool {
        match self {
            Self::All => true,
            Self::Completed => item.completed,
            Self::Pending => !item.completed,
            Self::Starred => item.starred,
            Self::Owner(owner) => item.owner.as_deref() == Some(owner.as_str()),
        }
    }
}

/// Named report filters for the status screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFilter {
    All,
    Status(ReportStatus),
    Owner(String),
}

impl ReportFilter {
    /// Whether `report` passes this filter.
    #[must_use]
    pub fn matches(&self, report: &Report) -> bool {
        match self {
            Self::All => true,
            Self::Status(status) => report.status == *status,
            Self::Owner(owner) => report.owner == *owner,
        }
    }
}

/// Work items passing `filter`, preserving store order.
#[must_use]
pub fn filter_items<'a>(store: &'a Store, filter: &ItemFilter) -> Vec<&'a WorkItem> {
    store.items().iter().filter(|i| filter.matches(i)).collect()
}

/// Reports passing `filter`, preserving store order.
#[must_use]
pub fn filter_reports<'a>(store: &'a Store, filter: &ReportFilter) -> Vec<&'a Report> {
    store.reports().iter().filter(|r| filter.matches(r)).collect()
}

/// Team members matching an optional status and an optional
/// case-insensitive name/role search term, preserving store order.
#[must_use]
pub fn filter_members<'a>(
    store: &'a Store,
    status: Option<MemberStatus>,
    search: Option<&str>,
) -> Vec<&'a TeamMember> {
    let term = search.map(str::to_lowercase);
    store
        .members()
        .iter()
        .filter(|m| status.is_none_or(|s| m.status == s))
        .filter(|m| {
            term.as_deref().is_none_or(|t| {
                m.name.to_lowercase().contains(t) || m.role.to_lowercase().contains(t)
            })
        })
        .collect()
}

/// Aggregate counts and derived percentages for the overview screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    /// Total work items.
    pub total: usize,
    /// Work items with `completed == true`.
    pub completed: usize,
    /// Work items still pending.
    pub pending: usize,
    /// Starred work items.
    pub starred: usize,
    /// Reports per status.
    pub on_track: usize,
    pub at_risk: usize,
    pub behind: usize,
    pub reports_completed: usize,
    /// `round(completed / total * 100)`; 0 when the store is empty.
    pub completed_percent: u8,
}

/// Single-pass aggregate over the whole store.
#[must_use]
pub fn aggregate_counts(store: &Store) -> Counts {
    let mut counts = Counts {
        total: store.items().len(),
        ..Counts::default()
    };
    for item in store.items() {
        if item.completed {
            counts.completed += 1;
        } else {
            counts.pending += 1;
        }
        if item.starred {
            counts.starred += 1;
        }
    }
    for report in store.reports() {
        match report.status {
            ReportStatus::OnTrack => counts.on_track += 1,
            ReportStatus::AtRisk => counts.at_risk += 1,
            ReportStatus::Behind => counts.behind += 1,
            ReportStatus::Completed => counts.reports_completed += 1,
        }
    }
    counts.completed_percent = percent(counts.completed, counts.total);
    counts
}

/// Rounded integer percentage with a zero-total guard.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
pub fn percent(part: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((part as f64 / total as f64) * 100.0).round() as u8
}

/// Mean member workload, rounded half-up; 0 with no members.
#[must_use]
pub fn average_workload(store: &Store) -> u8 {
    let members = store.members();
    if members.is_empty() {
        return 0;
    }
    let sum: u32 = members.iter().map(|m| u32::from(m.workload)).sum();
    let count = u32::try_from(members.len()).unwrap_or(u32::MAX);
    let rounded = (sum + count / 2) / count;
    u8::try_from(rounded).unwrap_or(100)
}

/// Signed days between `today` and `due`.
///
/// Negative means overdue, zero means due today.
#[must_use]
pub fn days_remaining(due: NaiveDate, today: NaiveDate) -> i64 {
    (due - today).num_days()
}

/// Urgency band for a due date, as the task detail panel colors it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DueUrgency {
    Overdue,
    /// Due within two days.
    Critical,
    Comfortable,
}

/// Band for a signed days-remaining value.
#[must_use]
pub const fn due_urgency(days: i64) -> DueUrgency {
    if days < 0 {
        DueUrgency::Overdue
    } else if days <= 2 {
        DueUrgency::Critical
    } else {
        DueUrgency::Comfortable
    }
}

/// Severity band for a member workload figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// Threshold bands from the team board: `< 60` low, `60..=79` medium,
/// `>= 80` high.
#[must_use]
pub const fn workload_severity(workload: u8) -> Severity {
    if workload >= 80 {
        Severity::High
    } else if workload >= 60 {
        Severity::Medium
    } else {
        Severity::Low
    }
}

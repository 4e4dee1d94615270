//! Entity types tracked by the engine.
//!
//! Three entity families back the dashboard screens: [`WorkItem`] (task
//! list and timeline), [`TeamMember`] with per-member [`Project`]s (team
//! board), and [`Report`] (status reports). All are plain serde value
//! types; the [`crate::store::Store`] owns the canonical records and
//! everything else sees clones or borrows.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Priority band shared by work items, projects, and reports.
///
/// Ordered so that comparisons like `priority >= Priority::High` work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    /// Lowercase label used in human output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Priority {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(StoreError::InvalidEnumValue {
                field: "priority",
                value: s.to_owned(),
            }),
        }
    }
}

/// A single trackable unit of work.
///
/// `completed` and `progress` are independent by design: a completed item
/// may carry partial progress and an item at 100% progress stays pending
/// until explicitly completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    /// Store-assigned identifier, unique for the life of the store.
    pub id: u64,
    pub title: String,
    pub completed: bool,
    pub priority: Priority,
    /// Free-form label, e.g. `"Design"` or `"Development"`.
    pub category: String,
    /// Assignee, when one has been recorded.
    pub owner: Option<String>,
    pub due_date: NaiveDate,
    pub starred: bool,
    /// Completion estimate in percent, always within `0..=100`.
    pub progress: u8,
}

/// Presence state of a team member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    Online,
    Busy,
    Offline,
}

impl MemberStatus {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Busy => "busy",
            Self::Offline => "offline",
        }
    }
}

impl fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MemberStatus {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "online" => Ok(Self::Online),
            "busy" => Ok(Self::Busy),
            "offline" => Ok(Self::Offline),
            _ => Err(StoreError::InvalidEnumValue {
                field: "status",
                value: s.to_owned(),
            }),
        }
    }
}

/// A project assignment scoped to one team member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
    /// Percent complete, within `0..=100`.
    pub progress: u8,
    pub priority: Priority,
}

/// A member of the team with their current load and assignments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: u64,
    pub name: String,
    pub role: String,
    pub status: MemberStatus,
    /// Utilization in percent, within `0..=100`.
    pub workload: u8,
    /// Open task count shown on the member card.
    pub tasks: u32,
    pub projects: Vec<Project>,
}

/// Health of a status report's underlying workstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportStatus {
    OnTrack,
    AtRisk,
    Behind,
    Completed,
}

impl ReportStatus {
    /// Human label as the dashboard prints it.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::OnTrack => "On Track",
            Self::AtRisk => "At Risk",
            Self::Behind => "Behind",
            Self::Completed => "Completed",
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ReportStatus {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept both the kebab-case form and the display form.
        match s.to_ascii_lowercase().replace(' ', "-").as_str() {
            "on-track" => Ok(Self::OnTrack),
            "at-risk" => Ok(Self::AtRisk),
            "behind" => Ok(Self::Behind),
            "completed" => Ok(Self::Completed),
            _ => Err(StoreError::InvalidEnumValue {
                field: "report status",
                value: s.to_owned(),
            }),
        }
    }
}

/// A periodic status report for one workstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub id: u64,
    pub title: String,
    /// Percent complete, within `0..=100`.
    pub completion: u8,
    pub status: ReportStatus,
    pub owner: String,
    pub priority: Priority,
    pub last_updated: DateTime<Utc>,
    pub details: String,
}

/// Clamp an arbitrary signed value into an inclusive `u8` band.
///
/// Shared by the mutation API and the drift generator so progress and
/// workload arithmetic can never escape their documented ranges.
#[must_use]
pub fn clamp_u8(value: i32, lo: u8, hi: u8) -> u8 {
    debug_assert!(lo <= hi);
    let clamped = value.clamp(i32::from(lo), i32::from(hi));
    u8::try_from(clamped).unwrap_or(hi)
}

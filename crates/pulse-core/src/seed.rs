//! Built-in seed records.
//!
//! The engine has no durable storage; every store starts from a seed set
//! and mutates in memory until the process exits. [`Seed::sample`] is the
//! demo dataset the dashboard ships with (five tasks, four team members,
//! four status reports).

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{
    MemberStatus, Priority, Project, Report, ReportStatus, TeamMember, WorkItem,
};

/// A complete initial dataset for a [`crate::store::Store`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Seed {
    pub items: Vec<WorkItem>,
    pub members: Vec<TeamMember>,
    pub reports: Vec<Report>,
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid seed date")
}

fn stamp(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).single().expect("valid seed timestamp")
}

fn item(
    id: u64,
    title: &str,
    completed: bool,
    due: NaiveDate,
    priority: Priority,
    category: &str,
    starred: bool,
    progress: u8,
) -> WorkItem {
    WorkItem {
        id,
        title: title.to_owned(),
        completed,
        priority,
        category: category.to_owned(),
        owner: None,
        due_date: due,
        starred,
        progress,
    }
}

fn project(id: u64, name: &str, progress: u8, priority: Priority) -> Project {
    Project {
        id,
        name: name.to_owned(),
        progress,
        priority,
    }
}

impl Seed {
    /// The demo dataset.
    #[must_use]
    pub fn sample() -> Self {
        Self {
            items: vec![
                item(1, "Finalize dashboard design", false, date(2025, 4, 5), Priority::High, "Design", true, 60),
                item(2, "Create user flows for onboarding", false, date(2025, 4, 2), Priority::Medium, "UX", false, 35),
                item(3, "Implement dark mode toggle", true, date(2025, 3, 28), Priority::Low, "Development", false, 100),
                item(4, "Review analytics integration", false, date(2025, 4, 10), Priority::High, "Development", true, 20),
                item(5, "Update component library", false, date(2025, 4, 15), Priority::Medium, "Development", false, 0),
            ],
            members: vec![
                TeamMember {
                    id: 1,
                    name: "Alex Morgan".to_owned(),
                    role: "UX Designer".to_owned(),
                    status: MemberStatus::Online,
                    workload: 80,
                    tasks: 12,
                    projects: vec![
                        project(1, "Homepage Redesign", 75, Priority::High),
                        project(2, "Mobile App", 30, Priority::Medium),
                    ],
                },
                TeamMember {
                    id: 2,
                    name: "Jamie Chen".to_owned(),
                    role: "Frontend Developer".to_owned(),
                    status: MemberStatus::Offline,
                    workload: 65,
                    tasks: 8,
                    projects: vec![
                        project(3, "Dashboard", 90, Priority::High),
                        project(4, "API Integration", 20, Priority::Low),
                    ],
                },
                TeamMember {
                    id: 3,
                    name: "Taylor Kim".to_owned(),
                    role: "Project Manager".to_owned(),
                    status: MemberStatus::Online,
                    workload: 45,
                    tasks: 5,
                    projects: vec![
                        project(5, "Client Meeting", 10, Priority::Medium),
                        project(6, "Resource Planning", 60, Priority::Medium),
                    ],
                },
                TeamMember {
                    id: 4,
                    name: "Jordan Smith".to_owned(),
                    role: "Backend Developer".to_owned(),
                    status: MemberStatus::Busy,
                    workload: 90,
                    tasks: 15,
                    projects: vec![
                        project(7, "Database Migration", 45, Priority::High),
                        project(8, "Security Audit", 80, Priority::High),
                    ],
                },
            ],
            reports: vec![
                Report {
                    id: 1,
                    title: "Frontend Development".to_owned(),
                    completion: 78,
                    status: ReportStatus::OnTrack,
                    owner: "Alex Morgan".to_owned(),
                    priority: Priority::High,
                    last_updated: stamp(2025, 3, 30, 14, 30),
                    details: "Completed responsive layout implementation. Working on animations and transitions.".to_owned(),
                },
                Report {
                    id: 2,
                    title: "Backend API Integration".to_owned(),
                    completion: 65,
                    status: ReportStatus::AtRisk,
                    owner: "Jamie Chen".to_owned(),
                    priority: Priority::Critical,
                    last_updated: stamp(2025, 3, 29, 10, 15),
                    details: "Authentication issues resolved. Facing challenges with data synchronization.".to_owned(),
                },
                Report {
                    id: 3,
                    title: "User Testing".to_owned(),
                    completion: 42,
                    status: ReportStatus::Behind,
                    owner: "Taylor Kim".to_owned(),
                    priority: Priority::Medium,
                    last_updated: stamp(2025, 3, 28, 14, 45),
                    details: "5 of 12 test scenarios completed. Need more participants for usability testing.".to_owned(),
                },
                Report {
                    id: 4,
                    title: "Documentation".to_owned(),
                    completion: 90,
                    status: ReportStatus::Completed,
                    owner: "Jordan Lee".to_owned(),
                    priority: Priority::Low,
                    last_updated: stamp(2025, 3, 27, 9, 0),
                    details: "User guide completed. API documentation in final review.".to_owned(),
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Seed;

    #[test]
    fn sample_has_expected_shape() {
        let seed = Seed::sample();
        assert_eq!(seed.items.len(), 5);
        assert_eq!(seed.members.len(), 4);
        assert_eq!(seed.reports.len(), 4);
        assert!(seed.members.iter().all(|m| m.projects.len() == 2));
    }

    #[test]
    fn sample_values_stay_in_band() {
        let seed = Seed::sample();
        assert!(seed.items.iter().all(|i| i.progress <= 100));
        assert!(seed.members.iter().all(|m| m.workload <= 100));
        assert!(seed.reports.iter().all(|r| r.completion <= 100));
    }
}

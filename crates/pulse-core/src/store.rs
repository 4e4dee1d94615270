//! Canonical entity store and mutation API.
//!
//! The [`Store`] is a plain value type: it owns the ordered entity
//! collections, hands out read-only borrows, and applies one discrete
//! change per mutation call. There is no interior mutability and no
//! global instance; consumers (including tests) construct their own store
//! and pass it by reference.
//!
//! # Invariants
//!
//! - Insertion order is preserved; filters and listings never reorder.
//! - Item ids come from a monotonic counter and are never reused, even
//!   after deletions.
//! - `progress`, `workload`, and `completion` always stay within
//!   `0..=100` after any mutation.
//! - `completed` and `progress` are independent: neither mutation ever
//!   touches the other field.

use chrono::{Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EntityKind, Result, StoreError};
use crate::model::{
    MemberStatus, Priority, Report, ReportStatus, TeamMember, WorkItem, clamp_u8,
};
use crate::seed::Seed;

/// New items fall due one week out, matching the dashboard's quick-add.
const DEFAULT_DUE_DAYS: u64 = 7;

/// In-memory store of work items, team members, and status reports.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Store {
    items: Vec<WorkItem>,
    members: Vec<TeamMember>,
    reports: Vec<Report>,
    next_item_id: u64,
}

impl Store {
    /// An empty store with no entities.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store initialized from the built-in demo dataset.
    #[must_use]
    pub fn seeded() -> Self {
        let mut store = Self::new();
        store.initialize(Seed::sample());
        store
    }

    /// Replace the entire state with `seed` records.
    ///
    /// Used at startup (standing in for an initial fetch) and by tests
    /// that need a known baseline. The item id counter restarts at
    /// `max(seed ids) + 1`.
    pub fn initialize(&mut self, seed: Seed) {
        self.next_item_id = seed.items.iter().map(|i| i.id).max().unwrap_or(0) + 1;
        self.items = seed.items;
        self.members = seed.members;
        self.reports = seed.reports;
        debug!(
            items = self.items.len(),
            members = self.members.len(),
            reports = self.reports.len(),
            "store initialized"
        );
    }

    // ── Read API ─────────────────────────────────────────────────────────

    /// All work items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[WorkItem] {
        &self.items
    }

    /// All team members in insertion order.
    #[must_use]
    pub fn members(&self) -> &[TeamMember] {
        &self.members
    }

    /// All status reports in insertion order.
    #[must_use]
    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    /// Look up one work item.
    ///
    /// # Errors
    ///
    /// `NotFound` if no item has `id`.
    pub fn item(&self, id: u64) -> Result<&WorkItem> {
        self.items
            .iter()
            .find(|i| i.id == id)
            .ok_or(StoreError::NotFound { kind: EntityKind::Item, id })
    }

    /// Look up one team member.
    ///
    /// # Errors
    ///
    /// `NotFound` if no member has `id`.
    pub fn member(&self, id: u64) -> Result<&TeamMember> {
        self.members
            .iter()
            .find(|m| m.id == id)
            .ok_or(StoreError::NotFound { kind: EntityKind::Member, id })
    }

    /// Look up one report.
    ///
    /// # Errors
    ///
    /// `NotFound` if no report has `id`.
    pub fn report(&self, id: u64) -> Result<&Report> {
        self.reports
            .iter()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound { kind: EntityKind::Report, id })
    }

    /// Immutable copy of the whole store for deterministic derivation.
    #[must_use]
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    // ── Mutation API: work items ─────────────────────────────────────────

    /// Flip an item's `completed` flag and return the updated record.
    ///
    /// Applying this twice restores the original value. Progress is left
    /// untouched in both directions; completion is an explicit user
    /// action, not a consequence of reaching 100%.
    ///
    /// # Errors
    ///
    /// `NotFound` if no item has `id`.
    pub fn toggle_complete(&mut self, id: u64) -> Result<WorkItem> {
        let item = self.item_mut(id)?;
        item.completed = !item.completed;
        debug!(id, completed = item.completed, "toggled completion");
        Ok(item.clone())
    }

    /// Flip an item's `starred` flag and return the updated record.
    ///
    /// # Errors
    ///
    /// `NotFound` if no item has `id`.
    pub fn toggle_star(&mut self, id: u64) -> Result<WorkItem> {
        let item = self.item_mut(id)?;
        item.starred = !item.starred;
        Ok(item.clone())
    }

    /// Create a new pending item due [`DEFAULT_DUE_DAYS`] from `today`.
    ///
    /// The id comes from a monotonic counter, so deleting items never
    /// causes a later add to reuse an id.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if `title` is empty or whitespace-only.
    pub fn add_item(
        &mut self,
        title: &str,
        category: &str,
        priority: Priority,
        today: NaiveDate,
    ) -> Result<WorkItem> {
        let title = title.trim();
        if title.is_empty() {
            return Err(StoreError::InvalidInput("title must not be blank".to_owned()));
        }

        let id = self.next_item_id;
        self.next_item_id += 1;

        let item = WorkItem {
            id,
            title: title.to_owned(),
            completed: false,
            priority,
            category: category.to_owned(),
            owner: None,
            due_date: today + Days::new(DEFAULT_DUE_DAYS),
            starred: false,
            progress: 0,
        };
        self.items.push(item.clone());
        debug!(id, title, "added item");
        Ok(item)
    }

    /// [`Self::add_item`] with `today` taken from the system clock.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if `title` is empty or whitespace-only.
    pub fn add_item_now(&mut self, title: &str, category: &str, priority: Priority) -> Result<WorkItem> {
        self.add_item(title, category, priority, Utc::now().date_naive())
    }

    /// Remove an item and return the removed record.
    ///
    /// Callers holding a selection that referenced `id` must clear it
    /// themselves; the store has no notion of UI selection.
    ///
    /// # Errors
    ///
    /// `NotFound` if no item has `id`.
    pub fn delete_item(&mut self, id: u64) -> Result<WorkItem> {
        let pos = self
            .items
            .iter()
            .position(|i| i.id == id)
            .ok_or(StoreError::NotFound { kind: EntityKind::Item, id })?;
        let removed = self.items.remove(pos);
        debug!(id, "deleted item");
        Ok(removed)
    }

    /// Shift an item's progress by `delta`, clamped to `0..=100`.
    ///
    /// The `completed` flag is never changed here, even when progress
    /// reaches 100.
    ///
    /// # Errors
    ///
    /// `NotFound` if no item has `id`.
    pub fn update_progress(&mut self, id: u64, delta: i32) -> Result<WorkItem> {
        let item = self.item_mut(id)?;
        item.progress = clamp_u8(i32::from(item.progress).saturating_add(delta), 0, 100);
        Ok(item.clone())
    }

    // ── Mutation API: team members ───────────────────────────────────────

    /// Set a member's presence status.
    ///
    /// # Errors
    ///
    /// `NotFound` if no member has `id`.
    pub fn set_member_status(&mut self, id: u64, status: MemberStatus) -> Result<TeamMember> {
        let member = self.member_mut(id)?;
        member.status = status;
        Ok(member.clone())
    }

    /// Shift a member's workload by `delta`, clamped to `0..=100`.
    ///
    /// # Errors
    ///
    /// `NotFound` if no member has `id`.
    pub fn update_member_workload(&mut self, id: u64, delta: i32) -> Result<TeamMember> {
        let member = self.member_mut(id)?;
        member.workload = clamp_u8(i32::from(member.workload).saturating_add(delta), 0, 100);
        Ok(member.clone())
    }

    // ── Mutation API: reports ────────────────────────────────────────────

    /// Set a report's status and refresh its `last_updated` stamp.
    ///
    /// # Errors
    ///
    /// `NotFound` if no report has `id`.
    pub fn set_report_status(&mut self, id: u64, status: ReportStatus) -> Result<Report> {
        let report = self.report_mut(id)?;
        report.status = status;
        report.last_updated = Utc::now();
        Ok(report.clone())
    }

    /// Shift a report's completion by `delta`, clamped to `0..=100`,
    /// refreshing `last_updated`.
    ///
    /// # Errors
    ///
    /// `NotFound` if no report has `id`.
    pub fn update_report_completion(&mut self, id: u64, delta: i32) -> Result<Report> {
        let report = self.report_mut(id)?;
        report.completion = clamp_u8(i32::from(report.completion).saturating_add(delta), 0, 100);
        report.last_updated = Utc::now();
        Ok(report.clone())
    }

    // ── Drift support ────────────────────────────────────────────────────

    /// Apply a bulk transform to every work item in place.
    ///
    /// Used by the drift generator, which touches every record per tick
    /// rather than going through per-id lookups.
    pub fn map_items(&mut self, f: impl FnMut(&mut WorkItem)) {
        self.items.iter_mut().for_each(f);
    }

    /// Apply a bulk transform to every team member in place.
    pub fn map_members(&mut self, f: impl FnMut(&mut TeamMember)) {
        self.members.iter_mut().for_each(f);
    }

    fn item_mut(&mut self, id: u64) -> Result<&mut WorkItem> {
        self.items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(StoreError::NotFound { kind: EntityKind::Item, id })
    }

    fn member_mut(&mut self, id: u64) -> Result<&mut TeamMember> {
        self.members
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(StoreError::NotFound { kind: EntityKind::Member, id })
    }

    fn report_mut(&mut self, id: u64) -> Result<&mut Report> {
        self.reports
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound { kind: EntityKind::Report, id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 1).expect("valid date")
    }

    #[test]
    fn toggle_complete_is_an_involution() {
        let mut store = Store::seeded();
        let before = store.item(1).expect("seed item").completed;
        store.toggle_complete(1).expect("first toggle");
        store.toggle_complete(1).expect("second toggle");
        assert_eq!(store.item(1).expect("seed item").completed, before);
    }

    #[test]
    fn toggle_complete_leaves_progress_alone() {
        let mut store = Store::seeded();
        let progress = store.item(1).expect("seed item").progress;
        store.toggle_complete(1).expect("toggle");
        assert_eq!(store.item(1).expect("seed item").progress, progress);
    }

    #[test]
    fn add_assigns_next_id_and_defaults() {
        let mut store = Store::seeded();
        let item = store
            .add_item("Write spec", "Design", Priority::Medium, today())
            .expect("add");
        assert_eq!(item.id, 6);
        assert!(!item.completed);
        assert!(!item.starred);
        assert_eq!(item.progress, 0);
        assert_eq!(item.due_date, today() + Days::new(7));
    }

    #[test]
    fn add_rejects_blank_titles() {
        let mut store = Store::seeded();
        let err = store
            .add_item("   ", "Design", Priority::Low, today())
            .expect_err("blank title");
        assert!(matches!(err, StoreError::InvalidInput(_)));
        assert_eq!(store.items().len(), 5);
    }

    #[test]
    fn ids_are_never_reused_after_delete() {
        let mut store = Store::seeded();
        let a = store
            .add_item("First", "QA", Priority::Low, today())
            .expect("add")
            .id;
        store.delete_item(a).expect("delete");
        let b = store
            .add_item("Second", "QA", Priority::Low, today())
            .expect("add")
            .id;
        assert!(b > a, "id {b} must not reuse deleted id {a}");
    }

    #[test]
    fn delete_then_lookup_is_not_found() {
        let mut store = Store::seeded();
        store.delete_item(2).expect("delete");
        assert!(matches!(
            store.item(2),
            Err(StoreError::NotFound { id: 2, .. })
        ));
    }

    #[test]
    fn delete_preserves_order_of_remaining_items() {
        let mut store = Store::seeded();
        store.delete_item(3).expect("delete");
        let ids: Vec<u64> = store.items().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2, 4, 5]);
    }

    #[test]
    fn progress_clamps_at_both_bounds() {
        let mut store = Store::seeded();
        let up = store.update_progress(5, 1000).expect("big delta");
        assert_eq!(up.progress, 100);
        let down = store.update_progress(5, i32::MIN).expect("huge negative");
        assert_eq!(down.progress, 0);
    }

    #[test]
    fn progress_at_100_does_not_complete() {
        let mut store = Store::seeded();
        let item = store.update_progress(5, 200).expect("max out");
        assert_eq!(item.progress, 100);
        assert!(!item.completed);
    }

    #[test]
    fn mutations_on_missing_ids_fail_with_not_found() {
        let mut store = Store::seeded();
        assert!(store.toggle_complete(999).is_err());
        assert!(store.toggle_star(999).is_err());
        assert!(store.delete_item(999).is_err());
        assert!(store.update_progress(999, 1).is_err());
        assert!(store.update_member_workload(999, 1).is_err());
        assert!(store.set_report_status(999, ReportStatus::Behind).is_err());
    }

    #[test]
    fn workload_updates_clamp() {
        let mut store = Store::seeded();
        let m = store.update_member_workload(4, 50).expect("update");
        assert_eq!(m.workload, 100);
    }

    #[test]
    fn initialize_resets_to_seed() {
        let mut store = Store::seeded();
        store.delete_item(1).expect("delete");
        store.initialize(Seed::sample());
        assert_eq!(store.items().len(), 5);
        assert!(store.item(1).is_ok());
    }

    #[test]
    fn empty_store_restarts_ids_at_one() {
        let mut store = Store::new();
        store.initialize(Seed::default());
        let item = store
            .add_item("solo", "Misc", Priority::Low, today())
            .expect("add");
        assert_eq!(item.id, 1);
    }
}

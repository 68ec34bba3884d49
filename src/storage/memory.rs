//! In-memory issue store.

use crate::model::{Issue, IssueUpdate, NewIssue};
use crate::storage::query::{IssuePage, ListQuery};
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Map and id counter, always mutated together under one lock.
#[derive(Debug)]
struct StoreState {
    issues: BTreeMap<u64, Issue>,
    next_id: u64,
}

impl Default for StoreState {
    fn default() -> Self {
        Self {
            issues: BTreeMap::new(),
            next_id: 1,
        }
    }
}

/// Concurrency-safe in-memory issue store.
///
/// Every operation takes the single store-wide lock for as long as it
/// touches the map, so creates never share an id and an update's
/// read-merge-write cannot interleave with another mutation. Listing holds
/// the lock only while copying the records out; filtering, sorting and
/// pagination run on that snapshot.
///
/// Callers always get owned copies of issues, never references into the
/// store. No operation calls back into another locking operation.
#[derive(Debug, Default)]
pub struct IssueStore {
    state: Mutex<StoreState>,
}

impl IssueStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // Mutations are single map writes, so a poisoned guard still holds
    // consistent state.
    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Create an issue, assigning the next id and stamping both timestamps.
    ///
    /// Title validity is checked by the caller (see `validation`).
    pub fn create(&self, new: NewIssue) -> Issue {
        let issue = {
            let mut state = self.lock();
            let id = state.next_id;
            state.next_id += 1;
            let issue = Issue::from_new(id, new, Utc::now());
            state.issues.insert(id, issue.clone());
            issue
        };

        tracing::debug!(id = issue.id, status = %issue.status, priority = %issue.priority, "Created issue");
        issue
    }

    /// Fetch a copy of an issue. `None` means no issue has this id.
    #[must_use]
    pub fn get(&self, id: u64) -> Option<Issue> {
        self.lock().issues.get(&id).cloned()
    }

    /// Merge the supplied fields into an existing issue.
    ///
    /// Fields sent as `null` are ignored just like absent ones, so this
    /// cannot clear `description` or `assignee`. `updatedAt` is refreshed on
    /// every successful call and never moves backwards. Returns `None`,
    /// leaving the store untouched, when the id is unknown.
    pub fn update(&self, id: u64, update: &IssueUpdate) -> Option<Issue> {
        let updated = {
            let mut state = self.lock();
            let issue = state.issues.get_mut(&id)?;
            issue.apply(update);
            issue.updated_at = Utc::now().max(issue.updated_at);
            issue.clone()
        };

        tracing::debug!(id, noop = update.is_noop(), "Updated issue");
        Some(updated)
    }

    /// Point-in-time copy of every issue, in id (insertion) order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Issue> {
        self.lock().issues.values().cloned().collect()
    }

    /// Run the list pipeline over a fresh snapshot.
    #[must_use]
    pub fn list(&self, query: &ListQuery) -> IssuePage {
        let snapshot = self.snapshot();
        let page = query.run(snapshot);
        tracing::trace!(total = page.total, returned = page.items.len(), "Listed issues");
        page
    }

    /// Number of stored issues.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().issues.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#![allow(dead_code)]

use issue_tracker::model::{Issue, IssueUpdate, NewIssue, Patch, Priority, Status};
use issue_tracker::storage::IssueStore;

/// Create one issue per title, in order.
pub fn create_all(store: &IssueStore, titles: &[&str]) -> Vec<Issue> {
    titles
        .iter()
        .map(|title| store.create(NewIssue::new(*title)))
        .collect()
}

/// `n` issues cycling through every status and priority; every third one is
/// unassigned.
pub fn populate(store: &IssueStore, n: usize) -> Vec<Issue> {
    (0..n)
        .map(|i| {
            let mut new = NewIssue::new(format!("Issue {i:04}"))
                .with_description(format!("Description {i}"))
                .with_status(Status::ALL[i % Status::ALL.len()])
                .with_priority(Priority::ALL[i % Priority::ALL.len()]);
            if i % 3 != 0 {
                new = new.with_assignee(format!("user{}", i % 5));
            }
            store.create(new)
        })
        .collect()
}

/// Builder for partial updates.
#[derive(Default)]
pub struct UpdateBuilder {
    update: IssueUpdate,
}

impl UpdateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: &str) -> Self {
        self.update.title = Patch::Value(title.to_string());
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.update.description = Patch::Value(description.to_string());
        self
    }

    pub fn status(mut self, status: Status) -> Self {
        self.update.status = Patch::Value(status);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.update.priority = Patch::Value(priority);
        self
    }

    pub fn assignee(mut self, assignee: &str) -> Self {
        self.update.assignee = Patch::Value(assignee.to_string());
        self
    }

    pub fn null_assignee(mut self) -> Self {
        self.update.assignee = Patch::Null;
        self
    }

    pub fn build(self) -> IssueUpdate {
        self.update
    }
}

//! Sample issues loaded at startup.

use crate::model::{Issue, NewIssue, Priority, Status};
use crate::storage::IssueStore;

/// The four example issues, in creation order.
#[must_use]
pub fn sample_issues() -> Vec<NewIssue> {
    vec![
        NewIssue::new("Login page crashes on submit")
            .with_description("Steps to reproduce...")
            .with_priority(Priority::High)
            .with_status(Status::Open)
            .with_assignee("alice"),
        NewIssue::new("Typo in dashboard header")
            .with_description("Fix spelling")
            .with_priority(Priority::Low)
            .with_status(Status::Resolved)
            .with_assignee("bob"),
        NewIssue::new("API latency spike")
            .with_description("Investigate performance")
            .with_priority(Priority::Critical)
            .with_status(Status::InProgress)
            .with_assignee("carol"),
        NewIssue::new("Dark mode toggle not working")
            .with_description("")
            .with_priority(Priority::Medium)
            .with_status(Status::Open)
            .with_assignee("alice"),
    ]
}

/// Create the sample issues in `store` and return them.
pub fn seed_sample_data(store: &IssueStore) -> Vec<Issue> {
    let created: Vec<Issue> = sample_issues()
        .into_iter()
        .map(|new| store.create(new))
        .collect();
    tracing::info!(count = created.len(), "Seeded sample issues");
    created
}

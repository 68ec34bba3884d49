#![allow(dead_code)]

use issue_tracker::storage::{IssueStore, seed_sample_data};
use std::sync::Once;
use std::time::Instant;
use tracing::info;

pub mod fixtures;

static INIT: Once = Once::new();

pub fn init_test_logging() {
    INIT.call_once(|| {
        issue_tracker::logging::init_test_logging();
    });
}

pub struct TestLogGuard {
    name: String,
    start: Instant,
}

impl TestLogGuard {
    fn new(name: &str) -> Self {
        init_test_logging();
        info!("{name}: starting");
        Self {
            name: name.to_string(),
            start: Instant::now(),
        }
    }
}

impl Drop for TestLogGuard {
    fn drop(&mut self) {
        info!(
            "{}: assertions passed (elapsed {:?})",
            self.name,
            self.start.elapsed()
        );
    }
}

pub fn test_log(name: &str) -> TestLogGuard {
    TestLogGuard::new(name)
}

pub fn test_store() -> IssueStore {
    init_test_logging();
    IssueStore::new()
}

/// Store holding the four sample issues (ids 1-4).
pub fn seeded_store() -> IssueStore {
    let store = test_store();
    seed_sample_data(&store);
    store
}

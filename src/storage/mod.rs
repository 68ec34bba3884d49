//! Issue storage.
//!
//! A single in-memory store guarded by one mutex, plus the list query
//! pipeline (filter, count, sort, paginate) that runs over snapshots of it.

pub mod memory;
pub mod query;
pub mod seed;

pub use memory::IssueStore;
pub use query::{
    DEFAULT_PAGE_SIZE, IssuePage, ListFilters, ListQuery, SortDirection, SortField, SortSpec,
    paginate,
};
pub use seed::{sample_issues, seed_sample_data};

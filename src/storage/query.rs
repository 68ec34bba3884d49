//! List query pipeline: filter → count → sort → paginate.
//!
//! Runs over an owned snapshot of the store, outside the store lock.

use crate::model::{Issue, Priority, Status};
use std::cmp::Ordering;

/// Page size used when a caller passes a size below 1.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Issue filters. All set filters must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilters {
    /// Case-insensitive substring of the title (not the description).
    pub search: Option<String>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    /// Case-insensitive exact match. `""` matches only unassigned issues.
    pub assignee: Option<String>,
}

impl ListFilters {
    #[must_use]
    pub fn matches(&self, issue: &Issue) -> bool {
        self.prepared().matches(issue)
    }

    fn prepared(&self) -> PreparedFilters {
        PreparedFilters {
            search: self.search.as_deref().map(str::to_lowercase),
            status: self.status,
            priority: self.priority,
            assignee: self.assignee.as_deref().map(str::to_lowercase),
        }
    }
}

/// Filters with their case-folded needles computed once per query.
struct PreparedFilters {
    search: Option<String>,
    status: Option<Status>,
    priority: Option<Priority>,
    assignee: Option<String>,
}

impl PreparedFilters {
    fn matches(&self, issue: &Issue) -> bool {
        if let Some(needle) = &self.search {
            if !issue.title.to_lowercase().contains(needle.as_str()) {
                return false;
            }
        }
        if let Some(status) = self.status {
            if issue.status != status {
                return false;
            }
        }
        if let Some(priority) = self.priority {
            if issue.priority != priority {
                return false;
            }
        }
        if let Some(assignee) = &self.assignee {
            let actual = issue.assignee.as_deref().unwrap_or("").to_lowercase();
            if actual != *assignee {
                return false;
            }
        }
        true
    }
}

/// Sortable issue fields, keyed by their wire names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Title,
    Status,
    Priority,
    Assignee,
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    /// Parse a `sortBy` key. Unknown keys yield `None`.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "id" => Some(Self::Id),
            "title" => Some(Self::Title),
            "status" => Some(Self::Status),
            "priority" => Some(Self::Priority),
            "assignee" => Some(Self::Assignee),
            "createdAt" => Some(Self::CreatedAt),
            "updatedAt" => Some(Self::UpdatedAt),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::Status => "status",
            Self::Priority => "priority",
            Self::Assignee => "assignee",
            Self::CreatedAt => "createdAt",
            Self::UpdatedAt => "updatedAt",
        }
    }

    /// Ascending order for this field.
    ///
    /// Status and priority compare by wire name, titles compare bytewise,
    /// and unassigned issues sort before assigned ones.
    #[must_use]
    pub fn compare(&self, a: &Issue, b: &Issue) -> Ordering {
        match self {
            Self::Id => a.id.cmp(&b.id),
            Self::Title => a.title.cmp(&b.title),
            Self::Status => a.status.as_str().cmp(b.status.as_str()),
            Self::Priority => a.priority.as_str().cmp(b.priority.as_str()),
            Self::Assignee => a.assignee.cmp(&b.assignee),
            Self::CreatedAt => a.created_at.cmp(&b.created_at),
            Self::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        }
    }
}

/// Sort direction. Anything other than `asc` means descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    #[must_use]
    pub fn from_param(value: &str) -> Self {
        if value.eq_ignore_ascii_case("asc") {
            Self::Asc
        } else {
            Self::Desc
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// A resolved sort request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    /// Resolve `sortBy`/`sortDir` parameters. An unknown key disables sorting.
    #[must_use]
    pub fn parse(sort_by: &str, sort_dir: Option<&str>) -> Option<Self> {
        SortField::from_key(sort_by).map(|field| Self {
            field,
            direction: sort_dir.map_or_else(SortDirection::default, SortDirection::from_param),
        })
    }

    /// Stable sort; equal keys keep their snapshot order in both directions.
    pub fn apply(&self, issues: &mut [Issue]) {
        let field = self.field;
        match self.direction {
            SortDirection::Asc => issues.sort_by(|a, b| field.compare(a, b)),
            SortDirection::Desc => issues.sort_by(|a, b| field.compare(b, a)),
        }
    }
}

/// A full list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub filters: ListFilters,
    pub sort: Option<SortSpec>,
    /// 1-based; values below 1 are treated as 1.
    pub page: i64,
    /// Values below 1 are treated as `DEFAULT_PAGE_SIZE`.
    pub page_size: i64,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            filters: ListFilters::default(),
            sort: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ListQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_filters(mut self, filters: ListFilters) -> Self {
        self.filters = filters;
        self
    }

    /// Sort by `sort_by` if it names a sortable field; otherwise keep order.
    #[must_use]
    pub fn with_sort(mut self, sort_by: &str, sort_dir: Option<&str>) -> Self {
        self.sort = SortSpec::parse(sort_by, sort_dir);
        self
    }

    #[must_use]
    pub const fn with_page(mut self, page: i64, page_size: i64) -> Self {
        self.page = page;
        self.page_size = page_size;
        self
    }

    /// Run the pipeline over a snapshot.
    #[must_use]
    pub fn run(&self, mut issues: Vec<Issue>) -> IssuePage {
        let filters = self.filters.prepared();
        issues.retain(|issue| filters.matches(issue));

        let total = issues.len();

        if let Some(sort) = &self.sort {
            sort.apply(&mut issues);
        }

        IssuePage {
            items: paginate(issues, self.page, self.page_size),
            total,
        }
    }
}

/// One page of results plus the filtered total across all pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuePage {
    pub items: Vec<Issue>,
    pub total: usize,
}

/// Slice `[(page-1)*size, page*size)` out of `items`.
///
/// `page < 1` becomes 1 and `page_size < 1` becomes `DEFAULT_PAGE_SIZE`.
/// Pages past the end (including offsets too large to represent) are empty.
#[must_use]
pub fn paginate<T>(items: Vec<T>, page: i64, page_size: i64) -> Vec<T> {
    let page = u64::try_from(page).ok().filter(|p| *p >= 1).unwrap_or(1);
    let size = u64::try_from(page_size)
        .ok()
        .filter(|s| *s >= 1)
        .unwrap_or(DEFAULT_PAGE_SIZE.unsigned_abs());

    let Some(start) = (page - 1)
        .checked_mul(size)
        .and_then(|start| usize::try_from(start).ok())
    else {
        return Vec::new();
    };
    if start >= items.len() {
        return Vec::new();
    }

    let take = usize::try_from(size).unwrap_or(usize::MAX);
    items.into_iter().skip(start).take(take).collect()
}

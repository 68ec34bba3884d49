//! Request and response bodies for the HTTP API.

use crate::error::{Result, TrackerError, ValidationError};
use crate::model::{Issue, Priority, Status};
use crate::storage::{DEFAULT_PAGE_SIZE, IssuePage, ListFilters, ListQuery};
use crate::validation::PageValidator;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Query string of `GET /issues`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub search: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub assignee: Option<String>,
    pub sort_by: Option<String>,
    pub sort_dir: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl ListParams {
    /// Validate the parameters and build a store query.
    ///
    /// # Errors
    ///
    /// Returns a validation error listing every bad parameter.
    pub fn into_query(self, max_page_size: i64) -> Result<ListQuery> {
        let mut errors = Vec::new();

        let status = parse_enum::<Status>(self.status.as_deref(), &mut errors);
        let priority = parse_enum::<Priority>(self.priority.as_deref(), &mut errors);

        let page = self.page.unwrap_or(1);
        let page_size = self.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if let Err(page_errors) = PageValidator::validate(page, page_size, max_page_size) {
            errors.extend(page_errors);
        }

        if !errors.is_empty() {
            return Err(TrackerError::from_validation_errors(errors));
        }

        let filters = ListFilters {
            search: self.search,
            status,
            priority,
            assignee: self.assignee,
        };
        let mut query = ListQuery::new()
            .with_filters(filters)
            .with_page(page, page_size);
        if let Some(sort_by) = self.sort_by.as_deref() {
            query = query.with_sort(sort_by, self.sort_dir.as_deref());
        }
        Ok(query)
    }
}

fn parse_enum<T>(raw: Option<&str>, errors: &mut Vec<ValidationError>) -> Option<T>
where
    T: FromStr<Err = TrackerError>,
{
    match raw?.parse::<T>() {
        Ok(value) => Some(value),
        Err(err) => {
            errors.extend(err.field_errors().unwrap_or_default());
            None
        }
    }
}

/// Body of `GET /issues`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueList {
    pub items: Vec<Issue>,
    pub total: usize,
    pub page: i64,
    pub page_size: i64,
}

impl IssueList {
    #[must_use]
    pub fn new(result: IssuePage, query: &ListQuery) -> Self {
        Self {
            items: result.items,
            total: result.total,
            page: query.page,
            page_size: query.page_size,
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
}

impl Health {
    #[must_use]
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

//! Route handlers.

use super::AppState;
use super::error::ApiError;
use super::wire::{Health, IssueList, ListParams};
use crate::model::{Issue, IssueUpdate, NewIssue};
use crate::validation::IssueValidator;
use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

type ApiResult<T> = Result<T, ApiError>;

pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

pub async fn list_issues(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> ApiResult<Json<IssueList>> {
    let Query(params) = params?;
    let query = params.into_query(state.max_page_size)?;
    let result = state.store.list(&query);
    tracing::debug!(
        total = result.total,
        returned = result.items.len(),
        page = query.page,
        "Listed issues"
    );
    Ok(Json(IssueList::new(result, &query)))
}

pub async fn get_issue(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Issue>> {
    let Path(id) = id?;
    let id = store_id(id)?;
    state.store.get(id).map(Json).ok_or(ApiError::NotFound)
}

pub async fn create_issue(
    State(state): State<AppState>,
    body: Result<Json<NewIssue>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Issue>)> {
    let Json(new) = body?;
    IssueValidator::validate_new(&new)?;
    let issue = state.store.create(new);
    tracing::info!(id = issue.id, "Created issue");
    Ok((StatusCode::CREATED, Json(issue)))
}

pub async fn update_issue(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<IssueUpdate>, JsonRejection>,
) -> ApiResult<Json<Issue>> {
    let Path(id) = id?;
    let Json(update) = body?;
    IssueValidator::validate_update(&update)?;
    let id = store_id(id)?;
    let issue = state.store.update(id, &update).ok_or(ApiError::NotFound)?;
    tracing::info!(id = issue.id, "Updated issue");
    Ok(Json(issue))
}

/// Ids are assigned from 1, so zero and negative ids never exist.
fn store_id(id: i64) -> ApiResult<u64> {
    u64::try_from(id)
        .ok()
        .filter(|id| *id > 0)
        .ok_or(ApiError::NotFound)
}

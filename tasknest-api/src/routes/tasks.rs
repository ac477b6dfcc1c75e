/// Task endpoints
///
/// # Endpoints
///
/// - `GET    /api/v1/accounts/:username/tasks` - List the profile's tasks
/// - `POST   /api/v1/accounts/:username/tasks` - Create a task
/// - `GET    /api/v1/accounts/:username/tasks/:id` - Task detail
/// - `PUT    /api/v1/accounts/:username/tasks/:id` - Partial task update
/// - `DELETE /api/v1/accounts/:username/tasks/:id` - Delete a task
///
/// Every task route resolves the profile named in the path first (404 if
/// it doesn't exist), then runs the owner check (403 if the session
/// identity isn't that profile). A task id belonging to a different
/// profile is indistinguishable from a nonexistent one: both are 404.
///
/// Due dates travel as `DD/MM/YYYY HH:MM:SS` strings; the empty string
/// means "no due date".

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::{MSG_FIELDS_MISSING, MSG_NO_ACCESS_DATA, MSG_NO_PROFILE, MSG_NO_TASK},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::SignedCookieJar;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use tasknest_shared::{
    auth::session,
    models::parse_timestamp,
    models::profile::Profile,
    models::task::{CreateTask, Task, TaskPatch},
};

/// Task creation request
///
/// All four fields are required (the API has always demanded an explicit
/// `note`, `due_date`, and `completed` on create, even when empty/false).
#[derive(Debug, Deserialize)]
pub struct TaskCreateRequest {
    pub name: Option<String>,
    pub note: Option<String>,
    pub due_date: Option<String>,
    pub completed: Option<bool>,
}

/// Task update request
///
/// Everything is optional; absent fields are left untouched. An empty
/// `name` is ignored; an empty `due_date` clears the deadline.
#[derive(Debug, Deserialize)]
pub struct TaskUpdateRequest {
    pub name: Option<String>,
    pub note: Option<String>,
    pub due_date: Option<String>,
    pub completed: Option<bool>,
}

/// Parses a client-supplied due date, mapping "" to no due date
fn parse_due_date(raw: &str) -> Result<Option<DateTime<Utc>>, ApiError> {
    if raw.is_empty() {
        return Ok(None);
    }
    parse_timestamp(raw).map(Some).map_err(|_| {
        ApiError::BadRequest("due_date must use the format DD/MM/YYYY HH:MM:SS".to_string())
    })
}

/// Resolves the path profile and runs the owner check
///
/// 404 for an unknown profile, then 403 for a caller who isn't its
/// owner, in that order.
async fn owned_profile(
    state: &AppState,
    jar: &SignedCookieJar,
    username: &str,
) -> Result<Profile, ApiError> {
    let profile = Profile::find_by_username(&state.db, username)
        .await?
        .ok_or_else(|| ApiError::NotFound(MSG_NO_PROFILE.to_string()))?;

    if !session::is_user(jar, username) {
        return Err(ApiError::Forbidden(MSG_NO_ACCESS_DATA.to_string()));
    }

    Ok(profile)
}

/// Fetches a task and confirms it belongs to `profile`
async fn owned_task(state: &AppState, profile: &Profile, id: i64) -> Result<Task, ApiError> {
    Task::find_by_id(&state.db, id)
        .await?
        .filter(|task| task.profile_id == profile.id)
        .ok_or_else(|| ApiError::NotFound(MSG_NO_TASK.to_string()))
}

/// List tasks for one profile
pub async fn task_list(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Path(username): Path<String>,
) -> ApiResult<Json<Value>> {
    let profile = owned_profile(&state, &jar, &username).await?;

    let tasks = Task::list_by_profile(&state.db, profile.id).await?;
    let views: Vec<_> = tasks.iter().map(Task::to_view).collect();

    Ok(Json(json!({
        "username": username,
        "tasks": views,
    })))
}

/// Create a new task for this profile
///
/// `creation_date` is set server-side; the owning profile comes from the
/// path, never from the body.
pub async fn task_create(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Path(username): Path<String>,
    Json(req): Json<TaskCreateRequest>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let profile = owned_profile(&state, &jar, &username).await?;

    let (Some(name), Some(note), Some(due_date), Some(completed)) =
        (req.name, req.note, req.due_date, req.completed)
    else {
        return Err(ApiError::BadRequest(MSG_FIELDS_MISSING.to_string()));
    };

    if name.is_empty() {
        return Err(ApiError::BadRequest(MSG_FIELDS_MISSING.to_string()));
    }

    let due_date = parse_due_date(&due_date)?;

    let task = Task::create(
        &state.db,
        CreateTask {
            name,
            note: Some(note),
            due_date,
            completed,
            profile_id: profile.id,
        },
    )
    .await?;

    tracing::info!(task_id = task.id, username = %username, "Task created");

    Ok((StatusCode::CREATED, Json(json!({ "msg": "posted" }))))
}

/// Task detail
pub async fn task_detail(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Path((username, id)): Path<(String, i64)>,
) -> ApiResult<Json<Value>> {
    let profile = owned_profile(&state, &jar, &username).await?;
    let task = owned_task(&state, &profile, id).await?;

    Ok(Json(json!({
        "username": username,
        "task": task.to_view(),
    })))
}

/// Partial task update
///
/// Only supplied fields change. An empty `name` is ignored rather than
/// emptying the column; an empty `due_date` clears the deadline.
pub async fn task_update(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Path((username, id)): Path<(String, i64)>,
    Json(req): Json<TaskUpdateRequest>,
) -> ApiResult<Json<Value>> {
    let profile = owned_profile(&state, &jar, &username).await?;
    let task = owned_task(&state, &profile, id).await?;

    let patch = TaskPatch {
        name: req.name.filter(|n| !n.is_empty()),
        note: req.note,
        due_date: match req.due_date {
            Some(raw) => Some(parse_due_date(&raw)?),
            None => None,
        },
        completed: req.completed,
    };

    let updated = Task::update(&state.db, task.id, patch)
        .await?
        .ok_or_else(|| ApiError::NotFound(MSG_NO_TASK.to_string()))?;

    Ok(Json(json!({
        "username": username,
        "task": updated.to_view(),
    })))
}

/// Delete a task
///
/// Deletes the task if it belongs to the profile; a miss (unknown id or
/// someone else's task) is a silent no-op. Either way the response is
/// the same confirmation message.
pub async fn task_delete(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Path((username, id)): Path<(String, i64)>,
) -> ApiResult<Json<Value>> {
    let profile = owned_profile(&state, &jar, &username).await?;

    match owned_task(&state, &profile, id).await {
        Ok(task) => {
            Task::delete(&state.db, task.id).await?;
            tracing::info!(task_id = task.id, username = %username, "Task deleted");
        }
        // Unknown id or someone else's task: silent no-op
        Err(ApiError::NotFound(_)) => {}
        Err(e) => return Err(e),
    }

    Ok(Json(json!({
        "username": username,
        "msg": "Deleted.",
    })))
}

/// Profile endpoints
///
/// # Endpoints
///
/// - `POST   /api/v1/accounts` - Register a new profile (public)
/// - `GET    /api/v1/accounts/:username` - Profile detail (owner only)
/// - `PUT    /api/v1/accounts/:username` - Partial profile update (owner only)
/// - `DELETE /api/v1/accounts/:username` - Delete profile and its tasks (owner only)
///
/// The owner check runs before the existence check on these routes, so a
/// non-owner always sees 403 whether or not the profile exists. Only the
/// owner of a since-deleted profile (holding a stale cookie) can observe
/// a 404 here.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::{
        MSG_FIELDS_MISSING, MSG_NO_ACCESS_PROFILE, MSG_NO_PROFILE, MSG_PASSWORDS_DONT_MATCH,
    },
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::SignedCookieJar;
use serde::Deserialize;
use serde_json::{json, Value};
use tasknest_shared::{
    auth::password,
    auth::session,
    models::profile::{CreateProfile, Profile, ProfileView, UpdateProfile},
    models::task::Task,
};

/// Registration request
///
/// All four fields are required; `password2` is the confirmation copy.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub password2: Option<String>,
}

/// Profile update request
///
/// Everything is optional; absent fields are left untouched. A password
/// change requires both `password` and `password2`, equal and non-empty.
#[derive(Debug, Deserialize)]
pub struct ProfileUpdateRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub password2: Option<String>,
}

fn taken_message(username: &str) -> String {
    format!("Username \"{}\" is already taken", username)
}

/// Checks the session identity against the path username
fn require_owner(jar: &SignedCookieJar, username: &str) -> Result<(), ApiError> {
    if session::is_user(jar, username) {
        Ok(())
    } else {
        Err(ApiError::Forbidden(MSG_NO_ACCESS_PROFILE.to_string()))
    }
}

/// Builds the response view of a profile together with its task list
async fn profile_view(state: &AppState, profile: &Profile) -> Result<ProfileView, ApiError> {
    let tasks = Task::list_by_profile(&state.db, profile.id).await?;
    Ok(profile.to_view(tasks.iter().map(Task::to_view).collect()))
}

/// Register a new profile
///
/// Validation order: all fields present and non-empty, passwords match,
/// username not already taken. On success the password is hashed, the
/// profile persisted, and a session cookie issued immediately, so
/// registering doubles as logging in.
///
/// The pre-insert uniqueness check is the primary guard; the schema's
/// UNIQUE constraint catches the race where two registrations for the
/// same username interleave.
pub async fn register(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, SignedCookieJar, Json<Value>)> {
    let (Some(username), Some(email), Some(password), Some(password2)) =
        (req.username, req.email, req.password, req.password2)
    else {
        return Err(ApiError::BadRequest(MSG_FIELDS_MISSING.to_string()));
    };

    if username.is_empty() || email.is_empty() || password.is_empty() || password2.is_empty() {
        return Err(ApiError::BadRequest(MSG_FIELDS_MISSING.to_string()));
    }

    if password != password2 {
        return Err(ApiError::BadRequest(MSG_PASSWORDS_DONT_MATCH.to_string()));
    }

    if Profile::find_by_username(&state.db, &username)
        .await?
        .is_some()
    {
        return Err(ApiError::BadRequest(taken_message(&username)));
    }

    let password_hash = password::hash_password(&password)?;

    let profile = Profile::create(
        &state.db,
        CreateProfile {
            username,
            email,
            password_hash,
        },
    )
    .await?;

    tracing::info!(username = %profile.username, "Profile created");

    let jar = session::remember(jar, &profile.username);
    Ok((
        StatusCode::CREATED,
        jar,
        Json(json!({ "msg": "Profile created" })),
    ))
}

/// Profile detail
///
/// Returns the profile's serialized attributes plus its task list.
pub async fn profile_detail(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Path(username): Path<String>,
) -> ApiResult<Json<ProfileView>> {
    require_owner(&jar, &username)?;

    let profile = Profile::find_by_username(&state.db, &username)
        .await?
        .ok_or_else(|| ApiError::NotFound(MSG_NO_PROFILE.to_string()))?;

    Ok(Json(profile_view(&state, &profile).await?))
}

/// Partial profile update
///
/// Applies only the supplied fields. A successful username change
/// re-issues the session cookie for the new name; without that the
/// session would no longer match any profile.
pub async fn profile_update(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Path(username): Path<String>,
    Json(req): Json<ProfileUpdateRequest>,
) -> ApiResult<(StatusCode, SignedCookieJar, Json<Value>)> {
    require_owner(&jar, &username)?;

    let profile = Profile::find_by_username(&state.db, &username)
        .await?
        .ok_or_else(|| ApiError::NotFound(MSG_NO_PROFILE.to_string()))?;

    let new_username = req.username.filter(|u| !u.is_empty());
    let new_email = req.email.filter(|e| !e.is_empty());

    let new_password_hash = match (req.password, req.password2) {
        (Some(password), Some(password2)) if !password.is_empty() => {
            if password != password2 {
                return Err(ApiError::BadRequest(MSG_PASSWORDS_DONT_MATCH.to_string()));
            }
            Some(password::hash_password(&password)?)
        }
        _ => None,
    };

    // Renaming onto an existing username is rejected up front; the
    // unique constraint would catch it anyway, but with a 500.
    if let Some(new) = &new_username {
        if *new != profile.username
            && Profile::find_by_username(&state.db, new).await?.is_some()
        {
            return Err(ApiError::BadRequest(taken_message(new)));
        }
    }

    let renamed = new_username
        .as_deref()
        .is_some_and(|new| new != profile.username);

    let updated = Profile::update(
        &state.db,
        profile.id,
        UpdateProfile {
            username: new_username,
            email: new_email,
            password_hash: new_password_hash,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound(MSG_NO_PROFILE.to_string()))?;

    let jar = if renamed {
        tracing::info!(from = %profile.username, to = %updated.username, "Profile renamed");
        session::remember(jar, &updated.username)
    } else {
        jar
    };

    let view = profile_view(&state, &updated).await?;
    Ok((
        StatusCode::ACCEPTED,
        jar,
        Json(json!({
            "msg": "Profile updated.",
            "profile": view,
            "username": updated.username,
        })),
    ))
}

/// Delete a profile
///
/// The profile's tasks go with it (cascade), and the session cookie is
/// cleared. Responds 204 with an empty body.
pub async fn profile_delete(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Path(username): Path<String>,
) -> ApiResult<(StatusCode, SignedCookieJar)> {
    require_owner(&jar, &username)?;

    let profile = Profile::find_by_username(&state.db, &username)
        .await?
        .ok_or_else(|| ApiError::NotFound(MSG_NO_PROFILE.to_string()))?;

    Profile::delete(&state.db, profile.id).await?;

    tracing::info!(username = %profile.username, "Profile deleted");

    let jar = session::forget(jar);
    Ok((StatusCode::NO_CONTENT, jar))
}

/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /api/v1/accounts/login` - Verify credentials and issue the
///   session cookie
/// - `GET /api/v1/accounts/logout` - Clear the session cookie
///
/// Login success is 202 Accepted; a missing field or a bad
/// username/password combination are both 400 with an error body.
/// Registration lives with the other profile endpoints in
/// [`crate::routes::profiles`].

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::{MSG_BAD_CREDENTIALS, MSG_FIELDS_MISSING},
};
use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::SignedCookieJar;
use serde::Deserialize;
use serde_json::{json, Value};
use tasknest_shared::{auth::password, auth::session, models::profile::Profile};

/// Login request
///
/// Both fields are required; they are optional here so that absence maps
/// to the API's own validation error rather than a deserialization
/// failure.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Login name
    pub username: Option<String>,

    /// Plaintext password, verified against the stored hash
    pub password: Option<String>,
}

/// Login handler
///
/// Looks up the profile by username and verifies the password against
/// the stored Argon2id hash. On success the signed session cookie is
/// set, carrying the username as the authenticated identity.
///
/// # Errors
///
/// - `400`: missing fields, unknown username, or wrong password (the
///   latter two share one message so the response doesn't reveal which
///   usernames exist)
pub async fn login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Json(req): Json<LoginRequest>,
) -> ApiResult<(StatusCode, SignedCookieJar, Json<Value>)> {
    let (Some(username), Some(password)) = (req.username, req.password) else {
        return Err(ApiError::BadRequest(MSG_FIELDS_MISSING.to_string()));
    };

    let profile = Profile::find_by_username(&state.db, &username)
        .await?
        .ok_or_else(|| ApiError::BadRequest(MSG_BAD_CREDENTIALS.to_string()))?;

    let valid = password::verify_password(&password, &profile.password_hash)?;
    if !valid {
        return Err(ApiError::BadRequest(MSG_BAD_CREDENTIALS.to_string()));
    }

    tracing::info!(username = %profile.username, "Login succeeded");

    let jar = session::remember(jar, &profile.username);
    Ok((
        StatusCode::ACCEPTED,
        jar,
        Json(json!({ "msg": "Authenticated" })),
    ))
}

/// Logout handler
///
/// Removes the session cookie. Always succeeds, even without a session.
pub async fn logout(jar: SignedCookieJar) -> (SignedCookieJar, Json<Value>) {
    let jar = session::forget(jar);
    (jar, Json(json!({ "msg": "Logged out." })))
}

/// Route map endpoint
///
/// `GET /api/v1` returns a static map of route names to method+path
/// strings describing the API surface. No authentication required.

use axum::Json;
use serde_json::{json, Value};

/// Lists the routes this API exposes
pub async fn info() -> Json<Value> {
    Json(json!({
        "info": "GET /api/v1",
        "register": "POST /api/v1/accounts",
        "single profile detail": "GET /api/v1/accounts/<username>",
        "edit profile": "PUT /api/v1/accounts/<username>",
        "delete profile": "DELETE /api/v1/accounts/<username>",
        "login": "POST /api/v1/accounts/login",
        "logout": "GET /api/v1/accounts/logout",
        "user's tasks": "GET /api/v1/accounts/<username>/tasks",
        "create task": "POST /api/v1/accounts/<username>/tasks",
        "task detail": "GET /api/v1/accounts/<username>/tasks/<id>",
        "task update": "PUT /api/v1/accounts/<username>/tasks/<id>",
        "delete task": "DELETE /api/v1/accounts/<username>/tasks/<id>",
    }))
}

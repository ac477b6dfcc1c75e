/// Router contract tests that run without a database
///
/// These exercise everything the handlers decide before touching
/// PostgreSQL: the route map, validation order, and the owner check.
/// The app is built over a lazy pool that never connects.

mod common;

use axum::http::StatusCode;
use common::{bare_request, json_request, response_json, set_cookie, signed_cookie_for, TestContext};
use serde_json::json;

#[tokio::test]
async fn test_info_lists_api_surface() {
    let ctx = TestContext::without_database();

    let response = ctx.send(bare_request("GET", "/api/v1", None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["info"], "GET /api/v1");
    assert_eq!(body["register"], "POST /api/v1/accounts");
    assert_eq!(body["login"], "POST /api/v1/accounts/login");
    assert_eq!(body["logout"], "GET /api/v1/accounts/logout");
    assert_eq!(body["user's tasks"], "GET /api/v1/accounts/<username>/tasks");
    assert_eq!(
        body["task detail"],
        "GET /api/v1/accounts/<username>/tasks/<id>"
    );
}

#[tokio::test]
async fn test_health_reports_database_state() {
    let ctx = TestContext::without_database();

    let response = ctx.send(bare_request("GET", "/health", None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["database"], "disconnected");
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let ctx = TestContext::without_database();
    let cookie = signed_cookie_for("nhuntwalker");

    let response = ctx
        .send(bare_request(
            "GET",
            "/api/v1/accounts/logout",
            Some(&cookie),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Removal cookie has an empty value
    let cleared = set_cookie(&response).expect("Logout should set a removal cookie");
    assert_eq!(cleared, "tasknest_session=");

    let body = response_json(response).await;
    assert_eq!(body["msg"], "Logged out.");
}

#[tokio::test]
async fn test_profile_detail_requires_session() {
    let ctx = TestContext::without_database();

    let response = ctx
        .send(bare_request("GET", "/api/v1/accounts/nhuntwalker", None))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = response_json(response).await;
    assert_eq!(
        body["error"],
        "You do not have permission to access this profile."
    );
}

#[tokio::test]
async fn test_profile_detail_rejects_other_users_session() {
    // A non-owner gets 403 whether or not the profile exists; no
    // database lookup happens before the owner check.
    let ctx = TestContext::without_database();
    let cookie = signed_cookie_for("alice");

    let response = ctx
        .send(bare_request("GET", "/api/v1/accounts/bob", Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_profile_detail_rejects_forged_cookie() {
    // An unsigned cookie asserting the right username must not pass the
    // owner check.
    let ctx = TestContext::without_database();

    let response = ctx
        .send(bare_request(
            "GET",
            "/api/v1/accounts/alice",
            Some("tasknest_session=alice"),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_profile_update_and_delete_require_session() {
    let ctx = TestContext::without_database();

    let response = ctx
        .send(json_request(
            "PUT",
            "/api/v1/accounts/nhuntwalker",
            &json!({}),
            None,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = ctx
        .send(bare_request("DELETE", "/api/v1/accounts/nhuntwalker", None))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_register_with_missing_fields() {
    let ctx = TestContext::without_database();

    let response = ctx
        .send(json_request(
            "POST",
            "/api/v1/accounts",
            &json!({ "username": "nhuntwalker" }),
            None,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert_eq!(body["error"], "Some fields are missing");
}

#[tokio::test]
async fn test_register_with_empty_fields() {
    let ctx = TestContext::without_database();

    let response = ctx
        .send(json_request(
            "POST",
            "/api/v1/accounts",
            &json!({
                "username": "",
                "email": "n@example.com",
                "password": "pw",
                "password2": "pw",
            }),
            None,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert_eq!(body["error"], "Some fields are missing");
}

#[tokio::test]
async fn test_register_with_mismatched_passwords() {
    let ctx = TestContext::without_database();

    let response = ctx
        .send(json_request(
            "POST",
            "/api/v1/accounts",
            &json!({
                "username": "nhuntwalker",
                "email": "n@example.com",
                "password": "one",
                "password2": "two",
            }),
            None,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert_eq!(body["error"], "Passwords don't match");
}

#[tokio::test]
async fn test_login_with_missing_fields() {
    let ctx = TestContext::without_database();

    let response = ctx
        .send(json_request(
            "POST",
            "/api/v1/accounts/login",
            &json!({ "username": "nhuntwalker" }),
            None,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert_eq!(body["error"], "Some fields are missing");
}

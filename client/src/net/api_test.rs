use std::sync::{Arc, Mutex};

use axum::Json;
use axum::extract::RawQuery;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{delete, get, post};
use serde_json::{Value, json};

use super::*;
use crate::net::types::User;
use crate::state::auth::{TOKEN_KEY, USER_KEY};
use crate::test_support::{signed_in_app, spawn_api, test_app, user};
use crate::util::storage::Storage;

type Seen = Arc<Mutex<Vec<Option<String>>>>;

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers.get("authorization").and_then(|v| v.to_str().ok()).map(ToOwned::to_owned)
}

fn recording_router(seen: &Seen) -> axum::Router {
    let me = seen.clone();
    let login = seen.clone();
    axum::Router::new()
        .route(
            "/api/auth/me",
            get(move |headers: HeaderMap| {
                let me = me.clone();
                async move {
                    me.lock().unwrap().push(bearer(&headers));
                    Json(serde_json::to_value(user()).unwrap())
                }
            }),
        )
        .route(
            "/api/auth/login",
            post(move |headers: HeaderMap| {
                let login = login.clone();
                async move {
                    login.lock().unwrap().push(bearer(&headers));
                    Json(json!({"token": "jwt-new", "id": "u-1", "name": "Ops", "email": "ops@example.com"}))
                }
            }),
        )
}

fn unauthorized_router() -> axum::Router {
    let reject = || async { (StatusCode::UNAUTHORIZED, Json(json!({"message": "Invalid credentials"}))) };
    axum::Router::new()
        .route("/api/auth/login", post(reject))
        .route("/api/auth/register", post(reject))
        .route("/api/aws-accounts", get(reject))
}

#[test]
fn public_paths_are_login_and_register_only() {
    assert!(is_public_path("/auth/login"));
    assert!(is_public_path("/auth/register"));
    assert!(!is_public_path("/auth/me"));
    assert!(!is_public_path("/aws-accounts"));
}

#[tokio::test]
async fn bearer_token_sent_on_protected_calls_only() {
    let seen: Seen = Arc::default();
    let app = signed_in_app(&spawn_api(recording_router(&seen)).await);

    let me: User = app.ctx.api.get("/auth/me").await.unwrap();
    assert_eq!(me, user());
    let _: Value = app
        .ctx
        .api
        .post_json("/auth/login", &json!({"email": "ops@example.com", "password": "pw"}))
        .await
        .unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![Some("Bearer jwt-test".to_owned()), None]);
}

#[tokio::test]
async fn unauthorized_on_protected_call_clears_session_and_redirects() {
    let app = signed_in_app(&spawn_api(unauthorized_router()).await);

    let err = app.ctx.api.get::<Value>("/aws-accounts").await.unwrap_err();

    assert!(matches!(err, ApiError::Unauthorized));
    assert!(!app.ctx.auth.is_authenticated());
    assert_eq!(app.storage.get(TOKEN_KEY).unwrap(), None);
    assert_eq!(app.storage.get(USER_KEY).unwrap(), None);
    assert_eq!(app.ctx.router.current(), Route::Login);
}

#[tokio::test]
async fn unauthorized_on_login_or_register_is_a_plain_status_error() {
    let app = signed_in_app(&spawn_api(unauthorized_router()).await);

    for path in ["/auth/login", "/auth/register"] {
        let err = app.ctx.api.post_json::<_, Value>(path, &json!({})).await.unwrap_err();
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.backend_message(), Some("Invalid credentials"));
    }

    assert!(app.ctx.auth.is_authenticated());
    assert_eq!(app.storage.get(TOKEN_KEY).unwrap().as_deref(), Some("jwt-test"));
    assert!(app.ctx.router.history().is_empty());
}

#[tokio::test]
async fn unauthorized_without_token_does_not_redirect() {
    let app = test_app(&spawn_api(unauthorized_router()).await);

    let err = app.ctx.api.get::<Value>("/aws-accounts").await.unwrap_err();

    assert!(matches!(err, ApiError::Status { status: 401, .. }));
    assert!(app.ctx.router.history().is_empty());
}

#[tokio::test]
async fn error_status_carries_backend_message() {
    let router = axum::Router::new()
        .route(
            "/api/scans/{id}",
            get(|| async { (StatusCode::CONFLICT, Json(json!({"message": "Scan already running"}))) }),
        )
        .route("/api/resources/stats", get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }));
    let app = signed_in_app(&spawn_api(router).await);

    let err = app.ctx.api.get::<Value>("/scans/job-1").await.unwrap_err();
    assert_eq!(err.status(), Some(409));
    assert_eq!(err.backend_message(), Some("Scan already running"));

    let err = app.ctx.api.get::<Value>("/resources/stats").await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.backend_message(), None);
}

#[tokio::test]
async fn query_params_skip_absent_values() {
    let queries: Arc<Mutex<Vec<Option<String>>>> = Arc::default();
    let recorded = queries.clone();
    let router = axum::Router::new().route(
        "/api/violations",
        get(move |RawQuery(query): RawQuery| {
            let recorded = recorded.clone();
            async move {
                recorded.lock().unwrap().push(query);
                Json(json!([]))
            }
        }),
    );
    let app = signed_in_app(&spawn_api(router).await);

    let _: Vec<Value> = app.ctx.api.get_with_query("/violations", &[("status", Some("OPEN".into()))]).await.unwrap();
    let _: Vec<Value> = app.ctx.api.get_with_query("/violations", &[("status", None)]).await.unwrap();

    assert_eq!(*queries.lock().unwrap(), vec![Some("status=OPEN".to_owned()), None]);
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let router = axum::Router::new().route("/api/auth/me", get(|| async { Json(json!({"unexpected": true})) }));
    let app = signed_in_app(&spawn_api(router).await);

    let err = app.ctx.api.get::<User>("/auth/me").await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn delete_accepts_empty_body() {
    let router = axum::Router::new().route("/api/tag-policies/{id}", delete(|| async { StatusCode::NO_CONTENT }));
    let app = signed_in_app(&spawn_api(router).await);

    app.ctx.api.delete("/tag-policies/pol-1").await.unwrap();
}

use axum::Json;
use axum::http::StatusCode;
use axum::routing::get;
use serde_json::json;

use super::*;
use crate::test_support::{account, signed_in_app, spawn_api};

#[tokio::test]
async fn lists_every_connected_account() {
    let api = axum::Router::new()
        .route("/api/aws-accounts", get(|| async { Json(vec![account("acct-1"), account("acct-2")]) }));
    let app = signed_in_app(&spawn_api(api).await);

    let out = render(&app.ctx).await.unwrap();
    assert!(out.starts_with("AWS Accounts\n============\n"));
    assert!(out.contains("acct-1-alias  [✓ ACTIVE]"));
    assert!(out.contains("acct-2-alias  [✓ ACTIVE]"));
    assert!(out.contains("Role ARN:    arn:aws:iam::123456789012:role/ResonantReadOnly"));
}

#[tokio::test]
async fn no_accounts_shows_connect_hint() {
    let api = axum::Router::new().route("/api/aws-accounts", get(|| async { Json(json!([])) }));
    let app = signed_in_app(&spawn_api(api).await);

    let out = render(&app.ctx).await.unwrap();
    assert!(out.contains("No AWS accounts connected"));
    assert!(out.contains("resonant accounts add"));
}

#[tokio::test]
async fn expired_session_fails_the_page() {
    let api = axum::Router::new().route("/api/aws-accounts", get(|| async { StatusCode::UNAUTHORIZED }));
    let app = signed_in_app(&spawn_api(api).await);

    assert!(matches!(render(&app.ctx).await, Err(ApiError::Unauthorized)));
}

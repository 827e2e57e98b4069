use axum::Json;
use axum::http::StatusCode;
use axum::routing::get;
use serde_json::json;

use super::*;
use crate::state::router::Route;
use crate::test_support::{account, signed_in_app, spawn_api};

fn api(rate_status: StatusCode) -> axum::Router {
    axum::Router::new()
        .route("/api/aws-accounts", get(|| async { Json(vec![account("acct-1")]) }))
        .route(
            "/api/dashboard/compliance-rate",
            get(move || async move {
                let body = json!({
                    "totalResources": 4, "compliantResources": 3,
                    "nonCompliantResources": 1, "complianceRate": 75.0
                });
                (rate_status, Json(body))
            }),
        )
        .route("/api/violations/stats", get(|| async { Json(json!({"totalOpen": 2, "bySeverity": {"HIGH": 2}})) }))
        .route("/api/resources/stats", get(|| async { Json(json!({"total": 4, "byType": {"ec2:instance": 4}})) }))
        .route("/api/tag-policies/stats", get(|| async { Json(json!({"total": 1, "enabled": 1, "disabled": 0})) }))
}

#[test]
fn greeting_uses_first_name() {
    assert_eq!(greeting_name("Ada Lovelace"), "Ada");
    assert_eq!(greeting_name(""), "");
}

#[tokio::test]
async fn renders_every_section() {
    let app = signed_in_app(&spawn_api(api(StatusCode::OK)).await);
    let out = render(&app.ctx).await.unwrap();

    assert!(out.starts_with("Welcome back, Ops"));
    assert!(out.contains("1 AWS account connected"));
    assert!(out.contains("75.0%"));
    assert!(out.contains("2 open violations"));
    assert!(out.contains("    High     2"));
    assert!(out.contains("Across 1 resource type"));
    assert!(out.contains("[x] 2. Create Tag Policies"));
}

#[tokio::test]
async fn failed_section_degrades() {
    let app = signed_in_app(&spawn_api(api(StatusCode::INTERNAL_SERVER_ERROR)).await);
    let out = render(&app.ctx).await.unwrap();
    assert!(out.contains("Awaiting first scan"));
}

#[tokio::test]
async fn expired_session_fails_the_page() {
    let api = axum::Router::new().fallback(|| async { StatusCode::UNAUTHORIZED });
    let app = signed_in_app(&spawn_api(api).await);

    assert!(matches!(render(&app.ctx).await, Err(ApiError::Unauthorized)));
    assert_eq!(app.ctx.router.current(), Route::Login);
}

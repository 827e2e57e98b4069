use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use serde_json::json;

use super::*;
use super::keys::QueryKey;
use crate::net::types::{ScanStatus, Severity};
use crate::test_support::{account, policy, region, scan_job, signed_in_app, spawn_api, test_app, user, violation};

fn violations_api() -> axum::Router {
    axum::Router::new()
        .route("/api/violations", get(|| async { Json(vec![violation("v-1", ViolationStatus::Open)]) }))
        .route("/api/violations/{id}", get(|Path(id): Path<String>| async move { Json(violation(&id, ViolationStatus::Open)) }))
        .route("/api/violations/stats", get(|| async { Json(json!({"totalOpen": 1, "bySeverity": {"HIGH": 1}})) }))
        .route("/api/violations/accounts/{id}", get(|| async { Json(vec![violation("v-1", ViolationStatus::Open)]) }))
        .route("/api/violations/resources/{id}", get(|| async { Json(vec![violation("v-1", ViolationStatus::Open)]) }))
        .route("/api/violations/policies/{id}", get(|| async { Json(vec![violation("v-1", ViolationStatus::Open)]) }))
        .route(
            "/api/violations/{id}/ignore",
            post(|Path(id): Path<String>| async move { Json(violation(&id, ViolationStatus::Ignored)) }),
        )
        .route(
            "/api/dashboard/compliance-rate",
            get(|| async {
                Json(json!({
                    "totalResources": 10, "compliantResources": 9,
                    "nonCompliantResources": 1, "complianceRate": 90.0
                }))
            }),
        )
}

#[tokio::test]
async fn ignore_marks_every_violation_view_stale() {
    let app = signed_in_app(&spawn_api(violations_api()).await);
    let ctx = &app.ctx;

    use_violations(ctx, None).await.unwrap();
    use_violations(ctx, Some(ViolationStatus::Open)).await.unwrap();
    use_violation(ctx, "v-1").await.unwrap();
    use_violation_stats(ctx).await.unwrap();
    use_account_violations(ctx, "acct-1").await.unwrap();
    use_resource_violations(ctx, "res-1").await.unwrap();
    use_policy_violations(ctx, "pol-1").await.unwrap();
    use_compliance_rate(ctx).await.unwrap();

    let watched = [
        violations::list(None),
        violations::list(Some(&json!({"status": "OPEN"}))),
        violations::detail("v-1"),
        violation_extra::stats(),
        violation_extra::by_account("acct-1"),
        violation_extra::by_resource("res-1"),
        violation_extra::by_policy("pol-1"),
        keys::compliance_rate(),
    ];
    for key in &watched {
        assert_eq!(ctx.queries.is_stale(key), Some(false), "{key} fresh before");
    }

    let ignored = ignore_violation(ctx, "v-1").await.unwrap();
    assert_eq!(ignored.status, ViolationStatus::Ignored);

    for key in &watched {
        assert_eq!(ctx.queries.is_stale(key), Some(true), "{key} stale after");
    }
    let toasts = app.toasts.drain();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].title, "Violation Ignored");
    assert!(!toasts[0].is_error());
}

#[tokio::test]
async fn cached_query_is_served_without_refetch() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let api = axum::Router::new().route(
        "/api/aws-accounts",
        get(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            async { Json(vec![account("acct-1")]) }
        }),
    );
    let app = signed_in_app(&spawn_api(api).await);

    use_aws_accounts(&app.ctx).await.unwrap();
    use_aws_accounts(&app.ctx).await.unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    app.ctx.queries.invalidate(&aws_accounts::all());
    use_aws_accounts(&app.ctx).await.unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn filtered_accounts_match_json_fields() {
    let api = axum::Router::new().route(
        "/api/aws-accounts",
        get(|| async {
            let mut failed = account("acct-2");
            failed.status = crate::net::types::AccountStatus::Invalid;
            Json(vec![account("acct-1"), failed])
        }),
    );
    let app = signed_in_app(&spawn_api(api).await);

    let mut filters = Map::new();
    filters.insert("status".into(), json!("INVALID"));
    let accounts = use_aws_accounts_filtered(&app.ctx, Some(&filters)).await.unwrap();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].id, "acct-2");

    assert_eq!(use_aws_accounts_filtered(&app.ctx, None).await.unwrap().len(), 2);
}

#[tokio::test]
async fn login_stores_session_and_opens_dashboard() {
    let api = axum::Router::new().route(
        "/api/auth/login",
        post(|| async { Json(json!({"token": "jwt-new", "user": user()})) }),
    );
    let app = test_app(&spawn_api(api).await);

    let request = LoginRequest { email: "ops@example.com".into(), password: "secret".into() };
    use_login(&app.ctx, &request).await.unwrap();

    assert!(app.ctx.auth.is_authenticated());
    assert_eq!(app.ctx.auth.token().as_deref(), Some("jwt-new"));
    assert_eq!(app.ctx.router.current(), Route::Dashboard);
    assert!(app.toasts.drain().is_empty());
}

#[tokio::test]
async fn failed_login_reports_backend_message() {
    let api = axum::Router::new().route(
        "/api/auth/login",
        post(|| async { (StatusCode::UNAUTHORIZED, Json(json!({"message": "Invalid email or password"}))) }),
    );
    let app = test_app(&spawn_api(api).await);

    let request = LoginRequest { email: "ops@example.com".into(), password: "wrong".into() };
    let err = use_login(&app.ctx, &request).await.unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert!(!app.ctx.auth.is_authenticated());
    let toasts = app.toasts.drain();
    assert_eq!(toasts.len(), 1);
    assert!(toasts[0].is_error());
    assert_eq!(toasts[0].description, "Invalid email or password");
}

#[tokio::test]
async fn logout_clears_session_and_opens_login() {
    let app = signed_in_app("http://127.0.0.1:9/api");
    use_logout(&app.ctx).unwrap();

    assert!(!app.ctx.auth.is_authenticated());
    assert_eq!(app.ctx.router.current(), Route::Login);
}

type Regions = Arc<Mutex<Vec<AwsRegion>>>;

async fn list_regions(State(regions): State<Regions>) -> impl IntoResponse {
    Json(regions.lock().unwrap().clone())
}

async fn save_regions(State(regions): State<Regions>, Json(body): Json<serde_json::Value>) -> impl IntoResponse {
    let codes: Vec<String> = serde_json::from_value(body["enabledRegionCodes"].clone()).unwrap();
    let mut regions = regions.lock().unwrap();
    for region in regions.iter_mut() {
        region.enabled = codes.contains(&region.region_code);
    }
    Json(regions.clone())
}

#[tokio::test]
async fn region_save_round_trips_through_reload() {
    let regions: Regions =
        Arc::new(Mutex::new(vec![region("us-east-1", true), region("eu-west-1", false), region("ap-south-1", false)]));
    let api = axum::Router::new()
        .route("/api/aws-accounts/{id}/regions", get(list_regions).patch(save_regions))
        .with_state(regions);
    let app = signed_in_app(&spawn_api(api).await);
    let ctx = &app.ctx;

    let before = use_account_regions(ctx, "acct-1").await.unwrap();
    let all_codes: Vec<String> = before.iter().map(|r| r.region_code.clone()).collect();

    update_regions(ctx, "acct-1", all_codes).await.unwrap();
    assert_eq!(ctx.queries.is_stale(&keys::account_regions("acct-1")), Some(true));

    let after = use_account_regions(ctx, "acct-1").await.unwrap();
    assert!(after.iter().all(|r| r.enabled));
    assert_eq!(app.toasts.drain()[0].title, "Settings saved");
}

#[tokio::test]
async fn trigger_scan_invalidates_account_scan_views() {
    let api = axum::Router::new()
        .route(
            "/api/scans/accounts/{id}",
            get(|Path(id): Path<String>| async move { Json(vec![scan_job("job-0", &id, ScanStatus::Success)]) })
                .post(|Path(id): Path<String>| async move { Json(scan_job("job-1", &id, ScanStatus::Pending)) }),
        )
        .route("/api/scans/accounts/{id}/latest", get(|| async { StatusCode::NOT_FOUND }));
    let app = signed_in_app(&spawn_api(api).await);
    let ctx = &app.ctx;

    use_account_scans(ctx, "acct-1").await.unwrap();
    assert!(use_latest_scan(ctx, "acct-1").await.unwrap().is_none());

    let job = trigger_scan(ctx, "acct-1").await.unwrap();
    assert_eq!(job.id, "job-1");
    assert_eq!(ctx.queries.is_stale(&scan_extra::by_account("acct-1")), Some(true));
    assert_eq!(ctx.queries.is_stale(&scan_extra::latest("acct-1")), Some(true));
    assert_eq!(app.toasts.drain()[0].title, "Scan Started");
}

fn policies_api() -> axum::Router {
    axum::Router::new()
        .route(
            "/api/tag-policies",
            get(|| async { Json(vec![policy("pol-1", true)]) }).post(|| async { Json(policy("pol-2", true)) }),
        )
        .route("/api/tag-policies/stats", get(|| async { Json(json!({"total": 1, "enabled": 1, "disabled": 0})) }))
        .route(
            "/api/tag-policies/{id}",
            get(|Path(id): Path<String>| async move { Json(policy(&id, true)) })
                .delete(|| async { StatusCode::NO_CONTENT }),
        )
        .route("/api/tag-policies/{id}/enable", post(|Path(id): Path<String>| async move { Json(policy(&id, true)) }))
        .route("/api/tag-policies/{id}/disable", post(|Path(id): Path<String>| async move { Json(policy(&id, false)) }))
}

async fn prime_policy_views(ctx: &AppContext) -> [QueryKey; 3] {
    use_tag_policies(ctx, None).await.unwrap();
    use_tag_policy(ctx, "pol-1").await.unwrap();
    use_tag_policy_stats(ctx).await.unwrap();
    let watched = [tag_policies::list(None), tag_policies::detail("pol-1"), keys::tag_policy_stats()];
    for key in &watched {
        assert_eq!(ctx.queries.is_stale(key), Some(false), "{key} fresh before");
    }
    watched
}

#[tokio::test]
async fn policy_mutations_mark_list_and_stats_stale() {
    let app = signed_in_app(&spawn_api(policies_api()).await);
    let ctx = &app.ctx;
    let request = CreateTagPolicyRequest {
        name: "Require owner".into(),
        description: String::new(),
        required_tags: [("Owner".to_owned(), None)].into_iter().collect(),
        resource_types: vec!["ec2:instance".into()],
        severity: Severity::High,
        enabled: true,
    };

    let watched = prime_policy_views(ctx).await;
    assert_eq!(create_policy(ctx, &request).await.unwrap().id, "pol-2");
    for key in &watched {
        assert_eq!(ctx.queries.is_stale(key), Some(true), "{key} stale after create");
    }

    let watched = prime_policy_views(ctx).await;
    assert!(!disable_policy(ctx, "pol-1").await.unwrap().enabled);
    for key in &watched {
        assert_eq!(ctx.queries.is_stale(key), Some(true), "{key} stale after disable");
    }

    let watched = prime_policy_views(ctx).await;
    assert!(enable_policy(ctx, "pol-1").await.unwrap().enabled);
    for key in &watched {
        assert_eq!(ctx.queries.is_stale(key), Some(true), "{key} stale after enable");
    }

    let watched = prime_policy_views(ctx).await;
    delete_policy(ctx, "pol-1").await.unwrap();
    for key in &watched {
        assert_eq!(ctx.queries.is_stale(key), Some(true), "{key} stale after delete");
    }

    let titles: Vec<String> = app.toasts.drain().into_iter().map(|t| t.title).collect();
    assert_eq!(titles, ["Policy created", "Policy disabled", "Policy enabled", "Policy deleted"]);
}

#[tokio::test]
async fn failed_policy_mutation_uses_fixed_message() {
    let api = axum::Router::new().route(
        "/api/tag-policies/{id}/enable",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"message": "db down"}))) }),
    );
    let app = signed_in_app(&spawn_api(api).await);

    enable_policy(&app.ctx, "pol-1").await.unwrap_err();

    let toasts = app.toasts.drain();
    assert_eq!(toasts[0].description, "Failed to enable the policy. Please try again.");
}

#[tokio::test]
async fn resource_type_toggle_names_the_type() {
    let api = axum::Router::new().route(
        "/api/resource-type-settings/{ty}/enabled",
        put(|Path(ty): Path<String>| async move {
            Json(crate::test_support::resource_type_setting(&ty, false))
        }),
    );
    let app = signed_in_app(&spawn_api(api).await);

    let setting = update_resource_type_setting(&app.ctx, "s3:bucket", false).await.unwrap();
    assert!(!setting.enabled);
    assert_eq!(app.toasts.drain()[0].description, "Scanning of S3:BUCKET disabled");
}

#[tokio::test]
async fn test_connection_reports_region_count() {
    let api = axum::Router::new().route(
        "/api/aws-accounts/{id}/test",
        post(|| async {
            Json(json!({
                "success": true, "message": "ok", "accountId": "123456789012",
                "assumedRoleArn": "arn:aws:sts::123456789012:assumed-role/R/s", "availableRegionCount": 17
            }))
        }),
    );
    let app = signed_in_app(&spawn_api(api).await);

    test_connection(&app.ctx, "acct-1").await.unwrap();
    assert_eq!(
        app.toasts.drain()[0].description,
        "Connected to account 123456789012 with access to 17 regions"
    );
}

//! Shared fixtures for unit tests: sample records, an in-process mock API
//! server, and a ready-made [`AppContext`].

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::context::AppContext;
use crate::net::types::{
    AccountStatus, AwsAccount, AwsRegion, AwsResource, ComplianceViolation, ResourceTypeSetting, ScanJob, ScanStatus,
    Severity, TagPolicy, User, UserRole, ViolationDetails, ViolationStatus,
};
use crate::notify::ToastQueue;
use crate::state::theme::Theme;
use crate::util::storage::MemoryStorage;

pub const TS: &str = "2024-03-01T12:00:00Z";

pub fn user() -> User {
    User { id: "u-1".into(), email: "ops@example.com".into(), name: "Ops".into(), role: UserRole::User, enabled: true }
}

pub fn account(id: &str) -> AwsAccount {
    AwsAccount {
        id: id.into(),
        account_id: "123456789012".into(),
        account_alias: format!("{id}-alias"),
        role_arn: "arn:aws:iam::123456789012:role/ResonantReadOnly".into(),
        credential_type: "ROLE".into(),
        status: AccountStatus::Active,
        last_synced_at: None,
        created_at: TS.into(),
    }
}

pub fn scan_job(id: &str, account_id: &str, status: ScanStatus) -> ScanJob {
    ScanJob {
        id: id.into(),
        account_id: account_id.into(),
        account_alias: "prod".into(),
        status,
        resources_scanned: 0,
        violations_found: 0,
        violations_resolved: 0,
        started_at: TS.into(),
        completed_at: None,
        duration_seconds: None,
        error_message: None,
        created_at: TS.into(),
    }
}

pub fn violation(id: &str, status: ViolationStatus) -> ComplianceViolation {
    ComplianceViolation {
        id: id.into(),
        resource_id: "res-1".into(),
        resource_arn: "arn:aws:ec2:us-east-1:123456789012:instance/i-0abc".into(),
        resource_type: "ec2:instance".into(),
        resource_name: "web-1".into(),
        policy_id: "pol-1".into(),
        policy_name: "Require owner".into(),
        severity: Severity::High,
        status,
        violation_details: ViolationDetails { missing_tags: vec!["Owner".into()], ..ViolationDetails::default() },
        detected_at: TS.into(),
        resolved_at: None,
        updated_at: TS.into(),
    }
}

pub fn resource(id: &str) -> AwsResource {
    AwsResource {
        id: id.into(),
        resource_id: "i-0abc".into(),
        resource_arn: "arn:aws:ec2:us-east-1:123456789012:instance/i-0abc".into(),
        resource_type: "ec2:instance".into(),
        region: "us-east-1".into(),
        name: "web-1".into(),
        tags: [("Env".to_owned(), "prod".to_owned())].into_iter().collect(),
        metadata: serde_json::Map::new(),
        tag_count: 1,
        discovered_at: TS.into(),
        last_seen_at: TS.into(),
    }
}

pub fn policy(id: &str, enabled: bool) -> TagPolicy {
    TagPolicy {
        id: id.into(),
        name: "Require owner".into(),
        description: "Every resource needs an owner".into(),
        required_tags: [("Owner".to_owned(), None)].into_iter().collect(),
        resource_types: vec!["ec2:instance".into()],
        severity: Severity::High,
        enabled,
        created_at: TS.into(),
        updated_at: TS.into(),
    }
}

pub fn region(code: &str, enabled: bool) -> AwsRegion {
    AwsRegion {
        id: format!("r-{code}"),
        region_code: code.into(),
        enabled,
        last_scan_at: None,
        created_at: TS.into(),
    }
}

pub fn resource_type_setting(resource_type: &str, enabled: bool) -> ResourceTypeSetting {
    ResourceTypeSetting {
        id: format!("rts-{resource_type}"),
        resource_type: resource_type.into(),
        display_name: resource_type.to_uppercase(),
        description: String::new(),
        enabled,
        created_at: TS.into(),
        updated_at: TS.into(),
    }
}

/// Serve `app` on an ephemeral port; returns the API base URL.
pub async fn spawn_api(app: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api")
}

pub struct TestApp {
    pub ctx: AppContext,
    pub toasts: Arc<ToastQueue>,
    pub storage: Arc<MemoryStorage>,
}

/// Context over memory storage pointed at `api_url`, signed out.
pub fn test_app(api_url: &str) -> TestApp {
    test_app_with_storage(api_url, Arc::new(MemoryStorage::new()))
}

pub fn test_app_with_storage(api_url: &str, storage: Arc<MemoryStorage>) -> TestApp {
    let config = ClientConfig::new(api_url, "/tmp/resonant-unused").unwrap();
    let toasts = Arc::new(ToastQueue::new());
    let ctx = AppContext::new(config, storage.clone(), toasts.clone(), Theme::Light).unwrap();
    TestApp { ctx, toasts, storage }
}

/// Context that already holds a session token.
pub fn signed_in_app(api_url: &str) -> TestApp {
    let app = test_app(api_url);
    app.ctx.auth.set_auth(user(), "jwt-test".into()).unwrap();
    app
}

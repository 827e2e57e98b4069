//! Per-resource queries and mutations over [`AppContext`].
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages and CLI commands call these instead of services directly so that
//! reads share one cache and writes invalidate it consistently and report
//! through the notifier.
//!
//! DESIGN
//! ======
//! Queries are `use_*` functions returning the typed payload. Mutations are
//! named after the action and carry their toast texts and invalidation
//! sets inline. A violation transition invalidates `violations.all`, which
//! covers every account/resource/policy sub-list as well.

#[cfg(test)]
#[path = "hooks_test.rs"]
mod hooks_test;

use serde_json::{Map, Value, json};
use tracing::warn;

use super::client::Mutation;
use super::keys::{
    self, aws_accounts, resource_extra, resources, scan_extra, scans, tag_policies, violation_extra, violations,
};
use crate::context::AppContext;
use crate::net::error::ApiError;
use crate::net::types::{
    AuthResponse, AwsAccount, AwsRegion, AwsResource, ComplianceRate, ComplianceViolation, CreateAccountRequest,
    CreateTagPolicyRequest, ExternalIdResponse, LoginRequest, RegisterRequest, ResourceStats, ResourceTypeSetting,
    ScanJob, TagPolicy, TagPolicyStats, TestConnectionResponse, UpdateAliasRequest, UpdateRegionsRequest,
    UpdateTagPolicyRequest, User, ViolationStats, ViolationStatus,
};
use crate::notify::Toast;
use crate::state::router::Route;
use crate::util::storage::StorageError;

pub const LOGIN_FAILED: &str = "Login failed. Please check your credentials.";
pub const REGISTER_FAILED: &str = "Registration failed. Please try again.";

// =============================================================================
// AUTH
// =============================================================================

/// Log in, store the session, and go to the dashboard.
pub async fn use_login(ctx: &AppContext, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
    let mutation = Mutation::new("Login failed").error_fallback(LOGIN_FAILED);
    let response = ctx.queries.mutate(mutation, ctx.services.auth.login(request)).await?;
    start_session(ctx, &response);
    Ok(response)
}

/// Register, store the session, and go to the dashboard.
pub async fn use_register(ctx: &AppContext, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
    let mutation = Mutation::new("Registration failed").error_fallback(REGISTER_FAILED);
    let response = ctx.queries.mutate(mutation, ctx.services.auth.register(request)).await?;
    start_session(ctx, &response);
    Ok(response)
}

fn start_session(ctx: &AppContext, response: &AuthResponse) {
    if let Err(e) = ctx.auth.set_auth(response.user.clone(), response.token.clone()) {
        warn!(error = %e, "hooks: session not persisted");
    }
    ctx.router.navigate(Route::Dashboard);
}

/// Clear the session and go to the login page.
pub fn use_logout(ctx: &AppContext) -> Result<(), StorageError> {
    ctx.auth.clear_auth()?;
    ctx.router.navigate(Route::Login);
    Ok(())
}

pub async fn use_current_user(ctx: &AppContext) -> Result<User, ApiError> {
    let user = ctx.queries.fetch(keys::current_user(), || ctx.services.auth.current_user()).await?;
    if let Err(e) = ctx.auth.update_user(user.clone()) {
        warn!(error = %e, "hooks: refreshed user not persisted");
    }
    Ok(user)
}

// =============================================================================
// AWS ACCOUNTS
// =============================================================================

pub async fn use_aws_accounts(ctx: &AppContext) -> Result<Vec<AwsAccount>, ApiError> {
    ctx.queries.fetch(aws_accounts::all(), || ctx.services.aws_accounts.list_accounts()).await
}

pub async fn use_aws_account(ctx: &AppContext, id: &str) -> Result<AwsAccount, ApiError> {
    ctx.queries.fetch(aws_accounts::detail(id), || ctx.services.aws_accounts.get_account(id)).await
}

/// Accounts whose JSON fields equal every entry of `filters`
/// (e.g. `{"status": "ACTIVE"}`).
pub async fn use_aws_accounts_filtered(
    ctx: &AppContext,
    filters: Option<&Map<String, Value>>,
) -> Result<Vec<AwsAccount>, ApiError> {
    let key_filters = filters.map(|f| Value::Object(f.clone()));
    ctx.queries
        .fetch(aws_accounts::list(key_filters.as_ref()), || async {
            let accounts = ctx.services.aws_accounts.list_accounts().await?;
            Ok(match filters {
                Some(filters) => accounts.into_iter().filter(|a| account_matches(a, filters)).collect(),
                None => accounts,
            })
        })
        .await
}

fn account_matches(account: &AwsAccount, filters: &Map<String, Value>) -> bool {
    let Ok(Value::Object(fields)) = serde_json::to_value(account) else {
        return false;
    };
    filters.iter().all(|(k, v)| fields.get(k) == Some(v))
}

pub async fn use_account_regions(ctx: &AppContext, account_id: &str) -> Result<Vec<AwsRegion>, ApiError> {
    ctx.queries
        .fetch(keys::account_regions(account_id), || ctx.services.aws_accounts.get_regions(account_id))
        .await
}

pub async fn generate_external_id(ctx: &AppContext) -> Result<ExternalIdResponse, ApiError> {
    let mutation = Mutation::new("Error").error_message("Failed to generate External ID");
    ctx.queries.mutate(mutation, ctx.services.aws_accounts.generate_external_id()).await
}

pub async fn create_account(ctx: &AppContext, request: &CreateAccountRequest) -> Result<AwsAccount, ApiError> {
    let mutation = Mutation::new("Connection Failed")
        .error_fallback("Failed to connect AWS account")
        .success_toast("Success", "AWS account connected successfully")
        .invalidate(vec![aws_accounts::all()]);
    ctx.queries.mutate(mutation, ctx.services.aws_accounts.create_account(request)).await
}

pub async fn test_connection(ctx: &AppContext, id: &str) -> Result<TestConnectionResponse, ApiError> {
    let mutation = Mutation::new("Connection Test Failed")
        .error_fallback("Unable to connect to AWS account")
        .success_with(|r: &TestConnectionResponse| {
            Toast::success(
                "Connection Test Successful",
                format!("Connected to account {} with access to {} regions", r.account_id, r.available_region_count),
            )
        })
        .invalidate(vec![aws_accounts::all()]);
    ctx.queries.mutate(mutation, ctx.services.aws_accounts.test_connection(id)).await
}

pub async fn update_alias(ctx: &AppContext, id: &str, alias: &str) -> Result<AwsAccount, ApiError> {
    let request = UpdateAliasRequest { account_alias: alias.to_owned() };
    let mutation = Mutation::new("Error")
        .error_message("Failed to update alias")
        .success_toast("Success", "Account alias updated")
        .invalidate(vec![aws_accounts::all()]);
    ctx.queries.mutate(mutation, ctx.services.aws_accounts.update_alias(id, &request)).await
}

pub async fn delete_account(ctx: &AppContext, id: &str) -> Result<(), ApiError> {
    let mutation = Mutation::new("Error")
        .error_message("Failed to delete account")
        .success_toast("Success", "AWS account disconnected")
        .invalidate(vec![aws_accounts::all()]);
    ctx.queries.mutate(mutation, ctx.services.aws_accounts.delete_account(id)).await
}

/// Replace the enabled region set for an account.
pub async fn update_regions(
    ctx: &AppContext,
    account_id: &str,
    enabled_region_codes: Vec<String>,
) -> Result<Vec<AwsRegion>, ApiError> {
    let request = UpdateRegionsRequest { enabled_region_codes };
    let mutation = Mutation::new("Save failed")
        .error_message("Failed to update region configuration")
        .success_toast("Settings saved", "Region configuration updated successfully")
        .invalidate(vec![keys::account_regions(account_id), aws_accounts::detail(account_id)]);
    ctx.queries.mutate(mutation, ctx.services.aws_accounts.update_regions(account_id, &request)).await
}

pub async fn rediscover_regions(ctx: &AppContext, account_id: &str) -> Result<Vec<AwsRegion>, ApiError> {
    let mutation = Mutation::new("Rediscovery failed")
        .error_message("Failed to rediscover regions")
        .success_toast("Regions rediscovered", "New regions have been added to your account")
        .invalidate(vec![keys::account_regions(account_id)]);
    ctx.queries.mutate(mutation, ctx.services.aws_accounts.rediscover_regions(account_id)).await
}

// =============================================================================
// SCANS
// =============================================================================

pub async fn use_scans(ctx: &AppContext) -> Result<Vec<ScanJob>, ApiError> {
    ctx.queries.fetch(scans::all(), || ctx.services.scans.list_scans()).await
}

pub async fn use_scan_job(ctx: &AppContext, job_id: &str) -> Result<ScanJob, ApiError> {
    ctx.queries.fetch(scans::detail(job_id), || ctx.services.scans.get_scan_job(job_id)).await
}

pub async fn use_account_scans(ctx: &AppContext, account_id: &str) -> Result<Vec<ScanJob>, ApiError> {
    ctx.queries
        .fetch(scan_extra::by_account(account_id), || ctx.services.scans.get_account_scans(account_id))
        .await
}

/// `None` when the account has never been scanned.
pub async fn use_latest_scan(ctx: &AppContext, account_id: &str) -> Result<Option<ScanJob>, ApiError> {
    ctx.queries
        .fetch(scan_extra::latest(account_id), || ctx.services.scans.get_latest_scan(account_id))
        .await
}

pub async fn trigger_scan(ctx: &AppContext, account_id: &str) -> Result<ScanJob, ApiError> {
    let mutation = Mutation::new("Scan Failed")
        .error_fallback("Failed to start scan")
        .success_toast("Scan Started", "AWS account scan has been initiated")
        .invalidate_with(|job: &ScanJob| {
            vec![scan_extra::by_account(&job.account_id), scan_extra::latest(&job.account_id), scans::all()]
        });
    ctx.queries.mutate(mutation, ctx.services.scans.trigger_scan(account_id)).await
}

// =============================================================================
// VIOLATIONS
// =============================================================================

fn status_filter(status: Option<ViolationStatus>) -> Option<Value> {
    status.map(|s| json!({ "status": s.as_str() }))
}

pub async fn use_violations(
    ctx: &AppContext,
    status: Option<ViolationStatus>,
) -> Result<Vec<ComplianceViolation>, ApiError> {
    ctx.queries
        .fetch(violations::list(status_filter(status).as_ref()), || ctx.services.violations.list_violations(status))
        .await
}

pub async fn use_violation(ctx: &AppContext, id: &str) -> Result<ComplianceViolation, ApiError> {
    ctx.queries.fetch(violations::detail(id), || ctx.services.violations.get_violation(id)).await
}

pub async fn use_account_violations(ctx: &AppContext, account_id: &str) -> Result<Vec<ComplianceViolation>, ApiError> {
    ctx.queries
        .fetch(violation_extra::by_account(account_id), || ctx.services.violations.get_account_violations(account_id))
        .await
}

pub async fn use_resource_violations(
    ctx: &AppContext,
    resource_id: &str,
) -> Result<Vec<ComplianceViolation>, ApiError> {
    ctx.queries
        .fetch(violation_extra::by_resource(resource_id), || {
            ctx.services.violations.get_resource_violations(resource_id)
        })
        .await
}

pub async fn use_policy_violations(ctx: &AppContext, policy_id: &str) -> Result<Vec<ComplianceViolation>, ApiError> {
    ctx.queries
        .fetch(violation_extra::by_policy(policy_id), || ctx.services.violations.get_policy_violations(policy_id))
        .await
}

/// Refetched after the configured stats interval even without invalidation.
pub async fn use_violation_stats(ctx: &AppContext) -> Result<ViolationStats, ApiError> {
    ctx.queries
        .fetch_with_interval(violation_extra::stats(), Some(ctx.config.stats_refresh_interval), || {
            ctx.services.violations.get_violation_stats()
        })
        .await
}

fn violation_transition_keys(v: &ComplianceViolation) -> Vec<keys::QueryKey> {
    vec![
        violations::all(),
        violation_extra::by_resource(&v.resource_id),
        violation_extra::by_policy(&v.policy_id),
        violation_extra::stats(),
        keys::compliance_rate(),
    ]
}

pub async fn ignore_violation(ctx: &AppContext, id: &str) -> Result<ComplianceViolation, ApiError> {
    let mutation = Mutation::new("Error")
        .error_fallback("Failed to ignore violation")
        .success_toast("Violation Ignored", "The violation has been marked as ignored")
        .invalidate_with(violation_transition_keys);
    ctx.queries.mutate(mutation, ctx.services.violations.ignore_violation(id)).await
}

pub async fn reopen_violation(ctx: &AppContext, id: &str) -> Result<ComplianceViolation, ApiError> {
    let mutation = Mutation::new("Error")
        .error_fallback("Failed to reopen violation")
        .success_toast("Violation Reopened", "The violation has been reopened")
        .invalidate_with(violation_transition_keys);
    ctx.queries.mutate(mutation, ctx.services.violations.reopen_violation(id)).await
}

// =============================================================================
// RESOURCES
// =============================================================================

pub async fn use_resources(ctx: &AppContext, resource_type: Option<&str>) -> Result<Vec<AwsResource>, ApiError> {
    let filters = resource_type.map(|t| json!({ "type": t }));
    ctx.queries
        .fetch(resources::list(filters.as_ref()), || ctx.services.resources.list_resources(resource_type))
        .await
}

pub async fn use_resource(ctx: &AppContext, id: &str) -> Result<AwsResource, ApiError> {
    ctx.queries.fetch(resources::detail(id), || ctx.services.resources.get_resource(id)).await
}

pub async fn use_account_resources(ctx: &AppContext, account_id: &str) -> Result<Vec<AwsResource>, ApiError> {
    ctx.queries
        .fetch(resource_extra::by_account(account_id), || ctx.services.resources.get_account_resources(account_id))
        .await
}

pub async fn use_resource_stats(ctx: &AppContext) -> Result<ResourceStats, ApiError> {
    ctx.queries.fetch(resource_extra::stats(), || ctx.services.resources.get_resource_stats()).await
}

// =============================================================================
// TAG POLICIES
// =============================================================================

pub async fn use_tag_policies(ctx: &AppContext, enabled: Option<bool>) -> Result<Vec<TagPolicy>, ApiError> {
    let filters = enabled.map(|e| json!({ "enabled": e }));
    ctx.queries
        .fetch(tag_policies::list(filters.as_ref()), || ctx.services.tag_policies.get_all(enabled))
        .await
}

pub async fn use_tag_policy(ctx: &AppContext, id: &str) -> Result<TagPolicy, ApiError> {
    ctx.queries.fetch(tag_policies::detail(id), || ctx.services.tag_policies.get_by_id(id)).await
}

pub async fn use_tag_policy_stats(ctx: &AppContext) -> Result<TagPolicyStats, ApiError> {
    ctx.queries.fetch(keys::tag_policy_stats(), || ctx.services.tag_policies.get_stats()).await
}

pub async fn create_policy(ctx: &AppContext, request: &CreateTagPolicyRequest) -> Result<TagPolicy, ApiError> {
    let mutation = Mutation::new("Error")
        .error_message("Failed to create the policy. Please try again.")
        .success_toast("Policy created", "The tag policy has been created successfully.")
        .invalidate(vec![tag_policies::all()]);
    ctx.queries.mutate(mutation, ctx.services.tag_policies.create(request)).await
}

pub async fn update_policy(
    ctx: &AppContext,
    id: &str,
    request: &UpdateTagPolicyRequest,
) -> Result<TagPolicy, ApiError> {
    let mutation = Mutation::new("Error")
        .error_message("Failed to update the policy. Please try again.")
        .success_toast("Policy updated", "The tag policy has been updated successfully.")
        .invalidate(vec![tag_policies::all()]);
    ctx.queries.mutate(mutation, ctx.services.tag_policies.update(id, request)).await
}

pub async fn enable_policy(ctx: &AppContext, id: &str) -> Result<TagPolicy, ApiError> {
    let mutation = Mutation::new("Error")
        .error_message("Failed to enable the policy. Please try again.")
        .success_toast("Policy enabled", "The policy has been enabled successfully.")
        .invalidate(vec![tag_policies::all()]);
    ctx.queries.mutate(mutation, ctx.services.tag_policies.enable(id)).await
}

pub async fn disable_policy(ctx: &AppContext, id: &str) -> Result<TagPolicy, ApiError> {
    let mutation = Mutation::new("Error")
        .error_message("Failed to disable the policy. Please try again.")
        .success_toast("Policy disabled", "The policy has been disabled successfully.")
        .invalidate(vec![tag_policies::all()]);
    ctx.queries.mutate(mutation, ctx.services.tag_policies.disable(id)).await
}

pub async fn delete_policy(ctx: &AppContext, id: &str) -> Result<(), ApiError> {
    let mutation = Mutation::new("Error")
        .error_message("Failed to delete the policy. Please try again.")
        .success_toast("Policy deleted", "The policy has been deleted successfully.")
        .invalidate(vec![tag_policies::all()]);
    ctx.queries.mutate(mutation, ctx.services.tag_policies.delete(id)).await
}

// =============================================================================
// SETTINGS + DASHBOARD
// =============================================================================

pub async fn use_resource_type_settings(ctx: &AppContext) -> Result<Vec<ResourceTypeSetting>, ApiError> {
    ctx.queries
        .fetch(keys::resource_type_settings(), || ctx.services.resource_type_settings.get_all())
        .await
}

pub async fn update_resource_type_setting(
    ctx: &AppContext,
    resource_type: &str,
    enabled: bool,
) -> Result<ResourceTypeSetting, ApiError> {
    let mutation = Mutation::new("Error")
        .error_fallback("Failed to update resource type")
        .success_with(|s: &ResourceTypeSetting| {
            let state = if s.enabled { "enabled" } else { "disabled" };
            Toast::success("Settings saved", format!("Scanning of {} {state}", s.display_name))
        })
        .invalidate(vec![keys::resource_type_settings()]);
    ctx.queries
        .mutate(mutation, ctx.services.resource_type_settings.update_enabled(resource_type, enabled))
        .await
}

/// Refetched after the configured stats interval even without invalidation.
pub async fn use_compliance_rate(ctx: &AppContext) -> Result<ComplianceRate, ApiError> {
    ctx.queries
        .fetch_with_interval(keys::compliance_rate(), Some(ctx.config.stats_refresh_interval), || {
            ctx.services.dashboard.compliance_rate()
        })
        .await
}

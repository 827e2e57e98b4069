//! One account: header, last scan, stats and a violations preview.

#[cfg(test)]
#[path = "aws_account_detail_test.rs"]
mod aws_account_detail_test;

use time::OffsetDateTime;

use super::optional_section;
use crate::components::account_card::display_name;
use crate::components::stats_card::{StatItem, render_stats_grid};
use crate::components::status_badge::{account_badge, severity_badge};
use crate::components::table::{plural, render_table};
use crate::context::AppContext;
use crate::net::error::ApiError;
use crate::net::types::{ComplianceViolation, ScanJob, ScanStatus, ViolationStatus};
use crate::query::hooks;
use crate::util::time_ago::time_ago;

pub const PREVIEW_LIMIT: usize = 5;

/// "Last Scan" stat for the latest job, if any.
#[must_use]
pub fn last_scan_stat(latest: Option<&ScanJob>, now: OffsetDateTime) -> StatItem {
    let Some(job) = latest else {
        return StatItem::new("Last Scan", "Never", "No scans yet");
    };
    let when = time_ago(job.completed_at.as_deref().unwrap_or(&job.started_at), now);
    let status = match job.status {
        ScanStatus::Success => "Completed successfully",
        ScanStatus::Failed => "Failed",
        ScanStatus::Pending | ScanStatus::Running => "In progress",
    };
    StatItem::new("Last Scan", when, status)
}

/// Label for a violation row: resource name, else the last ARN segment.
#[must_use]
pub fn violation_resource_label(v: &ComplianceViolation) -> &str {
    if !v.resource_name.is_empty() {
        return &v.resource_name;
    }
    v.resource_arn.rsplit('/').next().unwrap_or(&v.resource_arn)
}

fn latest_scan_summary(job: &ScanJob, now: OffsetDateTime) -> Option<String> {
    if job.status != ScanStatus::Success {
        return None;
    }
    let completed = job.completed_at.as_deref()?;
    let mut out = format!("Latest Scan Summary\nCompleted {}\n", time_ago(completed, now));
    out.push_str(&render_table(
        &["Resources Scanned", "Violations Found", "Violations Resolved"],
        &[vec![
            job.resources_scanned.to_string(),
            job.violations_found.to_string(),
            job.violations_resolved.to_string(),
        ]],
    ));
    Some(out)
}

pub async fn render(ctx: &AppContext, account_id: &str) -> Result<String, ApiError> {
    let account = hooks::use_aws_account(ctx, account_id).await?;
    let (latest, violations, resources) = tokio::join!(
        hooks::use_latest_scan(ctx, account_id),
        hooks::use_account_violations(ctx, account_id),
        hooks::use_account_resources(ctx, account_id),
    );
    let latest = optional_section("latest scan", latest)?.flatten();
    let violations = optional_section("violations", violations)?.unwrap_or_default();
    let resources = optional_section("resources", resources)?.unwrap_or_default();
    let now = OffsetDateTime::now_utc();

    let open: Vec<&ComplianceViolation> = violations.iter().filter(|v| v.status == ViolationStatus::Open).collect();

    let mut out = String::new();
    out.push_str(&format!("{}  {}\n", display_name(&account), account_badge(account.status)));
    out.push_str(&format!("Account {} • {}\n", account.account_id, account.role_arn));
    out.push('\n');
    out.push_str(&render_stats_grid(&[
        StatItem::new("Resources", resources.len().to_string(), "Discovered resources"),
        StatItem::new(
            "Open Violations",
            open.len().to_string(),
            if open.is_empty() { "All clear" } else { "Requires attention" },
        ),
        last_scan_stat(latest.as_ref(), now),
    ]));
    out.push('\n');

    match latest.as_ref() {
        Some(job) if !job.status.is_terminal() => {
            out.push_str(&format!("Scan {} in progress. Watch it with `resonant scans status {} --watch`.\n", job.id, job.id));
        }
        Some(job) => {
            if let Some(summary) = latest_scan_summary(job, now) {
                out.push_str(&summary);
            }
        }
        None => {
            out.push_str("No scans yet\nStart your first scan to discover resources and evaluate compliance\n");
            out.push_str(&format!("Run `resonant scans trigger {account_id}`.\n"));
        }
    }

    if !open.is_empty() {
        out.push_str(&format!("\nRecent Violations\n{}\n", plural(open.len() as u64, "open violation", "open violations")));
        let rows: Vec<Vec<String>> = open
            .iter()
            .take(PREVIEW_LIMIT)
            .map(|v| {
                vec![
                    violation_resource_label(v).to_owned(),
                    v.policy_name.clone(),
                    severity_badge(v.severity).to_string(),
                ]
            })
            .collect();
        out.push_str(&render_table(&["Resource", "Policy", "Severity"], &rows));
    }
    Ok(out)
}

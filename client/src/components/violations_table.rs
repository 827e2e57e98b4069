//! Compliance violation table and detail view.

#[cfg(test)]
#[path = "violations_table_test.rs"]
mod violations_table_test;

use time::OffsetDateTime;

use super::status_badge::{severity_badge, violation_badge};
use super::table::{plural, render_table, truncate};
use crate::net::types::{ComplianceViolation, ViolationDetails, ViolationStatus};
use crate::util::time_ago::time_ago;

pub const EMPTY_TEXT: &str = "No violations found";

/// Client-side status filter applied on top of whatever the query returned.
/// `None` shows every status.
#[must_use]
pub fn filter_by_status(
    violations: &[ComplianceViolation],
    status: Option<ViolationStatus>,
) -> Vec<&ComplianceViolation> {
    violations.iter().filter(|v| status.is_none_or(|s| v.status == s)).collect()
}

/// One-line summary of what the resource is missing or has wrong.
#[must_use]
pub fn details_summary(details: &ViolationDetails) -> String {
    let mut parts = Vec::new();
    if !details.missing_tags.is_empty() {
        parts.push(format!("missing: {}", details.missing_tags.join(", ")));
    }
    if !details.invalid_tags.is_empty() {
        let keys: Vec<&str> = details.invalid_tags.keys().map(String::as_str).collect();
        parts.push(format!("invalid: {}", keys.join(", ")));
    }
    parts.join("; ")
}

#[must_use]
pub fn render_violations_table(
    violations: &[ComplianceViolation],
    status: Option<ViolationStatus>,
    now: OffsetDateTime,
) -> String {
    let shown = filter_by_status(violations, status);
    let mut out = String::from("Compliance Violations\n");
    out.push_str(&format!("{} found\n", plural(shown.len() as u64, "violation", "violations")));
    if shown.is_empty() {
        out.push_str(&format!("\n{EMPTY_TEXT}\n"));
        return out;
    }

    let rows: Vec<Vec<String>> = shown
        .iter()
        .map(|v| {
            vec![
                v.id.clone(),
                truncate(resource_label(v), 40),
                v.policy_name.clone(),
                severity_badge(v.severity).to_string(),
                violation_badge(v.status).to_string(),
                time_ago(&v.detected_at, now),
            ]
        })
        .collect();
    out.push('\n');
    out.push_str(&render_table(&["ID", "Resource", "Policy", "Severity", "Status", "Detected"], &rows));
    out
}

/// Full view of one violation, including per-tag details.
#[must_use]
pub fn render_violation_detail(v: &ComplianceViolation, now: OffsetDateTime) -> String {
    let mut out = String::new();
    out.push_str(&format!("Violation {}  {}  {}\n", v.id, severity_badge(v.severity), violation_badge(v.status)));
    out.push_str(&format!("Resource:  {} ({})\n", resource_label(v), v.resource_type));
    out.push_str(&format!("ARN:       {}\n", v.resource_arn));
    out.push_str(&format!("Policy:    {}\n", v.policy_name));
    out.push_str(&format!("Detected:  {}\n", time_ago(&v.detected_at, now)));
    if let Some(resolved) = v.resolved_at.as_deref() {
        out.push_str(&format!("Resolved:  {}\n", time_ago(resolved, now)));
    }

    if !v.violation_details.missing_tags.is_empty() {
        out.push_str("\nMissing tags:\n");
        for tag in &v.violation_details.missing_tags {
            out.push_str(&format!("  - {tag}\n"));
        }
    }
    if !v.violation_details.invalid_tags.is_empty() {
        out.push_str("\nInvalid tags:\n");
        for (key, invalid) in &v.violation_details.invalid_tags {
            out.push_str(&format!("  - {key} = {:?} (allowed: {})\n", invalid.current, invalid.allowed.join(", ")));
        }
    }
    out
}

fn resource_label(v: &ComplianceViolation) -> &str {
    if v.resource_name.is_empty() { &v.resource_id } else { &v.resource_name }
}

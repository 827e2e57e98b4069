//! Authenticated landing page: headline stats and the onboarding guide.
//!
//! SYSTEM CONTEXT
//! ==============
//! Sections load concurrently. Compliance rate and violation stats refresh
//! on the configured stats interval through their hooks.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use super::{heading, optional_section};
use crate::components::getting_started::{GuideInput, render_getting_started};
use crate::components::non_compliant_card::render_non_compliant_card;
use crate::components::stats_card::{
    StatItem, active_policies_stat, compliance_rate_stat, connected_accounts_stat, render_stats_grid,
};
use crate::components::table::plural;
use crate::context::AppContext;
use crate::net::error::ApiError;
use crate::net::types::{ResourceStats, ViolationStats};
use crate::query::hooks;

/// First word of the signed-in user's name.
#[must_use]
pub fn greeting_name(full_name: &str) -> &str {
    full_name.split_whitespace().next().unwrap_or(full_name)
}

fn non_compliant_stat(stats: Option<&ViolationStats>) -> StatItem {
    match stats {
        Some(s) if s.total_open > 0 => StatItem::new(
            "Non-Compliant",
            s.total_open.to_string(),
            plural(s.total_open, "open violation", "open violations"),
        ),
        _ => StatItem::new("Non-Compliant", "0", "No violations detected"),
    }
}

fn resources_stat(stats: Option<&ResourceStats>) -> StatItem {
    match stats {
        Some(s) if s.total > 0 => StatItem::new(
            "Resources",
            s.total.to_string(),
            format!("Across {}", plural(s.by_type.len() as u64, "resource type", "resource types")),
        ),
        _ => StatItem::new("Resources", "0", "No resources discovered"),
    }
}

pub async fn render(ctx: &AppContext) -> Result<String, ApiError> {
    let (accounts, rate, violations, resources, policies) = tokio::join!(
        hooks::use_aws_accounts(ctx),
        hooks::use_compliance_rate(ctx),
        hooks::use_violation_stats(ctx),
        hooks::use_resource_stats(ctx),
        hooks::use_tag_policy_stats(ctx),
    );
    let accounts = optional_section("accounts", accounts)?.unwrap_or_default();
    let rate = optional_section("compliance rate", rate)?;
    let violations = optional_section("violation stats", violations)?;
    let resources = optional_section("resource stats", resources)?;
    let policies = optional_section("policy stats", policies)?;

    let name = ctx.auth.user().map(|u| u.name).unwrap_or_default();
    let mut out = heading(
        &format!("Welcome back, {}", greeting_name(&name)),
        "Here's an overview of your AWS tag compliance status",
    );
    out.push('\n');
    out.push_str(&render_stats_grid(&[
        connected_accounts_stat(accounts.len()),
        compliance_rate_stat(rate.as_ref()),
        active_policies_stat(policies.as_ref()),
        non_compliant_stat(violations.as_ref()),
        resources_stat(resources.as_ref()),
    ]));
    out.push('\n');
    out.push_str(&render_non_compliant_card(violations.as_ref()));
    out.push('\n');
    out.push_str(&render_getting_started(GuideInput {
        accounts: accounts.len() as u64,
        policies: policies.map_or(0, |p| p.total),
        enabled_policies: policies.map_or(0, |p| p.enabled),
    }));
    Ok(out)
}

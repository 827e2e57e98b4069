//! Tag policy stats and list.

#[cfg(test)]
#[path = "tag_policies_test.rs"]
mod tag_policies_test;

use super::{heading, optional_section};
use crate::components::policy_list::{render_policy_list, render_policy_stats};
use crate::components::table::plural;
use crate::context::AppContext;
use crate::net::error::ApiError;
use crate::query::hooks;

pub async fn render(ctx: &AppContext, enabled: Option<bool>) -> Result<String, ApiError> {
    let (policies, stats) = tokio::join!(hooks::use_tag_policies(ctx, enabled), hooks::use_tag_policy_stats(ctx));
    let policies = policies?;
    let stats = optional_section("policy stats", stats)?;

    let mut out = heading("Tag Policies", "Define required tags and validation rules for your AWS resources");
    if let Some(stats) = stats {
        out.push('\n');
        out.push_str(&render_policy_stats(&stats));
    }
    out.push_str("\nAll Policies\n");
    out.push_str(&plural(policies.len() as u64, "policy", "policies"));
    out.push_str("\n\n");
    out.push_str(&render_policy_list(&policies));
    Ok(out)
}

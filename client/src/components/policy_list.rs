//! Tag policy table, detail view and stats strip.

#[cfg(test)]
#[path = "policy_list_test.rs"]
mod policy_list_test;

use super::stats_card::{StatItem, render_stats_grid};
use super::status_badge::severity_badge;
use super::table::{plural, render_table, truncate};
use crate::net::types::{RequiredTags, TagPolicy, TagPolicyStats};

pub const EMPTY_TEXT: &str = "No policies found\nCreate your first tag policy to get started\n";

/// `Owner=*, Env=prod|dev`.
#[must_use]
pub fn required_tags_summary(tags: &RequiredTags) -> String {
    tags.iter()
        .map(|(key, allowed)| match allowed {
            Some(values) if !values.is_empty() => format!("{key}={}", values.join("|")),
            _ => format!("{key}=*"),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[must_use]
pub fn render_policy_list(policies: &[TagPolicy]) -> String {
    if policies.is_empty() {
        return EMPTY_TEXT.to_owned();
    }
    let rows: Vec<Vec<String>> = policies
        .iter()
        .map(|p| {
            vec![
                p.id.clone(),
                truncate(&p.name, 30),
                truncate(&p.description, 40),
                severity_badge(p.severity).to_string(),
                plural(p.resource_types.len() as u64, "type", "types"),
                if p.enabled { "Enabled" } else { "Disabled" }.to_owned(),
            ]
        })
        .collect();
    render_table(&["ID", "Name", "Description", "Severity", "Resources", "Status"], &rows)
}

#[must_use]
pub fn render_policy_detail(p: &TagPolicy) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}  {}\n", p.name, severity_badge(p.severity)));
    out.push_str(&format!("  ID:             {}\n", p.id));
    out.push_str(&format!("  Status:         {}\n", if p.enabled { "Enabled" } else { "Disabled" }));
    if !p.description.is_empty() {
        out.push_str(&format!("  Description:    {}\n", p.description));
    }
    out.push_str(&format!("  Resource types: {}\n", p.resource_types.join(", ")));
    out.push_str(&format!("  Required tags:  {}\n", required_tags_summary(&p.required_tags)));
    out
}

#[must_use]
pub fn render_policy_stats(stats: &TagPolicyStats) -> String {
    render_stats_grid(&[
        StatItem::new("Total Policies", stats.total.to_string(), "All tag policies"),
        StatItem::new("Enabled", stats.enabled.to_string(), "Actively evaluated"),
        StatItem::new("Disabled", stats.disabled.to_string(), "Not evaluated"),
    ])
}

//! Headline metric cards.

#[cfg(test)]
#[path = "stats_card_test.rs"]
mod stats_card_test;

use super::table::plural;
use crate::net::types::{ComplianceRate, TagPolicyStats};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatItem {
    pub title: String,
    pub value: String,
    pub description: String,
}

impl StatItem {
    #[must_use]
    pub fn new(title: impl Into<String>, value: impl Into<String>, description: impl Into<String>) -> Self {
        Self { title: title.into(), value: value.into(), description: description.into() }
    }
}

#[must_use]
pub fn render_stats_card(item: &StatItem) -> String {
    format!("{}\n  {}\n  {}\n", item.title, item.value, item.description)
}

/// Cards separated by blank lines.
#[must_use]
pub fn render_stats_grid(items: &[StatItem]) -> String {
    items.iter().map(render_stats_card).collect::<Vec<_>>().join("\n")
}

#[must_use]
pub fn connected_accounts_stat(count: usize) -> StatItem {
    let description = if count == 0 {
        "No AWS accounts connected".to_owned()
    } else {
        format!("{} connected", plural(count as u64, "AWS account", "AWS accounts"))
    };
    StatItem::new("Connected Accounts", count.to_string(), description)
}

/// `None` means the rate is unknown (never scanned, or fetch failed).
#[must_use]
pub fn compliance_rate_stat(rate: Option<&ComplianceRate>) -> StatItem {
    match rate {
        Some(rate) if rate.total_resources > 0 => StatItem::new(
            "Compliance Rate",
            format!("{:.1}%", rate.compliance_rate),
            format!("{} of {} resources compliant", rate.compliant_resources, rate.total_resources),
        ),
        _ => StatItem::new("Compliance Rate", "0%", "Awaiting first scan"),
    }
}

#[must_use]
pub fn active_policies_stat(stats: Option<&TagPolicyStats>) -> StatItem {
    match stats {
        Some(stats) if stats.total > 0 => StatItem::new(
            "Active Policies",
            stats.enabled.to_string(),
            format!("{} configured", plural(stats.total, "policy", "policies")),
        ),
        _ => StatItem::new("Active Policies", "0", "No policies configured"),
    }
}

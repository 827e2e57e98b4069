//! AWS resource inventory table.

#[cfg(test)]
#[path = "resources_table_test.rs"]
mod resources_table_test;

use std::collections::BTreeSet;

use time::OffsetDateTime;

use super::table::{plural, render_table, truncate};
use crate::net::types::AwsResource;
use crate::util::time_ago::time_ago;

pub const EMPTY_TEXT: &str = "No resources found";

/// Distinct resource types, sorted, for the type filter.
#[must_use]
pub fn resource_types(resources: &[AwsResource]) -> Vec<&str> {
    let set: BTreeSet<&str> = resources.iter().map(|r| r.resource_type.as_str()).collect();
    set.into_iter().collect()
}

#[must_use]
pub fn render_resources_table(resources: &[AwsResource], now: OffsetDateTime) -> String {
    let mut out = String::from("AWS Resources\n");
    out.push_str(&format!("{}\n", plural(resources.len() as u64, "resource", "resources")));
    if resources.is_empty() {
        out.push_str(&format!("\n{EMPTY_TEXT}\n"));
        return out;
    }
    let rows: Vec<Vec<String>> = resources
        .iter()
        .map(|r| {
            vec![
                r.id.clone(),
                truncate(if r.name.is_empty() { &r.resource_id } else { &r.name }, 40),
                r.resource_type.clone(),
                r.region.clone(),
                r.tag_count.to_string(),
                time_ago(&r.last_seen_at, now),
            ]
        })
        .collect();
    out.push('\n');
    out.push_str(&render_table(&["ID", "Name", "Type", "Region", "Tags", "Last Seen"], &rows));
    out
}

#[must_use]
pub fn render_resource_detail(r: &AwsResource, now: OffsetDateTime) -> String {
    let mut out = String::from("Resource Details\n");
    out.push_str(&format!("Name:         {}\n", r.name));
    out.push_str(&format!("Type:         {}\n", r.resource_type));
    out.push_str(&format!("Region:       {}\n", r.region));
    out.push_str(&format!("Resource ID:  {}\n", r.resource_id));
    out.push_str(&format!("ARN:          {}\n", r.resource_arn));
    out.push_str(&format!("Discovered:   {}\n", time_ago(&r.discovered_at, now)));
    out.push_str(&format!("Last seen:    {}\n", time_ago(&r.last_seen_at, now)));
    out.push_str("Tags:\n");
    if r.tags.is_empty() {
        out.push_str("  (none)\n");
    }
    for (key, value) in &r.tags {
        out.push_str(&format!("  {key} = {value}\n"));
    }
    out
}

//! Open-violation count with a per-severity breakdown.

#[cfg(test)]
#[path = "non_compliant_card_test.rs"]
mod non_compliant_card_test;

use super::status_badge::severity_label;
use crate::net::types::{Severity, ViolationStats};

pub const TITLE: &str = "Non-Compliant Resources";

/// `None` renders the load-failure state.
#[must_use]
pub fn render_non_compliant_card(stats: Option<&ViolationStats>) -> String {
    let mut out = format!("{TITLE}\n");
    let Some(stats) = stats else {
        out.push_str("  Failed to load\n");
        return out;
    };
    out.push_str(&format!("  {}\n  Open violations\n", stats.total_open));
    if stats.total_open > 0 {
        for severity in Severity::ALL.iter().rev() {
            let count = stats.by_severity.get(severity).copied().unwrap_or(0);
            if count > 0 {
                out.push_str(&format!("    {:<9}{count}\n", severity_label(*severity)));
            }
        }
    }
    out
}

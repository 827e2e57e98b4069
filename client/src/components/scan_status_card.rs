//! Live scan progress card.
//!
//! Renders one observation of a polled scan job. The CLI redraws it each
//! time the poller publishes a new state.

#[cfg(test)]
#[path = "scan_status_card_test.rs"]
mod scan_status_card_test;

use time::OffsetDateTime;

use super::status_badge::scan_badge;
use super::table::render_table;
use crate::net::types::{ScanJob, ScanStatus};
use crate::poll::scan_status::PollState;
use crate::util::time_ago::time_ago;

pub const LOADING_TEXT: &str = "Loading scan...";

#[must_use]
pub fn card_title(status: ScanStatus) -> &'static str {
    match status {
        ScanStatus::Pending | ScanStatus::Running => "Scan in Progress",
        ScanStatus::Success => "Scan Complete",
        ScanStatus::Failed => "Scan Failed",
    }
}

#[must_use]
pub fn render_poll_state(state: &PollState, now: OffsetDateTime) -> String {
    match state {
        PollState::Loading => format!("{LOADING_TEXT}\n"),
        PollState::Observed(job) => render_scan_status_card(job, now),
        PollState::Stopped(reason) => format!("Scan status unavailable: {reason}\n"),
    }
}

#[must_use]
pub fn render_scan_status_card(job: &ScanJob, now: OffsetDateTime) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}  {}\n", card_title(job.status), scan_badge(job.status)));
    out.push_str(&format!("{} • Started {}\n", job.account_alias, time_ago(&job.started_at, now)));

    if !job.status.is_terminal() {
        out.push_str("Scanning resources and evaluating policies...\n");
    }

    out.push('\n');
    out.push_str(&render_table(
        &["Resources Scanned", "Violations Found", "Resolved"],
        &[vec![
            job.resources_scanned.to_string(),
            job.violations_found.to_string(),
            job.violations_resolved.to_string(),
        ]],
    ));

    if let Some(secs) = job.duration_seconds {
        out.push_str(&format!("Duration: {secs}s\n"));
    }
    if job.status == ScanStatus::Failed
        && let Some(message) = job.error_message.as_deref()
    {
        out.push_str(&format!("Error: {message}\n"));
    }
    if let Some(completed) = job.completed_at.as_deref() {
        out.push_str(&format!("Completed {}\n", time_ago(completed, now)));
    }
    out
}

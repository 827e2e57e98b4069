use time::macros::datetime;

use super::*;
use crate::test_support::scan_job;

const NOW: OffsetDateTime = datetime!(2024-03-01 12:05:00 UTC);

#[test]
fn running_job_shows_progress_line() {
    let mut job = scan_job("job-1", "acct-1", ScanStatus::Running);
    job.resources_scanned = 12;
    let out = render_scan_status_card(&job, NOW);

    assert!(out.starts_with("Scan in Progress  [↻ RUNNING]"));
    assert!(out.contains("prod • Started 5 minutes ago"));
    assert!(out.contains("Scanning resources and evaluating policies..."));
    assert!(out.contains("12"));
    assert!(!out.contains("Completed"));
}

#[test]
fn failed_job_shows_error_and_completion() {
    let mut job = scan_job("job-1", "acct-1", ScanStatus::Failed);
    job.error_message = Some("AccessDenied".into());
    job.duration_seconds = Some(42);
    job.completed_at = Some("2024-03-01T12:04:00Z".into());
    let out = render_scan_status_card(&job, NOW);

    assert!(out.starts_with("Scan Failed"));
    assert!(out.contains("Error: AccessDenied"));
    assert!(out.contains("Duration: 42s"));
    assert!(out.contains("Completed 1 minute ago"));
    assert!(!out.contains("Scanning resources"));
}

#[test]
fn states_without_snapshot_render_a_line() {
    assert_eq!(render_poll_state(&PollState::Loading, NOW), "Loading scan...\n");
    assert_eq!(
        render_poll_state(&PollState::Stopped("request failed with status 404".into()), NOW),
        "Scan status unavailable: request failed with status 404\n"
    );
}

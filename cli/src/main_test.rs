use clap::Parser;
use resonant_client::notify::Toast;
use serde_json::json;

use super::*;
use crate::terminal::format_toast;

fn parse(args: &[&str]) -> Cli {
    let mut argv = vec!["resonant"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap()
}

#[test]
fn global_flags_parse_after_subcommand() {
    let cli = parse(&["dashboard", "--json", "--api-url", "http://localhost:9000/api"]);
    assert!(cli.json);
    assert_eq!(cli.api_url.as_deref(), Some("http://localhost:9000/api"));
    assert!(matches!(cli.command, Command::Dashboard { watch: false }));
}

#[test]
fn login_requires_email() {
    assert!(Cli::try_parse_from(["resonant", "login", "--password", "pw"]).is_err());
    let cli = parse(&["login", "--email", "a@b.co", "--password", "pw"]);
    let Command::Login(args) = cli.command else { panic!("expected login") };
    assert_eq!(args.email, "a@b.co");
}

#[test]
fn regions_set_needs_at_least_one_code() {
    assert!(Cli::try_parse_from(["resonant", "accounts", "regions", "set", "acct-1"]).is_err());
    let cli = parse(&["accounts", "regions", "set", "acct-1", "us-east-1", "eu-west-1"]);
    let Command::Accounts(AccountsCommand {
        command: AccountsSubcommand::Regions(RegionsCommand { command: RegionsSubcommand::Set { regions, .. } }),
    }) = cli.command
    else {
        panic!("expected regions set")
    };
    assert_eq!(regions, vec!["us-east-1", "eu-west-1"]);
}

#[test]
fn violation_status_maps_to_wire_value() {
    let cli = parse(&["violations", "list", "--status", "ignored"]);
    let Command::Violations(ViolationsCommand { command: ViolationsSubcommand::List { status } }) = cli.command else {
        panic!("expected violations list")
    };
    assert_eq!(status.map(ViolationStatus::from), Some(ViolationStatus::Ignored));
}

#[test]
fn severity_is_case_insensitive_and_rejects_unknowns() {
    assert_eq!(severity_arg("critical"), Ok(Severity::Critical));
    let err = severity_arg("urgent").unwrap_err();
    assert!(err.contains("LOW, MEDIUM, HIGH, CRITICAL"), "{err}");
}

#[test]
fn policy_args_overlay_existing_form() {
    let cli = parse(&[
        "policies",
        "create",
        "--name",
        "Require owner",
        "--severity",
        "high",
        "--resource-type",
        "ec2:instance",
        "--tag",
        "Owner",
        "--tag",
        "Env=prod|dev",
    ]);
    let Command::Policies(PoliciesCommand { command: PoliciesSubcommand::Create(fields) }) = cli.command else {
        panic!("expected policies create")
    };
    let form = apply_policy_args(PolicyForm::new(), fields).unwrap();
    assert_eq!(form.name, "Require owner");
    assert_eq!(form.severity, Severity::High);
    assert_eq!(form.resource_types, vec!["ec2:instance"]);
    assert_eq!(form.required_tags.len(), 2);
    assert_eq!(form.required_tags[1].allowed, Some(vec!["prod".to_owned(), "dev".to_owned()]));
    assert!(form.to_request().is_ok());
}

#[test]
fn policy_args_keep_fields_not_given() {
    let mut base = PolicyForm::new();
    base.name = "Keep me".into();
    base.add_tag("CostCenter").unwrap();
    let form = apply_policy_args(base, PolicyArgs { enabled: Some(false), ..PolicyArgs::default() }).unwrap();
    assert_eq!(form.name, "Keep me");
    assert!(!form.enabled);
    assert_eq!(form.required_tags.len(), 1);
}

#[test]
fn bad_tag_key_is_a_validation_error() {
    let args = PolicyArgs { tags: vec!["=prod".into()], ..PolicyArgs::default() };
    assert!(matches!(apply_policy_args(PolicyForm::new(), args), Err(CliError::Validation(_))));
}

#[test]
fn unauthorized_is_detected_through_wrappers() {
    assert!(CliError::Api(ApiError::Unauthorized).is_unauthorized());
    assert!(CliError::Policy(PolicyFormError::Api(ApiError::Unauthorized)).is_unauthorized());
    assert!(!CliError::Api(ApiError::Status { status: 500, message: None }).is_unauthorized());
}

#[test]
fn scan_list_renders_rows_or_empty_state() {
    assert_eq!(render_scan_list(&[]), "No scans yet\n");
    let job: ScanJob = serde_json::from_value(json!({
        "id": "job-1",
        "accountId": "acct-1",
        "accountAlias": "Production",
        "status": "RUNNING",
        "resourcesScanned": 12,
        "violationsFound": 3,
        "startedAt": "2024-03-01T12:00:00Z",
        "completedAt": null,
        "durationSeconds": null,
        "errorMessage": null,
        "createdAt": "2024-03-01T12:00:00Z"
    }))
    .unwrap();
    let out = render_scan_list(&[job]);
    assert!(out.starts_with("ID"));
    assert!(out.contains("job-1  Production  RUNNING"));
}

#[test]
fn resource_stats_end_with_total() {
    let stats = ResourceStats { total: 5, by_type: [("ec2:instance".to_owned(), 5)].into() };
    let out = render_resource_stats(&stats);
    assert!(out.lines().last().unwrap().starts_with("Total"));
}

#[test]
fn toasts_format_with_glyphs() {
    assert_eq!(format_toast(&Toast::success("Policy deleted", "")), "✓ Policy deleted");
    assert_eq!(format_toast(&Toast::error("Scan Failed", "boom")), "✗ Scan Failed: boom");
}

//! Onboarding checklist shown on the dashboard.

#[cfg(test)]
#[path = "getting_started_test.rs"]
mod getting_started_test;

use super::table::plural;
use crate::state::router::Route;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuideStep {
    pub number: u8,
    pub title: &'static str,
    pub description: String,
    pub complete: bool,
    pub enabled: bool,
    pub action: Option<(&'static str, Route)>,
}

/// Counts the guide is derived from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GuideInput {
    pub accounts: u64,
    pub policies: u64,
    pub enabled_policies: u64,
}

#[must_use]
pub fn guide_steps(input: GuideInput) -> [GuideStep; 3] {
    let has_accounts = input.accounts > 0;
    let has_policies = input.policies > 0;
    [
        GuideStep {
            number: 1,
            title: "Connect AWS Account",
            description: if has_accounts {
                format!("{} connected and ready for scanning", plural(input.accounts, "AWS account", "AWS accounts"))
            } else {
                "Link your AWS account using IAM roles for secure, read-only access".to_owned()
            },
            complete: has_accounts,
            enabled: true,
            action: Some((if has_accounts { "Manage Accounts" } else { "Connect Now" }, Route::AwsAccounts)),
        },
        GuideStep {
            number: 2,
            title: "Create Tag Policies",
            description: if has_policies {
                format!(
                    "{} configured ({} active)",
                    plural(input.policies, "policy", "policies"),
                    input.enabled_policies
                )
            } else {
                "Define required tags and validation rules for different resource types".to_owned()
            },
            complete: has_policies,
            enabled: has_accounts,
            action: has_accounts
                .then_some((if has_policies { "Manage Policies" } else { "Create Policy" }, Route::TagPolicies)),
        },
        GuideStep {
            number: 3,
            title: "Monitor Compliance",
            description: "View real-time compliance status and receive alerts for violations".to_owned(),
            complete: false,
            enabled: has_policies,
            action: None,
        },
    ]
}

#[must_use]
pub fn render_getting_started(input: GuideInput) -> String {
    let mut out = String::from("Getting Started\nFollow these steps to start monitoring your AWS resources\n");
    for step in guide_steps(input) {
        let mark = match (step.complete, step.enabled) {
            (true, _) => "[x]",
            (false, true) => "[ ]",
            (false, false) => "[-]",
        };
        out.push_str(&format!("\n{mark} {}. {}\n    {}\n", step.number, step.title, step.description));
        if let Some((label, route)) = step.action {
            out.push_str(&format!("    {label}: {route}\n"));
        }
    }
    out
}

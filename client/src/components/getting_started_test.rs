use super::*;

#[test]
fn fresh_user_only_has_first_step_enabled() {
    let steps = guide_steps(GuideInput::default());
    assert!(steps[0].enabled && !steps[0].complete);
    assert_eq!(steps[0].action, Some(("Connect Now", Route::AwsAccounts)));
    assert!(!steps[1].enabled);
    assert_eq!(steps[1].action, None);
    assert!(!steps[2].enabled);
}

#[test]
fn counts_drive_descriptions() {
    let steps = guide_steps(GuideInput { accounts: 2, policies: 1, enabled_policies: 1 });
    assert!(steps[0].complete);
    assert_eq!(steps[0].description, "2 AWS accounts connected and ready for scanning");
    assert_eq!(steps[1].description, "1 policy configured (1 active)");
    assert_eq!(steps[1].action, Some(("Manage Policies", Route::TagPolicies)));
    assert!(steps[2].enabled);
}

#[test]
fn render_marks_progress() {
    let out = render_getting_started(GuideInput { accounts: 1, policies: 0, enabled_policies: 0 });
    assert!(out.contains("[x] 1. Connect AWS Account"));
    assert!(out.contains("[ ] 2. Create Tag Policies"));
    assert!(out.contains("[-] 3. Monitor Compliance"));
    assert!(out.contains("Create Policy: /tag-policies"));
}

use super::*;
use crate::test_support::policy;

#[test]
fn tag_summary_marks_any_value() {
    let mut tags = RequiredTags::new();
    tags.insert("Owner".into(), None);
    tags.insert("Env".into(), Some(vec!["prod".into(), "dev".into()]));
    assert_eq!(required_tags_summary(&tags), "Env=prod|dev, Owner=*");
}

#[test]
fn list_shows_status_and_type_count() {
    let out = render_policy_list(&[policy("pol-1", true), policy("pol-2", false)]);
    assert!(out.contains("Enabled"));
    assert!(out.contains("Disabled"));
    assert!(out.contains("1 type"));
}

#[test]
fn empty_list_prompts_creation() {
    assert_eq!(render_policy_list(&[]), EMPTY_TEXT);
}

#[test]
fn detail_includes_required_tags() {
    assert!(render_policy_detail(&policy("pol-1", true)).contains("Required tags:  Owner=*"));
}
